pub mod config;
pub mod errors;
pub mod render;
pub mod services;
pub mod tree;
pub mod value;

pub use config::{load_config, RenderConfig};
pub use errors::{ConfigError, RenderError};
pub use render::{render, ValueRenderer};
pub use services::{DefaultStringifier, DiffService, LevenshteinDiff, Stringifier};
pub use tree::{EqualityForm, ExpressionNode, NodeKind, PostOrder};
pub use value::{Captured, Identity, Inspect, TypeTag, Value, ValueKind};
