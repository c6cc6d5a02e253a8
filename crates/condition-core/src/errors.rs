use std::any::Any;
use std::borrow::Cow;

use condition_diff::PathMismatch;

/// A renderer (heuristic, diff service or stringifier) could not produce a string.
///
/// `kind` names what went wrong the way an exception class name would, e.g.
/// `Error` for a failed `fmt` implementation or `panic` for a caught panic.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct RenderError {
    kind: Cow<'static, str>,
    message: String,
}

impl RenderError {
    pub fn new(kind: impl Into<Cow<'static, str>>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
        }
    }

    /// Wraps an error value, using the simple name of its type as the kind.
    pub fn of<E: std::error::Error + ?Sized>(err: &E) -> Self {
        Self::new(simple_type_name::<E>(), err.to_string())
    }

    pub(crate) fn from_panic(payload: &(dyn Any + Send)) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };
        Self::new("panic", message)
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<std::fmt::Error> for RenderError {
    fn from(err: std::fmt::Error) -> Self {
        Self::of(&err)
    }
}

impl From<PathMismatch> for RenderError {
    fn from(err: PathMismatch) -> Self {
        Self::of(&err)
    }
}

/// Last path segment of a type name, without generic arguments.
pub(crate) fn simple_type_name<T: ?Sized>() -> &'static str {
    let full = std::any::type_name::<T>();
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("unsupported config version {found} (supported: {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },
}
