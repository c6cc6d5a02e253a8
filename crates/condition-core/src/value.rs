//! Captured runtime values.
//!
//! Expressions in a condition evaluate to values of arbitrary types. The
//! capture side boxes each value into a [`Captured`], remembering its runtime
//! type, a coarse [`ValueKind`], a per-instance [`Identity`] and how to turn
//! it into text. [`Value`] adds the "absent" case for expressions that
//! produced nothing.

use std::any::{Any, TypeId};
use std::borrow::Cow;
use std::fmt::{self, Debug, Display, Write};
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::errors::RenderError;

static NEXT_IDENTITY: AtomicU64 = AtomicU64::new(1);

/// Process-unique number identifying one captured instance.
///
/// Assigned at capture time and never derived from the value's contents, so
/// two equal values still have different identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identity(u64);

impl Identity {
    fn next() -> Self {
        Self(NEXT_IDENTITY.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::LowerHex for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

/// Runtime type of a captured value. Compared by `TypeId` only.
#[derive(Debug, Clone, Copy)]
pub struct TypeTag {
    id: TypeId,
    name: &'static str,
}

impl TypeTag {
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// A tag for `T` reported under a fixed name instead of `type_name::<T>()`.
    pub fn named<T: ?Sized + 'static>(name: &'static str) -> Self {
        Self {
            id: TypeId::of::<T>(),
            name,
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully-qualified type name, e.g. `alloc::string::String`.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeTag {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeTag {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// A string type (`String`, `&str`, `Box<str>`, ...).
    Text,
    /// The result of string interpolation (`format_args!`).
    Interpolated,
    /// An enum variant captured by its default (`Debug`) name or a custom `Display`.
    EnumConstant,
    Other,
}

/// Fallible text conversion for user types.
///
/// Implement this when a value's rendering can fail; the failure is reported
/// next to the value's identity instead of aborting the report.
pub trait Inspect {
    fn inspect(&self) -> Result<String, RenderError>;
}

type StringifyFn = fn(&dyn Any) -> Result<String, RenderError>;
type TextFn = for<'a> fn(&'a dyn Any) -> Option<&'a str>;

/// A type-erased runtime value.
pub struct Captured {
    value: Box<dyn Any>,
    tag: TypeTag,
    kind: ValueKind,
    identity: Identity,
    stringify: StringifyFn,
    text: Option<TextFn>,
}

impl Captured {
    fn build<T: Any>(value: T, tag: TypeTag, kind: ValueKind, stringify: StringifyFn) -> Self {
        Self {
            value: Box::new(value),
            tag,
            kind,
            identity: Identity::next(),
            stringify,
            text: None,
        }
    }

    /// Captures a value rendered through its `Display` implementation.
    pub fn display<T: Display + 'static>(value: T) -> Self {
        Self::build(value, TypeTag::of::<T>(), ValueKind::Other, display_any::<T>)
    }

    /// Captures a value rendered through its `Debug` implementation.
    pub fn debug<T: Debug + 'static>(value: T) -> Self {
        Self::build(value, TypeTag::of::<T>(), ValueKind::Other, debug_any::<T>)
    }

    pub fn inspect<T: Inspect + 'static>(value: T) -> Self {
        Self::build(value, TypeTag::of::<T>(), ValueKind::Other, inspect_any::<T>)
    }

    pub fn text<T: AsRef<str> + 'static>(value: T) -> Self {
        let mut captured =
            Self::build(value, TypeTag::of::<T>(), ValueKind::Text, text_to_string::<T>);
        captured.text = Some(text_of::<T>);
        captured
    }

    /// Captures the result of string interpolation.
    ///
    /// The arguments are formatted immediately and the resulting string is
    /// stored; the runtime type reported is `core::fmt::Arguments`. A failing
    /// `Display` inside the arguments surfaces when the value is rendered.
    pub fn interpolated(args: fmt::Arguments<'_>) -> Self {
        let mut out = String::new();
        let formatted = match out.write_fmt(args) {
            Ok(()) => Ok(out),
            Err(err) => Err(RenderError::from(err)),
        };
        let mut captured = Self::build(
            Interpolation(formatted),
            TypeTag::named::<fmt::Arguments<'static>>("core::fmt::Arguments"),
            ValueKind::Interpolated,
            interpolation_to_string,
        );
        captured.text = Some(interpolation_text);
        captured
    }

    /// Captures an enum variant by its default name form (`Debug`).
    pub fn enum_constant<T: Debug + 'static>(value: T) -> Self {
        Self::build(value, TypeTag::of::<T>(), ValueKind::EnumConstant, debug_any::<T>)
    }

    /// Captures an enum variant whose `Display` overrides the name form.
    pub fn enum_display<T: Display + 'static>(value: T) -> Self {
        Self::build(value, TypeTag::of::<T>(), ValueKind::EnumConstant, display_any::<T>)
    }

    pub fn type_tag(&self) -> TypeTag {
        self.tag
    }

    pub fn type_name(&self) -> &'static str {
        self.tag.name
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn identity(&self) -> Identity {
        self.identity
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }

    /// The string content of a text or interpolated value, without calling user code.
    pub fn as_text(&self) -> Option<&str> {
        self.text.and_then(|text| text(self.value.as_ref()))
    }

    /// True only for a `Text` value holding the empty string.
    pub fn is_empty_text(&self) -> bool {
        self.kind == ValueKind::Text && self.as_text() == Some("")
    }

    /// Default textual form of the value.
    pub fn stringify(&self) -> Result<String, RenderError> {
        (self.stringify)(self.value.as_ref())
    }

    /// String content for text-like values, the default textual form otherwise.
    pub fn to_text(&self) -> Result<Cow<'_, str>, RenderError> {
        match self.as_text() {
            Some(text) => Ok(Cow::Borrowed(text)),
            None => self.stringify().map(Cow::Owned),
        }
    }

    /// `<type name>@<hex identity>`, used when nothing more useful can be shown.
    pub fn identity_string(&self) -> String {
        format!("{}@{:x}", self.tag.name, self.identity)
    }
}

impl Debug for Captured {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Captured")
            .field("type", &self.tag.name)
            .field("kind", &self.kind)
            .field("identity", &self.identity.0)
            .finish()
    }
}

struct Interpolation(Result<String, RenderError>);

fn downcast<T: 'static>(value: &dyn Any) -> Result<&T, RenderError> {
    value.downcast_ref::<T>().ok_or_else(|| {
        RenderError::new(
            "TypeMismatch",
            format!("captured value is not a {}", std::any::type_name::<T>()),
        )
    })
}

fn display_any<T: Display + 'static>(value: &dyn Any) -> Result<String, RenderError> {
    let value = downcast::<T>(value)?;
    let mut out = String::new();
    write!(out, "{value}")?;
    Ok(out)
}

fn debug_any<T: Debug + 'static>(value: &dyn Any) -> Result<String, RenderError> {
    let value = downcast::<T>(value)?;
    let mut out = String::new();
    write!(out, "{value:?}")?;
    Ok(out)
}

fn inspect_any<T: Inspect + 'static>(value: &dyn Any) -> Result<String, RenderError> {
    downcast::<T>(value)?.inspect()
}

fn text_to_string<T: AsRef<str> + 'static>(value: &dyn Any) -> Result<String, RenderError> {
    Ok(downcast::<T>(value)?.as_ref().to_string())
}

fn text_of<T: AsRef<str> + 'static>(value: &dyn Any) -> Option<&str> {
    value.downcast_ref::<T>().map(AsRef::as_ref)
}

fn interpolation_to_string(value: &dyn Any) -> Result<String, RenderError> {
    downcast::<Interpolation>(value)?.0.clone()
}

fn interpolation_text(value: &dyn Any) -> Option<&str> {
    match value.downcast_ref::<Interpolation>() {
        Some(Interpolation(Ok(text))) => Some(text.as_str()),
        _ => None,
    }
}

macro_rules! impl_from_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Captured {
                fn from(value: $ty) -> Self {
                    Captured::display(value)
                }
            }
        )*
    };
}

impl_from_display!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);

macro_rules! impl_from_text {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Captured {
                fn from(value: $ty) -> Self {
                    Captured::text(value)
                }
            }
        )*
    };
}

impl_from_text!(
    String,
    &'static str,
    Box<str>,
    Cow<'static, str>,
    Rc<str>,
    Arc<str>,
);

/// The value an expression evaluated to, or nothing.
#[derive(Debug, Default)]
pub enum Value {
    #[default]
    Absent,
    Present(Captured),
}

impl Value {
    pub fn of(value: impl Into<Captured>) -> Self {
        Value::Present(value.into())
    }

    pub fn captured(&self) -> Option<&Captured> {
        match self {
            Value::Absent => None,
            Value::Present(captured) => Some(captured),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    pub fn kind(&self) -> Option<ValueKind> {
        self.captured().map(Captured::kind)
    }

    /// Runtime type; the unit type stands in for an absent value.
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Value::Absent => TypeTag::of::<()>(),
            Value::Present(captured) => captured.type_tag(),
        }
    }

    /// The boolean outcome of a comparison, if this value is one.
    pub fn as_bool(&self) -> Option<bool> {
        self.captured()
            .and_then(|captured| captured.downcast_ref::<bool>())
            .copied()
    }
}

impl From<Captured> for Value {
    fn from(captured: Captured) -> Self {
        Value::Present(captured)
    }
}

impl From<Option<Captured>> for Value {
    fn from(captured: Option<Captured>) -> Self {
        captured.map_or(Value::Absent, Value::Present)
    }
}
