//! Primitive values and their companions

use crate::catalog::PrimitiveType;
use crate::common::complex::Extension;
use crate::decimal::Decimal;
use std::borrow::Cow;

/// `id` and `extension` attached to a primitive value.
///
/// In JSON this is the `_name` object next to the value; in XML it is the
/// element's `id` attribute and `<extension>` children.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Companion {
    pub id: Option<String>,
    pub extension: Vec<Extension>,
}

impl Companion {
    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.extension.is_empty()
    }
}

/// A FHIR primitive: an optional value plus an optional companion.
///
/// Either half may be absent. A primitive with neither is treated as not
/// present at all.
#[derive(Debug, Clone, PartialEq)]
pub struct Primitive<T> {
    pub value: Option<T>,
    pub companion: Option<Companion>,
}

impl<T> Default for Primitive<T> {
    fn default() -> Self {
        Self {
            value: None,
            companion: None,
        }
    }
}

impl<T> Primitive<T> {
    pub fn new(value: impl Into<T>) -> Self {
        Self {
            value: Some(value.into()),
            companion: None,
        }
    }

    pub fn get(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn set(&mut self, value: impl Into<T>) {
        self.value = Some(value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_none() && self.companion.as_ref().map_or(true, Companion::is_empty)
    }

    /// The companion, created on first use.
    pub fn companion_mut(&mut self) -> &mut Companion {
        self.companion.get_or_insert_with(Companion::default)
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.companion_mut().id = Some(id.into());
        self
    }

    pub fn with_extension(mut self, extension: Extension) -> Self {
        self.companion_mut().extension.push(extension);
        self
    }
}

impl<T> From<T> for Primitive<T> {
    fn from(value: T) -> Self {
        Self {
            value: Some(value),
            companion: None,
        }
    }
}

impl From<&str> for Primitive<String> {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Borrowed primitive value as handed to the encoders.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar<'a> {
    Boolean(bool),
    Integer(i64),
    Decimal(&'a Decimal),
    String(&'a str),
}

impl Scalar<'_> {
    /// Lexical form used for XML `value` attributes.
    pub fn to_text(&self) -> Cow<'_, str> {
        match self {
            Scalar::Boolean(true) => Cow::Borrowed("true"),
            Scalar::Boolean(false) => Cow::Borrowed("false"),
            Scalar::Integer(i) => Cow::Owned(i.to_string()),
            Scalar::Decimal(d) => Cow::Borrowed(d.as_str()),
            Scalar::String(s) => Cow::Borrowed(s),
        }
    }
}

/// Owned primitive value as produced by the decoders.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Boolean(bool),
    Integer(i64),
    Decimal(Decimal),
    String(String),
}

/// Rust types that can hold a FHIR primitive value.
pub trait PrimitiveValue: Clone + std::fmt::Debug + PartialEq {
    const TYPE: PrimitiveType;

    fn to_scalar(&self) -> Scalar<'_>;

    /// Converts a decoded value; `None` when it does not fit this type.
    fn from_scalar(value: ScalarValue) -> Option<Self>;
}

impl PrimitiveValue for bool {
    const TYPE: PrimitiveType = PrimitiveType::Boolean;

    fn to_scalar(&self) -> Scalar<'_> {
        Scalar::Boolean(*self)
    }

    fn from_scalar(value: ScalarValue) -> Option<Self> {
        match value {
            ScalarValue::Boolean(b) => Some(b),
            _ => None,
        }
    }
}

impl PrimitiveValue for i32 {
    const TYPE: PrimitiveType = PrimitiveType::Integer;

    fn to_scalar(&self) -> Scalar<'_> {
        Scalar::Integer(i64::from(*self))
    }

    fn from_scalar(value: ScalarValue) -> Option<Self> {
        match value {
            ScalarValue::Integer(i) => i32::try_from(i).ok(),
            _ => None,
        }
    }
}

/// `positiveInt` and `unsignedInt`.
impl PrimitiveValue for u32 {
    const TYPE: PrimitiveType = PrimitiveType::Integer;

    fn to_scalar(&self) -> Scalar<'_> {
        Scalar::Integer(i64::from(*self))
    }

    fn from_scalar(value: ScalarValue) -> Option<Self> {
        match value {
            ScalarValue::Integer(i) => u32::try_from(i).ok(),
            _ => None,
        }
    }
}

impl PrimitiveValue for Decimal {
    const TYPE: PrimitiveType = PrimitiveType::Decimal;

    fn to_scalar(&self) -> Scalar<'_> {
        Scalar::Decimal(self)
    }

    fn from_scalar(value: ScalarValue) -> Option<Self> {
        match value {
            ScalarValue::Decimal(d) => Some(d),
            _ => None,
        }
    }
}

impl PrimitiveValue for String {
    const TYPE: PrimitiveType = PrimitiveType::String;

    fn to_scalar(&self) -> Scalar<'_> {
        Scalar::String(self)
    }

    fn from_scalar(value: ScalarValue) -> Option<Self> {
        match value {
            ScalarValue::String(s) => Some(s),
            _ => None,
        }
    }
}

/// Narrative XHTML kept as raw markup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Xhtml(pub String);

impl Xhtml {
    pub fn new(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_primitive() {
        let p: Primitive<String> = Primitive::default();
        assert!(p.is_empty());

        let p = Primitive::<String>::default().with_id("x");
        assert!(!p.is_empty());
        assert_eq!(p.get(), None);
    }

    #[test]
    fn empty_companion_does_not_count() {
        let p = Primitive::<bool> {
            value: None,
            companion: Some(Companion::default()),
        };
        assert!(p.is_empty());
    }

    #[test]
    fn scalar_text() {
        let d = Decimal::must("1.50");
        assert_eq!(Scalar::Decimal(&d).to_text(), "1.50");
        assert_eq!(Scalar::Boolean(false).to_text(), "false");
        assert_eq!(Scalar::Integer(-3).to_text(), "-3");
    }

    #[test]
    fn integer_ranges() {
        assert_eq!(u32::from_scalar(ScalarValue::Integer(-1)), None);
        assert_eq!(i32::from_scalar(ScalarValue::Integer(7)), Some(7));
        assert_eq!(i32::from_scalar(ScalarValue::String("7".into())), None);
    }
}
