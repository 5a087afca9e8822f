//! Reflection over model fields
//!
//! The codecs never see concrete structs. They walk a value through
//! [`Complex`], reading each field as a list of [`ItemRef`]s and writing
//! decoded items back through [`Field::decode_item`]. Everything here is
//! implemented by the declaration macros; hand-written impls are not needed.

use crate::catalog::{FieldKind, PrimitiveType, TypeInfo};
use crate::common::error::{Error, Result};
use crate::primitive::{Companion, Primitive, PrimitiveValue, Scalar, ScalarValue, Xhtml};
use crate::registry::Resource;

/// A datatype, backbone element or resource viewed through its catalog entry.
pub trait Complex {
    fn type_info(&self) -> &'static TypeInfo;

    /// Field by wire name (choice fields by base name).
    fn field(&self, name: &str) -> Option<&dyn Field>;

    fn field_mut(&mut self, name: &str) -> Option<&mut dyn Field>;
}

/// Borrowed view of one value inside a field.
pub enum ItemRef<'a> {
    Attribute(&'a str),
    Primitive {
        value: Option<Scalar<'a>>,
        companion: Option<&'a Companion>,
    },
    Complex(&'a dyn Complex),
    Resource(&'a Resource),
    Xhtml(&'a str),
}

/// Source of one decoded value, implemented by each wire format.
///
/// The model asks for exactly the shape it expects; a format that finds
/// something else reports malformed input.
pub trait ItemDecoder {
    fn primitive(&mut self, ty: PrimitiveType) -> Result<(Option<ScalarValue>, Option<Companion>)>;

    fn complex(&mut self, target: &mut dyn Complex) -> Result<()>;

    fn resource(&mut self) -> Result<Resource>;

    /// Attribute strings and raw XHTML.
    fn text(&mut self) -> Result<String>;
}

/// A single value type that can appear in a field.
pub trait Item: Sized {
    const KIND: FieldKind;

    fn as_item(&self) -> ItemRef<'_>;

    /// Choice suffix of the populated variant.
    fn variant(&self) -> Option<&'static str> {
        None
    }

    fn decode(variant: Option<&str>, decoder: &mut dyn ItemDecoder) -> Result<Self>;
}

/// Static shape of a struct field type, used to build catalog entries.
pub trait FieldType {
    const KIND: FieldKind;
    const REPEATED: bool;
}

/// Dynamic access to a struct field.
pub trait Field {
    /// Present values; empty when the field is absent.
    fn items(&self) -> Vec<ItemRef<'_>>;

    fn variant(&self) -> Option<&'static str> {
        None
    }

    /// Decodes one value into the field, appending for repeated fields.
    fn decode_item(&mut self, variant: Option<&str>, decoder: &mut dyn ItemDecoder) -> Result<()>;
}

fn duplicate() -> Error {
    Error::malformed("value given more than once for a single-valued field")
}

impl<T: Item> FieldType for Option<T> {
    const KIND: FieldKind = T::KIND;
    const REPEATED: bool = false;
}

impl<T: Item> FieldType for Vec<T> {
    const KIND: FieldKind = T::KIND;
    const REPEATED: bool = true;
}

impl<T: PrimitiveValue> FieldType for Primitive<T> {
    const KIND: FieldKind = FieldKind::Primitive(T::TYPE);
    const REPEATED: bool = false;
}

impl FieldType for String {
    const KIND: FieldKind = FieldKind::Attribute;
    const REPEATED: bool = false;
}

impl<T: Item> Field for Option<T> {
    fn items(&self) -> Vec<ItemRef<'_>> {
        self.iter().map(T::as_item).collect()
    }

    fn variant(&self) -> Option<&'static str> {
        self.as_ref().and_then(T::variant)
    }

    fn decode_item(&mut self, variant: Option<&str>, decoder: &mut dyn ItemDecoder) -> Result<()> {
        if self.is_some() {
            return Err(duplicate());
        }
        *self = Some(T::decode(variant, decoder)?);
        Ok(())
    }
}

impl<T: Item> Field for Vec<T> {
    fn items(&self) -> Vec<ItemRef<'_>> {
        self.iter().map(T::as_item).collect()
    }

    fn variant(&self) -> Option<&'static str> {
        self.first().and_then(T::variant)
    }

    fn decode_item(&mut self, variant: Option<&str>, decoder: &mut dyn ItemDecoder) -> Result<()> {
        self.push(T::decode(variant, decoder)?);
        Ok(())
    }
}

impl<T: PrimitiveValue> Field for Primitive<T> {
    fn items(&self) -> Vec<ItemRef<'_>> {
        if self.is_empty() {
            Vec::new()
        } else {
            vec![self.as_item()]
        }
    }

    fn decode_item(&mut self, variant: Option<&str>, decoder: &mut dyn ItemDecoder) -> Result<()> {
        if !self.is_empty() {
            return Err(duplicate());
        }
        *self = Primitive::decode(variant, decoder)?;
        Ok(())
    }
}

impl Field for String {
    fn items(&self) -> Vec<ItemRef<'_>> {
        if self.is_empty() {
            Vec::new()
        } else {
            vec![ItemRef::Attribute(self)]
        }
    }

    fn decode_item(&mut self, _variant: Option<&str>, decoder: &mut dyn ItemDecoder) -> Result<()> {
        if !self.is_empty() {
            return Err(duplicate());
        }
        *self = decoder.text()?;
        Ok(())
    }
}

impl<T: PrimitiveValue> Item for Primitive<T> {
    const KIND: FieldKind = FieldKind::Primitive(T::TYPE);

    fn as_item(&self) -> ItemRef<'_> {
        ItemRef::Primitive {
            value: self.value.as_ref().map(T::to_scalar),
            companion: self.companion.as_ref().filter(|c| !c.is_empty()),
        }
    }

    fn decode(_variant: Option<&str>, decoder: &mut dyn ItemDecoder) -> Result<Self> {
        let (value, companion) = decoder.primitive(T::TYPE)?;
        let value = match value {
            Some(scalar) => Some(T::from_scalar(scalar).ok_or_else(|| {
                Error::malformed(format!("value does not fit a {:?} primitive", T::TYPE))
            })?),
            None => None,
        };
        Ok(Primitive { value, companion })
    }
}

impl Item for String {
    const KIND: FieldKind = FieldKind::Attribute;

    fn as_item(&self) -> ItemRef<'_> {
        ItemRef::Attribute(self)
    }

    fn decode(_variant: Option<&str>, decoder: &mut dyn ItemDecoder) -> Result<Self> {
        decoder.text()
    }
}

impl Item for Xhtml {
    const KIND: FieldKind = FieldKind::Xhtml;

    fn as_item(&self) -> ItemRef<'_> {
        ItemRef::Xhtml(&self.0)
    }

    fn decode(_variant: Option<&str>, decoder: &mut dyn ItemDecoder) -> Result<Self> {
        decoder.text().map(Xhtml)
    }
}

impl Item for Resource {
    const KIND: FieldKind = FieldKind::Resource;

    fn as_item(&self) -> ItemRef<'_> {
        ItemRef::Resource(self)
    }

    fn decode(_variant: Option<&str>, decoder: &mut dyn ItemDecoder) -> Result<Self> {
        decoder.resource()
    }
}

impl<T: Item> Item for Box<T> {
    const KIND: FieldKind = T::KIND;

    fn as_item(&self) -> ItemRef<'_> {
        (**self).as_item()
    }

    fn variant(&self) -> Option<&'static str> {
        (**self).variant()
    }

    fn decode(variant: Option<&str>, decoder: &mut dyn ItemDecoder) -> Result<Self> {
        T::decode(variant, decoder).map(Box::new)
    }
}
