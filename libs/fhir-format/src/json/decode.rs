//! JSON to model.

use crate::error::Result;
use crate::options::{DecodeOptions, UnknownFields};
use crate::path::ElementPath;
use fhirwire_models::{
    Companion, Complex, Decimal, Error, Extension, Field, ItemDecoder, PrimitiveType, Registry,
    Resource, ScalarValue, TypeKind, WireName,
};
use serde_json::{Map, Value};

/// Decodes FHIR JSON against a registry.
///
/// ```rust
/// use fhirwire_format::JsonDecoder;
/// use fhirwire_format::options::DecodeOptions;
///
/// let decoder = JsonDecoder::new(fhirwire_models::registry()).with_options(DecodeOptions::strict());
/// let resource = decoder.decode_str(r#"{"resourceType":"Patient","id":"p1"}"#).unwrap();
/// assert_eq!(resource.resource_type(), "Patient");
/// ```
#[derive(Debug, Clone)]
pub struct JsonDecoder<'r> {
    registry: &'r Registry,
    options: DecodeOptions,
}

impl<'r> JsonDecoder<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            options: DecodeOptions::default(),
        }
    }

    pub fn with_options(mut self, options: DecodeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn decode_slice(&self, bytes: &[u8]) -> Result<Resource> {
        let value: Value = serde_json::from_slice(bytes)?;
        self.decode_value(&value)
    }

    pub fn decode_str(&self, text: &str) -> Result<Resource> {
        let value: Value = serde_json::from_str(text)?;
        self.decode_value(&value)
    }

    /// Decodes an already parsed document.
    pub fn decode_value(&self, value: &Value) -> Result<Resource> {
        let resource = self.walker().resource(value)?;
        tracing::debug!(
            resource_type = resource.resource_type(),
            format = "json",
            "decoded resource"
        );
        Ok(resource)
    }

    /// Decodes a standalone datatype or backbone element.
    pub fn decode_complex<T: Complex + Default>(&self, value: &Value) -> Result<T> {
        let object = value
            .as_object()
            .ok_or_else(|| Error::malformed("expected a JSON object"))?;
        let mut target = T::default();
        let mut walker = self.walker();
        walker.path.push_field(target.type_info().name);
        walker.object(object, &mut target)?;
        Ok(target)
    }

    fn walker(&self) -> Walker<'_> {
        Walker {
            registry: self.registry,
            options: &self.options,
            path: ElementPath::default(),
            depth: 0,
        }
    }
}

/// Decoding state for one document.
struct Walker<'a> {
    registry: &'a Registry,
    options: &'a DecodeOptions,
    path: ElementPath,
    depth: usize,
}

/// A JSON property together with its `_name` companion.
struct Entry<'v> {
    name: &'v str,
    value: Option<&'v Value>,
    companion: Option<&'v Value>,
}

impl Walker<'_> {
    fn malformed(&self, message: impl Into<String>) -> Error {
        Error::malformed(message).at(&self.path.to_string())
    }

    fn resource(&mut self, value: &Value) -> std::result::Result<Resource, Error> {
        let object = value
            .as_object()
            .ok_or_else(|| self.malformed("expected a JSON object for the resource"))?;
        let name = object
            .get("resourceType")
            .and_then(Value::as_str)
            .ok_or_else(|| self.malformed("missing resourceType property"))?;

        let mut resource = self.registry.construct(name)?;
        self.path.push_field(name);
        self.object(object, resource.as_complex_mut())?;
        self.path.pop();
        Ok(resource)
    }

    fn object(
        &mut self,
        object: &Map<String, Value>,
        target: &mut dyn Complex,
    ) -> std::result::Result<(), Error> {
        self.depth += 1;
        if self.depth > self.options.max_depth {
            return Err(self.malformed(format!(
                "nesting deeper than {} levels",
                self.options.max_depth
            )));
        }

        let info = target.type_info();
        let mut entries: Vec<Entry<'_>> = Vec::with_capacity(object.len());
        for (key, value) in object {
            if key == "resourceType" && info.kind == TypeKind::Resource {
                continue;
            }
            let (name, is_companion) = match key.strip_prefix('_') {
                Some(name) => (name, true),
                None => (key.as_str(), false),
            };
            let index = match entries.iter().position(|e| e.name == name) {
                Some(index) => index,
                None => {
                    entries.push(Entry {
                        name,
                        value: None,
                        companion: None,
                    });
                    entries.len() - 1
                }
            };
            if is_companion {
                entries[index].companion = Some(value);
            } else {
                entries[index].value = Some(value);
            }
        }

        for entry in entries {
            let (field, variant) = match info.resolve(entry.name) {
                WireName::Field(field) => (field, None),
                WireName::Choice(field, variant) => (field, Some(variant.suffix)),
                WireName::UnknownVariant(_) => {
                    return Err(Error::UnknownChoiceVariant {
                        path: self.path.to_string(),
                        name: entry.name.to_string(),
                    })
                }
                WireName::Unknown => {
                    self.unknown(entry.name)?;
                    continue;
                }
            };

            self.path.push_field(entry.name);
            if entry.companion.is_some() && !field.supports_companion() {
                return Err(self.malformed(format!(
                    "'_{}' is only allowed for primitive values",
                    entry.name
                )));
            }
            let slot = target
                .field_mut(field.name)
                .ok_or_else(|| self.malformed("field missing from model"))?;
            if field.repeated {
                self.repeated(&entry, slot, variant)?;
            } else {
                self.single(&entry, slot, variant)?;
            }
            self.path.pop();
        }

        self.depth -= 1;
        Ok(())
    }

    fn single(
        &mut self,
        entry: &Entry<'_>,
        slot: &mut dyn Field,
        variant: Option<&str>,
    ) -> std::result::Result<(), Error> {
        let value = entry.value.filter(|v| !v.is_null());
        let companion = entry.companion.filter(|v| !v.is_null());
        if value.is_none() && companion.is_none() {
            return Ok(());
        }
        if matches!(value, Some(Value::Array(_))) || matches!(companion, Some(Value::Array(_))) {
            return Err(self.malformed("expected a single value, found an array"));
        }

        let mut item = JsonItem {
            walker: self,
            value,
            companion,
        };
        let result = slot.decode_item(variant, &mut item);
        result.map_err(|err| err.at(&self.path.to_string()))
    }

    fn repeated(
        &mut self,
        entry: &Entry<'_>,
        slot: &mut dyn Field,
        variant: Option<&str>,
    ) -> std::result::Result<(), Error> {
        let values = match entry.value {
            None | Some(Value::Null) => &[][..],
            Some(Value::Array(values)) => values.as_slice(),
            Some(_) => return Err(self.malformed("expected an array")),
        };
        let companions = match entry.companion {
            None | Some(Value::Null) => &[][..],
            Some(Value::Array(companions)) => companions.as_slice(),
            Some(_) => return Err(self.malformed("expected an array of companions")),
        };
        if !values.is_empty() && !companions.is_empty() && values.len() != companions.len() {
            return Err(self.malformed(format!(
                "{} values but {} companions",
                values.len(),
                companions.len()
            )));
        }

        for index in 0..values.len().max(companions.len()) {
            let value = values.get(index).filter(|v| !v.is_null());
            let companion = companions.get(index).filter(|v| !v.is_null());
            self.path.push_index(index);
            let mut item = JsonItem {
                walker: self,
                value,
                companion,
            };
            let result = slot.decode_item(variant, &mut item);
            result.map_err(|err| err.at(&self.path.to_string()))?;
            self.path.pop();
        }
        Ok(())
    }

    fn companion(&mut self, value: &Value) -> std::result::Result<Companion, Error> {
        let object = value
            .as_object()
            .ok_or_else(|| self.malformed("expected an object for the primitive companion"))?;

        let mut companion = Companion::default();
        for (key, value) in object {
            match key.as_str() {
                "id" => {
                    let id = value
                        .as_str()
                        .ok_or_else(|| self.malformed("companion id must be a string"))?;
                    companion.id = Some(id.to_string());
                }
                "extension" => {
                    let items = value
                        .as_array()
                        .ok_or_else(|| self.malformed("companion extension must be an array"))?;
                    for (index, item) in items.iter().enumerate() {
                        self.path.push_field("extension");
                        self.path.push_index(index);
                        let object = item
                            .as_object()
                            .ok_or_else(|| self.malformed("expected an extension object"))?;
                        let mut extension = Extension::default();
                        self.object(object, &mut extension)?;
                        companion.extension.push(extension);
                        self.path.pop();
                        self.path.pop();
                    }
                }
                other => self.unknown(other)?,
            }
        }
        Ok(companion)
    }

    fn unknown(&self, name: &str) -> std::result::Result<(), Error> {
        match self.options.unknown_fields {
            UnknownFields::Reject => Err(Error::UnknownField {
                path: self.path.to_string(),
                name: name.to_string(),
            }),
            UnknownFields::Ignore => {
                tracing::trace!(field = name, path = %self.path, "ignoring unknown JSON property");
                Ok(())
            }
        }
    }
}

/// One JSON value (and companion) offered to the model.
struct JsonItem<'w, 'a, 'v> {
    walker: &'w mut Walker<'a>,
    value: Option<&'v Value>,
    companion: Option<&'v Value>,
}

impl<'v> JsonItem<'_, '_, 'v> {
    fn reject_companion(&self) -> std::result::Result<(), Error> {
        match self.companion {
            Some(_) => Err(Error::malformed("companion given for a non-primitive value")),
            None => Ok(()),
        }
    }

    fn require_value(&self) -> std::result::Result<&'v Value, Error> {
        self.value.ok_or_else(|| Error::malformed("missing value"))
    }
}

impl ItemDecoder for JsonItem<'_, '_, '_> {
    fn primitive(
        &mut self,
        ty: PrimitiveType,
    ) -> std::result::Result<(Option<ScalarValue>, Option<Companion>), Error> {
        let value = self.value.map(|v| scalar(ty, v)).transpose()?;
        let companion = match self.companion {
            Some(c) => Some(self.walker.companion(c)?),
            None => None,
        };
        Ok((value, companion))
    }

    fn complex(&mut self, target: &mut dyn Complex) -> std::result::Result<(), Error> {
        self.reject_companion()?;
        let object = self
            .require_value()?
            .as_object()
            .ok_or_else(|| Error::malformed("expected a JSON object"))?;
        self.walker.object(object, target)
    }

    fn resource(&mut self) -> std::result::Result<Resource, Error> {
        self.reject_companion()?;
        let value = self.require_value()?;
        self.walker.resource(value)
    }

    fn text(&mut self) -> std::result::Result<String, Error> {
        self.reject_companion()?;
        self.require_value()?
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| Error::malformed("expected a JSON string"))
    }
}

fn scalar(ty: PrimitiveType, value: &Value) -> std::result::Result<ScalarValue, Error> {
    let mismatch = || Error::malformed(format!("expected a {ty:?} value, found {value}"));
    match ty {
        PrimitiveType::Boolean => value.as_bool().map(ScalarValue::Boolean).ok_or_else(mismatch),
        PrimitiveType::Integer => value.as_i64().map(ScalarValue::Integer).ok_or_else(mismatch),
        PrimitiveType::Decimal => match value {
            Value::Number(number) => Ok(ScalarValue::Decimal(Decimal::parse(&number.to_string())?)),
            // some producers quote decimals to protect their precision
            Value::String(text) => Ok(ScalarValue::Decimal(Decimal::parse(text)?)),
            _ => Err(mismatch()),
        },
        PrimitiveType::String => value
            .as_str()
            .map(|s| ScalarValue::String(s.to_string()))
            .ok_or_else(mismatch),
    }
}

