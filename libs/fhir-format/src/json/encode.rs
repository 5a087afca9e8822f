//! Model to JSON.
//!
//! Builds a `serde_json::Value` whose object keys are inserted in catalog
//! order (`preserve_order`), then serializes it. Decimals go through
//! `arbitrary_precision` numbers so their text is written unchanged.

use crate::error::Result;
use crate::options::JsonIndent;
use fhirwire_models::{Companion, Complex, ItemRef, Resource, Scalar};
use serde::Serialize;
use serde_json::{Map, Number, Value};

pub(crate) fn resource_value(resource: &Resource) -> Result<Value> {
    let mut object = Map::new();
    object.insert(
        "resourceType".to_string(),
        Value::String(resource.resource_type().to_string()),
    );
    write_fields(resource.as_complex(), &mut object)?;
    Ok(Value::Object(object))
}

pub(crate) fn complex_value(value: &dyn Complex) -> Result<Value> {
    let mut object = Map::new();
    write_fields(value, &mut object)?;
    Ok(Value::Object(object))
}

pub(crate) fn to_pretty_vec(value: &Value, indent: &JsonIndent) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.indent.as_bytes());
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut serializer)?;
    if indent.prefix.is_empty() {
        return Ok(out);
    }

    // Raw newlines only occur between tokens; string contents are escaped.
    let prefix = indent.prefix.as_bytes();
    let lines = out.iter().filter(|&&b| b == b'\n').count() + 1;
    let mut prefixed = Vec::with_capacity(out.len() + prefix.len() * lines);
    prefixed.extend_from_slice(prefix);
    for byte in out {
        prefixed.push(byte);
        if byte == b'\n' {
            prefixed.extend_from_slice(prefix);
        }
    }
    Ok(prefixed)
}

fn write_fields(value: &dyn Complex, object: &mut Map<String, Value>) -> Result<()> {
    for field in value.type_info().fields {
        let Some(slot) = value.field(field.name) else {
            continue;
        };
        let items = slot.items();
        if items.is_empty() {
            continue;
        }

        let name = field.wire_name(slot.variant());
        if field.repeated {
            write_array(object, &name, items)?;
        } else {
            for item in items {
                write_single(object, &name, item)?;
            }
        }
    }
    Ok(())
}

fn write_single(object: &mut Map<String, Value>, name: &str, item: ItemRef<'_>) -> Result<()> {
    match item {
        ItemRef::Primitive { value, companion } => {
            let json = match value {
                Some(scalar) => scalar_value(scalar)?,
                None => Value::Null,
            };
            object.insert(name.to_string(), json);
            if let Some(companion) = companion {
                object.insert(format!("_{name}"), companion_value(companion)?);
            }
        }
        other => {
            object.insert(name.to_string(), item_value(other)?);
        }
    }
    Ok(())
}

/// Repeated primitives become two parallel arrays; missing halves are `null`.
fn write_array(object: &mut Map<String, Value>, name: &str, items: Vec<ItemRef<'_>>) -> Result<()> {
    if !items
        .iter()
        .all(|item| matches!(item, ItemRef::Primitive { .. }))
    {
        let values = items
            .into_iter()
            .map(item_value)
            .collect::<Result<Vec<_>>>()?;
        object.insert(name.to_string(), Value::Array(values));
        return Ok(());
    }

    let mut values = Vec::with_capacity(items.len());
    let mut companions = Vec::with_capacity(items.len());
    let mut any_companion = false;
    for item in items {
        if let ItemRef::Primitive { value, companion } = item {
            values.push(match value {
                Some(scalar) => scalar_value(scalar)?,
                None => Value::Null,
            });
            companions.push(match companion {
                Some(companion) => {
                    any_companion = true;
                    companion_value(companion)?
                }
                None => Value::Null,
            });
        }
    }

    object.insert(name.to_string(), Value::Array(values));
    if any_companion {
        object.insert(format!("_{name}"), Value::Array(companions));
    }
    Ok(())
}

fn item_value(item: ItemRef<'_>) -> Result<Value> {
    Ok(match item {
        ItemRef::Attribute(text) | ItemRef::Xhtml(text) => Value::String(text.to_string()),
        ItemRef::Primitive { value, .. } => match value {
            Some(scalar) => scalar_value(scalar)?,
            None => Value::Null,
        },
        ItemRef::Complex(complex) => complex_value(complex)?,
        ItemRef::Resource(resource) => resource_value(resource)?,
    })
}

fn companion_value(companion: &Companion) -> Result<Value> {
    let mut object = Map::new();
    if let Some(id) = &companion.id {
        object.insert("id".to_string(), Value::String(id.clone()));
    }
    if !companion.extension.is_empty() {
        let extensions = companion
            .extension
            .iter()
            .map(|ext| complex_value(ext))
            .collect::<Result<Vec<_>>>()?;
        object.insert("extension".to_string(), Value::Array(extensions));
    }
    Ok(Value::Object(object))
}

fn scalar_value(scalar: Scalar<'_>) -> Result<Value> {
    Ok(match scalar {
        Scalar::Boolean(b) => Value::Bool(b),
        Scalar::Integer(i) => Value::Number(i.into()),
        Scalar::Decimal(d) => Value::Number(serde_json::from_str::<Number>(d.as_str())?),
        Scalar::String(s) => Value::String(s.to_string()),
    })
}
