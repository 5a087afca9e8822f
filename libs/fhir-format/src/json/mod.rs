//! FHIR JSON encoding and decoding.
//!
//! Output follows the official JSON representation:
//! - `resourceType` comes first, then fields in element order.
//! - Primitive metadata (`id`, `extension`) is carried in `_field` entries
//!   written right after the value.
//! - Repeated primitives use aligned arrays with `null` placeholders.
//! - Decimals keep their exact text.
//! - `<`, `>` and `&` are never escaped.

mod decode;
mod encode;

pub use decode::JsonDecoder;

use crate::error::Result;
use crate::options::JsonIndent;
use fhirwire_models::{registry, Complex, Resource};
use serde_json::Value;

/// Compact JSON bytes.
pub fn to_json_vec(resource: &Resource) -> Result<Vec<u8>> {
    tracing::debug!(
        resource_type = resource.resource_type(),
        format = "json",
        "encoding resource"
    );
    let value = encode::resource_value(resource)?;
    Ok(serde_json::to_vec(&value)?)
}

pub fn to_json_string(resource: &Resource) -> Result<String> {
    let value = encode::resource_value(resource)?;
    Ok(serde_json::to_string(&value)?)
}

/// Pretty-printed JSON with two-space indentation.
pub fn to_json_string_pretty(resource: &Resource) -> Result<String> {
    to_json_string_indent(resource, &JsonIndent::default())
}

pub fn to_json_string_indent(resource: &Resource, indent: &JsonIndent) -> Result<String> {
    let value = encode::resource_value(resource)?;
    let bytes = encode::to_pretty_vec(&value, indent)?;
    String::from_utf8(bytes).map_err(|err| err.utf8_error().into())
}

/// The resource as a JSON tree, keys in output order.
pub fn to_json_value(resource: &Resource) -> Result<Value> {
    encode::resource_value(resource)
}

/// A datatype or backbone element as a JSON tree.
pub fn complex_to_json_value(value: &dyn Complex) -> Result<Value> {
    encode::complex_value(value)
}

/// Decodes with the builtin registry and default options.
pub fn from_json_slice(bytes: &[u8]) -> Result<Resource> {
    JsonDecoder::new(registry()).decode_slice(bytes)
}

pub fn from_json_str(text: &str) -> Result<Resource> {
    JsonDecoder::new(registry()).decode_str(text)
}

pub fn from_json_value(value: &Value) -> Result<Resource> {
    JsonDecoder::new(registry()).decode_value(value)
}

/// Decodes a standalone datatype or backbone element.
pub fn complex_from_json_str<T: Complex + Default>(text: &str) -> Result<T> {
    let value: Value = serde_json::from_str(text)?;
    JsonDecoder::new(registry()).decode_complex(&value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fhirwire_models::{Patient, Primitive};

    #[test]
    fn resource_type_first() {
        let patient = Patient {
            id: "p1".into(),
            active: Primitive::new(true),
            ..Default::default()
        };
        let json = to_json_string(&patient.into()).unwrap();
        assert_eq!(json, r#"{"resourceType":"Patient","id":"p1","active":true}"#);
    }

    #[test]
    fn pretty_output_indents() {
        let json = to_json_string_pretty(&Patient::with_id("p1").into()).unwrap();
        assert_eq!(json, "{\n  \"resourceType\": \"Patient\",\n  \"id\": \"p1\"\n}");
    }

    #[test]
    fn prefix_starts_every_line() {
        let patient = Patient {
            id: "p1".into(),
            active: Primitive::new(true),
            ..Default::default()
        };
        let json = to_json_string_indent(&patient.into(), &JsonIndent::new("> ", "\t")).unwrap();
        assert_eq!(
            json,
            "> {\n> \t\"resourceType\": \"Patient\",\n> \t\"id\": \"p1\",\n> \t\"active\": true\n> }"
        );
    }

    #[test]
    fn prefix_leaves_escaped_newlines_alone() {
        let patient = Patient {
            id: "p1".into(),
            gender: "a\nb".into(),
            ..Default::default()
        };
        let json = to_json_string_indent(&patient.into(), &JsonIndent::new("#", " ")).unwrap();
        assert!(json.contains(r#"# "gender": "a\nb""#), "{json}");
        assert_eq!(json.lines().count(), 5);
        assert!(json.lines().all(|line| line.starts_with('#')));
    }
}
