//! FHIR XML encoding and decoding.
//!
//! - The root element is named after the resource type and declares the FHIR
//!   namespace; nested elements do not repeat it.
//! - Primitive values are written as `value` attributes; their `id` and
//!   extensions become an `id` attribute and `<extension>` children.
//! - `Element.id` and `Extension.url` are attributes.
//! - `contained` wraps each resource (`<contained><Patient>...`), while
//!   `Bundle.entry.resource` holds the resource element directly.
//! - Narrative `<div>` markup is copied verbatim in both directions.

mod decode;
mod encode;

pub use decode::XmlDecoder;

use crate::error::Result;
use crate::options::XmlIndent;
use fhirwire_models::{registry, Resource};

pub(crate) const FHIR_NS: &str = "http://hl7.org/fhir";
pub(crate) const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Compact XML bytes, declaration included.
pub fn to_xml_vec(resource: &Resource) -> Result<Vec<u8>> {
    tracing::debug!(
        resource_type = resource.resource_type(),
        format = "xml",
        "encoding resource"
    );
    encode::XmlEncoder::new(None).write_document(resource)
}

pub fn to_xml_string(resource: &Resource) -> Result<String> {
    into_string(to_xml_vec(resource)?)
}

/// Indented XML: every element on its own line.
pub fn to_xml_vec_indent(resource: &Resource, indent: &XmlIndent) -> Result<Vec<u8>> {
    encode::XmlEncoder::new(Some(indent)).write_document(resource)
}

pub fn to_xml_string_indent(resource: &Resource, indent: &XmlIndent) -> Result<String> {
    into_string(to_xml_vec_indent(resource, indent)?)
}

fn into_string(bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes).map_err(|err| err.utf8_error().into())
}

/// Decodes with the builtin registry and default options.
pub fn from_xml_slice(bytes: &[u8]) -> Result<Resource> {
    XmlDecoder::new(registry()).decode_slice(bytes)
}

pub fn from_xml_str(text: &str) -> Result<Resource> {
    XmlDecoder::new(registry()).decode_str(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fhirwire_models::{Patient, Primitive};

    #[test]
    fn compact_patient() {
        let patient = Patient {
            id: "123".into(),
            active: Primitive::new(true),
            ..Default::default()
        };
        let xml = to_xml_string(&patient.into()).unwrap();
        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <Patient xmlns=\"http://hl7.org/fhir\"><id value=\"123\"/><active value=\"true\"/></Patient>"
        );
    }

    #[test]
    fn indented_patient() {
        let xml = to_xml_string_indent(&Patient::with_id("123").into(), &XmlIndent::default()).unwrap();
        assert_eq!(
            xml,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <Patient xmlns=\"http://hl7.org/fhir\">\n  <id value=\"123\"/>\n</Patient>"
        );
    }

    #[test]
    fn empty_resource_self_closes() {
        let xml = to_xml_string(&Patient::default().into()).unwrap();
        assert!(xml.ends_with("<Patient xmlns=\"http://hl7.org/fhir\"/>"));
    }
}
