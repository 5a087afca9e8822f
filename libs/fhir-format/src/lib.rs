//! FHIR JSON and XML wire formats.
//!
//! Both codecs are driven by the type catalog in `fhirwire-models`: field
//! order, wire names, choice suffixes and XML attribute placement all come
//! from there, so any type declared in the model encodes without extra code.
//!
//! ```rust
//! use fhirwire_format::{decode_json, encode_xml};
//!
//! let json = br#"{"resourceType":"Patient","id":"123","birthDate":"1974-12-25"}"#;
//! let resource = decode_json(json).unwrap();
//! let xml = String::from_utf8(encode_xml(&resource).unwrap()).unwrap();
//! assert!(xml.contains(r#"<birthDate value="1974-12-25"/>"#));
//! ```

pub mod error;
pub mod json;
pub mod options;
mod path;
pub mod xml;

pub use error::{FormatError, Result};
pub use json::{
    complex_from_json_str, complex_to_json_value, from_json_slice, from_json_str,
    from_json_value, to_json_string, to_json_string_indent, to_json_string_pretty, to_json_value,
    to_json_vec, JsonDecoder,
};
pub use options::{DecodeOptions, JsonIndent, UnknownFields, XmlIndent};
pub use xml::{
    from_xml_slice, from_xml_str, to_xml_string, to_xml_string_indent, to_xml_vec,
    to_xml_vec_indent, XmlDecoder,
};

use fhirwire_models::Resource;

/// Compact FHIR JSON.
pub fn encode_json(resource: &Resource) -> Result<Vec<u8>> {
    to_json_vec(resource)
}

/// Indented FHIR JSON; `prefix` starts every line, `indent` is repeated per level.
pub fn encode_json_indent(resource: &Resource, prefix: &str, indent: &str) -> Result<Vec<u8>> {
    let text = to_json_string_indent(resource, &JsonIndent::new(prefix, indent))?;
    Ok(text.into_bytes())
}

/// Decodes FHIR JSON using the builtin registry.
pub fn decode_json(bytes: &[u8]) -> Result<Resource> {
    from_json_slice(bytes)
}

/// Compact FHIR XML with declaration.
pub fn encode_xml(resource: &Resource) -> Result<Vec<u8>> {
    to_xml_vec(resource)
}

/// Indented FHIR XML; `prefix` starts every line, `indent` is repeated per level.
pub fn encode_xml_indent(resource: &Resource, prefix: &str, indent: &str) -> Result<Vec<u8>> {
    to_xml_vec_indent(resource, &XmlIndent::new(prefix, indent))
}

/// Decodes FHIR XML using the builtin registry.
pub fn decode_xml(bytes: &[u8]) -> Result<Resource> {
    from_xml_slice(bytes)
}

/// Convert a FHIR JSON payload into its XML representation.
pub fn json_to_xml(input: &str) -> Result<String> {
    let resource = from_json_str(input)?;
    to_xml_string_indent(&resource, &XmlIndent::default())
}

/// Convert a FHIR XML payload into its JSON representation.
pub fn xml_to_json(input: &str) -> Result<String> {
    let resource = from_xml_str(input)?;
    to_json_string_pretty(&resource)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn json_to_xml_basic_patient() {
        let json = r#"
        {
            "resourceType": "Patient",
            "id": "pat-1",
            "active": true,
            "name": [
                { "family": "Everyman", "given": ["Adam"] }
            ]
        }
        "#;

        let xml = json_to_xml(json).expect("conversion failed");
        assert!(xml.contains("<Patient"));
        assert!(xml.contains(r#"<id value="pat-1"/>"#));
        assert!(xml.contains(r#"<active value="true"/>"#));
        assert!(xml.contains(r#"<family value="Everyman"/>"#));
    }

    #[test]
    fn xml_to_json_round_trip() {
        let xml = r#"
        <Patient xmlns="http://hl7.org/fhir">
            <id value="p1"/>
            <active value="true"/>
            <name>
                <family value="Everyman"/>
                <given value="Adam"/>
            </name>
        </Patient>
        "#;

        let json = xml_to_json(xml).expect("xml->json failed");
        let value: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["resourceType"], "Patient");
        assert_eq!(value["id"], "p1");
        assert_eq!(value["active"], true);
        assert_eq!(value["name"][0]["family"], "Everyman");
        assert_eq!(value["name"][0]["given"][0], "Adam");
    }

    #[test]
    fn primitive_metadata_survives_roundtrip() {
        let json = r#"
        {
            "resourceType": "Patient",
            "birthDate": "1974-12-25",
            "_birthDate": { "id": "bd1" }
        }
        "#;

        let xml = json_to_xml(json).unwrap();
        assert!(xml.contains(r#"<birthDate id="bd1" value="1974-12-25"></birthDate>"#));

        let back = xml_to_json(&xml).unwrap();
        let val: Value = serde_json::from_str(&back).unwrap();
        assert_eq!(val["birthDate"], "1974-12-25");
        assert_eq!(val["_birthDate"]["id"], "bd1");
    }
}
