use fhirwire_format::{
    json_to_xml, xml_to_json, DecodeOptions, JsonDecoder, XmlDecoder, XmlIndent,
};
use fhirwire_models::{registry, Resource};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

/// Helper to normalize JSON for comparison (ignoring formatting/whitespace differences)
fn normalize_json(json_str: &str) -> Value {
    serde_json::from_str(json_str).expect("Failed to parse JSON")
}

/// Helper to get test data directory
fn test_data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
}

/// Discover all test file base names (without extension) that exist in both formats
fn discover_test_cases() -> Vec<String> {
    let data_dir = test_data_dir();
    let mut test_cases = std::collections::HashSet::new();

    if let Ok(entries) = fs::read_dir(&data_dir) {
        for entry in entries.flatten() {
            if let Some(file_name) = entry.file_name().to_str() {
                if let Some(stem) = file_name.strip_suffix(".json") {
                    let xml_path = data_dir.join(format!("{}.xml", stem));
                    if xml_path.exists() {
                        test_cases.insert(stem.to_string());
                    }
                }
            }
        }
    }

    let mut cases: Vec<_> = test_cases.into_iter().collect();
    cases.sort();
    cases
}

/// Helper to load test files
fn load_test_files(base_name: &str) -> (String, String) {
    let json_path = test_data_dir().join(format!("{}.json", base_name));
    let xml_path = test_data_dir().join(format!("{}.xml", base_name));

    let json = fs::read_to_string(&json_path)
        .unwrap_or_else(|_| panic!("Failed to read {}", json_path.display()));
    let xml = fs::read_to_string(&xml_path)
        .unwrap_or_else(|_| panic!("Failed to read {}", xml_path.display()));

    (json, xml)
}

fn decode_both(base_name: &str) -> (Resource, Resource) {
    let (json, xml) = load_test_files(base_name);
    let from_json = JsonDecoder::new(registry())
        .with_options(DecodeOptions::strict())
        .decode_str(&json)
        .unwrap_or_else(|e| panic!("{}: JSON decode failed: {}", base_name, e));
    let from_xml = XmlDecoder::new(registry())
        .with_options(DecodeOptions::strict())
        .decode_str(&xml)
        .unwrap_or_else(|e| panic!("{}: XML decode failed: {}", base_name, e));
    (from_json, from_xml)
}

// ============================================================================
// Test Discovery
// ============================================================================

#[test]
fn test_data_files_exist() {
    let test_cases = discover_test_cases();
    assert!(
        test_cases.len() >= 4,
        "Expected fixture pairs in {}, found {:?}",
        test_data_dir().display(),
        test_cases
    );
}

// ============================================================================
// Both representations describe the same resource
// ============================================================================

#[test]
fn test_all_json_and_xml_decode_to_same_model() {
    for base_name in discover_test_cases() {
        let (from_json, from_xml) = decode_both(&base_name);
        assert_eq!(from_json, from_xml, "{}: models differ", base_name);
    }
}

#[test]
fn test_all_json_produces_valid_xml() {
    for base_name in discover_test_cases() {
        let (json, _xml) = load_test_files(&base_name);
        let result_xml = json_to_xml(&json)
            .unwrap_or_else(|e| panic!("{}: JSON to XML conversion failed: {}", base_name, e));

        let doc = roxmltree::Document::parse(&result_xml)
            .unwrap_or_else(|e| panic!("{}: Generated XML is not valid: {}", base_name, e));
        assert_eq!(
            doc.root_element().tag_name().namespace(),
            Some("http://hl7.org/fhir"),
            "{}: root namespace",
            base_name
        );
    }
}

// ============================================================================
// Round-trip Tests
// ============================================================================

#[test]
fn test_all_round_trip_json_model_json() {
    for base_name in discover_test_cases() {
        let (json, _xml) = load_test_files(&base_name);
        let resource = fhirwire_format::from_json_str(&json).unwrap();
        let encoded = fhirwire_format::to_json_string(&resource).unwrap();

        assert_eq!(
            normalize_json(&json),
            normalize_json(&encoded),
            "{}: JSON changed on round trip",
            base_name
        );
    }
}

#[test]
fn test_all_round_trip_json_xml_json() {
    for base_name in discover_test_cases() {
        let (json, _xml) = load_test_files(&base_name);

        let xml = json_to_xml(&json)
            .unwrap_or_else(|e| panic!("{}: JSON to XML conversion failed: {}", base_name, e));
        let result_json = xml_to_json(&xml)
            .unwrap_or_else(|e| panic!("{}: XML to JSON conversion failed: {}", base_name, e));

        assert_eq!(
            normalize_json(&json),
            normalize_json(&result_json),
            "{}: JSON changed after passing through XML",
            base_name
        );
    }
}

#[test]
fn test_all_round_trip_xml_model_xml() {
    for base_name in discover_test_cases() {
        let (_json, xml) = load_test_files(&base_name);
        let resource = fhirwire_format::from_xml_str(&xml).unwrap();
        let encoded =
            fhirwire_format::to_xml_string_indent(&resource, &XmlIndent::default()).unwrap();

        assert_eq!(
            xml.trim_end(),
            encoded,
            "{}: XML changed on round trip",
            base_name
        );
    }
}

// ============================================================================
// Specific Feature Tests
// ============================================================================

#[test]
fn test_all_preserve_primitive_companions() {
    let mut tested_count = 0;

    for base_name in discover_test_cases() {
        let (json, _xml) = load_test_files(&base_name);
        let original = normalize_json(&json);

        let has_companions = original
            .as_object()
            .map(|obj| obj.keys().any(|k| k.starts_with('_')))
            .unwrap_or(false);
        if !has_companions {
            continue;
        }
        tested_count += 1;

        let xml = json_to_xml(&json).unwrap();
        assert!(
            xml.contains("<extension"),
            "{}: XML should contain extension elements",
            base_name
        );

        let round_trip = normalize_json(&xml_to_json(&xml).unwrap());
        for key in original.as_object().unwrap().keys() {
            if key.starts_with('_') {
                assert_eq!(
                    original[key], round_trip[key],
                    "{}: {} should survive round-trip",
                    base_name, key
                );
            }
        }
    }

    assert!(tested_count > 0, "No test cases with companions were found");
}

#[test]
fn test_all_preserve_contained_resources() {
    let mut tested_count = 0;

    for base_name in discover_test_cases() {
        let (json, _xml) = load_test_files(&base_name);
        if normalize_json(&json).get("contained").is_none() {
            continue;
        }
        tested_count += 1;

        let xml = json_to_xml(&json).unwrap();
        assert!(
            xml.contains("<contained>"),
            "{}: XML should contain contained elements",
            base_name
        );
    }

    assert!(tested_count > 0, "No test cases with contained resources were found");
}
