use fhirwire_format::{from_json_str, from_xml_str, to_json_string, to_xml_string};
use fhirwire_models::{Decimal, HumanName, Observation, ObservationValue, Patient, Quantity, Resource};
use quickcheck::{QuickCheck, TestResult};

/// Characters XML 1.0 can carry, escaped or not.
fn xml_safe(text: &str) -> bool {
    text.chars().all(|c| {
        matches!(c, '\t' | '\n' | '\r')
            || ('\u{20}'..='\u{d7ff}').contains(&c)
            || ('\u{e000}'..='\u{fffd}').contains(&c)
            || c >= '\u{10000}'
    })
}

fn patient_named(text: String, given: Vec<String>) -> Resource {
    Patient {
        name: vec![HumanName {
            text: text.into(),
            given: given.into_iter().map(Into::into).collect(),
            ..Default::default()
        }],
        ..Default::default()
    }
    .into()
}

/// Property: strings survive both wire formats unchanged
#[test]
fn prop_strings_round_trip() {
    fn prop(text: String, given: Vec<String>) -> TestResult {
        if !xml_safe(&text) || !given.iter().all(|g| xml_safe(g)) {
            return TestResult::discard();
        }
        let resource = patient_named(text, given);

        let json = match to_json_string(&resource) {
            Ok(json) => json,
            Err(_) => return TestResult::failed(),
        };
        let xml = match to_xml_string(&resource) {
            Ok(xml) => xml,
            Err(_) => return TestResult::failed(),
        };

        let from_json = from_json_str(&json).ok();
        let from_xml = from_xml_str(&xml).ok();
        TestResult::from_bool(
            from_json.as_ref() == Some(&resource) && from_xml.as_ref() == Some(&resource),
        )
    }

    QuickCheck::new()
        .tests(300)
        .quickcheck(prop as fn(String, Vec<String>) -> TestResult);
}

/// Property: decimal text is written back exactly as read
#[test]
fn prop_decimal_text_survives_codecs() {
    fn prop(int: i32, frac: u16, tail: Vec<u8>, zeros: u8) -> TestResult {
        // Tails push literals well past 28 significant digits.
        let tail: String = tail.iter().map(|d| char::from(b'0' + d % 10)).collect();
        let text = format!(
            "{}.{}{}{}",
            int,
            frac,
            tail,
            "0".repeat(usize::from(zeros % 5))
        );
        let decimal = match Decimal::parse(&text) {
            Ok(decimal) => decimal,
            Err(_) => return TestResult::failed(),
        };
        let resource: Resource = Observation {
            value: Some(ObservationValue::Quantity(Quantity {
                value: decimal.into(),
                ..Default::default()
            })),
            ..Default::default()
        }
        .into();

        let json = to_json_string(&resource).unwrap_or_default();
        let xml = to_xml_string(&resource).unwrap_or_default();
        let expected_json = format!(
            r#"{{"resourceType":"Observation","valueQuantity":{{"value":{}}}}}"#,
            text
        );
        let expected_attr = format!(r#"<value value="{}"/>"#, text);

        let text_of = |resource: Option<Resource>| -> Option<String> {
            let obs = Observation::try_from(resource?).ok()?;
            match obs.value? {
                ObservationValue::Quantity(q) => q.value.get().map(|d| d.as_str().to_string()),
                _ => None,
            }
        };
        TestResult::from_bool(
            json == expected_json
                && xml.contains(&expected_attr)
                && text_of(from_json_str(&json).ok()).as_deref() == Some(text.as_str())
                && text_of(from_xml_str(&xml).ok()).as_deref() == Some(text.as_str()),
        )
    }

    QuickCheck::new()
        .tests(300)
        .quickcheck(prop as fn(i32, u16, Vec<u8>, u8) -> TestResult);
}
