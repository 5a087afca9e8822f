//! FHIR Observation model

use crate::common::complex::{
    Annotation, CodeableConcept, Extension, Identifier, Meta, Narrative, Period, Quantity, Range,
    Reference,
};
use crate::primitive::Primitive;
use crate::registry::Resource;
use crate::{fhir_choice, fhir_type};

fhir_type! {
    /// Measurements and simple assertions made about a patient, device or other subject.
    resource Observation {
        id: Primitive<String> => "id",
        meta: Option<Meta> => "meta",
        implicit_rules: Primitive<String> => "implicitRules",
        language: Primitive<String> => "language",
        text: Option<Narrative> => "text",
        contained: Vec<Resource> => "contained",
        extension: Vec<Extension> => "extension",
        modifier_extension: Vec<Extension> => "modifierExtension",
        identifier: Vec<Identifier> => "identifier",
        based_on: Vec<Reference> => "basedOn",
        part_of: Vec<Reference> => "partOf",
        /// registered | preliminary | final | amended +
        status: Primitive<String> => "status",
        category: Vec<CodeableConcept> => "category",
        code: Option<CodeableConcept> => "code",
        subject: Option<Reference> => "subject",
        focus: Vec<Reference> => "focus",
        encounter: Option<Reference> => "encounter",
        effective: Option<ObservationEffective> => "effective",
        issued: Primitive<String> => "issued",
        performer: Vec<Reference> => "performer",
        value: Option<ObservationValue> => "value",
        data_absent_reason: Option<CodeableConcept> => "dataAbsentReason",
        interpretation: Vec<CodeableConcept> => "interpretation",
        note: Vec<Annotation> => "note",
        body_site: Option<CodeableConcept> => "bodySite",
        method: Option<CodeableConcept> => "method",
        specimen: Option<Reference> => "specimen",
        device: Option<Reference> => "device",
        reference_range: Vec<ObservationReferenceRange> => "referenceRange",
        has_member: Vec<Reference> => "hasMember",
        derived_from: Vec<Reference> => "derivedFrom",
        component: Vec<ObservationComponent> => "component",
    }
}

fhir_choice! {
    /// Clinically relevant time/time-period for observation
    ObservationEffective {
        DateTime(Primitive<String>),
        Period(Period),
        Instant(Primitive<String>),
    }
}

fhir_choice! {
    /// Actual result
    ObservationValue {
        Quantity(Quantity),
        CodeableConcept(CodeableConcept),
        String(Primitive<String>),
        Boolean(Primitive<bool>),
        Integer(Primitive<i32>),
        Range(Range),
        Period(Period),
        DateTime(Primitive<String>),
        Time(Primitive<String>),
    }
}

fhir_type! {
    /// Provides guide for interpretation
    backbone ObservationReferenceRange {
        id: Option<String> => "id",
        extension: Vec<Extension> => "extension",
        modifier_extension: Vec<Extension> => "modifierExtension",
        low: Option<Quantity> => "low",
        high: Option<Quantity> => "high",
        type_: Option<CodeableConcept> => "type",
        applies_to: Vec<CodeableConcept> => "appliesTo",
        age: Option<Range> => "age",
        text: Primitive<String> => "text",
    }
}

fhir_type! {
    /// Component results
    backbone ObservationComponent {
        id: Option<String> => "id",
        extension: Vec<Extension> => "extension",
        modifier_extension: Vec<Extension> => "modifierExtension",
        code: Option<CodeableConcept> => "code",
        value: Option<ObservationValue> => "value",
        data_absent_reason: Option<CodeableConcept> => "dataAbsentReason",
        interpretation: Vec<CodeableConcept> => "interpretation",
        reference_range: Vec<ObservationReferenceRange> => "referenceRange",
    }
}
