//! FHIR Practitioner model

use crate::common::complex::{
    Address, CodeableConcept, ContactPoint, Extension, HumanName, Identifier, Meta, Narrative,
    Period, Reference,
};
use crate::fhir_type;
use crate::primitive::Primitive;
use crate::registry::Resource;

fhir_type! {
    /// A person with a formal responsibility in the provisioning of healthcare
    /// or related services.
    resource Practitioner {
        id: Primitive<String> => "id",
        meta: Option<Meta> => "meta",
        implicit_rules: Primitive<String> => "implicitRules",
        language: Primitive<String> => "language",
        text: Option<Narrative> => "text",
        contained: Vec<Resource> => "contained",
        extension: Vec<Extension> => "extension",
        modifier_extension: Vec<Extension> => "modifierExtension",
        identifier: Vec<Identifier> => "identifier",
        active: Primitive<bool> => "active",
        name: Vec<HumanName> => "name",
        telecom: Vec<ContactPoint> => "telecom",
        address: Vec<Address> => "address",
        gender: Primitive<String> => "gender",
        birth_date: Primitive<String> => "birthDate",
        qualification: Vec<PractitionerQualification> => "qualification",
        communication: Vec<CodeableConcept> => "communication",
    }
}

fhir_type! {
    /// Certification, licenses, or training pertaining to the provision of care
    backbone PractitionerQualification {
        id: Option<String> => "id",
        extension: Vec<Extension> => "extension",
        modifier_extension: Vec<Extension> => "modifierExtension",
        identifier: Vec<Identifier> => "identifier",
        code: Option<CodeableConcept> => "code",
        period: Option<Period> => "period",
        issuer: Option<Reference> => "issuer",
    }
}
