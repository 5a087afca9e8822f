//! FHIR Organization model

use crate::common::complex::{
    Address, CodeableConcept, ContactPoint, Extension, HumanName, Identifier, Meta, Narrative,
    Reference,
};
use crate::fhir_type;
use crate::primitive::Primitive;
use crate::registry::Resource;

fhir_type! {
    /// A formally or informally recognized grouping of people or organizations.
    resource Organization {
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
        type_: Vec<CodeableConcept> => "type",
        name: Primitive<String> => "name",
        alias: Vec<Primitive<String>> => "alias",
        telecom: Vec<ContactPoint> => "telecom",
        address: Vec<Address> => "address",
        part_of: Option<Reference> => "partOf",
        contact: Vec<OrganizationContact> => "contact",
    }
}

fhir_type! {
    /// Contact for the organization for a certain purpose
    backbone OrganizationContact {
        id: Option<String> => "id",
        extension: Vec<Extension> => "extension",
        modifier_extension: Vec<Extension> => "modifierExtension",
        purpose: Option<CodeableConcept> => "purpose",
        name: Option<HumanName> => "name",
        telecom: Vec<ContactPoint> => "telecom",
        address: Option<Address> => "address",
    }
}

impl Organization {
    pub fn named(id: &str, name: &str) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Default::default()
        }
    }
}
