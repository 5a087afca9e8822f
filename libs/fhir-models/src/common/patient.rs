//! FHIR Patient model

use crate::common::complex::{
    Address, CodeableConcept, ContactPoint, Extension, HumanName, Identifier, Meta, Narrative,
    Period, Reference,
};
use crate::primitive::Primitive;
use crate::registry::Resource;
use crate::{fhir_choice, fhir_type};

fhir_type! {
    /// Demographics and other administrative information about an individual
    /// receiving care or other health-related services.
    resource Patient {
        id: Primitive<String> => "id",
        meta: Option<Meta> => "meta",
        implicit_rules: Primitive<String> => "implicitRules",
        language: Primitive<String> => "language",
        text: Option<Narrative> => "text",
        contained: Vec<Resource> => "contained",
        extension: Vec<Extension> => "extension",
        modifier_extension: Vec<Extension> => "modifierExtension",
        identifier: Vec<Identifier> => "identifier",
        /// Whether this patient's record is in active use
        active: Primitive<bool> => "active",
        name: Vec<HumanName> => "name",
        telecom: Vec<ContactPoint> => "telecom",
        /// male | female | other | unknown
        gender: Primitive<String> => "gender",
        birth_date: Primitive<String> => "birthDate",
        deceased: Option<PatientDeceased> => "deceased",
        address: Vec<Address> => "address",
        marital_status: Option<CodeableConcept> => "maritalStatus",
        multiple_birth: Option<PatientMultipleBirth> => "multipleBirth",
        contact: Vec<PatientContact> => "contact",
        communication: Vec<PatientCommunication> => "communication",
        general_practitioner: Vec<Reference> => "generalPractitioner",
        managing_organization: Option<Reference> => "managingOrganization",
        link: Vec<PatientLink> => "link",
    }
}

fhir_choice! {
    /// Indicates if the individual is deceased or not
    PatientDeceased {
        Boolean(Primitive<bool>),
        DateTime(Primitive<String>),
    }
}

fhir_choice! {
    /// Whether patient is part of a multiple birth
    PatientMultipleBirth {
        Boolean(Primitive<bool>),
        Integer(Primitive<i32>),
    }
}

fhir_type! {
    /// A contact party (e.g. guardian, partner, friend) for the patient
    backbone PatientContact {
        id: Option<String> => "id",
        extension: Vec<Extension> => "extension",
        modifier_extension: Vec<Extension> => "modifierExtension",
        relationship: Vec<CodeableConcept> => "relationship",
        name: Option<HumanName> => "name",
        telecom: Vec<ContactPoint> => "telecom",
        address: Option<Address> => "address",
        gender: Primitive<String> => "gender",
        organization: Option<Reference> => "organization",
        period: Option<Period> => "period",
    }
}

fhir_type! {
    /// A language which may be used to communicate with the patient
    backbone PatientCommunication {
        id: Option<String> => "id",
        extension: Vec<Extension> => "extension",
        modifier_extension: Vec<Extension> => "modifierExtension",
        language: Option<CodeableConcept> => "language",
        preferred: Primitive<bool> => "preferred",
    }
}

fhir_type! {
    /// Link to another patient resource that concerns the same actual person
    backbone PatientLink {
        id: Option<String> => "id",
        extension: Vec<Extension> => "extension",
        modifier_extension: Vec<Extension> => "modifierExtension",
        other: Option<Reference> => "other",
        /// replaced-by | replaces | refer | seealso
        type_: Primitive<String> => "type",
    }
}

impl Patient {
    pub fn with_id(id: &str) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }
}
