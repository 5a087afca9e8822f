//! Built-in FHIR types
//!
//! Datatypes, backbone elements and the resources the registry knows about.

pub mod bundle;
pub mod complex;
pub mod error;
pub mod observation;
pub mod organization;
pub mod parameters;
pub mod patient;
pub mod practitioner;

// Re-export commonly used types
pub use bundle::*;
pub use complex::*;
pub use error::{Error, Result};
pub use observation::*;
pub use organization::*;
pub use parameters::*;
pub use patient::*;
pub use practitioner::*;

use crate::catalog::TypeInfo;

/// Catalog entries of every built-in type.
pub(crate) fn catalog_entries() -> Vec<&'static TypeInfo> {
    vec![
        // datatypes
        Extension::catalog_entry(),
        Coding::catalog_entry(),
        CodeableConcept::catalog_entry(),
        Quantity::catalog_entry(),
        Range::catalog_entry(),
        Period::catalog_entry(),
        HumanName::catalog_entry(),
        Identifier::catalog_entry(),
        Reference::catalog_entry(),
        ContactPoint::catalog_entry(),
        Address::catalog_entry(),
        Meta::catalog_entry(),
        Narrative::catalog_entry(),
        Annotation::catalog_entry(),
        // resources and their backbones
        Bundle::catalog_entry(),
        BundleLink::catalog_entry(),
        BundleEntry::catalog_entry(),
        BundleEntrySearch::catalog_entry(),
        BundleEntryRequest::catalog_entry(),
        BundleEntryResponse::catalog_entry(),
        Observation::catalog_entry(),
        ObservationReferenceRange::catalog_entry(),
        ObservationComponent::catalog_entry(),
        Organization::catalog_entry(),
        OrganizationContact::catalog_entry(),
        Parameters::catalog_entry(),
        ParametersParameter::catalog_entry(),
        Patient::catalog_entry(),
        PatientContact::catalog_entry(),
        PatientCommunication::catalog_entry(),
        PatientLink::catalog_entry(),
        Practitioner::catalog_entry(),
        PractitionerQualification::catalog_entry(),
    ]
}
