//! FHIR data models
//!
//! This crate provides strongly-typed Rust structures for FHIR resources and
//! the datatypes they are built from, together with the metadata the wire
//! codecs need.
//!
//! # Module Organization
//!
//! - `common`: datatypes, backbone elements and resources
//! - `builder`: fluent construction of any declared type
//! - `catalog`: per-type field metadata in canonical element order
//! - `decimal`: exact-text decimals
//! - `primitive`: primitive values with their id/extension companions
//! - `field`: reflection traits the codecs walk
//! - `registry`: resource-type-name to factory mapping
//!
//! # Example
//!
//! ```rust
//! use fhirwire_models::{registry, HumanName, Patient, Primitive, Resource, ResourceType};
//!
//! let patient = Patient {
//!     id: "123".into(),
//!     active: Primitive::new(true),
//!     name: vec![HumanName {
//!         family: "Chalmers".into(),
//!         given: vec!["Peter".into(), "James".into()],
//!         ..Default::default()
//!     }],
//!     ..Default::default()
//! };
//! assert_eq!(patient.resource_type(), "Patient");
//!
//! let empty = registry().construct("Patient").unwrap();
//! assert_ne!(empty, Resource::from(patient));
//! ```

pub mod builder;
pub mod catalog;
pub mod common;
pub mod decimal;
pub mod field;
pub mod macros;
pub mod primitive;
pub mod registry;

// Re-export commonly used types
pub use builder::Builder;
pub use catalog::{FieldInfo, FieldKind, PrimitiveType, TypeInfo, TypeKind, WireName};
pub use common::*;
pub use decimal::Decimal;
pub use field::{Complex, Field, ItemDecoder, ItemRef};
pub use primitive::{Companion, Primitive, PrimitiveValue, Scalar, ScalarValue, Xhtml};
pub use registry::{registry, Factory, Registry, Resource, ResourceType};
