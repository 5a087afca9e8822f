//! Resource registry
//!
//! Decoders meet a resource type name before they know what to build. The
//! registry maps that name to a factory producing an empty instance, wrapped
//! in the [`Resource`] enum that every polymorphic slot holds.

use crate::catalog::TypeInfo;
use crate::common::error::{Error, Result};
use crate::common::{Bundle, Observation, Organization, Parameters, Patient, Practitioner};
use crate::field::Complex;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Anything that knows its FHIR resource type name.
pub trait ResourceType {
    fn resource_type(&self) -> &'static str;
}

/// Builds an empty resource instance.
pub type Factory = fn() -> Resource;

macro_rules! declare_resources {
    ($($name:ident),* $(,)?) => {
        /// Any concrete resource. Used wherever the model holds a resource of
        /// unknown type (`contained`, `Bundle.entry.resource`, ...).
        #[derive(Debug, Clone, PartialEq)]
        pub enum Resource {
            $($name(Box<$name>),)*
        }

        impl Resource {
            pub fn resource_type(&self) -> &'static str {
                match self {
                    $(Resource::$name(_) => stringify!($name),)*
                }
            }

            pub fn as_complex(&self) -> &dyn Complex {
                match self {
                    $(Resource::$name(r) => &**r as &dyn Complex,)*
                }
            }

            pub fn as_complex_mut(&mut self) -> &mut dyn Complex {
                match self {
                    $(Resource::$name(r) => &mut **r as &mut dyn Complex,)*
                }
            }
        }

        $(
            impl From<$name> for Resource {
                fn from(resource: $name) -> Self {
                    Resource::$name(Box::new(resource))
                }
            }

            impl TryFrom<Resource> for $name {
                type Error = Resource;

                fn try_from(resource: Resource) -> std::result::Result<Self, Resource> {
                    match resource {
                        Resource::$name(r) => Ok(*r),
                        #[allow(unreachable_patterns)]
                        other => Err(other),
                    }
                }
            }
        )*

        fn register_builtins(registry: &mut Registry) {
            $(registry.register(stringify!($name), || Resource::$name(Box::default()));)*
        }
    };
}

declare_resources!(Bundle, Observation, Organization, Parameters, Patient, Practitioner);

impl ResourceType for Resource {
    fn resource_type(&self) -> &'static str {
        Resource::resource_type(self)
    }
}

impl Resource {
    /// Catalog entry of the contained resource.
    pub fn type_info(&self) -> &'static TypeInfo {
        self.as_complex().type_info()
    }
}

/// Name to factory mapping for resource types.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    factories: HashMap<&'static str, Factory>,
}

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every resource type in this crate.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        register_builtins(&mut registry);
        tracing::debug!(resources = registry.len(), "registered builtin resource types");
        registry
    }

    /// Adds or replaces a factory.
    pub fn register(&mut self, name: &'static str, factory: Factory) {
        self.factories.insert(name, factory);
    }

    /// A fresh, empty instance of the named resource type.
    pub fn construct(&self, name: &str) -> Result<Resource> {
        self.factories
            .get(name)
            .map(|factory| factory())
            .ok_or_else(|| Error::UnknownType(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

static REGISTRY: Lazy<Registry> = Lazy::new(Registry::with_builtins);

/// The process-wide registry of builtin resource types.
///
/// Built on first use and read-only afterwards.
pub fn registry() -> &'static Registry {
    &REGISTRY
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{self, TypeKind};

    #[test]
    fn constructs_known_types() {
        for name in ["Patient", "Observation", "Practitioner", "Organization", "Bundle", "Parameters"] {
            let resource = registry().construct(name).unwrap();
            assert_eq!(resource.resource_type(), name);
            assert_eq!(resource.type_info().name, name);
        }
    }

    #[test]
    fn unknown_type_carries_name() {
        let err = registry().construct("UnknownResource").unwrap_err();
        assert_eq!(err, Error::UnknownType("UnknownResource".into()));
    }

    #[test]
    fn every_registered_type_is_a_catalog_resource() {
        for name in registry().names() {
            let info = catalog::lookup(name).unwrap();
            assert_eq!(info.kind, TypeKind::Resource);
        }
        let resources = catalog::types()
            .filter(|t| t.kind == TypeKind::Resource)
            .count();
        assert_eq!(resources, registry().len());
    }

    #[test]
    fn custom_registry() {
        let mut registry = Registry::new();
        assert!(registry.is_empty());
        registry.register("Patient", || Patient::default().into());
        assert!(registry.contains("Patient"));
        assert!(!registry.contains("Observation"));
        assert!(matches!(
            registry.construct("Observation"),
            Err(Error::UnknownType(_))
        ));
    }

    #[test]
    fn converts_back_to_concrete() {
        let resource = Resource::from(Patient::default());
        assert!(Patient::try_from(resource.clone()).is_ok());
        assert!(Observation::try_from(resource).is_err());
    }
}
