//! Fluent construction of model values.
//!
//! Every type declared with [`fhir_type!`](crate::fhir_type) gets a
//! `Type::builder()` constructor and one setter per field on
//! `Builder<Type>`. Setters take anything convertible into the field type.
//!
//! ```rust
//! use fhirwire_models::{HumanName, Patient};
//!
//! let patient = Patient::builder()
//!     .id("p1")
//!     .active(true)
//!     .name([HumanName::builder().family("Doe").build()])
//!     .build();
//! assert_eq!(patient.name[0].family.get().map(String::as_str), Some("Doe"));
//! ```

/// Accumulates field values for a `T`, starting from `T::default()`.
#[derive(Debug, Clone, Default, PartialEq)]
#[must_use]
pub struct Builder<T> {
    value: T,
}

impl<T: Default> Builder<T> {
    pub fn new() -> Self {
        Self {
            value: T::default(),
        }
    }
}

impl<T> Builder<T> {
    /// Continues from an existing value.
    pub fn from_value(value: T) -> Self {
        Self { value }
    }

    /// Applies an arbitrary change, for edits the field setters do not cover.
    pub fn with(mut self, change: impl FnOnce(&mut T)) -> Self {
        change(&mut self.value);
        self
    }

    pub fn build(self) -> T {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::complex::{Coding, Quantity};
    use crate::decimal::Decimal;
    use crate::primitive::Primitive;

    #[test]
    fn empty_builder_is_default() {
        assert_eq!(Coding::builder().build(), Coding::default());
        assert_eq!(Builder::<Quantity>::new().build(), Quantity::default());
    }

    #[test]
    fn setters_convert_into_field_types() {
        let q = Quantity::builder()
            .value(Decimal::must("120.50"))
            .unit("mmHg")
            .build();
        assert_eq!(q.value.get().map(Decimal::as_str), Some("120.50"));
        assert_eq!(q.unit.get().map(String::as_str), Some("mmHg"));
        assert_eq!(q.system, Primitive::default());
    }

    #[test]
    fn later_setters_win() {
        let coding = Coding::builder()
            .code("a")
            .code("b")
            .with(|c| c.display = "Bee".into())
            .build();
        assert_eq!(coding.code.get().map(String::as_str), Some("b"));
        assert_eq!(coding.display.get().map(String::as_str), Some("Bee"));
    }

    #[test]
    fn from_value_keeps_existing_fields() {
        let base = Coding::builder().system("http://loinc.org").build();
        let coding = Builder::from_value(base).code("8867-4").build();
        assert_eq!(coding.system.get().map(String::as_str), Some("http://loinc.org"));
        assert_eq!(coding.code.get().map(String::as_str), Some("8867-4"));
    }
}
