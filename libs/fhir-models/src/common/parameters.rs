//! FHIR Parameters model
//!
//! Operation parameters. A parameter's `resource` is wrapped in XML
//! (`<resource><Patient>...</Patient></resource>`).

use crate::common::complex::{
    CodeableConcept, Coding, Extension, Identifier, Meta, Period, Quantity, Reference,
};
use crate::decimal::Decimal;
use crate::primitive::Primitive;
use crate::registry::Resource;
use crate::{fhir_choice, fhir_type};

fhir_type! {
    /// Operation request or response
    resource Parameters {
        id: Primitive<String> => "id",
        meta: Option<Meta> => "meta",
        implicit_rules: Primitive<String> => "implicitRules",
        language: Primitive<String> => "language",
        parameter: Vec<ParametersParameter> => "parameter",
    }
}

fhir_type! {
    /// Operation parameter
    backbone ParametersParameter {
        id: Option<String> => "id",
        extension: Vec<Extension> => "extension",
        modifier_extension: Vec<Extension> => "modifierExtension",
        name: Primitive<String> => "name",
        value: Option<ParametersValue> => "value",
        resource: Option<Resource> => "resource",
        /// Named part of a multi-part parameter
        part: Vec<ParametersParameter> => "part",
    }
}

fhir_choice! {
    ParametersValue {
        Boolean(Primitive<bool>),
        Canonical(Primitive<String>),
        Code(Primitive<String>),
        Date(Primitive<String>),
        DateTime(Primitive<String>),
        Decimal(Primitive<Decimal>),
        Id(Primitive<String>),
        Instant(Primitive<String>),
        Integer(Primitive<i32>),
        String(Primitive<String>),
        Uri(Primitive<String>),
        CodeableConcept(CodeableConcept),
        Coding(Coding),
        Identifier(Identifier),
        Period(Period),
        Quantity(Quantity),
        Reference(Reference),
    }
}

impl Parameters {
    /// First parameter with the given name
    pub fn get(&self, name: &str) -> Option<&ParametersParameter> {
        self.parameter
            .iter()
            .find(|p| p.name.get().map(String::as_str) == Some(name))
    }

    pub fn add(&mut self, name: &str, value: ParametersValue) {
        self.parameter.push(ParametersParameter {
            name: name.into(),
            value: Some(value),
            ..Default::default()
        });
    }

    pub fn add_resource(&mut self, name: &str, resource: impl Into<Resource>) {
        self.parameter.push(ParametersParameter {
            name: name.into(),
            resource: Some(resource.into()),
            ..Default::default()
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Patient;

    #[test]
    fn test_lookup_by_name() {
        let mut params = Parameters::default();
        params.add("count", ParametersValue::Integer(3.into()));
        params.add_resource("patient", Patient::with_id("p1"));

        let count = params.get("count").unwrap();
        assert_eq!(
            count.value,
            Some(ParametersValue::Integer(Primitive::new(3)))
        );
        assert!(params.get("patient").unwrap().resource.is_some());
        assert!(params.get("missing").is_none());
    }
}
