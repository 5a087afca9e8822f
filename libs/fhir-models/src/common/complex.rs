//! General-purpose datatypes
//!
//! Every datatype starts with `id` (an XML attribute) and `extension`, followed
//! by its own elements in canonical order.

use crate::decimal::Decimal;
use crate::primitive::{Primitive, Xhtml};
use crate::{fhir_choice, fhir_type};

fhir_type! {
    /// Additional content defined by implementations.
    datatype Extension {
        id: Option<String> => "id",
        extension: Vec<Extension> => "extension",
        /// Identifies the meaning of the extension.
        url: String => "url",
        value: Option<ExtensionValue> => "value",
    }
}

fhir_choice! {
    /// `Extension.value[x]`.
    ExtensionValue {
        Base64Binary(Primitive<String>),
        Boolean(Primitive<bool>),
        Canonical(Primitive<String>),
        Code(Primitive<String>),
        Date(Primitive<String>),
        DateTime(Primitive<String>),
        Decimal(Primitive<Decimal>),
        Id(Primitive<String>),
        Instant(Primitive<String>),
        Integer(Primitive<i32>),
        Markdown(Primitive<String>),
        Oid(Primitive<String>),
        PositiveInt(Primitive<u32>),
        String(Primitive<String>),
        Time(Primitive<String>),
        UnsignedInt(Primitive<u32>),
        Uri(Primitive<String>),
        Url(Primitive<String>),
        Uuid(Primitive<String>),
        Address(Address),
        Annotation(Annotation),
        CodeableConcept(CodeableConcept),
        Coding(Coding),
        ContactPoint(ContactPoint),
        HumanName(HumanName),
        Identifier(Identifier),
        Period(Period),
        Quantity(Quantity),
        Range(Range),
        Reference(Reference),
    }
}

impl Extension {
    pub fn new(url: impl Into<String>, value: ExtensionValue) -> Self {
        Self {
            url: url.into(),
            value: Some(value),
            ..Default::default()
        }
    }
}

fhir_type! {
    /// A reference to a code defined by a terminology system.
    datatype Coding {
        id: Option<String> => "id",
        extension: Vec<Extension> => "extension",
        system: Primitive<String> => "system",
        version: Primitive<String> => "version",
        code: Primitive<String> => "code",
        display: Primitive<String> => "display",
        user_selected: Primitive<bool> => "userSelected",
    }
}

impl Coding {
    pub fn new(system: &str, code: &str) -> Self {
        Self {
            system: system.into(),
            code: code.into(),
            ..Default::default()
        }
    }
}

fhir_type! {
    /// Concept defined by codings and/or text.
    datatype CodeableConcept {
        id: Option<String> => "id",
        extension: Vec<Extension> => "extension",
        coding: Vec<Coding> => "coding",
        text: Primitive<String> => "text",
    }
}

fhir_type! {
    /// A measured or measurable amount.
    datatype Quantity {
        id: Option<String> => "id",
        extension: Vec<Extension> => "extension",
        value: Primitive<Decimal> => "value",
        /// `<`, `<=`, `>=` or `>`.
        comparator: Primitive<String> => "comparator",
        unit: Primitive<String> => "unit",
        system: Primitive<String> => "system",
        code: Primitive<String> => "code",
    }
}

fhir_type! {
    datatype Range {
        id: Option<String> => "id",
        extension: Vec<Extension> => "extension",
        low: Option<Quantity> => "low",
        high: Option<Quantity> => "high",
    }
}

fhir_type! {
    /// Time range defined by start and end date/time.
    datatype Period {
        id: Option<String> => "id",
        extension: Vec<Extension> => "extension",
        start: Primitive<String> => "start",
        end: Primitive<String> => "end",
    }
}

fhir_type! {
    /// Name of a human, with text, parts and usage information.
    datatype HumanName {
        id: Option<String> => "id",
        extension: Vec<Extension> => "extension",
        use_: Primitive<String> => "use",
        text: Primitive<String> => "text",
        family: Primitive<String> => "family",
        given: Vec<Primitive<String>> => "given",
        prefix: Vec<Primitive<String>> => "prefix",
        suffix: Vec<Primitive<String>> => "suffix",
        period: Option<Period> => "period",
    }
}

fhir_type! {
    /// An identifier intended for computation.
    datatype Identifier {
        id: Option<String> => "id",
        extension: Vec<Extension> => "extension",
        use_: Primitive<String> => "use",
        type_: Option<CodeableConcept> => "type",
        system: Primitive<String> => "system",
        value: Primitive<String> => "value",
        period: Option<Period> => "period",
        assigner: Option<Box<Reference>> => "assigner",
    }
}

fhir_type! {
    /// A reference from one resource to another.
    datatype Reference {
        id: Option<String> => "id",
        extension: Vec<Extension> => "extension",
        reference: Primitive<String> => "reference",
        type_: Primitive<String> => "type",
        identifier: Option<Box<Identifier>> => "identifier",
        display: Primitive<String> => "display",
    }
}

impl Reference {
    pub fn to(reference: &str) -> Self {
        Self {
            reference: reference.into(),
            ..Default::default()
        }
    }
}

fhir_type! {
    /// Details of a technology-mediated contact point (phone, email, ...).
    datatype ContactPoint {
        id: Option<String> => "id",
        extension: Vec<Extension> => "extension",
        system: Primitive<String> => "system",
        value: Primitive<String> => "value",
        use_: Primitive<String> => "use",
        rank: Primitive<u32> => "rank",
        period: Option<Period> => "period",
    }
}

fhir_type! {
    /// An address expressed using postal conventions.
    datatype Address {
        id: Option<String> => "id",
        extension: Vec<Extension> => "extension",
        use_: Primitive<String> => "use",
        type_: Primitive<String> => "type",
        text: Primitive<String> => "text",
        line: Vec<Primitive<String>> => "line",
        city: Primitive<String> => "city",
        district: Primitive<String> => "district",
        state: Primitive<String> => "state",
        postal_code: Primitive<String> => "postalCode",
        country: Primitive<String> => "country",
        period: Option<Period> => "period",
    }
}

fhir_type! {
    /// Metadata about a resource.
    datatype Meta {
        id: Option<String> => "id",
        extension: Vec<Extension> => "extension",
        version_id: Primitive<String> => "versionId",
        last_updated: Primitive<String> => "lastUpdated",
        source: Primitive<String> => "source",
        profile: Vec<Primitive<String>> => "profile",
        security: Vec<Coding> => "security",
        tag: Vec<Coding> => "tag",
    }
}

fhir_type! {
    /// Human-readable summary of the resource.
    datatype Narrative {
        id: Option<String> => "id",
        extension: Vec<Extension> => "extension",
        /// `generated`, `extensions`, `additional` or `empty`.
        status: Primitive<String> => "status",
        /// Limited XHTML content, kept verbatim.
        div: Option<Xhtml> => "div",
    }
}

fhir_type! {
    /// Text note which also contains information about who made the statement and when.
    datatype Annotation {
        id: Option<String> => "id",
        extension: Vec<Extension> => "extension",
        author: Option<AnnotationAuthor> => "author",
        time: Primitive<String> => "time",
        text: Primitive<String> => "text",
    }
}

fhir_choice! {
    AnnotationAuthor {
        Reference(Reference),
        String(Primitive<String>),
    }
}
