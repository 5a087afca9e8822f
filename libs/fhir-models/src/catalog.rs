//! Static type catalog
//!
//! Every datatype, backbone element and resource carries a [`TypeInfo`]
//! describing its fields in canonical element order. The JSON and XML codecs
//! are driven entirely by these entries: they decide wire names, ordering,
//! choice-type suffixes, which fields are XML attributes and where a
//! polymorphic resource slot lives.

use once_cell::sync::Lazy;
use std::borrow::Cow;
use std::collections::HashMap;

/// What kind of structure a catalog entry describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Datatype,
    Backbone,
    Resource,
}

/// Wire representation of a primitive value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveType {
    /// JSON `true`/`false`, XML `"true"`/`"false"`.
    Boolean,
    /// JSON integer number.
    Integer,
    /// JSON number with exact text.
    Decimal,
    /// JSON string. Codes, dates, URIs and ids are all strings on the wire.
    String,
}

/// Shape of a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Plain string written as an XML attribute (`Element.id`, `Extension.url`).
    Attribute,
    /// Primitive value with an optional id/extension companion.
    Primitive(PrimitiveType),
    /// Nested datatype or backbone element, by catalog name.
    Complex(&'static str),
    /// Polymorphic resource slot wrapped in a field element in XML (`contained`).
    Resource,
    /// Polymorphic resource slot written as the resource element itself in XML
    /// (`Bundle.entry.resource`).
    InlineResource,
    /// Raw XHTML fragment (`Narrative.div`).
    Xhtml,
    /// `name[x]` field; the wire name is the base name plus a variant suffix.
    Choice(&'static [ChoiceVariant]),
}

/// One allowed type of a choice field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceVariant {
    /// Suffix appended to the base name, e.g. `Quantity` in `valueQuantity`.
    pub suffix: &'static str,
    pub kind: FieldKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldInfo {
    /// Wire name; for choice fields the base name without `[x]`.
    pub name: &'static str,
    pub kind: FieldKind,
    pub repeated: bool,
}

impl FieldInfo {
    pub fn is_choice(&self) -> bool {
        matches!(self.kind, FieldKind::Choice(_))
    }

    pub fn choice_variants(&self) -> &'static [ChoiceVariant] {
        match self.kind {
            FieldKind::Choice(variants) => variants,
            _ => &[],
        }
    }

    pub fn is_resource(&self) -> bool {
        matches!(self.kind, FieldKind::Resource | FieldKind::InlineResource)
    }

    /// Whether the field may carry a JSON `_name` companion.
    pub fn supports_companion(&self) -> bool {
        match self.kind {
            FieldKind::Primitive(_) => true,
            FieldKind::Choice(variants) => variants
                .iter()
                .any(|v| matches!(v.kind, FieldKind::Primitive(_))),
            _ => false,
        }
    }

    /// Wire name for a value; choice fields append the variant suffix.
    pub fn wire_name(&self, variant: Option<&str>) -> Cow<'static, str> {
        match variant {
            Some(suffix) if self.is_choice() => Cow::Owned(format!("{}{}", self.name, suffix)),
            _ => Cow::Borrowed(self.name),
        }
    }
}

/// Result of resolving a wire name against a type's fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireName {
    Field(&'static FieldInfo),
    Choice(&'static FieldInfo, &'static ChoiceVariant),
    /// Matches a choice base name but no declared variant.
    UnknownVariant(&'static FieldInfo),
    Unknown,
}

#[derive(Debug)]
pub struct TypeInfo {
    pub name: &'static str,
    pub kind: TypeKind,
    /// Fields in canonical element order.
    pub fields: &'static [FieldInfo],
}

impl TypeInfo {
    pub fn field(&self, name: &str) -> Option<&'static FieldInfo> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Maps a JSON key or XML element name onto a field.
    pub fn resolve(&self, wire: &str) -> WireName {
        if let Some(field) = self
            .fields
            .iter()
            .find(|f| !f.is_choice() && f.name == wire)
        {
            return WireName::Field(field);
        }

        for field in self.fields {
            let FieldKind::Choice(variants) = field.kind else {
                continue;
            };
            let Some(suffix) = wire.strip_prefix(field.name) else {
                continue;
            };
            if suffix.is_empty() {
                return WireName::UnknownVariant(field);
            }
            if !suffix.starts_with(|c: char| c.is_ascii_uppercase()) {
                continue;
            }
            return match variants.iter().find(|v| v.suffix == suffix) {
                Some(variant) => WireName::Choice(field, variant),
                None => WireName::UnknownVariant(field),
            };
        }
        WireName::Unknown
    }

    /// Fields written as XML attributes rather than child elements.
    pub fn attributes(&self) -> impl Iterator<Item = &'static FieldInfo> {
        self.fields
            .iter()
            .filter(|f| f.kind == FieldKind::Attribute)
    }

    /// The field that receives resources written directly as child elements.
    pub fn inline_resource_field(&self) -> Option<&'static FieldInfo> {
        self.fields
            .iter()
            .find(|f| f.kind == FieldKind::InlineResource)
    }
}

static CATALOG: Lazy<HashMap<&'static str, &'static TypeInfo>> = Lazy::new(|| {
    let catalog: HashMap<_, _> = crate::common::catalog_entries()
        .into_iter()
        .map(|info| (info.name, info))
        .collect();
    tracing::debug!(types = catalog.len(), "built type catalog");
    catalog
});

/// Looks up a datatype, backbone element or resource by name.
pub fn lookup(name: &str) -> Option<&'static TypeInfo> {
    CATALOG.get(name).copied()
}

/// All catalog entries, in no particular order.
pub fn types() -> impl Iterator<Item = &'static TypeInfo> {
    CATALOG.values().copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(info: &TypeInfo) -> Vec<&'static str> {
        info.fields.iter().map(|f| f.name).collect()
    }

    #[test]
    fn patient_fields_in_element_order() {
        let info = lookup("Patient").unwrap();
        assert_eq!(info.kind, TypeKind::Resource);
        let names = names(info);
        let pos = |n: &str| names.iter().position(|x| *x == n).unwrap();
        assert_eq!(pos("id"), 0);
        assert!(pos("meta") < pos("text"));
        assert!(pos("identifier") < pos("active"));
        assert!(pos("active") < pos("name"));
        assert!(pos("name") < pos("gender"));
        assert!(pos("gender") < pos("birthDate"));
        assert!(pos("birthDate") < pos("deceased"));
        assert!(pos("deceased") < pos("address"));
    }

    #[test]
    fn resolves_choice_names() {
        let info = lookup("Observation").unwrap();
        match info.resolve("valueQuantity") {
            WireName::Choice(field, variant) => {
                assert_eq!(field.name, "value");
                assert_eq!(variant.suffix, "Quantity");
                assert_eq!(variant.kind, FieldKind::Complex("Quantity"));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(matches!(info.resolve("valueFoo"), WireName::UnknownVariant(_)));
        assert!(matches!(info.resolve("value"), WireName::UnknownVariant(_)));
        assert!(matches!(info.resolve("status"), WireName::Field(_)));
        assert!(matches!(info.resolve("nonsense"), WireName::Unknown));
    }

    #[test]
    fn attribute_fields() {
        let extension = lookup("Extension").unwrap();
        let attrs: Vec<_> = extension.attributes().map(|f| f.name).collect();
        assert_eq!(attrs, ["id", "url"]);

        let patient = lookup("Patient").unwrap();
        assert_eq!(patient.attributes().count(), 0);
        assert_eq!(
            patient.field("id").unwrap().kind,
            FieldKind::Primitive(PrimitiveType::String)
        );
    }

    #[test]
    fn companion_support() {
        let patient = lookup("Patient").unwrap();
        assert!(patient.field("birthDate").unwrap().supports_companion());
        assert!(patient.field("deceased").unwrap().supports_companion());
        assert!(!patient.field("name").unwrap().supports_companion());
    }

    #[test]
    fn resource_slots() {
        let entry = lookup("BundleEntry").unwrap();
        assert_eq!(entry.inline_resource_field().unwrap().name, "resource");

        let patient = lookup("Patient").unwrap();
        assert_eq!(patient.field("contained").unwrap().kind, FieldKind::Resource);
        assert!(patient.inline_resource_field().is_none());
    }

    #[test]
    fn wire_names() {
        let info = lookup("Observation").unwrap();
        let value = info.field("value").unwrap();
        assert_eq!(value.wire_name(Some("Quantity")), "valueQuantity");
        assert_eq!(info.field("status").unwrap().wire_name(None), "status");
    }
}
