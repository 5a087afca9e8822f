//! FHIR Bundle model
//!
//! A container for a collection of resources. Entry resources are written
//! inline in XML (`<entry><Patient>...`), unlike `contained`.

use crate::catalog::FieldKind;
use crate::common::complex::{Extension, Identifier, Meta};
use crate::decimal::Decimal;
use crate::fhir_type;
use crate::primitive::Primitive;
use crate::registry::Resource;

fhir_type! {
    /// FHIR Bundle resource
    resource Bundle {
        /// Logical id of this artifact
        id: Primitive<String> => "id",
        meta: Option<Meta> => "meta",
        implicit_rules: Primitive<String> => "implicitRules",
        language: Primitive<String> => "language",
        /// Persistent identifier for the bundle
        identifier: Option<Identifier> => "identifier",
        /// document | message | transaction | transaction-response | batch |
        /// batch-response | history | searchset | collection
        type_: Primitive<String> => "type",
        /// When the bundle was assembled
        timestamp: Primitive<String> => "timestamp",
        /// If search, the total number of matches
        total: Primitive<u32> => "total",
        link: Vec<BundleLink> => "link",
        entry: Vec<BundleEntry> => "entry",
    }
}

fhir_type! {
    /// Links related to this Bundle
    backbone BundleLink {
        id: Option<String> => "id",
        extension: Vec<Extension> => "extension",
        modifier_extension: Vec<Extension> => "modifierExtension",
        /// See http://www.iana.org/assignments/link-relations/link-relations.xhtml#link-relations-1
        relation: Primitive<String> => "relation",
        url: Primitive<String> => "url",
    }
}

fhir_type! {
    /// Entry in the bundle
    backbone BundleEntry {
        id: Option<String> => "id",
        extension: Vec<Extension> => "extension",
        modifier_extension: Vec<Extension> => "modifierExtension",
        link: Vec<BundleLink> => "link",
        /// Full URL for the entry (relative to the base URL, or absolute)
        full_url: Primitive<String> => "fullUrl",
        /// A resource in this bundle
        resource: Option<Resource> => "resource" as FieldKind::InlineResource,
        search: Option<BundleEntrySearch> => "search",
        request: Option<BundleEntryRequest> => "request",
        response: Option<BundleEntryResponse> => "response",
    }
}

fhir_type! {
    /// Search-related information
    backbone BundleEntrySearch {
        id: Option<String> => "id",
        extension: Vec<Extension> => "extension",
        modifier_extension: Vec<Extension> => "modifierExtension",
        /// match | include | outcome
        mode: Primitive<String> => "mode",
        score: Primitive<Decimal> => "score",
    }
}

fhir_type! {
    /// Request details for a Bundle entry
    backbone BundleEntryRequest {
        id: Option<String> => "id",
        extension: Vec<Extension> => "extension",
        modifier_extension: Vec<Extension> => "modifierExtension",
        /// GET | HEAD | POST | PUT | DELETE | PATCH
        method: Primitive<String> => "method",
        url: Primitive<String> => "url",
        if_none_match: Primitive<String> => "ifNoneMatch",
        if_modified_since: Primitive<String> => "ifModifiedSince",
        if_match: Primitive<String> => "ifMatch",
        if_none_exist: Primitive<String> => "ifNoneExist",
    }
}

fhir_type! {
    /// Results of execution (transaction/batch/history)
    backbone BundleEntryResponse {
        id: Option<String> => "id",
        extension: Vec<Extension> => "extension",
        modifier_extension: Vec<Extension> => "modifierExtension",
        status: Primitive<String> => "status",
        location: Primitive<String> => "location",
        etag: Primitive<String> => "etag",
        last_modified: Primitive<String> => "lastModified",
        /// OperationOutcome with hints and warnings (for batch/transaction)
        outcome: Option<Resource> => "outcome",
    }
}

impl Bundle {
    /// Create a new Bundle of the given type
    pub fn new(bundle_type: &str) -> Self {
        Self {
            type_: bundle_type.into(),
            ..Default::default()
        }
    }

    fn is_type(&self, code: &str) -> bool {
        self.type_.get().map(String::as_str) == Some(code)
    }

    /// Check if this is a transaction bundle
    pub fn is_transaction(&self) -> bool {
        self.is_type("transaction")
    }

    pub fn is_batch(&self) -> bool {
        self.is_type("batch")
    }

    pub fn is_searchset(&self) -> bool {
        self.is_type("searchset")
    }

    pub fn entry_count(&self) -> usize {
        self.entry.len()
    }

    /// Resources of all entries that carry one, in entry order
    pub fn resources(&self) -> impl Iterator<Item = &Resource> {
        self.entry.iter().filter_map(|e| e.resource.as_ref())
    }

    /// Add an entry holding `resource`
    pub fn add_resource(&mut self, full_url: Option<&str>, resource: impl Into<Resource>) {
        self.entry.push(BundleEntry {
            full_url: full_url.map(Primitive::from).unwrap_or_default(),
            resource: Some(resource.into()),
            ..Default::default()
        });
    }

    pub fn add_link(&mut self, relation: &str, url: &str) {
        self.link.push(BundleLink {
            relation: relation.into(),
            url: url.into(),
            ..Default::default()
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::TypeKind;
    use crate::common::Patient;

    #[test]
    fn test_is_transaction() {
        let bundle = Bundle::new("transaction");
        assert!(bundle.is_transaction());
        assert!(!bundle.is_batch());
        assert!(!bundle.is_searchset());
    }

    #[test]
    fn test_add_resource() {
        let mut bundle = Bundle::new("collection");
        bundle.add_resource(Some("urn:uuid:1"), Patient::default());
        bundle.add_resource(None, Patient::default());
        assert_eq!(bundle.entry_count(), 2);
        assert_eq!(bundle.resources().count(), 2);
        assert_eq!(bundle.entry[0].full_url.get().unwrap(), "urn:uuid:1");
        assert!(bundle.entry[1].full_url.is_empty());
    }

    #[test]
    fn test_add_link() {
        let mut bundle = Bundle::new("searchset");
        bundle.add_link("self", "http://example.org/fhir/Patient?_id=123");
        assert_eq!(bundle.link.len(), 1);
        assert_eq!(bundle.link[0].relation.get().unwrap(), "self");
    }

    #[test]
    fn test_entry_catalog() {
        let info = BundleEntry::catalog_entry();
        assert_eq!(info.kind, TypeKind::Backbone);
        assert_eq!(info.field("resource").unwrap().kind, FieldKind::InlineResource);

        let response = BundleEntryResponse::catalog_entry();
        assert_eq!(response.field("outcome").unwrap().kind, FieldKind::Resource);
    }
}
