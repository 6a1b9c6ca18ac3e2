//! Decoder configuration.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sxd_document::dom::{Document, Element};

/// Prefix every XML document binds implicitly.
const XML_PREFIX: &str = "xml";

/// Namespace URI of the XMP envelope (`x:xmpmeta`).
pub const NS_ADOBE_META: &str = "adobe:ns:meta/";
/// Namespace URI of RDF (`rdf:RDF`, `rdf:Description`).
pub const NS_RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
/// Namespace URI Apple uses for dynamic desktop attributes.
pub const NS_APPLE_DESKTOP: &str = "http://ns.apple.com/namespace/1.0/";
/// Namespace URI of the basic XMP schema.
pub const NS_XMP: &str = "http://ns.adobe.com/xap/1.0/";
/// Namespace URI of Dublin Core.
pub const NS_DC: &str = "http://purl.org/dc/elements/1.1/";

/// Settings for the chained XMP decoder.
///
/// XPath prefixes are resolved through `namespaces`. When
/// `use_document_namespaces` is set, prefixes declared in the parsed document
/// are also bound, but only where `namespaces` leaves the prefix unbound. A
/// configured prefix always resolves to its configured URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// Prefix to namespace URI bindings available to every expression.
    pub namespaces: BTreeMap<String, String>,
    /// Bind prefixes declared in the document that `namespaces` leaves unbound.
    pub use_document_namespaces: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        let namespaces = [
            ("x", NS_ADOBE_META),
            ("rdf", NS_RDF),
            ("apple_desktop", NS_APPLE_DESKTOP),
            ("xmp", NS_XMP),
            ("dc", NS_DC),
        ]
        .into_iter()
        .map(|(p, u)| (p.to_string(), u.to_string()))
        .collect();

        Self {
            namespaces,
            use_document_namespaces: true,
        }
    }
}

impl DecoderConfig {
    /// Create a configuration with the standard XMP bindings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a prefix binding.
    pub fn with_namespace(mut self, prefix: impl Into<String>, uri: impl Into<String>) -> Self {
        self.namespaces.insert(prefix.into(), uri.into());
        self
    }

    /// Resolve the bindings to use for one parsed document.
    pub fn bindings_for(&self, document: &Document<'_>) -> BTreeMap<String, String> {
        let mut bindings = self.namespaces.clone();
        if self.use_document_namespaces {
            for (prefix, uri) in declared_namespaces(document) {
                bindings.entry(prefix).or_insert(uri);
            }
        }
        bindings
    }
}

/// Namespace declarations of every element, in document order.
///
/// A prefix declared more than once keeps its first declaration.
fn declared_namespaces(document: &Document<'_>) -> Vec<(String, String)> {
    let mut found: Vec<(String, String)> = Vec::new();
    let mut pending: Vec<Element<'_>> = document
        .root()
        .children()
        .into_iter()
        .filter_map(|child| child.element())
        .collect();
    pending.reverse();

    while let Some(element) = pending.pop() {
        for ns in element.namespaces_in_scope() {
            if ns.prefix() == XML_PREFIX || found.iter().any(|(p, _)| p == ns.prefix()) {
                continue;
            }
            found.push((ns.prefix().to_string(), ns.uri().to_string()));
        }

        let children: Vec<Element<'_>> = element
            .children()
            .into_iter()
            .filter_map(|child| child.element())
            .collect();
        pending.extend(children.into_iter().rev());
    }

    found
}
