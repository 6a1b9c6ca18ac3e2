//! Chained decoding: XML → XPath → Base64 → property list.
//!
//! Apple stores dynamic desktop schedules as a Base64-encoded property list
//! inside an attribute of the image's XMP packet. Each stage here either
//! produces the input for the next one or stops the chain with an error.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use log::{debug, trace};
use sxd_document::Package;
use sxd_xpath::{Context, Factory, Value, XPath};

use super::DecoderConfig;
use crate::metadata::MetadataError;
use crate::plist_value::{parse_dictionary, PlistDict};

/// Remove every NUL byte from a payload.
///
/// HEIC writers sometimes pad metadata items with NULs, which are never valid
/// inside the XML text that follows.
pub fn strip_nul(payload: &[u8]) -> Vec<u8> {
    payload.iter().copied().filter(|&b| b != 0).collect()
}

/// Decode a raw XMP payload down to the property list selected by `expression`.
///
/// # Errors
///
/// - `InvalidExpression` - the expression does not compile or cannot be evaluated
/// - `MalformedXml` - the payload is not well-formed XML
/// - `XPathNotFound` - the expression selects no non-empty string
/// - `InvalidBase64` - the selected string is not standard Base64
/// - `InvalidPropertyList` - the decoded bytes are not a dictionary plist
pub fn decode_payload(
    payload: &[u8],
    expression: &str,
    config: &DecoderConfig,
) -> Result<PlistDict, MetadataError> {
    let cleaned = strip_nul(payload);
    trace!(
        "Stripped {} NUL byte(s) from {} byte payload",
        payload.len() - cleaned.len(),
        payload.len()
    );

    let xpath = compile_expression(expression)?;
    let text = std::str::from_utf8(&cleaned)
        .map_err(|e| MetadataError::MalformedXml(format!("payload is not UTF-8: {e}")))?;
    let text = text.trim_start_matches(|c: char| c == '\u{feff}' || c.is_whitespace());
    let package = parse_xml(text)?;

    let encoded = select_string(&xpath, &package, expression, config)?;
    debug!("Selected {} Base64 character(s) at {expression}", encoded.len());

    let bytes = decode_base64(&encoded)?;
    let dict = parse_dictionary(&bytes)?;
    debug!("Decoded property list with {} key(s)", dict.len());
    Ok(dict)
}

fn compile_expression(expression: &str) -> Result<XPath, MetadataError> {
    let invalid = |reason: String| MetadataError::InvalidExpression {
        expression: expression.to_string(),
        reason,
    };

    match Factory::new().build(expression) {
        Ok(Some(xpath)) => Ok(xpath),
        Ok(None) => Err(invalid("empty expression".to_string())),
        Err(e) => Err(invalid(e.to_string())),
    }
}

fn parse_xml(text: &str) -> Result<Package, MetadataError> {
    sxd_document::parser::parse(text).map_err(|e| MetadataError::MalformedXml(format!("{e:?}")))
}

fn select_string(
    xpath: &XPath,
    package: &Package,
    expression: &str,
    config: &DecoderConfig,
) -> Result<String, MetadataError> {
    let document = package.as_document();

    let mut context = Context::new();
    for (prefix, uri) in config.bindings_for(&document) {
        context.set_namespace(&prefix, &uri);
    }

    let value = xpath
        .evaluate(&context, document.root())
        .map_err(|e| MetadataError::InvalidExpression {
            expression: expression.to_string(),
            reason: e.to_string(),
        })?;

    let selected = match value {
        Value::String(s) => s,
        Value::Nodeset(nodes) => nodes
            .document_order_first()
            .map(|node| node.string_value())
            .unwrap_or_default(),
        Value::Number(_) | Value::Boolean(_) => String::new(),
    };

    let selected = selected.trim();
    if selected.is_empty() {
        return Err(MetadataError::XPathNotFound {
            expression: expression.to_string(),
        });
    }
    Ok(selected.to_string())
}

/// Standard Base64, ignoring embedded line breaks.
fn decode_base64(encoded: &str) -> Result<Vec<u8>, MetadataError> {
    let compact: String = encoded.chars().filter(|c| !matches!(c, '\r' | '\n')).collect();
    STANDARD
        .decode(compact)
        .map_err(|e| MetadataError::InvalidBase64(e.to_string()))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::plist_value::{write_binary, PlistValue};
    use crate::xmp::APPLE_TIME_XPATH;
    use proptest::prelude::*;

    /// Strategy for generating plist leaf values.
    fn leaf_strategy() -> impl Strategy<Value = PlistValue> {
        prop_oneof![
            "[a-zA-Z0-9 ]{0,16}".prop_map(PlistValue::String),
            any::<i64>().prop_map(PlistValue::from),
            (-1.0e6f64..1.0e6).prop_map(PlistValue::Real),
            any::<bool>().prop_map(PlistValue::Boolean),
            prop::collection::vec(any::<u8>(), 0..16).prop_map(PlistValue::Data),
        ]
    }

    /// Strategy for generating nested dictionaries.
    fn dict_strategy() -> impl Strategy<Value = PlistDict> {
        let value = leaf_strategy().prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(PlistValue::Array),
                prop::collection::btree_map("[a-z]{1,6}", inner, 0..4)
                    .prop_map(PlistValue::Dictionary),
            ]
        });
        prop::collection::btree_map("[a-z]{1,8}", value, 0..6)
    }

    proptest! {
        /// Property: Stripping NUL bytes is idempotent.
        #[test]
        fn prop_strip_nul_idempotent(payload in prop::collection::vec(any::<u8>(), 0..256)) {
            let once = strip_nul(&payload);
            prop_assert!(!once.contains(&0));
            prop_assert_eq!(strip_nul(&once), once);
        }

        /// Property: A dictionary survives plist → Base64 → XMP → decoder.
        #[test]
        fn prop_chain_round_trip(dict in dict_strategy()) {
            let b64 = STANDARD.encode(write_binary(&dict).unwrap());
            let xml = format!(
                r#"<x:xmpmeta xmlns:x="adobe:ns:meta/"><rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"><rdf:Description xmlns:apple_desktop="http://ns.apple.com/namespace/1.0/" apple_desktop:h24="{b64}"/></rdf:RDF></x:xmpmeta>"#
            );
            let decoded = decode_payload(xml.as_bytes(), APPLE_TIME_XPATH, &DecoderConfig::default());
            prop_assert_eq!(decoded.unwrap(), dict);
        }
    }
}
