//! Payload builders shared by the wasm32 tests.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use heicmeta_core::plist_value::write_binary;
use heicmeta_core::{PlistDict, PlistValue};

/// `{ ti: [ { t: 0.25, i: 1 }, { t: 0.75, i: 0 } ] }`
pub(crate) fn time_dict() -> PlistDict {
    let slot = |t: f64, i: i64| {
        PlistValue::Dictionary(
            [
                ("t".to_string(), PlistValue::from(t)),
                ("i".to_string(), PlistValue::from(i)),
            ]
            .into_iter()
            .collect(),
        )
    };
    [(
        "ti".to_string(),
        PlistValue::Array(vec![slot(0.25, 1), slot(0.75, 0)]),
    )]
    .into_iter()
    .collect()
}

/// `{ si: [ { a: 30.0, z: 180.0, i: 2 } ] }`
pub(crate) fn solar_dict() -> PlistDict {
    let position = PlistValue::Dictionary(
        [
            ("a".to_string(), PlistValue::from(30.0)),
            ("z".to_string(), PlistValue::from(180.0)),
            ("i".to_string(), PlistValue::from(2i64)),
        ]
        .into_iter()
        .collect(),
    );
    [("si".to_string(), PlistValue::Array(vec![position]))]
        .into_iter()
        .collect()
}

/// XMP packet carrying each `(attribute, dict)` as an `apple_desktop` attribute.
pub(crate) fn xmp_payload(attributes: &[(&str, &PlistDict)]) -> Vec<u8> {
    let attrs: String = attributes
        .iter()
        .map(|(name, dict)| {
            format!(
                " apple_desktop:{name}=\"{}\"",
                STANDARD.encode(write_binary(dict).unwrap())
            )
        })
        .collect();
    format!(
        r#"<x:xmpmeta xmlns:x="adobe:ns:meta/"><rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"><rdf:Description rdf:about="" xmlns:apple_desktop="http://ns.apple.com/namespace/1.0/"{attrs}/></rdf:RDF></x:xmpmeta>"#
    )
    .into_bytes()
}

/// HEIF Exif item holding a little-endian TIFF with Make and Model.
pub(crate) fn exif_item(make: &str, model: &str) -> Vec<u8> {
    let make = format!("{make}\0");
    let model = format!("{model}\0");
    let data_start = 8 + 2 + 24 + 4;

    let mut tiff = vec![0x49, 0x49, 0x2A, 0x00, 0x08, 0x00, 0x00, 0x00];
    tiff.extend_from_slice(&2u16.to_le_bytes());
    for (tag, value, offset) in [
        (0x010Fu16, &make, data_start),
        (0x0110u16, &model, data_start + make.len()),
    ] {
        tiff.extend_from_slice(&tag.to_le_bytes());
        tiff.extend_from_slice(&2u16.to_le_bytes());
        tiff.extend_from_slice(&(value.len() as u32).to_le_bytes());
        tiff.extend_from_slice(&(offset as u32).to_le_bytes());
    }
    tiff.extend_from_slice(&0u32.to_le_bytes());
    tiff.extend_from_slice(make.as_bytes());
    tiff.extend_from_slice(model.as_bytes());

    let mut item = 6u32.to_be_bytes().to_vec();
    item.extend_from_slice(b"Exif\0\0");
    item.extend_from_slice(&tiff);
    item
}
