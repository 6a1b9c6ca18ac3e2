//! WASM-compatible wrapper types for metadata sets.
//!
//! A browser has no libheif, so JavaScript hands over the metadata items it
//! has already pulled out of the container. [`JsMetadataSet`] wraps the core
//! in-memory source and exposes the same enumeration and decoding calls.

use heicmeta_core::{MemorySource, MetadataId, MetadataReader};
use wasm_bindgen::prelude::*;

use crate::convert::{to_js, to_js_error};

/// A set of metadata blocks for one image.
#[wasm_bindgen]
#[derive(Default)]
pub struct JsMetadataSet {
    source: MemorySource,
}

#[wasm_bindgen]
impl JsMetadataSet {
    /// Create an empty metadata set.
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsMetadataSet {
        JsMetadataSet::default()
    }

    /// Add a block of the given item type (e.g., "Exif") and return its id.
    pub fn push(&mut self, item_type: &str, data: Vec<u8>) -> u32 {
        self.source.push(item_type, data).get()
    }

    /// Add a "mime" block with a content type and return its id.
    pub fn push_mime(&mut self, content_type: &str, data: Vec<u8>) -> u32 {
        self.source.push_mime(content_type, data).get()
    }

    /// Number of blocks, optionally restricted to one item type.
    pub fn count(&self, type_filter: Option<String>) -> usize {
        self.reader().count(type_filter.as_deref())
    }

    /// Identifiers of the matching blocks.
    pub fn ids(&self, type_filter: Option<String>) -> Vec<u32> {
        ids_to_u32(self.reader().ids(type_filter.as_deref()))
    }

    /// Identifiers of the Exif blocks.
    pub fn exif_ids(&self) -> Vec<u32> {
        ids_to_u32(self.reader().exif_ids())
    }

    /// Identifiers of the XMP blocks.
    pub fn xmp_ids(&self) -> Vec<u32> {
        ids_to_u32(self.reader().xmp_ids())
    }

    /// Copy the raw payload of one block.
    pub fn fetch(&self, id: u32) -> Result<Vec<u8>, JsValue> {
        self.reader().fetch(MetadataId(id)).map_err(to_js_error)
    }

    /// Decode the property list selected by `xpath` in block `id`.
    pub fn metadata_map(&self, id: u32, xpath: &str) -> Result<JsValue, JsValue> {
        let dict = self
            .reader()
            .metadata_map(MetadataId(id), xpath)
            .map_err(to_js_error)?;
        to_js(&dict)
    }

    /// Decode the `apple_desktop:h24` property list of block `id`.
    pub fn apple_time(&self, id: u32) -> Result<JsValue, JsValue> {
        let dict = self.reader().apple_time(MetadataId(id)).map_err(to_js_error)?;
        to_js(&dict)
    }

    /// Decode the `apple_desktop:solar` property list of block `id`.
    pub fn apple_solar(&self, id: u32) -> Result<JsValue, JsValue> {
        let dict = self.reader().apple_solar(MetadataId(id)).map_err(to_js_error)?;
        to_js(&dict)
    }

    /// Block descriptions as an array of `{ id, item_type, content_type, size }`.
    pub fn blocks(&self) -> Result<JsValue, JsValue> {
        to_js(&self.reader().blocks(None))
    }
}

impl JsMetadataSet {
    fn reader(&self) -> MetadataReader<'_, MemorySource> {
        MetadataReader::new(&self.source)
    }
}

fn ids_to_u32(ids: Vec<MetadataId>) -> Vec<u32> {
    ids.into_iter().map(MetadataId::get).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_set() {
        let set = JsMetadataSet::new();
        assert_eq!(set.count(None), 0);
        assert!(set.ids(None).is_empty());
        assert!(set.exif_ids().is_empty());
        assert!(set.fetch(1).unwrap().is_empty());
    }

    #[test]
    fn test_push_and_enumerate() {
        let mut set = JsMetadataSet::new();
        let exif = set.push("Exif", vec![0, 0, 0, 0]);
        let xmp = set.push_mime("application/rdf+xml", b"<x/>".to_vec());

        assert_eq!(set.count(None), 2);
        assert_eq!(set.count(Some("Exif".to_string())), 1);
        assert_eq!(set.ids(None), vec![exif, xmp]);
        assert_eq!(set.exif_ids(), vec![exif]);
        assert_eq!(set.xmp_ids(), vec![xmp]);
        assert_eq!(set.fetch(xmp).unwrap(), b"<x/>".to_vec());
    }
}

/// WASM-specific tests that require JsValue.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use crate::fixtures::{exif_item, solar_dict, time_dict, xmp_payload};
    use heicmeta_core::{BlockInfo, TimeSchedule, APPLE_TIME_XPATH};
    use serde::Deserialize;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[derive(Deserialize)]
    struct SolarDict {
        si: Vec<SolarEntry>,
    }

    #[derive(Deserialize)]
    struct SolarEntry {
        a: f64,
        z: f64,
        i: i64,
    }

    fn sample_set() -> (JsMetadataSet, u32, u32) {
        let mut set = JsMetadataSet::new();
        let exif = set.push("Exif", exif_item("Apple", "iPhone"));
        let xmp = set.push_mime(
            "application/rdf+xml",
            xmp_payload(&[("h24", &time_dict()), ("solar", &solar_dict())]),
        );
        (set, exif, xmp)
    }

    #[wasm_bindgen_test]
    fn test_apple_time() {
        let (set, _, xmp) = sample_set();
        assert!(set.apple_time(xmp).unwrap().is_object());
    }

    #[wasm_bindgen_test]
    fn test_apple_time_unknown_id() {
        let (set, _, _) = sample_set();
        let err = set.apple_time(99).unwrap_err();
        assert!(err.as_string().unwrap().contains("99"));
    }

    #[wasm_bindgen_test]
    fn test_apple_solar() {
        let (set, _, xmp) = sample_set();
        let dict: SolarDict = serde_wasm_bindgen::from_value(set.apple_solar(xmp).unwrap()).unwrap();
        assert_eq!(dict.si.len(), 1);
        assert_eq!(dict.si[0].a, 30.0);
        assert_eq!(dict.si[0].z, 180.0);
        assert_eq!(dict.si[0].i, 2);
    }

    #[wasm_bindgen_test]
    fn test_metadata_map() {
        let (set, exif, xmp) = sample_set();
        assert!(set.metadata_map(xmp, APPLE_TIME_XPATH).unwrap().is_object());
        assert!(set.metadata_map(xmp, "string(//[").is_err());
        // Exif item is not XML
        assert!(set.metadata_map(exif, APPLE_TIME_XPATH).is_err());
    }

    #[wasm_bindgen_test]
    fn test_metadata_map_matches_core_schedule() {
        let (set, _, xmp) = sample_set();
        let dict = set.reader().apple_time(MetadataId(xmp)).unwrap();
        let schedule = TimeSchedule::from_dict(&dict).unwrap();
        assert_eq!(schedule.slots.len(), 2);
    }

    #[wasm_bindgen_test]
    fn test_blocks() {
        let (set, exif, xmp) = sample_set();
        let blocks: Vec<BlockInfo> = serde_wasm_bindgen::from_value(set.blocks().unwrap()).unwrap();

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].id, MetadataId(exif));
        assert!(blocks[0].is_exif());
        assert_eq!(blocks[1].id, MetadataId(xmp));
        assert!(blocks[1].is_xmp());
    }

    #[wasm_bindgen_test]
    fn test_blocks_empty_set() {
        let set = JsMetadataSet::new();
        let blocks: Vec<BlockInfo> = serde_wasm_bindgen::from_value(set.blocks().unwrap()).unwrap();
        assert!(blocks.is_empty());
    }
}
