//! XMP and Exif decoding WASM bindings.
//!
//! These functions take a raw metadata payload (the bytes of one HEIF metadata
//! item) and run the core decoders on it.
//!
//! # Functions
//!
//! - [`decode_xmp_plist`] - Decode the property list at any XPath expression
//! - [`decode_apple_time`] / [`decode_apple_solar`] - The two Apple attributes
//! - [`decode_time_schedule`] / [`decode_solar_schedule`] - Typed schedules
//! - [`exif_summary`] - Camera make, model and capture time from an Exif item
//! - [`strip_nul_bytes`] - Remove NUL padding from a payload
//!
//! # Example
//!
//! ```typescript
//! import { decode_solar_schedule } from '@heicmeta/wasm';
//!
//! const schedule = decode_solar_schedule(xmpBytes);
//! for (const p of schedule.positions) {
//!   console.log(`image ${p.image_index}: alt ${p.altitude} az ${p.azimuth}`);
//! }
//! ```

use heicmeta_core::{exif_block, xmp, DecoderConfig, SolarSchedule, TimeSchedule};
use wasm_bindgen::prelude::*;

use crate::convert::{to_js, to_js_error};

/// Decode the property list selected by `xpath` in an XMP payload.
///
/// # Errors
///
/// Returns an error if the expression is invalid, the payload is not XML, the
/// expression selects nothing, or the selected value is not a Base64 property
/// list.
#[wasm_bindgen]
pub fn decode_xmp_plist(payload: &[u8], xpath: &str) -> Result<JsValue, JsValue> {
    let dict = xmp::decode_payload(payload, xpath, &DecoderConfig::default())
        .map_err(to_js_error)?;
    to_js(&dict)
}

/// Decode the `apple_desktop:h24` property list.
#[wasm_bindgen]
pub fn decode_apple_time(payload: &[u8]) -> Result<JsValue, JsValue> {
    let dict = xmp::decode_apple_time(payload, &DecoderConfig::default()).map_err(to_js_error)?;
    to_js(&dict)
}

/// Decode the `apple_desktop:solar` property list.
#[wasm_bindgen]
pub fn decode_apple_solar(payload: &[u8]) -> Result<JsValue, JsValue> {
    let dict = xmp::decode_apple_solar(payload, &DecoderConfig::default()).map_err(to_js_error)?;
    to_js(&dict)
}

/// Decode the time-of-day schedule as `{ slots, appearance }`.
#[wasm_bindgen]
pub fn decode_time_schedule(payload: &[u8]) -> Result<JsValue, JsValue> {
    let dict = xmp::decode_apple_time(payload, &DecoderConfig::default()).map_err(to_js_error)?;
    let schedule = TimeSchedule::from_dict(&dict).map_err(to_js_error)?;
    to_js(&schedule)
}

/// Decode the solar schedule as `{ positions, appearance }`.
#[wasm_bindgen]
pub fn decode_solar_schedule(payload: &[u8]) -> Result<JsValue, JsValue> {
    let dict = xmp::decode_apple_solar(payload, &DecoderConfig::default()).map_err(to_js_error)?;
    let schedule = SolarSchedule::from_dict(&dict).map_err(to_js_error)?;
    to_js(&schedule)
}

/// Summarize a HEIF Exif item as `{ camera_make, camera_model, date_taken, orientation }`.
#[wasm_bindgen]
pub fn exif_summary(block: &[u8]) -> Result<JsValue, JsValue> {
    let exif = exif_block::parse_exif(block).map_err(to_js_error)?;
    to_js(&exif_block::ExifSummary::from_exif(&exif))
}

/// Remove every NUL byte from a payload.
#[wasm_bindgen]
pub fn strip_nul_bytes(payload: &[u8]) -> Vec<u8> {
    xmp::strip_nul(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_nul_bytes() {
        assert_eq!(strip_nul_bytes(b"<a\0/>\0"), b"<a/>".to_vec());
        assert!(strip_nul_bytes(&[]).is_empty());
    }
}
