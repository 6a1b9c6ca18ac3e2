//! Apple XMP payload decoding.
//!
//! Dynamic desktop HEIC images carry their schedules in the XMP packet as
//! attributes of `rdf:Description`:
//!
//! ```text
//! <x:xmpmeta xmlns:x="adobe:ns:meta/">
//!   <rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#">
//!     <rdf:Description xmlns:apple_desktop="http://ns.apple.com/namespace/1.0/"
//!                      apple_desktop:h24="YnBsaXN0MDDS..."/>
//!   </rdf:RDF>
//! </x:xmpmeta>
//! ```
//!
//! The attribute value is Base64 of a binary property list. [`decode_payload`]
//! walks that chain for any expression; [`decode_apple_time`] and
//! [`decode_apple_solar`] use the two fixed attributes.

mod chain;
mod config;

pub use chain::{decode_payload, strip_nul};
pub use config::{
    DecoderConfig, NS_ADOBE_META, NS_APPLE_DESKTOP, NS_DC, NS_RDF, NS_XMP,
};

use crate::metadata::MetadataError;
use crate::plist_value::PlistDict;

/// Selects the time-of-day schedule (`apple_desktop:h24`).
pub const APPLE_TIME_XPATH: &str =
    "string(//x:xmpmeta/rdf:RDF/rdf:Description/@apple_desktop:h24)";

/// Selects the solar-position schedule (`apple_desktop:solar`).
pub const APPLE_SOLAR_XPATH: &str =
    "string(//x:xmpmeta/rdf:RDF/rdf:Description/@apple_desktop:solar)";

/// Decode the `apple_desktop:h24` property list from a raw XMP payload.
pub fn decode_apple_time(payload: &[u8], config: &DecoderConfig) -> Result<PlistDict, MetadataError> {
    decode_payload(payload, APPLE_TIME_XPATH, config)
}

/// Decode the `apple_desktop:solar` property list from a raw XMP payload.
pub fn decode_apple_solar(
    payload: &[u8],
    config: &DecoderConfig,
) -> Result<PlistDict, MetadataError> {
    decode_payload(payload, APPLE_SOLAR_XPATH, config)
}
