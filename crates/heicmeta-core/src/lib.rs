//! heicmeta Core - HEIC/HEIF metadata extraction
//!
//! This crate lists and copies the metadata blocks of a HEIC/HEIF image handle
//! and decodes the Apple property lists hidden in its XMP packet:
//!
//! ```text
//! metadata block → XML → XPath attribute → Base64 → property list
//! ```
//!
//! The native codec is reached through [`MetadataSource`]; enable the
//! `libheif` feature for the libheif adapter. [`MemorySource`] covers blocks
//! obtained any other way.

pub mod apple;
pub mod exif_block;
pub mod metadata;
pub mod plist_value;
pub mod xmp;

pub use apple::{Appearance, SolarPosition, SolarSchedule, TimeSchedule, TimeSlot};
pub use exif_block::{exif_tiff_payload, parse_exif, ExifSummary};
pub use metadata::{
    BlockInfo, MemorySource, MetadataError, MetadataId, MetadataReader, MetadataSource,
    EXIF_FILTER,
};
pub use plist_value::{PlistDict, PlistValue};
pub use xmp::{
    decode_apple_solar, decode_apple_time, decode_payload, strip_nul, DecoderConfig,
    APPLE_SOLAR_XPATH, APPLE_TIME_XPATH,
};
