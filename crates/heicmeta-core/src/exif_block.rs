//! Exif metadata blocks.
//!
//! HEIF stores Exif as an item whose payload starts with a 4-byte big-endian
//! offset to the TIFF header (usually 6, skipping an `Exif\0\0` marker, or 0).

use exif::{In, Reader, Tag};
use serde::{Deserialize, Serialize};

use crate::metadata::MetadataError;

/// Return the TIFF structure inside a HEIF Exif block.
pub fn exif_tiff_payload(block: &[u8]) -> Result<&[u8], MetadataError> {
    let header: [u8; 4] = block
        .get(..4)
        .and_then(|h| h.try_into().ok())
        .ok_or_else(|| MetadataError::InvalidExif(format!("block of {} bytes has no header", block.len())))?;

    let offset = u32::from_be_bytes(header) as usize;
    let start = 4usize.saturating_add(offset);
    if start > block.len() {
        return Err(MetadataError::InvalidExif(format!(
            "TIFF offset {} past end of {} byte block",
            offset,
            block.len()
        )));
    }
    Ok(&block[start..])
}

/// Parse a HEIF Exif block.
pub fn parse_exif(block: &[u8]) -> Result<exif::Exif, MetadataError> {
    let tiff = exif_tiff_payload(block)?;
    Reader::new()
        .read_raw(tiff.to_vec())
        .map_err(|e| MetadataError::InvalidExif(e.to_string()))
}

/// Capture details commonly read from an Exif block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExifSummary {
    /// Camera make (e.g., "Apple").
    pub camera_make: Option<String>,
    /// Camera model (e.g., "iPhone 15 Pro").
    pub camera_model: Option<String>,
    /// Original capture time as recorded (e.g., "2023-09-30 18:02:11").
    pub date_taken: Option<String>,
    /// Orientation tag value (1-8).
    pub orientation: Option<u32>,
}

impl ExifSummary {
    /// Collect the summary fields from parsed Exif data.
    pub fn from_exif(exif: &exif::Exif) -> Self {
        let text = |tag: Tag| {
            exif.get_field(tag, In::PRIMARY)
                .map(|f| f.display_value().to_string())
                .map(|s| s.trim_matches('"').to_string())
                .filter(|s| !s.is_empty())
        };

        Self {
            camera_make: text(Tag::Make),
            camera_model: text(Tag::Model),
            date_taken: text(Tag::DateTimeOriginal),
            orientation: exif
                .get_field(Tag::Orientation, In::PRIMARY)
                .and_then(|f| f.value.get_uint(0)),
        }
    }
}
