//! Core types for metadata extraction.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Item type reported by libheif for Exif blocks.
pub const EXIF_FILTER: &str = "Exif";

/// Error types for metadata extraction and decoding.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// The identifier does not belong to the handle's metadata set.
    #[error("Metadata block {0} not found")]
    NotFound(MetadataId),

    /// The XPath expression could not be compiled or evaluated.
    #[error("Invalid XPath expression `{expression}`: {reason}")]
    InvalidExpression { expression: String, reason: String },

    /// The payload is not well-formed XML.
    #[error("Malformed XML: {0}")]
    MalformedXml(String),

    /// The expression did not select a non-empty string.
    #[error("Could not find string at {expression}")]
    XPathNotFound { expression: String },

    /// The selected string is not valid standard Base64.
    #[error("Invalid Base64: {0}")]
    InvalidBase64(String),

    /// The decoded bytes are not a property list dictionary.
    #[error("Invalid property list: {0}")]
    InvalidPropertyList(String),

    /// The Exif block header or TIFF structure is unusable.
    #[error("Invalid Exif block: {0}")]
    InvalidExif(String),

    /// A decoded dictionary does not have the expected keys or value types.
    #[error("Unexpected property list shape: {0}")]
    UnexpectedShape(String),

    /// The native codec reported an error.
    #[error("Codec error: {0}")]
    Codec(String),
}

impl MetadataError {
    /// Returns true if the error was caused by the caller rather than the data.
    ///
    /// A malformed XPath expression is a bug at the call site; every other
    /// variant describes the image or its payloads.
    pub fn is_caller_error(&self) -> bool {
        matches!(self, MetadataError::InvalidExpression { .. })
    }
}

/// Identifier of one metadata block within a single image handle.
///
/// The value has no meaning outside the handle that reported it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetadataId(pub u32);

impl MetadataId {
    /// Get the raw item id.
    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for MetadataId {
    fn from(value: u32) -> Self {
        MetadataId(value)
    }
}

impl From<MetadataId> for u32 {
    fn from(value: MetadataId) -> Self {
        value.0
    }
}

impl fmt::Display for MetadataId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Description of one metadata block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockInfo {
    /// Block identifier.
    pub id: MetadataId,
    /// Item type (e.g., "Exif" or "mime").
    pub item_type: Option<String>,
    /// Content type for "mime" items (e.g., "application/rdf+xml").
    pub content_type: Option<String>,
    /// Payload length in bytes.
    pub size: usize,
}

impl BlockInfo {
    /// Check if this block holds Exif data.
    pub fn is_exif(&self) -> bool {
        self.item_type.as_deref() == Some(EXIF_FILTER)
    }

    /// Check if this block looks like an XMP packet.
    pub fn is_xmp(&self) -> bool {
        self.content_type.as_deref() == Some("application/rdf+xml")
    }
}
