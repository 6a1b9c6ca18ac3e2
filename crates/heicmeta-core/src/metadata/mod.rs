//! Metadata block enumeration and retrieval.
//!
//! This module provides functionality for:
//! - Counting and listing metadata blocks, optionally by item type
//! - Copying a block's raw payload out of the codec
//! - Decoding Apple XMP property lists from a block (via [`MetadataReader`])
//!
//! # Architecture
//!
//! The codec is reached through the [`MetadataSource`] trait. A
//! [`MetadataReader`] borrows a source for its whole lifetime, so a handle can
//! never be released while a reader still uses it. All operations are
//! synchronous; concurrent use of one handle is not assumed to be safe.
//!
//! # Examples
//!
//! ```ignore
//! use heicmeta_core::metadata::{open_primary, MetadataReader};
//!
//! open_primary("wallpaper.heic", |reader| {
//!     for id in reader.xmp_ids() {
//!         println!("{:?}", reader.apple_solar(id));
//!     }
//! })?;
//! ```

mod enumerate;
mod fetch;
#[cfg(feature = "libheif")]
mod native;
mod reader;
mod source;
mod types;

pub use enumerate::{count_blocks, describe_blocks, list_ids};
pub use fetch::fetch_block;
#[cfg(feature = "libheif")]
pub use native::open_primary;
pub use reader::MetadataReader;
pub use source::{MemorySource, MetadataSource};
pub use types::{BlockInfo, MetadataError, MetadataId, EXIF_FILTER};
