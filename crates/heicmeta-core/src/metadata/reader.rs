//! Borrowed access to one image handle's metadata.

use log::debug;

use super::enumerate::{count_blocks, describe_blocks, list_ids};
use super::fetch::fetch_block;
use super::{BlockInfo, MetadataError, MetadataId, MetadataSource, EXIF_FILTER};
use crate::apple::{SolarSchedule, TimeSchedule};
use crate::exif_block::{parse_exif, ExifSummary};
use crate::plist_value::PlistDict;
use crate::xmp::{decode_payload, DecoderConfig, APPLE_SOLAR_XPATH, APPLE_TIME_XPATH};

/// Metadata operations on a borrowed image handle.
///
/// The reader holds `&'h S`, so every codec call it makes happens while the
/// handle is alive. Identifiers it returns belong to this handle only.
///
/// # Example
///
/// ```ignore
/// use heicmeta_core::{MemorySource, MetadataReader};
///
/// let mut source = MemorySource::new();
/// let id = source.push_mime("application/rdf+xml", xmp_bytes);
///
/// let reader = MetadataReader::new(&source);
/// let schedule = reader.apple_time(id)?;
/// ```
#[derive(Debug)]
pub struct MetadataReader<'h, S: MetadataSource + ?Sized> {
    source: &'h S,
    config: DecoderConfig,
}

impl<'h, S: MetadataSource + ?Sized> MetadataReader<'h, S> {
    /// Create a reader with the default decoder configuration.
    pub fn new(source: &'h S) -> Self {
        Self {
            source,
            config: DecoderConfig::default(),
        }
    }

    /// Replace the decoder configuration.
    pub fn with_config(mut self, config: DecoderConfig) -> Self {
        self.config = config;
        self
    }

    /// Decoder configuration used by every decode call.
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Number of metadata blocks; `None` counts every block.
    pub fn count(&self, type_filter: Option<&str>) -> usize {
        count_blocks(self.source, type_filter)
    }

    /// Identifiers of the matching metadata blocks, in codec order.
    pub fn ids(&self, type_filter: Option<&str>) -> Vec<MetadataId> {
        list_ids(self.source, type_filter)
    }

    /// Number of Exif blocks.
    pub fn exif_count(&self) -> usize {
        self.count(Some(EXIF_FILTER))
    }

    /// Identifiers of the Exif blocks.
    pub fn exif_ids(&self) -> Vec<MetadataId> {
        self.ids(Some(EXIF_FILTER))
    }

    /// Identifiers of blocks whose content type marks them as XMP.
    pub fn xmp_ids(&self) -> Vec<MetadataId> {
        describe_blocks(self.source, None)
            .into_iter()
            .filter(BlockInfo::is_xmp)
            .map(|b| b.id)
            .collect()
    }

    /// Describe the matching metadata blocks.
    pub fn blocks(&self, type_filter: Option<&str>) -> Vec<BlockInfo> {
        describe_blocks(self.source, type_filter)
    }

    /// Copy the raw payload of one block.
    ///
    /// See [`fetch_block`] for the empty-handle policy.
    pub fn fetch(&self, id: MetadataId) -> Result<Vec<u8>, MetadataError> {
        fetch_block(self.source, id)
    }

    /// Decode the property list selected by `expression` in block `id`.
    pub fn metadata_map(&self, id: MetadataId, expression: &str) -> Result<PlistDict, MetadataError> {
        debug!("Decoding metadata block {id} at {expression}");
        let payload = self.fetch(id)?;
        decode_payload(&payload, expression, &self.config)
    }

    /// Decode the `apple_desktop:h24` property list.
    pub fn apple_time(&self, id: MetadataId) -> Result<PlistDict, MetadataError> {
        self.metadata_map(id, APPLE_TIME_XPATH)
    }

    /// Decode the `apple_desktop:solar` property list.
    pub fn apple_solar(&self, id: MetadataId) -> Result<PlistDict, MetadataError> {
        self.metadata_map(id, APPLE_SOLAR_XPATH)
    }

    /// Decode and interpret the time-of-day schedule.
    pub fn time_schedule(&self, id: MetadataId) -> Result<TimeSchedule, MetadataError> {
        TimeSchedule::from_dict(&self.apple_time(id)?)
    }

    /// Decode and interpret the solar schedule.
    pub fn solar_schedule(&self, id: MetadataId) -> Result<SolarSchedule, MetadataError> {
        SolarSchedule::from_dict(&self.apple_solar(id)?)
    }

    /// Parse an Exif block.
    pub fn read_exif(&self, id: MetadataId) -> Result<::exif::Exif, MetadataError> {
        parse_exif(&self.fetch(id)?)
    }

    /// Summarize an Exif block.
    pub fn exif_summary(&self, id: MetadataId) -> Result<ExifSummary, MetadataError> {
        self.read_exif(id).map(|exif| ExifSummary::from_exif(&exif))
    }
}
