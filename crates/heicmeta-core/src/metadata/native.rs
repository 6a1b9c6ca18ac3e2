//! libheif adapter.
//!
//! libheif-rs treats an empty type filter as "no filter", which is how
//! `None` is passed through.

use std::path::Path;

use libheif_rs::{HeifContext, ImageHandle, ItemId};
use log::debug;

use super::{MetadataError, MetadataId, MetadataReader, MetadataSource};

fn filter_str(type_filter: Option<&str>) -> &str {
    type_filter.unwrap_or("")
}

fn codec_error(e: libheif_rs::HeifError) -> MetadataError {
    MetadataError::Codec(e.to_string())
}

impl MetadataSource for ImageHandle {
    fn block_count(&self, type_filter: Option<&str>) -> usize {
        self.number_of_metadata_blocks(filter_str(type_filter)).max(0) as usize
    }

    fn block_ids(&self, type_filter: Option<&str>) -> Vec<MetadataId> {
        let count = self.block_count(type_filter);
        if count == 0 {
            return Vec::new();
        }
        let mut ids: Vec<ItemId> = vec![0; count];
        let n = self.metadata_block_ids(&mut ids, filter_str(type_filter));
        ids.truncate(n);
        ids.into_iter().map(MetadataId).collect()
    }

    fn block_size(&self, id: MetadataId) -> Option<usize> {
        if !self.block_ids(None).contains(&id) {
            return None;
        }
        Some(self.metadata_size(id.get()))
    }

    fn copy_block(&self, id: MetadataId, out: &mut [u8]) -> Result<(), MetadataError> {
        let data = self.metadata(id.get()).map_err(codec_error)?;
        if data.len() != out.len() {
            return Err(MetadataError::Codec(format!(
                "block {} is {} bytes, expected {}",
                id,
                data.len(),
                out.len()
            )));
        }
        out.copy_from_slice(&data);
        Ok(())
    }

    fn block_type(&self, id: MetadataId) -> Option<String> {
        self.metadata_type(id.get()).map(str::to_string)
    }

    fn block_content_type(&self, id: MetadataId) -> Option<String> {
        self.metadata_content_type(id.get()).map(str::to_string)
    }
}

/// Open a HEIC/HEIF file and run `f` against its primary image's metadata.
///
/// The context and handle live for the duration of the call only; the reader
/// cannot escape it.
pub fn open_primary<P, T, F>(path: P, f: F) -> Result<T, MetadataError>
where
    P: AsRef<Path>,
    F: FnOnce(&MetadataReader<'_, ImageHandle>) -> T,
{
    let path = path.as_ref();
    let path_str = path
        .to_str()
        .ok_or_else(|| MetadataError::Codec(format!("Invalid path encoding: {}", path.display())))?;

    let ctx = HeifContext::read_from_file(path_str).map_err(codec_error)?;
    let handle = ctx.primary_image_handle().map_err(codec_error)?;
    let reader = MetadataReader::new(&handle);
    debug!(
        "Opened {} with {} metadata block(s)",
        path.display(),
        reader.count(None)
    );
    Ok(f(&reader))
}
