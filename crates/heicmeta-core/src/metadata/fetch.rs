//! Metadata payload retrieval.

use log::debug;

use super::{MetadataError, MetadataId, MetadataSource};

/// Copy the payload of one metadata block into caller-owned memory.
///
/// A source with no metadata blocks at all yields an empty payload for any
/// id. Otherwise an id the source does not report is `NotFound`.
///
/// The scratch buffer is sized exactly to the reported length and is owned by
/// this call, so it is released on every exit path.
pub fn fetch_block<S: MetadataSource + ?Sized>(
    source: &S,
    id: MetadataId,
) -> Result<Vec<u8>, MetadataError> {
    if source.block_count(None) == 0 {
        debug!("No metadata blocks; block {id} is empty");
        return Ok(Vec::new());
    }

    let size = source.block_size(id).ok_or(MetadataError::NotFound(id))?;
    let mut buf = vec![0u8; size];
    source.copy_block(id, &mut buf)?;
    debug!("Fetched {size} byte(s) from metadata block {id}");
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::MemorySource;

    #[test]
    fn test_fetch_empty_source_returns_empty() {
        let source = MemorySource::new();
        assert_eq!(fetch_block(&source, MetadataId(1)).unwrap(), Vec::<u8>::new());
        assert_eq!(fetch_block(&source, MetadataId(42)).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_fetch_unknown_id() {
        let mut source = MemorySource::new();
        source.push("Exif", vec![1, 2, 3]);
        assert!(matches!(
            fetch_block(&source, MetadataId(9)),
            Err(MetadataError::NotFound(MetadataId(9)))
        ));
    }

    #[test]
    fn test_fetch_exact_bytes() {
        let mut source = MemorySource::new();
        let id = source.push("mime", b"<x/>\0".to_vec());
        assert_eq!(fetch_block(&source, id).unwrap(), b"<x/>\0".to_vec());
    }

    #[test]
    fn test_fetch_is_idempotent() {
        let mut source = MemorySource::new();
        let id = source.push("mime", (0..=255).collect());
        let first = fetch_block(&source, id).unwrap();
        let second = fetch_block(&source, id).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 256);
    }

    #[test]
    fn test_fetch_zero_length_block() {
        let mut source = MemorySource::new();
        let id = source.push("Exif", Vec::new());
        assert!(fetch_block(&source, id).unwrap().is_empty());
    }
}
