//! The seam between metadata extraction and the codec that owns the image.
//!
//! [`MetadataSource`] mirrors the metadata calls libheif exposes on an image
//! handle. The native adapter lives behind the `libheif` feature;
//! [`MemorySource`] holds blocks that were extracted elsewhere.

use super::{MetadataError, MetadataId};

/// Read-only access to the metadata blocks of one image handle.
///
/// A `type_filter` of `None` means no filtering. Identifiers returned by
/// [`block_ids`](Self::block_ids) are only meaningful for the same source.
pub trait MetadataSource {
    /// Number of metadata blocks, optionally restricted to one item type.
    fn block_count(&self, type_filter: Option<&str>) -> usize;

    /// Identifiers of the matching blocks, in the order the codec reports them.
    fn block_ids(&self, type_filter: Option<&str>) -> Vec<MetadataId>;

    /// Payload length of a block, or `None` if the id is unknown.
    fn block_size(&self, id: MetadataId) -> Option<usize>;

    /// Copy a block's payload into `out`, which must be exactly
    /// [`block_size`](Self::block_size) bytes long.
    fn copy_block(&self, id: MetadataId, out: &mut [u8]) -> Result<(), MetadataError>;

    /// Item type of a block (e.g., "Exif" or "mime").
    fn block_type(&self, _id: MetadataId) -> Option<String> {
        None
    }

    /// Content type of a "mime" block.
    fn block_content_type(&self, _id: MetadataId) -> Option<String> {
        None
    }
}

#[derive(Debug, Clone)]
struct MemoryBlock {
    id: MetadataId,
    item_type: String,
    content_type: Option<String>,
    data: Vec<u8>,
}

/// In-memory metadata set.
///
/// Identifiers are assigned sequentially starting at 1, matching how HEIF
/// item ids are numbered.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    blocks: Vec<MemoryBlock>,
}

impl MemorySource {
    /// Create an empty metadata set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a block and return its identifier.
    pub fn push(&mut self, item_type: impl Into<String>, data: Vec<u8>) -> MetadataId {
        self.push_block(item_type.into(), None, data)
    }

    /// Add a "mime" block with a content type (XMP uses `application/rdf+xml`).
    pub fn push_mime(&mut self, content_type: impl Into<String>, data: Vec<u8>) -> MetadataId {
        self.push_block("mime".to_string(), Some(content_type.into()), data)
    }

    /// Number of blocks held.
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// Check if no blocks are held.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    fn push_block(
        &mut self,
        item_type: String,
        content_type: Option<String>,
        data: Vec<u8>,
    ) -> MetadataId {
        let id = MetadataId(self.blocks.len() as u32 + 1);
        self.blocks.push(MemoryBlock {
            id,
            item_type,
            content_type,
            data,
        });
        id
    }

    fn block(&self, id: MetadataId) -> Option<&MemoryBlock> {
        self.blocks.iter().find(|b| b.id == id)
    }

    fn matching<'a>(&'a self, type_filter: Option<&'a str>) -> impl Iterator<Item = &'a MemoryBlock> {
        self.blocks
            .iter()
            .filter(move |b| type_filter.map_or(true, |t| b.item_type == t))
    }
}

impl MetadataSource for MemorySource {
    fn block_count(&self, type_filter: Option<&str>) -> usize {
        self.matching(type_filter).count()
    }

    fn block_ids(&self, type_filter: Option<&str>) -> Vec<MetadataId> {
        self.matching(type_filter).map(|b| b.id).collect()
    }

    fn block_size(&self, id: MetadataId) -> Option<usize> {
        self.block(id).map(|b| b.data.len())
    }

    fn copy_block(&self, id: MetadataId, out: &mut [u8]) -> Result<(), MetadataError> {
        let block = self.block(id).ok_or(MetadataError::NotFound(id))?;
        if out.len() != block.data.len() {
            return Err(MetadataError::Codec(format!(
                "buffer of {} bytes for block {} of {} bytes",
                out.len(),
                id,
                block.data.len()
            )));
        }
        out.copy_from_slice(&block.data);
        Ok(())
    }

    fn block_type(&self, id: MetadataId) -> Option<String> {
        self.block(id).map(|b| b.item_type.clone())
    }

    fn block_content_type(&self, id: MetadataId) -> Option<String> {
        self.block(id).and_then(|b| b.content_type.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_sequential() {
        let mut source = MemorySource::new();
        assert_eq!(source.push("Exif", vec![1]), MetadataId(1));
        assert_eq!(source.push_mime("application/rdf+xml", vec![2]), MetadataId(2));
        assert_eq!(source.len(), 2);
    }

    #[test]
    fn test_filtering() {
        let mut source = MemorySource::new();
        source.push("Exif", vec![1]);
        source.push_mime("application/rdf+xml", vec![2, 3]);
        source.push("Exif", vec![4]);

        assert_eq!(source.block_count(None), 3);
        assert_eq!(source.block_count(Some("Exif")), 2);
        assert_eq!(source.block_count(Some("iptc")), 0);
        assert_eq!(
            source.block_ids(Some("Exif")),
            vec![MetadataId(1), MetadataId(3)]
        );
    }

    #[test]
    fn test_copy_block_exact_size() {
        let mut source = MemorySource::new();
        let id = source.push("mime", vec![9, 8, 7]);

        let mut buf = vec![0u8; 3];
        source.copy_block(id, &mut buf).unwrap();
        assert_eq!(buf, vec![9, 8, 7]);

        let mut short = vec![0u8; 2];
        assert!(matches!(
            source.copy_block(id, &mut short),
            Err(MetadataError::Codec(_))
        ));
    }

    #[test]
    fn test_unknown_block() {
        let source = MemorySource::new();
        assert_eq!(source.block_size(MetadataId(1)), None);
        assert!(matches!(
            source.copy_block(MetadataId(1), &mut []),
            Err(MetadataError::NotFound(MetadataId(1)))
        ));
        assert_eq!(source.block_type(MetadataId(1)), None);
    }

    #[test]
    fn test_block_types() {
        let mut source = MemorySource::new();
        let exif = source.push("Exif", vec![]);
        let xmp = source.push_mime("application/rdf+xml", vec![]);

        assert_eq!(source.block_type(exif).as_deref(), Some("Exif"));
        assert_eq!(source.block_content_type(exif), None);
        assert_eq!(source.block_type(xmp).as_deref(), Some("mime"));
        assert_eq!(
            source.block_content_type(xmp).as_deref(),
            Some("application/rdf+xml")
        );
    }
}
