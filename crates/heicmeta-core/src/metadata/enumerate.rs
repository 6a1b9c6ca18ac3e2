//! Metadata block enumeration.

use log::trace;

use super::{BlockInfo, MetadataId, MetadataSource};

/// Count the metadata blocks of a source, optionally restricted to one type.
pub fn count_blocks<S: MetadataSource + ?Sized>(source: &S, type_filter: Option<&str>) -> usize {
    let n = source.block_count(type_filter);
    trace!("{n} metadata block(s) for filter {type_filter:?}");
    n
}

/// List the identifiers of the matching metadata blocks.
///
/// The order is whatever the codec reports; it is not sorted. A source with
/// no matching blocks yields an empty vector.
pub fn list_ids<S: MetadataSource + ?Sized>(
    source: &S,
    type_filter: Option<&str>,
) -> Vec<MetadataId> {
    if count_blocks(source, type_filter) == 0 {
        return Vec::new();
    }
    source.block_ids(type_filter)
}

/// Describe every matching block (type, content type and payload size).
pub fn describe_blocks<S: MetadataSource + ?Sized>(
    source: &S,
    type_filter: Option<&str>,
) -> Vec<BlockInfo> {
    list_ids(source, type_filter)
        .into_iter()
        .map(|id| BlockInfo {
            id,
            item_type: source.block_type(id),
            content_type: source.block_content_type(id),
            size: source.block_size(id).unwrap_or(0),
        })
        .collect()
}
