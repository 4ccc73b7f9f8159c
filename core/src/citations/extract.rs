// Citation extraction
// Maps search metadata to the entries shown under an answer

use crate::state::SearchMetadataItem;
use serde::Serialize;

/// Display entry for one source
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Citation {
    /// Source document name
    pub title: String,
    /// Opaque value the backend attached to the source
    pub value: serde_json::Value,
}

/// Map each metadata item to a citation, preserving order
///
/// Absent or empty metadata yields no citations.
pub fn extract_citations(search_metadata: Option<&[SearchMetadataItem]>) -> Vec<Citation> {
    search_metadata
        .unwrap_or_default()
        .iter()
        .map(|item| Citation {
            title: item.filename.clone(),
            value: item.raw_value.clone(),
        })
        .collect()
}
