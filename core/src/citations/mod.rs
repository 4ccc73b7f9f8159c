//! Citation handling
//!
//! Derives display entries from an answer's search metadata and tracks which
//! citation panels are expanded in the view.

pub mod extract;
pub mod viewer;

pub use extract::{extract_citations, Citation};
pub use viewer::{CitationEntry, CitationPanel, CitationViewer};
