//! Page writing pipeline for the waypoint site generator.
//!
//! [`PageWriter`] turns structured content into the published output tree:
//! it renders learning paths, guides and navigation fragments through the
//! injected [`TemplateStore`](waypoint_templates::TemplateStore) and
//! materializes the results through the injected
//! [`Storage`](waypoint_storage::Storage) port.
//!
//! Every operation is fail-fast: the first error aborts the operation and
//! propagates to the caller, leaving whatever was already written in place.
//! There is no retry and no cleanup of partial output.

mod writer;

pub use writer::{GUIDE_INDEX_FILE, PageWriter, ROOT_CARDS_FILE, WriteError};
