//! PDF rendering for composition
//!
//! This module handles all lopdf-level work:
//! - Creating Form XObjects from source pages and blank placeholders
//! - Deep copying resources between documents
//! - Building composed output pages and the page tree

mod page;
mod xobject;

pub use page::{Layer, render_composed_page, write_page_tree};
pub use xobject::{CopyCache, copy_object_deep, create_blank_xobject, create_page_xobject};
