pub mod compose;
mod constants;
pub mod document;
pub mod geometry;
mod options;
pub mod overlay;
pub mod reconcile;
pub mod render;
mod stats;
mod types;

pub use compose::compose;
pub use constants::{BACKGROUND_XOBJECT_NAME, DEFAULT_PAGE_DIMENSIONS, FOREGROUND_XOBJECT_NAME};
pub use document::{SourceDocument, encode, load_pdf, save_pdf};
pub use geometry::{Adjustment, Transform, resolve};
pub use options::*;
pub use overlay::{compose_overlay, overlay_documents, overlay_files};
pub use reconcile::{PagePair, PageSlot, reconcile};
pub use stats::calculate_statistics;
pub use types::*;
