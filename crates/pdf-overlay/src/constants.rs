//! Shared constants for page composition

// =============================================================================
// Default Page Dimensions
// =============================================================================

/// Default page width in points (US Letter: 8.5" × 11")
pub const DEFAULT_PAGE_WIDTH_PT: f32 = 612.0;

/// Default page height in points (US Letter)
pub const DEFAULT_PAGE_HEIGHT_PT: f32 = 792.0;

/// Default page dimensions as tuple (width, height)
pub const DEFAULT_PAGE_DIMENSIONS: (f32, f32) = (DEFAULT_PAGE_WIDTH_PT, DEFAULT_PAGE_HEIGHT_PT);

// =============================================================================
// Output Resources
// =============================================================================

/// XObject resource name of the background layer on each output page
pub const BACKGROUND_XOBJECT_NAME: &str = "BG";

/// XObject resource name of the foreground layer on each output page
pub const FOREGROUND_XOBJECT_NAME: &str = "FG";

/// PDF version written for composed documents
pub const OUTPUT_PDF_VERSION: &str = "1.7";

// =============================================================================
// Page Tree
// =============================================================================

/// Upper bound on `Parent` hops when resolving inherited page attributes.
/// Guards against cyclic page trees in malformed files.
pub const MAX_PAGE_TREE_DEPTH: usize = 64;
