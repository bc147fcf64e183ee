//! Document I/O for composition
//!
//! Decoding and encoding of PDF bytes, plus the per-page facts the
//! reconciler and compositor need: page order and page boxes.

use crate::constants::{DEFAULT_PAGE_DIMENSIONS, MAX_PAGE_TREE_DEPTH};
use crate::types::*;
use lopdf::{Document, Object, ObjectId};
use std::path::Path;

/// A decoded input document with its pages resolved in order
#[derive(Debug, Clone)]
pub struct SourceDocument {
    doc: Document,
    role: DocumentRole,
    page_ids: Vec<ObjectId>,
    media_boxes: Vec<[f32; 4]>,
    dimensions: Vec<(f32, f32)>,
}

impl SourceDocument {
    /// Decode PDF bytes
    pub fn decode(bytes: &[u8], role: DocumentRole) -> Result<Self> {
        let doc =
            Document::load_mem(bytes).map_err(|source| OverlayError::Decode { role, source })?;
        Ok(Self::from_document(doc, role))
    }

    /// Wrap an already loaded document
    pub fn from_document(doc: Document, role: DocumentRole) -> Self {
        let page_ids: Vec<ObjectId> = doc.get_pages().values().copied().collect();
        let media_boxes: Vec<[f32; 4]> = page_ids
            .iter()
            .enumerate()
            .map(|(idx, &id)| {
                effective_media_box(&doc, id).unwrap_or_else(|| {
                    log::warn!(
                        "{} page {} has no usable MediaBox, assuming US Letter",
                        role,
                        idx + 1
                    );
                    default_media_box()
                })
            })
            .collect();
        let dimensions = media_boxes.iter().map(box_dimensions).collect();

        log::debug!("{} document has {} pages", role, page_ids.len());

        Self {
            doc,
            role,
            page_ids,
            media_boxes,
            dimensions,
        }
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn role(&self) -> DocumentRole {
        self.role
    }

    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.page_ids.is_empty()
    }

    /// Object id of the page at 0-based `index`
    pub fn page_id(&self, index: usize) -> Result<ObjectId> {
        self.page_ids
            .get(index)
            .copied()
            .ok_or_else(|| self.index_error(index))
    }

    /// Page size (width, height) in points
    pub fn page_dimensions(&self, index: usize) -> Result<(f32, f32)> {
        self.dimensions
            .get(index)
            .copied()
            .ok_or_else(|| self.index_error(index))
    }

    /// Page box as `[llx, lly, urx, ury]`
    pub fn media_box(&self, index: usize) -> Result<[f32; 4]> {
        self.media_boxes
            .get(index)
            .copied()
            .ok_or_else(|| self.index_error(index))
    }

    /// Dimensions of every page, in page order
    pub fn dimensions(&self) -> &[(f32, f32)] {
        &self.dimensions
    }

    fn index_error(&self, index: usize) -> OverlayError {
        OverlayError::PageIndex {
            index,
            page_count: self.page_count(),
        }
    }
}

/// Serialize a document to PDF bytes
pub fn encode(doc: &mut Document) -> Result<Vec<u8>> {
    let mut writer = Vec::new();
    doc.save_to(&mut writer).map_err(OverlayError::Encode)?;
    Ok(writer)
}

/// Load a PDF document from disk
pub async fn load_pdf(path: impl AsRef<Path>, role: DocumentRole) -> Result<SourceDocument> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path).await?;
    let doc = tokio::task::spawn_blocking(move || SourceDocument::decode(&bytes, role)).await??;
    Ok(doc)
}

/// Save the composed document
pub async fn save_pdf(mut doc: Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::task::spawn_blocking(move || encode(&mut doc)).await??;
    tokio::fs::write(&path, bytes).await?;
    Ok(())
}

// =============================================================================
// Page Attributes
// =============================================================================

/// Look up a page attribute, following the `Parent` chain for inherited keys
/// (`MediaBox`, `Resources`, `CropBox`, `Rotate`).
pub(crate) fn inherited_attribute<'a>(
    doc: &'a Document,
    page_id: ObjectId,
    key: &[u8],
) -> Option<&'a Object> {
    let mut current = doc.get_dictionary(page_id).ok()?;
    for _ in 0..MAX_PAGE_TREE_DEPTH {
        if let Ok(value) = current.get(key) {
            return doc.dereference(value).ok().map(|(_, obj)| obj);
        }
        let parent_id = current.get(b"Parent").and_then(|p| p.as_reference()).ok()?;
        current = doc.get_dictionary(parent_id).ok()?;
    }
    None
}

/// The page's MediaBox, normalized so that `llx <= urx` and `lly <= ury`
pub(crate) fn effective_media_box(doc: &Document, page_id: ObjectId) -> Option<[f32; 4]> {
    let array = inherited_attribute(doc, page_id, b"MediaBox")?.as_array().ok()?;
    if array.len() != 4 {
        return None;
    }

    let mut values = [0.0f32; 4];
    for (slot, obj) in values.iter_mut().zip(array) {
        let resolved = doc.dereference(obj).ok()?.1;
        *slot = extract_number(resolved)?;
    }

    let [x0, y0, x1, y1] = values;
    let normalized = [x0.min(x1), y0.min(y1), x0.max(x1), y0.max(y1)];
    if normalized[2] - normalized[0] <= 0.0 || normalized[3] - normalized[1] <= 0.0 {
        return None;
    }
    Some(normalized)
}

/// MediaBox for US Letter at the origin
pub(crate) fn default_media_box() -> [f32; 4] {
    [0.0, 0.0, DEFAULT_PAGE_DIMENSIONS.0, DEFAULT_PAGE_DIMENSIONS.1]
}

fn box_dimensions(media_box: &[f32; 4]) -> (f32, f32) {
    (media_box[2] - media_box[0], media_box[3] - media_box[1])
}

/// Extract numeric value from a PDF object
fn extract_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}
