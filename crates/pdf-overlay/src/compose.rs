//! Page composition
//!
//! Realizes a reconciled page sequence as an output document:
//! 1. Validate the target selector and transform (no partial output)
//! 2. Cut a fresh background layer and foreground layer per output page
//! 3. Place the foreground over the background with its effective transform
//! 4. Assemble the pages in reconciled order

use crate::constants::OUTPUT_PDF_VERSION;
use crate::document::SourceDocument;
use crate::geometry::Transform;
use crate::reconcile::{PagePair, PageSlot};
use crate::render::{
    CopyCache, Layer, create_blank_xobject, create_page_xobject, render_composed_page,
    write_page_tree,
};
use crate::types::*;
use lopdf::{Document, ObjectId};

/// Compose reconciled page pairs into a new document.
///
/// Neither source document is modified. Each output page receives its own
/// copy of both layers, so a source page repeated across several indices
/// never carries another index's transform.
pub fn compose(
    foreground: &SourceDocument,
    background: &SourceDocument,
    pairs: &[PagePair],
    transform: Transform,
    selector: TargetSelector,
) -> Result<Document> {
    selector.validate(pairs.len())?;
    transform.validate()?;

    let mut output = Document::with_version(OUTPUT_PDF_VERSION);
    let pages_tree_id = output.new_object_id();

    let mut foreground_cache = CopyCache::new();
    let mut background_cache = CopyCache::new();
    let mut page_ids = Vec::with_capacity(pairs.len());

    for pair in pairs {
        let media_box = page_box(foreground, background, pair)?;

        let background_id = layer_xobject(
            &mut output,
            background,
            pair.background,
            media_box,
            &mut background_cache,
        )?;
        let foreground_id = layer_xobject(
            &mut output,
            foreground,
            pair.foreground,
            media_box,
            &mut foreground_cache,
        )?;
        let effective = selector.transform_for(pair.index, transform);

        log::debug!(
            "Page {}: foreground {:?} over background {:?} with {:?}",
            pair.index + 1,
            pair.foreground,
            pair.background,
            effective
        );

        let page_id = render_composed_page(
            &mut output,
            pages_tree_id,
            media_box,
            background_id,
            Layer {
                xobject_id: foreground_id,
                transform: effective,
            },
        );
        page_ids.push(page_id);
    }

    write_page_tree(&mut output, pages_tree_id, &page_ids);

    Ok(output)
}

/// The output page box: the background page's box, or the foreground
/// page's full box (origin included) when the background is padded
fn page_box(
    foreground: &SourceDocument,
    background: &SourceDocument,
    pair: &PagePair,
) -> Result<[f32; 4]> {
    match (pair.background, pair.foreground) {
        (PageSlot::Page(idx), _) => background.media_box(idx),
        (PageSlot::Blank { .. }, PageSlot::Page(idx)) => foreground.media_box(idx),
        (PageSlot::Blank { width, height }, PageSlot::Blank { .. }) => {
            Ok([0.0, 0.0, width, height])
        }
    }
}

/// A padded blank takes the output page box so it lines up with its
/// counterpart
fn layer_xobject(
    output: &mut Document,
    source: &SourceDocument,
    slot: PageSlot,
    page_box: [f32; 4],
    cache: &mut CopyCache,
) -> Result<ObjectId> {
    match slot {
        PageSlot::Page(idx) => create_page_xobject(output, source, idx, cache),
        PageSlot::Blank { .. } => Ok(create_blank_xobject(output, page_box)),
    }
}
