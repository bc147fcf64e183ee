//! Overlay entry points
//!
//! Ties the pieces together: resolve the transform, reconcile page counts,
//! compose, and encode.

use crate::compose::compose;
use crate::document::{SourceDocument, encode, load_pdf, save_pdf};
use crate::options::OverlayOptions;
use crate::reconcile::reconcile;
use crate::stats::statistics_for;
use crate::types::*;
use lopdf::Document;
use std::path::Path;

/// Overlay the foreground PDF onto the background PDF and return the
/// composed PDF bytes.
pub fn compose_overlay(
    foreground_bytes: &[u8],
    background_bytes: &[u8],
    options: &OverlayOptions,
) -> Result<Vec<u8>> {
    options.validate()?;

    let foreground = SourceDocument::decode(foreground_bytes, DocumentRole::Foreground)?;
    let background = SourceDocument::decode(background_bytes, DocumentRole::Background)?;

    let (mut output, _) = overlay_documents(&foreground, &background, options)?;
    encode(&mut output)
}

/// Overlay two decoded documents
pub fn overlay_documents(
    foreground: &SourceDocument,
    background: &SourceDocument,
    options: &OverlayOptions,
) -> Result<(Document, OverlayStatistics)> {
    options.validate()?;

    let transform = options.transform();
    let selector = options.selector();
    log::debug!("Resolved transform {:?} for {:?}", transform, selector);

    let pairs = reconcile(
        foreground.dimensions(),
        background.dimensions(),
        options.policy,
    );
    let stats = statistics_for(foreground, background, &pairs, selector);

    if foreground.is_empty() != background.is_empty() {
        log::warn!(
            "{} document has no pages, padding with blanks",
            if foreground.is_empty() {
                DocumentRole::Foreground
            } else {
                DocumentRole::Background
            }
        );
    }

    let output = compose(foreground, background, &pairs, transform, selector)?;

    log::info!(
        "Composed {} pages ({} foreground, {} background, {} transformed)",
        stats.output_pages,
        stats.foreground_pages,
        stats.background_pages,
        stats.transformed_pages
    );

    Ok((output, stats))
}

/// Overlay PDF files on disk
pub async fn overlay_files(
    foreground_path: impl AsRef<Path>,
    background_path: impl AsRef<Path>,
    output_path: impl AsRef<Path>,
    options: &OverlayOptions,
) -> Result<OverlayStatistics> {
    options.validate()?;

    let foreground = load_pdf(foreground_path, DocumentRole::Foreground).await?;
    let background = load_pdf(background_path, DocumentRole::Background).await?;
    let options = options.clone();

    let (output, stats) = tokio::task::spawn_blocking(move || {
        overlay_documents(&foreground, &background, &options)
    })
    .await??;

    save_pdf(output, output_path).await?;
    Ok(stats)
}
