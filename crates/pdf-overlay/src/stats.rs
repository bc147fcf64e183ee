use crate::document::SourceDocument;
use crate::options::OverlayOptions;
use crate::reconcile::{PagePair, padding_counts, reconcile};
use crate::types::*;

/// Calculate page accounting for an overlay without composing it
pub fn calculate_statistics(
    foreground: &SourceDocument,
    background: &SourceDocument,
    options: &OverlayOptions,
) -> Result<OverlayStatistics> {
    let pairs = reconcile(
        foreground.dimensions(),
        background.dimensions(),
        options.policy,
    );
    let selector = options.selector();
    selector.validate(pairs.len())?;

    Ok(statistics_for(foreground, background, &pairs, selector))
}

pub(crate) fn statistics_for(
    foreground: &SourceDocument,
    background: &SourceDocument,
    pairs: &[PagePair],
    selector: TargetSelector,
) -> OverlayStatistics {
    let (padded_foreground, padded_background) = padding_counts(pairs);
    let transformed_pages = pairs
        .iter()
        .filter(|pair| selector.applies_to(pair.index))
        .count();

    OverlayStatistics {
        foreground_pages: foreground.page_count(),
        background_pages: background.page_count(),
        output_pages: pairs.len(),
        padded_foreground,
        padded_background,
        transformed_pages,
    }
}
