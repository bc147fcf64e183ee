//! Page reconciliation
//!
//! Aligns the foreground and background page sequences into one ordered
//! list of pairs, padding the shorter side according to a
//! [`ReconciliationPolicy`]. Only dimensions are inspected; the documents
//! themselves are never touched.

use crate::constants::DEFAULT_PAGE_DIMENSIONS;
use crate::types::ReconciliationPolicy;

/// One side of a reconciled pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageSlot {
    /// A real page of the source document (0-based)
    Page(usize),
    /// A synthesized blank page
    Blank { width: f32, height: f32 },
}

impl PageSlot {
    pub fn is_blank(&self) -> bool {
        matches!(self, PageSlot::Blank { .. })
    }

    pub fn page_index(&self) -> Option<usize> {
        match self {
            PageSlot::Page(idx) => Some(*idx),
            PageSlot::Blank { .. } => None,
        }
    }
}

/// A foreground slot and a background slot destined for the same output page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PagePair {
    /// Output page index (0-based)
    pub index: usize,
    pub foreground: PageSlot,
    pub background: PageSlot,
}

impl PagePair {
    /// Whether the foreground slot is a repeat or a blank
    pub fn foreground_padded(&self) -> bool {
        self.foreground.page_index() != Some(self.index)
    }

    /// Whether the background slot is a repeat or a blank
    pub fn background_padded(&self) -> bool {
        self.background.page_index() != Some(self.index)
    }

    /// Whether either side was padded rather than taken from its own index
    pub fn is_padded(&self) -> bool {
        self.foreground_padded() || self.background_padded()
    }
}

/// Align two page sequences, given as their page dimensions.
///
/// The result has `max(foreground.len(), background.len())` pairs. When
/// both sides are empty the result is empty.
pub fn reconcile(
    foreground: &[(f32, f32)],
    background: &[(f32, f32)],
    policy: ReconciliationPolicy,
) -> Vec<PagePair> {
    let total = foreground.len().max(background.len());

    (0..total)
        .map(|index| PagePair {
            index,
            foreground: slot_for(index, foreground, background, policy),
            background: slot_for(index, background, foreground, policy),
        })
        .collect()
}

/// Pick the slot for `index` on one side, padding from `counterpart` if needed
fn slot_for(
    index: usize,
    side: &[(f32, f32)],
    counterpart: &[(f32, f32)],
    policy: ReconciliationPolicy,
) -> PageSlot {
    if index < side.len() {
        return PageSlot::Page(index);
    }

    match policy {
        ReconciliationPolicy::RepeatLastPage if !side.is_empty() => PageSlot::Page(side.len() - 1),
        // An empty side has no last page to repeat, so it pads with blanks
        ReconciliationPolicy::RepeatLastPage | ReconciliationPolicy::BlankPad => {
            let (width, height) = counterpart
                .get(index)
                .or_else(|| counterpart.first())
                .copied()
                .unwrap_or(DEFAULT_PAGE_DIMENSIONS);
            PageSlot::Blank { width, height }
        }
    }
}

/// Count padded slots as `(foreground, background)`
pub fn padding_counts(pairs: &[PagePair]) -> (usize, usize) {
    pairs.iter().fold((0, 0), |(fg, bg), pair| {
        (
            fg + usize::from(pair.foreground_padded()),
            bg + usize::from(pair.background_padded()),
        )
    })
}
