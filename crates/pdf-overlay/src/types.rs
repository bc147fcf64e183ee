use crate::geometry::Transform;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OverlayError {
    #[error("Failed to decode {role} document: {source}")]
    Decode {
        role: DocumentRole,
        #[source]
        source: lopdf::Error,
    },
    #[error("Target page {target} is out of range (document has {page_count} pages)")]
    TargetPageOutOfRange { target: usize, page_count: usize },
    #[error("Degenerate transform: scale {scale} must be greater than zero")]
    DegenerateTransform { scale: f32 },
    #[error("Transform offsets must be finite (dx {dx}, dy {dy})")]
    NonFiniteOffset { dx: f32, dy: f32 },
    #[error("Failed to encode output document: {0}")]
    Encode(#[source] std::io::Error),
    #[error("Page index {index} is out of range (document has {page_count} pages)")]
    PageIndex { index: usize, page_count: usize },
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, OverlayError>;

/// Which input a document plays in the composition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentRole {
    /// The document laid on top (the receipt)
    Foreground,
    /// The document underneath (the letterhead)
    Background,
}

impl fmt::Display for DocumentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentRole::Foreground => f.write_str("foreground"),
            DocumentRole::Background => f.write_str("background"),
        }
    }
}

/// How the shorter of the two documents is padded out to the longer one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ReconciliationPolicy {
    /// Reuse the final page of the shorter document for every extra index
    #[default]
    RepeatLastPage,
    /// Synthesize a blank page sized like the counterpart page at that index
    BlankPad,
}

/// Which output pages receive the resolved transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetSelector {
    /// Transform every foreground page
    #[default]
    AllPages,
    /// Transform only the page at this 1-based index; the rest merge as-is
    SinglePage(usize),
}

impl TargetSelector {
    /// `None` selects every page, `Some(n)` selects page `n` (1-based)
    pub fn from_target_page(target_page: Option<usize>) -> Self {
        match target_page {
            Some(n) => TargetSelector::SinglePage(n),
            None => TargetSelector::AllPages,
        }
    }

    /// Check the selector against the number of output pages
    pub fn validate(self, page_count: usize) -> Result<()> {
        match self {
            TargetSelector::AllPages => Ok(()),
            TargetSelector::SinglePage(target) if target >= 1 && target <= page_count => Ok(()),
            TargetSelector::SinglePage(target) => {
                Err(OverlayError::TargetPageOutOfRange { target, page_count })
            }
        }
    }

    /// Whether the output page at 0-based `index` gets the transform
    pub fn applies_to(self, index: usize) -> bool {
        match self {
            TargetSelector::AllPages => true,
            TargetSelector::SinglePage(target) => index + 1 == target,
        }
    }

    /// The transform to use for the output page at 0-based `index`
    pub fn transform_for(self, index: usize, transform: Transform) -> Transform {
        if self.applies_to(index) {
            transform
        } else {
            Transform::IDENTITY
        }
    }
}

/// Page accounting for one composition
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayStatistics {
    /// Pages in the foreground document
    pub foreground_pages: usize,
    /// Pages in the background document
    pub background_pages: usize,
    /// Pages in the composed output
    pub output_pages: usize,
    /// Output pages whose foreground slot was padded
    pub padded_foreground: usize,
    /// Output pages whose background slot was padded
    pub padded_background: usize,
    /// Output pages selected to receive the transform
    pub transformed_pages: usize,
}
