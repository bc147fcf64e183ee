use crate::geometry::{Adjustment, Transform};
use crate::types::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Overlay configuration
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OverlayOptions {
    // Placement of the foreground layer
    pub adjustment: Adjustment,

    // Page count reconciliation
    pub policy: ReconciliationPolicy,

    // 1-based page that receives the adjustment; all pages when unset
    pub target_page: Option<usize>,
}

impl OverlayOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| OverlayError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| OverlayError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    pub fn transform(&self) -> Transform {
        self.adjustment.resolve()
    }

    pub fn selector(&self) -> TargetSelector {
        TargetSelector::from_target_page(self.target_page)
    }

    /// Validate what can be checked without the documents.
    ///
    /// `target_page` depends on the page counts and is checked at
    /// composition time.
    pub fn validate(&self) -> Result<()> {
        if !self.adjustment.all_finite() {
            return Err(OverlayError::Config(
                "Offsets and scale deltas must be finite numbers".to_string(),
            ));
        }

        self.transform().validate()
    }
}
