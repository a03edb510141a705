//! Options shared by every resolution step.

use tokenweave_core::{ConversionSettings, TokenConfig};

/// Alias chains longer than this are treated as circular.
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Everything a resolution call may need beyond the data itself.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionContext {
    /// Maximum number of alias hops.
    pub max_depth: usize,
    /// Formatting defaults that per-token directives are merged over.
    pub defaults: TokenConfig,
}

impl Default for ResolutionContext {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            defaults: TokenConfig::default(),
        }
    }
}

impl ResolutionContext {
    pub fn new(defaults: TokenConfig) -> Self {
        Self {
            defaults,
            ..Default::default()
        }
    }

    pub fn from_settings(settings: &ConversionSettings) -> Self {
        Self::new(TokenConfig::from_settings(settings))
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
