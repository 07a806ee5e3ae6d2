//! Text size tiers understood by every renderer.

use serde::{Deserialize, Serialize};

/// Relative text size. Renderers map each tier to a concrete font.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SizeTier {
    /// Screen titles
    Large,
    /// Body lines
    Medium,
    /// Page indicator and footnotes
    Small,
}
