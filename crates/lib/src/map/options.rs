//! Construction options for nested maps.

use serde::{Deserialize, Serialize};

/// Options fixed when a [`NestedMap`](super::NestedMap) is created.
///
/// `Options` derives serde so it can be embedded in a caller's own
/// configuration. Missing fields fall back to the defaults.
///
/// ```
/// use dottable::{NestedMap, map::Options};
///
/// let options: Options = serde_json::from_str(r#"{"autoconvert": false}"#).unwrap();
/// let map = NestedMap::with_options(options);
/// assert!(!map.autoconvert());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Wrap nested mappings (and mappings inside sequences) into nested maps
    pub autoconvert: bool,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to set the auto-conversion flag
    pub fn with_autoconvert(mut self, autoconvert: bool) -> Self {
        self.autoconvert = autoconvert;
        self
    }
}

impl Default for Options {
    fn default() -> Self {
        Self { autoconvert: true }
    }
}
