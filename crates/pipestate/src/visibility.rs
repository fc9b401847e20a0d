use serde::{Deserialize, Serialize};

/// Caller-selected filters for which bindings become rows.
///
/// Captured once at the start of a resolution pass and passed by value to
/// every resolver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VisibilityConfig {
    /// Show slots that have something bound but are not referenced by the shader.
    pub show_disabled: bool,
    /// Show slots with nothing bound.
    pub show_empty: bool,
}

impl VisibilityConfig {
    pub fn new(show_disabled: bool, show_empty: bool) -> Self {
        Self {
            show_disabled,
            show_empty,
        }
    }

    /// Shows every slot, used or not.
    pub fn everything() -> Self {
        Self::new(true, true)
    }

    pub fn should_show(self, filled: bool, used: bool) -> bool {
        should_show(filled, used, self)
    }
}

pub fn should_show(filled: bool, used: bool, cfg: VisibilityConfig) -> bool {
    used || (cfg.show_disabled && filled && !used) || (cfg.show_empty && !filled)
}
