use serde::{Deserialize, Serialize};

/// A user command bound to an input binding or issued from a script.
///
/// Actions are distinct from [`crate::HostEvent`]s, which come from the
/// window manager itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Make the focused window the overlay, or release the current one.
    ToggleOverlay,
    /// Release the overlay, unfloating it and restoring focus.
    ForgetOverlay,
    /// Focus the overlay once, bypassing focus suppression.
    FocusOverlay,
    /// Minimize or restore the overlay (or pull it to the current group).
    ToggleFrontBack,
    /// Grow (positive) or shrink (negative) the overlay.
    AdjustSize(i32),
    /// Move the overlay away from (positive) or toward the right edge.
    AdjustPadX(i32),
    /// Move the overlay away from (positive) or toward the top edge.
    AdjustPadY(i32),
    /// Change overlay opacity by a signed fraction.
    AdjustOpacity(f64),
    /// Change the focused window's opacity by a signed fraction.
    AdjustWindowOpacity(f64),
    /// Return every floating window except the overlay to the tiling layout.
    GroundAllFloats,
    /// Raise every floating window of the current group.
    FloatsToFront,
    /// Jump focus between the floating and tiled windows.
    ToggleFocusFloating,
}

impl Action {
    /// Returns whether the action requires an overlay to be set.
    pub fn requires_overlay(&self) -> bool {
        matches!(
            self,
            Self::FocusOverlay
                | Self::ToggleFrontBack
                | Self::AdjustSize(_)
                | Self::AdjustPadX(_)
                | Self::AdjustPadY(_)
                | Self::AdjustOpacity(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Wrapper {
        action: Action,
    }

    #[test]
    fn unit_variants_parse_from_snake_case_strings() {
        // Arrange
        let toml_str = "action = \"toggle_front_back\"\n";

        // Act
        let parsed: Wrapper = toml::from_str(toml_str).unwrap();

        // Assert
        assert_eq!(parsed.action, Action::ToggleFrontBack);
    }

    #[test]
    fn delta_variants_parse_from_inline_tables() {
        // Arrange
        let toml_str = "action = { adjust_pad_x = -3 }\n";

        // Act
        let parsed: Wrapper = toml::from_str(toml_str).unwrap();

        // Assert
        assert_eq!(parsed.action, Action::AdjustPadX(-3));
    }

    #[test]
    fn adjustments_require_overlay() {
        assert!(Action::AdjustSize(1).requires_overlay());
        assert!(Action::AdjustOpacity(0.1).requires_overlay());
        assert!(!Action::ToggleOverlay.requires_overlay());
        assert!(!Action::GroundAllFloats.requires_overlay());
        assert!(!Action::AdjustWindowOpacity(0.1).requires_overlay());
    }
}
