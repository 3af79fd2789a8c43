//! Theme configuration for the desktop app

/// Resolved theme (light or dark)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolvedTheme {
    #[default]
    Light,
    Dark,
}

impl ResolvedTheme {
    /// Check if the theme is dark
    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    /// The opposite theme, for the toggle affordance
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Get the color palette for this theme
    #[must_use]
    pub const fn palette(self) -> &'static ColorPalette {
        match self {
            Self::Light => &LIGHT_PALETTE,
            Self::Dark => &DARK_PALETTE,
        }
    }
}

/// Color palette for the application
#[derive(Debug, Clone, Copy)]
#[allow(dead_code)] // All colors defined for completeness, not all used yet
pub struct ColorPalette {
    pub bg_primary: &'static str,
    pub bg_secondary: &'static str,
    pub bg_tertiary: &'static str,
    pub text_primary: &'static str,
    pub text_secondary: &'static str,
    pub text_muted: &'static str,
    pub border: &'static str,
    pub accent: &'static str,
    pub accent_text: &'static str,
    pub error: &'static str,
    pub success: &'static str,
}

/// Light theme colors
pub const LIGHT_PALETTE: ColorPalette = ColorPalette {
    bg_primary: "#ffffff",
    bg_secondary: "#f7f7f5",
    bg_tertiary: "#efeeec",
    text_primary: "#1c1c1c",
    text_secondary: "#57534e",
    text_muted: "#a8a29e",
    border: "#d6d3d1",
    accent: "#0f766e",
    accent_text: "#ffffff",
    error: "#b91c1c",
    success: "#15803d",
};

/// Dark theme colors
pub const DARK_PALETTE: ColorPalette = ColorPalette {
    bg_primary: "#191918",
    bg_secondary: "#222221",
    bg_tertiary: "#2c2c2a",
    text_primary: "#e7e5e4",
    text_secondary: "#a8a29e",
    text_muted: "#78716c",
    border: "#44403c",
    accent: "#2dd4bf",
    accent_text: "#191918",
    error: "#f87171",
    success: "#4ade80",
};
