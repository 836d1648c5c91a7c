//! Color schemes and their palettes.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Light or dark appearance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Light,
    Dark,
}

impl ColorScheme {
    /// The other scheme.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Palette for this scheme.
    #[must_use]
    pub const fn theme(self) -> &'static Theme {
        match self {
            Self::Light => &LIGHT_THEME,
            Self::Dark => &DARK_THEME,
        }
    }
}

/// Error returned when parsing an unknown [`ColorScheme`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid color scheme: {0} (expected `light` or `dark`)")]
pub struct ColorSchemeError(String);

impl FromStr for ColorScheme {
    type Err = ColorSchemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(ColorSchemeError(other.to_string())),
        }
    }
}

impl std::fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Light => write!(f, "light"),
            Self::Dark => write!(f, "dark"),
        }
    }
}

/// Named colors as `#RRGGBB` strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Colors {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub background: &'static str,
    pub surface: &'static str,
    pub text: &'static str,
    pub text_secondary: &'static str,
    pub border: &'static str,
    pub error: &'static str,
    pub success: &'static str,
    pub card: &'static str,
    pub shadow: &'static str,
}

/// Spacing scale in points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Spacing {
    pub xs: u16,
    pub sm: u16,
    pub md: u16,
    pub lg: u16,
    pub xl: u16,
}

/// Corner radii in points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BorderRadius {
    pub sm: u16,
    pub md: u16,
    pub lg: u16,
}

/// A complete palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Theme {
    pub colors: Colors,
    pub spacing: Spacing,
    pub border_radius: BorderRadius,
}

const SPACING: Spacing = Spacing {
    xs: 4,
    sm: 8,
    md: 16,
    lg: 24,
    xl: 32,
};

const BORDER_RADIUS: BorderRadius = BorderRadius { sm: 4, md: 8, lg: 16 };

pub const LIGHT_THEME: Theme = Theme {
    colors: Colors {
        primary: "#007AFF",
        secondary: "#5856D6",
        background: "#FFFFFF",
        surface: "#F2F2F7",
        text: "#000000",
        text_secondary: "#6E6E73",
        border: "#C6C6C8",
        error: "#FF3B30",
        success: "#34C759",
        card: "#FFFFFF",
        shadow: "#000000",
    },
    spacing: SPACING,
    border_radius: BORDER_RADIUS,
};

pub const DARK_THEME: Theme = Theme {
    colors: Colors {
        primary: "#0A84FF",
        secondary: "#5E5CE6",
        background: "#000000",
        surface: "#1C1C1E",
        text: "#FFFFFF",
        text_secondary: "#98989D",
        border: "#38383A",
        error: "#FF453A",
        success: "#32D74B",
        card: "#1C1C1E",
        shadow: "#000000",
    },
    spacing: SPACING,
    border_radius: BORDER_RADIUS,
};
