//! Persisted color scheme preference.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use ticketbox_core::{ColorScheme, Theme};

use crate::storage::{StateStore, load_state, save_state};

/// Storage key for the color scheme preference.
pub const THEME_STORAGE_KEY: &str = "theme-storage";

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ThemeState {
    color_scheme: Option<ColorScheme>,
}

/// Current color scheme and its palette.
pub struct ThemeStore {
    color_scheme: ColorScheme,
    storage: Arc<dyn StateStore>,
}

impl std::fmt::Debug for ThemeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeStore")
            .field("color_scheme", &self.color_scheme)
            .finish_non_exhaustive()
    }
}

impl ThemeStore {
    /// Restore the preference, falling back to `system` and then to light.
    #[must_use]
    pub fn load(storage: Arc<dyn StateStore>, system: Option<ColorScheme>) -> Self {
        let persisted = match load_state::<ThemeState>(storage.as_ref(), THEME_STORAGE_KEY) {
            Ok(state) => state.and_then(|state| state.color_scheme),
            Err(e) => {
                warn!(error = %e, "Discarding unreadable theme state");
                None
            }
        };

        let color_scheme = persisted.or(system).unwrap_or_default();
        debug!(%color_scheme, persisted = persisted.is_some(), "Theme loaded");
        Self {
            color_scheme,
            storage,
        }
    }

    #[must_use]
    pub const fn color_scheme(&self) -> ColorScheme {
        self.color_scheme
    }

    #[must_use]
    pub const fn theme(&self) -> &'static Theme {
        self.color_scheme.theme()
    }

    #[must_use]
    pub const fn is_dark(&self) -> bool {
        matches!(self.color_scheme, ColorScheme::Dark)
    }

    pub fn set_color_scheme(&mut self, color_scheme: ColorScheme) {
        self.color_scheme = color_scheme;
        self.persist();
    }

    /// Switch to the other scheme and return it.
    pub fn toggle(&mut self) -> ColorScheme {
        self.set_color_scheme(self.color_scheme.toggled());
        self.color_scheme
    }

    fn persist(&self) {
        let state = ThemeState {
            color_scheme: Some(self.color_scheme),
        };
        if let Err(e) = save_state(self.storage.as_ref(), THEME_STORAGE_KEY, &state) {
            warn!(error = %e, "Failed to persist theme");
        }
    }
}
