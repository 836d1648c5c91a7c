//! Color scheme commands.

use ticketbox_client::AppState;
use ticketbox_client::stores::ThemeStore;
use ticketbox_core::ColorScheme;

use super::{CliError, print};

fn print_scheme(theme: &ThemeStore) -> Result<(), CliError> {
    let colors = &theme.theme().colors;
    print(&format!(
        "{} (primary {}, background {}, text {})",
        theme.color_scheme(),
        colors.primary,
        colors.background,
        colors.text
    ))
}

/// Print the current scheme, or its full palette as JSON.
///
/// # Errors
///
/// Returns an error if encoding or printing fails.
pub fn show(state: &AppState, json: bool) -> Result<(), CliError> {
    let theme = state.theme_store();
    if json {
        return print(&serde_json::to_string_pretty(theme.theme())?);
    }
    print_scheme(&theme)
}

/// Persist a scheme.
///
/// # Errors
///
/// Returns an error if printing fails.
pub fn set(state: &AppState, scheme: ColorScheme) -> Result<(), CliError> {
    let mut theme = state.theme_store();
    theme.set_color_scheme(scheme);
    print_scheme(&theme)
}

/// Switch to the other scheme.
///
/// # Errors
///
/// Returns an error if printing fails.
pub fn toggle(state: &AppState) -> Result<(), CliError> {
    let mut theme = state.theme_store();
    theme.toggle();
    print_scheme(&theme)
}
