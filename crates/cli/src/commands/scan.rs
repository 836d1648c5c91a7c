//! Scanner command.

use ticketbox_client::views::{CameraPermission, Scanner};

use super::{CliError, print};

/// Feed one decoded payload to a fresh scanner and print the outcome.
///
/// The payload arrives already decoded, so camera permission is granted.
///
/// # Errors
///
/// Returns an error if printing fails.
pub fn run(payload: &str, front: bool) -> Result<(), CliError> {
    let mut scanner = Scanner::new();
    if front {
        scanner.toggle_facing();
    }
    print(&scanner.render(CameraPermission::Granted))?;

    if let Some(outcome) = scanner.on_scanned(payload) {
        print(&outcome.notice.to_string())?;
        print(&format!("Next: {}", outcome.route))?;
    }
    Ok(())
}
