//! QR scanner screen state.
//!
//! The camera itself lives outside this crate; the scanner only receives
//! decoded payloads. After one successful scan further payloads are ignored
//! until [`Scanner::reset`] is called (the screen regained focus).

use tracing::{debug, info};

use super::{Notice, Route};

/// Notice title shown after a successful scan.
pub const QR_CODE_SCANNED: &str = "QR Code Scanned";

/// Which camera is in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraFacing {
    #[default]
    Back,
    Front,
}

impl CameraFacing {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Back => Self::Front,
            Self::Front => Self::Back,
        }
    }
}

/// Camera permission as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraPermission {
    /// Not answered yet.
    Unknown,
    Granted,
    /// Denied, but the user can still be asked.
    Denied,
    /// Denied permanently; only the system settings can change it.
    Blocked,
}

impl CameraPermission {
    /// Text to show instead of the camera, or `None` when scanning is possible.
    #[must_use]
    pub const fn prompt(self) -> Option<&'static str> {
        match self {
            Self::Granted => None,
            Self::Unknown => Some("Requesting camera permission..."),
            Self::Denied => Some("Camera permission is required to scan QR codes."),
            Self::Blocked => Some(
                "Please enable camera permissions in your device settings to scan QR codes.",
            ),
        }
    }
}

/// Result of accepting a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOutcome {
    pub payload: String,
    pub notice: Notice,
    /// Where to go next.
    pub route: Route,
}

#[derive(Debug, Clone, Default)]
pub struct Scanner {
    scanned: bool,
    facing: CameraFacing,
    /// Bumped on every reset so the camera session starts fresh.
    session: u64,
}

impl Scanner {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-arm the scanner and start a new camera session.
    pub const fn reset(&mut self) {
        self.scanned = false;
        self.session = self.session.wrapping_add(1);
    }

    #[must_use]
    pub const fn is_armed(&self) -> bool {
        !self.scanned
    }

    #[must_use]
    pub const fn facing(&self) -> CameraFacing {
        self.facing
    }

    #[must_use]
    pub const fn session(&self) -> u64 {
        self.session
    }

    pub const fn toggle_facing(&mut self) -> CameraFacing {
        self.facing = self.facing.toggled();
        self.facing
    }

    /// Accept a decoded payload.
    ///
    /// Returns `None` if a payload was already accepted in this session.
    pub fn on_scanned(&mut self, payload: &str) -> Option<ScanOutcome> {
        if self.scanned {
            debug!(session = self.session, "Ignoring repeated scan");
            return None;
        }
        self.scanned = true;
        info!(session = self.session, len = payload.len(), "QR code scanned");

        Some(ScanOutcome {
            payload: payload.to_string(),
            notice: Notice::success(QR_CODE_SCANNED, payload),
            route: Route::Events,
        })
    }

    /// Screen text for the given permission state.
    #[must_use]
    pub fn render(&self, permission: CameraPermission) -> String {
        permission.prompt().map_or_else(
            || {
                let camera = match self.facing {
                    CameraFacing::Back => "back",
                    CameraFacing::Front => "front",
                };
                format!("Point your camera at a QR code ({camera} camera)")
            },
            str::to_string,
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_once_until_reset() {
        let mut scanner = Scanner::new();
        let outcome = scanner.on_scanned("TICKET-42").unwrap();
        assert_eq!(outcome.payload, "TICKET-42");
        assert_eq!(outcome.notice.title, QR_CODE_SCANNED);
        assert_eq!(outcome.notice.message, "TICKET-42");
        assert_eq!(outcome.route, Route::Events);

        assert!(scanner.on_scanned("TICKET-43").is_none());
        assert!(!scanner.is_armed());

        scanner.reset();
        assert!(scanner.is_armed());
        assert_eq!(scanner.session(), 1);
        assert!(scanner.on_scanned("TICKET-43").is_some());
    }

    #[test]
    fn test_toggle_facing() {
        let mut scanner = Scanner::new();
        assert_eq!(scanner.facing(), CameraFacing::Back);
        assert_eq!(scanner.toggle_facing(), CameraFacing::Front);
        assert_eq!(scanner.toggle_facing(), CameraFacing::Back);
    }

    #[test]
    fn test_permission_prompts() {
        let scanner = Scanner::new();
        assert_eq!(
            scanner.render(CameraPermission::Denied),
            "Camera permission is required to scan QR codes."
        );
        assert!(scanner
            .render(CameraPermission::Blocked)
            .contains("device settings"));
        assert_eq!(
            scanner.render(CameraPermission::Granted),
            "Point your camera at a QR code (back camera)"
        );
    }
}
