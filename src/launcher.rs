//! Handing a destination URL to the platform's default browser.
use thiserror::Error;
use url::Url;

use crate::util::{validate_destination, UrlValidationError};

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("Refusing to open URL: {0}")]
    Rejected(#[from] UrlValidationError),

    #[error("Failed to open browser: {0}")]
    Io(#[from] std::io::Error),
}

/// Opens a destination outside the application.
///
/// Implementations must not block the event loop.
pub trait Launcher: Send {
    fn launch(&self, destination: &Url) -> Result<(), LaunchError>;
}

/// Opens URLs with the OS default handler (`xdg-open`, `open`, `start`).
///
/// The browser process is detached, receives nothing but the URL, and gets
/// no handle back to this process.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn launch(&self, destination: &Url) -> Result<(), LaunchError> {
        // Re-validate: entries may come from a user-edited catalog file
        let url = validate_destination(destination.as_str())?;
        open::that_detached(url.as_str())?;
        tracing::info!(url = %url, "Opened destination");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_launcher_rejects_non_http() {
        let url = Url::parse("file:///etc/passwd").unwrap();
        let err = SystemLauncher.launch(&url).unwrap_err();
        assert!(matches!(
            err,
            LaunchError::Rejected(UrlValidationError::UnsupportedScheme(ref s)) if s == "file"
        ));
        assert!(err.to_string().contains("Refusing"));
    }
}
