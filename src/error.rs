//! Error types for FuzzMenu
//!
//! Almost every failure in the launcher degrades silently; the variants here
//! are the ones that reach a caller at all.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for FuzzMenu operations
#[derive(Error, Debug)]
pub enum FuzzMenuError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to read descriptor directory '{}': {}", .0.display(), .1)]
    DirectoryError(PathBuf, std::io::Error),

    #[error("Cache file '{}' is corrupt: {}", .0.display(), .1)]
    CacheCorrupt(PathBuf, serde_json::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid geometry '{0}': expected WIDTHxHEIGHT+X+Y")]
    InvalidGeometry(String),

    #[error("No application with filename '{0}'")]
    UnknownApplication(String),

    #[error("No row {0} in the current view")]
    RowOutOfRange(usize),

    #[error("Failed to launch '{0}': {1}")]
    LaunchError(String, std::io::Error),

    #[error("Could not determine user directories: {0}")]
    XdgError(String),

    #[error("GUI error: {0}")]
    GuiError(String),
}

/// Result type alias for FuzzMenu operations
pub type Result<T> = std::result::Result<T, FuzzMenuError>;

impl FuzzMenuError {
    /// Check if this error is recoverable (the session keeps running)
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            FuzzMenuError::IoError(_)
                | FuzzMenuError::CacheCorrupt(_, _)
                | FuzzMenuError::JsonError(_)
                | FuzzMenuError::LaunchError(_, _)
                | FuzzMenuError::RowOutOfRange(_)
        )
    }
}

impl From<xdg::BaseDirectoriesError> for FuzzMenuError {
    fn from(e: xdg::BaseDirectoriesError) -> Self {
        FuzzMenuError::XdgError(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn launch_and_cache_errors_are_recoverable() {
        let launch = FuzzMenuError::LaunchError(
            "firefox".into(),
            std::io::Error::new(std::io::ErrorKind::NotFound, "sh"),
        );
        assert!(launch.is_recoverable());
        assert!(!FuzzMenuError::InvalidGeometry("10x".into()).is_recoverable());
        assert!(!FuzzMenuError::UnknownApplication("x.desktop".into()).is_recoverable());
    }

    #[test]
    fn path_errors_show_path_and_cause() {
        let dir = FuzzMenuError::DirectoryError(
            PathBuf::from("/usr/share/applications"),
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(
            dir.to_string(),
            "Failed to read descriptor directory '/usr/share/applications': denied"
        );

        let json = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let cause = json.to_string();
        let corrupt = FuzzMenuError::CacheCorrupt(PathBuf::from("/tmp/registry.json"), json);
        assert_eq!(
            corrupt.to_string(),
            format!("Cache file '/tmp/registry.json' is corrupt: {}", cause)
        );
    }

    #[test]
    fn io_and_json_errors_convert() {
        fn read() -> Result<()> {
            Err::<(), _>(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"))?;
            Ok(())
        }
        assert!(matches!(read(), Err(FuzzMenuError::IoError(_))));

        let json: Result<serde_json::Value> = serde_json::from_str("[").map_err(Into::into);
        assert!(matches!(json, Err(FuzzMenuError::JsonError(_))));
    }

    #[test]
    fn geometry_error_names_the_input() {
        let msg = FuzzMenuError::InvalidGeometry("abc".into()).to_string();
        assert!(msg.contains("'abc'"));
    }
}
