/*
 * Error type shared by the shim's fallible internals. None of these errors ever
 * reach the host process: the lifecycle, hook and subclass layers log them and
 * degrade to default rendering.
 */

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ShimError {
    #[error("theme config I/O failed for {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("the module's own file path could not be resolved")]
    ModulePathUnavailable,

    #[error("the window-creation hook is already installed")]
    HookAlreadyInstalled,

    #[error("the window-creation hook is not installed")]
    HookNotInstalled,

    #[cfg(target_os = "windows")]
    #[error("Win32 call failed: {0}")]
    Win32(#[from] windows::core::Error),
}

impl ShimError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ShimError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ShimError>;
