//! Startup Errors
//!
//! Fatal initialization failures and the process exit codes they map to.
//! Once the window, graphics context, and ground texture are up, the main
//! loop has no failure paths of its own.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can abort the application before the main loop runs.
///
/// Each variant corresponds to one initialization stage and carries a fixed
/// exit code, reported via [`StartupError::exit_code`].
#[derive(Debug, Error)]
pub enum StartupError {
    /// The windowing system (event loop) could not be initialized.
    #[error("failed to initialize the windowing system: {0}")]
    WindowSystem(#[from] winit::error::EventLoopError),

    /// The application window could not be created.
    #[error("failed to create the application window: {0}")]
    Window(#[from] winit::error::OsError),

    /// The graphics device or surface could not be established.
    #[error(transparent)]
    Context(#[from] ContextError),

    /// The ground texture could not be read or decoded.
    #[error(transparent)]
    Texture(#[from] TextureError),
}

impl StartupError {
    /// Returns the process exit code reported for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::WindowSystem(_) => 1,
            Self::Window(_) => 2,
            Self::Context(_) => 3,
            Self::Texture(_) => 4,
        }
    }
}

/// Failures while establishing the GPU device and surface.
#[derive(Debug, Error)]
pub enum ContextError {
    #[error("failed to create rendering surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter found")]
    NoAdapter,

    #[error("failed to acquire GPU device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
}

/// Failure to read or decode a texture image.
///
/// There is no fallback texture; a missing or corrupt asset aborts startup.
#[derive(Debug, Error)]
#[error("failed to load texture '{}': {}", .path.display(), .source)]
pub struct TextureError {
    /// Path the texture was loaded from.
    pub path: PathBuf,
    /// Underlying decode or I/O error.
    pub source: image::ImageError,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texture_error() -> TextureError {
        TextureError {
            path: PathBuf::from("textures/grass.png"),
            source: image::ImageError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no such file",
            )),
        }
    }

    #[test]
    fn exit_codes_match_failure_stages() {
        let window_system =
            StartupError::WindowSystem(winit::error::EventLoopError::RecreationAttempt);
        assert_eq!(window_system.exit_code(), 1);

        let context = StartupError::Context(ContextError::NoAdapter);
        assert_eq!(context.exit_code(), 3);

        let texture = StartupError::Texture(texture_error());
        assert_eq!(texture.exit_code(), 4);
    }

    #[test]
    fn texture_error_names_the_asset() {
        let message = StartupError::Texture(texture_error()).to_string();
        assert!(message.contains("textures/grass.png"));
    }
}
