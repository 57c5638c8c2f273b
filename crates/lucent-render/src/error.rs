use crate::backend::TextureId;

/// Errors reported by render collaborators.
///
/// These stop at the widget boundary: widgets log them and degrade to an empty
/// visual instead of propagating.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    /// The backend could not allocate a texture.
    TextureCreation(String),

    /// A texture or surface was requested with zero or oversized dimensions.
    InvalidDimensions { width: u32, height: u32 },

    /// Pixel buffer length does not match `width * height * 4`.
    PixelBufferSize { expected: usize, actual: usize },

    /// The texture id is not known to the backend (already destroyed).
    UnknownTexture(TextureId),

    /// Text could not be rasterized.
    Rasterization(String),

    /// The backend does not support the requested operation.
    Unsupported(&'static str),
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::TextureCreation(msg) => write!(f, "Failed to create texture: {}", msg),
            RenderError::InvalidDimensions { width, height } => {
                write!(f, "Invalid texture dimensions: {}x{}", width, height)
            }
            RenderError::PixelBufferSize { expected, actual } => write!(
                f,
                "Pixel buffer has {} bytes, expected {}",
                actual, expected
            ),
            RenderError::UnknownTexture(id) => write!(f, "Unknown texture: {:?}", id),
            RenderError::Rasterization(msg) => write!(f, "Text rasterization failed: {}", msg),
            RenderError::Unsupported(what) => write!(f, "Unsupported operation: {}", what),
        }
    }
}

impl std::error::Error for RenderError {}

/// Convenience alias for render collaborator results.
pub type RenderResult<T> = Result<T, RenderError>;
