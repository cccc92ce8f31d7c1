use thiserror::Error;

/// Errors returned while sampling or clustering an image.
#[derive(Debug, Error)]
pub enum Error {
    /// A parameter was outside its accepted range, or the input was empty.
    #[error("invalid argument {name}: {message}")]
    InvalidArgument {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// The image bytes could not be decoded.
    #[error(transparent)]
    Decode(#[from] image::ImageError),
}

impl Error {
    pub(crate) const fn invalid(name: &'static str, message: &'static str) -> Self {
        Self::InvalidArgument { name, message }
    }
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
