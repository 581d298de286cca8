use std::{fmt, io};

/// Everything that can abort a bake.
///
/// No variant is recoverable: the first error stops the pipeline and nothing
/// is exported.
#[derive(Debug)]
pub enum FontError {
    /// Malformed or truncated font data, an out of range seek, a missing
    /// required table or inconsistent counts.
    Stream(String),

    /// A bad baking option, an oversized glyph, an unknown renderer or writer
    /// name, or an invalid code point list.
    Validation(String),

    /// The rendering backend failed.
    Renderer {
        renderer: String,
        context: String,
        message: String,
    },

    IoError(io::Error),
}

impl FontError {
    pub(crate) fn stream(message: impl Into<String>) -> Self {
        Self::Stream(message.into())
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

impl fmt::Display for FontError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stream(message) | Self::Validation(message) => f.write_str(message),
            Self::Renderer {
                renderer,
                context,
                message,
            } => write!(
                f,
                "{} font renderer failed on {}: {}",
                renderer, context, message
            ),
            Self::IoError(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for FontError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::IoError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for FontError {
    fn from(err: io::Error) -> Self {
        Self::IoError(err)
    }
}

pub type FontResult<T> = Result<T, FontError>;
