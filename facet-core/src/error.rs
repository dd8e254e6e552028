/// Errors produced by the rendering core
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The requested surface has a zero dimension or does not fit in memory.
    InvalidSurface { width: usize, height: usize },
    /// A triangle has zero area or a zero-length normal.
    DegenerateGeometry,
    /// Subdivision depth above the supported maximum.
    InvalidSubdivision { depth: u32, max: u32 },
    /// Malformed STL input.
    Stl(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidSurface { width, height } => {
                write!(f, "invalid surface size {}x{}", width, height)
            }
            Error::DegenerateGeometry => write!(f, "degenerate triangle"),
            Error::InvalidSubdivision { depth, max } => {
                write!(f, "subdivision depth {} exceeds maximum of {}", depth, max)
            }
            Error::Stl(reason) => write!(f, "invalid STL data: {}", reason),
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = Error::InvalidSurface { width: 0, height: 10 };
        assert_eq!(err.to_string(), "invalid surface size 0x10");

        let err = Error::InvalidSubdivision { depth: 12, max: 8 };
        assert_eq!(err.to_string(), "subdivision depth 12 exceeds maximum of 8");
    }
}
