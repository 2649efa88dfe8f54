use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading, resampling, masking or writing cube files.
#[derive(Error, Debug)]
pub enum CubeError {
    /// The file could not be opened, read or written.
    #[error("I/O error on \"{}\": {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a valid cube file.
    /// Parse(path, line, message) where line is 1-based.
    #[error("Cannot read \"{}\" as cube file (line {line}): {message}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// The dimensions of an array do not correspond to the grid it belongs to.
    #[error("Shape mismatch: expected {expected:?}, found {found:?}.")]
    ShapeMismatch { expected: [usize; 3], found: [usize; 3] },

    /// A flat array does not hold the number of points its shape requires.
    #[error("Length mismatch: expected {expected} values, found {found}.")]
    LengthMismatch { expected: usize, found: usize },

    /// The interpolant could not be built from the supplied axes.
    #[error("Interpolation error: {0}")]
    Interpolation(String),

    /// A numeric parameter is outside of its valid range.
    #[error("Invalid parameter: {0}")]
    Config(String),
}

impl CubeError {
    /// Creates a parse error for the given file and 1-based line number.
    pub fn parse(path: impl Into<PathBuf>,
                 line: usize,
                 message: impl Into<String>)
                 -> Self {
        Self::Parse { path: path.into(),
                      line,
                      message: message.into() }
    }

    /// Wraps an io::Error with the path it occured on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(),
                   source }
    }
}

/// Result type for the library.
pub type Result<T> = std::result::Result<T, CubeError>;
