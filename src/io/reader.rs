use crate::errors::{CubeError, Result};
use std::fs::File;
use std::io::{self, prelude::*};
use std::path::{Path, PathBuf};

/// Reads a file line by line into a reusable buffer whilst keeping track of
/// the line number for error reporting.
pub struct BufReader<R> {
    reader: R,
    path: PathBuf,
    line: usize,
}

impl BufReader<io::BufReader<File>> {
    /// Opens the file from the path into a reader
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| CubeError::io(path, e))?;
        Ok(Self::new(io::BufReader::new(file), path))
    }
}

impl<R: BufRead> BufReader<R> {
    /// Wraps an existing reader, `path` is only used for error messages.
    pub fn new(reader: R, path: impl Into<PathBuf>) -> Self {
        Self { reader,
               path: path.into(),
               line: 0 }
    }

    /// The path the reader reports in its errors.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads a line from the buffer reader to mutable string, the line ending
    /// is stripped. Returns None at the end of the file.
    pub fn read_line<'buf>(&mut self,
                           buffer: &'buf mut String)
                           -> Result<Option<&'buf str>> {
        buffer.clear();
        let size = self.reader.read_line(buffer).map_err(|e| {
                       match e.kind() {
                           io::ErrorKind::InvalidData => {
                               self.error_at(self.line + 1, "line is not valid UTF-8")
                           }
                           _ => CubeError::io(&self.path, e),
                       }
                   })?;
        if size == 0 {
            return Ok(None);
        }
        self.line += 1;
        Ok(Some(buffer.trim_end_matches(&['\n', '\r'][..])))
    }

    /// Reads a line that has to exist, `what` describes the line for the
    /// error raised at the end of the file.
    pub fn required_line<'buf>(&mut self,
                               buffer: &'buf mut String,
                               what: &str)
                               -> Result<&'buf str> {
        let line = self.line + 1;
        match self.read_line(buffer)? {
            Some(text) => Ok(text),
            None => Err(self.error_at(line,
                                      format!("unexpected end of file, expected {}",
                                              what))),
        }
    }

    /// Creates a parse error on the current line.
    pub fn error(&self, message: impl Into<String>) -> CubeError {
        self.error_at(self.line, message)
    }

    fn error_at(&self, line: usize, message: impl Into<String>) -> CubeError {
        CubeError::parse(&self.path, line, message)
    }
}
