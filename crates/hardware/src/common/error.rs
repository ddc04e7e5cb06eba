//! Program-load error definitions.
//!
//! The pipeline itself never raises runtime errors: out-of-range memory
//! accesses, division by zero, and unknown encodings all degrade to defined
//! no-ops. The only non-recoverable condition is a program file that cannot
//! be read or parsed, signaled before simulation begins.

use std::fmt;
use std::io;

/// Error raised while loading a hex machine-code program.
#[derive(Debug)]
pub enum LoadError {
    /// The program file could not be opened or read.
    Io(io::Error),

    /// A non-comment line did not parse as a 32-bit hexadecimal word.
    ///
    /// Carries the 1-based line number and the offending token.
    MalformedWord {
        /// 1-based line number in the program file.
        line: usize,
        /// The token that failed to parse.
        token: String,
    },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "could not read program file: {}", e),
            LoadError::MalformedWord { line, token } => {
                write!(f, "line {}: '{}' is not a 32-bit hex word", line, token)
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::MalformedWord { .. } => None,
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(e: io::Error) -> Self {
        LoadError::Io(e)
    }
}
