use std::io;

/// Violation of the line-oriented input contract's shape or types.
///
/// Every variant names the 1-based input line it occurred on, so the
/// terminating diagnostic can point at the failing line and field.
#[derive(Debug)]
pub enum ProtocolError {
    /// The stream ended in the middle of a block.
    UnexpectedEof { line: usize, expected: &'static str },
    /// A line had fewer tokens than its shape requires.
    MissingToken { line: usize, field: &'static str },
    InvalidInteger {
        line: usize,
        field: &'static str,
        token: String,
    },
    /// A boolean token that is not exactly "0" or "1".
    InvalidBool {
        line: usize,
        field: &'static str,
        token: String,
    },
    /// A cell reference that does not address a cell of the board.
    OutOfRange {
        line: usize,
        field: &'static str,
        value: i64,
        num_cells: usize,
    },
    /// The input stream itself failed.
    Read { line: usize, source: io::Error },
}

impl std::error::Error for ProtocolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProtocolError::Read { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl std::fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProtocolError::UnexpectedEof { line, expected } => {
                write!(f, "Input ended on line {} while expecting {}", line, expected)
            }
            ProtocolError::MissingToken { line, field } => {
                write!(f, "Line {} is missing the {} token", line, field)
            }
            ProtocolError::InvalidInteger { line, field, token } => {
                write!(f, "Line {}: the {} token {:?} is not an integer", line, field, token)
            }
            ProtocolError::InvalidBool { line, field, token } => write!(
                f,
                "Line {}: the {} token {:?} is neither \"0\" nor \"1\"",
                line, field, token
            ),
            ProtocolError::OutOfRange {
                line,
                field,
                value,
                num_cells,
            } => write!(
                f,
                "Line {}: the {} {} does not address one of the board's {} cells",
                line, field, value, num_cells
            ),
            ProtocolError::Read { line, .. } => {
                write!(f, "Could not read input line {}", line)
            }
        }
    }
}

/// The failure taxonomy for one adapter run.
///
/// Nothing here is recoverable: the protocol is a single pass over a finite,
/// externally driven stream, so every failure aborts the run.
#[derive(Debug)]
pub enum AdapterError {
    /// Malformed or truncated referee input.
    Protocol(ProtocolError),
    /// The strategy engine failed while handling a submission.
    Engine(anyhow::Error),
    /// An output write failed.
    Io(io::Error),
}

impl From<ProtocolError> for AdapterError {
    fn from(err: ProtocolError) -> Self {
        AdapterError::Protocol(err)
    }
}

impl std::error::Error for AdapterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AdapterError::Protocol(err) => Some(err),
            AdapterError::Engine(err) => Some(err.as_ref()),
            AdapterError::Io(err) => Some(err),
        }
    }
}

impl std::fmt::Display for AdapterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdapterError::Protocol(_) => write!(f, "The referee input violated the protocol"),
            AdapterError::Engine(_) => {
                write!(f, "The strategy engine failed while handling a turn")
            }
            AdapterError::Io(_) => write!(f, "Could not write to the output stream"),
        }
    }
}
