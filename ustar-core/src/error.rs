use alloc::format;
use alloc::string::{String, ToString};
use core::error;
use core::fmt::{Display, Formatter, Result};
use core::str::Utf8Error;

use crate::Field;

#[derive(Debug)]
pub enum Error {
    /// An octal field held something other than base-8 digits
    InvalidOctal { field: Field, value: String },
    /// A text field was not valid UTF-8
    InvalidText { field: Field, source: Utf8Error },
    /// A field decoded to a value of the wrong kind for its slot
    Layout(Field),
    /// The source ended inside a header block or payload
    Truncated {
        offset: u64,
        expected: usize,
        actual: usize,
    },
    Overflow,
    TryFromInt(core::num::TryFromIntError),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> Result {
        use Error::*;

        let msg = match self {
            InvalidOctal { field, value } => format!("Invalid octal in {}: {:?}", field, value),
            InvalidText { field, source } => format!("Invalid text in {}: {}", field, source),
            Layout(field) => format!("Unexpected value kind for {}", field),
            Truncated {
                offset,
                expected,
                actual,
            } => format!(
                "Archive truncated at offset {}: expected {} bytes, got {}",
                offset, expected, actual
            ),
            Overflow => "Overflow".to_string(),
            TryFromInt(err) => format!("TryFromInt: {}", err),
        };
        write!(f, "{}", msg)
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::InvalidText { source, .. } => Some(source),
            Self::TryFromInt(e) => Some(e),
            _ => None,
        }
    }
}

impl From<core::num::TryFromIntError> for Error {
    fn from(err: core::num::TryFromIntError) -> Error {
        Error::TryFromInt(err)
    }
}
