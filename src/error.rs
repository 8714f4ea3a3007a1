//! A custom pecoff-catalog error
//!
//! Only the byte readers can fail. The catalogs in [`crate::pe`] are total and
//! answer every code with a string.

use alloc::string::String;
use core::fmt;
use core::result;
#[cfg(feature = "std")]
use std::error;

#[non_exhaustive]
#[derive(Debug)]
/// A custom pecoff-catalog error
pub enum Error {
    /// The binary is malformed somehow
    Malformed(String),
    /// The optional header's magic number is not PE32, PE32+ or ROM
    BadMagic(u64),
    /// An error emanating from reading and interpreting bytes
    Scroll(scroll::Error),
    /// An error because not enough bytes were left for the item being read
    BufferTooShort(usize, &'static str),
}

#[cfg(feature = "std")]
impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Error::Scroll(ref scroll) => Some(scroll),
            _ => None,
        }
    }
}

impl From<scroll::Error> for Error {
    fn from(err: scroll::Error) -> Error {
        Error::Scroll(err)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::Scroll(ref err) => write!(fmt, "{}", err),
            Error::BadMagic(magic) => write!(fmt, "Invalid magic number: 0x{:x}", magic),
            Error::Malformed(ref msg) => write!(fmt, "Malformed entity: {}", msg),
            Error::BufferTooShort(n, item) => write!(fmt, "Buffer is too short for {} {}", n, item),
        }
    }
}

/// An impish result
pub type Result<T> = result::Result<T, Error>;
