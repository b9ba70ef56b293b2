/*!
Basic error implementations for the various error traits throughout
[`argscan`][crate]
 */

use core::fmt::{self, Display};

use argscan_parser::MatcherError;

use crate::{printers, strict, value};

/// A simple argument scanning error type that contains no data. Mostly used
/// for testing and code examples.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmptyError;

impl Display for EmptyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "there was an error scanning command-line arguments")
    }
}

impl core::error::Error for EmptyError {}

impl value::Error for EmptyError {
    #[inline(always)]
    fn needs_arg() -> Self {
        Self
    }

    #[inline(always)]
    fn parse_error(_: &str, _: impl Display) -> Self {
        Self
    }

    #[inline(always)]
    fn custom(_: impl Display) -> Self {
        Self
    }
}

impl strict::Error for EmptyError {
    #[inline(always)]
    fn unrecognized(_: usize, _: &str) -> Self {
        Self
    }
}

impl From<MatcherError> for EmptyError {
    #[inline(always)]
    fn from(_: MatcherError) -> Self {
        Self
    }
}

/// A general purpose error type that implements all of the `argscan` error
/// traits and retains everything it's told.
#[derive(Debug)]
pub enum ScanError {
    /// An option spec couldn't be compiled
    Matcher(MatcherError),

    /// An option that requires a value didn't get one
    NeedArgument,

    /// A value failed to parse
    ParseError { arg: String, message: String },

    /// Nothing recognized the argument at this index
    Unrecognized { index: usize, arg: String },

    /// A value parsed, but was rejected for some other reason
    Custom(String),
}

impl Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", printers::scan_error(self))
    }
}

impl core::error::Error for ScanError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            ScanError::Matcher(error) => Some(error),
            _ => None,
        }
    }
}

impl From<MatcherError> for ScanError {
    fn from(error: MatcherError) -> Self {
        Self::Matcher(error)
    }
}

impl value::Error for ScanError {
    fn needs_arg() -> Self {
        Self::NeedArgument
    }

    fn parse_error(arg: &str, msg: impl Display) -> Self {
        Self::ParseError {
            arg: arg.to_owned(),
            message: msg.to_string(),
        }
    }

    fn custom(msg: impl Display) -> Self {
        Self::Custom(msg.to_string())
    }
}

impl strict::Error for ScanError {
    fn unrecognized(index: usize, arg: &str) -> Self {
        Self::Unrecognized {
            index,
            arg: arg.to_owned(),
        }
    }
}
