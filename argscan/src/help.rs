/*!
Descriptions of a program's options and operations, used both to build the
[`Matcher`]s that recognize them and to print a usage message.
*/

use std::io;

use argscan_parser::{Matcher, MatcherError};

use crate::printers;

/// The set of tags that identify a particular option (`-short`, `--long`)
#[derive(Debug, Clone, Copy)]
pub enum Tags<'a> {
    /// This option uses only a long tag
    Long { long: &'a str },

    /// This option uses only a short tag
    Short { short: char },

    /// This option uses both a long and short tag
    LongShort { long: &'a str, short: char },
}

impl<'a> Tags<'a> {
    /// Get the long tag, if any
    #[inline]
    #[must_use]
    pub const fn long(&self) -> Option<&'a str> {
        match self {
            Tags::Long { long } | Tags::LongShort { long, .. } => Some(long),
            Tags::Short { .. } => None,
        }
    }

    /// Get the short tag, if any
    #[inline]
    #[must_use]
    pub const fn short(&self) -> Option<char> {
        match self {
            Tags::Short { short } | Tags::LongShort { short, .. } => Some(*short),
            Tags::Long { .. } => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repetition {
    Single,
    Multiple,
}

/// An option, such as `-v` or `--output=FILE`
#[derive(Debug, Clone, Copy)]
pub struct OptionUsage<'a> {
    pub tags: Tags<'a>,

    /// If given, this option takes a value, shown with this placeholder.
    pub placeholder: Option<&'a str>,
    pub repetition: Repetition,
    pub description: &'a str,
}

impl OptionUsage<'_> {
    /// The matcher specs for this option: the short and long tags, each with a
    /// trailing `=` if the option takes a value
    #[must_use]
    pub fn specs(&self) -> Vec<String> {
        let suffix = match self.placeholder {
            Some(_) => "=",
            None => "",
        };

        self.tags
            .short()
            .map(String::from)
            .into_iter()
            .chain(self.tags.long().map(String::from))
            .map(|tag| tag + suffix)
            .collect()
    }

    /// Build a [`Matcher`] that recognizes this option
    pub fn matcher(&self) -> Result<Matcher, MatcherError> {
        Matcher::new(self.specs())
    }
}

/// A positional operation, like the `build` in `tool build`
#[derive(Debug, Clone, Copy)]
pub struct OperationUsage<'a> {
    pub name: &'a str,
    pub description: &'a str,
}

/// Everything needed to print a usage message for a program
#[derive(Debug, Clone, Copy)]
pub struct Usage<'a> {
    pub command: &'a str,
    pub description: &'a str,
    pub operations: &'a [OperationUsage<'a>],
    pub options: &'a [OptionUsage<'a>],

    /// If given, the program accepts pass-through arguments after a `--`,
    /// shown with this placeholder.
    pub trailing: Option<&'a str>,
}

impl Usage<'_> {
    /// Write the usage message, with descriptions wrapped to `width` columns
    pub fn write(&self, out: impl io::Write, width: usize) -> io::Result<()> {
        printers::print_usage(out, self, width)
    }
}
