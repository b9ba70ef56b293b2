use core::fmt::Display;
use std::io::{self, Write as _};

use indent_write::io::IndentWriter;
use joinery::JoinableIterator;
use lazy_format::lazy_format;

use crate::{
    errors::ScanError,
    help::{OperationUsage, OptionUsage, Repetition, Tags, Usage},
};

pub fn scan_error(error: &ScanError) -> impl Display + '_ {
    lazy_format! {
        match (error) {
            ScanError::Matcher(error) => "{error}",
            ScanError::NeedArgument => "option requires an argument",
            ScanError::ParseError { arg, message } => "failed to parse {arg:?}: {message}",
            ScanError::Unrecognized { index, arg } => "unrecognized argument {arg:?} (at position {index})",
            ScanError::Custom(message) => "{message}",
        }
    }
}

fn option_tags<'a>(option: &'a OptionUsage<'a>) -> impl Display + 'a {
    let tags = lazy_format!(match (option.tags) {
        Tags::Short { short } => "-{short}",
        Tags::Long { long } => "    --{long}",
        Tags::LongShort { short, long } => "-{short}, --{long}",
    });

    let tags = lazy_format!(match ((option.placeholder, option.tags)) {
        (None, _) => "{tags}",
        (Some(placeholder), Tags::Short { .. }) => "{tags} <{placeholder}>",
        (Some(placeholder), _) => "{tags}=<{placeholder}>",
    });

    lazy_format!(match (option.repetition) {
        Repetition::Single => "{tags}",
        Repetition::Multiple => "{tags}...",
    })
}

/// Write a section, with a header and indented content.
fn section<O: io::Write, T>(
    out: &mut O,
    header: impl Display,
    body: impl FnOnce(IndentWriter<&mut O>) -> io::Result<T>,
) -> io::Result<T> {
    writeln!(out, "\n{header}:")?;
    body(IndentWriter::new("  ", out))
}

/// Write a term and its description, which is wrapped and indented beneath
/// it.
fn describe(
    out: &mut impl io::Write,
    term: impl Display,
    description: &str,
    width: usize,
) -> io::Result<()> {
    writeln!(out, "{term}")?;

    if description.is_empty() {
        return Ok(());
    }

    let mut out = IndentWriter::new("        ", out);
    for line in textwrap::wrap(description, width.saturating_sub(10).max(20)) {
        writeln!(out, "{line}")?;
    }

    Ok(())
}

fn print_synopsis(out: &mut impl io::Write, usage: &Usage<'_>) -> io::Result<()> {
    write!(out, "Usage: {}", usage.command)?;

    if !usage.options.is_empty() {
        write!(out, " [OPTIONS]")?;
    }

    if !usage.operations.is_empty() {
        let names = usage
            .operations
            .iter()
            .map(|operation: &OperationUsage<'_>| operation.name)
            .join_with(" | ");
        write!(out, " {{{names}}}...")?;
    }

    if let Some(trailing) = usage.trailing {
        write!(out, " [-- {trailing}...]")?;
    }

    writeln!(out)
}

pub fn print_usage(mut out: impl io::Write, usage: &Usage<'_>, width: usize) -> io::Result<()> {
    print_synopsis(&mut out, usage)?;

    if !usage.description.is_empty() {
        writeln!(out)?;
        for line in textwrap::wrap(usage.description, width) {
            writeln!(out, "{line}")?;
        }
    }

    if !usage.operations.is_empty() {
        section(&mut out, "Operations", |mut out| {
            usage.operations.iter().try_for_each(|operation| {
                describe(&mut out, operation.name, operation.description, width)
            })
        })?;
    }

    if !usage.options.is_empty() {
        section(&mut out, "Options", |mut out| {
            usage.options.iter().try_for_each(|option| {
                describe(&mut out, option_tags(option), option.description, width)
            })
        })?;
    }

    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_tags_show_placeholders() {
        let option = OptionUsage {
            tags: Tags::LongShort {
                long: "tag",
                short: 't',
            },
            placeholder: Some("NAME"),
            repetition: Repetition::Single,
            description: "",
        };
        assert_eq!(option_tags(&option).to_string(), "-t, --tag=<NAME>");

        let option = OptionUsage {
            tags: Tags::Short { short: 'D' },
            placeholder: Some("VAR"),
            repetition: Repetition::Multiple,
            description: "",
        };
        assert_eq!(option_tags(&option).to_string(), "-D <VAR>...");
    }

    #[test]
    fn prints_every_section() {
        let usage = Usage {
            command: "tool",
            description: "Does things.",
            operations: &[OperationUsage {
                name: "build",
                description: "Build it",
            }],
            options: &[OptionUsage {
                tags: Tags::LongShort {
                    long: "verbose",
                    short: 'v',
                },
                placeholder: None,
                repetition: Repetition::Multiple,
                description: "Be louder",
            }],
            trailing: Some("ARGS"),
        };

        let mut out = Vec::new();
        print_usage(&mut out, &usage, 80).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert_eq!(
            out,
            "Usage: tool [OPTIONS] {build}... [-- ARGS...]\n\
             \n\
             Does things.\n\
             \n\
             Operations:\n  \
             build\n          \
             Build it\n\
             \n\
             Options:\n  \
             -v, --verbose...\n          \
             Be louder\n"
        );
    }
}
