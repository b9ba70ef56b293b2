/*!
The demo's configuration, and the two-pass scan that builds it.

The first pass handles every option wherever it appears, then rewinds. The
second pass collects the operations in order, and everything after a `--` is
kept for the `run` operation. Options are therefore applied before any
operation is looked at, regardless of where they were written.
*/

use core::fmt::Display;
use std::{path::PathBuf, str::FromStr};

use argscan::{
    ArgumentExt, CurrentArgument, Matcher, MatcherError, MatcherSpec,
    help::{OperationUsage, OptionUsage, Repetition, Tags, Usage},
    scan_strict,
    value::{Error as _, ParsedValue, Value},
};
use joinery::JoinableIterator;
use lazy_format::lazy_format;
use regex::Regex;
use tracing::debug;

use crate::error::DemoError;

const HELP: OptionUsage<'static> = OptionUsage {
    tags: Tags::LongShort {
        long: "help",
        short: 'h',
    },
    placeholder: None,
    repetition: Repetition::Single,
    description: "Print this message and exit.",
};

const VERBOSE: OptionUsage<'static> = OptionUsage {
    tags: Tags::LongShort {
        long: "verbose",
        short: 'v',
    },
    placeholder: None,
    repetition: Repetition::Multiple,
    description: "Describe the plan in more detail. May be repeated, or written as -vv.",
};

const TAG: OptionUsage<'static> = OptionUsage {
    tags: Tags::LongShort {
        long: "tag",
        short: 't',
    },
    placeholder: Some("NAME"),
    repetition: Repetition::Single,
    description: "Name of the image to build or run.",
};

const JOBS: OptionUsage<'static> = OptionUsage {
    tags: Tags::LongShort {
        long: "jobs",
        short: 'j',
    },
    placeholder: Some("N"),
    repetition: Repetition::Single,
    description: "Number of parallel build jobs.",
};

const BUILD_ARG: OptionUsage<'static> = OptionUsage {
    tags: Tags::Long { long: "build-arg" },
    placeholder: Some("KEY=VALUE"),
    repetition: Repetition::Multiple,
    description: "Set a build-time variable.",
};

const CONTEXT: OptionUsage<'static> = OptionUsage {
    tags: Tags::Long { long: "context" },
    placeholder: Some("PATH"),
    repetition: Repetition::Single,
    description: "Build context directory. Defaults to the current directory.",
};

pub const USAGE: Usage<'static> = Usage {
    command: "argscan-demo",
    description: "Plan a sequence of image operations. Options may appear anywhere before \
        a `--` and apply to every operation; operations run in the order given. \
        Arguments after `--` are passed to `run`.",
    operations: &[
        OperationUsage {
            name: "build",
            description: "Build the image from the context directory.",
        },
        OperationUsage {
            name: "run",
            description: "Run the image, passing along any arguments after `--`.",
        },
        OperationUsage {
            name: "clean",
            description: "Remove the image.",
        },
    ],
    options: &[HELP, VERBOSE, TAG, JOBS, BUILD_ARG, CONTEXT],
    trailing: Some("ARGS"),
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Build,
    Run,
    Clean,
}

impl Operation {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Operation::Build => "build",
            Operation::Run => "run",
            Operation::Clean => "clean",
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("expected one of build, run, clean")]
pub struct UnknownOperation;

impl FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "build" => Ok(Operation::Build),
            "run" => Ok(Operation::Run),
            "clean" => Ok(Operation::Clean),
            _ => Err(UnknownOperation),
        }
    }
}

impl ParsedValue for Operation {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub help: bool,
    pub verbose: usize,
    pub tag: Option<String>,
    pub jobs: Option<u32>,
    pub build_args: Vec<String>,
    pub context: PathBuf,
    pub operations: Vec<Operation>,

    /// Everything after the `--`
    pub passthrough: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            help: false,
            verbose: 0,
            tag: None,
            jobs: None,
            build_args: Vec::new(),
            context: PathBuf::from("."),
            operations: Vec::new(),
            passthrough: Vec::new(),
        }
    }
}

struct Matchers {
    help: Matcher,
    verbose: Matcher,
    tag: Matcher,
    jobs: Matcher,
    build_arg: Matcher,
    context: Matcher,
}

impl Matchers {
    fn new() -> Result<Self, MatcherError> {
        Ok(Self {
            help: HELP.matcher()?,
            // `-vvv` counts three times
            verbose: Matcher::new([
                MatcherSpec::from(Regex::new(r"^-(?<count>v+)$")?),
                MatcherSpec::from("verbose"),
            ])?,
            tag: TAG.matcher()?,
            jobs: JOBS.matcher()?,
            build_arg: BUILD_ARG.matcher()?,
            context: CONTEXT.matcher()?,
        })
    }

    fn value_bearing(&self) -> [&Matcher; 4] {
        [&self.tag, &self.jobs, &self.build_arg, &self.context]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pass {
    Options,
    Operations,
}

/// Parse the value of the option that just matched, naming the option in the
/// error if its value is missing.
fn option_value<'arg, T: Value<'arg>>(
    arg: &mut CurrentArgument<'arg>,
    option: &str,
) -> Result<T, DemoError> {
    arg.parse_value::<T, DemoError>()
        .map_err(|error| error.for_option(option))
}

impl Config {
    pub fn from_args<'arg>(args: impl IntoIterator<Item = &'arg str>) -> Result<Self, DemoError> {
        let matchers = Matchers::new()?;
        let mut config = Config::default();
        let mut pass = Pass::Options;

        scan_strict(args, |arg| {
            // The arguments began with `--`, so there are no options to
            // handle and no reason to rewind.
            if pass == Pass::Options && !arg.options_enabled() {
                pass = Pass::Operations;
            }

            match pass {
                Pass::Options => {
                    config.apply_option(arg, &matchers)?;

                    // Rewind before crossing the `--`; once it has been seen,
                    // nothing is an option for the rest of the scan.
                    if arg.is_last() || arg.peek() == Some("--") {
                        debug!(index = arg.index(), "options done; rescanning for operations");
                        pass = Pass::Operations;
                        arg.restart();
                    }
                }
                Pass::Operations => config.apply_operation(arg, &matchers)?,
            }

            Ok::<_, DemoError>(())
        })?;

        Ok(config)
    }

    fn apply_option(
        &mut self,
        arg: &mut CurrentArgument<'_>,
        matchers: &Matchers,
    ) -> Result<(), DemoError> {
        // Options that take a value come first, so that `-th` is a tag of `h`
        // rather than a request for help.
        if arg.is_literal() {
            arg.mark_used();
        } else if arg.matches(&matchers.tag) {
            self.tag = Some(option_value(arg, "--tag")?);
        } else if arg.matches(&matchers.jobs) {
            self.jobs = match option_value::<u32>(arg, "--jobs")? {
                0 => return Err(DemoError::custom("--jobs must be at least 1")),
                jobs => Some(jobs),
            };
        } else if arg.matches(&matchers.build_arg) {
            self.build_args.push(option_value(arg, "--build-arg")?);
        } else if arg.matches(&matchers.context) {
            self.context = option_value(arg, "--context")?;
        } else if arg.matches(&matchers.help) {
            self.help = true;
        } else if arg.matches(&matchers.verbose) {
            self.verbose += arg
                .last_match()
                .and_then(|found| found.name("count"))
                .map_or(1, str::len);
        }

        Ok(())
    }

    fn apply_operation(
        &mut self,
        arg: &mut CurrentArgument<'_>,
        matchers: &Matchers,
    ) -> Result<(), DemoError> {
        if arg.is_option() {
            // Already applied; skip over a separate value if there is one
            if matchers
                .value_bearing()
                .into_iter()
                .any(|matcher| arg.matches(matcher))
            {
                arg.value();
            } else {
                arg.mark_used();
            }
        } else if arg.options_enabled() {
            self.operations.push(arg.parse_value::<_, DemoError>()?);
        } else {
            self.passthrough
                .extend(arg.consume(0..).into_iter().map(String::from));
        }

        Ok(())
    }

    /// A human readable description of what this configuration would do. The
    /// level of detail depends on [`verbose`][Config::verbose].
    pub fn plan(&self) -> impl Display + '_ {
        let operations = self
            .operations
            .iter()
            .map(|operation| operation.name())
            .join_with(" -> ");

        let tag = lazy_format!(match (&self.tag) {
            Some(tag) => "{tag}",
            None => "(untagged)",
        });

        let jobs = lazy_format!(match (self.jobs) {
            Some(jobs) => "{jobs}",
            None => "default",
        });

        let build_args = lazy_format!("\n  build arg: {arg}" for arg in &self.build_args);
        let passthrough = self.passthrough.iter().join_with(" ");

        let context = self.context.display();

        lazy_format!(match (self.verbose) {
            0 => "{operations}",
            1 => "plan: {operations}\n  image: {tag}\n  run args: {passthrough}",
            _ => "plan: {operations}\n  image: {tag}\n  context: {context}\n  jobs: {jobs}{build_args}\n  run args: {passthrough}",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn parse(args: &[&str]) -> Result<Config, DemoError> {
        Config::from_args(args.iter().copied())
    }

    #[test]
    fn options_apply_wherever_they_appear() {
        let config = parse(&["build", "-t", "web", "run", "--jobs=4", "-vv"]).unwrap();

        assert_eq!(
            config,
            Config {
                verbose: 2,
                tag: Some("web".to_owned()),
                jobs: Some(4),
                operations: vec![Operation::Build, Operation::Run],
                ..Config::default()
            }
        );
    }

    #[test]
    fn arguments_after_terminator_are_passed_through() {
        let config = parse(&["run", "-tweb", "--", "--port", "80", "build"]).unwrap();

        assert_eq!(config.operations, [Operation::Run]);
        assert_eq!(config.tag.as_deref(), Some("web"));
        assert_eq!(config.passthrough, ["--port", "80", "build"]);
    }

    #[test]
    fn leading_terminator() {
        let config = parse(&["--", "-v", "build"]).unwrap();

        assert_eq!(config.verbose, 0);
        assert!(config.operations.is_empty());
        assert_eq!(config.passthrough, ["-v", "build"]);
    }

    #[test]
    fn option_just_before_terminator() {
        let config = parse(&["clean", "-v", "--", "x"]).unwrap();

        assert_eq!(config.verbose, 1);
        assert_eq!(config.operations, [Operation::Clean]);
        assert_eq!(config.passthrough, ["x"]);
    }

    #[rstest]
    #[case(&["-v"], 1)]
    #[case(&["-vvv"], 3)]
    #[case(&["-v", "--verbose", "-vv"], 4)]
    fn verbosity_is_counted(#[case] args: &[&str], #[case] expected: usize) {
        assert_eq!(parse(args).unwrap().verbose, expected);
    }

    #[test]
    fn repeated_build_args_accumulate() {
        let config = parse(&[
            "--build-arg",
            "A=1",
            "build",
            "--build-arg=B=2",
            "--context",
            "app",
        ])
        .unwrap();

        assert_eq!(config.build_args, ["A=1", "B=2"]);
        assert_eq!(config.context, PathBuf::from("app"));
        assert_eq!(config.operations, [Operation::Build]);
    }

    #[test]
    fn short_value_takes_precedence_over_flags() {
        let config = parse(&["-th"]).unwrap();

        assert!(!config.help);
        assert_eq!(config.tag.as_deref(), Some("h"));
    }

    #[test]
    fn help() {
        assert!(parse(&["build", "--help"]).unwrap().help);
        assert!(parse(&["-h"]).unwrap().help);
    }

    #[test]
    fn no_arguments() {
        assert_eq!(parse(&[]).unwrap(), Config::default());
    }

    #[test]
    fn unknown_option() {
        match parse(&["build", "--bogus"]) {
            Err(DemoError::Unrecognized { index, arg }) => {
                assert_eq!(index, 1);
                assert_eq!(arg, "--bogus");
            }
            other => panic!("expected an unrecognized argument, got {other:?}"),
        }
    }

    #[test]
    fn unknown_operation() {
        let error = parse(&["-v", "deploy"]).unwrap_err();
        assert_eq!(
            error.to_string(),
            "failed to parse \"deploy\": expected one of build, run, clean"
        );
    }

    #[rstest]
    #[case(&["build", "--tag"], "--tag requires an argument")]
    #[case(&["-j"], "--jobs requires an argument")]
    fn missing_value_names_the_option(#[case] args: &[&str], #[case] message: &str) {
        assert_eq!(parse(args).unwrap_err().to_string(), message);
    }

    #[test]
    fn zero_jobs_is_rejected() {
        let error = parse(&["build", "-j0"]).unwrap_err();

        assert!(matches!(error, DemoError::Custom(_)));
        assert_eq!(error.to_string(), "--jobs must be at least 1");
    }

    #[test]
    fn bad_job_count() {
        assert!(matches!(
            parse(&["--jobs", "lots"]),
            Err(DemoError::Parse { .. })
        ));
    }

    #[rstest]
    #[case(0, "build -> run")]
    #[case(1, "plan: build -> run\n  image: web\n  run args: --port 80")]
    #[case(
        2,
        "plan: build -> run\n  image: web\n  context: .\n  jobs: default\n  build arg: A=1\n  run args: --port 80"
    )]
    fn plan_detail_follows_verbosity(#[case] verbose: usize, #[case] expected: &str) {
        let config = Config {
            verbose,
            tag: Some("web".to_owned()),
            build_args: vec!["A=1".to_owned()],
            operations: vec![Operation::Build, Operation::Run],
            passthrough: vec!["--port".to_owned(), "80".to_owned()],
            ..Config::default()
        };

        assert_eq!(config.plan().to_string(), expected);
    }
}
