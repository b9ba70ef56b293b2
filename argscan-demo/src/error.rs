use std::fmt::Display;

use argscan::{MatcherError, strict, value};

#[derive(Debug, thiserror::Error)]
pub enum DemoError {
    #[error(transparent)]
    Matcher(#[from] MatcherError),

    #[error("{option} requires an argument")]
    NeedArg { option: String },

    #[error("failed to parse {arg:?}: {message}")]
    Parse { arg: String, message: String },

    #[error("unrecognized argument {arg:?}")]
    Unrecognized { index: usize, arg: String },

    #[error("{0}")]
    Custom(String),
}

impl DemoError {
    /// Attach the name of the option to a missing-argument error
    pub fn for_option(self, option: &str) -> Self {
        match self {
            DemoError::NeedArg { .. } => DemoError::NeedArg {
                option: option.to_owned(),
            },
            error => error,
        }
    }
}

impl value::Error for DemoError {
    fn needs_arg() -> Self {
        Self::NeedArg {
            option: String::from("option"),
        }
    }

    fn parse_error(arg: &str, msg: impl Display) -> Self {
        Self::Parse {
            arg: arg.to_owned(),
            message: msg.to_string(),
        }
    }

    fn custom(msg: impl Display) -> Self {
        Self::Custom(msg.to_string())
    }
}

impl strict::Error for DemoError {
    fn unrecognized(index: usize, arg: &str) -> Self {
        Self::Unrecognized {
            index,
            arg: arg.to_owned(),
        }
    }
}
