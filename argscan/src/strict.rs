/*!
Scanning that treats unrecognized arguments as errors.
*/

use argscan_parser::{ArgScanner, CurrentArgument};
use tracing::debug;

/// Errors that can occur when an argument goes unrecognized
pub trait Error {
    /// Nothing in the callback inspected the argument at `index`
    fn unrecognized(index: usize, arg: &str) -> Self;
}

/**
Scan `args` like [`argscan_parser::scan`], but check each argument after the
callback returns. If the callback never [used][CurrentArgument::is_used] it,
the scan stops with [`Error::unrecognized`].

Callbacks that defer an argument to a later pass (see
[`CurrentArgument::restart`]) should [mark it used][CurrentArgument::mark_used]
so that it isn't reported.
*/
pub fn scan_strict<'arg, F, E>(
    args: impl IntoIterator<Item = &'arg str>,
    mut callback: F,
) -> Result<(), E>
where
    F: FnMut(&mut CurrentArgument<'arg>) -> Result<(), E>,
    E: Error,
{
    ArgScanner::new(args).scan(|arg| {
        let index = arg.index();
        let token = arg.get(index).unwrap_or_default();

        callback(arg)?;

        match arg.is_unused() {
            false => Ok(()),
            true => {
                debug!(index, token, "unrecognized argument");
                Err(E::unrecognized(usize::try_from(index).unwrap_or(0), token))
            }
        }
    })
}
