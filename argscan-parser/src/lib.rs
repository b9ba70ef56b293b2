/*!
Low-level, cursor-driven scanning of command-line arguments. Takes care of
distinguishing options from positional literals, matching options against
short and long specs (including clustered short flags and inline or separated
values), and the `--` terminator. No type handling happens here.

The scanner is callback driven: [`ArgScanner::scan`] calls your function once
per argument with a [`CurrentArgument`], which you interrogate and, if you
like, use to redirect the scan:

```
use argscan_parser::{scan, MatcherError};

let mut verbose = 0;
let mut output = None;
let mut inputs = Vec::new();

scan(["-vv", "--output", "out.txt", "in.txt"], |arg| {
    if arg.option(["v", "verbose"])? {
        verbose += arg.raw().map_or(1, |raw| raw.matches('v').count());
    } else if arg.option(["o=", "output="])? {
        output = arg.value();
    } else if arg.is_literal() {
        inputs.extend(arg.value());
    }
    Ok::<_, MatcherError>(())
})?;

assert_eq!(verbose, 2);
assert_eq!(output, Some("out.txt"));
assert_eq!(inputs, ["in.txt"]);
# Ok::<_, MatcherError>(())
```
*/

mod argument;
pub mod matcher;
mod range;

pub use argument::CurrentArgument;
pub use matcher::{Matcher, MatcherError, MatcherSpec, OptionMatch};
pub use range::RelativeRange;

/**
An [`ArgScanner`] is the main entry point into `argscan_parser`. It owns a
single [`CurrentArgument`] and drives it across the argument list, calling
the callback once for each argument.

The loop is simple:

1. Advance the cursor by one. Stop if it's past the end of the list.
2. If option parsing is still enabled and the argument is exactly `--`,
   disable option parsing and go back to step 1. The `--` itself is never
   passed to the callback.
3. Classify the argument as an option if option parsing is enabled and it
   starts with `-`, and mark it unused.
4. Call the callback, then go back to step 1, from wherever the callback
   left the cursor.

The scanner operates entirely on borrowed data; the `'arg` lifetime refers to
the command-line arguments, which are assumed to outlive the scan.
*/
#[derive(Debug)]
pub struct ArgScanner<'arg> {
    current: CurrentArgument<'arg>,
}

impl<'arg> ArgScanner<'arg> {
    /// Create a new [`ArgScanner`]. The list should *exclude* the name of the
    /// program, which is commonly passed as the first argument.
    #[inline]
    #[must_use]
    pub fn new(args: impl IntoIterator<Item = &'arg str>) -> Self {
        Self {
            current: CurrentArgument::new(args.into_iter().collect()),
        }
    }

    /**
    Run the scan to completion. Any error returned by the callback stops the
    scan immediately and is returned unchanged.
    */
    pub fn scan<F, E>(mut self, mut callback: F) -> Result<(), E>
    where
        F: FnMut(&mut CurrentArgument<'arg>) -> Result<(), E>,
    {
        while self.current.begin_next() {
            callback(&mut self.current)?;
        }

        Ok(())
    }
}

/// Scan `args`, calling `callback` once per argument. This is shorthand for
/// `ArgScanner::new(args).scan(callback)`.
pub fn scan<'arg, F, E>(args: impl IntoIterator<Item = &'arg str>, callback: F) -> Result<(), E>
where
    F: FnMut(&mut CurrentArgument<'arg>) -> Result<(), E>,
{
    ArgScanner::new(args).scan(callback)
}
