/*!
Typed values, strict scanning, and usage messages on top of
[`argscan_parser`].

`argscan_parser` hands your callback one [`CurrentArgument`] at a time and
deals only in raw `&str` values. This crate adds the pieces most programs
want next:

- [`ArgumentExt`] parses option values into Rust types through the
  [`Value`][value::Value] trait.
- [`scan_strict`] turns any argument your callback didn't recognize into an
  error.
- [`help::Usage`] describes your options and operations once, for both
  matching and printing a usage message.

Errors are expressed as traits ([`value::Error`], [`strict::Error`]), so you
can use your own error type; [`errors::ScanError`] and [`errors::EmptyError`]
are ready-made implementations.

```
use argscan::{ArgumentExt, errors::ScanError, scan_strict};

let mut jobs: u32 = 1;
let mut targets = Vec::new();

scan_strict(["-j", "8", "build", "test"], |arg| {
    if arg.option(["j=", "jobs="])? {
        jobs = arg.parse_value::<_, ScanError>()?;
    } else if arg.is_literal() {
        targets.push(arg.parse_value::<String, ScanError>()?);
    }
    Ok::<_, ScanError>(())
})?;

assert_eq!(jobs, 8);
assert_eq!(targets, ["build", "test"]);
# Ok::<_, ScanError>(())
```
*/

pub mod errors;
pub mod help;
mod impls;
mod printers;
pub mod strict;
pub mod value;

pub use argscan_parser::{
    ArgScanner, CurrentArgument, Matcher, MatcherError, MatcherSpec, OptionMatch, RelativeRange,
    scan,
};
pub use strict::scan_strict;

use value::Value;

/// Typed access to argument values
pub trait ArgumentExt<'arg> {
    /**
    Get the [value][CurrentArgument::value] of this argument and parse it
    into `T`. Fails with [`value::Error::needs_arg`] if an option expected a
    separate value and there were no arguments left.
    */
    fn parse_value<T, E>(&mut self) -> Result<T, E>
    where
        T: Value<'arg>,
        E: value::Error;

    /// [Consume][CurrentArgument::consume] a range of arguments and parse each
    /// of them into `T`.
    fn consume_values<T, E>(&mut self, range: impl RelativeRange) -> Result<Vec<T>, E>
    where
        T: Value<'arg>,
        E: value::Error;
}

impl<'arg> ArgumentExt<'arg> for CurrentArgument<'arg> {
    fn parse_value<T, E>(&mut self) -> Result<T, E>
    where
        T: Value<'arg>,
        E: value::Error,
    {
        T::from_arg(self.value().ok_or_else(E::needs_arg)?)
    }

    fn consume_values<T, E>(&mut self, range: impl RelativeRange) -> Result<Vec<T>, E>
    where
        T: Value<'arg>,
        E: value::Error,
    {
        self.consume(range).into_iter().map(T::from_arg).collect()
    }
}
