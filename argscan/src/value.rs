/*!
Traits for turning argument values into Rust types.
*/

use core::{fmt::Display, str::FromStr};

/// Error for things that can go wrong while turning an argument into a
/// [`Value`]
pub trait Error {
    /// The option requires a value, and none was provided
    fn needs_arg() -> Self;

    /// The value failed to parse into an instance of the type
    fn parse_error(arg: &str, msg: impl Display) -> Self;

    /// Something else went wrong
    fn custom(msg: impl Display) -> Self;
}

/**
A type that can be parsed from a single argument value, such as the `8` in
`--jobs 8` or the `out.txt` in `-oout.txt`.

Most types should implement [`ParsedValue`] instead, which provides a
[`Value`] implementation based on [`FromStr`]. Implementing [`Value`]
directly is useful for types that borrow from the argument.
*/
pub trait Value<'arg>: Sized {
    fn from_arg<E: Error>(arg: &'arg str) -> Result<Self, E>;
}

/// For types with a [`FromStr`] implementation, [`ParsedValue`] automatically
/// gives them a [`Value`] implementation.
pub trait ParsedValue: FromStr {}

impl<'arg, T> Value<'arg> for T
where
    T: ParsedValue,
    T::Err: Display,
{
    #[inline]
    fn from_arg<E: Error>(arg: &'arg str) -> Result<Self, E> {
        arg.parse().map_err(|err| E::parse_error(arg, err))
    }
}
