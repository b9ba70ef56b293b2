/*!
Implementations of the [`value`][crate::value] traits for various primitive
and standard library types
 */

use std::path::{Path, PathBuf};

use crate::value::{Error, ParsedValue, Value};

macro_rules! from_str {
    ($($type:ident $($(::$path:ident)+)?,)*) => {
        $(
            impl ParsedValue for $type $($(:: $path)+)? {}
        )*
    };
}

from_str! {
    u8, u16, u32, u64, u128, usize,
    i8, i16, i32, i64, i128, isize,
    f32, f64,
    bool,
    char,

    String,
    PathBuf,

    core::net::Ipv4Addr,
    core::net::Ipv6Addr,
    core::net::IpAddr,
    core::net::SocketAddr,
}

impl<'arg> Value<'arg> for &'arg str {
    #[inline]
    fn from_arg<E: Error>(arg: &'arg str) -> Result<Self, E> {
        Ok(arg)
    }
}

impl<'arg> Value<'arg> for &'arg Path {
    #[inline]
    fn from_arg<E: Error>(arg: &'arg str) -> Result<Self, E> {
        Ok(Path::new(arg))
    }
}
