// smol-printf: minimal no_std printf engine for narrow and wide text.
// arg:       canonical argument forms (integer, float, pointer, text views)
// directive: `%[flags][width][.precision][length]conv` parser
// sink:      output sinks; length counter (probe) and bounded slice (render)
// width:     character-width adapters; Narrow (UTF-8 bytes) and Wide
// printf:    template interpreter, `probe_length` and `render`
// int:       d i u o x X p
// float:     f F e E g G a A
// text:      c s

#![no_std]

#[cfg(test)]
extern crate std;

mod arg;
mod directive;
mod float;
mod int;
mod printf;
mod sink;
mod text;
mod width;

#[cfg(feature = "wide")]
mod wide;

pub use arg::{Arg, Int};
pub use printf::{probe_length, render};
pub use width::{Narrow, Width};

#[cfg(feature = "wide")]
pub use wide::Wide;
#[cfg(feature = "wide")]
pub use widestring::WideChar;

/// Reasons the engine refuses a template/argument combination.
///
/// Every variant is a hard failure: nothing is retried and no partial
/// result is reported as success.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// Unknown conversion, dangling `%` or positional argument.
    BadFormat,
    /// A directive needed more arguments than were supplied.
    MissingArg,
    /// The argument's canonical form does not fit the conversion.
    BadArgType,
    /// `%c` argument is not a Unicode scalar value.
    BadChar,
    /// Width or precision does not fit in a C `int`.
    Overflow,
    /// `%n` and friends; writing through arguments is not supported.
    Unsupported,
    /// Render buffer cannot hold the output plus terminator.
    NoSpace,
}

impl Error {
    pub const fn as_str(self) -> &'static str {
        match self {
            Error::BadFormat => "printf: malformed conversion directive",
            Error::MissingArg => "printf: too few arguments",
            Error::BadArgType => "printf: argument type does not match conversion",
            Error::BadChar => "printf: %c argument is not a valid character",
            Error::Overflow => "printf: width or precision out of range",
            Error::Unsupported => "printf: unsupported conversion",
            Error::NoSpace => "printf: output buffer too small",
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::error::Error for Error {}

// C strings end at the first NUL; slices without one are taken whole.
#[inline]
pub(crate) fn until_nul<U: Copy + Default + PartialEq>(s: &[U]) -> &[U] {
    let nul = U::default();
    match s.iter().position(|&u| u == nul) {
        Some(end) => &s[..end],
        None => s,
    }
}
