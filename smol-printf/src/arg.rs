//! Canonical argument forms.
//!
//! Callers never build a C `va_list`; every argument is normalised up front
//! into one of a handful of [`Arg`] variants. Scalars are carried by value,
//! text by borrowed view, so building an argument list never allocates.

#[cfg(feature = "wide")]
use widestring::WideChar;

use crate::Error;

/// An integral argument: raw bits plus the width of the type it came from.
///
/// Signed values are stored sign-extended, so reinterpreting at a smaller
/// width (`%u` of `-1i32`, `%hhx` of `300`) behaves like the C cast would.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Int {
    bits: u64,
    width: u8,
}

impl Int {
    pub const fn from_signed(value: i64, width: u8) -> Self {
        Self {
            bits: value as u64,
            width,
        }
    }

    pub const fn from_unsigned(value: u64, width: u8) -> Self {
        Self { bits: value, width }
    }

    /// Bit width of the source type (8, 16, 32 or 64).
    #[inline]
    pub const fn width(self) -> u8 {
        self.width
    }

    /// Value reinterpreted as a two's complement integer of `width` bits.
    pub const fn as_signed(self, width: u8) -> i64 {
        if width >= 64 || width == 0 {
            return self.bits as i64;
        }
        let shift = 64 - width as u32;
        ((self.bits << shift) as i64) >> shift
    }

    /// Value truncated to `width` bits.
    pub const fn as_unsigned(self, width: u8) -> u64 {
        if width >= 64 || width == 0 {
            return self.bits;
        }
        self.bits & ((1u64 << width) - 1)
    }
}

/// One normalised printf argument.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Arg<'a> {
    /// Integral scalar (`d i u o x X c`, and `*` width/precision).
    Int(Int),
    /// Floating-point scalar; `f32` is promoted on the way in.
    Float(f64),
    /// Address for `%p`.
    Ptr(usize),
    /// Narrow text view, nominally UTF-8.
    Str(&'a [u8]),
    /// Wide text view.
    #[cfg(feature = "wide")]
    WStr(&'a [WideChar]),
}

impl<'a> Arg<'a> {
    pub const fn signed(value: i64, width: u8) -> Self {
        Arg::Int(Int::from_signed(value, width))
    }

    pub const fn unsigned(value: u64, width: u8) -> Self {
        Arg::Int(Int::from_unsigned(value, width))
    }

    pub const fn str(s: &'a str) -> Self {
        Arg::Str(s.as_bytes())
    }
}

/// Forward-only cursor over an argument list.
pub(crate) struct ArgCursor<'l, 'a> {
    list: &'l [Arg<'a>],
    next: usize,
}

impl<'l, 'a> ArgCursor<'l, 'a> {
    pub(crate) fn new(list: &'l [Arg<'a>]) -> Self {
        Self { list, next: 0 }
    }

    pub(crate) fn next(&mut self) -> Result<Arg<'a>, Error> {
        let arg = *self.list.get(self.next).ok_or(Error::MissingArg)?;
        self.next += 1;
        Ok(arg)
    }

    pub(crate) fn next_int(&mut self) -> Result<Int, Error> {
        match self.next()? {
            Arg::Int(i) => Ok(i),
            _ => Err(Error::BadArgType),
        }
    }

    pub(crate) fn remaining(&self) -> usize {
        self.list.len() - self.next
    }
}
