//! Argument normalisation.
//!
//! Every argument is turned into a [`smol_printf::Arg`] by trait selection
//! on its static type; there is no runtime type inspection and nothing is
//! copied or allocated:
//!
//! - integers, `bool`, `char`, `f32`, `f64` are passed by value;
//! - raw pointers become addresses for `%p`;
//! - text views (`&str`, `&CStr`, `&WideStr`, `&WideCStr`) pass through;
//! - growable strings (`String`, `CString`, `WideString`, `WideCString`) are
//!   borrowed, so they must outlive the call;
//! - any other type takes part only through [`ToText`], whose result must be
//!   one of the text views above.
//!
//! Types outside these classes do not compile:
//!
//! ```compile_fail
//! struct Opaque;
//! let mut buf = String::new();
//! growfmt::sprintf!(&mut buf, "%s", Opaque);
//! ```
//!
//! ```compile_fail
//! // 128-bit integers have no C counterpart
//! let mut buf = String::new();
//! growfmt::sprintf!(&mut buf, "%d", 1u128);
//! ```

use alloc::ffi::CString;
use alloc::string::String;
use core::ffi::CStr;

use smol_printf::Arg;

#[cfg(feature = "wide")]
use widestring::{WideCStr, WideCString, WideStr, WideString};

/// Conversion of one argument into its canonical form.
///
/// Implemented for scalars by value and for text by reference; the
/// [`sprintf!`](crate::sprintf) macro relies on method-call autoref, so
/// owned strings and [`ToText`] types are borrowed, never moved.
pub trait ToArg<'a> {
    fn to_arg(self) -> Arg<'a>;
}

macro_rules! signed_args {
    ($($ty:ty),* $(,)?) => {$(
        impl<'a> ToArg<'a> for $ty {
            #[inline]
            fn to_arg(self) -> Arg<'a> {
                Arg::signed(self as i64, <$ty>::BITS as u8)
            }
        }
    )*};
}

macro_rules! unsigned_args {
    ($($ty:ty),* $(,)?) => {$(
        impl<'a> ToArg<'a> for $ty {
            #[inline]
            fn to_arg(self) -> Arg<'a> {
                Arg::unsigned(self as u64, <$ty>::BITS as u8)
            }
        }
    )*};
}

signed_args!(i8, i16, i32, i64, isize);
unsigned_args!(u8, u16, u32, u64, usize);

// C promotes bool to int
impl<'a> ToArg<'a> for bool {
    #[inline]
    fn to_arg(self) -> Arg<'a> {
        Arg::signed(self as i64, 32)
    }
}

impl<'a> ToArg<'a> for char {
    #[inline]
    fn to_arg(self) -> Arg<'a> {
        Arg::unsigned(self as u64, 32)
    }
}

impl<'a> ToArg<'a> for f32 {
    #[inline]
    fn to_arg(self) -> Arg<'a> {
        Arg::Float(self as f64)
    }
}

impl<'a> ToArg<'a> for f64 {
    #[inline]
    fn to_arg(self) -> Arg<'a> {
        Arg::Float(self)
    }
}

impl<'a, T: ?Sized> ToArg<'a> for *const T {
    #[inline]
    fn to_arg(self) -> Arg<'a> {
        Arg::Ptr(self.cast::<()>() as usize)
    }
}

impl<'a, T: ?Sized> ToArg<'a> for *mut T {
    #[inline]
    fn to_arg(self) -> Arg<'a> {
        Arg::Ptr(self.cast::<()>() as usize)
    }
}

impl<'a> ToArg<'a> for &'a str {
    #[inline]
    fn to_arg(self) -> Arg<'a> {
        Arg::Str(self.as_bytes())
    }
}

impl<'a> ToArg<'a> for &'a CStr {
    #[inline]
    fn to_arg(self) -> Arg<'a> {
        Arg::Str(self.to_bytes())
    }
}

impl<'a> ToArg<'a> for &'a String {
    #[inline]
    fn to_arg(self) -> Arg<'a> {
        Arg::Str(self.as_bytes())
    }
}

impl<'a> ToArg<'a> for &'a CString {
    #[inline]
    fn to_arg(self) -> Arg<'a> {
        Arg::Str(self.as_bytes())
    }
}

#[cfg(feature = "wide")]
impl<'a> ToArg<'a> for &'a WideStr {
    #[inline]
    fn to_arg(self) -> Arg<'a> {
        Arg::WStr(self.as_slice())
    }
}

#[cfg(feature = "wide")]
impl<'a> ToArg<'a> for &'a WideCStr {
    #[inline]
    fn to_arg(self) -> Arg<'a> {
        Arg::WStr(self.as_slice())
    }
}

#[cfg(feature = "wide")]
impl<'a> ToArg<'a> for &'a WideString {
    #[inline]
    fn to_arg(self) -> Arg<'a> {
        Arg::WStr(self.as_slice())
    }
}

#[cfg(feature = "wide")]
impl<'a> ToArg<'a> for &'a WideCString {
    #[inline]
    fn to_arg(self) -> Arg<'a> {
        Arg::WStr(self.as_slice())
    }
}

mod sealed {
    pub trait Sealed {}
}

/// Borrowed text a [`ToText`] conversion may return.
///
/// Sealed: only `&str`, `&CStr`, `&WideStr` and `&WideCStr` qualify.
/// Owned strings are rejected so the view can never dangle:
///
/// ```compile_fail
/// use growfmt::ToText;
///
/// struct Owned;
///
/// impl ToText for Owned {
///     type Text<'a> = String;
///
///     fn to_text(&self) -> String {
///         String::from("Test")
///     }
/// }
/// ```
pub trait RawText<'a>: sealed::Sealed {
    fn into_arg(self) -> Arg<'a>;
}

impl sealed::Sealed for &str {}

impl<'a, 'b: 'a> RawText<'a> for &'b str {
    #[inline]
    fn into_arg(self) -> Arg<'a> {
        Arg::Str(self.as_bytes())
    }
}

impl sealed::Sealed for &CStr {}

impl<'a, 'b: 'a> RawText<'a> for &'b CStr {
    #[inline]
    fn into_arg(self) -> Arg<'a> {
        Arg::Str(self.to_bytes())
    }
}

#[cfg(feature = "wide")]
impl sealed::Sealed for &WideStr {}

#[cfg(feature = "wide")]
impl<'a, 'b: 'a> RawText<'a> for &'b WideStr {
    #[inline]
    fn into_arg(self) -> Arg<'a> {
        Arg::WStr(self.as_slice())
    }
}

#[cfg(feature = "wide")]
impl sealed::Sealed for &WideCStr {}

#[cfg(feature = "wide")]
impl<'a, 'b: 'a> RawText<'a> for &'b WideCStr {
    #[inline]
    fn into_arg(self) -> Arg<'a> {
        Arg::WStr(self.as_slice())
    }
}

/// Text conversion for user types.
///
/// ```
/// use core::ffi::CStr;
/// use growfmt::ToText;
///
/// struct Version;
///
/// impl ToText for Version {
///     type Text<'a> = &'a CStr;
///
///     fn to_text(&self) -> &CStr {
///         c"1.0.3"
///     }
/// }
///
/// let mut buf = String::new();
/// assert_eq!(growfmt::sprintf!(&mut buf, "v%s", Version), 6);
/// assert_eq!(buf, "v1.0.3");
/// ```
pub trait ToText {
    type Text<'a>: RawText<'a>
    where
        Self: 'a;

    fn to_text(&self) -> Self::Text<'_>;
}

impl<'a, T: ToText + ?Sized> ToArg<'a> for &'a T {
    #[inline]
    fn to_arg(self) -> Arg<'a> {
        self.to_text().into_arg()
    }
}
