// growfmt: printf-style formatting into growable narrow and wide strings.
// normalize: compile-time argument normalisation (ToArg, ToText)
// buffer:    output buffers and templates per character width
// format:    two-phase driver (probe, size, render) and the macros
// error:     driver errors
//
// The printf engine itself is the smol-printf crate.

//! Type-checked printf into growable strings.
//!
//! ```
//! use growfmt::sprintf;
//!
//! let mut out = String::new();
//! let who = String::from("world");
//! assert_eq!(sprintf!(&mut out, "hello %s, %d%%", &who, 42), 16);
//! assert_eq!(out, "hello world, 42%");
//! ```
//!
//! With the `wide` feature, wide buffers take wide templates; text
//! arguments of either width are transcoded into the buffer's width:
//!
//! ```
//! # #[cfg(feature = "wide")] {
//! use growfmt::sprintf;
//! use growfmt::widestring::{WideString, widecstr};
//!
//! let mut out = WideString::new();
//! assert_eq!(sprintf!(&mut out, widecstr!("%ls %s"), widecstr!("hello"), "world"), 11);
//! assert_eq!(out.to_string_lossy(), "hello world");
//! # }
//! ```

#![no_std]

extern crate alloc;

#[cfg(test)]
extern crate std;

mod buffer;
mod error;
mod format;
mod normalize;

pub use buffer::{Template, TextBuf};
pub use error::Error;
pub use format::{FAILURE, format, probe, try_format};
pub use normalize::{RawText, ToArg, ToText};

pub use smol_printf::{Arg, Narrow, Width};
#[cfg(feature = "wide")]
pub use smol_printf::{Wide, WideChar};

#[cfg(feature = "wide")]
pub use widestring;
