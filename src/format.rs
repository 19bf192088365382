//! Two-phase driver: probe the exact length, size the buffer, render.
//!
//! Both phases run the same interpreter over the same arguments, so the
//! buffer is sized once and never truncated. A zero-length result is a
//! success; only a failed phase or an unstorable result is an error.

use smol_printf::{Arg, Width};

use crate::{Error, Template, TextBuf};

/// Value returned by [`format`] when formatting fails.
pub const FAILURE: i32 = -1;

/// Number of units `template` would produce with `args`, terminator excluded.
pub fn probe<W: Width, T: Template<W> + ?Sized>(
    template: &T,
    args: &[Arg<'_>],
) -> Result<usize, Error> {
    smol_printf::probe_length::<W>(template.units(), args).map_err(Error::Probe)
}

/// Format into `buf`, replacing its content, and return the number of units
/// written.
pub fn try_format<B, T>(buf: &mut B, template: &T, args: &[Arg<'_>]) -> Result<usize, Error>
where
    B: TextBuf + ?Sized,
    T: Template<B::Width> + ?Sized,
{
    let tmpl = template.units();
    let len = smol_printf::probe_length::<B::Width>(tmpl, args).map_err(Error::Probe)?;
    fill(buf, tmpl, args, len)
}

// Size `buf` for `len` units plus terminator, render, store.
// On a render or store failure `buf` is left empty.
fn fill<B: TextBuf + ?Sized>(
    buf: &mut B,
    tmpl: &[<B::Width as Width>::Unit],
    args: &[Arg<'_>],
    len: usize,
) -> Result<usize, Error> {
    let mut units = buf.take_units();
    units.clear();
    units.resize(len + 1, Default::default());

    let written =
        smol_printf::render::<B::Width>(&mut units, tmpl, args).map_err(Error::Render)?;
    if written != len {
        log::warn!("growfmt: probed {} units, rendered {}", len, written);
    }

    units.truncate(written);
    buf.store_units(units)?;
    log::trace!("growfmt: {} units ({})", written, <B::Width as Width>::NAME);
    Ok(written)
}

/// Format into `buf` and return the number of units written, or [`FAILURE`].
pub fn format<B, T>(buf: &mut B, template: &T, args: &[Arg<'_>]) -> i32
where
    B: TextBuf + ?Sized,
    T: Template<B::Width> + ?Sized,
{
    match try_format(buf, template, args) {
        Ok(n) => i32::try_from(n).unwrap_or(FAILURE),
        Err(e) => {
            log::debug!("{}", e);
            FAILURE
        }
    }
}

/// Format into a growable buffer, C style.
///
/// Arguments are normalised at compile time through [`ToArg`](crate::ToArg)
/// and borrowed, not moved. Evaluates to the number of units written, or
/// [`FAILURE`](crate::FAILURE).
///
/// ```
/// let mut buf = String::new();
/// let n = growfmt::sprintf!(&mut buf, "%s=%05.1f", "pi", 3.14159);
/// assert_eq!((n, buf.as_str()), (8, "pi=003.1"));
/// ```
#[macro_export]
macro_rules! sprintf {
    ($buf:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {{
        #[allow(unused_imports)]
        use $crate::ToArg as _;
        $crate::format($buf, $fmt, &[$(($arg).to_arg()),*])
    }};
}

/// Like [`sprintf!`], but evaluates to `Result<usize, growfmt::Error>`.
#[macro_export]
macro_rules! try_sprintf {
    ($buf:expr, $fmt:expr $(, $arg:expr)* $(,)?) => {{
        #[allow(unused_imports)]
        use $crate::ToArg as _;
        $crate::try_format($buf, $fmt, &[$(($arg).to_arg()),*])
    }};
}
