// Text conversions: c and s.
// Narrow `%c` writes the low byte of its argument, as C does; `%lc`, `%C`
// and every wide `%c` take a code point and encode it in the output width.
// Text arguments carry their own width; the `l` modifier is accepted on `%s`
// but the argument decides how its units are read. Precision counts output
// units.

use crate::arg::{Arg, Int};
use crate::directive::{Directive, Length};
use crate::printf::pad_field;
use crate::sink::{Counter, Sink};
use crate::width::Width;
use crate::{Error, until_nul};

#[inline]
pub(crate) fn put_ascii<W: Width, S: Sink<W::Unit>>(out: &mut S, bytes: &[u8]) {
    for &b in bytes {
        out.put(W::from_ascii(b));
    }
}

pub(crate) fn fmt_char<W: Width, S: Sink<W::Unit>>(
    out: &mut S,
    d: &Directive,
    arg: Int,
) -> Result<(), Error> {
    if d.length != Length::Long {
        if let Some(unit) = W::byte_char(arg.as_unsigned(8) as u8) {
            pad_field::<W, S>(out, d, &[], false, 1, |out| out.put(unit));
            return Ok(());
        }
    }

    let code = arg.as_unsigned(arg.width());
    let ch = u32::try_from(code)
        .ok()
        .and_then(char::from_u32)
        .ok_or(Error::BadChar)?;
    pad_field::<W, S>(out, d, &[], false, W::char_len(ch), |out| {
        W::put_char(out, ch)
    });
    Ok(())
}

pub(crate) fn fmt_str<W: Width, S: Sink<W::Unit>>(
    out: &mut S,
    d: &Directive,
    arg: Arg<'_>,
) -> Result<(), Error> {
    let limit = d.precision.unwrap_or(usize::MAX);
    let len = put_text::<W, Counter>(&mut Counter::new(), arg, limit)?;
    let mut res = Ok(0);
    pad_field::<W, S>(out, d, &[], false, len, |out| {
        res = put_text::<W, S>(out, arg, limit);
    });
    res.map(|_| ())
}

fn put_text<W: Width, S: Sink<W::Unit>>(
    out: &mut S,
    arg: Arg<'_>,
    limit: usize,
) -> Result<usize, Error> {
    match arg {
        Arg::Str(s) => Ok(W::put_narrow(out, until_nul(s), limit)),
        #[cfg(feature = "wide")]
        Arg::WStr(s) => Ok(W::put_wide(out, until_nul(s), limit)),
        _ => Err(Error::BadArgType),
    }
}
