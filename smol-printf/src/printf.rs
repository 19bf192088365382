//! Template interpreter and the two width-generic primitives.
//!
//! [`probe_length`] and [`render`] run the exact same interpretation over
//! different sinks, so the length reported by the probe is the length the
//! render will produce for the same inputs.

use crate::arg::{Arg, ArgCursor};
use crate::directive::{self, Conv, Directive, INT_MAX};
use crate::sink::{Counter, Sink, SliceSink};
use crate::width::Width;
use crate::{Error, float, int, text, until_nul};

/// Dry-run `template` against `args` and return the number of units the
/// render would produce, excluding the terminator.
pub fn probe_length<W: Width>(template: &[W::Unit], args: &[Arg<'_>]) -> Result<usize, Error> {
    let mut count = Counter::new();
    interpret::<W, _>(&mut count, template, args)?;
    if count.len() > INT_MAX {
        return Err(Error::Overflow);
    }
    Ok(count.len())
}

/// Render `template` into `buf`, followed by a terminator.
///
/// `buf` must hold the output plus one unit; otherwise the terminated
/// prefix that fits is left in `buf` and [`Error::NoSpace`] is returned.
pub fn render<W: Width>(
    buf: &mut [W::Unit],
    template: &[W::Unit],
    args: &[Arg<'_>],
) -> Result<usize, Error> {
    let mut sink = SliceSink::new(buf);
    let res = interpret::<W, _>(&mut sink, template, args);
    let stored = sink.finish();
    res?;
    stored
}

fn interpret<W: Width, S: Sink<W::Unit>>(
    out: &mut S,
    template: &[W::Unit],
    args: &[Arg<'_>],
) -> Result<(), Error> {
    let tmpl = until_nul(template);
    let mut args = ArgCursor::new(args);
    let mut pos = 0;

    while pos < tmpl.len() {
        let start = pos;
        while pos < tmpl.len() && W::ascii(tmpl[pos]) != Some(b'%') {
            pos += 1;
        }
        out.put_all(&tmpl[start..pos]);
        if pos == tmpl.len() {
            break;
        }

        let at = pos;
        pos += 1;
        let res = directive::parse::<W>(tmpl, &mut pos, &mut args)
            .and_then(|d| convert::<W, S>(out, &d, &mut args));
        if let Err(e) = res {
            log::debug!("printf: {} ({} template, offset {})", e, W::NAME, at);
            return Err(e);
        }
    }

    if args.remaining() > 0 {
        log::trace!("printf: {} unused argument(s)", args.remaining());
    }
    Ok(())
}

fn convert<W: Width, S: Sink<W::Unit>>(
    out: &mut S,
    d: &Directive,
    args: &mut ArgCursor<'_, '_>,
) -> Result<(), Error> {
    match d.conv {
        Conv::Percent => {
            out.put(W::from_ascii(b'%'));
            Ok(())
        }
        Conv::Signed | Conv::Unsigned | Conv::Octal | Conv::Hex { .. } => {
            int::fmt_int::<W, S>(out, d, args.next_int()?)
        }
        Conv::Ptr => int::fmt_ptr::<W, S>(out, d, args.next()?),
        Conv::Float { .. } => match args.next()? {
            Arg::Float(v) => float::fmt_float::<W, S>(out, d, v),
            _ => Err(Error::BadArgType),
        },
        Conv::Char => text::fmt_char::<W, S>(out, d, args.next_int()?),
        Conv::Str => text::fmt_str::<W, S>(out, d, args.next()?),
    }
}

/// Emit `prefix` and a body of `body_len` units padded to the field width.
/// Zero padding goes between prefix and body when `zero_ok` allows it.
pub(crate) fn pad_field<W: Width, S: Sink<W::Unit>>(
    out: &mut S,
    d: &Directive,
    prefix: &[u8],
    zero_ok: bool,
    body_len: usize,
    body: impl FnOnce(&mut S),
) {
    let total = prefix.len() + body_len;
    let pad = d.width.saturating_sub(total);
    let put_prefix = |out: &mut S| {
        for &b in prefix {
            out.put(W::from_ascii(b));
        }
    };

    if d.left() {
        put_prefix(out);
        body(out);
        out.fill(W::from_ascii(b' '), pad);
    } else if zero_ok && d.flags.contains(directive::Flags::ZERO) {
        put_prefix(out);
        out.fill(W::from_ascii(b'0'), pad);
        body(out);
    } else {
        out.fill(W::from_ascii(b' '), pad);
        put_prefix(out);
        body(out);
    }
}
