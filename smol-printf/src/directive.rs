// Conversion directive parser: `%[flags][width][.precision][length]conv`.
// `*` width/precision are resolved here, so they consume arguments in
// template order. Positional `n$` arguments are not supported.

use crate::Error;
use crate::arg::ArgCursor;
use crate::width::Width;

// C `int` bound for widths, precisions and the total output length
pub(crate) const INT_MAX: usize = i32::MAX as usize;

bitflags::bitflags! {
    /// Directive flags.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
    pub struct Flags: u8 {
        /// `-`: left-align within the field width.
        const LEFT = 1 << 0;
        /// `+`: always print a sign for signed conversions.
        const PLUS = 1 << 1;
        /// ` `: space in place of a `+` sign. Ignored when `PLUS` is set.
        const SPACE = 1 << 2;
        /// `0`: pad numbers with zeros. Ignored with `LEFT`, and for
        /// integers when a precision is given.
        const ZERO = 1 << 3;
        /// `#`: alternate form (`0x` prefix, forced decimal point, ...).
        const ALT = 1 << 4;
        /// `'`: thousands grouping; the C locale has none.
        const GROUP = 1 << 5;
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Length {
    Default,
    Char,
    Short,
    Long,
    LongLong,
    IntMax,
    Size,
    PtrDiff,
    LongDouble,
}

impl Length {
    /// Width an integer argument is truncated to, if the modifier narrows it.
    #[inline]
    pub(crate) fn int_bits(self) -> Option<u8> {
        match self {
            Length::Char => Some(8),
            Length::Short => Some(16),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FloatStyle {
    Fixed,
    Exp,
    Shortest,
    Hex,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Conv {
    Signed,
    Unsigned,
    Octal,
    Hex { upper: bool },
    Float { style: FloatStyle, upper: bool },
    Char,
    Str,
    Ptr,
    Percent,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Directive {
    pub flags: Flags,
    pub width: usize,
    pub precision: Option<usize>,
    pub length: Length,
    pub conv: Conv,
}

impl Directive {
    #[inline]
    pub(crate) fn left(&self) -> bool {
        self.flags.contains(Flags::LEFT)
    }

    #[inline]
    pub(crate) fn alt(&self) -> bool {
        self.flags.contains(Flags::ALT)
    }

    /// Sign character for a non-negative signed value, if any.
    #[inline]
    pub(crate) fn plus_sign(&self) -> Option<u8> {
        if self.flags.contains(Flags::PLUS) {
            Some(b'+')
        } else if self.flags.contains(Flags::SPACE) {
            Some(b' ')
        } else {
            None
        }
    }
}

struct Scan<'t, W: Width> {
    tmpl: &'t [W::Unit],
    pos: usize,
}

impl<W: Width> Scan<'_, W> {
    #[inline]
    fn peek(&self) -> Option<u8> {
        // non-ASCII units never start a directive component
        self.tmpl.get(self.pos).map(|&u| W::ascii(u).unwrap_or(0x80))
    }

    #[inline]
    fn eat(&mut self, b: u8) -> bool {
        if self.peek() == Some(b) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn number(&mut self) -> Result<Option<usize>, Error> {
        let mut value: Option<usize> = None;
        while let Some(d @ b'0'..=b'9') = self.peek() {
            let acc = value.unwrap_or(0);
            let next = acc
                .checked_mul(10)
                .and_then(|v| v.checked_add((d - b'0') as usize))
                .filter(|&v| v <= INT_MAX)
                .ok_or(Error::Overflow)?;
            value = Some(next);
            self.pos += 1;
        }
        Ok(value)
    }
}

/// Parse one directive. `pos` points just past the `%` and is left just
/// past the conversion character.
pub(crate) fn parse<W: Width>(
    tmpl: &[W::Unit],
    pos: &mut usize,
    args: &mut ArgCursor<'_, '_>,
) -> Result<Directive, Error> {
    let mut s = Scan::<W> { tmpl, pos: *pos };

    let mut flags = Flags::empty();
    loop {
        let flag = match s.peek() {
            Some(b'-') => Flags::LEFT,
            Some(b'+') => Flags::PLUS,
            Some(b' ') => Flags::SPACE,
            Some(b'0') => Flags::ZERO,
            Some(b'#') => Flags::ALT,
            Some(b'\'') => Flags::GROUP,
            _ => break,
        };
        flags |= flag;
        s.pos += 1;
    }

    let mut width = 0;
    if s.eat(b'*') {
        let w = star(args)?;
        if w < 0 {
            flags |= Flags::LEFT;
        }
        width = w.unsigned_abs() as usize;
    } else if let Some(w) = s.number()? {
        if s.peek() == Some(b'$') {
            return Err(Error::BadFormat);
        }
        width = w;
    }

    let mut precision = None;
    if s.eat(b'.') {
        if s.eat(b'*') {
            let p = star(args)?;
            precision = usize::try_from(p).ok();
        } else {
            precision = Some(s.number()?.unwrap_or(0));
        }
    }

    let length = match s.peek() {
        Some(b'h') => {
            s.pos += 1;
            if s.eat(b'h') { Length::Char } else { Length::Short }
        }
        Some(b'l') => {
            s.pos += 1;
            if s.eat(b'l') { Length::LongLong } else { Length::Long }
        }
        Some(b'q') => {
            s.pos += 1;
            Length::LongLong
        }
        Some(b'j') => {
            s.pos += 1;
            Length::IntMax
        }
        Some(b'z') => {
            s.pos += 1;
            Length::Size
        }
        Some(b't') => {
            s.pos += 1;
            Length::PtrDiff
        }
        Some(b'L') => {
            s.pos += 1;
            Length::LongDouble
        }
        _ => Length::Default,
    };

    // `%C` and `%S` are `%lc` and `%ls`
    let length = match s.peek() {
        Some(b'C' | b'S') => Length::Long,
        _ => length,
    };

    let float = |style, upper| Conv::Float { style, upper };
    let conv = match s.peek() {
        Some(b'd' | b'i') => Conv::Signed,
        Some(b'u') => Conv::Unsigned,
        Some(b'o') => Conv::Octal,
        Some(b'x') => Conv::Hex { upper: false },
        Some(b'X') => Conv::Hex { upper: true },
        Some(b'f') => float(FloatStyle::Fixed, false),
        Some(b'F') => float(FloatStyle::Fixed, true),
        Some(b'e') => float(FloatStyle::Exp, false),
        Some(b'E') => float(FloatStyle::Exp, true),
        Some(b'g') => float(FloatStyle::Shortest, false),
        Some(b'G') => float(FloatStyle::Shortest, true),
        Some(b'a') => float(FloatStyle::Hex, false),
        Some(b'A') => float(FloatStyle::Hex, true),
        Some(b'c' | b'C') => Conv::Char,
        Some(b's' | b'S') => Conv::Str,
        Some(b'p') => Conv::Ptr,
        Some(b'%') => Conv::Percent,
        Some(b'n') => return Err(Error::Unsupported),
        _ => return Err(Error::BadFormat),
    };
    s.pos += 1;
    *pos = s.pos;

    Ok(Directive {
        flags,
        width,
        precision,
        length,
        conv,
    })
}

fn star(args: &mut ArgCursor<'_, '_>) -> Result<i64, Error> {
    let i = args.next_int()?;
    let v = i.as_signed(i.width());
    if v.unsigned_abs() > INT_MAX as u64 {
        return Err(Error::Overflow);
    }
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arg::Arg;
    use crate::width::Narrow;

    fn directive(src: &str, args: &[Arg<'_>]) -> Result<(Directive, usize), Error> {
        let mut cur = ArgCursor::new(args);
        let mut pos = 1;
        let d = parse::<Narrow>(src.as_bytes(), &mut pos, &mut cur)?;
        Ok((d, pos))
    }

    #[test]
    fn flags_width_precision_length() {
        let (d, end) = directive("%-+#08.3lld rest", &[]).unwrap();
        assert_eq!(end, 11);
        assert!(d.flags.contains(Flags::LEFT | Flags::PLUS | Flags::ALT | Flags::ZERO));
        assert_eq!(d.width, 8);
        assert_eq!(d.precision, Some(3));
        assert_eq!(d.length, Length::LongLong);
        assert_eq!(d.conv, Conv::Signed);
    }

    #[test]
    fn bare_dot_means_zero_precision() {
        let (d, _) = directive("%.f", &[]).unwrap();
        assert_eq!(d.precision, Some(0));
        assert_eq!(
            d.conv,
            Conv::Float {
                style: FloatStyle::Fixed,
                upper: false
            }
        );
    }

    #[test]
    fn upper_c_and_s_are_long() {
        let (d, _) = directive("%C", &[]).unwrap();
        assert_eq!((d.length, d.conv), (Length::Long, Conv::Char));
        let (d, _) = directive("%S", &[]).unwrap();
        assert_eq!((d.length, d.conv), (Length::Long, Conv::Str));
    }

    #[test]
    fn star_consumes_arguments() {
        let args = [Arg::signed(-6, 32), Arg::signed(-1, 32)];
        let (d, _) = directive("%*.*s", &args).unwrap();
        assert!(d.left());
        assert_eq!(d.width, 6);
        assert_eq!(d.precision, None);
    }

    #[test]
    fn rejects_unknown_and_unsupported() {
        assert_eq!(directive("%y", &[]).unwrap_err(), Error::BadFormat);
        assert_eq!(directive("%", &[]).unwrap_err(), Error::BadFormat);
        assert_eq!(directive("%1$d", &[]).unwrap_err(), Error::BadFormat);
        assert_eq!(directive("%n", &[]).unwrap_err(), Error::Unsupported);
        assert_eq!(directive("%*d", &[]).unwrap_err(), Error::MissingArg);
        assert_eq!(
            directive("%*d", &[Arg::Float(1.0)]).unwrap_err(),
            Error::BadArgType
        );
    }

    #[test]
    fn oversized_width_overflows() {
        assert_eq!(
            directive("%99999999999d", &[]).unwrap_err(),
            Error::Overflow
        );
    }
}
