// Integer conversions: d i u o x X, and p.
// Digits are produced in reverse into a stack buffer; 22 octal digits
// cover u64::MAX.

use crate::Error;
use crate::arg::{Arg, Int};
use crate::directive::{Conv, Directive, Flags};
use crate::printf::pad_field;
use crate::sink::Sink;
use crate::text::put_ascii;
use crate::width::Width;

const DIGITS_LOWER: &[u8; 16] = b"0123456789abcdef";
const DIGITS_UPPER: &[u8; 16] = b"0123456789ABCDEF";

struct Digits {
    buf: [u8; 24],
    start: usize,
}

impl Digits {
    fn new(mut value: u64, base: u64, upper: bool) -> Self {
        let table = if upper { DIGITS_UPPER } else { DIGITS_LOWER };
        let mut buf = [0u8; 24];
        let mut start = buf.len();
        while value != 0 {
            start -= 1;
            buf[start] = table[(value % base) as usize];
            value /= base;
        }
        Self { buf, start }
    }

    #[inline]
    fn as_bytes(&self) -> &[u8] {
        &self.buf[self.start..]
    }
}

pub(crate) fn fmt_int<W: Width, S: Sink<W::Unit>>(
    out: &mut S,
    d: &Directive,
    arg: Int,
) -> Result<(), Error> {
    let bits = d.length.int_bits().unwrap_or(arg.width());

    let mut prefix = [0u8; 2];
    let mut prefix_len = 0;
    let (magnitude, base, upper) = match d.conv {
        Conv::Signed => {
            let v = arg.as_signed(bits);
            if v < 0 {
                prefix[0] = b'-';
                prefix_len = 1;
            } else if let Some(sign) = d.plus_sign() {
                prefix[0] = sign;
                prefix_len = 1;
            }
            (v.unsigned_abs(), 10, false)
        }
        Conv::Unsigned => (arg.as_unsigned(bits), 10, false),
        Conv::Octal => (arg.as_unsigned(bits), 8, false),
        Conv::Hex { upper } => {
            let v = arg.as_unsigned(bits);
            if d.alt() && v != 0 {
                prefix = [b'0', if upper { b'X' } else { b'x' }];
                prefix_len = 2;
            }
            (v, 16, upper)
        }
        _ => return Err(Error::BadArgType),
    };

    let digits = Digits::new(magnitude, base, upper);
    let ndigits = digits.as_bytes().len();

    // "%.0d" of zero prints no digits; C's minimum is one digit otherwise
    let mut min_digits = d.precision.unwrap_or(1);
    if d.conv == Conv::Octal && d.alt() && min_digits <= ndigits {
        // alternate octal: the first digit must be 0
        min_digits = ndigits + 1;
    }
    let zeros = min_digits.saturating_sub(ndigits);

    pad_field::<W, S>(
        out,
        d,
        &prefix[..prefix_len],
        d.precision.is_none(),
        zeros + ndigits,
        |out| {
            out.fill(W::from_ascii(b'0'), zeros);
            put_ascii::<W, S>(out, digits.as_bytes());
        },
    );
    Ok(())
}

// glibc form: "(nil)" for null, otherwise %#lx
pub(crate) fn fmt_ptr<W: Width, S: Sink<W::Unit>>(
    out: &mut S,
    d: &Directive,
    arg: Arg<'_>,
) -> Result<(), Error> {
    let addr = match arg {
        Arg::Ptr(addr) => addr,
        Arg::Str(s) => s.as_ptr() as usize,
        #[cfg(feature = "wide")]
        Arg::WStr(s) => s.as_ptr() as usize,
        _ => return Err(Error::BadArgType),
    };

    if addr == 0 {
        const NIL: &[u8] = b"(nil)";
        pad_field::<W, S>(out, d, &[], false, NIL.len(), |out| {
            put_ascii::<W, S>(out, NIL)
        });
        return Ok(());
    }

    let hex = Directive {
        flags: (d.flags | Flags::ALT) & !(Flags::PLUS | Flags::SPACE),
        conv: Conv::Hex { upper: false },
        ..*d
    };
    fmt_int::<W, S>(out, &hex, Int::from_unsigned(addr as u64, usize::BITS as u8))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printf::render;
    use crate::width::Narrow;
    use std::string::String;

    fn sprintf(tmpl: &str, args: &[Arg<'_>]) -> String {
        let mut buf = [0u8; 96];
        let n = render::<Narrow>(&mut buf, tmpl.as_bytes(), args).unwrap();
        String::from_utf8(buf[..n].to_vec()).unwrap()
    }

    fn int(v: i32) -> Arg<'static> {
        Arg::signed(v as i64, 32)
    }

    #[test]
    fn decimal() {
        assert_eq!(sprintf("%d", &[int(0)]), "0");
        assert_eq!(sprintf("%d", &[int(-42)]), "-42");
        assert_eq!(sprintf("%i", &[int(i32::MIN)]), "-2147483648");
        assert_eq!(sprintf("%+d % d", &[int(5), int(5)]), "+5  5");
        assert_eq!(sprintf("%+ d", &[int(5)]), "+5");
        assert_eq!(
            sprintf("%lld", &[Arg::signed(i64::MIN, 64)]),
            "-9223372036854775808"
        );
    }

    #[test]
    fn width_and_precision() {
        assert_eq!(sprintf("[%5d]", &[int(42)]), "[   42]");
        assert_eq!(sprintf("[%-5d]", &[int(42)]), "[42   ]");
        assert_eq!(sprintf("[%05d]", &[int(-42)]), "[-0042]");
        assert_eq!(sprintf("[%.4d]", &[int(42)]), "[0042]");
        assert_eq!(sprintf("[%8.4d]", &[int(-42)]), "[   -0042]");
        // precision disables the zero flag
        assert_eq!(sprintf("[%08.3d]", &[int(7)]), "[     007]");
        assert_eq!(sprintf("[%.0d]", &[int(0)]), "[]");
        assert_eq!(sprintf("[%3.0d]", &[int(0)]), "[   ]");
    }

    #[test]
    fn unsigned_reinterprets_at_argument_width() {
        assert_eq!(sprintf("%u", &[int(-1)]), "4294967295");
        assert_eq!(
            sprintf("%lu", &[Arg::signed(-1, 64)]),
            "18446744073709551615"
        );
        assert_eq!(sprintf("%x", &[Arg::signed(-1, 8)]), "ff");
        assert_eq!(sprintf("%hhu", &[int(300)]), "44");
        assert_eq!(sprintf("%hd", &[int(65535)]), "-1");
        assert_eq!(sprintf("%d", &[Arg::unsigned(u32::MAX as u64, 32)]), "-1");
    }

    #[test]
    fn octal_and_hex() {
        assert_eq!(sprintf("%o", &[int(8)]), "10");
        assert_eq!(sprintf("%#o", &[int(8)]), "010");
        assert_eq!(sprintf("%#o", &[int(0)]), "0");
        assert_eq!(sprintf("%#.0o", &[int(0)]), "0");
        assert_eq!(sprintf("%#.5o", &[int(8)]), "00010");
        assert_eq!(sprintf("%x %X", &[int(0xbeef), int(0xbeef)]), "beef BEEF");
        assert_eq!(sprintf("%#x %#X", &[int(255), int(255)]), "0xff 0XFF");
        assert_eq!(sprintf("%#x", &[int(0)]), "0");
        assert_eq!(sprintf("[%#08x]", &[int(255)]), "[0x0000ff]");
        assert_eq!(sprintf("[%-#8x]", &[int(255)]), "[0xff    ]");
        // sign flags do not apply to unsigned conversions
        assert_eq!(sprintf("%+u", &[int(3)]), "3");
    }

    #[test]
    fn pointers() {
        assert_eq!(sprintf("%p", &[Arg::Ptr(0x1000)]), "0x1000");
        assert_eq!(sprintf("[%10p]", &[Arg::Ptr(0xbeef)]), "[    0xbeef]");
        assert_eq!(sprintf("[%-7p]", &[Arg::Ptr(0)]), "[(nil)  ]");

        let mut buf = [0u8; 8];
        assert_eq!(
            render::<Narrow>(&mut buf, b"%p", &[Arg::Float(0.0)]),
            Err(Error::BadArgType)
        );
    }
}
