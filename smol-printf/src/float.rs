//! Floating-point conversions: `f F e E g G a A`.
//!
//! Decimal digits come from `core::fmt`, whose precision formatting is an
//! exact expansion of the binary value (the same digits glibc prints).
//! Two small `fmt::Write` adapters turn Rust's output into C's:
//!
//! - [`ExpFix`] rewrites the exponent (`1.5e3` → `1.5e+03`) and can force a
//!   decimal point for `%#.0e`;
//! - [`TrimZeros`] drops trailing fractional zeros for `%g`.
//!
//! The body is generated twice, once into a length counter and once into the
//! sink, so padding never needs a scratch buffer regardless of precision.
//! Hexadecimal floats are built directly from the IEEE-754 bits.

use core::fmt::{self, Write};

use crate::Error;
use crate::directive::{Conv, Directive, FloatStyle};
use crate::printf::pad_field;
use crate::sink::{AsciiOut, FmtLen, Sink};
use crate::width::Width;

const DEFAULT_PRECISION: usize = 6;

// f64 mantissa: 52 bits, 13 hex digits
const MANT_BITS: u32 = 52;
const MANT_NIBBLES: usize = 13;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Body {
    Fixed { prec: usize, point: bool, trim: bool },
    Exp { prec: usize, point: bool, trim: bool, upper: bool },
    Hex { prec: Option<usize>, point: bool, upper: bool },
    NonFinite { nan: bool, upper: bool },
}

pub(crate) fn fmt_float<W: Width, S: Sink<W::Unit>>(
    out: &mut S,
    d: &Directive,
    value: f64,
) -> Result<(), Error> {
    let Conv::Float { style, upper } = d.conv else {
        return Err(Error::BadArgType);
    };

    let mut prefix = [0u8; 3];
    let mut prefix_len = 0;
    if value.is_sign_negative() {
        prefix[0] = b'-';
        prefix_len = 1;
    } else if let Some(sign) = d.plus_sign() {
        prefix[0] = sign;
        prefix_len = 1;
    }

    let abs = value.abs();
    let body = if !abs.is_finite() {
        Body::NonFinite {
            nan: abs.is_nan(),
            upper,
        }
    } else {
        plan(style, upper, d, abs)
    };

    if let Body::Hex { .. } = body {
        prefix[prefix_len] = b'0';
        prefix[prefix_len + 1] = if upper { b'X' } else { b'x' };
        prefix_len += 2;
    }

    let mut len = FmtLen::default();
    let mut res = write_body(&mut len, body, abs);

    // zero padding makes no sense for inf/nan
    let zero_ok = !matches!(body, Body::NonFinite { .. });
    pad_field::<W, S>(out, d, &prefix[..prefix_len], zero_ok, len.0, |out| {
        res = res.and(write_body(&mut AsciiOut::<W, S>::new(out), body, abs));
    });
    // FmtLen and AsciiOut are infallible
    debug_assert!(res.is_ok());
    Ok(())
}

fn plan(style: FloatStyle, upper: bool, d: &Directive, abs: f64) -> Body {
    let alt = d.alt();
    match style {
        FloatStyle::Fixed => {
            let prec = d.precision.unwrap_or(DEFAULT_PRECISION);
            Body::Fixed {
                prec,
                point: alt && prec == 0,
                trim: false,
            }
        }
        FloatStyle::Exp => {
            let prec = d.precision.unwrap_or(DEFAULT_PRECISION);
            Body::Exp {
                prec,
                point: alt && prec == 0,
                trim: false,
                upper,
            }
        }
        FloatStyle::Shortest => {
            // P significant digits; X is the exponent %e would print
            let p = match d.precision.unwrap_or(DEFAULT_PRECISION) {
                0 => 1,
                p => p,
            };
            let x = decimal_exponent(abs, p - 1);
            if x < p as i64 && x >= -4 {
                let prec = (p as i64 - 1 - x) as usize;
                Body::Fixed {
                    prec,
                    point: alt && prec == 0,
                    trim: !alt,
                }
            } else {
                Body::Exp {
                    prec: p - 1,
                    point: alt && p == 1,
                    trim: !alt,
                    upper,
                }
            }
        }
        FloatStyle::Hex => Body::Hex {
            prec: d.precision,
            point: alt,
            upper,
        },
    }
}

fn write_body<F: Write>(w: &mut F, body: Body, abs: f64) -> fmt::Result {
    match body {
        Body::NonFinite { nan, upper } => w.write_str(match (nan, upper) {
            (true, false) => "nan",
            (true, true) => "NAN",
            (false, false) => "inf",
            (false, true) => "INF",
        }),
        Body::Fixed { prec, point, trim } => {
            if trim {
                write!(TrimZeros::new(&mut *w), "{:.*}", prec, abs)?;
            } else {
                write!(w, "{:.*}", prec, abs)?;
            }
            if point {
                w.write_char('.')?;
            }
            Ok(())
        }
        Body::Exp {
            prec,
            point,
            trim,
            upper,
        } => {
            let mut e = ExpFix::new(&mut *w, upper, point);
            if trim {
                write!(TrimZeros::new(&mut e), "{:.*e}", prec, abs)?;
            } else {
                write!(e, "{:.*e}", prec, abs)?;
            }
            e.finish()
        }
        Body::Hex { prec, point, upper } => write_hex(w, abs, prec, point, upper),
    }
}

// exponent of `abs` in %e form after rounding to `prec` fraction digits
fn decimal_exponent(abs: f64, prec: usize) -> i64 {
    struct Exponent {
        seen_e: bool,
        neg: bool,
        value: i64,
    }

    impl Write for Exponent {
        fn write_str(&mut self, s: &str) -> fmt::Result {
            for b in s.bytes() {
                match b {
                    b'e' => self.seen_e = true,
                    b'-' if self.seen_e => self.neg = true,
                    b'0'..=b'9' if self.seen_e => {
                        self.value = self.value * 10 + (b - b'0') as i64
                    }
                    _ => {}
                }
            }
            Ok(())
        }
    }

    let mut e = Exponent {
        seen_e: false,
        neg: false,
        value: 0,
    };
    let _ = write!(e, "{:.*e}", prec, abs);
    if e.neg { -e.value } else { e.value }
}

/// Rewrites `core::fmt`'s `{:e}` exponent into C form: explicit sign and at
/// least two digits.
struct ExpFix<'w, F: Write> {
    inner: &'w mut F,
    upper: bool,
    force_point: bool,
    seen_point: bool,
    in_exp: bool,
    exp: [u8; 8],
    exp_len: usize,
}

impl<'w, F: Write> ExpFix<'w, F> {
    fn new(inner: &'w mut F, upper: bool, force_point: bool) -> Self {
        Self {
            inner,
            upper,
            force_point,
            seen_point: false,
            in_exp: false,
            exp: [0; 8],
            exp_len: 0,
        }
    }

    fn finish(self) -> fmt::Result {
        if self.force_point && !self.seen_point {
            self.inner.write_char('.')?;
        }
        self.inner.write_char(if self.upper { 'E' } else { 'e' })?;

        let exp = &self.exp[..self.exp_len];
        let (sign, digits) = match exp.split_first() {
            Some((b'-', rest)) => ('-', rest),
            _ => ('+', exp),
        };
        self.inner.write_char(sign)?;
        if digits.len() < 2 {
            self.inner.write_char('0')?;
        }
        for &b in digits {
            self.inner.write_char(b as char)?;
        }
        Ok(())
    }
}

impl<F: Write> Write for ExpFix<'_, F> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let (mantissa, exp) = if self.in_exp {
            ("", s)
        } else {
            match s.find('e') {
                Some(i) => {
                    self.in_exp = true;
                    (&s[..i], &s[i + 1..])
                }
                None => (s, ""),
            }
        };
        if mantissa.contains('.') {
            self.seen_point = true;
        }
        self.inner.write_str(mantissa)?;
        for &b in exp.as_bytes() {
            if self.exp_len < self.exp.len() {
                self.exp[self.exp_len] = b;
                self.exp_len += 1;
            }
        }
        Ok(())
    }
}

/// Drops trailing zeros of the fraction, and the point when nothing follows
/// it. An exponent (`e…`) ends the fraction and passes through untouched.
struct TrimZeros<'w, F: Write> {
    inner: &'w mut F,
    in_fraction: bool,
    pending_point: bool,
    pending_zeros: usize,
    done: bool,
}

impl<'w, F: Write> TrimZeros<'w, F> {
    fn new(inner: &'w mut F) -> Self {
        Self {
            inner,
            in_fraction: false,
            pending_point: false,
            pending_zeros: 0,
            done: false,
        }
    }

    fn flush_pending(&mut self) -> fmt::Result {
        if self.pending_point {
            self.inner.write_char('.')?;
            self.pending_point = false;
        }
        for _ in 0..self.pending_zeros {
            self.inner.write_char('0')?;
        }
        self.pending_zeros = 0;
        Ok(())
    }
}

impl<F: Write> Write for TrimZeros<'_, F> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for ch in s.chars() {
            if self.done {
                self.inner.write_char(ch)?;
                continue;
            }
            match ch {
                '.' => {
                    self.in_fraction = true;
                    self.pending_point = true;
                }
                '0' if self.in_fraction => self.pending_zeros += 1,
                'e' | 'E' => {
                    self.pending_point = false;
                    self.pending_zeros = 0;
                    self.done = true;
                    self.inner.write_char(ch)?;
                }
                _ => {
                    self.flush_pending()?;
                    self.inner.write_char(ch)?;
                }
            }
        }
        Ok(())
    }
}

// %a body after the "0x" prefix: h.hhhp±d
fn write_hex<F: Write>(
    w: &mut F,
    abs: f64,
    prec: Option<usize>,
    point: bool,
    upper: bool,
) -> fmt::Result {
    let bits = abs.to_bits();
    let biased = ((bits >> MANT_BITS) & 0x7ff) as i32;
    let mut mant = bits & ((1u64 << MANT_BITS) - 1);

    let (mut lead, exp) = match (biased, mant) {
        (0, 0) => (0u64, 0),
        (0, _) => (0, -1022),
        _ => (1, biased - 1023),
    };

    let mut ndigits = MANT_NIBBLES;
    match prec {
        Some(p) if p < MANT_NIBBLES => {
            // round half to even at the requested nibble
            let shift = (MANT_NIBBLES - p) as u32 * 4;
            let full = (lead << MANT_BITS) | mant;
            let rem = full & ((1u64 << shift) - 1);
            let half = 1u64 << (shift - 1);
            let mut kept = full >> shift;
            if rem > half || (rem == half && kept & 1 == 1) {
                kept += 1;
            }
            let frac_bits = p as u32 * 4;
            lead = kept >> frac_bits;
            mant = (kept & ((1u64 << frac_bits) - 1)) << shift;
            ndigits = p;
        }
        Some(_) => {}
        None => {
            while ndigits > 0 && nibble(mant, ndigits) == 0 {
                ndigits -= 1;
            }
        }
    }

    let table: &[u8; 16] = if upper {
        b"0123456789ABCDEF"
    } else {
        b"0123456789abcdef"
    };
    w.write_char(table[lead as usize & 0xf] as char)?;
    let extra = prec.map_or(0, |p| p.saturating_sub(MANT_NIBBLES));
    if ndigits > 0 || extra > 0 || point {
        w.write_char('.')?;
    }
    for i in 1..=ndigits {
        w.write_char(table[nibble(mant, i) as usize] as char)?;
    }
    for _ in 0..extra {
        w.write_char('0')?;
    }
    write!(w, "{}{:+}", if upper { 'P' } else { 'p' }, exp)
}

// i-th hex digit after the point, 1-based
#[inline]
fn nibble(mant: u64, i: usize) -> u64 {
    (mant >> (MANT_BITS as usize - 4 * i)) & 0xf
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arg::Arg;
    use crate::printf::{probe_length, render};
    use crate::width::Narrow;
    use std::string::String;

    fn sprintf(tmpl: &str, value: f64) -> String {
        let args = [Arg::Float(value)];
        let mut buf = [0u8; 400];
        let n = render::<Narrow>(&mut buf, tmpl.as_bytes(), &args).unwrap();
        assert_eq!(probe_length::<Narrow>(tmpl.as_bytes(), &args), Ok(n));
        String::from_utf8(buf[..n].to_vec()).unwrap()
    }

    #[test]
    fn fixed() {
        assert_eq!(sprintf("%f", 1.5), "1.500000");
        assert_eq!(sprintf("%.2f", 3.14159), "3.14");
        assert_eq!(sprintf("%.0f", 2.7), "3");
        assert_eq!(sprintf("%#.0f", 3.0), "3.");
        assert_eq!(sprintf("%f", -0.0), "-0.000000");
        assert_eq!(sprintf("%+.1f", 2.0), "+2.0");
        assert_eq!(sprintf("% .1f", 2.0), " 2.0");
        assert_eq!(sprintf("[%8.2f]", -1.5), "[   -1.50]");
        assert_eq!(sprintf("[%08.2f]", -1.5), "[-0001.50]");
        assert_eq!(sprintf("[%-8.2f]", 1.5), "[1.50    ]");
        assert_eq!(sprintf("%F", 1e21), "1000000000000000000000.000000");
    }

    #[test]
    fn exponent() {
        assert_eq!(sprintf("%e", 12345.678), "1.234568e+04");
        assert_eq!(sprintf("%E", 0.000123), "1.230000E-04");
        assert_eq!(sprintf("%.2e", 0.0), "0.00e+00");
        assert_eq!(sprintf("%.0e", 5.0), "5e+00");
        assert_eq!(sprintf("%#.0e", 5.0), "5.e+00");
        assert_eq!(sprintf("%e", 1e300), "1.000000e+300");
        assert_eq!(sprintf("%.3e", -1e-300), "-1.000e-300");
        assert_eq!(sprintf("[%012.3e]", 1234.56), "[0001.235e+03]");
    }

    #[test]
    fn shortest() {
        assert_eq!(sprintf("%g", 100000.0), "100000");
        assert_eq!(sprintf("%g", 1000000.0), "1e+06");
        assert_eq!(sprintf("%g", 0.0001), "0.0001");
        assert_eq!(sprintf("%g", 0.00001), "1e-05");
        assert_eq!(sprintf("%g", 3.14159), "3.14159");
        assert_eq!(sprintf("%g", 2.5), "2.5");
        assert_eq!(sprintf("%g", 0.0), "0");
        assert_eq!(sprintf("%.3g", 1234.0), "1.23e+03");
        assert_eq!(sprintf("%.0g", 7.0), "7");
        assert_eq!(sprintf("%G", 1.5e-10), "1.5E-10");
        assert_eq!(sprintf("%#g", 1.0), "1.00000");
        assert_eq!(sprintf("%#.1g", 2.0), "2.");
        // rounding can bump the exponent into the other style
        assert_eq!(sprintf("%g", 999999.5), "1e+06");
        assert_eq!(sprintf("%.2g", 0.000999), "0.001");
    }

    #[test]
    fn hex() {
        assert_eq!(sprintf("%a", 1.0), "0x1p+0");
        assert_eq!(sprintf("%a", 0.5), "0x1p-1");
        assert_eq!(sprintf("%a", 10.0), "0x1.4p+3");
        assert_eq!(sprintf("%A", 10.0), "0X1.4P+3");
        assert_eq!(sprintf("%a", 0.0), "0x0p+0");
        assert_eq!(sprintf("%a", -2.0), "-0x1p+1");
        assert_eq!(sprintf("%.2a", 1.0), "0x1.00p+0");
        assert_eq!(sprintf("%#a", 1.0), "0x1.p+0");
        assert_eq!(sprintf("%.0a", 1.5), "0x2p+0");
        assert_eq!(sprintf("%a", f64::MIN_POSITIVE / 4.0), "0x0.4p-1022");
        assert_eq!(sprintf("[%010a]", 1.0), "[0x00001p+0]");
    }

    #[test]
    fn non_finite() {
        assert_eq!(sprintf("%f", f64::INFINITY), "inf");
        assert_eq!(sprintf("%F", f64::NEG_INFINITY), "-INF");
        assert_eq!(sprintf("%e", f64::NAN), "nan");
        assert_eq!(sprintf("%+g", f64::INFINITY), "+inf");
        assert_eq!(sprintf("[%06f]", f64::INFINITY), "[   inf]");
        assert_eq!(sprintf("%a", f64::INFINITY), "inf");
    }

    #[test]
    fn rejects_non_float_arguments() {
        let mut buf = [0u8; 16];
        assert_eq!(
            render::<Narrow>(&mut buf, b"%f", &[Arg::signed(1, 32)]),
            Err(Error::BadArgType)
        );
    }
}
