//! Character-width adapters.
//!
//! The interpreter is written once, generic over [`Width`]. An adapter says
//! what a code unit is, how directives are recognised in a template, and how
//! text of either width lands in its output. [`Narrow`] output is UTF-8;
//! the wide adapter lives in `wide.rs` behind the `wide` feature.

use core::fmt::Debug;

use crate::sink::Sink;

pub trait Width {
    /// Code unit of templates and output. `Default` is the terminator.
    type Unit: Copy + Default + Eq + Debug;

    const NAME: &'static str;

    /// The unit as an ASCII byte, if it is one.
    fn ascii(unit: Self::Unit) -> Option<u8>;

    fn from_ascii(byte: u8) -> Self::Unit;

    /// Units needed to encode `ch`.
    fn char_len(ch: char) -> usize;

    fn put_char<S: Sink<Self::Unit>>(out: &mut S, ch: char);

    /// Unit written by a plain `%c`, when the width stores C's
    /// `unsigned char` conversion directly. `None` means `%c` takes a code
    /// point, as `%lc` does.
    fn byte_char(byte: u8) -> Option<Self::Unit>;

    /// Emit narrow text, at most `limit` units, never splitting a character
    /// that decoded cleanly. Returns the units emitted.
    fn put_narrow<S: Sink<Self::Unit>>(out: &mut S, text: &[u8], limit: usize) -> usize;

    /// Emit wide text under the same rules as [`Width::put_narrow`].
    #[cfg(feature = "wide")]
    fn put_wide<S: Sink<Self::Unit>>(
        out: &mut S,
        text: &[widestring::WideChar],
        limit: usize,
    ) -> usize;
}

/// Byte-oriented output; text is UTF-8.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Narrow;

impl Width for Narrow {
    type Unit = u8;

    const NAME: &'static str = "narrow";

    #[inline]
    fn ascii(unit: u8) -> Option<u8> {
        unit.is_ascii().then_some(unit)
    }

    #[inline]
    fn from_ascii(byte: u8) -> u8 {
        byte
    }

    #[inline]
    fn char_len(ch: char) -> usize {
        ch.len_utf8()
    }

    fn put_char<S: Sink<u8>>(out: &mut S, ch: char) {
        let mut tmp = [0u8; 4];
        out.put_all(ch.encode_utf8(&mut tmp).as_bytes());
    }

    #[inline]
    fn byte_char(byte: u8) -> Option<u8> {
        Some(byte)
    }

    fn put_narrow<S: Sink<u8>>(out: &mut S, text: &[u8], limit: usize) -> usize {
        let mut used = 0;
        for chunk in text.utf8_chunks() {
            for ch in chunk.valid().chars() {
                let n = ch.len_utf8();
                if used + n > limit {
                    return used;
                }
                Self::put_char(out, ch);
                used += n;
            }
            // undecodable bytes are passed through one by one, as C would
            for &b in chunk.invalid() {
                if used >= limit {
                    return used;
                }
                out.put(b);
                used += 1;
            }
        }
        used
    }

    #[cfg(feature = "wide")]
    fn put_wide<S: Sink<u8>>(out: &mut S, text: &[widestring::WideChar], limit: usize) -> usize {
        let mut used = 0;
        for ch in crate::wide::decode(text) {
            let n = ch.len_utf8();
            if used + n > limit {
                break;
            }
            Self::put_char(out, ch);
            used += n;
        }
        used
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::SliceSink;

    fn narrow(text: &[u8], limit: usize) -> ([u8; 16], usize) {
        let mut buf = [0u8; 16];
        let mut sink = SliceSink::new(&mut buf);
        let n = Narrow::put_narrow(&mut sink, text, limit);
        assert_eq!(sink.finish(), Ok(n));
        (buf, n)
    }

    #[test]
    fn limit_never_splits_utf8() {
        // "é" is two bytes; a limit of 2 only fits "a"
        let (buf, n) = narrow("aé".as_bytes(), 2);
        assert_eq!(n, 1);
        assert_eq!(&buf[..n], b"a");

        let (buf, n) = narrow("aé".as_bytes(), 3);
        assert_eq!(&buf[..n], "aé".as_bytes());
    }

    #[test]
    fn invalid_bytes_pass_through() {
        let (buf, n) = narrow(b"a\xffb", usize::MAX);
        assert_eq!(&buf[..n], b"a\xffb");
    }

    #[test]
    fn ascii_detection() {
        assert_eq!(Narrow::ascii(b'%'), Some(b'%'));
        assert_eq!(Narrow::ascii(0xc3), None);
    }
}
