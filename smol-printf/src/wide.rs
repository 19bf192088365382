// Wide adapter: output in `widestring::WideChar` units, UTF-32 on Unix and
// UTF-16 on Windows. Narrow arguments are decoded as UTF-8; bytes that do
// not decode become U+FFFD.

use core::char::REPLACEMENT_CHARACTER;

use widestring::WideChar;

use crate::sink::Sink;
use crate::width::Width;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Wide;

#[cfg(not(windows))]
pub(crate) fn decode(units: &[WideChar]) -> impl Iterator<Item = char> + '_ {
    units
        .iter()
        .map(|&u| char::from_u32(u).unwrap_or(REPLACEMENT_CHARACTER))
}

#[cfg(windows)]
pub(crate) fn decode(units: &[WideChar]) -> impl Iterator<Item = char> + '_ {
    char::decode_utf16(units.iter().copied()).map(|r| r.unwrap_or(REPLACEMENT_CHARACTER))
}

#[cfg(not(windows))]
#[inline]
fn encode<S: Sink<WideChar>>(out: &mut S, ch: char) {
    out.put(ch as WideChar);
}

#[cfg(windows)]
#[inline]
fn encode<S: Sink<WideChar>>(out: &mut S, ch: char) {
    let mut tmp = [0u16; 2];
    out.put_all(ch.encode_utf16(&mut tmp));
}

impl Width for Wide {
    type Unit = WideChar;

    const NAME: &'static str = "wide";

    #[inline]
    fn ascii(unit: WideChar) -> Option<u8> {
        (unit < 0x80).then_some(unit as u8)
    }

    #[inline]
    fn from_ascii(byte: u8) -> WideChar {
        byte as WideChar
    }

    #[cfg(not(windows))]
    #[inline]
    fn char_len(_ch: char) -> usize {
        1
    }

    #[cfg(windows)]
    #[inline]
    fn char_len(ch: char) -> usize {
        ch.len_utf16()
    }

    #[inline]
    fn put_char<S: Sink<WideChar>>(out: &mut S, ch: char) {
        encode(out, ch);
    }

    #[inline]
    fn byte_char(_byte: u8) -> Option<WideChar> {
        None
    }

    fn put_narrow<S: Sink<WideChar>>(out: &mut S, text: &[u8], limit: usize) -> usize {
        let mut used = 0;
        for chunk in text.utf8_chunks() {
            let lossy = chunk
                .valid()
                .chars()
                .chain((!chunk.invalid().is_empty()).then_some(REPLACEMENT_CHARACTER));
            for ch in lossy {
                let n = Self::char_len(ch);
                if used + n > limit {
                    return used;
                }
                encode(out, ch);
                used += n;
            }
        }
        used
    }

    fn put_wide<S: Sink<WideChar>>(out: &mut S, text: &[WideChar], limit: usize) -> usize {
        #[allow(unused_mut)]
        let mut n = text.len().min(limit);
        // keep surrogate pairs whole
        #[cfg(windows)]
        if n > 0 && n < text.len() && (0xd800..0xdc00).contains(&text[n - 1]) {
            n -= 1;
        }
        out.put_all(&text[..n]);
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::Counter;
    use widestring::widestr;

    #[test]
    fn narrow_text_is_decoded() {
        let mut buf = [0 as WideChar; 8];
        let mut sink = crate::sink::SliceSink::new(&mut buf);
        let n = Wide::put_narrow(&mut sink, "héllo".as_bytes(), usize::MAX);
        assert_eq!(sink.finish(), Ok(n));
        assert_eq!(&buf[..n], widestr!("héllo").as_slice());
    }

    #[test]
    fn invalid_narrow_becomes_replacement() {
        let mut c = Counter::new();
        let n = Wide::put_narrow(&mut c, b"a\xff\xfeb", usize::MAX);
        // "a", one U+FFFD per undecodable byte here, "b"
        assert_eq!(n, 4);
        assert_eq!(c.len(), 4);
    }

    #[test]
    fn wide_limit_counts_units() {
        let mut c = Counter::new();
        let n = Wide::put_wide(&mut c, widestr!("world").as_slice(), 3);
        assert_eq!(n, 3);
        assert_eq!(c.len(), 3);
    }
}
