// Output sinks for the template interpreter.
// Counter only counts (length probe); SliceSink writes into a borrowed
// slice, always keeps one slot for the terminator, and records overflow
// instead of truncating silently.

use core::fmt;
use core::marker::PhantomData;

use crate::Error;
use crate::width::Width;

pub trait Sink<U: Copy> {
    fn put(&mut self, unit: U);

    fn put_all(&mut self, units: &[U]) {
        for &u in units {
            self.put(u);
        }
    }

    fn fill(&mut self, unit: U, n: usize) {
        for _ in 0..n {
            self.put(unit);
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Counter {
    len: usize,
}

impl Counter {
    pub(crate) const fn new() -> Self {
        Self { len: 0 }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }
}

impl<U: Copy> Sink<U> for Counter {
    #[inline]
    fn put(&mut self, _unit: U) {
        self.len = self.len.saturating_add(1);
    }

    #[inline]
    fn put_all(&mut self, units: &[U]) {
        self.len = self.len.saturating_add(units.len());
    }

    #[inline]
    fn fill(&mut self, _unit: U, n: usize) {
        self.len = self.len.saturating_add(n);
    }
}

pub(crate) struct SliceSink<'a, U> {
    buf: &'a mut [U],
    pos: usize,
    produced: usize,
}

impl<'a, U: Copy + Default> SliceSink<'a, U> {
    #[inline]
    pub(crate) fn new(buf: &'a mut [U]) -> Self {
        Self {
            buf,
            pos: 0,
            produced: 0,
        }
    }

    /// Terminate the stored prefix. Fails if anything was dropped or the
    /// slice has no room for the terminator.
    pub(crate) fn finish(self) -> Result<usize, Error> {
        let Some(slot) = self.buf.get_mut(self.pos) else {
            return Err(Error::NoSpace);
        };
        *slot = U::default();
        if self.produced > self.pos {
            return Err(Error::NoSpace);
        }
        Ok(self.pos)
    }
}

impl<U: Copy + Default> Sink<U> for SliceSink<'_, U> {
    #[inline]
    fn put(&mut self, unit: U) {
        self.produced = self.produced.saturating_add(1);
        if self.pos + 1 < self.buf.len() {
            self.buf[self.pos] = unit;
            self.pos += 1;
        }
    }

    fn put_all(&mut self, units: &[U]) {
        let room = self.buf.len().saturating_sub(self.pos + 1);
        let n = units.len().min(room);
        self.buf[self.pos..self.pos + n].copy_from_slice(&units[..n]);
        self.pos += n;
        self.produced = self.produced.saturating_add(units.len());
    }
}

// core::fmt output (ASCII only: digits, signs, exponents) into a sink
pub(crate) struct AsciiOut<'s, W: Width, S> {
    sink: &'s mut S,
    _width: PhantomData<W>,
}

impl<'s, W: Width, S: Sink<W::Unit>> AsciiOut<'s, W, S> {
    #[inline]
    pub(crate) fn new(sink: &'s mut S) -> Self {
        Self {
            sink,
            _width: PhantomData,
        }
    }
}

impl<W: Width, S: Sink<W::Unit>> fmt::Write for AsciiOut<'_, W, S> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        for &b in s.as_bytes() {
            self.sink.put(W::from_ascii(b));
        }
        Ok(())
    }
}

// byte count of core::fmt output
#[derive(Default)]
pub(crate) struct FmtLen(pub usize);

impl fmt::Write for FmtLen {
    #[inline]
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.0 += s.len();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counter_counts_everything() {
        let mut c = Counter::new();
        Sink::<u8>::put_all(&mut c, b"hello");
        Sink::<u8>::fill(&mut c, b' ', 3);
        Sink::<u8>::put(&mut c, b'!');
        assert_eq!(c.len(), 9);
    }

    #[test]
    fn slice_sink_keeps_room_for_terminator() {
        let mut buf = [0xffu8; 6];
        let mut s = SliceSink::new(&mut buf);
        s.put_all(b"hello");
        assert_eq!(s.finish(), Ok(5));
        assert_eq!(&buf, b"hello\0");
    }

    #[test]
    fn slice_sink_reports_overflow_but_terminates() {
        let mut buf = [0xffu8; 4];
        let mut s = SliceSink::new(&mut buf);
        s.put_all(b"hello");
        s.put(b'!');
        assert_eq!(s.finish(), Err(Error::NoSpace));
        assert_eq!(&buf, b"hel\0");
    }

    #[test]
    fn empty_slice_has_no_room() {
        let mut buf: [u8; 0] = [];
        let s = SliceSink::new(&mut buf);
        assert_eq!(s.finish(), Err(Error::NoSpace));
    }
}
