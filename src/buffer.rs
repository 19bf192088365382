// Output buffers and templates, keyed by character width.
// A TextBuf lends its allocation to the driver as a plain unit vector and
// takes the rendered units back; the terminator slot never reaches it.

use alloc::ffi::CString;
use alloc::string::String;
use alloc::vec::Vec;
use core::ffi::CStr;
use core::mem;

use smol_printf::{Narrow, Width};

#[cfg(feature = "wide")]
use smol_printf::{Wide, WideChar};
#[cfg(feature = "wide")]
use widestring::{WideCStr, WideCString, WideStr, WideString};

use crate::Error;

/// A growable text buffer the formatter can resize and write into.
pub trait TextBuf {
    type Width: Width;

    /// Hand over the allocation. The buffer is left empty.
    fn take_units(&mut self) -> Vec<<Self::Width as Width>::Unit>;

    /// Store rendered units, without terminator, as the new content.
    fn store_units(&mut self, units: Vec<<Self::Width as Width>::Unit>) -> Result<(), Error>;
}

impl TextBuf for String {
    type Width = Narrow;

    fn take_units(&mut self) -> Vec<u8> {
        mem::take(self).into_bytes()
    }

    fn store_units(&mut self, units: Vec<u8>) -> Result<(), Error> {
        *self = String::from_utf8(units).map_err(|_| Error::Encoding)?;
        Ok(())
    }
}

impl TextBuf for Vec<u8> {
    type Width = Narrow;

    fn take_units(&mut self) -> Vec<u8> {
        mem::take(self)
    }

    fn store_units(&mut self, units: Vec<u8>) -> Result<(), Error> {
        *self = units;
        Ok(())
    }
}

impl TextBuf for CString {
    type Width = Narrow;

    fn take_units(&mut self) -> Vec<u8> {
        mem::take(self).into_bytes()
    }

    fn store_units(&mut self, units: Vec<u8>) -> Result<(), Error> {
        *self = CString::new(units).map_err(|_| Error::InteriorNul)?;
        Ok(())
    }
}

#[cfg(feature = "wide")]
impl TextBuf for WideString {
    type Width = Wide;

    fn take_units(&mut self) -> Vec<WideChar> {
        mem::take(self).into_vec()
    }

    fn store_units(&mut self, units: Vec<WideChar>) -> Result<(), Error> {
        *self = WideString::from_vec(units);
        Ok(())
    }
}

#[cfg(feature = "wide")]
impl TextBuf for WideCString {
    type Width = Wide;

    fn take_units(&mut self) -> Vec<WideChar> {
        mem::take(self).into_vec()
    }

    fn store_units(&mut self, units: Vec<WideChar>) -> Result<(), Error> {
        // from_vec takes a trailing NUL as the terminator; any NUL here is content
        if units.contains(&0) {
            return Err(Error::InteriorNul);
        }
        *self = WideCString::from_vec(units).map_err(|_| Error::InteriorNul)?;
        Ok(())
    }
}

/// A format template of width `W`. Interpretation stops at the first NUL.
pub trait Template<W: Width> {
    fn units(&self) -> &[W::Unit];
}

impl<W: Width, T: Template<W> + ?Sized> Template<W> for &T {
    #[inline]
    fn units(&self) -> &[W::Unit] {
        (**self).units()
    }
}

impl Template<Narrow> for str {
    #[inline]
    fn units(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl Template<Narrow> for String {
    #[inline]
    fn units(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl Template<Narrow> for [u8] {
    #[inline]
    fn units(&self) -> &[u8] {
        self
    }
}

impl<const N: usize> Template<Narrow> for [u8; N] {
    #[inline]
    fn units(&self) -> &[u8] {
        self
    }
}

impl Template<Narrow> for CStr {
    #[inline]
    fn units(&self) -> &[u8] {
        self.to_bytes()
    }
}

impl Template<Narrow> for CString {
    #[inline]
    fn units(&self) -> &[u8] {
        self.as_bytes()
    }
}

#[cfg(feature = "wide")]
impl Template<Wide> for WideStr {
    #[inline]
    fn units(&self) -> &[WideChar] {
        self.as_slice()
    }
}

#[cfg(feature = "wide")]
impl Template<Wide> for WideCStr {
    #[inline]
    fn units(&self) -> &[WideChar] {
        self.as_slice()
    }
}

#[cfg(feature = "wide")]
impl Template<Wide> for WideString {
    #[inline]
    fn units(&self) -> &[WideChar] {
        self.as_slice()
    }
}

#[cfg(feature = "wide")]
impl Template<Wide> for WideCString {
    #[inline]
    fn units(&self) -> &[WideChar] {
        self.as_slice()
    }
}

#[cfg(feature = "wide")]
impl Template<Wide> for [WideChar] {
    #[inline]
    fn units(&self) -> &[WideChar] {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn string_keeps_its_allocation() {
        let mut s = String::with_capacity(64);
        s.push_str("old");
        let units = s.take_units();
        assert!(s.is_empty());
        assert_eq!(units.capacity(), 64);
        s.store_units(b"new".to_vec()).unwrap();
        assert_eq!(s, "new");
    }

    #[test]
    fn string_rejects_invalid_utf8() {
        let mut s = String::from("old");
        s.take_units();
        assert_eq!(s.store_units(vec![b'a', 0xff]), Err(Error::Encoding));
        assert!(s.is_empty());
    }

    #[test]
    fn byte_vector_takes_anything() {
        let mut v = b"old".to_vec();
        v.take_units();
        v.store_units(vec![b'a', 0xff, 0]).unwrap();
        assert_eq!(v, [b'a', 0xff, 0]);
    }

    #[test]
    fn c_string_rejects_interior_nul() {
        let mut c = CString::new("old").unwrap();
        assert_eq!(c.take_units(), b"old");
        c.store_units(b"new".to_vec()).unwrap();
        assert_eq!(c.as_bytes_with_nul(), b"new\0");
        assert_eq!(c.store_units(b"a\0b".to_vec()), Err(Error::InteriorNul));
    }

    #[test]
    fn narrow_templates() {
        assert_eq!(Template::<Narrow>::units("a%d"), b"a%d");
        assert_eq!(Template::<Narrow>::units(c"a%d"), b"a%d");
        assert_eq!(Template::<Narrow>::units(b"a%d"), b"a%d");
        assert_eq!(Template::<Narrow>::units(&String::from("a%d")), b"a%d");
    }

    #[cfg(feature = "wide")]
    #[test]
    fn wide_buffers_and_templates() {
        use widestring::{widecstr, widestr};

        let mut w = WideString::from_str("old");
        w.take_units();
        w.store_units(widestr!("new").as_slice().to_vec()).unwrap();
        assert_eq!(w.as_slice(), widestr!("new").as_slice());

        let mut wc = WideCString::default();
        let nul = vec![WideChar::from(b'a'), 0, WideChar::from(b'b')];
        assert_eq!(wc.store_units(nul), Err(Error::InteriorNul));
        let trailing = vec![WideChar::from(b'a'), WideChar::from(b'b'), 0];
        assert_eq!(wc.store_units(trailing), Err(Error::InteriorNul));

        assert_eq!(
            Template::<Wide>::units(widecstr!("%ls")),
            widestr!("%ls").as_slice()
        );
    }
}
