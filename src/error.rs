// Driver errors: which phase failed, or why the result could not be stored.

use core::fmt;

/// Why a formatting call failed.
///
/// On any error the destination buffer holds valid but unspecified content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// The length probe rejected the template or arguments.
    Probe(smol_printf::Error),
    /// Rendering into the sized buffer failed.
    Render(smol_printf::Error),
    /// Output is not UTF-8 and the buffer is a `String`.
    Encoding,
    /// Output contains a NUL and the buffer is a C string.
    InteriorNul,
}

impl Error {
    pub const fn as_str(self) -> &'static str {
        match self {
            Error::Probe(_) => "growfmt: length probe failed",
            Error::Render(_) => "growfmt: render failed",
            Error::Encoding => "growfmt: output is not valid UTF-8",
            Error::InteriorNul => "growfmt: output contains an interior NUL",
        }
    }

    /// The engine error behind a probe or render failure.
    pub const fn engine(self) -> Option<smol_printf::Error> {
        match self {
            Error::Probe(e) | Error::Render(e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.engine() {
            Some(e) => write!(f, "{} ({})", self.as_str(), e),
            None => f.write_str(self.as_str()),
        }
    }
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Error::Probe(e) | Error::Render(e) => Some(e),
            _ => None,
        }
    }
}
