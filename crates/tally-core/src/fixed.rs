//! Fixed-point measurement values.
//!
//! Input values carry exactly one fractional digit, so they are stored as the
//! underlying decimal scaled by 10. All min/max/sum arithmetic happens in
//! this integer domain, which stays exact across billions of accumulations
//! where floating point would drift.

use std::fmt;
use std::io::{self, Write};

/// A signed decimal with exactly one fractional digit, stored in tenths.
///
/// `Fixed::from_tenths(123)` is `12.3`; `Fixed::from_tenths(-5)` is `-0.5`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fixed(i32);

impl Fixed {
    /// Creates a value from raw tenths.
    pub const fn from_tenths(tenths: i32) -> Self {
        Self(tenths)
    }

    /// Returns the raw tenths.
    pub const fn tenths(self) -> i32 {
        self.0
    }

    /// Writes the decimal rendering to a byte sink.
    ///
    /// Negative values print a leading `-` on the absolute value; the tenths
    /// digit is always present after the decimal point.
    pub fn write_to<W: Write>(self, out: &mut W) -> io::Result<()> {
        let mut v = i64::from(self.0);
        if v < 0 {
            out.write_all(b"-")?;
            v = -v;
        }
        write!(out, "{}.{}", v / 10, v % 10)
    }
}

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut v = i64::from(self.0);
        if v < 0 {
            f.write_str("-")?;
            v = -v;
        }
        write!(f, "{}.{}", v / 10, v % 10)
    }
}
