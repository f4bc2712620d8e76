//! Fixed-width ASCII tags as found in volume descriptors and boot catalogs.
//!
//! Such tags are stored verbatim and right-padded with NUL bytes. Comparisons must happen on the
//! trimmed value; comparing the padded raw bytes with an unpadded constant never matches.


use std::fmt;


/// A fixed-width, NUL-padded tag, kept as raw bytes.
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct AsciiTag<const SIZE: usize>([u8; SIZE]);
impl<const SIZE: usize> AsciiTag<SIZE> {
    /// Pads `value` with NUL bytes up to the width of the tag.
    ///
    /// Returns `None` if `value` does not fit.
    pub fn pad_nul(value: &[u8]) -> Option<Self> {
        if value.len() > SIZE {
            return None;
        }
        let mut buf = [0u8; SIZE];
        buf[..value.len()].copy_from_slice(value);
        Some(Self(buf))
    }

    /// The tag without its trailing NUL padding.
    pub fn strip_nul(&self) -> &[u8] {
        let end = self.0.iter()
            .rposition(|&b| b != 0x00)
            .map(|i| i + 1)
            .unwrap_or(0);
        &self.0[..end]
    }

    /// Whether the trimmed tag equals `expected` exactly.
    pub fn matches(&self, expected: &[u8]) -> bool {
        self.strip_nul() == expected
    }

    pub fn as_bytes(&self) -> &[u8; SIZE] {
        &self.0
    }
}
impl<const SIZE: usize> Default for AsciiTag<SIZE> {
    fn default() -> Self {
        Self([0u8; SIZE])
    }
}
impl<const SIZE: usize> From<[u8; SIZE]> for AsciiTag<SIZE> {
    fn from(value: [u8; SIZE]) -> Self {
        Self(value)
    }
}
impl<const SIZE: usize> From<AsciiTag<SIZE>> for [u8; SIZE] {
    fn from(value: AsciiTag<SIZE>) -> Self {
        value.0
    }
}
impl<const SIZE: usize> fmt::Debug for AsciiTag<SIZE> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AsciiTag(\"{}\")", self)
    }
}
impl<const SIZE: usize> fmt::Display for AsciiTag<SIZE> {
    /// Writes the trimmed tag, escaping anything that is not printable ASCII.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &b in self.strip_nul() {
            match b {
                0x00 => write!(f, "\\0")?,
                0x22 => write!(f, "\\\"")?,
                0x5C => write!(f, "\\\\")?,
                0x20..=0x7E => write!(f, "{}", char::from(b))?,
                other => write!(f, "\\x{:02X}", other)?,
            }
        }
        Ok(())
    }
}
