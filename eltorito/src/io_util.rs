//! Fixed-offset field extraction from on-disc records.
//!
//! Every record decoded by this crate is a sequence of fixed-width fields at fixed offsets. The
//! decoders walk a byte buffer with a position cursor and pull out each field in turn.


pub(crate) trait ReadLittleEndian {
    fn read_le(buf: &[u8], pos: &mut usize) -> Self;
}
macro_rules! impl_read_little_endian {
    ($type:ty) => {
        impl ReadLittleEndian for $type {
            fn read_le(buf: &[u8], pos: &mut usize) -> Self {
                const SIZE: usize = ::std::mem::size_of::<$type>();
                let mut bytes = [0u8; SIZE];
                bytes.copy_from_slice(&buf[*pos..*pos+SIZE]);
                *pos += SIZE;
                <$type>::from_le_bytes(bytes)
            }
        }
    };
}
impl_read_little_endian!(u8);
impl_read_little_endian!(u16);
impl_read_little_endian!(u32);


pub(crate) fn read_bytes<const N: usize>(buf: &[u8], pos: &mut usize) -> [u8; N] {
    let mut ret = [0u8; N];
    ret.copy_from_slice(&buf[*pos..*pos+N]);
    *pos += N;
    ret
}

/// Sums a record as a sequence of little-endian 16-bit words, wrapping on overflow.
pub(crate) fn word_sum_le(buf: &[u8]) -> u16 {
    buf.chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .fold(0u16, |acc, word| acc.wrapping_add(word))
}
