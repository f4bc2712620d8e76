//! Reading sectors from the source image.


use std::io::{Read, Seek, SeekFrom};

use tracing::debug;

use crate::error::ReadError;


/// The number of bytes per logical sector of a CD-ROM.
///
/// All sector indexes (volume descriptors, the boot catalog, the boot image location) are counted in
/// units of this size.
pub const LOGICAL_SECTOR_SIZE: u64 = 2048;

/// The number of bytes per virtual sector.
///
/// El Torito counts boot image lengths in units of emulated 512-byte disk sectors.
pub const VIRTUAL_SECTOR_SIZE: u64 = 512;


/// Reads `sector_count` virtual sectors, starting at the logical sector `sector_index`.
///
/// The seek position is counted in 2048-byte logical sectors while the length is counted in 512-byte
/// virtual sectors; this matches how the boot catalog describes boot images.
///
/// The cursor of `source` is left at an unspecified position.
pub fn read_sectors<R: Read + Seek>(source: &mut R, sector_index: u32, sector_count: u64) -> Result<Vec<u8>, ReadError> {
    if sector_count == 0 {
        return Err(ReadError::ZeroLength { sector_index });
    }
    let byte_count = sector_count.checked_mul(VIRTUAL_SECTOR_SIZE)
        .ok_or(ReadError::TooLarge { sector_index, sector_count })?;

    let byte_offset = u64::from(sector_index) * LOGICAL_SECTOR_SIZE;
    debug!("reading {} byte(s) at offset {} (sector {})", byte_count, byte_offset, sector_index);
    source.seek(SeekFrom::Start(byte_offset))?;

    // the count is untrusted, so allocate only as data arrives
    let mut buf = Vec::new();
    let obtained = source.by_ref().take(byte_count).read_to_end(&mut buf)?;
    let obtained = u64::try_from(obtained)
        .map_err(|_| ReadError::TooLarge { sector_index, sector_count })?;
    if obtained < byte_count {
        return Err(ReadError::ShortRead { sector_index, expected: byte_count, obtained });
    }
    Ok(buf)
}

/// Reads one virtual sector and returns its first `N` bytes as a fixed-size record.
pub(crate) fn read_sector_prefix<R: Read + Seek, const N: usize>(source: &mut R, sector_index: u32) -> Result<[u8; N], ReadError> {
    let sector = read_sectors(source, sector_index, 1)?;
    sector.first_chunk::<N>()
        .copied()
        .ok_or(ReadError::ShortRead {
            sector_index,
            expected: N as u64,
            obtained: sector.len() as u64,
        })
}
