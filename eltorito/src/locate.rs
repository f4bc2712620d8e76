//! Sizing and reading the boot image.


use std::io::{Read, Seek};

use tracing::{debug, info};

use crate::catalog::{InitialDefaultEntry, MediaType};
use crate::error::Error;
use crate::io_util::{read_bytes, ReadLittleEndian};
use crate::sector::{read_sector_prefix, read_sectors, VIRTUAL_SECTOR_SIZE};


/// Byte offset of the first partition slot within a master boot record.
pub const MBR_FIRST_PARTITION_OFFSET: usize = 446;

/// Byte offset of the 0x55 0xAA boot signature within a master boot record.
pub const MBR_SIGNATURE_OFFSET: usize = 510;

const MBR_SIZE: usize = 512;


/// One 16-byte partition slot of a master boot record.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct MbrPartitionEntry {
    pub status: u8,
    pub first_chs: [u8; 3],
    pub partition_type: u8,
    pub last_chs: [u8; 3],
    pub first_sector: u32,
    pub sector_count: u32,
}
impl MbrPartitionEntry {
    pub const SIZE: usize = 16;

    pub fn parse(buf: &[u8; Self::SIZE]) -> Self {
        let mut pos = 0;
        let status = u8::read_le(buf, &mut pos);
        let first_chs = read_bytes(buf, &mut pos);
        let partition_type = u8::read_le(buf, &mut pos);
        let last_chs = read_bytes(buf, &mut pos);
        let first_sector = u32::read_le(buf, &mut pos);
        let sector_count = u32::read_le(buf, &mut pos);

        Self {
            status,
            first_chs,
            partition_type,
            last_chs,
            first_sector,
            sector_count,
        }
    }

    /// The number of disk sectors up to the end of this partition.
    pub fn end_sector(&self) -> u64 {
        u64::from(self.first_sector) + u64::from(self.sector_count)
    }
}


/// The immutable result of a successful decode.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct ExtractedImage {
    start_sector: u32,
    sector_count: u64,
    data: Vec<u8>,
}
impl ExtractedImage {
    /// Logical sector at which the image was read.
    pub fn start_sector(&self) -> u32 { self.start_sector }

    /// Length of the image in 512-byte virtual sectors.
    pub fn sector_count(&self) -> u64 { self.sector_count }

    pub fn as_bytes(&self) -> &[u8] { &self.data }

    pub fn into_bytes(self) -> Vec<u8> { self.data }
}


/// The fixed size of an emulated floppy, in virtual sectors.
pub fn floppy_sector_count(media_type: MediaType) -> Option<u64> {
    let kibibytes = match media_type {
        MediaType::Floppy1200 => 1200,
        MediaType::Floppy1440 => 1440,
        MediaType::Floppy2880 => 2880,
        _ => return None,
    };
    Some(kibibytes * 1024 / VIRTUAL_SECTOR_SIZE)
}


/// Reads the partition table at the start of an emulated hard disk and returns the end of its
/// first partition.
fn hard_disk_sector_count<R: Read + Seek>(source: &mut R, start_sector: u32) -> Result<u64, Error> {
    let mbr: [u8; MBR_SIZE] = read_sector_prefix(source, start_sector)?;

    let mut pos = MBR_FIRST_PARTITION_OFFSET;
    let partition = MbrPartitionEntry::parse(&read_bytes(&mbr, &mut pos));
    debug!("first partition of emulated hard disk: {:?}", partition);

    if mbr[MBR_SIGNATURE_OFFSET..MBR_SIGNATURE_OFFSET+2] != [0x55, 0xAA] {
        debug!("emulated hard disk lacks the MBR boot signature");
    }

    Ok(partition.end_sector())
}


/// Determines the length of the boot image in virtual sectors.
///
/// Floppy emulation uses the floppy geometry and hard disk emulation uses the extent of the first
/// partition of the emulated disk. Whenever that yields zero, including for no emulation and unknown
/// media types, the count declared in the catalog entry is used instead.
pub fn resolve_sector_count<R: Read + Seek>(source: &mut R, entry: &InitialDefaultEntry) -> Result<u64, Error> {
    let media_count = match entry.media_type {
        MediaType::NoEmulation => 0,
        MediaType::Floppy1200|MediaType::Floppy1440|MediaType::Floppy2880
            => floppy_sector_count(entry.media_type).unwrap_or(0),
        MediaType::HardDisk => hard_disk_sector_count(source, entry.start_sector)?,
        MediaType::Other(_) => 0,
    };

    if media_count == 0 {
        Ok(u64::from(entry.sector_count))
    } else {
        Ok(media_count)
    }
}


/// Reads the boot image described by the initial/default entry.
pub fn locate_and_read_image<R: Read + Seek>(source: &mut R, entry: &InitialDefaultEntry) -> Result<ExtractedImage, Error> {
    let sector_count = resolve_sector_count(source, entry)?;
    info!(
        "El Torito image starts at sector {} and has {} sector(s) of {} Bytes",
        entry.start_sector, sector_count, VIRTUAL_SECTOR_SIZE,
    );

    let data = read_sectors(source, entry.start_sector, sector_count)?;
    Ok(ExtractedImage {
        start_sector: entry.start_sector,
        sector_count,
        data,
    })
}
