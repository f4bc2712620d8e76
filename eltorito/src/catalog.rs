//! The El Torito boot catalog.
//!
//! The boot catalog is a sequence of 32-byte entries. The first one is the Validation Entry, which
//! authenticates the catalog; the second one is the Initial/Default Entry, which describes the boot
//! image that a BIOS boots by default. Section headers and section entries may follow but are not
//! consulted.


use std::fmt;
use std::io::{Read, Seek};

use from_to_repr::from_to_other;
use tracing::{debug, info, warn};

use crate::ascii::AsciiTag;
use crate::error::{Error, FormatError, NotBootableReason};
use crate::io_util::{read_bytes, word_sum_le, ReadLittleEndian};
use crate::sector::read_sector_prefix;


/// The size of every boot catalog entry.
pub const ENTRY_SIZE: usize = 32;


/// The platform a boot catalog was mastered for.
#[derive(Clone, Copy, Debug)]
#[from_to_other(base_type = u8, derive_compare = "as_int")]
pub enum PlatformId {
    X86 = 0x00,
    PowerPc = 0x01,
    Mac = 0x02,
    Efi = 0xEF,
    Other(u8),
}
impl fmt::Display for PlatformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X86 => write!(f, "x86"),
            Self::PowerPc => write!(f, "PowerPC"),
            Self::Mac => write!(f, "Mac"),
            Self::Efi => write!(f, "EFI"),
            Self::Other(other) => write!(f, "unknown({})", other),
        }
    }
}


/// The kind of device a boot image pretends to be.
#[derive(Clone, Copy, Debug)]
#[from_to_other(base_type = u8, derive_compare = "as_int")]
pub enum MediaType {
    NoEmulation = 0x00,
    Floppy1200 = 0x01,
    Floppy1440 = 0x02,
    Floppy2880 = 0x03,
    HardDisk = 0x04,
    Other(u8),
}
impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoEmulation => write!(f, "no emulation"),
            Self::Floppy1200 => write!(f, "1.2meg floppy"),
            Self::Floppy1440 => write!(f, "1.44meg floppy"),
            Self::Floppy2880 => write!(f, "2.88meg floppy"),
            Self::HardDisk => write!(f, "harddisk"),
            Self::Other(other) => write!(f, "unknown({})", other),
        }
    }
}


/// The first entry of a boot catalog.
///
/// See El Torito § 2.1.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct ValidationEntry {
    /// Must be 0x01.
    pub header_id: u8,

    pub platform_id: PlatformId,

    pub reserved: u16,

    /// Identifies the manufacturer or developer of the CD.
    pub manufacturer: AsciiTag<24>,

    /// Chosen so that all 16 little-endian words of the entry sum to zero.
    pub checksum_word: u16,

    /// Must be 0x55.
    pub sig1: u8,

    /// Must be 0xAA.
    pub sig2: u8,
}
impl ValidationEntry {
    pub const HEADER_ID: u8 = 0x01;
    pub const SIG1: u8 = 0x55;
    pub const SIG2: u8 = 0xAA;

    pub fn parse(buf: &[u8; ENTRY_SIZE]) -> Self {
        let mut pos = 0;
        let header_id = u8::read_le(buf, &mut pos);
        let platform_id = PlatformId::from_base_type(u8::read_le(buf, &mut pos));
        let reserved = u16::read_le(buf, &mut pos);
        let manufacturer = read_bytes::<24>(buf, &mut pos).into();
        let checksum_word = u16::read_le(buf, &mut pos);
        let sig1 = u8::read_le(buf, &mut pos);
        let sig2 = u8::read_le(buf, &mut pos);

        Self {
            header_id,
            platform_id,
            reserved,
            manufacturer,
            checksum_word,
            sig1,
            sig2,
        }
    }

    pub fn to_bytes(&self) -> [u8; ENTRY_SIZE] {
        let mut buf = [0u8; ENTRY_SIZE];
        buf[0] = self.header_id;
        buf[1] = self.platform_id.to_base_type();
        buf[2..4].copy_from_slice(&self.reserved.to_le_bytes());
        buf[4..28].copy_from_slice(self.manufacturer.as_bytes());
        buf[28..30].copy_from_slice(&self.checksum_word.to_le_bytes());
        buf[30] = self.sig1;
        buf[31] = self.sig2;
        buf
    }

    /// Checks the header ID and both signature bytes. The checksum is not considered.
    pub fn check(&self) -> Result<(), FormatError> {
        if self.header_id != Self::HEADER_ID || self.sig1 != Self::SIG1 || self.sig2 != Self::SIG2 {
            return Err(FormatError::InvalidValidationEntry {
                header_id: self.header_id,
                sig1: self.sig1,
                sig2: self.sig2,
            });
        }
        Ok(())
    }

    pub fn checksum_valid(&self) -> bool {
        word_sum_le(&self.to_bytes()) == 0
    }
}


/// The second entry of a boot catalog, describing the default boot image.
///
/// See El Torito § 2.2.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct InitialDefaultEntry {
    /// 0x88 if bootable, 0x00 if not.
    pub boot_indicator: u8,

    pub media_type: MediaType,

    /// Real-mode segment to load the image into; 0 means the traditional 0x07C0.
    pub load_segment: u16,

    /// Partition type of the emulated hard disk, copied from its partition table.
    pub system_type: u8,

    pub reserved: u8,

    /// Length of the boot image in 512-byte virtual sectors, as declared by the catalog.
    pub sector_count: u16,

    /// Logical sector (2048 bytes) at which the boot image starts.
    pub start_sector: u32,
}
impl InitialDefaultEntry {
    pub const BOOTABLE: u8 = 0x88;

    pub fn parse(buf: &[u8; ENTRY_SIZE]) -> Self {
        let mut pos = 0;
        let boot_indicator = u8::read_le(buf, &mut pos);
        let media_type = MediaType::from_base_type(u8::read_le(buf, &mut pos));
        let load_segment = u16::read_le(buf, &mut pos);
        let system_type = u8::read_le(buf, &mut pos);
        let reserved = u8::read_le(buf, &mut pos);
        let sector_count = u16::read_le(buf, &mut pos);
        let start_sector = u32::read_le(buf, &mut pos);
        // remaining 20 bytes are unused

        Self {
            boot_indicator,
            media_type,
            load_segment,
            system_type,
            reserved,
            sector_count,
            start_sector,
        }
    }

    pub fn check(&self) -> Result<(), FormatError> {
        if self.boot_indicator != Self::BOOTABLE {
            return Err(FormatError::NotBootable {
                reason: NotBootableReason::BootIndicator(self.boot_indicator),
            });
        }
        Ok(())
    }
}


#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct BootCatalog {
    pub validation: ValidationEntry,
    pub initial: InitialDefaultEntry,
}


/// Reads the boot catalog at `catalog_sector` and validates its first two entries.
pub fn parse_boot_catalog<R: Read + Seek>(source: &mut R, catalog_sector: u32) -> Result<BootCatalog, Error> {
    let entries: [u8; 2*ENTRY_SIZE] = read_sector_prefix(source, catalog_sector)?;
    let mut pos = 0;

    let validation = ValidationEntry::parse(&read_bytes(&entries, &mut pos));
    debug!("validation entry: {:?}", validation);
    validation.check()?;

    info!("Manufacturer of CD: {}", validation.manufacturer);
    info!("Image architecture: {}", validation.platform_id);
    if !validation.checksum_valid() {
        warn!(
            "validation entry checksum mismatch (words sum to {:#06X} instead of 0)",
            word_sum_le(&validation.to_bytes()),
        );
    }

    let initial = InitialDefaultEntry::parse(&read_bytes(&entries, &mut pos));
    debug!("initial/default entry: {:?}", initial);
    initial.check()?;

    info!("Boot media type is: {}", initial.media_type);

    Ok(BootCatalog {
        validation,
        initial,
    })
}
