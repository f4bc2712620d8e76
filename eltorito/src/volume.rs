//! The ISO9660 volume descriptor advertising El Torito support.
//!
//! El Torito places a Boot Record volume descriptor at logical sector 17, directly after the
//! Primary Volume Descriptor. Its layout (El Torito § 2.0, ISO9660 § 8.2) is:
//!
//! | offset | size | field                     |
//! | ------:| ----:| ------------------------- |
//! |      0 |    1 | descriptor type           |
//! |      1 |    5 | standard identifier       |
//! |      6 |    1 | version                   |
//! |      7 |   32 | boot system identifier    |
//! |     39 |   32 | boot identifier (unused)  |
//! |     71 |    4 | boot catalog sector (LE)  |


use std::io::{Read, Seek};

use from_to_repr::from_to_other;
use tracing::{debug, info};

use crate::ascii::AsciiTag;
use crate::error::{Error, FormatError, NotBootableReason};
use crate::io_util::{read_bytes, ReadLittleEndian};
use crate::sector::read_sector_prefix;


/// The logical sector containing the El Torito boot record.
pub const BOOT_RECORD_SECTOR: u32 = 17;

/// The value of the ISO9660 standard identifier.
///
/// See ISO9660 § 8.1.2.
pub const ISO9660_IDENTIFIER_VALUE: [u8; 5] = *b"CD001";

/// The boot system identifier of an El Torito boot record, without its NUL padding.
pub const EL_TORITO_IDENTIFIER_VALUE: &[u8] = b"EL TORITO SPECIFICATION";


/// The type of an ISO9660 volume descriptor.
#[derive(Clone, Copy, Debug)]
#[from_to_other(base_type = u8, derive_compare = "as_int")]
pub enum DescriptorType {
    BootRecord = 0x00,
    PrimaryVolumeDescriptor = 0x01,
    SupplementaryVolumeDescriptor = 0x02,
    VolumePartitionDescriptor = 0x03,
    SetTerminator = 0xFF,
    Other(u8),
}


#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct VolumeDescriptor {
    /// Not validated; any descriptor type at sector 17 is accepted.
    pub descriptor_type: DescriptorType,
    pub standard_identifier: [u8; 5],
    pub version: u8,
    pub boot_system_identifier: AsciiTag<32>,
    pub boot_identifier: AsciiTag<32>,
    pub boot_catalog_sector: u32,
}
impl VolumeDescriptor {
    /// The number of bytes of the descriptor that are decoded.
    pub const SIZE: usize = 75;

    pub fn parse(buf: &[u8; Self::SIZE]) -> Self {
        let mut pos = 0;
        let descriptor_type = DescriptorType::from_base_type(u8::read_le(buf, &mut pos));
        let standard_identifier = read_bytes(buf, &mut pos);
        let version = u8::read_le(buf, &mut pos);
        let boot_system_identifier = read_bytes::<32>(buf, &mut pos).into();
        let boot_identifier = read_bytes::<32>(buf, &mut pos).into();
        let boot_catalog_sector = u32::read_le(buf, &mut pos);

        Self {
            descriptor_type,
            standard_identifier,
            version,
            boot_system_identifier,
            boot_identifier,
            boot_catalog_sector,
        }
    }

    /// Checks both El Torito markers, reporting the first one that is missing.
    pub fn check_bootable(&self) -> Result<(), FormatError> {
        if self.standard_identifier != ISO9660_IDENTIFIER_VALUE {
            return Err(FormatError::NotBootable { reason: NotBootableReason::MissingIso9660Identifier });
        }
        if !self.boot_system_identifier.matches(EL_TORITO_IDENTIFIER_VALUE) {
            return Err(FormatError::NotBootable { reason: NotBootableReason::MissingElToritoSignature });
        }
        Ok(())
    }
}


/// Reads the boot record at sector 17 and returns the sector of the boot catalog.
pub fn validate_volume_descriptor<R: Read + Seek>(source: &mut R) -> Result<u32, Error> {
    let header: [u8; VolumeDescriptor::SIZE] = read_sector_prefix(source, BOOT_RECORD_SECTOR)?;
    let descriptor = VolumeDescriptor::parse(&header);
    debug!("volume descriptor: {:?}", descriptor);
    descriptor.check_bootable()?;

    info!("Booting catalog starts at sector: {}", descriptor.boot_catalog_sector);
    Ok(descriptor.boot_catalog_sector)
}
