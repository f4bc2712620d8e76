//! Extraction of El Torito boot images from bootable CD-ROM images.
//!
//! Decoding runs in three stages, each consuming the validated output of the previous one:
//!
//! 1. [`validate_volume_descriptor`] checks the boot record at sector 17 and finds the boot catalog.
//! 2. [`parse_boot_catalog`] validates the catalog and decodes its initial/default entry.
//! 3. [`locate_and_read_image`] sizes the boot image according to its media type and reads it.
//!
//! [`extract_boot_image`] runs all three.


mod ascii;
pub mod catalog;
mod error;
#[cfg(test)]
mod fixtures;
mod io_util;
pub mod locate;
pub mod sector;
pub mod volume;


use std::io::{Read, Seek};

pub use crate::ascii::AsciiTag;
pub use crate::catalog::{parse_boot_catalog, BootCatalog, InitialDefaultEntry, MediaType, PlatformId, ValidationEntry};
pub use crate::error::{Error, FormatError, NotBootableReason, ReadError};
pub use crate::locate::{locate_and_read_image, resolve_sector_count, ExtractedImage, MbrPartitionEntry};
pub use crate::sector::read_sectors;
pub use crate::volume::{validate_volume_descriptor, VolumeDescriptor};


/// Extracts the initial/default boot image from a bootable CD-ROM image.
pub fn extract_boot_image<R: Read + Seek>(source: &mut R) -> Result<ExtractedImage, Error> {
    let catalog_sector = validate_volume_descriptor(source)?;
    let catalog = parse_boot_catalog(source, catalog_sector)?;
    locate_and_read_image(source, &catalog.initial)
}


#[cfg(test)]
mod tests {
    use super::extract_boot_image;
    use crate::error::{Error, FormatError, ReadError};
    use crate::fixtures::{payload, FailingReader, ImageBuilder};
    use tracing_test::traced_test;

    #[test]
    #[traced_test]
    fn test_extract_no_emulation() {
        let mut source = ImageBuilder::bootable().build();
        let image = extract_boot_image(&mut source).unwrap();

        assert_eq!(image.start_sector(), 25);
        assert_eq!(image.sector_count(), 10);
        assert_eq!(image.as_bytes().len(), 5120);
        assert_eq!(image.into_bytes(), payload(5120));
        assert!(logs_contain("Booting catalog starts at sector: 20"));
        assert!(logs_contain("El Torito image starts at sector 25 and has 10 sector(s) of 512 Bytes"));
    }

    #[test]
    fn test_extract_twice() {
        let mut source = ImageBuilder::bootable().build();
        let first = extract_boot_image(&mut source).unwrap();
        let second = extract_boot_image(&mut source).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_extract_hard_disk() {
        let mut disk = payload(8 * 512);
        disk[446..462].fill(0);
        disk[446 + 8..446 + 12].copy_from_slice(&2u32.to_le_bytes());
        disk[446 + 12..446 + 16].copy_from_slice(&6u32.to_le_bytes());
        disk[510] = 0x55;
        disk[511] = 0xAA;

        let mut builder = ImageBuilder::new(40);
        builder
            .volume_descriptor(b"CD001", b"EL TORITO SPECIFICATION", 20)
            .validation_entry(20, 0, b"", 0x55, 0xAA)
            .initial_entry(20, 0x88, 4, 1, 30)
            .payload(30, &disk);
        let mut source = builder.build();

        let image = extract_boot_image(&mut source).unwrap();
        assert_eq!(image.sector_count(), 8);
        assert_eq!(image.as_bytes(), disk.as_slice());
    }

    #[test]
    fn test_extract_not_bootable_image() {
        let mut builder = ImageBuilder::bootable();
        // a boot record for some other boot system
        builder.volume_descriptor(b"CD001", b"LINUX", 20);
        let mut source = builder.build();
        let err = extract_boot_image(&mut source).unwrap_err();
        assert!(matches!(err, Error::Format(FormatError::NotBootable { .. })));
    }

    #[test]
    fn test_truncated_at_every_stage() {
        let cut_points = [
            0,                  // before the boot record
            17 * 2048 + 40,     // inside the boot record
            20 * 2048,          // before the catalog
            20 * 2048 + 48,     // inside the initial/default entry
            25 * 2048 + 5119,   // one byte short of the payload
        ];
        for cut in cut_points {
            let mut builder = ImageBuilder::bootable();
            builder.truncate(cut);
            let mut source = builder.build();
            let err = extract_boot_image(&mut source).unwrap_err();
            assert!(
                matches!(err, Error::Read(ReadError::ShortRead { .. })),
                "cut at {} yielded {:?}", cut, err,
            );
        }
    }

    #[test]
    fn test_failing_source() {
        let err = extract_boot_image(&mut FailingReader).unwrap_err();
        assert!(matches!(err, Error::Read(ReadError::Io(_))));
    }
}
