//! Synthetic disc images for tests.


use std::io::{self, Cursor, Read, Seek, SeekFrom};


const SECTOR: usize = 2048;


/// Builds an in-memory El Torito image one structure at a time.
pub(crate) struct ImageBuilder {
    data: Vec<u8>,
}
impl ImageBuilder {
    pub fn new(logical_sectors: usize) -> Self {
        Self {
            data: vec![0u8; logical_sectors * SECTOR],
        }
    }

    /// The end-to-end layout: PVD at 17 pointing to a catalog at 20, a no-emulation entry of 10
    /// virtual sectors at 25, and a patterned payload.
    pub fn bootable() -> Self {
        let mut builder = Self::new(32);
        builder
            .volume_descriptor(b"CD001", b"EL TORITO SPECIFICATION", 20)
            .validation_entry(20, 0, b"TEST MANUFACTURER", 0x55, 0xAA)
            .initial_entry(20, 0x88, 0, 10, 25)
            .payload(25, &payload(10 * 512));
        builder
    }

    pub fn volume_descriptor(&mut self, identifier: &[u8; 5], boot_system: &[u8], catalog_sector: u32) -> &mut Self {
        let offset = 17 * SECTOR;
        let sector = &mut self.data[offset..offset + SECTOR];
        sector.fill(0);
        sector[0] = 0x00; // boot record
        sector[1..6].copy_from_slice(identifier);
        sector[6] = 1;
        sector[7..7 + boot_system.len()].copy_from_slice(boot_system);
        sector[71..75].copy_from_slice(&catalog_sector.to_le_bytes());
        self
    }

    /// Writes a validation entry with a correct checksum.
    pub fn validation_entry(&mut self, catalog_sector: u32, platform_id: u8, manufacturer: &[u8], sig1: u8, sig2: u8) -> &mut Self {
        let offset = catalog_sector as usize * SECTOR;
        let entry = &mut self.data[offset..offset + 32];
        entry.fill(0);
        entry[0] = 0x01;
        entry[1] = platform_id;
        entry[4..4 + manufacturer.len()].copy_from_slice(manufacturer);
        entry[30] = sig1;
        entry[31] = sig2;

        let mut sum: u16 = 0;
        for pair in entry.chunks_exact(2) {
            sum = sum.wrapping_add(u16::from_le_bytes([pair[0], pair[1]]));
        }
        let checksum = 0u16.wrapping_sub(sum);
        entry[28..30].copy_from_slice(&checksum.to_le_bytes());
        self
    }

    pub fn initial_entry(&mut self, catalog_sector: u32, boot_indicator: u8, media_type: u8, sector_count: u16, start_sector: u32) -> &mut Self {
        let offset = catalog_sector as usize * SECTOR + 32;
        let entry = &mut self.data[offset..offset + 32];
        entry.fill(0);
        entry[0] = boot_indicator;
        entry[1] = media_type;
        entry[6..8].copy_from_slice(&sector_count.to_le_bytes());
        entry[8..12].copy_from_slice(&start_sector.to_le_bytes());
        self
    }

    /// Writes the first MBR partition slot and the boot signature into a logical sector.
    pub fn mbr(&mut self, sector: u32, first_sector: u32, partition_size: u32) -> &mut Self {
        let offset = sector as usize * SECTOR;
        let slot = offset + 446;
        self.data[slot] = 0x80;
        self.data[slot + 4] = 0x06;
        self.data[slot + 8..slot + 12].copy_from_slice(&first_sector.to_le_bytes());
        self.data[slot + 12..slot + 16].copy_from_slice(&partition_size.to_le_bytes());
        self.data[offset + 510] = 0x55;
        self.data[offset + 511] = 0xAA;
        self
    }

    pub fn payload(&mut self, sector: u32, bytes: &[u8]) -> &mut Self {
        let offset = sector as usize * SECTOR;
        self.data[offset..offset + bytes.len()].copy_from_slice(bytes);
        self
    }

    pub fn poke(&mut self, byte_offset: usize, value: u8) -> &mut Self {
        self.data[byte_offset] = value;
        self
    }

    pub fn truncate(&mut self, byte_len: usize) -> &mut Self {
        self.data.truncate(byte_len);
        self
    }

    pub fn build(&self) -> Cursor<Vec<u8>> {
        Cursor::new(self.data.clone())
    }
}


/// A recognizable, non-repeating-per-sector byte pattern.
pub(crate) fn payload(len: usize) -> Vec<u8> {
    (0..len)
        .map(|i| (i % 251) as u8 ^ (i / 512) as u8)
        .collect()
}


/// A source whose every operation fails.
pub(crate) struct FailingReader;
impl Read for FailingReader {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::Other, "device unplugged"))
    }
}
impl Seek for FailingReader {
    fn seek(&mut self, _pos: SeekFrom) -> io::Result<u64> {
        Err(io::Error::new(io::ErrorKind::Other, "device unplugged"))
    }
}
