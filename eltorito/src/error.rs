use std::fmt;
use std::io;


/// A failure to fetch sectors from the source image.
#[derive(Debug)]
pub enum ReadError {
    Io(io::Error),
    ShortRead { sector_index: u32, expected: u64, obtained: u64 },
    ZeroLength { sector_index: u32 },
    TooLarge { sector_index: u32, sector_count: u64 },
}
impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e)
                => write!(f, "Error reading from file: {}", e),
            Self::ShortRead { sector_index, expected, obtained }
                => write!(f, "short read at sector {} (expected {} bytes, obtained {})", sector_index, expected, obtained),
            Self::ZeroLength { sector_index }
                => write!(f, "refusing to read zero bytes at sector {}", sector_index),
            Self::TooLarge { sector_index, sector_count }
                => write!(f, "{} sector(s) at sector {} exceed the addressable range", sector_count, sector_index),
        }
    }
}
impl std::error::Error for ReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::ShortRead { .. } => None,
            Self::ZeroLength { .. } => None,
            Self::TooLarge { .. } => None,
        }
    }
}
impl From<io::Error> for ReadError {
    fn from(value: io::Error) -> Self { Self::Io(value) }
}


/// Why an image was judged not to be El Torito bootable.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum NotBootableReason {
    /// Sector 17 does not carry the "CD001" standard identifier.
    MissingIso9660Identifier,

    /// Sector 17 does not carry the "EL TORITO SPECIFICATION" boot system identifier.
    MissingElToritoSignature,

    /// The initial/default entry has a boot indicator other than 0x88.
    BootIndicator(u8),
}


/// A violated invariant in one of the on-disc structures.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum FormatError {
    NotBootable { reason: NotBootableReason },
    InvalidValidationEntry { header_id: u8, sig1: u8, sig2: u8 },
}
impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotBootable { reason: NotBootableReason::BootIndicator(_) }
                => write!(f, "Boot indicator in Initial/Default-Entry is not 0x88. CD is not bootable."),
            Self::NotBootable { .. }
                => write!(f, "This data image does not seem to be a bootable CD-image"),
            Self::InvalidValidationEntry { .. }
                => write!(f, "Invalid Validation Entry on image"),
        }
    }
}
impl std::error::Error for FormatError {
}


#[derive(Debug)]
pub enum Error {
    Read(ReadError),
    Format(FormatError),
}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read(e)
                => write!(f, "{}", e),
            Self::Format(e)
                => write!(f, "{}", e),
        }
    }
}
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Read(e) => Some(e),
            Self::Format(e) => Some(e),
        }
    }
}
impl From<ReadError> for Error {
    fn from(value: ReadError) -> Self { Self::Read(value) }
}
impl From<FormatError> for Error {
    fn from(value: FormatError) -> Self { Self::Format(value) }
}
impl From<io::Error> for Error {
    fn from(value: io::Error) -> Self { Self::Read(ReadError::Io(value)) }
}
