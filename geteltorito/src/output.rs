//! Delivering the extracted image.


use std::fmt;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::info;


#[derive(Debug)]
pub enum Error {
    CreateFile { path: PathBuf, error: io::Error },
    WriteFile { path: PathBuf, error: io::Error },
    WriteStdout(io::Error),
}
impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateFile { path, error }
                => write!(f, "Cannot open outputfile {:?} for writing. Stop. Error: {}", path, error),
            Self::WriteFile { path, error }
                => write!(f, "Cannot write to outputfile {:?}. Stop. Error: {}", path, error),
            Self::WriteStdout(e)
                => write!(f, "Cannot write image to stdout: {}", e),
        }
    }
}
impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::CreateFile { error, .. } => Some(error),
            Self::WriteFile { error, .. } => Some(error),
            Self::WriteStdout(e) => Some(e),
        }
    }
}


pub fn write_to_file(path: &Path, image: &[u8]) -> Result<(), Error> {
    let mut file = File::create(path)
        .map_err(|error| Error::CreateFile { path: path.to_owned(), error })?;
    file.write_all(image)
        .and_then(|()| file.flush())
        .map_err(|error| Error::WriteFile { path: path.to_owned(), error })?;
    info!("Image has been written to file {:?}.", path);
    Ok(())
}

pub fn write_to_stdout(image: &[u8]) -> Result<(), Error> {
    write_to(&mut io::stdout().lock(), image)
        .map_err(Error::WriteStdout)?;
    info!("Image has been written to stdout ....");
    Ok(())
}

fn write_to<W: Write>(writer: &mut W, image: &[u8]) -> Result<(), io::Error> {
    writer.write_all(image)?;
    writer.flush()
}
