use std::error::Error;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub use self::bmp::*;
pub use self::pnm::*;

mod bmp;
mod pnm;

pub trait Encode {
    /// Stream the encoded image into `writer`.
    fn encode_to(&self, buffer: &[u8], writer: &mut dyn Write) -> Result<(), Box<dyn Error>>;

    /// Encode into an in-memory buffer.
    fn encode(&self, buffer: &[u8]) -> Result<Vec<u8>, Box<dyn Error>> {
        let mut out: Vec<u8> = Vec::new();
        self.encode_to(buffer, &mut out)?;

        Ok(out)
    }

    /// Encode straight to a file. If the path cannot be opened the error is
    /// returned before any byte is produced; nothing is retried and no
    /// partial file is cleaned up.
    fn write(&self, buffer: &[u8], path: &Path) -> Result<(), Box<dyn Error>> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        self.encode_to(buffer, &mut writer)?;
        writer.flush()?;

        Ok(())
    }
}
