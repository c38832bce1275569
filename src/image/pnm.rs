use std::error::Error;
use std::io::Write;

use crate::color::Rgb8;
use crate::image::Encode;

/// Output variant: P5 carries the samples unmodified, P6 expands each
/// sample into its synthetic RGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PnmMode {
    Grayscale,
    Color,
}

/// Binary PNM. Rows are emitted top-down with no padding.
#[derive(Debug)]
pub struct PnmEncoder {
    width: u32,
    height: u32,
    mode: PnmMode,
}

impl PnmEncoder {
    pub fn new(width: u32, height: u32, mode: PnmMode) -> PnmEncoder {
        PnmEncoder {
            width,
            height,
            mode,
        }
    }

    fn header(&self) -> String {
        let magic = match self.mode {
            PnmMode::Grayscale => "P5",
            PnmMode::Color => "P6",
        };

        format!("{}\n{} {}\n255\n", magic, self.width, self.height)
    }
}

impl Encode for PnmEncoder {
    fn encode_to(&self, buffer: &[u8], writer: &mut dyn Write) -> Result<(), Box<dyn Error>> {
        let expected = self.width as usize * self.height as usize;
        if buffer.len() < expected {
            return Err(format!(
                "buffer holds {} bytes but a {}x{} raster needs {}",
                buffer.len(),
                self.width,
                self.height,
                expected
            ))?;
        }
        let buffer = &buffer[..expected];

        writer.write_all(self.header().as_bytes())?;

        match self.mode {
            PnmMode::Grayscale => writer.write_all(buffer)?,
            PnmMode::Color => {
                for &value in buffer.iter() {
                    let color = Rgb8::synthetic(value);
                    writer.write_all(&[color.r, color.g, color.b])?;
                }
            }
        }

        Ok(())
    }
}
