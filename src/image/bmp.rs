use std::error::Error;
use std::io::Write;

use crate::color::{palette, PALETTE_SIZE};
use crate::image::Encode;

const HEADER_SIZE: usize = 54;
const INFO_HEADER_SIZE: u32 = 40;

// 14-byte file header + 40-byte BITMAPINFOHEADER + 1024-byte color table
const PIXEL_DATA_OFFSET: u32 = HEADER_SIZE as u32 + PALETTE_SIZE as u32 * 4;

/// 8-bit indexed BMP (BITMAPINFOHEADER) with the fixed synthetic color
/// table. Rows are stored bottom-up and zero-padded to 4-byte boundaries.
#[derive(Debug)]
pub struct BmpEncoder {
    width: u32,
    height: u32,
}

impl BmpEncoder {
    pub fn new(width: u32, height: u32) -> BmpEncoder {
        BmpEncoder { width, height }
    }

    /// Zero bytes appended to each row so every row occupies a multiple of
    /// 4 bytes.
    pub fn row_padding(&self) -> u32 {
        (4 - self.width % 4) % 4
    }

    /// Total file length: headers, color table, padded pixel rows.
    pub fn file_size(&self) -> u32 {
        PIXEL_DATA_OFFSET + self.height * (self.width + self.row_padding())
    }

    fn header(&self) -> [u8; HEADER_SIZE] {
        let mut header = [0u8; HEADER_SIZE];

        // file header
        header[0] = b'B';
        header[1] = b'M';
        header[2..6].copy_from_slice(&self.file_size().to_le_bytes());
        // 6..10 reserved, zero
        header[10..14].copy_from_slice(&PIXEL_DATA_OFFSET.to_le_bytes());

        // BITMAPINFOHEADER
        header[14..18].copy_from_slice(&INFO_HEADER_SIZE.to_le_bytes());
        header[18..22].copy_from_slice(&(self.width as i32).to_le_bytes());
        // height stays positive; bottom-up storage comes from row order
        header[22..26].copy_from_slice(&(self.height as i32).to_le_bytes());
        header[26..28].copy_from_slice(&1u16.to_le_bytes()); // color planes
        header[28..30].copy_from_slice(&8u16.to_le_bytes()); // bits per pixel
        // 30..46: compression (BI_RGB), raw image size, resolutions, all zero
        header[46..50].copy_from_slice(&(PALETTE_SIZE as u32).to_le_bytes());
        // 50..54 important colors, zero

        header
    }
}

impl Encode for BmpEncoder {
    fn encode_to(&self, buffer: &[u8], writer: &mut dyn Write) -> Result<(), Box<dyn Error>> {
        let width = self.width as usize;
        let expected = width * self.height as usize;
        if buffer.len() < expected {
            return Err(format!(
                "buffer holds {} bytes but a {}x{} raster needs {}",
                buffer.len(),
                self.width,
                self.height,
                expected
            ))?;
        }

        writer.write_all(&self.header())?;
        writer.write_all(&palette())?;

        // at most 3 padding bytes per row
        let padding = [0u8; 3];
        let pad = self.row_padding() as usize;
        for row in (0..self.height as usize).rev() {
            writer.write_all(&buffer[row * width..row * width + width])?;
            writer.write_all(&padding[..pad])?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::gradient;
    use rstest::rstest;

    #[rstest]
    #[case(1, 3)]
    #[case(2, 2)]
    #[case(3, 1)]
    #[case(4, 0)]
    #[case(5, 3)]
    #[case(512, 0)]
    fn row_padding(#[case] width: u32, #[case] expected: u32) {
        assert_eq!(BmpEncoder::new(width, 1).row_padding(), expected);
    }

    #[rstest]
    #[case(4, 2, 1086)]
    #[case(3, 3, 54 + 1024 + 3 * 4)]
    #[case(5, 2, 54 + 1024 + 2 * 8)]
    #[case(1, 1, 54 + 1024 + 4)]
    fn file_size(#[case] width: u32, #[case] height: u32, #[case] expected: u32) {
        assert_eq!(BmpEncoder::new(width, height).file_size(), expected);
    }

    #[test]
    fn header_fields() {
        let encoder = BmpEncoder::new(5, 3);
        let header = encoder.header();

        assert_eq!(&header[0..2], b"BM");
        assert_eq!(
            u32::from_le_bytes(header[2..6].try_into().unwrap()),
            encoder.file_size()
        );
        assert_eq!(&header[6..10], &[0, 0, 0, 0]);
        assert_eq!(u32::from_le_bytes(header[10..14].try_into().unwrap()), 1078);
        assert_eq!(u32::from_le_bytes(header[14..18].try_into().unwrap()), 40);
        assert_eq!(i32::from_le_bytes(header[18..22].try_into().unwrap()), 5);
        assert_eq!(i32::from_le_bytes(header[22..26].try_into().unwrap()), 3);
        assert_eq!(u16::from_le_bytes(header[26..28].try_into().unwrap()), 1);
        assert_eq!(u16::from_le_bytes(header[28..30].try_into().unwrap()), 8);
        assert_eq!(&header[30..46], &[0u8; 16]);
        assert_eq!(&header[46..50], &[0, 1, 0, 0]);
        assert_eq!(&header[50..54], &[0, 0, 0, 0]);
    }

    #[test]
    fn encoded_length_matches_size_field() {
        let buffer = gradient(5, 3);
        let encoder = BmpEncoder::new(5, 3);
        let encoded = encoder.encode(&buffer).unwrap();

        assert_eq!(encoded.len(), encoder.file_size() as usize);
        assert_eq!(
            u32::from_le_bytes(encoded[2..6].try_into().unwrap()),
            encoded.len() as u32
        );
    }

    #[test]
    fn color_table_follows_header() {
        let encoded = BmpEncoder::new(1, 1).encode(&[0]).unwrap();

        assert_eq!(&encoded[54..58], &[0, 0, 0, 0]);
        assert_eq!(&encoded[58..62], &[1, 2, 3, 0]);
        // wrapped channels
        assert_eq!(&encoded[54 + 200 * 4..54 + 200 * 4 + 4], &[200, 144, 88, 0]);
        assert_eq!(&encoded[54 + 255 * 4..54 + 255 * 4 + 4], &[255, 254, 253, 0]);
    }

    #[test]
    fn rows_bottom_up() {
        // the 4x2 reference raster: zero padding, size 1086
        let buffer = [10u8, 20, 30, 40, 50, 60, 70, 80];
        let encoded = BmpEncoder::new(4, 2).encode(&buffer).unwrap();

        assert_eq!(encoded.len(), 1086);
        assert_eq!(&encoded[1078..1082], &[50, 60, 70, 80]);
        assert_eq!(&encoded[1082..1086], &[10, 20, 30, 40]);
    }

    #[test]
    fn rows_padded_with_zeros() {
        // width 3 needs one pad byte per row
        let buffer = [1u8, 2, 3, 4, 5, 6];
        let encoded = BmpEncoder::new(3, 2).encode(&buffer).unwrap();

        assert_eq!(encoded.len(), 54 + 1024 + 8);
        assert_eq!(&encoded[1078..], &[4, 5, 6, 0, 1, 2, 3, 0]);
    }

    #[test]
    fn non_square_rows_stride_by_width() {
        let buffer = gradient(3, 2);
        let encoded = BmpEncoder::new(3, 2).encode(&buffer).unwrap();

        // bottom row first: input row 1 is [1, 2, 3]
        assert_eq!(&encoded[1078..1081], &[1, 2, 3]);
        assert_eq!(&encoded[1082..1085], &[0, 1, 2]);
    }

    #[test]
    fn short_buffer_rejected() {
        assert!(BmpEncoder::new(4, 2).encode(&[0u8; 7]).is_err());
    }
}
