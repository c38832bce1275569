#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    /// Synthetic colorization of an 8-bit sample: the channel ramps wrap at
    /// different rates, so 256 gray levels spread into 256 distinct colors.
    pub fn synthetic(value: u8) -> Rgb8 {
        Rgb8 {
            r: value.wrapping_mul(3),
            g: value.wrapping_mul(2),
            b: value,
        }
    }
}

pub const PALETTE_SIZE: usize = 256;

/// BMP color table: entry `i` is the synthetic color of index `i`, stored
/// as blue, green, red, reserved. Derived from the entry index only, never
/// from image content.
pub fn palette() -> [u8; PALETTE_SIZE * 4] {
    let mut colors = [0u8; PALETTE_SIZE * 4];
    for i in 0..PALETTE_SIZE {
        let color = Rgb8::synthetic(i as u8);
        colors[i * 4] = color.b;
        colors[i * 4 + 1] = color.g;
        colors[i * 4 + 2] = color.r;
        // reserved byte stays 0
    }

    colors
}
