use crate::error::PngLoadingError;

/// Tightly packed RGBA pixels, one `u8` per channel, rows from top
/// to bottom.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    /// The pixels of the image, `width * height * 4` bytes.
    pub pixels: Vec<u8>,
    /// The width of the image.
    pub width: u32,
    /// The height of the image.
    pub height: u32,
}

impl Image {
    /// Parses a PNG image and converts it to RGBA.
    ///
    /// Palette and low bit depth images are expanded by the decoder,
    /// grayscale is spread to all three color channels, and 16-bit
    /// channels are cut down to their high byte.
    ///
    /// # Errors
    ///
    /// A [`PngError`](enum.PngLoadingError.html#variant.PngError)
    /// will be returned if the `png` crate can't read the data (most
    /// probably, `bytes` doesn't describe a valid PNG image).
    pub fn from_png(bytes: &[u8]) -> Result<Image, PngLoadingError> {
        use png::{BitDepth, ColorType, Decoder, Transformations};
        let mut decoder = Decoder::new(bytes);
        decoder.set_transformations(Transformations::EXPAND);
        let (info, mut reader) = decoder.read_info()?;
        let bytes_per_channel = match info.bit_depth {
            BitDepth::Eight => 1,
            BitDepth::Sixteen => 2,
            bit_depth => return Err(PngLoadingError::UnsupportedBitDepth(bit_depth)),
        };
        let channels = match info.color_type {
            ColorType::Grayscale => 1,
            ColorType::GrayscaleAlpha => 2,
            ColorType::RGB => 3,
            ColorType::RGBA => 4,
            // EXPAND turns palettes into RGB(A).
            ColorType::Indexed => 3,
        };

        let mut raw = vec![0; info.buffer_size()];
        reader.next_frame(&mut raw)?;

        let pixel_count = info.width as usize * info.height as usize;
        let stride = channels * bytes_per_channel;
        if raw.len() < pixel_count * stride {
            return Err(PngLoadingError::InvalidDimensions {
                width: info.width,
                height: info.height,
                len: raw.len(),
            });
        }

        let mut pixels = Vec::with_capacity(pixel_count * 4);
        for source in raw.chunks(stride).take(pixel_count) {
            // Big endian, so the first byte of each channel is the significant one.
            let channel = |i: usize| source[i * bytes_per_channel];
            match channels {
                1 => pixels.extend_from_slice(&[channel(0), channel(0), channel(0), 0xFF]),
                2 => pixels.extend_from_slice(&[channel(0), channel(0), channel(0), channel(1)]),
                3 => pixels.extend_from_slice(&[channel(0), channel(1), channel(2), 0xFF]),
                _ => pixels.extend_from_slice(&[channel(0), channel(1), channel(2), channel(3)]),
            }
        }

        Ok(Image {
            pixels,
            width: info.width,
            height: info.height,
        })
    }

    /// Creates a solid color image.
    ///
    /// # Example
    /// ```
    /// use quadshow::Image;
    /// let image = Image::from_color(128, 128, [0xB4, 0x6E, 0xC8, 0xFF]);
    /// // image now represents a 128px by 128px image that consists of fully opaque violet pixels.
    /// assert_eq!(image.pixel(127, 127), Some([0xB4, 0x6E, 0xC8, 0xFF]));
    /// ```
    pub fn from_color(width: u32, height: u32, color: [u8; 4]) -> Image {
        let pixel_count = width as usize * height as usize;
        let mut pixels = Vec::with_capacity(pixel_count * 4);
        for _ in 0..pixel_count {
            pixels.extend_from_slice(&color);
        }
        Image {
            pixels,
            width,
            height,
        }
    }

    /// Creates a fully transparent image.
    pub fn blank(width: u32, height: u32) -> Image {
        Image::from_color(width, height, [0, 0, 0, 0])
    }

    /// Returns the pixel at (x, y), or None if it's outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let i = self.index(x, y)?;
        let p = &self.pixels[i..i + 4];
        Some([p[0], p[1], p[2], p[3]])
    }

    /// Sets the pixel at (x, y). Writes outside the image are ignored.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: [u8; 4]) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i..i + 4].copy_from_slice(&color);
        }
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some((y as usize * self.width as usize + x as usize) * 4)
        } else {
            None
        }
    }
}
