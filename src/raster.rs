//! In-memory rasters and their writer collaborators.  A render pass
//! produces one of two shapes: a single-channel grayscale raster or
//! a three-channel RGB raster, both flat row-major byte buffers.
//! The writers hand the finished buffer to the `image` crate's
//! encoders; nothing here re-reads what it wrote.

use image::pnm::PNMEncoder;
use image::pnm::{PNMSubtype, SampleEncoding};
use image::png::PNGEncoder;
use image::ColorType;
use std::fs::File;
use std::io;
use std::path::Path;

use errors::ConfigError;
use palette::Rgb;
use viewport::Pixel;

/// A single-channel, 8-bit raster.  Starts all black; one render
/// pass fully populates it.
#[derive(Clone, Debug, PartialEq)]
pub struct GrayRaster {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl GrayRaster {
    /// An all-black raster of the given dimensions.
    pub fn new(width: usize, height: usize) -> Result<GrayRaster, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyRaster(width, height));
        }
        Ok(GrayRaster {
            width,
            height,
            data: vec![0; width * height],
        })
    }

    /// Adopt a prepared row-major buffer whose length matches the
    /// dimensions.
    pub(crate) fn from_raw(width: usize, height: usize, data: Vec<u8>) -> GrayRaster {
        assert_eq!(data.len(), width * height);
        GrayRaster {
            width,
            height,
            data,
        }
    }

    /// Raster width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Raster height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Read the intensity under a coordinate.
    pub fn get(&self, pixel: Pixel) -> u8 {
        self.data[pixel.y * self.width + pixel.x]
    }

    /// Write the intensity under a coordinate.
    pub fn set(&mut self, pixel: Pixel, value: u8) {
        self.data[pixel.y * self.width + pixel.x] = value;
    }

    /// The raw row-major bytes, one per pixel.
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Write the raster to disk as a binary PNM graymap.
    pub fn write_pnm<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let output = File::create(path)?;
        let mut encoder =
            PNMEncoder::new(output).with_subtype(PNMSubtype::Graymap(SampleEncoding::Binary));
        encoder.encode(
            &self.data[..],
            self.width as u32,
            self.height as u32,
            ColorType::Gray(8),
        )?;
        Ok(())
    }
}

/// A three-channel, 8-bit raster.  Channel order is R, G, B.
#[derive(Clone, Debug, PartialEq)]
pub struct RgbRaster {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl RgbRaster {
    /// An all-black raster of the given dimensions.
    pub fn new(width: usize, height: usize) -> Result<RgbRaster, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyRaster(width, height));
        }
        Ok(RgbRaster {
            width,
            height,
            data: vec![0; width * height * 3],
        })
    }

    /// Adopt a prepared row-major buffer whose length matches the
    /// dimensions, three bytes per pixel.
    pub(crate) fn from_raw(width: usize, height: usize, data: Vec<u8>) -> RgbRaster {
        assert_eq!(data.len(), width * height * 3);
        RgbRaster {
            width,
            height,
            data,
        }
    }

    /// Raster width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Raster height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Read the color under a coordinate.
    pub fn get(&self, pixel: Pixel) -> Rgb {
        let at = (pixel.y * self.width + pixel.x) * 3;
        Rgb {
            r: self.data[at],
            g: self.data[at + 1],
            b: self.data[at + 2],
        }
    }

    /// Write the color under a coordinate.
    pub fn set(&mut self, pixel: Pixel, color: Rgb) {
        let at = (pixel.y * self.width + pixel.x) * 3;
        self.data[at] = color.r;
        self.data[at + 1] = color.g;
        self.data[at + 2] = color.b;
    }

    /// The raw row-major bytes, three per pixel.
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Write the raster to disk as a PNG.
    pub fn write_png<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let output = File::create(path)?;
        PNGEncoder::new(output).encode(
            &self.data,
            self.width as u32,
            self.height as u32,
            ColorType::RGB(8),
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rasters_fail_on_empty_dimensions() {
        assert!(GrayRaster::new(0, 10).is_err());
        assert!(GrayRaster::new(10, 0).is_err());
        assert!(RgbRaster::new(0, 0).is_err());
    }

    #[test]
    fn gray_get_set_round_trip() {
        let mut raster = GrayRaster::new(4, 3).unwrap();
        let pixel = Pixel { x: 3, y: 2 };
        assert_eq!(raster.get(pixel), 0);
        raster.set(pixel, 200);
        assert_eq!(raster.get(pixel), 200);
        assert_eq!(raster.bytes().len(), 12);
    }

    #[test]
    fn gray_layout_is_row_major() {
        let mut raster = GrayRaster::new(4, 3).unwrap();
        raster.set(Pixel { x: 1, y: 2 }, 9);
        assert_eq!(raster.bytes()[2 * 4 + 1], 9);
    }

    #[test]
    fn rgb_get_set_round_trip() {
        let mut raster = RgbRaster::new(3, 3).unwrap();
        let pixel = Pixel { x: 1, y: 1 };
        let color = Rgb { r: 1, g: 2, b: 3 };
        raster.set(pixel, color);
        assert_eq!(raster.get(pixel), color);
    }

    #[test]
    fn rgb_layout_interleaves_channels() {
        let mut raster = RgbRaster::new(2, 1).unwrap();
        raster.set(
            Pixel { x: 1, y: 0 },
            Rgb {
                r: 10,
                g: 20,
                b: 30,
            },
        );
        assert_eq!(raster.bytes(), &[0, 0, 0, 10, 20, 30]);
    }
}
