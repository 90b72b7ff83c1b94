// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Drives the pixel loop.  A Renderer owns nothing but the two value
//! structs that describe a pass; each render walks the viewport's
//! pixel sequence, scores every point, and writes the mapped color
//! into a fresh raster.
//!
//! Every pixel is independent of every other pixel, so the threaded
//! variants split the raster into bands of whole rows and hand each
//! band to a scoped worker.  Workers write disjoint slices and the
//! assembled raster is byte-identical to the sequential pass.

extern crate crossbeam;

use errors::ConfigError;
use mandelbrot::MandelbrotSet;
use palette::{Palette, Rgb};
use raster::{GrayRaster, RgbRaster};
use viewport::{Pixel, Viewport};

/// One render pass worth of configuration: the escape-time model and
/// the window it is evaluated over.  Both halves arrive
/// pre-validated by their own constructors.
#[derive(Copy, Clone, Debug)]
pub struct Renderer {
    /// Escape-time parameters.
    pub model: MandelbrotSet,
    /// The pixel-to-plane mapping.
    pub viewport: Viewport,
}

impl Renderer {
    /// Constructor.
    pub fn new(model: MandelbrotSet, viewport: Viewport) -> Renderer {
        Renderer { model, viewport }
    }

    fn color_at(&self, palette: &Palette, pixel: Pixel, smooth: bool) -> Rgb {
        let c = self.viewport.to_complex(pixel);
        palette.color_for(self.model.stability(c, smooth, true))
    }

    fn intensity_at(&self, pixel: Pixel, smooth: bool) -> u8 {
        let c = self.viewport.to_complex(pixel);
        let instability = 1.0 - self.model.stability(c, smooth, true);
        (instability * 255.0).round() as u8
    }

    /// Paint every pixel through the palette: stability, clamped to
    /// [0, 1], indexes the color list.
    pub fn paint(&self, palette: &Palette, smooth: bool) -> Result<RgbRaster, ConfigError> {
        let mut raster = RgbRaster::new(self.viewport.raster_width, self.viewport.raster_height)?;
        for pixel in self.viewport.pixels() {
            let color = self.color_at(palette, pixel, smooth);
            raster.set(pixel, color);
        }
        Ok(raster)
    }

    /// Grayscale single-pass mode, no palette: the intensity is
    /// round((1 - stability) * 255), so set members render black and
    /// the fastest escapes render white.
    pub fn shade(&self, smooth: bool) -> Result<GrayRaster, ConfigError> {
        let mut raster = GrayRaster::new(self.viewport.raster_width, self.viewport.raster_height)?;
        for pixel in self.viewport.pixels() {
            let value = self.intensity_at(pixel, smooth);
            raster.set(pixel, value);
        }
        Ok(raster)
    }

    /// The threaded version of `paint`.  Takes a worker count; a
    /// count of zero or one falls back to a single band.
    pub fn paint_threaded(
        &self,
        palette: &Palette,
        smooth: bool,
        threads: usize,
    ) -> Result<RgbRaster, ConfigError> {
        let width = self.viewport.raster_width;
        let height = self.viewport.raster_height;
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyRaster(width, height));
        }

        let band_rows = rows_per_band(height, threads);
        let mut data = vec![0 as u8; width * height * 3];
        {
            let renderer = *self;
            crossbeam::scope(|spawner| {
                for (band, rows) in data.chunks_mut(band_rows * width * 3).enumerate() {
                    spawner.spawn(move |_| {
                        let top = band * band_rows;
                        for (i, cell) in rows.chunks_mut(3).enumerate() {
                            let pixel = Pixel {
                                x: i % width,
                                y: top + i / width,
                            };
                            let color = renderer.color_at(palette, pixel, smooth);
                            cell[0] = color.r;
                            cell[1] = color.g;
                            cell[2] = color.b;
                        }
                    });
                }
            })
            .unwrap();
        }
        Ok(RgbRaster::from_raw(width, height, data))
    }

    /// The threaded version of `shade`.
    pub fn shade_threaded(&self, smooth: bool, threads: usize) -> Result<GrayRaster, ConfigError> {
        let width = self.viewport.raster_width;
        let height = self.viewport.raster_height;
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyRaster(width, height));
        }

        let band_rows = rows_per_band(height, threads);
        let mut data = vec![0 as u8; width * height];
        {
            let renderer = *self;
            crossbeam::scope(|spawner| {
                for (band, rows) in data.chunks_mut(band_rows * width).enumerate() {
                    spawner.spawn(move |_| {
                        let top = band * band_rows;
                        for (i, value) in rows.iter_mut().enumerate() {
                            let pixel = Pixel {
                                x: i % width,
                                y: top + i / width,
                            };
                            *value = renderer.intensity_at(pixel, smooth);
                        }
                    });
                }
            })
            .unwrap();
        }
        Ok(GrayRaster::from_raw(width, height, data))
    }
}

/// Whole rows per worker band, rounded up so the bands cover the
/// raster.
fn rows_per_band(height: usize, threads: usize) -> usize {
    let threads = if threads == 0 { 1 } else { threads };
    (height + threads - 1) / threads
}

#[cfg(test)]
mod tests {
    use super::*;
    use num::Complex;

    fn five_grays() -> Palette {
        let colors = (0..5)
            .map(|i| Rgb {
                r: i * 60,
                g: i * 60,
                b: i * 60,
            })
            .collect();
        Palette::new(colors).unwrap()
    }

    /// 3x3 raster centered on the origin spanning 4 plane units,
    /// five iterations.  Escape counts per pixel, worked by hand:
    ///
    ///   corners and edges on the top/bottom/left rows start outside
    ///   the escape disk, so they escape on round 0;
    ///   c = -2/3 +- 2/3i survives all five rounds;
    ///   c = 2/3 +- 2/3i escapes on round 2.
    fn three_by_three() -> Renderer {
        let model = MandelbrotSet::new(5, 2.0).unwrap();
        let viewport = Viewport::new(3, 3, Complex::new(0.0, 0.0), 4.0).unwrap();
        Renderer::new(model, viewport)
    }

    #[test]
    fn end_to_end_paint_matches_hand_computation() {
        let renderer = three_by_three();
        let raster = renderer.paint(&five_grays(), false).unwrap();

        let level = |x, y| renderer.model.stability(
            renderer.viewport.to_complex(Pixel { x, y }),
            false,
            true,
        );
        // Stability grid first, to pin the arithmetic down.
        assert_eq!(level(0, 0), 0.0);
        assert_eq!(level(1, 0), 0.0);
        assert_eq!(level(2, 0), 0.0);
        assert_eq!(level(0, 1), 0.0);
        assert_eq!(level(1, 1), 1.0);
        assert_eq!(level(2, 1), 0.4);
        assert_eq!(level(0, 2), 0.0);
        assert_eq!(level(1, 2), 1.0);
        assert_eq!(level(2, 2), 0.4);

        // And the palette mapping on top of it.
        let gray = |level: u8| Rgb {
            r: level,
            g: level,
            b: level,
        };
        assert_eq!(raster.get(Pixel { x: 0, y: 0 }), gray(0));
        assert_eq!(raster.get(Pixel { x: 1, y: 1 }), gray(240));
        assert_eq!(raster.get(Pixel { x: 2, y: 1 }), gray(120));
        assert_eq!(raster.get(Pixel { x: 2, y: 2 }), gray(120));
    }

    #[test]
    fn end_to_end_shade_matches_hand_computation() {
        let renderer = three_by_three();
        let raster = renderer.shade(false).unwrap();
        assert_eq!(
            raster.bytes(),
            &[255, 255, 255, 255, 0, 153, 255, 0, 153]
        );
    }

    #[test]
    fn grayscale_center_pixel_of_the_classic_card_is_black() {
        // 1080x1080 at 0.004 plane units per pixel, centered on the
        // origin: the middle pixel lands on c = 0, which never
        // escapes, so its instability is exactly zero.
        let model = MandelbrotSet::new(20, 2.0).unwrap();
        let viewport = Viewport::new(1080, 1080, Complex::new(0.0, 0.0), 0.004 * 1080.0).unwrap();
        let renderer = Renderer::new(model, viewport);
        let raster = renderer.shade(true).unwrap();
        assert_eq!(raster.get(Pixel { x: 540, y: 540 }), 0);
    }

    #[test]
    fn threaded_paint_is_byte_identical_to_sequential() {
        let model = MandelbrotSet::new(64, 2.0).unwrap();
        let viewport = Viewport::new(64, 48, Complex::new(-0.5, 0.0), 3.0).unwrap();
        let renderer = Renderer::new(model, viewport);
        let palette = five_grays();

        let sequential = renderer.paint(&palette, true).unwrap();
        for &threads in &[1, 2, 3, 7] {
            let threaded = renderer.paint_threaded(&palette, true, threads).unwrap();
            assert_eq!(threaded.bytes(), sequential.bytes());
        }
    }

    #[test]
    fn threaded_shade_is_byte_identical_to_sequential() {
        let model = MandelbrotSet::new(64, 2.0).unwrap();
        let viewport = Viewport::new(33, 17, Complex::new(-0.5, 0.0), 3.0).unwrap();
        let renderer = Renderer::new(model, viewport);

        let sequential = renderer.shade(false).unwrap();
        for &threads in &[2, 4, 64] {
            let threaded = renderer.shade_threaded(false, threads).unwrap();
            assert_eq!(threaded.bytes(), sequential.bytes());
        }
    }

    #[test]
    fn zero_threads_degrades_to_one_band() {
        let model = MandelbrotSet::new(16, 2.0).unwrap();
        let viewport = Viewport::new(8, 8, Complex::new(0.0, 0.0), 4.0).unwrap();
        let renderer = Renderer::new(model, viewport);
        assert_eq!(
            renderer.shade_threaded(false, 0).unwrap().bytes(),
            renderer.shade(false).unwrap().bytes()
        );
    }
}
