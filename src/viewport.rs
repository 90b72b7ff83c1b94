// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the Viewport struct, which relates two planes: the
//! integral raster plane, with its origin at the top-left corner and
//! y growing downward, and a rectangular window on the complex plane,
//! described by its center and its span along the real axis.  The
//! window's vertical span is derived from the raster's aspect ratio
//! rather than stored.

use itertools::iproduct;
use num::Complex;

use errors::ConfigError;

/// The x, y address of a single raster cell.  A Pixel carries no
/// color of its own; it is a coordinate into whichever raster it is
/// used against, nothing more.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel {
    /// Column, counted from the left edge.
    pub x: usize,
    /// Row, counted from the top edge.
    pub y: usize,
}

/// A window on the complex plane tied to a raster of a fixed
/// resolution.  Immutable once constructed; one Viewport describes
/// one render pass.
#[derive(Copy, Clone, Debug)]
pub struct Viewport {
    /// Raster width in pixels.
    pub raster_width: usize,
    /// Raster height in pixels.
    pub raster_height: usize,
    /// The complex number at the middle of the window.
    pub center: Complex<f64>,
    /// The span of the window along the real axis.
    pub plane_width: f64,
}

impl Viewport {
    /// Constructor.  Rejects empty rasters and degenerate plane
    /// spans.
    pub fn new(
        raster_width: usize,
        raster_height: usize,
        center: Complex<f64>,
        plane_width: f64,
    ) -> Result<Viewport, ConfigError> {
        if raster_width == 0 || raster_height == 0 {
            return Err(ConfigError::EmptyRaster(raster_width, raster_height));
        }
        if !plane_width.is_finite() || plane_width <= 0.0 {
            return Err(ConfigError::BadPlaneWidth(plane_width));
        }
        Ok(Viewport {
            raster_width,
            raster_height,
            center,
            plane_width,
        })
    }

    /// Plane units per pixel.
    pub fn scale(&self) -> f64 {
        self.plane_width / (self.raster_width as f64)
    }

    /// The span of the window along the imaginary axis.
    pub fn plane_height(&self) -> f64 {
        self.scale() * (self.raster_height as f64)
    }

    /// The complex number under the raster's top-left corner.  Raster
    /// rows grow downward while the imaginary axis grows upward, so
    /// the top edge carries the largest imaginary part.
    pub fn offset(&self) -> Complex<f64> {
        self.center + Complex::new(-self.plane_width, self.plane_height()) * 0.5
    }

    /// Map a raster coordinate to the complex number under it.  Pure
    /// arithmetic; a coordinate outside the raster extrapolates to a
    /// well-defined point rather than failing.
    pub fn to_complex(&self, pixel: Pixel) -> Complex<f64> {
        Complex::new(pixel.x as f64, -(pixel.y as f64)) * self.scale() + self.offset()
    }

    /// Every raster coordinate in row-major order: y outer, x inner,
    /// both counted from zero.  This is the order a render pass fills
    /// the raster in.  The sequence is lazy and restartable; call it
    /// again for a fresh pass.
    pub fn pixels(&self) -> impl Iterator<Item = Pixel> {
        iproduct!(0..self.raster_height, 0..self.raster_width).map(|(y, x)| Pixel { x, y })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Viewport {
        Viewport::new(100, 100, Complex::new(0.0, 0.0), 2.0).unwrap()
    }

    #[test]
    fn viewport_fails_on_empty_raster() {
        let v = Viewport::new(0, 100, Complex::new(0.0, 0.0), 2.0);
        assert_eq!(v.unwrap_err(), ConfigError::EmptyRaster(0, 100));
        assert!(Viewport::new(100, 0, Complex::new(0.0, 0.0), 2.0).is_err());
    }

    #[test]
    fn viewport_fails_on_degenerate_span() {
        assert!(Viewport::new(100, 100, Complex::new(0.0, 0.0), 0.0).is_err());
        assert!(Viewport::new(100, 100, Complex::new(0.0, 0.0), -1.5).is_err());
        assert!(Viewport::new(100, 100, Complex::new(0.0, 0.0), ::std::f64::NAN).is_err());
    }

    #[test]
    fn derived_quantities_follow_the_aspect_ratio() {
        let v = square();
        assert_eq!(v.scale(), 0.02);
        assert_eq!(v.plane_height(), 2.0);
        assert_eq!(v.offset(), Complex::new(-1.0, 1.0));

        let wide = Viewport::new(200, 100, Complex::new(0.0, 0.0), 4.0).unwrap();
        assert_eq!(wide.scale(), 0.02);
        assert_eq!(wide.plane_height(), 2.0);
    }

    #[test]
    fn top_left_pixel_maps_to_the_offset() {
        let v = square();
        assert_eq!(v.to_complex(Pixel { x: 0, y: 0 }), Complex::new(-1.0, 1.0));
    }

    #[test]
    fn vertical_axis_is_flipped() {
        let v = square();
        let top = v.to_complex(Pixel { x: 0, y: 0 });
        let bottom = v.to_complex(Pixel { x: 0, y: 99 });
        assert!(bottom.im < top.im);
        assert_eq!(top.re, bottom.re);
    }

    #[test]
    fn center_pixel_maps_near_the_center() {
        let v = square();
        let c = v.to_complex(Pixel { x: 50, y: 50 });
        assert!(c.norm() < 1e-12);
    }

    #[test]
    fn out_of_range_pixels_extrapolate() {
        let v = square();
        assert_eq!(v.to_complex(Pixel { x: 200, y: 0 }), Complex::new(3.0, 1.0));
    }

    #[test]
    fn pixels_walk_the_raster_row_major() {
        let v = Viewport::new(3, 2, Complex::new(0.0, 0.0), 1.0).unwrap();
        let walked: Vec<Pixel> = v.pixels().collect();
        assert_eq!(
            walked,
            vec![
                Pixel { x: 0, y: 0 },
                Pixel { x: 1, y: 0 },
                Pixel { x: 2, y: 0 },
                Pixel { x: 0, y: 1 },
                Pixel { x: 1, y: 1 },
                Pixel { x: 2, y: 1 },
            ]
        );
    }

    #[test]
    fn pixels_is_restartable() {
        let v = square();
        assert_eq!(v.pixels().count(), 100 * 100);
        assert_eq!(v.pixels().count(), 100 * 100);
    }
}
