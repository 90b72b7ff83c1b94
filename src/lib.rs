#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Mandelbrot renderer
//!
//! The Mandelbrot set lives in the complex plane.  Take a point c,
//! start z at zero, and repeatedly square-and-add: z <- z*z + c.
//! Either z stays near the origin forever, in which case c belongs to
//! the set, or it shoots off to infinity, and the number of rounds it
//! survived inside the disk of radius 2 is its "escape time".
//! Normalizing escape time against the iteration budget gives a
//! "stability" score in [0, 1] -- 1.0 for set members, smaller the
//! faster a point escapes -- which maps cleanly onto a palette.
//!
//! The crate is a short pipeline.  A `Viewport` maps raster pixels to
//! complex numbers, a `MandelbrotSet` scores them, a `Palette` turns
//! scores into colors, and a `Renderer` drives the pixel loop and
//! fills a raster for the `mplot` binary to encode.

extern crate crossbeam;
#[macro_use]
extern crate failure;
extern crate image;
extern crate itertools;
extern crate num;
extern crate num_cpus;

pub mod colormaps;
pub mod errors;
pub mod mandelbrot;
pub mod palette;
pub mod raster;
pub mod render;
pub mod viewport;

pub use errors::ConfigError;
pub use mandelbrot::MandelbrotSet;
pub use palette::{Palette, Rgb};
pub use raster::{GrayRaster, RgbRaster};
pub use render::Renderer;
pub use viewport::{Pixel, Viewport};
