// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time model of the Mandelbrot set.  A point c is scored
//! by iterating z <- z*z + c from zero and counting the rounds until
//! |z| leaves the disk of radius 2; points that never leave within
//! the budget are treated as members of the set.  The count,
//! normalized against the budget, is the "stability" the rest of the
//! crate paints with.

use num::{clamp, Complex};
use std::f64::consts::LN_2;

use errors::ConfigError;

/// Escape-time parameters.  The struct is a pair of knobs; every
/// evaluation is a pure function of them and the input point.
#[derive(Copy, Clone, Debug)]
pub struct MandelbrotSet {
    /// The iteration budget per point.  Higher budgets sharpen the
    /// boundary and darken the interior at the cost of time.
    pub max_iterations: usize,
    /// Nominal escape radius, carried for parity with the classic
    /// parameterization.  The escape test itself uses the fixed bound
    /// 2; see `escape_count`.
    pub escape_radius: f64,
}

impl MandelbrotSet {
    /// Constructor.  The budget must be at least one iteration and
    /// the radius a positive number.
    pub fn new(max_iterations: usize, escape_radius: f64) -> Result<MandelbrotSet, ConfigError> {
        if max_iterations == 0 {
            return Err(ConfigError::NoIterations);
        }
        if !escape_radius.is_finite() || escape_radius <= 0.0 {
            return Err(ConfigError::BadEscapeRadius(escape_radius));
        }
        Ok(MandelbrotSet {
            max_iterations,
            escape_radius,
        })
    }

    /// True when c never escapes within the iteration budget.
    pub fn contains(&self, c: Complex<f64>) -> bool {
        self.stability(c, false, true) == 1.0
    }

    /// Escape count normalized against the budget.  Clamped to
    /// [0, 1] when `clamped` is set, which is what rendering wants;
    /// unclamped, the smooth correction can push the value slightly
    /// past either end.
    pub fn stability(&self, c: Complex<f64>, smooth: bool, clamped: bool) -> f64 {
        let value = self.escape_count(c, smooth) / (self.max_iterations as f64);
        if clamped {
            clamp(value, 0.0, 1.0)
        } else {
            value
        }
    }

    /// The number of rounds of z <- z*z + c before |z| exceeds 2,
    /// checked strictly as |z|^2 > 4, or `max_iterations` if the
    /// point never escapes.  The count is the 0-based index of the
    /// round that detected the escape.
    ///
    /// In smooth mode the count at escape gains the fractional
    /// correction `1 - ln(ln|z|)/ln 2`, trading the integer staircase
    /// for a continuous gradient.  A point that never escapes reports
    /// the plain budget in either mode.
    pub fn escape_count(&self, c: Complex<f64>, smooth: bool) -> f64 {
        let mut z = Complex::new(0.0, 0.0);
        for iteration in 0..self.max_iterations {
            z = z * z + c;
            if z.norm_sqr() > 4.0 {
                if smooth {
                    return (iteration as f64) + 1.0 - z.norm().ln().ln() / LN_2;
                }
                return iteration as f64;
            }
        }
        self.max_iterations as f64
    }
}
