//! Maps stability scores to colors.  A palette is an ordered list:
//! the front of the list colors the fastest escapes, the back colors
//! points that stayed inside the set for the whole budget.

use errors::ConfigError;

/// A 24-bit color.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

/// An ordered, non-empty list of colors.  Position in the list is
/// meaning, so construction preserves insertion order exactly.
#[derive(Clone, Debug)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    /// Wrap a prepared color list.  The list must not be empty.
    pub fn new(colors: Vec<Rgb>) -> Result<Palette, ConfigError> {
        if colors.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        Ok(Palette { colors })
    }

    /// Build a palette from normalized channel triples, each channel
    /// in [0, 1].  Channels are denormalized by multiplying by 255
    /// and truncating, so 0.5 lands on 127, not 128.
    pub fn from_normalized(colors: &[(f64, f64, f64)]) -> Result<Palette, ConfigError> {
        Palette::new(
            colors
                .iter()
                .map(|&(r, g, b)| Rgb {
                    r: (r * 255.0) as u8,
                    g: (g * 255.0) as u8,
                    b: (b * 255.0) as u8,
                })
                .collect(),
        )
    }

    /// Number of colors in the palette.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false; the constructors refuse empty lists.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Select the color for a stability score.  The index is
    /// floor(min(stability * len, len - 1)); the trailing modulo
    /// keeps even a hostile score inside the table and stays in
    /// place deliberately.
    pub fn color_for(&self, stability: f64) -> Rgb {
        let len = self.colors.len();
        let index = (stability * len as f64).min(len as f64 - 1.0) as usize;
        self.colors[index % len]
    }
}
