//! Built-in named colormaps.  The rest of the crate does not care
//! where a palette comes from; it consumes an ordered list of
//! normalized RGB triples, each channel in [0, 1].  This module is
//! the built-in supplier of such lists: a handful of gradients,
//! each described by a few control stops and sampled to whatever
//! resolution the caller asks for.

/// A gradient control point.  `position` runs 0 to 1 across the map.
#[derive(Copy, Clone, Debug)]
struct GradientStop {
    position: f64,
    color: (f64, f64, f64),
}

// A cyclic map in the manner of matplotlib's twilight: pale lavender
// through blue into a near-black core, back out through red to the
// same lavender, so the two ends of the stability range meet.
const TWILIGHT: &'static [GradientStop] = &[
    GradientStop {
        position: 0.0,
        color: (0.886, 0.850, 0.888),
    },
    GradientStop {
        position: 0.15,
        color: (0.655, 0.746, 0.840),
    },
    GradientStop {
        position: 0.35,
        color: (0.367, 0.440, 0.765),
    },
    GradientStop {
        position: 0.5,
        color: (0.185, 0.121, 0.282),
    },
    GradientStop {
        position: 0.65,
        color: (0.544, 0.189, 0.288),
    },
    GradientStop {
        position: 0.85,
        color: (0.787, 0.575, 0.538),
    },
    GradientStop {
        position: 1.0,
        color: (0.886, 0.850, 0.888),
    },
];

const FIRE: &'static [GradientStop] = &[
    GradientStop {
        position: 0.0,
        color: (0.0, 0.0, 0.0),
    },
    GradientStop {
        position: 0.33,
        color: (1.0, 0.0, 0.0),
    },
    GradientStop {
        position: 0.66,
        color: (1.0, 1.0, 0.0),
    },
    GradientStop {
        position: 1.0,
        color: (1.0, 1.0, 1.0),
    },
];

const OCEAN: &'static [GradientStop] = &[
    GradientStop {
        position: 0.0,
        color: (0.0, 0.0, 0.0),
    },
    GradientStop {
        position: 0.33,
        color: (0.0, 0.0, 1.0),
    },
    GradientStop {
        position: 0.66,
        color: (0.0, 1.0, 1.0),
    },
    GradientStop {
        position: 1.0,
        color: (1.0, 1.0, 1.0),
    },
];

const ICE: &'static [GradientStop] = &[
    GradientStop {
        position: 0.0,
        color: (1.0, 1.0, 1.0),
    },
    GradientStop {
        position: 0.4,
        color: (0.55, 0.75, 0.95),
    },
    GradientStop {
        position: 0.8,
        color: (0.10, 0.20, 0.55),
    },
    GradientStop {
        position: 1.0,
        color: (0.0, 0.0, 0.1),
    },
];

/// The colormap names `colormap` understands.
pub const NAMES: [&'static str; 4] = ["twilight", "fire", "ocean", "ice"];

/// Look up a colormap by name and sample it at `samples` evenly
/// spaced positions across its span.  Returns None for a name not in
/// `NAMES`.  Asking for zero samples yields an empty list, which the
/// palette constructor downstream will refuse.
pub fn colormap(name: &str, samples: usize) -> Option<Vec<(f64, f64, f64)>> {
    let stops = match name {
        "twilight" => TWILIGHT,
        "fire" => FIRE,
        "ocean" => OCEAN,
        "ice" => ICE,
        _ => return None,
    };
    Some(sample(stops, samples))
}

fn sample(stops: &[GradientStop], samples: usize) -> Vec<(f64, f64, f64)> {
    (0..samples)
        .map(|i| {
            let t = if samples < 2 {
                0.0
            } else {
                (i as f64) / ((samples - 1) as f64)
            };
            at(stops, t)
        })
        .collect()
}

/// Linear interpolation between the two stops surrounding `t`.
fn at(stops: &[GradientStop], t: f64) -> (f64, f64, f64) {
    let mut lower = stops[0];
    for &stop in stops {
        if stop.position <= t {
            lower = stop;
        } else {
            let span = stop.position - lower.position;
            let frac = if span > 0.0 {
                (t - lower.position) / span
            } else {
                0.0
            };
            return lerp(lower.color, stop.color, frac);
        }
    }
    lower.color
}

fn lerp(a: (f64, f64, f64), b: (f64, f64, f64), t: f64) -> (f64, f64, f64) {
    (
        a.0 + (b.0 - a.0) * t,
        a.1 + (b.1 - a.1) * t,
        a.2 + (b.2 - a.2) * t,
    )
}
