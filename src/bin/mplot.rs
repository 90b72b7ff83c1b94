extern crate clap;
#[macro_use]
extern crate failure;
extern crate mandelplot;
extern crate num;
extern crate num_cpus;

use clap::{App, Arg, ArgMatches};
use num::Complex;
use std::str::FromStr;

use mandelplot::colormaps;
use mandelplot::{MandelbrotSet, Palette, Renderer, Viewport};

/// Given a string and a separator, returns the two values separated
/// by the separator.
fn parse_pair<T>(s: &str, separator: char) -> Option<(T, T)>
where
    T: FromStr,
{
    match s.find(separator) {
        None => None,
        Some(index) => match (T::from_str(&s[..index]), T::from_str(&s[index + 1..])) {
            (Ok(l), Ok(r)) => Some((l, r)),
            _ => None,
        },
    }
}

/// A specific implementation of parse_pair using a comma and
/// expecting floating point numbers.
fn parse_complex(s: &str) -> Option<Complex<f64>> {
    match parse_pair(s, ',') {
        Some((re, im)) => Some(Complex { re, im }),
        None => None,
    }
}

fn validate_pair<T: FromStr>(s: &str, separator: char, err: &str) -> Result<(), String> {
    match parse_pair::<T>(s, separator) {
        Some(_) => Ok(()),
        None => Err(err.to_string()),
    }
}

fn validate_range<T: FromStr + Ord>(
    s: &str,
    low: T,
    high: T,
    isnotanumber_err: &str,
    isnotinrange_err: &str,
) -> Result<(), String> {
    match T::from_str(s) {
        Ok(i) => {
            if i >= low && i <= high {
                Ok(())
            } else {
                Err(isnotinrange_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

fn validate_positive(s: &str, isnotanumber_err: &str, isnotpositive_err: &str) -> Result<(), String> {
    match f64::from_str(s) {
        Ok(v) => {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(isnotpositive_err.to_string())
            }
        }
        Err(_) => Err(isnotanumber_err.to_string()),
    }
}

const OUTPUT: &str = "output";
const SIZE: &str = "size";
const CENTER: &str = "center";
const WIDTH: &str = "width";
const ITERATIONS: &str = "iterations";
const ESCAPE_RADIUS: &str = "escape-radius";
const SMOOTH: &str = "smooth";
const PALETTE: &str = "palette";
const COLORS: &str = "colors";
const GRAYSCALE: &str = "grayscale";
const THREADS: &str = "threads";

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    App::new("mplot")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Escape-time Mandelbrot renderer")
        .arg(
            Arg::with_name(OUTPUT)
                .required(true)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output file"),
        )
        .arg(
            Arg::with_name(SIZE)
                .required(false)
                .long(SIZE)
                .short("s")
                .takes_value(true)
                .default_value("1080x1080")
                .validator(|s| validate_pair::<usize>(&s, 'x', "Could not parse output image size"))
                .help("Size of output image"),
        )
        .arg(
            Arg::with_name(CENTER)
                .required(false)
                .long(CENTER)
                .short("c")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("-0.7435,0.1314")
                .validator(|s| validate_pair::<f64>(&s, ',', "Could not parse center point"))
                .help("Center of the viewport on the complex plane"),
        )
        .arg(
            Arg::with_name(WIDTH)
                .required(false)
                .long(WIDTH)
                .short("w")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("0.002")
                .validator(|s| {
                    validate_positive(
                        &s,
                        "Could not parse plane width",
                        "Plane width must be a positive number",
                    )
                })
                .help("Width of the viewport along the real axis"),
        )
        .arg(
            Arg::with_name(ITERATIONS)
                .required(false)
                .long(ITERATIONS)
                .short("i")
                .takes_value(true)
                .default_value("512")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        1_000_000,
                        "Could not parse iteration count",
                        "Iteration count must be between 1 and 1000000",
                    )
                })
                .help("Iteration budget per point"),
        )
        .arg(
            Arg::with_name(ESCAPE_RADIUS)
                .required(false)
                .long(ESCAPE_RADIUS)
                .takes_value(true)
                .default_value("2.0")
                .validator(|s| {
                    validate_positive(
                        &s,
                        "Could not parse escape radius",
                        "Escape radius must be a positive number",
                    )
                })
                .help("Nominal escape radius (the escape test itself uses the classic bound of 2)"),
        )
        .arg(
            Arg::with_name(SMOOTH)
                .required(false)
                .long(SMOOTH)
                .help("Smooth (fractional) escape counts for continuous gradients"),
        )
        .arg(
            Arg::with_name(PALETTE)
                .required(false)
                .long(PALETTE)
                .short("p")
                .takes_value(true)
                .default_value("twilight")
                .possible_values(&colormaps::NAMES)
                .help("Colormap for the render"),
        )
        .arg(
            Arg::with_name(COLORS)
                .required(false)
                .long(COLORS)
                .short("n")
                .takes_value(true)
                .default_value("256")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        65536,
                        "Could not parse color count",
                        "Color count must be between 1 and 65536",
                    )
                })
                .help("Number of colors to sample from the colormap"),
        )
        .arg(
            Arg::with_name(GRAYSCALE)
                .required(false)
                .long(GRAYSCALE)
                .short("g")
                .help("Render a grayscale PNM graymap instead of a paletted PNG"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .default_value("1")
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Number of worker threads"),
        )
        .get_matches()
}

fn run(matches: &ArgMatches) -> Result<(), failure::Error> {
    let (width, height) =
        parse_pair(matches.value_of(SIZE).unwrap(), 'x').expect("Error parsing image dimensions");
    let center =
        parse_complex(matches.value_of(CENTER).unwrap()).expect("Error parsing center point");
    let plane_width =
        f64::from_str(matches.value_of(WIDTH).unwrap()).expect("Error parsing plane width");
    let iterations = usize::from_str(matches.value_of(ITERATIONS).unwrap())
        .expect("Error parsing iteration count");
    let escape_radius = f64::from_str(matches.value_of(ESCAPE_RADIUS).unwrap())
        .expect("Error parsing escape radius");
    let threads =
        usize::from_str(matches.value_of(THREADS).unwrap()).expect("Error parsing thread count");
    let smooth = matches.is_present(SMOOTH);
    let output = matches.value_of(OUTPUT).unwrap();

    let model = MandelbrotSet::new(iterations, escape_radius)?;
    let viewport = Viewport::new(width, height, center, plane_width)?;
    let renderer = Renderer::new(model, viewport);

    if matches.is_present(GRAYSCALE) {
        let raster = if threads > 1 {
            renderer.shade_threaded(smooth, threads)?
        } else {
            renderer.shade(smooth)?
        };
        raster.write_pnm(output)?;
        return Ok(());
    }

    let name = matches.value_of(PALETTE).unwrap();
    let color_count =
        usize::from_str(matches.value_of(COLORS).unwrap()).expect("Error parsing color count");
    let colors = colormaps::colormap(name, color_count)
        .ok_or_else(|| format_err!("unknown colormap {:?}", name))?;
    let palette = Palette::from_normalized(&colors)?;
    let raster = if threads > 1 {
        renderer.paint_threaded(&palette, smooth, threads)?
    } else {
        renderer.paint(&palette, smooth)?
    };
    raster.write_png(output)?;
    Ok(())
}

fn main() {
    let matches = args();
    if let Err(e) = run(&matches) {
        eprintln!("mplot: {}", e);
        std::process::exit(1);
    }
}
