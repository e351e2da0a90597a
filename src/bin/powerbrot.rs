extern crate clap;
extern crate env_logger;
#[macro_use]
extern crate log;
extern crate num_cpus;
extern crate powerbrot;

use clap::{App, Arg, ArgMatches};
use powerbrot::{Palette, RenderError, RenderRequest, Renderer};
use std::str::FromStr;
use std::time::Instant;

/// Given a string and a separator, returns the two halves either side
/// of the first separator.
fn split_pair(s: &str, separator: char) -> Option<(&str, &str)> {
    match s.find(separator) {
        None => None,
        Some(index) => Some((&s[..index], &s[index + 1..])),
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

fn validate_seed(s: &str) -> Result<(), String> {
    u64::from_str(s)
        .map(|_| ())
        .map_err(|_| "Could not parse palette seed".to_string())
}

const OUTPUT: &str = "output";
const CENTER: &str = "center";
const RADIUS: &str = "radius";
const THREADS: &str = "threads";
const SEED: &str = "seed";
const COEFFICIENTS: [(&str, &str); 4] = [
    ("a", "Real part of the multiplier"),
    ("b", "Imaginary part of the multiplier"),
    ("d", "Real part of the exponent"),
    ("e", "Imaginary part of the exponent"),
];

fn args<'a>() -> ArgMatches<'a> {
    let max_threads = num_cpus::get();

    let app = App::new("powerbrot")
        .version("0.1.0")
        .author("Elf M. Sternberg <elf.sternberg@gmail.com>")
        .about("Renders (a + bi) * z^(d + ei) + c escape-time fractals")
        .arg(
            Arg::with_name(OUTPUT)
                .required(true)
                .long(OUTPUT)
                .short("o")
                .takes_value(true)
                .help("Output file (.png or .pam)"),
        )
        .arg(
            Arg::with_name(CENTER)
                .required(false)
                .long(CENTER)
                .short("c")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("0.0,0.0")
                .help("Center of the view on the complex plane, as re,im"),
        )
        .arg(
            Arg::with_name(RADIUS)
                .required(false)
                .long(RADIUS)
                .short("r")
                .takes_value(true)
                .allow_hyphen_values(true)
                .default_value("2.0")
                .help("Half the width of the view on the complex plane"),
        )
        .arg(
            Arg::with_name(THREADS)
                .required(false)
                .long(THREADS)
                .short("t")
                .takes_value(true)
                .validator(move |s| {
                    validate_range(
                        &s,
                        1,
                        max_threads,
                        "Could not parse thread count",
                        &format!("Thread count must be between 1 and {}", max_threads),
                    )
                })
                .help("Render on this many threads instead of one per column"),
        )
        .arg(
            Arg::with_name(SEED)
                .required(false)
                .long(SEED)
                .short("s")
                .takes_value(true)
                .validator(|s| validate_seed(&s))
                .help("Seed for a repeatable palette"),
        );

    COEFFICIENTS
        .iter()
        .fold(app, |app, &(name, help)| {
            app.arg(
                Arg::with_name(name)
                    .required(false)
                    .short(name)
                    .takes_value(true)
                    .allow_hyphen_values(true)
                    .help(help),
            )
        })
        .get_matches()
}

/// Gathers the numeric arguments as name/value pairs so that they are
/// resolved exactly as any other caller's parameters would be.
fn request(matches: &ArgMatches) -> RenderRequest {
    let mut pairs: Vec<(&str, &str)> = vec![];
    if let Some(center) = matches.value_of(CENTER) {
        match split_pair(center, ',') {
            Some((re, im)) => {
                pairs.push(("mx", re));
                pairs.push(("my", im));
            }
            None => warn!("could not parse center {}, using the origin", center),
        }
    }
    if let Some(radius) = matches.value_of(RADIUS) {
        pairs.push(("radius", radius));
    }
    for &(name, _) in COEFFICIENTS.iter() {
        if let Some(value) = matches.value_of(name) {
            pairs.push((name, value));
        }
    }
    RenderRequest::from_pairs(pairs)
}

fn run(matches: &ArgMatches) -> Result<(), RenderError> {
    let request = request(matches);
    let palette = match matches.value_of(SEED).map(u64::from_str) {
        Some(Ok(seed)) => Palette::seeded(powerbrot::MAX_ESCAPE, seed),
        _ => Palette::new(powerbrot::MAX_ESCAPE),
    };
    let viewport = request.viewport()?;
    let renderer = Renderer::new(
        powerbrot::VIEW_WIDTH,
        powerbrot::VIEW_HEIGHT,
        viewport,
        request.fractal,
    )?;

    info!(
        "rendering {}x{} at {} radius {} with {:?}",
        powerbrot::VIEW_WIDTH,
        powerbrot::VIEW_HEIGHT,
        viewport.center(),
        viewport.radius(),
        renderer.fractal()
    );
    let started = Instant::now();
    let image = match matches.value_of(THREADS).map(usize::from_str) {
        Some(Ok(threads)) => renderer.render_pooled(&palette, threads)?,
        _ => renderer.render(&palette)?,
    };
    info!("render took {:?}", started.elapsed());

    let outfile = matches.value_of(OUTPUT).unwrap_or("powerbrot.png");
    powerbrot::write_image(outfile, &image)?;
    info!("wrote {}", outfile);
    Ok(())
}

fn main() {
    env_logger::init();
    let matches = args();
    if let Err(e) = run(&matches) {
        eprintln!("Render failure: {}", e);
        std::process::exit(1);
    }
}
