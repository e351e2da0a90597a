// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Turns loosely-typed caller input (form fields, query strings,
//! command line values) into render parameters.  Nothing here ever
//! fails: a missing or unreadable value becomes its default, with a
//! warning logged for anything that was present but unreadable.

use num::Complex;
use std::str::FromStr;

use errors::RenderError;
use fractal::Fractal;
use planes::Viewport;

/// Default viewport radius.
pub const DEFAULT_RADIUS: f64 = 2.0;

/// Parses `s` as a float, falling back to `default` when it can't be
/// read or isn't finite.
pub fn safe_float(s: &str, default: f64) -> f64 {
    parse_finite(s).unwrap_or(default)
}

fn parse_finite(s: &str) -> Option<f64> {
    match f64::from_str(s.trim()) {
        Ok(f) if f.is_finite() => Some(f),
        _ => None,
    }
}

/// `safe_float`, but says so when it had to fall back.
fn resolve(name: &str, value: &str, default: f64) -> f64 {
    match parse_finite(value) {
        Some(f) => f,
        None => {
            warn!("could not read {}={:?}, using {}", name, value, default);
            default
        }
    }
}

/// The parameters of one render, as resolved from caller input.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderRequest {
    /// Where the viewport is centered.
    pub center: Complex<f64>,
    /// Half the viewport width.  Always positive.
    pub radius: f64,
    /// The recurrence coefficients.
    pub fractal: Fractal,
}

impl Default for RenderRequest {
    fn default() -> Self {
        RenderRequest {
            center: Complex::new(0.0, 0.0),
            radius: DEFAULT_RADIUS,
            fractal: Fractal::default(),
        }
    }
}

impl RenderRequest {
    /// Resolves a request from name/value pairs.  Recognised names are
    /// `mx`, `my`, `radius`, `a` (or `a-value`), `b`, `d` and `e`; any
    /// other name is ignored.  A radius that is not positive is reset
    /// to the default.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut request = RenderRequest::default();
        let defaults = RenderRequest::default();
        for (name, value) in pairs {
            match name {
                "mx" => request.center.re = resolve(name, value, defaults.center.re),
                "my" => request.center.im = resolve(name, value, defaults.center.im),
                "radius" => request.radius = resolve(name, value, defaults.radius),
                "a" | "a-value" => request.fractal.a = resolve(name, value, defaults.fractal.a),
                "b" => request.fractal.b = resolve(name, value, defaults.fractal.b),
                "d" => request.fractal.d = resolve(name, value, defaults.fractal.d),
                "e" => request.fractal.e = resolve(name, value, defaults.fractal.e),
                _ => debug!("ignoring unknown parameter {}={}", name, value),
            }
        }
        if request.radius <= 0.0 {
            warn!("radius {} is not positive, using {}", request.radius, DEFAULT_RADIUS);
            request.radius = DEFAULT_RADIUS;
        }
        request
    }

    /// Resolves a request from an `mx=0.5&my=-1&radius=...` string.
    /// Values are taken as they are; no percent-decoding is done.
    pub fn from_query(query: &str) -> Self {
        RenderRequest::from_pairs(
            query
                .trim_start_matches('?')
                .split('&')
                .filter(|pair| !pair.is_empty())
                .map(|pair| match pair.find('=') {
                    Some(index) => (&pair[..index], &pair[index + 1..]),
                    None => (pair, ""),
                }),
        )
    }

    /// The viewport this request describes.
    pub fn viewport(&self) -> Result<Viewport, RenderError> {
        Viewport::new(self.center, self.radius)
    }
}
