#![deny(missing_docs)]
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Powerbrot renderer
//!
//! The Mandelbrot set takes a point `c` on the complex plane and
//! repeatedly squares it, adding `c` back each time, counting how many
//! rounds pass before the result runs off towards infinity.  That count
//! is what gets painted.
//!
//! Powerbrot generalizes the squaring.  Each round computes
//! `(a + bi) * z^(d + ei) + c`, so the multiplier and the power are
//! both arbitrary complex numbers.  The counting is the same: once
//! `|z|` passes 2 the point has escaped, and the round it escaped on
//! picks a color out of a randomly generated palette.  Points that are
//! still inside after `MAX_ESCAPE - 1` rounds get a transparent
//! sentinel color.
//!
//! ```no_run
//! # extern crate num;
//! # extern crate powerbrot;
//! use num::Complex;
//! use powerbrot::{Fractal, Palette};
//!
//! # fn main() -> Result<(), powerbrot::RenderError> {
//! let palette = Palette::new(powerbrot::MAX_ESCAPE);
//! let image = powerbrot::render(
//!     powerbrot::VIEW_WIDTH,
//!     powerbrot::VIEW_HEIGHT,
//!     Complex::new(-0.5, 0.0),
//!     1.5,
//!     Fractal::classical(),
//!     &palette,
//! )?;
//! powerbrot::write_image("mandel.png", &image)?;
//! # Ok(())
//! # }
//! ```

extern crate crossbeam;
#[macro_use]
extern crate failure;
extern crate image;
extern crate itertools;
#[macro_use]
extern crate log;
extern crate num;
extern crate rand;

pub mod errors;
pub mod fractal;
pub mod output;
pub mod palette;
pub mod planes;
pub mod render;
pub mod request;

pub use errors::RenderError;
pub use fractal::Fractal;
pub use output::{encode_png, write_image};
pub use palette::Palette;
pub use planes::Viewport;
pub use render::Renderer;
pub use request::RenderRequest;

use image::RgbaImage;
use num::Complex;

/// Width of the image the command line renders.
pub const VIEW_WIDTH: usize = 640;

/// Height of the image the command line renders.
pub const VIEW_HEIGHT: usize = 480;

/// The iteration bound.  Escape counts run from 0 to `MAX_ESCAPE - 1`,
/// and a palette for this bound has `MAX_ESCAPE` slots.
pub const MAX_ESCAPE: usize = 64;

/// Renders a `width` by `height` image of the region `radius` either
/// side of `center`, coloring each pixel from `palette`.  Blocks until
/// every column is done.
pub fn render(
    width: usize,
    height: usize,
    center: Complex<f64>,
    radius: f64,
    fractal: Fractal,
    palette: &Palette,
) -> Result<RgbaImage, RenderError> {
    let viewport = Viewport::new(center, radius)?;
    Renderer::new(width, height, viewport, fractal)?.render(palette)
}
