// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The one error type shared by every stage of a render, from
//! viewport validation through to writing the encoded image.

use std::io;

/// Everything that can go wrong between a caller handing us numbers
/// and an image landing on disk.  The escape-time kernel itself has
/// no failure path; these all come from the edges.
#[derive(Debug, Fail)]
pub enum RenderError {
    /// The viewport radius was zero, negative, or not a number.
    #[fail(display = "radius must be a positive finite number, got {}", _0)]
    BadRadius(f64),

    /// The viewport center had a NaN or infinite component.
    #[fail(display = "viewport center must be finite, got {},{}", _0, _1)]
    BadCenter(f64, f64),

    /// One of the image dimensions was zero.
    #[fail(display = "image dimensions must be non-zero, got {}x{}", _0, _1)]
    EmptyImage(usize, usize),

    /// A column worker panicked before the scope could join it.
    #[fail(display = "a render worker panicked")]
    WorkerPanicked,

    /// The output path's extension names no format we can write.
    #[fail(display = "unsupported output format: {}", _0)]
    UnsupportedFormat(String),

    /// The filesystem or output stream refused the bytes.
    #[fail(display = "could not write image: {}", _0)]
    Io(#[cause] io::Error),
}

impl From<io::Error> for RenderError {
    fn from(err: io::Error) -> Self {
        RenderError::Io(err)
    }
}
