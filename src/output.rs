// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Serializes a finished render.  PNG is the format handed to a
//! transport; PAM is there for tools that want the raw RGBA tuples.

use image::png::PNGEncoder;
use image::pnm::{PNMEncoder, PNMSubtype};
use image::{ColorType, RgbaImage};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use errors::RenderError;

/// Encodes `image` as a PNG onto `writer`.
pub fn encode_png<W: Write>(image: &RgbaImage, writer: W) -> Result<(), RenderError> {
    let raw: &[u8] = &**image;
    let encoder = PNGEncoder::new(writer);
    encoder.encode(raw, image.width(), image.height(), ColorType::RGBA(8))?;
    Ok(())
}

/// Encodes `image` as a PAM (an RGBA PNM) onto `writer`.
pub fn encode_pam<W: Write>(image: &RgbaImage, writer: W) -> Result<(), RenderError> {
    let raw: &[u8] = &**image;
    let mut encoder = PNMEncoder::new(writer).with_subtype(PNMSubtype::ArbitraryMap);
    encoder.encode(raw, image.width(), image.height(), ColorType::RGBA(8))?;
    Ok(())
}

/// Writes `image` to `outfile`, choosing the format from the file
/// extension: `.png` or `.pam`.
pub fn write_image<P: AsRef<Path>>(outfile: P, image: &RgbaImage) -> Result<(), RenderError> {
    let path = outfile.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "png" => encode_png(image, BufWriter::new(File::create(path)?)),
        "pam" => encode_pam(image, BufWriter::new(File::create(path)?)),
        _ => Err(RenderError::UnsupportedFormat(path.display().to_string())),
    }
}
