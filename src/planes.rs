// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Contains the Viewport, a center and a radius on the complex plane,
//! and the PlaneMapper, which lays an integral pixel grid with an
//! origin at 0,0 over that viewport.  The viewport is `2 * radius`
//! wide; its height follows from the pixel grid's aspect ratio, so a
//! pixel is always square on the complex plane.
use errors::RenderError;
use num::Complex;

/// Describes the width and height of an integral plane that is assumed to start at
/// 0,0 and all values are assumed to be non-negative integers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct IntegralPlane(pub usize, pub usize);

/// The left-lower and right-upper corners of the sampled region of the
/// complex plane, measured at the pixel edges rather than the pixel
/// centers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ComplexPlane(pub Complex<f64>, pub Complex<f64>);

/// Column, row of a pixel in the integral plane.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pixel(pub usize, pub usize);

/// The region of the complex plane a render looks at.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    center: Complex<f64>,
    radius: f64,
}

impl Viewport {
    /// A viewport centered on `center`, reaching `radius` to the left
    /// and right.  Only finite centers and finite, positive radii are
    /// accepted.
    pub fn new(center: Complex<f64>, radius: f64) -> Result<Viewport, RenderError> {
        if !center.re.is_finite() || !center.im.is_finite() {
            return Err(RenderError::BadCenter(center.re, center.im));
        }
        if !radius.is_finite() || radius <= 0.0 {
            return Err(RenderError::BadRadius(radius));
        }
        Ok(Viewport { center, radius })
    }

    /// The point the viewport is centered on.
    pub fn center(&self) -> Complex<f64> {
        self.center
    }

    /// Half the viewport's width.
    pub fn radius(&self) -> f64 {
        self.radius
    }
}

/// Maps pixels of an integral plane onto the sample points of a
/// viewport.  Sample points sit in the middle of their pixels.
#[derive(Debug)]
pub struct PlaneMapper {
    /// The right-upper hand corner of the integral cartesian plane.
    /// The left-lower is assumed to be at 0,0
    pub integral_plane: IntegralPlane,
    // Sample point of pixel 0,0.
    origin: Complex<f64>,
    // Width (and height) of one pixel on the complex plane.
    step: f64,
}

impl PlaneMapper {
    /// Constructor.  Takes the size of the pixel grid and the viewport
    /// to spread it over.
    pub fn new(width: usize, height: usize, viewport: &Viewport) -> Result<PlaneMapper, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::EmptyImage(width, height));
        }

        let view_width = viewport.radius * 2.0;
        let step = view_width / (width as f64);
        let view_height = ((height as f64) / (width as f64)) * view_width;

        let origin = Complex::new(
            (viewport.center.re - view_width / 2.0) + step / 2.0,
            (viewport.center.im - view_height / 2.0) + step / 2.0,
        );

        Ok(PlaneMapper {
            integral_plane: IntegralPlane(width, height),
            origin,
            step,
        })
    }

    /// The total number of points in the integral grid.  Used to
    /// calculate memory needs.
    pub fn len(&self) -> usize {
        self.integral_plane.0 * self.integral_plane.1
    }

    /// Describes that the integral plane is of a size.
    pub fn is_empty(&self) -> bool {
        self.integral_plane.0 == 0 || self.integral_plane.1 == 0
    }

    /// Distance between neighbouring sample points.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// The outer corners of the region covered by the grid.
    pub fn bounds(&self) -> ComplexPlane {
        let half = self.step / 2.0;
        ComplexPlane(
            Complex::new(self.origin.re - half, self.origin.im - half),
            Complex::new(
                self.origin.re - half + self.step * (self.integral_plane.0 as f64),
                self.origin.im - half + self.step * (self.integral_plane.1 as f64),
            ),
        )
    }

    /// The sample point at the center of `pixel`.
    #[inline]
    pub fn pixel_to_point(&self, pixel: &Pixel) -> Complex<f64> {
        Complex::new(
            self.origin.re + (pixel.0 as f64) * self.step,
            self.origin.im + (pixel.1 as f64) * self.step,
        )
    }

    /// The pixel whose area contains `point`, if any does.
    pub fn point_to_pixel(&self, point: &Complex<f64>) -> Option<Pixel> {
        let left = (point.re - self.origin.re) / self.step + 0.5;
        let top = (point.im - self.origin.im) / self.step + 0.5;
        if !(left >= 0.0 && top >= 0.0) {
            return None;
        }
        let pixel = Pixel(left.floor() as usize, top.floor() as usize);
        if pixel.0 >= self.integral_plane.0 || pixel.1 >= self.integral_plane.1 {
            return None;
        }
        Some(pixel)
    }
}
