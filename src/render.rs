// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The escape-time renderer.
//!
//! Every pixel is independent of every other, so the image is split
//! by column and each column is handed to its own scoped thread.  The
//! columns are laid out one after another in a scratch buffer, which
//! lets `chunks_mut` give each thread a slice nobody else can touch;
//! once the scope has joined every thread the scratch buffer is turned
//! into an ordinary row-major image.

use crossbeam;
use image::{Rgba, RgbaImage};
use itertools::iproduct;
use std::iter::Enumerate;
use std::slice::ChunksMut;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use errors::RenderError;
use fractal::Fractal;
use palette::{Palette, SENTINEL};
use planes::{Pixel, PlaneMapper, Viewport};
use MAX_ESCAPE;

type ColumnQueue<'a> = Arc<Mutex<Enumerate<ChunksMut<'a, Rgba<u8>>>>>;

/// Holds everything a render needs except the palette: the pixel grid,
/// the viewport it covers, and the recurrence.  Once built it is only
/// read, so one Renderer may be shared by as many threads as like.
#[derive(Debug)]
pub struct Renderer {
    plane: PlaneMapper,
    fractal: Fractal,
    limit: usize,
}

impl Renderer {
    /// Requires the width and height of the image, the viewport to
    /// spread it over, and the recurrence to iterate.
    pub fn new(
        width: usize,
        height: usize,
        viewport: Viewport,
        fractal: Fractal,
    ) -> Result<Self, RenderError> {
        let plane = PlaneMapper::new(width, height, &viewport)?;
        Ok(Renderer {
            plane,
            fractal,
            limit: MAX_ESCAPE,
        })
    }

    /// The pixel grid and its mapping onto the complex plane.
    pub fn plane(&self) -> &PlaneMapper {
        &self.plane
    }

    /// The recurrence being rendered.
    pub fn fractal(&self) -> Fractal {
        self.fractal
    }

    fn width(&self) -> usize {
        self.plane.integral_plane.0
    }

    fn height(&self) -> usize {
        self.plane.integral_plane.1
    }

    /// Escape count for one pixel, looked up in the palette.
    #[inline]
    fn shade(&self, pixel: &Pixel, palette: &Palette) -> Rgba<u8> {
        let point = self.plane.pixel_to_point(pixel);
        palette.color(self.fractal.escape(point, self.limit))
    }

    /// Fills one column's worth of the scratch buffer, top to bottom.
    fn fill_column(&self, column: usize, cells: &mut [Rgba<u8>], palette: &Palette) {
        for (row, cell) in cells.iter_mut().enumerate() {
            *cell = self.shade(&Pixel(column, row), palette);
        }
    }

    /// Turns the column-major scratch buffer into a row-major image.
    fn assemble(&self, columns: &[Rgba<u8>]) -> RgbaImage {
        let height = self.height();
        RgbaImage::from_fn(self.width() as u32, height as u32, |x, y| {
            columns[(x as usize) * height + (y as usize)]
        })
    }

    /// Renders the image with one thread per column, returning only
    /// once every column is done.
    pub fn render(&self, palette: &Palette) -> Result<RgbaImage, RenderError> {
        let started = Instant::now();
        debug!(
            "rendering {}x{} over {:?} with {:?}",
            self.width(),
            self.height(),
            self.plane.bounds(),
            self.fractal
        );

        let mut columns = vec![SENTINEL; self.plane.len()];
        crossbeam::scope(|spawner| {
            for (column, cells) in columns.chunks_mut(self.height()).enumerate() {
                spawner.spawn(move |_| self.fill_column(column, cells, palette));
            }
        })
        .map_err(|_| RenderError::WorkerPanicked)?;

        debug!("rendered {} columns in {:?}", self.width(), started.elapsed());
        Ok(self.assemble(&columns))
    }

    /// Renders the image with a fixed number of threads, each pulling
    /// the next unclaimed column off a shared queue until none are
    /// left.  Produces exactly what `render` does.
    pub fn render_pooled(&self, palette: &Palette, threads: usize) -> Result<RgbaImage, RenderError> {
        let threads = threads.max(1);
        let started = Instant::now();
        debug!(
            "rendering {}x{} on {} threads",
            self.width(),
            self.height(),
            threads
        );

        let mut columns = vec![SENTINEL; self.plane.len()];
        {
            let queue: ColumnQueue = Arc::new(Mutex::new(columns.chunks_mut(self.height()).enumerate()));
            crossbeam::scope(|spawner| {
                for _ in 0..threads {
                    let queue = queue.clone();
                    spawner.spawn(move |_| loop {
                        let next = { queue.lock().ok().and_then(|mut q| q.next()) };
                        match next {
                            Some((column, cells)) => self.fill_column(column, cells, palette),
                            None => {
                                break;
                            }
                        }
                    });
                }
            })
            .map_err(|_| RenderError::WorkerPanicked)?;
        }

        debug!("rendered on {} threads in {:?}", threads, started.elapsed());
        Ok(self.assemble(&columns))
    }

    /// The single-threaded reference rendering.
    pub fn render_single(&self, palette: &Palette) -> RgbaImage {
        let mut image = RgbaImage::new(self.width() as u32, self.height() as u32);
        for (column, row) in iproduct!(0..self.width(), 0..self.height()) {
            image.put_pixel(
                column as u32,
                row as u32,
                self.shade(&Pixel(column, row), palette),
            );
        }
        image
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num::Complex;

    fn renderer(width: usize, height: usize, fractal: Fractal) -> Renderer {
        let viewport = Viewport::new(Complex::new(-0.5, 0.0), 1.5).unwrap();
        Renderer::new(width, height, viewport, fractal).unwrap()
    }

    #[test]
    fn render_has_requested_dimensions() {
        let palette = Palette::seeded(MAX_ESCAPE, 1);
        let image = renderer(17, 9, Fractal::classical()).render(&palette).unwrap();
        assert_eq!(image.dimensions(), (17, 9));
    }

    #[test]
    fn threaded_matches_single() {
        let palette = Palette::seeded(MAX_ESCAPE, 2);
        let r = renderer(40, 30, Fractal::classical());
        assert_eq!(
            r.render(&palette).unwrap().into_raw(),
            r.render_single(&palette).into_raw()
        );
    }

    #[test]
    fn pooled_matches_single() {
        let palette = Palette::seeded(MAX_ESCAPE, 3);
        let r = renderer(33, 21, Fractal::new(0.8, -0.4, 2.5, 0.3));
        let single = r.render_single(&palette).into_raw();
        for &threads in &[0, 1, 3, 8, 64] {
            assert_eq!(r.render_pooled(&palette, threads).unwrap().into_raw(), single);
        }
    }

    #[test]
    fn classical_set_has_both_inside_and_outside() {
        let palette = Palette::seeded(MAX_ESCAPE, 4);
        let image = renderer(32, 24, Fractal::classical()).render(&palette).unwrap();
        assert!(image.pixels().any(|p| *p == SENTINEL));
        assert!(image.pixels().any(|p| *p != SENTINEL));
    }

    #[test]
    fn single_pixel_image_samples_the_center() {
        let palette = Palette::seeded(MAX_ESCAPE, 5);
        let viewport = Viewport::new(Complex::new(0.0, 0.0), 2.0).unwrap();
        let r = Renderer::new(1, 1, viewport, Fractal::classical()).unwrap();
        let image = r.render(&palette).unwrap();
        assert_eq!(*image.get_pixel(0, 0), SENTINEL);
    }

    #[test]
    fn pole_at_zero_does_not_break_the_render() {
        let palette = Palette::seeded(MAX_ESCAPE, 6);
        let r = renderer(16, 16, Fractal::new(1.0, 0.0, -1.5, 0.5));
        let image = r.render(&palette).unwrap();
        assert!(image.pixels().all(|p| palette.contains(p)));
    }
}
