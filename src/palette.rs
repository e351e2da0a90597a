// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The mapping from escape count to color.
//!
//! A palette is built once, usually at startup, and then only ever
//! read.  Every render worker borrows the same palette, so two renders
//! made with one palette agree pixel for pixel; a fresh palette
//! (a fresh process, say) paints the same set in different colors.

use image::Rgba;
use rand::rngs::StdRng;
use rand::{thread_rng, Rng, SeedableRng};

/// The color of points that never escaped: fully transparent black.
pub const SENTINEL: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Random opaque colors for every escape count below the bound,
/// followed by the sentinel in the last slot.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    colors: Vec<Rgba<u8>>,
}

impl Palette {
    /// Builds a palette for `max_iterations` escape counts from the
    /// thread-local generator.
    pub fn new(max_iterations: usize) -> Self {
        Palette::with_rng(max_iterations, &mut thread_rng())
    }

    /// Builds a palette whose colors are fixed by `seed`, for runs that
    /// need to be repeatable across processes.
    pub fn seeded(max_iterations: usize, seed: u64) -> Self {
        Palette::with_rng(max_iterations, &mut StdRng::seed_from_u64(seed))
    }

    /// Builds a palette drawing its colors from `rng`.  A bound of zero
    /// is treated as one, leaving only the sentinel.
    pub fn with_rng<R: Rng>(max_iterations: usize, rng: &mut R) -> Self {
        let randoms = max_iterations.saturating_sub(1);
        let mut colors: Vec<Rgba<u8>> = (0..randoms)
            .map(|_| Rgba([rng.gen::<u8>(), rng.gen::<u8>(), rng.gen::<u8>(), 255]))
            .collect();
        colors.push(SENTINEL);
        Palette { colors }
    }

    /// The color for an escape count.  The last count, and anything
    /// past it, gets the sentinel.
    #[inline]
    pub fn color(&self, count: usize) -> Rgba<u8> {
        let last = self.colors.len() - 1;
        self.colors[count.min(last)]
    }

    /// The "never escaped" color.
    pub fn sentinel(&self) -> Rgba<u8> {
        SENTINEL
    }

    /// Number of slots, sentinel included.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// A palette always holds at least the sentinel.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// True if `color` is one this palette can hand out.
    pub fn contains(&self, color: &Rgba<u8>) -> bool {
        self.colors.contains(color)
    }

    /// All slots in escape-count order.
    pub fn colors(&self) -> &[Rgba<u8>] {
        &self.colors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Pixel;

    #[test]
    fn palette_has_one_slot_per_count() {
        let palette = Palette::new(64);
        assert_eq!(palette.len(), 64);
        assert_eq!(palette.colors()[63], SENTINEL);
    }

    #[test]
    fn generated_colors_are_opaque() {
        let palette = Palette::new(64);
        for color in &palette.colors()[..63] {
            assert_eq!(color.channels()[3], 255);
        }
    }

    #[test]
    fn last_count_and_beyond_map_to_sentinel() {
        let palette = Palette::seeded(16, 7);
        assert_eq!(palette.color(15), palette.sentinel());
        assert_eq!(palette.color(1000), palette.sentinel());
        assert_eq!(palette.color(3), palette.colors()[3]);
    }

    #[test]
    fn zero_bound_leaves_only_the_sentinel() {
        let palette = Palette::new(0);
        assert_eq!(palette.len(), 1);
        assert!(!palette.is_empty());
        assert_eq!(palette.color(0), SENTINEL);
    }

    #[test]
    fn seeded_palettes_repeat() {
        assert_eq!(Palette::seeded(64, 1234), Palette::seeded(64, 1234));
        assert_ne!(Palette::seeded(64, 1234), Palette::seeded(64, 4321));
    }

    #[test]
    fn contains_knows_its_own_colors() {
        let palette = Palette::seeded(8, 99);
        for count in 0..8 {
            assert!(palette.contains(&palette.color(count)));
        }
    }
}
