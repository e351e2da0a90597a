// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The recurrence and its escape-time kernel.
//!
//! The classic Mandelbrot iterates `z <- z^2 + c`.  Here both the
//! multiplier and the power are complex numbers chosen by the
//! caller, so a single point `c` is iterated as
//!
//! ```text
//! z <- (a + bi) * z^(d + ei) + c
//! ```
//!
//! starting from `z = c`.  With `a = 1, b = 0, d = 2, e = 0` this is
//! exactly the classic set.

use num::Complex;

/// Anything with a magnitude past this is considered to have escaped.
pub const ESCAPE_RADIUS: f64 = 2.0;

/// The four coefficients of the recurrence.  Once built, a Fractal is
/// never changed; it is copied into whichever render uses it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Fractal {
    /// Real part of the multiplier.
    pub a: f64,
    /// Imaginary part of the multiplier.
    pub b: f64,
    /// Real part of the exponent.
    pub d: f64,
    /// Imaginary part of the exponent.
    pub e: f64,
}

impl Default for Fractal {
    fn default() -> Self {
        Fractal {
            a: 1.0,
            b: 2.0,
            d: 0.0,
            e: 0.0,
        }
    }
}

impl Fractal {
    /// Constructor.
    pub fn new(a: f64, b: f64, d: f64, e: f64) -> Self {
        Fractal { a, b, d, e }
    }

    /// The plain `z^2 + c` Mandelbrot.
    pub fn classical() -> Self {
        Fractal::new(1.0, 0.0, 2.0, 0.0)
    }

    /// The complex multiplier `a + bi`.
    pub fn multiplier(&self) -> Complex<f64> {
        Complex::new(self.a, self.b)
    }

    /// The complex exponent `d + ei`.
    pub fn exponent(&self) -> Complex<f64> {
        Complex::new(self.d, self.e)
    }

    /// One application of the recurrence.
    #[inline]
    pub fn step(&self, z: Complex<f64>, c: Complex<f64>) -> Complex<f64> {
        self.multiplier() * cpow(z, self.exponent()) + c
    }

    /// Counts how many iterations `c` survives before its orbit leaves
    /// the escape radius.  The magnitude test comes before each update,
    /// so a point already outside the radius returns 0.  Points that
    /// never escape return `max_iterations - 1`, which is also where
    /// an orbit that has gone to NaN ends up, since NaN never compares
    /// greater than anything.
    pub fn escape(&self, c: Complex<f64>, max_iterations: usize) -> usize {
        let limit = max_iterations.saturating_sub(1);
        let mut z = c;
        for i in 0..limit {
            if z.norm() > ESCAPE_RADIUS {
                return i;
            }
            z = self.step(z, c);
        }
        limit
    }
}

/// Principal-branch complex power, `exp(w * ln(z))`.  The logarithm
/// has a pole at zero, so a zero base is decided by the real part of
/// the exponent alone: `0^w` is 1 when `Re(w) == 0`, 0 when
/// `Re(w) > 0`, and infinite when `Re(w) < 0` (real infinity for a
/// real exponent, infinite in both parts otherwise).  An infinite `z`
/// then fails the escape test on the next round, as a pole should.
#[inline]
pub fn cpow(z: Complex<f64>, w: Complex<f64>) -> Complex<f64> {
    if z.re == 0.0 && z.im == 0.0 {
        if w.re.is_nan() || w.im.is_nan() {
            return Complex::new(f64::NAN, f64::NAN);
        }
        if w.re == 0.0 {
            return Complex::new(1.0, 0.0);
        }
        if w.re > 0.0 {
            return Complex::new(0.0, 0.0);
        }
        if w.im == 0.0 {
            return Complex::new(f64::INFINITY, 0.0);
        }
        return Complex::new(f64::INFINITY, f64::INFINITY);
    }
    z.powc(w)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MAX: usize = 64;

    #[test]
    fn points_outside_the_radius_escape_immediately() {
        let fractals = [
            Fractal::classical(),
            Fractal::default(),
            Fractal::new(-0.7, 0.3, 3.5, -1.25),
        ];
        let points = [
            Complex::new(3.0, 0.0),
            Complex::new(0.0, -2.5),
            Complex::new(1.5, 1.5),
            Complex::new(-100.0, 42.0),
        ];
        for fractal in &fractals {
            for point in &points {
                assert_eq!(fractal.escape(*point, MAX), 0);
            }
        }
    }

    #[test]
    fn classical_origin_never_escapes() {
        assert_eq!(Fractal::classical().escape(Complex::new(0.0, 0.0), MAX), MAX - 1);
    }

    #[test]
    fn classical_minus_one_is_bounded() {
        assert_eq!(Fractal::classical().escape(Complex::new(-1.0, 0.0), MAX), MAX - 1);
    }

    #[test]
    fn classical_three_escapes_at_zero() {
        assert_eq!(Fractal::classical().escape(Complex::new(3.0, 0.0), MAX), 0);
    }

    #[test]
    fn classical_one_escapes_after_two_steps() {
        // 1 -> 2 -> 5; |2| is not past the radius, |5| is.
        assert_eq!(Fractal::classical().escape(Complex::new(1.0, 0.0), MAX), 2);
    }

    #[test]
    fn escape_never_exceeds_the_bound() {
        let fractal = Fractal::new(0.5, -1.0, -1.5, 0.75);
        for i in -20..20 {
            for j in -20..20 {
                let c = Complex::new(i as f64 / 10.0, j as f64 / 10.0);
                assert!(fractal.escape(c, MAX) <= MAX - 1);
            }
        }
    }

    #[test]
    fn zero_iteration_budget_returns_zero() {
        assert_eq!(Fractal::classical().escape(Complex::new(0.0, 0.0), 0), 0);
    }

    #[test]
    fn zero_exponent_makes_the_step_constant() {
        let fractal = Fractal::default();
        let c = Complex::new(0.1, -0.2);
        let z = Complex::new(0.3, 0.4);
        assert!((fractal.step(z, c) - Complex::new(1.1, 1.8)).norm() < 1e-12);
    }

    #[test]
    fn cpow_handles_zero_base() {
        let zero = Complex::new(0.0, 0.0);
        assert_eq!(cpow(zero, Complex::new(2.0, 0.0)), zero);
        assert_eq!(cpow(zero, zero), Complex::new(1.0, 0.0));
        assert_eq!(cpow(zero, Complex::new(0.0, 1.0)), Complex::new(1.0, 0.0));
        assert_eq!(
            cpow(zero, Complex::new(-1.0, 0.0)),
            Complex::new(f64::INFINITY, 0.0)
        );
        assert_eq!(
            cpow(zero, Complex::new(-1.0, 0.5)),
            Complex::new(f64::INFINITY, f64::INFINITY)
        );
        assert!(cpow(zero, Complex::new(f64::NAN, 0.0)).re.is_nan());
    }

    #[test]
    fn negative_power_of_zero_escapes_on_the_next_round() {
        // z starts at 0, which is inside the radius; 0^-1 is infinite.
        let fractal = Fractal::new(1.0, 0.0, -1.0, 0.0);
        assert_eq!(fractal.escape(Complex::new(0.0, 0.0), MAX), 1);
    }

    #[test]
    fn imaginary_power_of_zero_is_one() {
        // z <- 1 * 0^(i) + 0 = 1, then 1^(i) = 1 forever: bounded.
        let fractal = Fractal::new(1.0, 0.0, 0.0, 1.0);
        assert_eq!(fractal.escape(Complex::new(0.0, 0.0), MAX), MAX - 1);
    }

    #[test]
    fn cpow_matches_integer_powers() {
        let z = Complex::new(0.5, -0.25);
        let squared = cpow(z, Complex::new(2.0, 0.0));
        assert!((squared - z * z).norm() < 1e-12);
    }
}
