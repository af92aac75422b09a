use std::ops::RangeInclusive;

use crate::error::{Error, Result};

/// Evenly spaced samples over a closed interval, like `numpy.linspace`.
pub struct Linspace {
    start: f64,
    step: f64,
    index: usize,
    len: usize,
}

impl Linspace {
    pub fn new(min: f64, max: f64, n: usize) -> Self {
        let step = match n {
            0 | 1 => 0.,
            n => (max - min) / (n - 1) as f64,
        };

        Linspace {
            start: min,
            step,
            index: 0,
            len: n,
        }
    }
}

impl Iterator for Linspace {
    type Item = f64;

    #[inline]
    fn next(&mut self) -> Option<f64> {
        if self.index >= self.len {
            return None;
        }

        let i = self.index;
        self.index += 1;

        Some(self.start + self.step * i as f64)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.len - self.index;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Linspace {}

/// Upper bound on the samples of one universe.
const MAX_POINTS: u32 = 1 << 24;

/// The discretized domain of a linguistic variable. Immutable once built.
#[derive(Clone, Debug, PartialEq)]
pub struct Universe {
    min: f64,
    max: f64,
    points: Vec<f64>,
}

impl Universe {
    pub fn new(range: RangeInclusive<f64>, step: f64) -> Result<Self> {
        let (min, max) = range.into_inner();

        if !(min.is_finite() && max.is_finite() && step.is_finite()) || min > max || step <= 0. {
            return Err(Error::InvalidUniverse { min, max, step });
        }

        // The epsilon keeps (hi - lo) / step from flooring one sample short
        // when the division lands a hair below an integer.
        let intervals = ((max - min) / step + 1e-9).floor();

        if intervals >= MAX_POINTS as f64 {
            return Err(Error::InvalidUniverse { min, max, step });
        }

        let num = intervals as usize + 1;
        let points = Linspace::new(min, min + step * (num - 1) as f64, num).collect();

        Ok(Self { min, max, points })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn points(&self) -> &[f64] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Saturates `x` to the closed domain.
    pub fn clamp(&self, x: f64) -> f64 {
        x.clamp(self.min, self.max)
    }

    pub fn contains(&self, x: f64) -> bool {
        self.min <= x && x <= self.max
    }

    pub fn mean(&self) -> f64 {
        self.points.iter().sum::<f64>() / self.points.len() as f64
    }
}

#[test]
fn test_linspace() {
    let points: Vec<f64> = Linspace::new(0., 1., 5).collect();

    assert_eq!(points, vec![0., 0.25, 0.5, 0.75, 1.]);
    assert_eq!(Linspace::new(3., 9., 1).collect::<Vec<_>>(), vec![3.]);
    assert_eq!(Linspace::new(3., 9., 0).count(), 0);
}

#[test]
fn test_integer_universe() {
    let universe = Universe::new(0. ..=100., 1.).unwrap();

    assert_eq!(universe.len(), 101);
    assert_eq!(universe.points()[0], 0.);
    assert_eq!(universe.points()[37], 37.);
    assert_eq!(universe.points()[100], 100.);
    assert_eq!(universe.mean(), 50.);
    assert_eq!(universe.clamp(-10.), 0.);
    assert_eq!(universe.clamp(150.), 100.);
    assert_eq!(universe.clamp(f64::INFINITY), 100.);
}

#[test]
fn test_fractional_step() {
    let universe = Universe::new(0. ..=1., 0.1).unwrap();

    assert_eq!(universe.len(), 11);
    assert!((universe.points()[10] - 1.).abs() < 1e-12);
}

#[test]
fn test_invalid_universe() {
    assert!(matches!(Universe::new(10. ..=0., 1.), Err(Error::InvalidUniverse { .. })));
    assert!(matches!(Universe::new(0. ..=10., 0.), Err(Error::InvalidUniverse { .. })));
    assert!(matches!(Universe::new(0. ..=f64::NAN, 1.), Err(Error::InvalidUniverse { .. })));
    assert!(matches!(Universe::new(0. ..=1e30, 1e-10), Err(Error::InvalidUniverse { .. })));
    assert!(matches!(Universe::new(0. ..=f64::MAX, f64::MIN_POSITIVE), Err(Error::InvalidUniverse { .. })));
}
