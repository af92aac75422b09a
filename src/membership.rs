use crate::error::{Error, Result};

/// Triangular membership function with feet at `a` and `c` and its peak at `b`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    a: f64,
    b: f64,
    c: f64,
}

impl Triangle {
    pub fn new(a: f64, b: f64, c: f64) -> Result<Self> {
        let finite = a.is_finite() && b.is_finite() && c.is_finite();

        if !finite || a > b || b > c {
            return Err(Error::InvalidMembership { a, b, c });
        }

        Ok(Self { a, b, c })
    }

    pub fn breakpoints(&self) -> (f64, f64, f64) {
        (self.a, self.b, self.c)
    }

    /// Degree of membership of `x`, always in `[0, 1]`.
    ///
    /// A zero-width edge (`a == b` or `b == c`) is a step: the degree jumps
    /// straight to 1 at the peak instead of following an undefined slope.
    pub fn degree(&self, x: f64) -> f64 {
        let Self { a, b, c } = *self;

        if x == b {
            1.
        } else if a < x && x < b {
            (x - a) / (b - a)
        } else if b < x && x < c {
            (c - x) / (c - b)
        } else {
            0.
        }
    }

    /// Evaluates the function at every point of `xs`.
    pub fn sample(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|x| self.degree(*x)).collect()
    }
}

#[test]
fn test_left_shoulder() {
    let low = Triangle::new(0., 0., 50.).unwrap();

    assert_eq!(low.degree(0.), 1.);
    assert_eq!(low.degree(25.), 0.5);
    assert_eq!(low.degree(50.), 0.);
    assert_eq!(low.degree(-1.), 0.);
    assert_eq!(low.degree(75.), 0.);
}

#[test]
fn test_right_shoulder() {
    let high = Triangle::new(50., 100., 100.).unwrap();

    assert_eq!(high.degree(50.), 0.);
    assert_eq!(high.degree(75.), 0.5);
    assert_eq!(high.degree(100.), 1.);
    assert_eq!(high.degree(101.), 0.);
}

#[test]
fn test_symmetric_triangle() {
    let medium = Triangle::new(25., 50., 75.).unwrap();

    assert_eq!(medium.degree(25.), 0.);
    assert_eq!(medium.degree(37.5), 0.5);
    assert_eq!(medium.degree(50.), 1.);
    assert_eq!(medium.degree(62.5), 0.5);
    assert_eq!(medium.degree(75.), 0.);
}

#[test]
fn test_singleton() {
    let spike = Triangle::new(10., 10., 10.).unwrap();

    assert_eq!(spike.degree(10.), 1.);
    assert_eq!(spike.degree(9.999), 0.);
    assert_eq!(spike.degree(10.001), 0.);
}

#[test]
fn test_rejects_unordered_breakpoints() {
    assert!(matches!(
        Triangle::new(50., 25., 75.),
        Err(Error::InvalidMembership { .. })
    ));
    assert!(Triangle::new(0., f64::NAN, 1.).is_err());
}
