use num::Float;
use serde::{Deserialize, Serialize};

/// And operator method for combining the propositions of a fuzzy rule premise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AndOp {
    #[default]
    Min,
    Prod,
    BoundedProd,
    DrasticProd,
}

impl AndOp {
    pub fn call<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Min => F::min(u, v),
            Self::Prod => u * v,
            Self::BoundedProd => F::max(F::zero(), u + v - F::one()),
            Self::DrasticProd => {
                if v == F::one() {
                    u
                } else if u == F::one() {
                    v
                } else {
                    F::zero()
                }
            },
        }
    }
}

/// Or operator method for combining the propositions of a fuzzy rule premise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrOp {
    #[default]
    Max,
    ProbOr,
    BoundedSum,
    DrasticSum,
}

impl OrOp {
    pub fn call<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Max => F::max(u, v),
            Self::ProbOr => u + v - u * v,
            Self::BoundedSum => F::min(F::one(), u + v),
            Self::DrasticSum => {
                if v == F::zero() {
                    u
                } else if u == F::zero() {
                    v
                } else {
                    F::one()
                }
            },
        }
    }
}

/// Implication operator shaping a consequent term by its rule's firing strength.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImplicationOp {
    /// Mamdani: clip the term curve at the firing strength
    #[default]
    Min,
    /// Larsen: scale the term curve by the firing strength
    Prod,
}

impl ImplicationOp {
    pub fn call<F: Float>(self, strength: F, curve: &[F]) -> Vec<F> {
        curve
            .iter()
            .map(|&m| match self {
                Self::Min => F::min(strength, m),
                Self::Prod => strength * m,
            })
            .collect()
    }
}

/// Method for aggregating the consequences of the fuzzy rules
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationOp {
    #[default]
    Max,
    ProbOr,
    BoundedSum,
}

impl AggregationOp {
    /// Folds `v` into the accumulated curve `acc`, pointwise.
    pub fn accumulate<F: Float>(self, acc: &mut [F], v: &[F]) {
        debug_assert_eq!(acc.len(), v.len());

        for (u, &v) in acc.iter_mut().zip(v) {
            *u = match self {
                Self::Max => F::max(*u, v),
                Self::ProbOr => OrOp::ProbOr.call(*u, v),
                Self::BoundedSum => OrOp::BoundedSum.call(*u, v),
            };
        }
    }
}

/// Method for defuzzifcating the resulting membership function.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefuzzificationOp {
    /// Center of gravity over the sample points: sum(x * m) / sum(m)
    #[default]
    Centroid,
    /// Center of gravity of the piecewise linear area under the curve
    AreaCentroid,
    /// Bisector of Area
    Bisector,
    /// Mean of the values for which the membership function is maximum
    MeanOfMaximum,
    /// Largest value for which the membership function is maximum
    LargestOfMaximum,
    /// Smallest value for which the membership function is maximum
    SmallestOfMaximum,
}

impl DefuzzificationOp {
    /// Defuzzifies `membership` sampled at `universe`.
    ///
    /// Returns `None` when the curve carries no mass, leaving the fallback to the caller.
    pub fn call<F: Float>(self, universe: &[F], membership: &[F]) -> Option<F> {
        debug_assert_eq!(universe.len(), membership.len());

        let total = membership.iter().fold(F::zero(), |acc, m| acc + *m);

        if total <= F::zero() {
            return None;
        }

        let two = F::one() + F::one();
        let three = two + F::one();

        let value = match self {
            Self::Centroid => {
                let moment = universe
                    .iter()
                    .zip(membership)
                    .fold(F::zero(), |acc, (x, m)| acc + *x * *m);

                moment / total
            },
            Self::AreaCentroid => {
                let mut area_sum = F::zero();
                let mut moment = F::zero();

                for (x, m) in universe.windows(2).zip(membership.windows(2)) {
                    let base = x[1] - x[0];
                    let area_rect = F::min(m[0], m[1]) * base;
                    let center_rect = x[0] + base / two;
                    let area_tri = base * F::abs(m[1] - m[0]) / two;
                    let center_tri = if m[1] > m[0] {
                        x[0] + two / three * base
                    } else {
                        x[0] + F::one() / three * base
                    };

                    area_sum = area_sum + area_rect + area_tri;
                    moment = moment + area_rect * center_rect + area_tri * center_tri;
                }

                if area_sum == F::zero() {
                    // single-point universe
                    return Self::MeanOfMaximum.call(universe, membership);
                }

                moment / area_sum
            },
            Self::Bisector => {
                let areas: Vec<F> = universe
                    .windows(2)
                    .zip(membership.windows(2))
                    .map(|(x, m)| (m[0] + m[1]) * (x[1] - x[0]) / two)
                    .collect();
                let target = areas.iter().fold(F::zero(), |acc, a| acc + *a) / two;

                if target == F::zero() {
                    return Self::MeanOfMaximum.call(universe, membership);
                }

                let mut cum_area = F::zero();
                let mut i_area = 0;

                for (i, area) in areas.iter().enumerate() {
                    cum_area = cum_area + *area;
                    i_area = i;
                    if cum_area >= target {
                        break;
                    }
                }

                // Area left to cover inside the crossing segment, where
                // m(x0 + d) = m0 + slope * d gives m0 * d + slope * d^2 / 2 = rem
                let x0 = universe[i_area];
                let m0 = membership[i_area];
                let slope = (membership[i_area + 1] - m0) / (universe[i_area + 1] - x0);
                let rem = target - (cum_area - areas[i_area]);
                let root = F::sqrt(F::max(F::zero(), m0 * m0 + two * slope * rem));

                if m0 + root == F::zero() {
                    x0
                } else {
                    x0 + two * rem / (m0 + root)
                }
            },
            Self::MeanOfMaximum => {
                let maximum = max_membership(membership);
                let (len, sum) = maximizers(universe, membership, maximum)
                    .fold((F::zero(), F::zero()), |(len, sum), u| (len + F::one(), sum + u));

                sum / len
            },
            Self::LargestOfMaximum => {
                let maximum = max_membership(membership);

                maximizers(universe, membership, maximum).fold(F::neg_infinity(), F::max)
            },
            Self::SmallestOfMaximum => {
                let maximum = max_membership(membership);

                maximizers(universe, membership, maximum).fold(F::infinity(), F::min)
            },
        };

        Some(value)
    }
}

fn max_membership<F: Float>(membership: &[F]) -> F {
    membership.iter().copied().fold(F::zero(), F::max)
}

fn maximizers<'a, F: Float>(universe: &'a [F], membership: &'a [F], maximum: F) -> impl Iterator<Item = F> + 'a {
    universe
        .iter()
        .zip(membership)
        .filter_map(move |(u, m)| (*m == maximum).then_some(*u))
}
