use crate::error::Result;
use crate::ops::{AndOp, OrOp};
use crate::variable::{Variable, VariableKey};

/// A rule premise or consequence.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr<T> {
    Is(VariableKey, T),
    And(Vec<Expr<T>>),
    Or(Vec<Expr<T>>),
}

impl<T> Expr<T> {
    pub fn or(self, rhs: Expr<T>) -> Self {
        match self {
            Expr::Or(mut exprs) => {
                exprs.push(rhs);
                Expr::Or(exprs)
            },
            lhs => Expr::Or(vec![lhs, rhs]),
        }
    }

    pub fn and(self, rhs: Expr<T>) -> Self {
        match self {
            Expr::And(mut exprs) => {
                exprs.push(rhs);
                Expr::And(exprs)
            },
            lhs => Expr::And(vec![lhs, rhs]),
        }
    }

    pub fn and2(self, rhs: Expr<T>, rhs2: Expr<T>) -> Self {
        self.and(rhs).and(rhs2)
    }

    /// Every `variable is term` leaf, left to right.
    pub fn propositions(&self) -> Vec<(VariableKey, &T)> {
        fn parse<'p, T>(expr: &'p Expr<T>, out: &mut Vec<(VariableKey, &'p T)>) {
            match expr {
                Expr::Is(var_key, term) => out.push((*var_key, term)),
                Expr::And(exprs) | Expr::Or(exprs) => {
                    for expr in exprs {
                        parse(expr, out);
                    }
                },
            }
        }

        let mut props = Vec::new();

        parse(self, &mut props);

        props
    }

    /// Degree to which the expression holds, given the degree of each leaf.
    pub(crate) fn strength<D>(&self, degree: &D, and_op: AndOp, or_op: OrOp) -> Result<f64>
    where
        D: Fn(VariableKey, &T) -> Result<f64>,
    {
        match self {
            Expr::Is(var_key, term) => degree(*var_key, term),
            Expr::And(exprs) => exprs.iter().try_fold(1., |acc, expr| -> Result<f64> {
                Ok(and_op.call(acc, expr.strength(degree, and_op, or_op)?))
            }),
            Expr::Or(exprs) => exprs.iter().try_fold(0., |acc, expr| -> Result<f64> {
                Ok(or_op.call(acc, expr.strength(degree, and_op, or_op)?))
            }),
        }
    }
}

impl<I> Variable<I> {
    pub fn is<T>(self, rhs: I) -> Expr<T>
    where
        I: Into<T>,
    {
        Expr::Is(self.0, rhs.into())
    }
}

#[cfg(test)]
mod tests {
    use slotmap::SlotMap;

    use super::*;
    use crate::error::Error;

    fn keys() -> (VariableKey, VariableKey, VariableKey) {
        let mut map = SlotMap::<VariableKey, ()>::with_key();

        (map.insert(()), map.insert(()), map.insert(()))
    }

    #[test]
    fn test_chaining_flattens() {
        let (a, b, c) = keys();
        let expr = Expr::Is(a, 1).and2(Expr::Is(b, 2), Expr::Is(c, 3));

        assert_eq!(
            expr,
            Expr::And(vec![Expr::Is(a, 1), Expr::Is(b, 2), Expr::Is(c, 3)])
        );
        assert_eq!(expr.propositions(), vec![(a, &1), (b, &2), (c, &3)]);
    }

    #[test]
    fn test_strength() {
        let (a, b, c) = keys();
        let degree = |key: VariableKey, _: &u8| -> Result<f64> {
            Ok(if key == a {
                0.2
            } else if key == b {
                0.7
            } else {
                0.5
            })
        };

        let conj = Expr::Is(a, 0).and2(Expr::Is(b, 0), Expr::Is(c, 0));
        assert_eq!(conj.strength(&degree, AndOp::Min, OrOp::Max).unwrap(), 0.2);

        let mixed = Expr::Is(a, 0).and(Expr::Is(b, 0)).or(Expr::Is(c, 0));
        assert_eq!(mixed.strength(&degree, AndOp::Min, OrOp::Max).unwrap(), 0.5);
        assert_eq!(mixed.strength(&degree, AndOp::Prod, OrOp::Max).unwrap(), 0.5);
    }

    #[test]
    fn test_strength_propagates_errors() {
        let (a, b, _) = keys();
        let degree = |key: VariableKey, _: &u8| -> Result<f64> {
            if key == a {
                Ok(1.)
            } else {
                Err(Error::MissingInput("b".into()))
            }
        };

        let expr = Expr::Is(a, 0).and(Expr::Is(b, 0));
        assert!(matches!(
            expr.strength(&degree, AndOp::Min, OrOp::Max),
            Err(Error::MissingInput(_))
        ));
    }
}
