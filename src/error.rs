use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("variable `{variable}` has no term `{term}`")]
    UnknownTerm { variable: String, term: String },

    #[error("unknown variable key")]
    UnknownVariable,

    #[error("variable `{variable}` is not {expected}")]
    RoleMismatch { variable: String, expected: &'static str },

    #[error("triangle breakpoints must satisfy a <= b <= c, got ({a}, {b}, {c})")]
    InvalidMembership { a: f64, b: f64, c: f64 },

    #[error("term `{term}` of `{variable}` lies outside the universe [{min}, {max}]")]
    OutOfUniverse {
        variable: String,
        term: String,
        min: f64,
        max: f64,
    },

    #[error("invalid universe [{min}, {max}] with step {step}")]
    InvalidUniverse { min: f64, max: f64, step: f64 },

    #[error("rule {rule} must conclude a single `variable is term` proposition")]
    InvalidConsequence { rule: usize },

    #[error("no input value supplied for `{0}`")]
    MissingInput(String),

    #[error("input for `{0}` is not a number")]
    NonFiniteInput(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
