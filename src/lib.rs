//! Mamdani fuzzy inference, and the deviance level model built on it.
//!
//! ```no_run
//! use fuzzy_deviance::DevianceModel;
//!
//! let model = DevianceModel::new()?;
//! let level = model.compute_deviance(35., 20., 60.)?;
//!
//! assert!((0. ..=100.).contains(&level));
//! # Ok::<(), fuzzy_deviance::Error>(())
//! ```

pub mod config;
pub mod deviance;
mod dsl;
mod error;
mod inference;
mod inputs;
mod membership;
pub mod ops;
mod outputs;
mod rules;
mod terms;
mod universe;
mod variable;

pub use config::EngineConfig;
pub use deviance::{Academic, Behavior, Deviance, DevianceModel, DevianceTerm, Family};
pub use dsl::Expr;
pub use error::{Error, Result};
pub use inference::InferenceEngine;
pub use inputs::Inputs;
pub use membership::Triangle;
pub use outputs::Outputs;
pub use rules::{Rule, Rules};
pub use terms::{Key, Term, Terms};
pub use universe::{Linspace, Universe};
pub use variable::{LinguisticVariable, Role, Variable, VariableKey, Variables};
