//! Core traits and types for sequential local minimization.
//!
//! This crate defines the shared abstractions that the minimization driver,
//! methods, and recorders build on:
//!
//! - [`Function`]: an objective with optional derivative capabilities
//!   ([`Gradient`], [`FuncGrad`], [`Hessian`], [`FuncGradHess`]) and an
//!   optional [`Statuser`] probe
//! - [`Capabilities`]: the capability record detected once per run
//! - [`Location`]: a point together with its currently valid quantities
//! - [`Stats`]: evaluation and iteration counters
//! - [`Method`]: an iterative optimization method driven by the solver
//! - [`Recorder`]: a progress sink that receives every evaluated location

mod capabilities;
mod evaluation;
mod function;
mod location;
mod method;
mod recorder;
mod stats;
mod status;

pub use capabilities::{Capabilities, Unsatisfied};
pub use evaluation::{EvaluationType, IterationType};
pub use function::{FuncGrad, FuncGradHess, Function, Gradient, Hessian};
pub use location::Location;
pub use method::{Method, Needs, Step};
pub use recorder::Recorder;
pub use stats::Stats;
pub use status::{Status, Statuser};

/// Boxed error type used by collaborators (methods, recorders, probes).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;
