//! Minimization driver and default methods for the minima framework.
//!
//! # Modules
//!
//! - [`local`]: the sequential local minimization driver
//! - [`linesearch`]: a line-search method with BFGS directions and Armijo
//!   backtracking, used as the default gradient-based method

pub mod linesearch;
pub mod local;
