//! Toy numerical analogies between a synthetic spectrum and the ordinates of
//! nontrivial Riemann zeta zeros: counting functions, smoothing kernels, a
//! simplified trace formula and error metrics.
//!
//! Every computation is a pure function over immutable slices; nothing is
//! cached or shared between calls.

pub mod config;
pub mod domain;
pub mod export;
pub mod numerics;
pub mod spectral;
