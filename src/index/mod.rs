//! Auxiliary index structures: 1-D interval tree and monotone chains.

mod bintree;
mod chain;
mod interval;

pub use bintree::Bintree;
pub use chain::{build_chains, MonotoneChain};
pub use interval::Interval;
