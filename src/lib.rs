//! Data-independent binary search over sorted `i32` slices.
//!
//! The crate provides one primitive: [`search_branchless`], a binary search
//! whose control flow depends only on the length of the input, never on the
//! key or the element values. Each window-halving step selects the surviving
//! half with sign-derived bitmasks instead of a conditional branch, and the
//! number of steps is fixed up front from the length alone, so random
//! lookups pay no branch-misprediction penalty for landing unpredictably.
//!
//! Misses report the insertion point that keeps the slice sorted, either as
//! a typed [`SearchResult`] or in the C-style negative encoding of
//! [`search_branchless_encoded`]. [`search_std`] wraps the standard library
//! search in the same interface as a baseline.
//!
//! # References
//!
//! - [Binary search chapter](https://en.algorithmica.org/hpc/data-structures/binary-search/)

mod search;

pub use search::*;
