//! Ordered collections backed by a red black tree whose nodes link to their parents.
//!
//! Nodes live in a `TypedArena` owned by each tree and refer to each other through handles, which
//! makes deep copies, constant time swaps and non-recursive teardown straightforward.

#[macro_use]
extern crate log;
extern crate serde;

mod entry;
pub mod arena;
pub mod red_black_tree;
