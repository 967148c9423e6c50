//! Self-balancing binary search tree that uses a color bit to ensure that the tree remains
//! approximately balanced during insertions and deletions.
//!
//! Every node links to its parent as well as its children, so a position can be stepped forwards
//! or backwards in amortized constant time without keeping a stack. `Tree<T>` is the engine: it
//! allows duplicates, exposes raw positions and carries the invariant checks. `RedBlackSet<T>`
//! and `RedBlackMap<T, U>` wrap it with unique keys.

mod cursor;
mod map;
mod node;
mod set;
mod tree;
mod verify;

pub use self::cursor::{Cursor, IntoIter, Iter, Position};
pub use self::map::{
    RedBlackMap, RedBlackMapCursor, RedBlackMapIntoIter, RedBlackMapIter, RedBlackMapIterMut,
};
pub use self::node::Color;
pub use self::set::RedBlackSet;
pub use self::tree::Tree;
pub use self::verify::Violation;
