//! Read-only invariant checks for `Tree<T>`.
//!
//! None of these mutate the tree. They walk the node links directly with an explicit stack instead
//! of going through the cursor, so they can be used as an oracle for the traversal code as well.

use crate::arena::Handle;
use crate::red_black_tree::node::Color;
use crate::red_black_tree::tree::Tree;
use std::error;
use std::fmt;

/// A broken invariant found by one of the checks on `Tree<T>`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Violation {
    /// A child does not point back at its parent, or the root has a parent.
    BrokenLink,
    /// An in-order traversal found a value ordered before its predecessor.
    OutOfOrder { index: usize },
    /// The root is red.
    RedRoot,
    /// A red node has a red child.
    RedChildOfRed,
    /// Two paths from the root to an absent child pass through different numbers of black nodes.
    BlackHeight { expected: usize, found: usize },
    /// The stored length disagrees with the number of reachable or allocated nodes.
    Size { expected: usize, found: usize },
}

impl error::Error for Violation {}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Violation::BrokenLink => write!(f, "Parent and child links disagree."),
            Violation::OutOfOrder { index } => {
                write!(f, "Value at in-order index {} is out of order.", index)
            },
            Violation::RedRoot => write!(f, "Root is red."),
            Violation::RedChildOfRed => write!(f, "Red node has a red child."),
            Violation::BlackHeight { expected, found } => write!(
                f,
                "Black height mismatch: expected {}, found {}.",
                expected, found,
            ),
            Violation::Size { expected, found } => write!(
                f,
                "Size mismatch: expected {} nodes, found {}.",
                expected, found,
            ),
        }
    }
}

impl<T> Tree<T> {
    /// Checks that every child points back at its parent and that the root has no parent. Returns
    /// the number of reachable nodes.
    pub fn check_links(&self) -> Result<usize, Violation> {
        let root = match self.root {
            Some(root) => root,
            None => return Ok(0),
        };
        if self.arena.get(&root).map_or(true, |node| node.parent.is_some()) {
            return Err(Violation::BrokenLink);
        }

        let mut count = 0;
        let mut stack = vec![root];
        while let Some(handle) = stack.pop() {
            count += 1;
            // a cycle would otherwise never terminate
            if count > self.arena.len() {
                return Err(Violation::Size {
                    expected: self.arena.len(),
                    found: count,
                });
            }

            let node = &self.arena[handle];
            for child in node.left.iter().chain(node.right.iter()) {
                match self.arena.get(child) {
                    Some(child_node) if child_node.parent == Some(handle) => stack.push(*child),
                    _ => return Err(Violation::BrokenLink),
                }
            }
        }
        Ok(count)
    }

    /// Checks the red black color rules: the root is black, no red node has a red child, and
    /// every path from the root to an absent child has the same number of black nodes. Returns
    /// that black height.
    pub fn check_colors(&self) -> Result<usize, Violation> {
        let root = match self.root {
            Some(root) => root,
            None => return Ok(0),
        };
        if self.arena[root].color == Color::Red {
            return Err(Violation::RedRoot);
        }

        let mut expected = None;
        let mut stack: Vec<(Handle, usize)> = vec![(root, 0)];
        while let Some((handle, black_count)) = stack.pop() {
            let node = &self.arena[handle];
            let black_count = match node.color {
                Color::Black => black_count + 1,
                Color::Red => black_count,
            };

            for child in &[node.left, node.right] {
                match *child {
                    Some(child) => {
                        if node.is_red() && self.arena[child].is_red() {
                            return Err(Violation::RedChildOfRed);
                        }
                        stack.push((child, black_count));
                    },
                    None => match expected {
                        None => expected = Some(black_count),
                        Some(expected) if expected != black_count => {
                            return Err(Violation::BlackHeight {
                                expected,
                                found: black_count,
                            });
                        },
                        Some(_) => {},
                    },
                }
            }
        }
        Ok(expected.unwrap_or(0))
    }

    /// Checks that the stored length matches both the number of reachable nodes and the number of
    /// allocated nodes.
    pub fn check_size(&self) -> Result<(), Violation> {
        let reachable = self.check_links()?;
        for found in &[reachable, self.arena.len()] {
            if *found != self.len {
                return Err(Violation::Size {
                    expected: self.len,
                    found: *found,
                });
            }
        }
        Ok(())
    }
}

impl<T> Tree<T>
where
    T: Ord,
{
    /// Checks that an in-order walk of the node links yields non-decreasing values.
    pub fn check_order(&self) -> Result<(), Violation> {
        let mut prev: Option<&T> = None;
        let mut index = 0;
        let mut stack = Vec::new();
        let mut curr = self.root;
        loop {
            while let Some(handle) = curr {
                stack.push(handle);
                curr = self.arena[handle].left;
            }
            let handle = match stack.pop() {
                Some(handle) => handle,
                None => return Ok(()),
            };

            let node = &self.arena[handle];
            if let Some(prev) = prev {
                if node.data < *prev {
                    return Err(Violation::OutOfOrder { index });
                }
            }
            prev = Some(&node.data);
            index += 1;
            curr = node.right;
        }
    }

    /// Runs every check on the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::Tree;
    ///
    /// let tree: Tree<u32> = (0..100).collect();
    /// assert_eq!(tree.validate(), Ok(()));
    /// ```
    pub fn validate(&self) -> Result<(), Violation> {
        self.check_size()?;
        self.check_order()?;
        self.check_colors().map(|_| ())
    }
}
