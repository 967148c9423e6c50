use crate::arena::{Handle, TypedArena};

/// An enum representing the color of a node in a red black tree.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Color {
    Red,
    Black,
}

/// A struct representing an internal node of a red black tree.
///
/// The node owns its payload only. `left` and `right` point at the children the tree owns through
/// its arena, and `parent` is a back-reference used for navigation and rebalancing.
#[derive(Clone)]
pub struct Node<T> {
    pub data: T,
    pub color: Color,
    pub left: Option<Handle>,
    pub right: Option<Handle>,
    pub parent: Option<Handle>,
}

impl<T> Node<T> {
    pub fn new(data: T) -> Self {
        Node {
            data,
            color: Color::Red,
            left: None,
            right: None,
            parent: None,
        }
    }

    pub fn is_red(&self) -> bool {
        self.color == Color::Red
    }
}

/// Makes `child` the left child of `parent`, updating both directions of the link.
pub fn attach_left<T>(arena: &mut TypedArena<Node<T>>, parent: Handle, child: Option<Handle>) {
    arena[parent].left = child;
    if let Some(child) = child {
        arena[child].parent = Some(parent);
    }
}

/// Makes `child` the right child of `parent`, updating both directions of the link.
pub fn attach_right<T>(arena: &mut TypedArena<Node<T>>, parent: Handle, child: Option<Handle>) {
    arena[parent].right = child;
    if let Some(child) = child {
        arena[child].parent = Some(parent);
    }
}
