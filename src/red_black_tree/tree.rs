use crate::arena::{Handle, TypedArena};
use crate::red_black_tree::cursor::Position;
use crate::red_black_tree::node::{self, Color, Node};
use std::cmp::Ordering;
use std::fmt;
use std::iter::FromIterator;
use std::mem;

/// A red black tree whose nodes carry parent links.
///
/// Nodes are stored in an arena owned by the tree and refer to each other through handles, so the
/// tree can be traversed in both directions from any node without an auxiliary stack. Positions
/// returned by `find`, `insert` and `erase` identify a node (or the end sentinel) and stay valid
/// until that node is erased.
///
/// When duplicates are allowed, equal values descend to the right so that traversal yields them in
/// insertion order.
///
/// # Examples
///
/// ```
/// use rb_collections::red_black_tree::Tree;
///
/// let mut tree = Tree::new();
/// for value in &[5, 3, 8, 1, 4] {
///     tree.insert(*value, true);
/// }
///
/// let position = tree.find(&4);
/// assert_eq!(tree.get(position), Some(&4));
///
/// let next = tree.erase(position);
/// assert_eq!(tree.get(next), Some(&5));
/// assert_eq!(tree.iter().collect::<Vec<&u32>>(), vec![&1, &3, &5, &8]);
/// ```
#[derive(Clone)]
pub struct Tree<T> {
    pub(super) arena: TypedArena<Node<T>>,
    pub(super) root: Option<Handle>,
    pub(super) len: usize,
}

impl<T> Tree<T> {
    /// Constructs a new, empty `Tree<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::Tree;
    ///
    /// let tree: Tree<u32> = Tree::new();
    /// assert!(tree.is_empty());
    /// ```
    pub fn new() -> Self {
        Tree {
            arena: TypedArena::new(),
            root: None,
            len: 0,
        }
    }

    /// Returns the number of elements in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns an immutable reference to the value at a position. Returns `None` for the end
    /// position or for a position whose node has been erased.
    pub fn get(&self, position: Position) -> Option<&T> {
        position
            .node()
            .and_then(|handle| self.arena.get(&handle))
            .map(|node| &node.data)
    }

    // Only the value half of a map entry may be handed out mutably.
    pub(crate) fn get_mut(&mut self, position: Position) -> Option<&mut T> {
        position
            .node()
            .and_then(move |handle| self.arena.get_mut(&handle))
            .map(|node| &mut node.data)
    }

    // Mutable references to every value in order. Only the value half of a map entry may be
    // modified through these.
    pub(crate) fn values_mut(&mut self) -> Vec<&mut T> {
        let mut ranks: Vec<Option<usize>> = vec![None; self.arena.slots()];
        let mut rank = 0;
        let mut position = self.begin();
        while let Some(handle) = position.node() {
            ranks[handle.index()] = Some(rank);
            rank += 1;
            position = Position::new(self.successor(handle));
        }

        let mut slots: Vec<Option<&mut T>> = (0..self.len).map(|_| None).collect();
        for (handle, node) in self.arena.iter_mut() {
            if let Some(rank) = ranks[handle.index()] {
                slots[rank] = Some(&mut node.data);
            }
        }
        slots.into_iter().flatten().collect()
    }

    /// Returns the position of the root node, or the end position if the tree is empty.
    pub fn root(&self) -> Position {
        Position::new(self.root)
    }

    /// Returns the color of the node at a position.
    pub fn color(&self, position: Position) -> Option<Color> {
        self.node(position).map(|node| node.color)
    }

    /// Returns the position of the left child of the node at a position.
    pub fn left(&self, position: Position) -> Position {
        Position::new(self.node(position).and_then(|node| node.left))
    }

    /// Returns the position of the right child of the node at a position.
    pub fn right(&self, position: Position) -> Position {
        Position::new(self.node(position).and_then(|node| node.right))
    }

    /// Returns the position of the parent of the node at a position.
    pub fn parent(&self, position: Position) -> Position {
        Position::new(self.node(position).and_then(|node| node.parent))
    }

    fn node(&self, position: Position) -> Option<&Node<T>> {
        position.node().and_then(|handle| self.arena.get(&handle))
    }

    /// Returns the number of nodes on the longest path from the root to a leaf.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::Tree;
    ///
    /// let tree: Tree<u32> = (0..1023).collect();
    /// assert!(tree.height() <= 20);
    /// ```
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack = Vec::new();
        stack.extend(self.root.map(|root| (root, 1)));
        while let Some((handle, depth)) = stack.pop() {
            height = height.max(depth);
            let node = &self.arena[handle];
            stack.extend(node.left.map(|left| (left, depth + 1)));
            stack.extend(node.right.map(|right| (right, depth + 1)));
        }
        height
    }

    /// Releases every node, leaving the tree empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::Tree;
    ///
    /// let mut tree: Tree<u32> = (0..10).collect();
    /// tree.clear();
    /// assert!(tree.is_empty());
    /// assert!(tree.begin().is_end());
    /// ```
    pub fn clear(&mut self) {
        debug!("releasing {} nodes", self.len);
        self.arena.clear();
        self.root = None;
        self.len = 0;
    }

    /// Exchanges the contents of two trees in constant time.
    pub fn swap(&mut self, other: &mut Tree<T>) {
        mem::swap(self, other);
    }

    /// Returns the position of the first node in the tree that is not ordered before the probe.
    /// `cmp` compares the probe against the value of a node.
    pub fn lower_bound_by<F>(&self, mut cmp: F) -> Position
    where
        F: FnMut(&T) -> Ordering,
    {
        let mut ret = None;
        let mut curr = self.root;
        while let Some(handle) = curr {
            let node = &self.arena[handle];
            if cmp(&node.data) == Ordering::Greater {
                curr = node.right;
            } else {
                ret = Some(handle);
                curr = node.left;
            }
        }
        Position::new(ret)
    }

    /// Returns the position of the first node in the tree that is ordered after the probe. `cmp`
    /// compares the probe against the value of a node.
    pub fn upper_bound_by<F>(&self, mut cmp: F) -> Position
    where
        F: FnMut(&T) -> Ordering,
    {
        let mut ret = None;
        let mut curr = self.root;
        while let Some(handle) = curr {
            let node = &self.arena[handle];
            if cmp(&node.data) == Ordering::Less {
                ret = Some(handle);
                curr = node.left;
            } else {
                curr = node.right;
            }
        }
        Position::new(ret)
    }

    /// Binary search for a node equal to the probe. `cmp` compares the probe against the value of
    /// a node. Returns the end position if no such node exists.
    pub fn find_by<F>(&self, mut cmp: F) -> Position
    where
        F: FnMut(&T) -> Ordering,
    {
        let mut curr = self.root;
        while let Some(handle) = curr {
            let node = &self.arena[handle];
            curr = match cmp(&node.data) {
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
                Ordering::Equal => return Position::new(Some(handle)),
            };
        }
        Position::end()
    }

    /// Removes the node at a position and returns the position of its in-order successor. Erasing
    /// the end position, or a position whose node is already gone, does nothing and returns the
    /// end position.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::Tree;
    ///
    /// let mut tree: Tree<u32> = vec![1, 2, 3].into_iter().collect();
    /// let position = tree.find(&2);
    /// let next = tree.erase(position);
    /// assert_eq!(tree.get(next), Some(&3));
    /// assert!(tree.erase(tree.end()).is_end());
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn erase(&mut self, position: Position) -> Position {
        match self.take(position) {
            Some((_, next)) => next,
            None => Position::end(),
        }
    }

    /// Removes every node in `[first, last)` and returns `last`.
    pub fn erase_range(&mut self, first: Position, last: Position) -> Position {
        let mut curr = first;
        while curr != last && !curr.is_end() {
            curr = self.erase(curr);
        }
        last
    }

    /// Removes the node at a position and returns its value together with the position of its
    /// in-order successor.
    pub fn take(&mut self, position: Position) -> Option<(T, Position)> {
        let handle = position.node().filter(|handle| self.arena.contains(handle))?;
        let next = Position::new(self.successor(handle));
        Some((self.unlink(handle), next))
    }

    /// Removes and returns the minimum value of the tree.
    pub fn pop_first(&mut self) -> Option<T> {
        let first = self.begin();
        self.take(first).map(|(value, _)| value)
    }

    /// Removes and returns the maximum value of the tree.
    pub fn pop_last(&mut self) -> Option<T> {
        let last = self.last();
        self.take(last).map(|(value, _)| value)
    }

    pub(super) fn leftmost(&self, mut handle: Handle) -> Handle {
        while let Some(left) = self.arena[handle].left {
            handle = left;
        }
        handle
    }

    pub(super) fn rightmost(&self, mut handle: Handle) -> Handle {
        while let Some(right) = self.arena[handle].right {
            handle = right;
        }
        handle
    }

    fn is_red(&self, handle: Option<Handle>) -> bool {
        match handle {
            Some(handle) => self.arena[handle].is_red(),
            None => false,
        }
    }

    // Points the link that held `old` at `new` instead. With no parent, `new` becomes the root.
    fn replace_child(&mut self, parent: Option<Handle>, old: Handle, new: Option<Handle>) {
        match parent {
            None => {
                self.root = new;
                if let Some(new) = new {
                    self.arena[new].parent = None;
                }
            },
            Some(parent) => {
                if self.arena[parent].left == Some(old) {
                    node::attach_left(&mut self.arena, parent, new);
                } else {
                    node::attach_right(&mut self.arena, parent, new);
                }
            },
        }
    }

    fn rotate_left(&mut self, handle: Handle) {
        let pivot = self.arena[handle]
            .right
            .expect("Expected right child node to be `Some`.");
        let inner = self.arena[pivot].left;
        let parent = self.arena[handle].parent;
        node::attach_right(&mut self.arena, handle, inner);
        self.replace_child(parent, handle, Some(pivot));
        node::attach_left(&mut self.arena, pivot, Some(handle));
    }

    fn rotate_right(&mut self, handle: Handle) {
        let pivot = self.arena[handle]
            .left
            .expect("Expected left child node to be `Some`.");
        let inner = self.arena[pivot].right;
        let parent = self.arena[handle].parent;
        node::attach_left(&mut self.arena, handle, inner);
        self.replace_child(parent, handle, Some(pivot));
        node::attach_right(&mut self.arena, pivot, Some(handle));
    }

    // Restores the red black invariants after `handle` was attached as a red leaf.
    fn balance_after_insert(&mut self, mut handle: Handle) {
        loop {
            let parent = match self.arena[handle].parent {
                Some(parent) => parent,
                None => {
                    self.arena[handle].color = Color::Black;
                    return;
                },
            };

            if !self.arena[parent].is_red() {
                return;
            }

            // a red parent is never the root, but recoloring it keeps the root black regardless
            let grandparent = match self.arena[parent].parent {
                Some(grandparent) => grandparent,
                None => {
                    self.arena[parent].color = Color::Black;
                    return;
                },
            };

            let parent_is_left = self.arena[grandparent].left == Some(parent);
            let aunt = if parent_is_left {
                self.arena[grandparent].right
            } else {
                self.arena[grandparent].left
            };

            if let Some(aunt) = aunt.filter(|aunt| self.arena[*aunt].is_red()) {
                trace!("insert fix-up: red aunt, recoloring and moving up");
                self.arena[parent].color = Color::Black;
                self.arena[aunt].color = Color::Black;
                self.arena[grandparent].color = Color::Red;
                handle = grandparent;
                continue;
            }

            let is_left = self.arena[parent].left == Some(handle);
            let subtree_root = match (is_left, parent_is_left) {
                (true, true) => {
                    trace!("insert fix-up: left-left, rotating right");
                    self.rotate_right(grandparent);
                    parent
                },
                (false, false) => {
                    trace!("insert fix-up: right-right, rotating left");
                    self.rotate_left(grandparent);
                    parent
                },
                (false, true) => {
                    trace!("insert fix-up: left-right, double rotation");
                    self.rotate_left(parent);
                    self.rotate_right(grandparent);
                    handle
                },
                (true, false) => {
                    trace!("insert fix-up: right-left, double rotation");
                    self.rotate_right(parent);
                    self.rotate_left(grandparent);
                    handle
                },
            };
            self.arena[subtree_root].color = Color::Black;
            self.arena[grandparent].color = Color::Red;
            return;
        }
    }

    // Splices `handle` out of the tree, frees it and returns its value.
    fn unlink(&mut self, handle: Handle) -> T {
        let (left, right, parent, color) = {
            let node = &self.arena[handle];
            (node.left, node.right, node.parent, node.color)
        };

        // `fix` takes the place of the node that lost a color; it may be absent, so its parent is
        // tracked separately
        let (removed_color, fix, fix_parent) = match (left, right) {
            (Some(left), Some(right)) => {
                let successor = self.leftmost(right);
                let successor_color = self.arena[successor].color;
                let successor_right = self.arena[successor].right;

                let fix_parent = if successor != right {
                    let successor_parent = self.arena[successor]
                        .parent
                        .expect("Expected successor to have a parent.");
                    node::attach_left(&mut self.arena, successor_parent, successor_right);
                    node::attach_right(&mut self.arena, successor, Some(right));
                    successor_parent
                } else {
                    successor
                };

                self.replace_child(parent, handle, Some(successor));
                node::attach_left(&mut self.arena, successor, Some(left));
                self.arena[successor].color = color;
                (successor_color, successor_right, Some(fix_parent))
            },
            (child, None) | (None, child) => {
                self.replace_child(parent, handle, child);
                (color, child, parent)
            },
        };

        let node = self.arena.free(&handle);
        self.len -= 1;

        if removed_color == Color::Black {
            self.balance_after_erase(fix, fix_parent);
        }

        node.data
    }

    // Restores the black height of the subtree rooted at `handle`, which is one short of its
    // sibling's.
    fn balance_after_erase(&mut self, mut handle: Option<Handle>, mut parent: Option<Handle>) {
        while handle != self.root && !self.is_red(handle) {
            let parent_handle = match parent {
                Some(parent_handle) => parent_handle,
                None => break,
            };

            if self.arena[parent_handle].left == handle {
                let mut sibling = self.arena[parent_handle]
                    .right
                    .expect("Expected sibling of a short subtree to be `Some`.");

                if self.arena[sibling].is_red() {
                    trace!("erase fix-up: red sibling, rotating left");
                    self.arena[sibling].color = Color::Black;
                    self.arena[parent_handle].color = Color::Red;
                    self.rotate_left(parent_handle);
                    sibling = self.arena[parent_handle]
                        .right
                        .expect("Expected sibling of a short subtree to be `Some`.");
                }

                let (near, far) = (self.arena[sibling].left, self.arena[sibling].right);
                if !self.is_red(near) && !self.is_red(far) {
                    trace!("erase fix-up: black nephews, moving up");
                    self.arena[sibling].color = Color::Red;
                    handle = Some(parent_handle);
                    parent = self.arena[parent_handle].parent;
                    continue;
                }

                if !self.is_red(far) {
                    trace!("erase fix-up: red near nephew, rotating right");
                    if let Some(near) = near {
                        self.arena[near].color = Color::Black;
                    }
                    self.arena[sibling].color = Color::Red;
                    self.rotate_right(sibling);
                    sibling = self.arena[parent_handle]
                        .right
                        .expect("Expected sibling of a short subtree to be `Some`.");
                }

                trace!("erase fix-up: red far nephew, rotating left");
                self.arena[sibling].color = self.arena[parent_handle].color;
                self.arena[parent_handle].color = Color::Black;
                if let Some(far) = self.arena[sibling].right {
                    self.arena[far].color = Color::Black;
                }
                self.rotate_left(parent_handle);
            } else {
                let mut sibling = self.arena[parent_handle]
                    .left
                    .expect("Expected sibling of a short subtree to be `Some`.");

                if self.arena[sibling].is_red() {
                    trace!("erase fix-up: red sibling, rotating right");
                    self.arena[sibling].color = Color::Black;
                    self.arena[parent_handle].color = Color::Red;
                    self.rotate_right(parent_handle);
                    sibling = self.arena[parent_handle]
                        .left
                        .expect("Expected sibling of a short subtree to be `Some`.");
                }

                let (near, far) = (self.arena[sibling].right, self.arena[sibling].left);
                if !self.is_red(near) && !self.is_red(far) {
                    trace!("erase fix-up: black nephews, moving up");
                    self.arena[sibling].color = Color::Red;
                    handle = Some(parent_handle);
                    parent = self.arena[parent_handle].parent;
                    continue;
                }

                if !self.is_red(far) {
                    trace!("erase fix-up: red near nephew, rotating left");
                    if let Some(near) = near {
                        self.arena[near].color = Color::Black;
                    }
                    self.arena[sibling].color = Color::Red;
                    self.rotate_left(sibling);
                    sibling = self.arena[parent_handle]
                        .left
                        .expect("Expected sibling of a short subtree to be `Some`.");
                }

                trace!("erase fix-up: red far nephew, rotating right");
                self.arena[sibling].color = self.arena[parent_handle].color;
                self.arena[parent_handle].color = Color::Black;
                if let Some(far) = self.arena[sibling].left {
                    self.arena[far].color = Color::Black;
                }
                self.rotate_right(parent_handle);
            }

            handle = self.root;
            parent = None;
        }

        if let Some(handle) = handle {
            self.arena[handle].color = Color::Black;
        }
    }
}

impl<T> Tree<T>
where
    T: Ord,
{
    /// Returns the position of a node equal to `value`, or the end position if there is none.
    pub fn find(&self, value: &T) -> Position {
        self.find_by(|probe| value.cmp(probe))
    }

    /// Inserts a value into the tree and returns its position along with `true`. If `keep_unique`
    /// is set and an equal value already exists, the tree is left untouched and the position of
    /// the existing value is returned along with `false`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// let (position, inserted) = tree.insert(1, true);
    /// assert!(inserted);
    /// assert_eq!(tree.insert(1, true), (position, false));
    ///
    /// let (duplicate, inserted) = tree.insert(1, false);
    /// assert!(inserted);
    /// assert_ne!(duplicate, position);
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn insert(&mut self, value: T, keep_unique: bool) -> (Position, bool) {
        let mut parent = None;
        let mut is_left = false;
        let mut curr = self.root;
        while let Some(handle) = curr {
            let node = &self.arena[handle];
            match value.cmp(&node.data) {
                Ordering::Equal if keep_unique => return (Position::new(Some(handle)), false),
                Ordering::Less => {
                    is_left = true;
                    curr = node.left;
                },
                _ => {
                    is_left = false;
                    curr = node.right;
                },
            }
            parent = Some(handle);
        }

        let handle = self.arena.allocate(Node::new(value));
        match parent {
            None => self.root = Some(handle),
            Some(parent) if is_left => node::attach_left(&mut self.arena, parent, Some(handle)),
            Some(parent) => node::attach_right(&mut self.arena, parent, Some(handle)),
        }
        self.len += 1;
        self.balance_after_insert(handle);

        (Position::new(Some(handle)), true)
    }
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for Tree<T>
where
    T: Ord,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut tree = Tree::new();
        tree.extend(iter);
        tree
    }
}

impl<T> Extend<T> for Tree<T>
where
    T: Ord,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        for value in iter {
            self.insert(value, false);
        }
    }
}

impl<T> PartialEq for Tree<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &Tree<T>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T> Eq for Tree<T> where T: Eq {}

impl<T> fmt::Debug for Tree<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::Tree;
    use crate::entry::Entry;
    use crate::red_black_tree::node::Color;

    fn check<T: Ord>(tree: &Tree<T>) {
        if let Err(violation) = tree.validate() {
            panic!("invalid tree: {}", violation);
        }
    }

    #[test]
    fn test_len_empty() {
        let tree: Tree<u32> = Tree::new();
        assert_eq!(tree.len(), 0);
        assert!(tree.is_empty());
        assert!(tree.begin().is_end());
        assert_eq!(tree.begin(), tree.end());
    }

    #[test]
    fn test_insert_first_is_black_root() {
        let mut tree = Tree::new();
        let (position, inserted) = tree.insert(1, true);
        assert!(inserted);
        assert_eq!(tree.root(), position);
        assert_eq!(tree.color(position), Some(Color::Black));
    }

    #[test]
    fn test_insert_unique() {
        let mut tree = Tree::new();
        let (position, _) = tree.insert(1, true);
        assert_eq!(tree.insert(1, true), (position, false));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn test_insert_duplicates_keep_order() {
        let mut tree = Tree::new();
        let keys = [5, 1, 5, 9, 3, 5, 7, 5, 2, 8, 5, 4, 6, 5];
        for (step, key) in keys.iter().enumerate() {
            tree.insert(Entry::new(*key, step), false);
            check(&tree);
        }

        let tags = |tree: &Tree<Entry<u32, usize>>| {
            tree.iter()
                .filter(|entry| entry.key == 5)
                .map(|entry| entry.value)
                .collect::<Vec<usize>>()
        };
        assert_eq!(tags(&tree), vec![0, 2, 5, 7, 10, 13]);
        assert!(tree
            .iter()
            .zip(tree.iter().skip(1))
            .all(|(prev, next)| prev.key <= next.key));

        let position = tree.find_by(|entry| 5u32.cmp(&entry.key));
        let erased = tree.get(position).map(|entry| entry.value);
        tree.erase(position);
        check(&tree);

        let mut expected = vec![0, 2, 5, 7, 10, 13];
        expected.retain(|tag| Some(*tag) != erased);
        assert_eq!(tags(&tree), expected);
        assert_eq!(tree.len(), keys.len() - 1);
    }

    #[test]
    fn test_insert_ascending_rotates_left() {
        let mut tree = Tree::new();
        tree.insert(10, true);
        tree.insert(20, true);
        tree.insert(30, true);

        let root = tree.root();
        assert_eq!(tree.get(root), Some(&20));
        assert_eq!(tree.get(tree.left(root)), Some(&10));
        assert_eq!(tree.get(tree.right(root)), Some(&30));
        assert_eq!(tree.color(root), Some(Color::Black));
        assert_eq!(tree.color(tree.left(root)), Some(Color::Red));
        assert_eq!(tree.color(tree.right(root)), Some(Color::Red));
        check(&tree);
    }

    #[test]
    fn test_insert_descending_rotates_right() {
        let mut tree = Tree::new();
        tree.insert(30, true);
        tree.insert(20, true);
        tree.insert(10, true);

        let root = tree.root();
        assert_eq!(tree.get(root), Some(&20));
        assert_eq!(tree.get(tree.left(root)), Some(&10));
        assert_eq!(tree.get(tree.right(root)), Some(&30));
        check(&tree);
    }

    #[test]
    fn test_insert_double_rotations() {
        let mut tree = Tree::new();
        tree.insert(30, true);
        tree.insert(10, true);
        tree.insert(20, true);
        assert_eq!(tree.get(tree.root()), Some(&20));
        check(&tree);

        let mut tree = Tree::new();
        tree.insert(10, true);
        tree.insert(30, true);
        tree.insert(20, true);
        assert_eq!(tree.get(tree.root()), Some(&20));
        check(&tree);
    }

    #[test]
    fn test_insert_red_aunt_recolors() {
        let mut tree = Tree::new();
        for value in &[20, 10, 30, 5] {
            tree.insert(*value, true);
        }

        let root = tree.root();
        assert_eq!(tree.get(root), Some(&20));
        assert_eq!(tree.color(root), Some(Color::Black));
        assert_eq!(tree.color(tree.left(root)), Some(Color::Black));
        assert_eq!(tree.color(tree.right(root)), Some(Color::Black));
        assert_eq!(tree.color(tree.find(&5)), Some(Color::Red));
        check(&tree);
    }

    #[test]
    fn test_find() {
        let tree: Tree<u32> = vec![5, 3, 8, 1, 4].into_iter().collect();
        assert_eq!(tree.get(tree.find(&4)), Some(&4));
        assert!(tree.find(&7).is_end());
    }

    #[test]
    fn test_erase_leaf() {
        let mut tree: Tree<u32> = vec![2, 1, 3].into_iter().collect();
        let next = tree.erase(tree.find(&3));
        assert!(next.is_end());
        assert_eq!(tree.len(), 2);
        check(&tree);
    }

    #[test]
    fn test_erase_root_only() {
        let mut tree = Tree::new();
        let (position, _) = tree.insert(1, true);
        assert!(tree.erase(position).is_end());
        assert!(tree.is_empty());
        assert!(tree.root().is_end());
        check(&tree);
    }

    #[test]
    fn test_erase_one_child() {
        let mut tree: Tree<u32> = vec![2, 1, 3, 4].into_iter().collect();
        let next = tree.erase(tree.find(&3));
        assert_eq!(tree.get(next), Some(&4));
        assert_eq!(tree.iter().collect::<Vec<&u32>>(), vec![&1, &2, &4]);
        check(&tree);
    }

    #[test]
    fn test_erase_two_children() {
        let mut tree: Tree<u32> = (0..32).collect();
        let root = tree.root();
        let value = *tree.get(root).unwrap();
        let next = tree.erase(root);
        assert_eq!(tree.get(next), Some(&(value + 1)));
        assert_eq!(tree.len(), 31);
        assert!(tree.find(&value).is_end());
        check(&tree);
    }

    #[test]
    fn test_erase_end_is_noop() {
        let mut tree: Tree<u32> = (0..4).collect();
        assert!(tree.erase(tree.end()).is_end());
        assert_eq!(tree.len(), 4);
    }

    #[test]
    fn test_erase_stale_position_is_noop() {
        let mut tree: Tree<u32> = (0..4).collect();
        let position = tree.find(&2);
        tree.erase(position);
        assert!(tree.erase(position).is_end());
        assert_eq!(tree.get(position), None);
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn test_erase_all_in_order() {
        let mut tree: Tree<u32> = (0..100).collect();
        let mut position = tree.begin();
        let mut expected = 0;
        while !position.is_end() {
            assert_eq!(tree.get(position), Some(&expected));
            position = tree.erase(position);
            expected += 1;
            check(&tree);
        }
        assert_eq!(expected, 100);
        assert!(tree.is_empty());
    }

    #[test]
    fn test_erase_range() {
        let mut tree: Tree<u32> = (0..10).collect();
        let first = tree.find(&3);
        let last = tree.find(&7);
        assert_eq!(tree.erase_range(first, last), last);
        assert_eq!(
            tree.iter().cloned().collect::<Vec<u32>>(),
            vec![0, 1, 2, 7, 8, 9],
        );
        check(&tree);
    }

    #[test]
    fn test_pop_first_last() {
        let mut tree: Tree<u32> = vec![3, 1, 2].into_iter().collect();
        assert_eq!(tree.pop_first(), Some(1));
        assert_eq!(tree.pop_last(), Some(3));
        assert_eq!(tree.pop_last(), Some(2));
        assert_eq!(tree.pop_first(), None);
    }

    #[test]
    fn test_bounds() {
        let tree: Tree<u32> = vec![1, 3, 5].into_iter().collect();
        assert_eq!(tree.get(tree.lower_bound_by(|probe| 3.cmp(probe))), Some(&3));
        assert_eq!(tree.get(tree.upper_bound_by(|probe| 3.cmp(probe))), Some(&5));
        assert_eq!(tree.get(tree.lower_bound_by(|probe| 4.cmp(probe))), Some(&5));
        assert!(tree.upper_bound_by(|probe| 5.cmp(probe)).is_end());
        assert_eq!(tree.get(tree.lower_bound_by(|probe| 0.cmp(probe))), Some(&1));
    }

    #[test]
    fn test_clear() {
        let mut tree: Tree<u32> = (0..10).collect();
        tree.clear();
        assert!(tree.is_empty());
        assert!(tree.root().is_end());
        tree.insert(1, true);
        assert_eq!(tree.len(), 1);
        check(&tree);
    }

    #[test]
    fn test_clone_is_deep() {
        let mut original: Tree<u32> = (0..20).collect();
        let mut copy = original.clone();
        assert_eq!(original, copy);
        assert_eq!(copy.get(copy.root()), original.get(original.root()));
        assert_eq!(copy.color(copy.root()), original.color(original.root()));

        copy.erase(copy.find(&5));
        original.insert(100, true);
        assert_eq!(original.len(), 21);
        assert_eq!(copy.len(), 19);
        assert!(!original.find(&5).is_end());
        assert!(copy.find(&100).is_end());
        check(&original);
        check(&copy);
    }

    #[test]
    fn test_swap() {
        let mut left: Tree<u32> = (0..3).collect();
        let mut right: Tree<u32> = (10..15).collect();
        left.swap(&mut right);
        assert_eq!(left.len(), 5);
        assert_eq!(right.len(), 3);
        assert_eq!(left.iter().next(), Some(&10));
        assert_eq!(right.iter().next(), Some(&0));
    }

    #[test]
    fn test_take_moves_ownership() {
        let mut source: Tree<u32> = (0..3).collect();
        let target = std::mem::take(&mut source);
        assert!(source.is_empty());
        assert_eq!(target.len(), 3);
    }

    #[test]
    fn test_height_is_logarithmic() {
        let tree: Tree<u32> = (0..(1 << 12)).collect();
        assert!(tree.height() <= 2 * 13);
        check(&tree);
    }

    #[test]
    fn test_debug() {
        let tree: Tree<u32> = vec![2, 1].into_iter().collect();
        assert_eq!(format!("{:?}", tree), "{1, 2}");
    }
}
