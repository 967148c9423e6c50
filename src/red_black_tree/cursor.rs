use crate::arena::Handle;
use crate::red_black_tree::tree::Tree;
use std::iter::FusedIterator;
use std::ptr;

/// A position in a `Tree<T>`: either a node or the end sentinel.
///
/// The end sentinel is one past the last element and, when moving backwards, one before the
/// first. Two positions are equal if they refer to the same node. A position does not borrow the
/// tree, so it can be held across mutations; it becomes stale once its node is erased.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Position {
    node: Option<Handle>,
}

impl Position {
    pub(crate) fn new(node: Option<Handle>) -> Self {
        Position { node }
    }

    /// Returns the end position.
    pub fn end() -> Self {
        Position { node: None }
    }

    /// Returns `true` if this is the end position.
    pub fn is_end(&self) -> bool {
        self.node.is_none()
    }

    pub(crate) fn node(&self) -> Option<Handle> {
        self.node
    }
}

impl<T> Tree<T> {
    /// Returns the position of the minimum value, or the end position if the tree is empty.
    pub fn begin(&self) -> Position {
        Position::new(self.root.map(|root| self.leftmost(root)))
    }

    /// Returns the end position.
    pub fn end(&self) -> Position {
        Position::end()
    }

    /// Returns the position of the maximum value, or the end position if the tree is empty.
    pub fn last(&self) -> Position {
        Position::new(self.root.map(|root| self.rightmost(root)))
    }

    /// Returns the position of the in-order successor. The successor of the last node is the end
    /// position and the successor of the end position is the first node.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::Tree;
    ///
    /// let tree: Tree<u32> = vec![1, 2].into_iter().collect();
    /// let first = tree.begin();
    /// let second = tree.next(first);
    /// assert_eq!(tree.get(second), Some(&2));
    /// assert!(tree.next(second).is_end());
    /// assert_eq!(tree.next(tree.end()), first);
    /// ```
    pub fn next(&self, position: Position) -> Position {
        match position.node() {
            Some(handle) if self.arena.contains(&handle) => Position::new(self.successor(handle)),
            Some(_) => Position::end(),
            None => self.begin(),
        }
    }

    /// Returns the position of the in-order predecessor. The predecessor of the first node is the
    /// end position and the predecessor of the end position is the last node.
    pub fn prev(&self, position: Position) -> Position {
        match position.node() {
            Some(handle) if self.arena.contains(&handle) => {
                Position::new(self.predecessor(handle))
            },
            Some(_) => Position::end(),
            None => self.last(),
        }
    }

    pub(super) fn successor(&self, handle: Handle) -> Option<Handle> {
        if let Some(right) = self.arena[handle].right {
            return Some(self.leftmost(right));
        }

        let mut curr = handle;
        let mut parent = self.arena[curr].parent;
        while let Some(parent_handle) = parent {
            if self.arena[parent_handle].right != Some(curr) {
                break;
            }
            curr = parent_handle;
            parent = self.arena[parent_handle].parent;
        }
        parent
    }

    pub(super) fn predecessor(&self, handle: Handle) -> Option<Handle> {
        if let Some(left) = self.arena[handle].left {
            return Some(self.rightmost(left));
        }

        let mut curr = handle;
        let mut parent = self.arena[curr].parent;
        while let Some(parent_handle) = parent {
            if self.arena[parent_handle].left != Some(curr) {
                break;
            }
            curr = parent_handle;
            parent = self.arena[parent_handle].parent;
        }
        parent
    }

    /// Returns a cursor at a position.
    pub fn cursor(&self, position: Position) -> Cursor<'_, T> {
        Cursor {
            tree: self,
            position,
        }
    }

    /// Returns a cursor at the minimum value.
    pub fn cursor_front(&self) -> Cursor<'_, T> {
        self.cursor(self.begin())
    }

    /// Returns a cursor at the maximum value.
    pub fn cursor_back(&self) -> Cursor<'_, T> {
        self.cursor(self.last())
    }

    /// Returns an iterator over the tree. The iterator will yield values using in-order traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::Tree;
    ///
    /// let tree: Tree<u32> = vec![3, 1, 2].into_iter().collect();
    /// assert_eq!(tree.iter().collect::<Vec<&u32>>(), vec![&1, &2, &3]);
    /// assert_eq!(tree.iter().rev().collect::<Vec<&u32>>(), vec![&3, &2, &1]);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            tree: self,
            front: self.begin(),
            back: self.last(),
            remaining: self.len,
        }
    }
}

/// A read-only cursor over a `Tree<T>`.
///
/// The cursor wraps a position and moves through the tree by following parent and child links. It
/// wraps around through the end position in both directions.
///
/// # Examples
///
/// ```
/// use rb_collections::red_black_tree::Tree;
///
/// let tree: Tree<u32> = vec![1, 2, 3].into_iter().collect();
/// let mut cursor = tree.cursor(tree.find(&2));
/// cursor.move_next();
/// assert_eq!(cursor.get(), Some(&3));
/// cursor.move_next();
/// assert!(cursor.is_end());
/// cursor.move_prev();
/// assert_eq!(cursor.get(), Some(&3));
/// ```
pub struct Cursor<'a, T> {
    tree: &'a Tree<T>,
    position: Position,
}

impl<'a, T> Cursor<'a, T> {
    /// Returns the value under the cursor, or `None` at the end position.
    pub fn get(&self) -> Option<&'a T> {
        self.tree.get(self.position)
    }

    /// Returns the position of the cursor.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Returns `true` if the cursor is at the end position.
    pub fn is_end(&self) -> bool {
        self.position.is_end()
    }

    /// Moves the cursor to the in-order successor.
    pub fn move_next(&mut self) {
        self.position = self.tree.next(self.position);
    }

    /// Moves the cursor to the in-order predecessor.
    pub fn move_prev(&mut self) {
        self.position = self.tree.prev(self.position);
    }

    /// Returns the value after the cursor without moving it.
    pub fn peek_next(&self) -> Option<&'a T> {
        self.tree.get(self.tree.next(self.position))
    }

    /// Returns the value before the cursor without moving it.
    pub fn peek_prev(&self) -> Option<&'a T> {
        self.tree.get(self.tree.prev(self.position))
    }
}

impl<'a, T> Clone for Cursor<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for Cursor<'a, T> {}

impl<'a, T> PartialEq for Cursor<'a, T> {
    fn eq(&self, other: &Cursor<'a, T>) -> bool {
        ptr::eq(self.tree, other.tree) && self.position == other.position
    }
}

impl<'a, T> Eq for Cursor<'a, T> {}

/// An iterator for `Tree<T>`.
///
/// This iterator traverses the elements of the tree in-order and yields immutable references.
pub struct Iter<'a, T> {
    tree: &'a Tree<T>,
    front: Position,
    back: Position,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let ret = self.tree.get(self.front);
        self.front = self.tree.next(self.front);
        self.remaining -= 1;
        ret
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T>
where
    T: 'a,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let ret = self.tree.get(self.back);
        self.back = self.tree.prev(self.back);
        self.remaining -= 1;
        ret
    }
}

impl<'a, T> ExactSizeIterator for Iter<'a, T> where T: 'a {}

impl<'a, T> FusedIterator for Iter<'a, T> where T: 'a {}

impl<'a, T> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Iter {
            tree: self.tree,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<T> IntoIterator for Tree<T> {
    type IntoIter = IntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { tree: self }
    }
}

impl<'a, T> IntoIterator for &'a Tree<T>
where
    T: 'a,
{
    type IntoIter = Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `Tree<T>`.
///
/// This iterator traverses the elements of the tree in-order and yields owned values.
pub struct IntoIter<T> {
    tree: Tree<T>,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.tree.pop_first()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.tree.len(), Some(self.tree.len()))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.tree.pop_last()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> FusedIterator for IntoIter<T> {}

#[cfg(test)]
mod tests {
    use crate::red_black_tree::{Position, Tree};

    #[test]
    fn test_end_wraps_around() {
        let tree: Tree<u32> = vec![5, 3, 8].into_iter().collect();
        assert_eq!(tree.get(tree.next(tree.end())), Some(&3));
        assert_eq!(tree.get(tree.prev(tree.end())), Some(&8));
        assert!(tree.prev(tree.begin()).is_end());
        assert!(tree.next(tree.last()).is_end());
    }

    #[test]
    fn test_empty_tree_stays_at_end() {
        let tree: Tree<u32> = Tree::new();
        assert!(tree.next(tree.end()).is_end());
        assert!(tree.prev(tree.end()).is_end());
        assert_eq!(tree.cursor_front().get(), None);
        assert_eq!(tree.iter().next(), None);
    }

    #[test]
    fn test_increment_reaches_end_after_len_steps() {
        let tree: Tree<u32> = (0..50).rev().collect();
        let mut position = tree.begin();
        for _ in 0..tree.len() {
            assert!(!position.is_end());
            position = tree.next(position);
        }
        assert_eq!(position, tree.end());
    }

    #[test]
    fn test_decrement_reaches_first_after_len_steps() {
        let tree: Tree<u32> = (0..50).collect();
        let mut position = tree.end();
        for _ in 0..tree.len() {
            position = tree.prev(position);
        }
        assert_eq!(position, tree.begin());
    }

    #[test]
    fn test_next_prev_inverse() {
        let tree: Tree<u32> = (0..64).collect();
        let mut position = tree.next(tree.begin());
        while position != tree.last() {
            assert_eq!(tree.prev(tree.next(position)), position);
            assert_eq!(tree.next(tree.prev(position)), position);
            position = tree.next(position);
        }
    }

    #[test]
    fn test_cursor_peek() {
        let tree: Tree<u32> = vec![1, 2, 3].into_iter().collect();
        let cursor = tree.cursor(tree.find(&2));
        assert_eq!(cursor.peek_next(), Some(&3));
        assert_eq!(cursor.peek_prev(), Some(&1));
        assert_eq!(cursor.get(), Some(&2));
    }

    #[test]
    fn test_cursor_equality() {
        let tree: Tree<u32> = vec![1, 2].into_iter().collect();
        let mut cursor = tree.cursor_front();
        cursor.move_next();
        assert!(cursor == tree.cursor_back());
        cursor.move_next();
        assert!(cursor == tree.cursor(Position::end()));
    }

    #[test]
    fn test_iter_double_ended() {
        let tree: Tree<u32> = (0..6).collect();
        let mut iter = tree.iter();
        assert_eq!(iter.len(), 6);
        assert_eq!(iter.next(), Some(&0));
        assert_eq!(iter.next_back(), Some(&5));
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next_back(), Some(&4));
        assert_eq!(iter.len(), 2);
        assert_eq!(iter.collect::<Vec<&u32>>(), vec![&2, &3]);
    }

    #[test]
    fn test_into_iter() {
        let tree: Tree<u32> = vec![4, 2, 9, 1].into_iter().collect();
        assert_eq!(tree.clone().into_iter().collect::<Vec<u32>>(), vec![1, 2, 4, 9]);
        assert_eq!(tree.into_iter().rev().collect::<Vec<u32>>(), vec![9, 4, 2, 1]);
    }
}
