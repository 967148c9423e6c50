use crate::red_black_tree::cursor::{Cursor, IntoIter, Iter, Position};
use crate::red_black_tree::tree::Tree;
use serde::de::{Deserialize, Deserializer, SeqAccess, Visitor};
use serde::ser::{Serialize, Serializer};
use std::borrow::Borrow;
use std::fmt;
use std::iter::FromIterator;
use std::marker::PhantomData;

/// An ordered set implemented using a red black tree.
///
/// A red black tree is a self-balancing binary search tree that colors each node red or black and
/// keeps every root-to-leaf path at the same number of black nodes, which bounds its height to
/// `2 * log2(n + 1)`. Keys are unique.
///
/// # Examples
///
/// ```
/// use rb_collections::red_black_tree::RedBlackSet;
///
/// let mut set = RedBlackSet::new();
/// set.insert(0);
/// set.insert(3);
///
/// assert_eq!(set.len(), 2);
///
/// assert_eq!(set.min(), Some(&0));
/// assert_eq!(set.ceil(&2), Some(&3));
///
/// assert_eq!(set.remove(&0), Some(0));
/// assert_eq!(set.remove(&1), None);
/// ```
#[derive(Clone)]
pub struct RedBlackSet<T> {
    tree: Tree<T>,
}

impl<T> RedBlackSet<T> {
    /// Constructs a new, empty `RedBlackSet<T>`
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = RedBlackSet::new();
    /// ```
    pub fn new() -> Self {
        RedBlackSet { tree: Tree::new() }
    }

    /// Inserts a key into the set. Returns `false` and leaves the set untouched if the key
    /// already exists.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// assert!(set.insert(1));
    /// assert!(set.contains(&1));
    /// assert!(!set.insert(1));
    /// ```
    pub fn insert(&mut self, key: T) -> bool
    where
        T: Ord,
    {
        self.tree.insert(key, true).1
    }

    /// Inserts a key into the set and returns the position of the key in the set along with
    /// whether it was inserted. If the key already exists, the position of the existing key is
    /// returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// let (position, inserted) = set.insert_full(1);
    /// assert!(inserted);
    /// assert_eq!(set.insert_full(1), (position, false));
    /// ```
    pub fn insert_full(&mut self, key: T) -> (Position, bool)
    where
        T: Ord,
    {
        self.tree.insert(key, true)
    }

    /// Removes a key from the set. If the key exists in the set, it will return the associated
    /// key. Otherwise it will return `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert_eq!(set.remove(&1), Some(1));
    /// assert_eq!(set.remove(&1), None);
    /// ```
    pub fn remove<V>(&mut self, key: &V) -> Option<T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let position = self.position_of(key);
        self.tree.take(position).map(|(key, _)| key)
    }

    /// Checks if a key exists in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert!(!set.contains(&0));
    /// assert!(set.contains(&1));
    /// ```
    pub fn contains<V>(&self, key: &V) -> bool
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        !self.position_of(key).is_end()
    }

    /// Returns a reference to the key in the set that is equal to a particular key.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(String::from("a"));
    /// assert_eq!(set.get("a"), Some(&String::from("a")));
    /// assert_eq!(set.get("b"), None);
    /// ```
    pub fn get<V>(&self, key: &V) -> Option<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree.get(self.position_of(key))
    }

    /// Returns a cursor at the key equal to a particular key, or a cursor at the end position if
    /// the key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = vec![1, 3, 5].into_iter().collect();
    /// let mut cursor = set.find(&3);
    /// assert_eq!(cursor.get(), Some(&3));
    /// cursor.move_next();
    /// assert_eq!(cursor.get(), Some(&5));
    /// assert!(set.find(&4).is_end());
    /// ```
    pub fn find<V>(&self, key: &V) -> Cursor<'_, T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree.cursor(self.position_of(key))
    }

    fn position_of<V>(&self, key: &V) -> Position
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree.find_by(|probe| key.cmp(probe.borrow()))
    }

    /// Removes the key at a position and returns the position of the next key.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set: RedBlackSet<u32> = vec![1, 3, 4, 5, 8].into_iter().collect();
    /// let position = set.find(&4).position();
    /// let next = set.erase(position);
    /// assert_eq!(set.cursor(next).get(), Some(&5));
    /// assert_eq!(set.len(), 4);
    /// ```
    pub fn erase(&mut self, position: Position) -> Position {
        self.tree.erase(position)
    }

    /// Removes every key in `[first, last)` and returns `last`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set: RedBlackSet<u32> = (0..10).collect();
    /// let first = set.find(&2).position();
    /// let last = set.find(&8).position();
    /// set.erase_range(first, last);
    /// assert_eq!(set.iter().collect::<Vec<&u32>>(), vec![&0, &1, &8, &9]);
    /// ```
    pub fn erase_range(&mut self, first: Position, last: Position) -> Position {
        self.tree.erase_range(first, last)
    }

    /// Returns a cursor at a position.
    pub fn cursor(&self, position: Position) -> Cursor<'_, T> {
        self.tree.cursor(position)
    }

    /// Returns a cursor at the minimum key of the set.
    pub fn cursor_front(&self) -> Cursor<'_, T> {
        self.tree.cursor_front()
    }

    /// Returns a cursor at the maximum key of the set.
    pub fn cursor_back(&self) -> Cursor<'_, T> {
        self.tree.cursor_back()
    }

    /// Returns the number of elements in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let set: RedBlackSet<u32> = RedBlackSet::new();
    /// assert!(set.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Clears the set, removing all values.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// set.insert(2);
    /// set.clear();
    /// assert_eq!(set.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Exchanges the contents of two sets in constant time.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut left: RedBlackSet<u32> = vec![1].into_iter().collect();
    /// let mut right: RedBlackSet<u32> = vec![2, 3].into_iter().collect();
    /// left.swap(&mut right);
    /// assert_eq!(left.len(), 2);
    /// assert_eq!(right.len(), 1);
    /// ```
    pub fn swap(&mut self, other: &mut RedBlackSet<T>) {
        self.tree.swap(&mut other.tree);
    }

    /// Returns a key in the set that is less than or equal to a particular key. Returns `None` if
    /// such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert_eq!(set.floor(&0), None);
    /// assert_eq!(set.floor(&2), Some(&1));
    /// ```
    pub fn floor<V>(&self, key: &V) -> Option<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let upper = self.tree.upper_bound_by(|probe| key.cmp(probe.borrow()));
        // the predecessor of the first key wraps around through the end position
        if upper == self.tree.begin() {
            return None;
        }
        self.tree.get(self.tree.prev(upper))
    }

    /// Returns a key in the set that is greater than or equal to a particular key. Returns `None`
    /// if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// assert_eq!(set.ceil(&0), Some(&1));
    /// assert_eq!(set.ceil(&2), None);
    /// ```
    pub fn ceil<V>(&self, key: &V) -> Option<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree
            .get(self.tree.lower_bound_by(|probe| key.cmp(probe.borrow())))
    }

    /// Returns the minimum key of the set. Returns `None` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// set.insert(3);
    /// assert_eq!(set.min(), Some(&1));
    /// ```
    pub fn min(&self) -> Option<&T> {
        self.tree.get(self.tree.begin())
    }

    /// Returns the maximum key of the set. Returns `None` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// set.insert(3);
    /// assert_eq!(set.max(), Some(&3));
    /// ```
    pub fn max(&self) -> Option<&T> {
        self.tree.get(self.tree.last())
    }

    /// Returns an iterator over the set. The iterator will yield keys using in-order traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackSet;
    ///
    /// let mut set = RedBlackSet::new();
    /// set.insert(1);
    /// set.insert(3);
    ///
    /// let mut iterator = set.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&3));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        self.tree.iter()
    }
}

impl<T> IntoIterator for RedBlackSet<T> {
    type IntoIter = IntoIter<T>;
    type Item = T;

    fn into_iter(self) -> Self::IntoIter {
        self.tree.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a RedBlackSet<T>
where
    T: 'a,
{
    type IntoIter = Iter<'a, T>;
    type Item = &'a T;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> FromIterator<T> for RedBlackSet<T>
where
    T: Ord,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut set = RedBlackSet::new();
        set.extend(iter);
        set
    }
}

impl<T> Extend<T> for RedBlackSet<T>
where
    T: Ord,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<T> Default for RedBlackSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PartialEq for RedBlackSet<T>
where
    T: PartialEq,
{
    fn eq(&self, other: &RedBlackSet<T>) -> bool {
        self.tree == other.tree
    }
}

impl<T> Eq for RedBlackSet<T> where T: Eq {}

impl<T> fmt::Debug for RedBlackSet<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.tree, f)
    }
}

impl<T> Serialize for RedBlackSet<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

struct RedBlackSetVisitor<T> {
    marker: PhantomData<T>,
}

impl<'de, T> Visitor<'de> for RedBlackSetVisitor<T>
where
    T: Deserialize<'de> + Ord,
{
    type Value = RedBlackSet<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a sequence")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut set = RedBlackSet::new();
        while let Some(key) = seq.next_element()? {
            set.insert(key);
        }
        Ok(set)
    }
}

impl<'de, T> Deserialize<'de> for RedBlackSet<T>
where
    T: Deserialize<'de> + Ord,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(RedBlackSetVisitor {
            marker: PhantomData,
        })
    }
}
