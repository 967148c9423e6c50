use crate::entry::Entry;
use crate::red_black_tree::cursor::{Cursor, IntoIter, Iter, Position};
use crate::red_black_tree::tree::Tree;
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, Serializer};
use std::borrow::Borrow;
use std::fmt;
use std::iter::FromIterator;
use std::marker::PhantomData;
use std::mem;
use std::ops::{Index, IndexMut};
use std::vec;

/// An ordered map implemented using a red black tree.
///
/// A red black tree is a self-balancing binary search tree that colors each node red or black and
/// keeps every root-to-leaf path at the same number of black nodes, which bounds its height to
/// `2 * log2(n + 1)`. Keys are unique: inserting a key that already exists leaves the existing
/// pair in place unless `insert_or_replace` is used.
///
/// # Examples
///
/// ```
/// use rb_collections::red_black_tree::RedBlackMap;
///
/// let mut map = RedBlackMap::new();
/// map.insert(0, 1);
/// map.insert(3, 4);
///
/// assert_eq!(map[&0], 1);
/// assert_eq!(map.get(&1), None);
/// assert_eq!(map.len(), 2);
///
/// assert_eq!(map.min(), Some(&0));
/// assert_eq!(map.ceil(&2), Some(&3));
///
/// map[&0] = 2;
/// assert_eq!(map.remove(&0), Some((0, 2)));
/// assert_eq!(map.remove(&1), None);
/// ```
#[derive(Clone)]
pub struct RedBlackMap<T, U> {
    tree: Tree<Entry<T, U>>,
}

impl<T, U> RedBlackMap<T, U> {
    /// Constructs a new, empty `RedBlackMap<T, U>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let map: RedBlackMap<u32, u32> = RedBlackMap::new();
    /// ```
    pub fn new() -> Self {
        RedBlackMap { tree: Tree::new() }
    }

    /// Inserts a key-value pair into the map. Returns `false` and leaves the map untouched if the
    /// key already exists.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// assert!(map.insert(1, 1));
    /// assert!(!map.insert(1, 2));
    /// assert_eq!(map.get(&1), Some(&1));
    /// ```
    pub fn insert(&mut self, key: T, value: U) -> bool
    where
        T: Ord,
    {
        self.tree.insert(Entry::new(key, value), true).1
    }

    /// Inserts a key-value pair into the map and returns the position of the key in the map along
    /// with whether it was inserted. If the key already exists, the position of the existing pair
    /// is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// let (position, inserted) = map.insert_full(1, 1);
    /// assert!(inserted);
    /// assert_eq!(map.insert_full(1, 2), (position, false));
    /// ```
    pub fn insert_full(&mut self, key: T, value: U) -> (Position, bool)
    where
        T: Ord,
    {
        self.tree.insert(Entry::new(key, value), true)
    }

    /// Inserts a key-value pair into the map. If the key already exists in the map, its value is
    /// replaced and the old value is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// assert_eq!(map.insert_or_replace(1, 1), None);
    /// assert_eq!(map.insert_or_replace(1, 2), Some(1));
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn insert_or_replace(&mut self, key: T, value: U) -> Option<U>
    where
        T: Ord,
    {
        let position = self.position_of(&key);
        match self.tree.get_mut(position) {
            Some(entry) => Some(mem::replace(&mut entry.value, value)),
            None => {
                self.tree.insert(Entry::new(key, value), true);
                None
            },
        }
    }

    /// Returns a mutable reference to the value associated with a key, inserting the value
    /// returned by `default` first if the key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// *map.get_or_insert_with("a", || 0) += 1;
    /// *map.get_or_insert_with("a", || 0) += 1;
    /// assert_eq!(map.get("a"), Some(&2));
    /// ```
    pub fn get_or_insert_with<F>(&mut self, key: T, default: F) -> &mut U
    where
        T: Ord,
        F: FnOnce() -> U,
    {
        let mut position = self.position_of(&key);
        if position.is_end() {
            position = self.tree.insert(Entry::new(key, default()), true).0;
        }
        &mut self
            .tree
            .get_mut(position)
            .expect("Expected inserted entry to exist.")
            .value
    }

    /// Removes a key-value pair from the map. If the key exists in the map, it will return the
    /// associated key-value pair. Otherwise it will return `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.remove(&1), Some((1, 1)));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<V>(&mut self, key: &V) -> Option<(T, U)>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let position = self.position_of(key);
        self.tree.take(position).map(|(entry, _)| entry.into_pair())
    }

    /// Checks if a key exists in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert!(!map.contains_key(&0));
    /// assert!(map.contains_key(&1));
    /// ```
    pub fn contains_key<V>(&self, key: &V) -> bool
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        !self.position_of(key).is_end()
    }

    /// Returns an immutable reference to the value associated with a particular key. It will
    /// return `None` if the key does not exist in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.get(&0), None);
    /// assert_eq!(map.get(&1), Some(&1));
    /// ```
    pub fn get<V>(&self, key: &V) -> Option<&U>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree
            .get(self.position_of(key))
            .map(|entry| &entry.value)
    }

    /// Returns the stored key and the value associated with a particular key.
    pub fn get_key_value<V>(&self, key: &V) -> Option<(&T, &U)>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree
            .get(self.position_of(key))
            .map(|entry| (&entry.key, &entry.value))
    }

    /// Returns a mutable reference to the value associated with a particular key. Returns `None`
    /// if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// *map.get_mut(&1).unwrap() = 2;
    /// assert_eq!(map.get(&1), Some(&2));
    /// ```
    pub fn get_mut<V>(&mut self, key: &V) -> Option<&mut U>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let position = self.position_of(key);
        self.tree.get_mut(position).map(|entry| &mut entry.value)
    }

    /// Returns a cursor at the pair with a particular key, or a cursor at the end position if the
    /// key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let map: RedBlackMap<u32, char> = vec![(1, 'a'), (2, 'b')].into_iter().collect();
    /// let mut cursor = map.find(&1);
    /// assert_eq!(cursor.get(), Some((&1, &'a')));
    /// cursor.move_next();
    /// assert_eq!(cursor.get(), Some((&2, &'b')));
    /// ```
    pub fn find<V>(&self, key: &V) -> RedBlackMapCursor<'_, T, U>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.cursor(self.position_of(key))
    }

    fn position_of<V>(&self, key: &V) -> Position
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        self.tree.find_by(|entry| key.cmp(entry.key.borrow()))
    }

    /// Removes the pair at a position and returns the position of the next pair.
    pub fn erase(&mut self, position: Position) -> Position {
        self.tree.erase(position)
    }

    /// Removes every pair in `[first, last)` and returns `last`.
    pub fn erase_range(&mut self, first: Position, last: Position) -> Position {
        self.tree.erase_range(first, last)
    }

    /// Returns a cursor at a position.
    pub fn cursor(&self, position: Position) -> RedBlackMapCursor<'_, T, U> {
        RedBlackMapCursor {
            cursor: self.tree.cursor(position),
        }
    }

    /// Returns a cursor at the pair with the minimum key.
    pub fn cursor_front(&self) -> RedBlackMapCursor<'_, T, U> {
        self.cursor(self.tree.begin())
    }

    /// Returns a cursor at the pair with the maximum key.
    pub fn cursor_back(&self) -> RedBlackMapCursor<'_, T, U> {
        self.cursor(self.tree.last())
    }

    /// Returns the number of elements in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let map: RedBlackMap<u32, u32> = RedBlackMap::new();
    /// assert!(map.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Clears the map, removing all values.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    /// map.clear();
    /// assert_eq!(map.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Exchanges the contents of two maps in constant time.
    pub fn swap(&mut self, other: &mut RedBlackMap<T, U>) {
        self.tree.swap(&mut other.tree);
    }

    /// Returns a key in the map that is less than or equal to a particular key. Returns `None` if
    /// such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.floor(&0), None);
    /// assert_eq!(map.floor(&2), Some(&1));
    /// ```
    pub fn floor<V>(&self, key: &V) -> Option<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let upper = self
            .tree
            .upper_bound_by(|entry| key.cmp(entry.key.borrow()));
        if upper == self.tree.begin() {
            return None;
        }
        self.tree.get(self.tree.prev(upper)).map(|entry| &entry.key)
    }

    /// Returns a key in the map that is greater than or equal to a particular key. Returns `None`
    /// if such a key does not exist.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// assert_eq!(map.ceil(&0), Some(&1));
    /// assert_eq!(map.ceil(&2), None);
    /// ```
    pub fn ceil<V>(&self, key: &V) -> Option<&T>
    where
        T: Borrow<V>,
        V: Ord + ?Sized,
    {
        let lower = self
            .tree
            .lower_bound_by(|entry| key.cmp(entry.key.borrow()));
        self.tree.get(lower).map(|entry| &entry.key)
    }

    /// Returns the minimum key of the map. Returns `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// map.insert(3, 3);
    /// assert_eq!(map.min(), Some(&1));
    /// ```
    pub fn min(&self) -> Option<&T> {
        self.tree.get(self.tree.begin()).map(|entry| &entry.key)
    }

    /// Returns the maximum key of the map. Returns `None` if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// map.insert(3, 3);
    /// assert_eq!(map.max(), Some(&3));
    /// ```
    pub fn max(&self) -> Option<&T> {
        self.tree.get(self.tree.last()).map(|entry| &entry.key)
    }

    /// Returns an iterator over the map. The iterator will yield key-value pairs using in-order
    /// traversal.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    ///
    /// let mut iterator = map.iter();
    /// assert_eq!(iterator.next(), Some((&1, &1)));
    /// assert_eq!(iterator.next(), Some((&2, &2)));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> RedBlackMapIter<'_, T, U> {
        RedBlackMapIter {
            iter: self.tree.iter(),
        }
    }

    /// Returns a mutable iterator over the map. The iterator will yield key-value pairs using
    /// in-order traversal. All entries are collected up front, so creating the iterator takes
    /// linear time and space.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::red_black_tree::RedBlackMap;
    ///
    /// let mut map = RedBlackMap::new();
    /// map.insert(1, 1);
    /// map.insert(2, 2);
    ///
    /// for (key, value) in map.iter_mut() {
    ///     *value += key;
    /// }
    ///
    /// let mut iterator = map.iter();
    /// assert_eq!(iterator.next(), Some((&1, &2)));
    /// assert_eq!(iterator.next(), Some((&2, &4)));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter_mut(&mut self) -> RedBlackMapIterMut<'_, T, U> {
        RedBlackMapIterMut {
            iter: self.tree.values_mut().into_iter(),
        }
    }

    /// Returns an iterator over the keys of the map in order.
    pub fn keys(&self) -> impl Iterator<Item = &T> + DoubleEndedIterator {
        self.tree.iter().map(|entry| &entry.key)
    }

    /// Returns an iterator over the values of the map in key order.
    pub fn values(&self) -> impl Iterator<Item = &U> + DoubleEndedIterator {
        self.tree.iter().map(|entry| &entry.value)
    }
}

/// A read-only cursor over a `RedBlackMap<T, U>`.
pub struct RedBlackMapCursor<'a, T, U> {
    cursor: Cursor<'a, Entry<T, U>>,
}

impl<'a, T, U> RedBlackMapCursor<'a, T, U> {
    /// Returns the key-value pair under the cursor, or `None` at the end position.
    pub fn get(&self) -> Option<(&'a T, &'a U)> {
        self.cursor.get().map(|entry| (&entry.key, &entry.value))
    }

    /// Returns the position of the cursor.
    pub fn position(&self) -> Position {
        self.cursor.position()
    }

    /// Returns `true` if the cursor is at the end position.
    pub fn is_end(&self) -> bool {
        self.cursor.is_end()
    }

    /// Moves the cursor to the next key.
    pub fn move_next(&mut self) {
        self.cursor.move_next();
    }

    /// Moves the cursor to the previous key.
    pub fn move_prev(&mut self) {
        self.cursor.move_prev();
    }
}

impl<'a, T, U> Clone for RedBlackMapCursor<'a, T, U> {
    fn clone(&self) -> Self {
        RedBlackMapCursor {
            cursor: self.cursor,
        }
    }
}

impl<'a, T, U> PartialEq for RedBlackMapCursor<'a, T, U> {
    fn eq(&self, other: &RedBlackMapCursor<'a, T, U>) -> bool {
        self.cursor == other.cursor
    }
}

impl<'a, T, U> Eq for RedBlackMapCursor<'a, T, U> {}

impl<T, U> IntoIterator for RedBlackMap<T, U> {
    type IntoIter = RedBlackMapIntoIter<T, U>;
    type Item = (T, U);

    fn into_iter(self) -> Self::IntoIter {
        RedBlackMapIntoIter {
            iter: self.tree.into_iter(),
        }
    }
}

impl<'a, T, U> IntoIterator for &'a RedBlackMap<T, U>
where
    T: 'a,
    U: 'a,
{
    type IntoIter = RedBlackMapIter<'a, T, U>;
    type Item = (&'a T, &'a U);

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, U> IntoIterator for &'a mut RedBlackMap<T, U>
where
    T: 'a,
    U: 'a,
{
    type IntoIter = RedBlackMapIterMut<'a, T, U>;
    type Item = (&'a T, &'a mut U);

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// An owning iterator for `RedBlackMap<T, U>`.
///
/// This iterator traverses the elements of the map in-order and yields owned entries.
pub struct RedBlackMapIntoIter<T, U> {
    iter: IntoIter<Entry<T, U>>,
}

impl<T, U> Iterator for RedBlackMapIntoIter<T, U> {
    type Item = (T, U);

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(Entry::into_pair)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<T, U> DoubleEndedIterator for RedBlackMapIntoIter<T, U> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter.next_back().map(Entry::into_pair)
    }
}

/// An iterator for `RedBlackMap<T, U>`.
///
/// This iterator traverses the elements of the map in-order and yields immutable references.
pub struct RedBlackMapIter<'a, T, U>
where
    T: 'a,
    U: 'a,
{
    iter: Iter<'a, Entry<T, U>>,
}

impl<'a, T, U> Iterator for RedBlackMapIter<'a, T, U>
where
    T: 'a,
    U: 'a,
{
    type Item = (&'a T, &'a U);

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|entry| (&entry.key, &entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<'a, T, U> DoubleEndedIterator for RedBlackMapIter<'a, T, U>
where
    T: 'a,
    U: 'a,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter
            .next_back()
            .map(|entry| (&entry.key, &entry.value))
    }
}

/// A mutable iterator for `RedBlackMap<T, U>`.
///
/// This iterator traverses the elements of the map in-order and yields mutable references to the
/// values.
pub struct RedBlackMapIterMut<'a, T, U>
where
    T: 'a,
    U: 'a,
{
    iter: vec::IntoIter<&'a mut Entry<T, U>>,
}

impl<'a, T, U> Iterator for RedBlackMapIterMut<'a, T, U>
where
    T: 'a,
    U: 'a,
{
    type Item = (&'a T, &'a mut U);

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|entry| (&entry.key, &mut entry.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

impl<'a, T, U> DoubleEndedIterator for RedBlackMapIterMut<'a, T, U>
where
    T: 'a,
    U: 'a,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        self.iter
            .next_back()
            .map(|entry| (&entry.key, &mut entry.value))
    }
}

impl<T, U> FromIterator<(T, U)> for RedBlackMap<T, U>
where
    T: Ord,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (T, U)>,
    {
        let mut map = RedBlackMap::new();
        map.extend(iter);
        map
    }
}

impl<T, U> Extend<(T, U)> for RedBlackMap<T, U>
where
    T: Ord,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = (T, U)>,
    {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<T, U> Default for RedBlackMap<T, U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, U> PartialEq for RedBlackMap<T, U>
where
    T: PartialEq,
    U: PartialEq,
{
    fn eq(&self, other: &RedBlackMap<T, U>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T, U> Eq for RedBlackMap<T, U>
where
    T: Eq,
    U: Eq,
{
}

impl<T, U> fmt::Debug for RedBlackMap<T, U>
where
    T: fmt::Debug,
    U: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, T, U, V> Index<&'a V> for RedBlackMap<T, U>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    type Output = U;

    fn index(&self, key: &V) -> &Self::Output {
        self.get(key).expect("Error: key does not exist.")
    }
}

impl<'a, T, U, V> IndexMut<&'a V> for RedBlackMap<T, U>
where
    T: Borrow<V>,
    V: Ord + ?Sized,
{
    fn index_mut(&mut self, key: &V) -> &mut Self::Output {
        self.get_mut(key).expect("Error: key does not exist.")
    }
}

impl<T, U> Serialize for RedBlackMap<T, U>
where
    T: Serialize,
    U: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.iter())
    }
}

struct RedBlackMapVisitor<T, U> {
    marker: PhantomData<(T, U)>,
}

impl<'de, T, U> Visitor<'de> for RedBlackMapVisitor<T, U>
where
    T: Deserialize<'de> + Ord,
    U: Deserialize<'de>,
{
    type Value = RedBlackMap<T, U>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut map = RedBlackMap::new();
        while let Some((key, value)) = access.next_entry()? {
            map.insert(key, value);
        }
        Ok(map)
    }
}

impl<'de, T, U> Deserialize<'de> for RedBlackMap<T, U>
where
    T: Deserialize<'de> + Ord,
    U: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RedBlackMapVisitor {
            marker: PhantomData,
        })
    }
}
