//! Typed arena with stable handles and slot reuse.

use std::mem;
use std::ops::{Index, IndexMut};
use std::vec::Vec;

/// A handle to an object allocated in a `TypedArena<T>`.
///
/// Handles stay valid until the object is freed. A freed slot is recycled by later allocations, so
/// a handle that outlives its object may alias a newer one.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Handle {
    index: usize,
}

impl Handle {
    // Slot index in the owning arena, below `TypedArena::slots`.
    pub(crate) fn index(&self) -> usize {
        self.index
    }
}

#[derive(Clone)]
enum Block<T> {
    Occupied(T),
    Vacant(Option<usize>),
}

/// An allocator for a single type of object backed by one growable `Vec`.
///
/// Freed blocks form an intrusive free list and are handed out again before the arena grows.
/// Cloning the arena clones every live object in place, so handles into the original are valid
/// handles into the clone. Dropping or clearing the arena releases every object without recursing
/// through whatever structure the objects form.
///
/// # Examples
///
/// ```
/// use rb_collections::arena::TypedArena;
///
/// let mut arena = TypedArena::new();
///
/// let x = arena.allocate(1);
/// assert_eq!(arena[x], 1);
///
/// arena[x] += 1;
/// assert_eq!(arena[x], 2);
///
/// assert_eq!(arena.free(&x), 2);
/// assert!(arena.is_empty());
/// ```
#[derive(Clone)]
pub struct TypedArena<T> {
    head: Option<usize>,
    blocks: Vec<Block<T>>,
    len: usize,
}

impl<T> TypedArena<T> {
    /// Constructs a new, empty `TypedArena<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::arena::TypedArena;
    ///
    /// let arena: TypedArena<u32> = TypedArena::new();
    /// ```
    pub fn new() -> Self {
        TypedArena {
            head: None,
            blocks: Vec::new(),
            len: 0,
        }
    }

    /// Constructs a new, empty `TypedArena<T>` with room for `capacity` objects before it
    /// reallocates.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::arena::TypedArena;
    ///
    /// let arena: TypedArena<u32> = TypedArena::with_capacity(1024);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        TypedArena {
            head: None,
            blocks: Vec::with_capacity(capacity),
            len: 0,
        }
    }

    /// Allocates an object in the arena and returns a handle that can later be used to access or
    /// free the object.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new();
    /// let x = arena.allocate(0);
    /// ```
    pub fn allocate(&mut self, value: T) -> Handle {
        self.len += 1;
        match self.head.take() {
            None => {
                self.blocks.push(Block::Occupied(value));
                Handle {
                    index: self.blocks.len() - 1,
                }
            },
            Some(index) => {
                let vacant_block = mem::replace(&mut self.blocks[index], Block::Occupied(value));
                match vacant_block {
                    Block::Vacant(next) => self.head = next,
                    Block::Occupied(_) => panic!("Error: free list points to an occupied block."),
                }
                Handle { index }
            },
        }
    }

    /// Deallocates an object in the arena and returns the object.
    ///
    /// # Panics
    ///
    /// Panics if the handle corresponds to an invalid or vacant block.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new();
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.free(&x), 0);
    /// ```
    pub fn free(&mut self, handle: &Handle) -> T {
        if !self.contains(handle) {
            panic!("Error: attempting to free an invalid or vacant block.");
        }
        let old_block = mem::replace(
            &mut self.blocks[handle.index],
            Block::Vacant(self.head.take()),
        );
        self.head = Some(handle.index);
        self.len -= 1;
        match old_block {
            Block::Occupied(value) => value,
            Block::Vacant(_) => unreachable!(),
        }
    }

    /// Returns `true` if the handle refers to a live object in the arena.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new();
    /// let x = arena.allocate(0);
    /// assert!(arena.contains(&x));
    /// arena.free(&x);
    /// assert!(!arena.contains(&x));
    /// ```
    pub fn contains(&self, handle: &Handle) -> bool {
        match self.blocks.get(handle.index) {
            Some(Block::Occupied(_)) => true,
            _ => false,
        }
    }

    /// Returns an immutable reference to an object in the arena. Returns `None` if the handle does
    /// not correspond to a live object.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new();
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.get(&x), Some(&0));
    /// ```
    pub fn get(&self, handle: &Handle) -> Option<&T> {
        match self.blocks.get(handle.index) {
            Some(Block::Occupied(ref value)) => Some(value),
            _ => None,
        }
    }

    /// Returns a mutable reference to an object in the arena. Returns `None` if the handle does
    /// not correspond to a live object.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new();
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.get_mut(&x), Some(&mut 0));
    /// ```
    pub fn get_mut(&mut self, handle: &Handle) -> Option<&mut T> {
        match self.blocks.get_mut(handle.index) {
            Some(Block::Occupied(ref mut value)) => Some(value),
            _ => None,
        }
    }

    /// Returns an iterator over the live objects in the arena and their handles, in no particular
    /// order.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new();
    /// let x = arena.allocate(1);
    /// let y = arena.allocate(2);
    /// arena.free(&x);
    ///
    /// for (_, value) in arena.iter_mut() {
    ///     *value *= 10;
    /// }
    /// assert_eq!(arena[y], 20);
    /// ```
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Handle, &mut T)> {
        self.blocks
            .iter_mut()
            .enumerate()
            .filter_map(|(index, block)| match block {
                Block::Occupied(value) => Some((Handle { index }, value)),
                Block::Vacant(_) => None,
            })
    }

    /// Returns the number of live objects in the arena.
    pub fn len(&self) -> usize {
        self.len
    }

    // Number of slots, live or vacant. Every handle the arena issued indexes below this.
    pub(crate) fn slots(&self) -> usize {
        self.blocks.len()
    }

    /// Returns `true` if the arena holds no live objects.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Releases every object in the arena. Previously issued handles become invalid.
    ///
    /// # Examples
    ///
    /// ```
    /// use rb_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new();
    /// let x = arena.allocate(0);
    /// arena.clear();
    /// assert_eq!(arena.get(&x), None);
    /// ```
    pub fn clear(&mut self) {
        self.blocks.clear();
        self.head = None;
        self.len = 0;
    }
}

impl<T> Default for TypedArena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<Handle> for TypedArena<T> {
    type Output = T;

    fn index(&self, handle: Handle) -> &Self::Output {
        self.get(&handle).expect("Error: handle does not refer to a live object.")
    }
}

impl<T> IndexMut<Handle> for TypedArena<T> {
    fn index_mut(&mut self, handle: Handle) -> &mut Self::Output {
        self.get_mut(&handle).expect("Error: handle does not refer to a live object.")
    }
}

#[cfg(test)]
mod tests {
    use super::Handle;
    use super::TypedArena;

    #[test]
    #[should_panic]
    fn test_free_invalid_block() {
        let mut arena: TypedArena<u32> = TypedArena::new();
        arena.free(&Handle { index: 0 });
    }

    #[test]
    #[should_panic]
    fn test_free_vacant_block() {
        let mut arena = TypedArena::new();
        let x = arena.allocate(0);
        arena.free(&x);
        arena.free(&x);
    }

    #[test]
    fn test_allocate() {
        let mut arena = TypedArena::new();
        assert_eq!(arena.allocate(0), Handle { index: 0 });
        assert_eq!(arena.allocate(0), Handle { index: 1 });
        assert_eq!(arena.allocate(0), Handle { index: 2 });
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn test_free_reuses_slots() {
        let mut arena = TypedArena::new();
        let x = arena.allocate(0);
        let y = arena.allocate(1);
        assert_eq!(arena.free(&x), 0);
        assert_eq!(arena.free(&y), 1);
        assert!(arena.is_empty());

        // most recently freed slot is reused first
        assert_eq!(arena.allocate(2), y);
        assert_eq!(arena.allocate(3), x);
        assert_eq!(arena.allocate(4), Handle { index: 2 });
    }

    #[test]
    fn test_get_vacant_block() {
        let mut arena = TypedArena::new();
        let x = arena.allocate(0);
        arena.free(&x);
        assert_eq!(arena.get(&x), None);
        assert_eq!(arena.get_mut(&x), None);
        assert_eq!(arena.get(&Handle { index: 5 }), None);
    }

    #[test]
    fn test_get_mut() {
        let mut arena = TypedArena::new();
        let x = arena.allocate(0);
        *arena.get_mut(&x).unwrap() = 1;
        assert_eq!(arena.get(&x), Some(&1));
    }

    #[test]
    fn test_clone_keeps_handles() {
        let mut arena = TypedArena::new();
        let x = arena.allocate(String::from("x"));
        let y = arena.allocate(String::from("y"));
        arena.free(&x);

        let mut clone = arena.clone();
        clone[y].push('!');
        assert_eq!(arena[y], "y");
        assert_eq!(clone[y], "y!");
        assert_eq!(clone.get(&x), None);
        assert_eq!(clone.allocate(String::from("z")), x);
    }

    #[test]
    fn test_slots_counts_vacant() {
        let mut arena = TypedArena::new();
        let x = arena.allocate(0);
        let y = arena.allocate(1);
        arena.free(&x);
        assert_eq!(arena.slots(), 2);
        assert!(y.index() < arena.slots());
    }

    #[test]
    fn test_clear() {
        let mut arena = TypedArena::new();
        let x = arena.allocate(0);
        arena.allocate(1);
        arena.clear();
        assert!(arena.is_empty());
        assert!(!arena.contains(&x));
        assert_eq!(arena.allocate(2), Handle { index: 0 });
    }
}
