use std::cmp::Ordering;

/// A key-value pair that is ordered and compared by its key alone.
#[derive(Clone, Debug)]
pub struct Entry<T, U> {
    pub key: T,
    pub value: U,
}

impl<T, U> Entry<T, U> {
    pub fn new(key: T, value: U) -> Self {
        Entry { key, value }
    }

    pub fn into_pair(self) -> (T, U) {
        (self.key, self.value)
    }
}

impl<T, U> Ord for Entry<T, U>
where
    T: Ord,
{
    fn cmp(&self, other: &Entry<T, U>) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl<T, U> PartialOrd for Entry<T, U>
where
    T: Ord,
{
    fn partial_cmp(&self, other: &Entry<T, U>) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T, U> PartialEq for Entry<T, U>
where
    T: Ord,
{
    fn eq(&self, other: &Entry<T, U>) -> bool {
        self.key == other.key
    }
}

impl<T, U> Eq for Entry<T, U> where T: Ord {}
