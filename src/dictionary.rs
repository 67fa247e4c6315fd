use crate::error::InsertError;
use crate::hash_table::HashTable;
use crate::slot::Entry;

/// The abstract string-to-bytes dictionary.
///
/// Lets callers be written against the operations rather than against
/// [`HashTable`] itself.
pub trait Dictionary {
    /// Store `value` under `key`, returning the value it replaced.
    fn insert(&mut self, key: String, value: Vec<u8>) -> Result<Option<Vec<u8>>, InsertError>;

    fn search(&self, key: &str) -> Option<&Entry>;

    /// Remove `key`. Absent keys are a no-op that returns `None`.
    fn delete(&mut self, key: &str) -> Option<Entry>;
}

impl Dictionary for HashTable {
    fn insert(&mut self, key: String, value: Vec<u8>) -> Result<Option<Vec<u8>>, InsertError> {
        HashTable::insert(self, key, value)
    }

    fn search(&self, key: &str) -> Option<&Entry> {
        HashTable::search(self, key)
    }

    fn delete(&mut self, key: &str) -> Option<Entry> {
        HashTable::delete(self, key)
    }
}
