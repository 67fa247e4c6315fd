/// The error type for [`HashTable::insert`](crate::HashTable::insert).
#[derive(thiserror::Error, Debug, Clone, Eq, PartialEq)]
pub enum InsertError {
    /// Every slot in the key's probe sequence is held by a different key.
    ///
    /// This happens when the second hash lands on `size - 1`, which makes
    /// the probe step a multiple of the table size so every attempt revisits
    /// the same slot. The table is left unchanged.
    #[error("no free slot for key {key:?} after probing all {size} slots")]
    ProbeExhausted { key: String, size: usize },
}
