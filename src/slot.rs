//! Slot states of the backing array.

/// A stored key/value pair.
///
/// Entries are never mutated in place; re-inserting a key replaces the whole
/// entry.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Entry {
    pub(crate) key: String,
    pub(crate) value: Vec<u8>,
}

impl Entry {
    pub(crate) fn new(key: String, value: Vec<u8>) -> Self {
        Self { key, value }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &[u8] {
        &self.value
    }

    pub fn into_parts(self) -> (String, Vec<u8>) {
        (self.key, self.value)
    }
}

/// One cell of the table.
///
/// `Tombstone` and `Empty` both read as "no entry here", but only `Empty`
/// ends a probe: a tombstone may sit in front of live entries that were
/// placed while it was still occupied.
#[derive(Clone, Debug, Default)]
pub(crate) enum Slot {
    #[default]
    Empty,
    Tombstone,
    Occupied(Entry),
}

impl Slot {
    #[inline]
    pub(crate) fn entry(&self) -> Option<&Entry> {
        match self {
            Slot::Occupied(e) => Some(e),
            Slot::Empty | Slot::Tombstone => None,
        }
    }

    #[inline]
    pub(crate) fn into_entry(self) -> Option<Entry> {
        match self {
            Slot::Occupied(e) => Some(e),
            Slot::Empty | Slot::Tombstone => None,
        }
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }
}
