//! HashTable: open addressing over a prime-sized slot array.

use crate::error::InsertError;
use crate::hash_function::ProbeSequence;
use crate::prime::next_prime;
use crate::slot::{Entry, Slot};
use crate::{BASE_HASH_TABLE_SIZE, MAX_LOAD, MIN_LOAD};
use core::fmt;
use core::mem;

/// String-keyed, byte-valued hash table using double hashing.
///
/// The backing array always has a prime length of at least
/// [`BASE_HASH_TABLE_SIZE`]. The table grows before an insert that finds
/// the load above [`MAX_LOAD`] percent and shrinks before a delete that
/// finds it below [`MIN_LOAD`] percent.
#[derive(Clone)]
pub struct HashTable {
    base_size: usize,
    count: usize,
    slots: Vec<Slot>,
}

impl HashTable {
    /// Create a table with the default base size of [`BASE_HASH_TABLE_SIZE`].
    pub fn new() -> Self {
        Self::with_base_size(BASE_HASH_TABLE_SIZE)
    }

    /// Create a table of `next_prime(base_size)` slots.
    ///
    /// `base_size` is raised to [`BASE_HASH_TABLE_SIZE`] if smaller.
    pub fn with_base_size(base_size: usize) -> Self {
        let base_size = base_size.max(BASE_HASH_TABLE_SIZE);
        let size = next_prime(base_size);
        Self {
            base_size,
            count: 0,
            slots: vec![Slot::Empty; size],
        }
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of slots in the backing array. Always prime.
    pub fn size(&self) -> usize {
        self.slots.len()
    }

    pub fn base_size(&self) -> usize {
        self.base_size
    }

    /// Current load as an integer percentage of `size`.
    pub fn load(&self) -> usize {
        self.count * 100 / self.size()
    }

    /// Insert `value` under `key`, returning the previous value if the key
    /// was already present.
    ///
    /// If the load is above [`MAX_LOAD`] before the insert, the table grows
    /// first. If the key's probe sequence holds no free slot, the table keeps
    /// growing until it does. [`InsertError::ProbeExhausted`] is returned
    /// only when the base size can no longer be doubled; the table keeps its
    /// entries on error.
    pub fn insert<K, V>(&mut self, key: K, value: V) -> Result<Option<Vec<u8>>, InsertError>
    where
        K: Into<String>,
        V: Into<Vec<u8>>,
    {
        if self.load() > MAX_LOAD {
            self.resize_up();
        }
        let mut entry = Entry::new(key.into(), value.into());
        loop {
            entry = match self.place(entry) {
                Ok(old) => return Ok(old),
                Err(entry) => entry,
            };
            log_debug!("no free slot for key {:?}, growing and retrying", entry.key);
            let grown = match self.base_size.checked_mul(2) {
                Some(base_size) => self.resize(base_size),
                None => false,
            };
            if !grown {
                break;
            }
        }
        log_warn!(
            "probe exhausted for key {:?} in table of {} slots",
            entry.key,
            self.size()
        );
        Err(InsertError::ProbeExhausted {
            key: entry.key,
            size: self.size(),
        })
    }

    // Updates the key in place if it is anywhere on its probe chain,
    // otherwise writes to the first empty or tombstoned slot on the chain.
    // Hands the entry back when neither exists.
    fn place(&mut self, entry: Entry) -> Result<Option<Vec<u8>>, Entry> {
        let size = self.size();
        let mut free = None;
        for idx in ProbeSequence::new(entry.key.as_bytes(), size) {
            match &mut self.slots[idx] {
                Slot::Empty => {
                    free.get_or_insert(idx);
                    break;
                }
                Slot::Tombstone => {
                    free.get_or_insert(idx);
                }
                Slot::Occupied(existing) if existing.key == entry.key => {
                    let old = mem::replace(existing, entry);
                    return Ok(Some(old.value));
                }
                Slot::Occupied(_) => {}
            }
        }

        match free {
            Some(idx) => {
                self.slots[idx] = Slot::Occupied(entry);
                self.count += 1;
                Ok(None)
            }
            None => Err(entry),
        }
    }

    fn find_index(&self, key: &str) -> Option<usize> {
        for idx in ProbeSequence::new(key.as_bytes(), self.size()) {
            match &self.slots[idx] {
                Slot::Empty => return None,
                Slot::Occupied(e) if e.key == key => return Some(idx),
                Slot::Occupied(_) | Slot::Tombstone => {}
            }
        }
        None
    }

    /// Look up the entry stored under `key`.
    pub fn search(&self, key: &str) -> Option<&Entry> {
        self.find_index(key).and_then(|idx| self.slots[idx].entry())
    }

    pub fn get(&self, key: &str) -> Option<&[u8]> {
        self.search(key).map(Entry::value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.find_index(key).is_some()
    }

    /// Remove `key`, leaving a tombstone in its slot.
    ///
    /// The shrink check runs before the lookup, so a table below
    /// [`MIN_LOAD`] shrinks even when `key` is absent.
    pub fn delete(&mut self, key: &str) -> Option<Entry> {
        if self.load() < MIN_LOAD {
            self.resize_down();
        }
        let idx = self.find_index(key)?;
        let removed = mem::replace(&mut self.slots[idx], Slot::Tombstone).into_entry();
        self.count -= 1;
        removed
    }

    /// Double the base size and rebuild.
    ///
    /// If two stationary keys would share a home slot at the doubled size,
    /// the base size keeps doubling until every live entry has a slot.
    pub fn resize_up(&mut self) {
        if let Some(base_size) = self.base_size.checked_mul(2) {
            self.resize(base_size);
        }
    }

    /// Halve the base size and rebuild. No-op if that would go below
    /// [`BASE_HASH_TABLE_SIZE`] or if the live entries do not fit.
    pub fn resize_down(&mut self) {
        self.resize(self.base_size / 2);
    }

    // Returns false when the table was left as it was. A growing resize
    // doubles its target until a layout exists; a shrinking one gives up.
    fn resize(&mut self, mut base_size: usize) -> bool {
        if base_size < BASE_HASH_TABLE_SIZE {
            log_debug!(
                "resize to base size {} skipped, floor is {}",
                base_size,
                BASE_HASH_TABLE_SIZE
            );
            return false;
        }
        let growing = base_size > self.base_size;
        let from = self.size();
        log_debug!(
            "resizing table of {} slots to base size {} ({} live entries)",
            from,
            base_size,
            self.count
        );
        let layout = loop {
            let size = next_prime(base_size);
            if let Some(layout) = self.plan(size) {
                break layout;
            }
            match base_size.checked_mul(2) {
                Some(next) if growing => base_size = next,
                _ => {
                    log_warn!(
                        "resize to {} slots abandoned: {} live entries do not fit",
                        size,
                        self.count
                    );
                    return false;
                }
            }
        };

        let slots: Vec<Slot> = layout
            .into_iter()
            .map(|src| match src {
                Some(old_idx) => mem::take(&mut self.slots[old_idx]),
                None => Slot::Empty,
            })
            .collect();
        *self = HashTable {
            base_size,
            count: self.count,
            slots,
        };
        log_debug!(
            "resized table from {} to {} slots (base size {})",
            from,
            self.size(),
            base_size
        );
        true
    }

    // Maps each new slot to the old slot whose entry moves there, without
    // touching the table. A fresh table has no tombstones and keys are
    // unique, so insertion reduces to the first empty slot. Stationary keys
    // can only use their home slot; they go first. None when some entry has
    // no slot: more entries than `size`, or two stationary keys sharing a
    // home slot.
    fn plan(&self, size: usize) -> Option<Vec<Option<usize>>> {
        if self.count > size {
            return None;
        }
        let mut pending: Vec<(usize, ProbeSequence)> = self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(old_idx, slot)| {
                let entry = slot.entry()?;
                Some((old_idx, ProbeSequence::new(entry.key.as_bytes(), size)))
            })
            .collect();
        pending.sort_by_key(|(_, probe)| !probe.is_stationary());

        let mut layout: Vec<Option<usize>> = vec![None; size];
        for (old_idx, mut probe) in pending {
            let new_idx = probe.find(|&i| layout[i].is_none())?;
            layout[new_idx] = Some(old_idx);
        }
        Some(layout)
    }

    #[cfg(test)]
    pub(crate) fn slots_for_test(&self) -> core::slice::Iter<'_, Slot> {
        self.slots.iter()
    }

    /// Iterate over live entries. The order is unspecified.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            slots: self.slots.iter(),
            remaining: self.count,
        }
    }
}

impl Default for HashTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HashTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashTable")
            .field("size", &self.size())
            .field("base_size", &self.base_size)
            .field("count", &self.count)
            .finish()
    }
}

/// Iterator over the live entries of a [`HashTable`].
pub struct Iter<'a> {
    slots: core::slice::Iter<'a, Slot>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Entry;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.slots.by_ref().find_map(Slot::entry)?;
        self.remaining -= 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a HashTable {
    type Item = &'a Entry;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V> Extend<(K, V)> for HashTable
where
    K: Into<String>,
    V: Into<Vec<u8>>,
{
    /// Inserts each pair in turn.
    ///
    /// A pair rejected with [`InsertError::ProbeExhausted`] is skipped. That
    /// only happens once the base size can no longer be doubled; use
    /// [`HashTable::insert`] to observe the error.
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            if let Err(err) = self.insert(k, v) {
                log_warn!("skipping entry during extend: {}", err);
            }
        }
    }
}

impl<K, V> FromIterator<(K, V)> for HashTable
where
    K: Into<String>,
    V: Into<Vec<u8>>,
{
    /// Builds a default-sized table and [`extend`](Extend::extend)s it, so
    /// the same skip rule applies.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = HashTable::new();
        table.extend(iter);
        table
    }
}
