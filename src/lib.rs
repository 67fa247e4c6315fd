//! double-hash-table: a string-keyed, byte-valued hash table using open
//! addressing with double hashing and prime-sized resizing.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small, deterministic open-addressing table whose probe
//!   sequence is reproducible bit for bit across implementations.
//! - Layers:
//!   - `prime`: primality test and next-prime search that size the
//!     backing array.
//!   - `hash_function`: polynomial string hash and the double-hash probe
//!     offset built from two instances of it (`PRIME_ONE`, `PRIME_TWO`).
//!   - `hash_table`: the slot array and the insert/search/delete/resize
//!     state machines.
//!
//! Slots
//! - Each slot is `Empty`, `Tombstone` or `Occupied(Entry)`. Deleting
//!   writes a tombstone. Searches stop at `Empty` only; a tombstone may sit
//!   in front of entries placed while it was still occupied.
//! - Inserts update a key in place wherever it sits on its probe chain and
//!   otherwise take the first empty or tombstoned slot on the chain.
//!
//! Sizing
//! - The table stores a `base_size` and allocates `next_prime(base_size)`
//!   slots, never fewer than `BASE_HASH_TABLE_SIZE`.
//! - Before an insert, a load above `MAX_LOAD` percent doubles the base
//!   size. Before a delete, a load below `MIN_LOAD` percent halves it. The
//!   checks use the load before the operation, so an insert can leave the
//!   table one entry above `MAX_LOAD`, and a delete can shrink the table
//!   even when the key is absent.
//! - Resizing builds a complete new slot array and then replaces the whole
//!   table value in one assignment. The move plan is computed before any
//!   entry is moved, so a shrink that cannot fit the live entries leaves
//!   the table untouched.
//!
//! Stationary keys
//! - The probe step is `hash(key, PRIME_TWO, size) + 1`, which equals
//!   `size` when the second hash is `size - 1`. Such a key probes only its
//!   home slot. Rebuilds place these keys first. When two of them share a
//!   home slot at the target size, growth doubles the target again, and an
//!   insert that finds its home slot taken grows the table until it fits.
//!   `InsertError::ProbeExhausted` is left for a base size that can no
//!   longer be doubled.
//!
//! Notes and non-goals
//! - Single-threaded: mutation takes `&mut self`; share behind a lock if
//!   needed.
//! - No persistence and no ordering guarantee for `iter`.
//! - Logging goes through the `log` facade when the `logging` feature is
//!   enabled and compiles away otherwise.

#![warn(clippy::all)]

#[cfg(feature = "logging")]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        log::debug!($($arg)*)
    };
}

#[cfg(feature = "logging")]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        log::warn!($($arg)*)
    };
}

#[cfg(not(feature = "logging"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        let _ = format_args!($($arg)*);
    };
}

#[cfg(not(feature = "logging"))]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        let _ = format_args!($($arg)*);
    };
}

mod dictionary;
mod error;
pub mod hash_function;
mod hash_table;
#[cfg(test)]
mod hash_table_proptest;
pub mod prime;
mod slot;

// Public surface
pub use dictionary::Dictionary;
pub use error::InsertError;
pub use hash_function::{hash, hash_function};
pub use hash_table::{HashTable, Iter};
pub use prime::{is_prime, next_prime, Primality};
pub use slot::Entry;

/// Default base size of a new table, and the floor for every resize.
pub const BASE_HASH_TABLE_SIZE: usize = 53;

/// Load percentage above which an insert first grows the table.
pub const MAX_LOAD: usize = 70;

/// Load percentage below which a delete first shrinks the table.
pub const MIN_LOAD: usize = 10;

/// Multiplier of the primary hash, which picks the home slot.
pub const PRIME_ONE: u64 = 151;

/// Multiplier of the secondary hash, which picks the probe step.
pub const PRIME_TWO: u64 = 17;
