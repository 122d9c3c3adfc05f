//! chain-table: a single-threaded, string-keyed hash table with separate
//! chaining, plus the word-frequency counter built on it.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small table whose collision handling, growth and traversal can
//!   each be reasoned about on their own.
//! - Layers:
//!   - `hash`: djb2 over the key's bytes; slot = hash mod capacity.
//!   - `ChainTable<V>`: slot array of chain heads over a `SlotMap` arena
//!     that owns every entry. Chains link arena keys, not pointers.
//!   - `word_freq`: cleans tokens, counts them with
//!     `increment_or_insert`, and ranks the result.
//!
//! Constraints
//! - Keys are owned strings compared byte for byte; values are opaque `V`.
//! - No deletion of single keys; entries live until `clear`/`destroy`/drop.
//! - Single-threaded: no locks. Borrowing rules serialize writers and
//!   readers, and a `Cursor` holds a shared borrow so the table cannot change
//!   under it.
//!
//! Growth
//! - Before a new key is inserted, if `len + 1` would exceed
//!   `capacity * max_load_factor`, the slot array doubles until it no
//!   longer would.
//! - A resize builds the new slot array completely before swapping it in.
//!   If it cannot be allocated, the table keeps its old array and the insert
//!   still succeeds above the load factor.
//! - Each entry caches its hash, so rehashing never rereads key bytes.
//!
//! Errors
//! - `TableError::InvalidConfiguration`: zero capacity or a load factor
//!   outside `(0, 1]`, rejected at creation.
//! - `TableError::AllocationFailure`: a slot array or owned key could not be
//!   reserved; the table is unchanged.
//! - A missing key is `None`, never an error.

pub mod chain_table;
mod chain_table_proptest;
pub mod config;
pub mod counter;
pub mod error;
pub mod hash;
pub mod word_freq;

// Public surface
pub use chain_table::{ChainTable, Cursor, TableStats};
pub use config::{TableConfig, DEFAULT_CAPACITY, DEFAULT_MAX_LOAD_FACTOR};
pub use counter::Counter;
pub use error::TableError;
pub use word_freq::{FreqError, WordCount};
