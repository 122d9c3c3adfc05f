//! ChainTable: string-keyed separate chaining over an entry arena.

use crate::config::{TableConfig, DEFAULT_CAPACITY, DEFAULT_MAX_LOAD_FACTOR};
use crate::counter::Counter;
use crate::error::TableError;
use crate::hash::{djb2, slot_of};
use slotmap::{DefaultKey, SlotMap};
use tracing::{debug, trace, warn};

/// Slot array growth multiplier.
const GROWTH_FACTOR: usize = 2;

type Slots = Vec<Option<DefaultKey>>;
type SlotAlloc = fn(usize) -> Result<Slots, TableError>;

#[derive(Debug)]
struct Entry<V> {
    key: Box<str>,
    value: V,
    hash: u64,
    next: Option<DefaultKey>,
}

/// Hash table from owned string keys to values of type `V`.
///
/// Each slot holds the head of a singly linked chain. Chain links are arena
/// keys into a `SlotMap` that owns every entry, so rehashing relinks entries
/// without moving or reallocating keys and values.
#[derive(Debug)]
pub struct ChainTable<V> {
    slots: Vec<Option<DefaultKey>>,
    entries: SlotMap<DefaultKey, Entry<V>>, // owns every entry in every chain
    max_load_factor: f64,
}

/// Snapshot of the table's shape, for diagnosing chain distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableStats {
    pub len: usize,
    pub capacity: usize,
    pub load_factor: f64,
    /// Slots whose chain is non-empty.
    pub used_slots: usize,
    pub longest_chain: usize,
}

impl<V> ChainTable<V> {
    /// Table with `DEFAULT_CAPACITY` slots and `DEFAULT_MAX_LOAD_FACTOR`.
    pub fn new() -> Self {
        Self {
            slots: vec![None; DEFAULT_CAPACITY],
            entries: SlotMap::with_key(),
            max_load_factor: DEFAULT_MAX_LOAD_FACTOR,
        }
    }

    /// Validates `config` and reserves its slot array.
    pub fn with_config(config: TableConfig) -> Result<Self, TableError> {
        config.validate()?;
        let slots = alloc_slots(config.initial_capacity)?;
        debug!(
            capacity = config.initial_capacity,
            max_load_factor = config.max_load_factor,
            "created chain table"
        );
        Ok(Self {
            slots,
            entries: SlotMap::with_key(),
            max_load_factor: config.max_load_factor,
        })
    }

    pub fn with_capacity(capacity: usize) -> Result<Self, TableError> {
        Self::with_config(TableConfig::new().with_initial_capacity(capacity))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of slots (chain heads).
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn max_load_factor(&self) -> f64 {
        self.max_load_factor
    }

    pub fn load_factor(&self) -> f64 {
        self.len() as f64 / self.capacity() as f64
    }

    fn find_hashed(&self, key: &str, hash: u64) -> Option<DefaultKey> {
        let mut cur = self.slots[slot_of(hash, self.slots.len())];
        while let Some(k) = cur {
            let e = self.entries.get(k)?;
            if e.hash == hash && &*e.key == key {
                return Some(k);
            }
            cur = e.next;
        }
        None
    }

    fn find(&self, key: &str) -> Option<DefaultKey> {
        self.find_hashed(key, djb2(key.as_bytes()))
    }

    /// Value stored under `key`, or `None` if the key was never inserted.
    pub fn lookup(&self, key: &str) -> Option<&V> {
        let k = self.find(key)?;
        self.entries.get(k).map(|e| &e.value)
    }

    pub fn lookup_mut(&mut self, key: &str) -> Option<&mut V> {
        let k = self.find(key)?;
        self.entries.get_mut(k).map(|e| &mut e.value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Stores `value` under `key`, overwriting an existing value in place.
    ///
    /// Returns the stored value. On error the table is unchanged.
    pub fn insert(&mut self, key: &str, value: V) -> Result<&mut V, TableError> {
        let hash = djb2(key.as_bytes());
        match self.find_hashed(key, hash) {
            Some(k) => {
                let e = &mut self.entries[k];
                e.value = value;
                Ok(&mut e.value)
            }
            None => self.insert_new(key, hash, value),
        }
    }

    /// Replaces an existing value with `update(&existing)`, or stores
    /// `default` for a new key. `update` is not called for new keys.
    pub fn update_or_insert<F>(
        &mut self,
        key: &str,
        default: V,
        update: F,
    ) -> Result<&mut V, TableError>
    where
        F: FnOnce(&V) -> V,
    {
        let hash = djb2(key.as_bytes());
        match self.find_hashed(key, hash) {
            Some(k) => {
                let e = &mut self.entries[k];
                e.value = update(&e.value);
                Ok(&mut e.value)
            }
            None => self.insert_new(key, hash, default),
        }
    }

    /// Adds one to the counter under `key`, starting new keys at one.
    pub fn increment_or_insert(&mut self, key: &str) -> Result<&mut V, TableError>
    where
        V: Counter,
    {
        self.update_or_insert(key, V::ONE, |v| v.increment())
    }

    fn insert_new(&mut self, key: &str, hash: u64, value: V) -> Result<&mut V, TableError> {
        self.insert_new_with(key, hash, value, alloc_slots)
    }

    fn insert_new_with(
        &mut self,
        key: &str,
        hash: u64,
        value: V,
        alloc: SlotAlloc,
    ) -> Result<&mut V, TableError> {
        let key = owned_key(key)?;
        self.grow_if_needed(alloc);

        let slot = slot_of(hash, self.slots.len());
        let next = self.slots[slot];
        let k = self.entries.insert(Entry {
            key,
            value,
            hash,
            next,
        });
        self.slots[slot] = Some(k);
        trace!(slot, len = self.entries.len(), "inserted entry");
        Ok(&mut self.entries[k].value)
    }

    // Grows before the insert that would cross the threshold, doubling until
    // `len + 1` fits. Failure is not fatal: the table keeps working at its
    // current capacity.
    fn grow_if_needed(&mut self, alloc: SlotAlloc) {
        let capacity = self.slots.len();
        let needed = (self.entries.len() + 1) as f64;
        let mut new_capacity = capacity;
        while needed > new_capacity as f64 * self.max_load_factor {
            let Some(next) = new_capacity.checked_mul(GROWTH_FACTOR) else {
                warn!(capacity, "slot count would overflow, resize abandoned");
                return;
            };
            new_capacity = next;
        }
        if new_capacity == capacity {
            return;
        }
        if let Err(err) = self.resize_with(new_capacity, alloc) {
            warn!(%err, capacity, len = self.entries.len(), "resize abandoned");
        }
    }

    /// Relinks every entry into a fresh slot array of `new_capacity` heads.
    /// The old array is only replaced once the new one is fully built.
    pub(crate) fn resize(&mut self, new_capacity: usize) -> Result<(), TableError> {
        self.resize_with(new_capacity, alloc_slots)
    }

    fn resize_with(&mut self, new_capacity: usize, alloc: SlotAlloc) -> Result<(), TableError> {
        let mut slots = alloc(new_capacity)?;
        for (k, e) in self.entries.iter_mut() {
            let slot = slot_of(e.hash, new_capacity);
            e.next = slots[slot];
            slots[slot] = Some(k);
        }
        let old = std::mem::replace(&mut self.slots, slots);
        debug!(
            old_capacity = old.len(),
            new_capacity,
            len = self.entries.len(),
            "resized chain table"
        );
        Ok(())
    }

    /// Releases every entry, keeping the current capacity.
    pub fn clear(&mut self) {
        for head in self.slots.iter_mut() {
            let mut cur = head.take();
            while let Some(k) = cur {
                cur = self.entries.remove(k).and_then(|e| e.next);
            }
        }
        debug_assert!(self.entries.is_empty());
    }

    /// Releases every entry, then the slot array and the table itself.
    pub fn destroy(mut self) {
        let len = self.len();
        self.clear();
        debug!(len, capacity = self.capacity(), "destroyed chain table");
    }

    /// Cursor positioned at the first entry, in slot-then-chain order.
    pub fn cursor(&self) -> Cursor<'_, V> {
        Cursor::new(self)
    }

    pub fn iter(&self) -> Cursor<'_, V> {
        self.cursor()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, v)| v)
    }

    fn chain_len(&self, head: Option<DefaultKey>) -> usize {
        let mut n = 0;
        let mut cur = head;
        while let Some(k) = cur {
            n += 1;
            cur = self.entries.get(k).and_then(|e| e.next);
        }
        n
    }

    pub fn stats(&self) -> TableStats {
        let mut used_slots = 0;
        let mut longest_chain = 0;
        for &head in &self.slots {
            let n = self.chain_len(head);
            if n > 0 {
                used_slots += 1;
            }
            longest_chain = longest_chain.max(n);
        }
        TableStats {
            len: self.len(),
            capacity: self.capacity(),
            load_factor: self.load_factor(),
            used_slots,
            longest_chain,
        }
    }
}

impl<V> Default for ChainTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, V> IntoIterator for &'a ChainTable<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Cursor<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.cursor()
    }
}

fn alloc_slots(n: usize) -> Result<Slots, TableError> {
    let mut slots = Vec::new();
    slots
        .try_reserve_exact(n)
        .map_err(|_| TableError::slots(n))?;
    slots.resize(n, None);
    Ok(slots)
}

fn owned_key(key: &str) -> Result<Box<str>, TableError> {
    let mut owned = String::new();
    owned
        .try_reserve_exact(key.len())
        .map_err(|_| TableError::key_bytes(key.len()))?;
    owned.push_str(key);
    Ok(owned.into_boxed_str())
}

/// Step-by-step traversal of a `ChainTable`.
///
/// Yields every entry exactly once: slots in index order, each chain from its
/// head. The cursor borrows the table, so the table cannot be mutated while
/// the cursor is alive. `restart` rewinds to the first entry.
pub struct Cursor<'a, V> {
    table: &'a ChainTable<V>,
    slot: usize,
    current: Option<DefaultKey>,
    remaining: usize,
}

impl<'a, V> Cursor<'a, V> {
    fn new(table: &'a ChainTable<V>) -> Self {
        let mut cursor = Cursor {
            table,
            slot: 0,
            current: None,
            remaining: 0,
        };
        cursor.restart();
        cursor
    }

    /// Rewinds to the first non-empty slot.
    pub fn restart(&mut self) {
        self.remaining = self.table.len();
        self.seek_from(0);
    }

    fn seek_from(&mut self, start: usize) {
        let table = self.table;
        self.current = None;
        self.slot = table.slots.len();
        for (i, head) in table.slots.iter().enumerate().skip(start) {
            if head.is_some() {
                self.slot = i;
                self.current = *head;
                return;
            }
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.current.is_none()
    }

    /// Current entry, then advance. `None` once every entry was yielded.
    pub fn next_entry(&mut self) -> Option<(&'a str, &'a V)> {
        let table = self.table;
        let e = table.entries.get(self.current?)?;
        match e.next {
            Some(next) => self.current = Some(next),
            None => self.seek_from(self.slot + 1),
        }
        self.remaining = self.remaining.saturating_sub(1);
        Some((&*e.key, &e.value))
    }
}

impl<'a, V> Iterator for Cursor<'a, V> {
    type Item = (&'a str, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.next_entry()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Cursor<'_, V> {}
