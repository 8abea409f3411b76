//! An open-addressing hash table with quadratic probing.
//!
//! [`HashTable<V>`] is the storage layer under [`HashMap`]. It never hashes
//! anything itself: every operation takes a precomputed `u64` digest and an
//! equality predicate, and the digest is stored next to the value so that
//! rebuilds never call back into user code.
//!
//! Slots are `Empty`, `Occupied` or `Tombstone`. Removal leaves a tombstone
//! so probe sequences that passed through the slot stay intact. Tombstones
//! are never reused; they disappear when the table is rebuilt.
//!
//! Rebuild policy:
//! - Before an insert (or an [`entry`] call), a load factor above 0.46 grows
//!   the table to twice its capacity.
//! - After a removal, a load factor above 0.30 rebuilds the table at the
//!   smallest capacity above `capacity / 1.3` whose load factor is at most
//!   0.36.
//!
//! [`HashMap`]: crate::HashMap
//! [`entry`]: HashTable::entry

use alloc::vec::Vec;
use core::fmt::Debug;
use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::mem;

use crate::error::CursorError;

/// Capacity used by [`HashTable::new`] and [`HashMap::new`].
///
/// [`HashMap::new`]: crate::HashMap::new
pub const DEFAULT_CAPACITY: usize = 113;

/// Smallest slot count a table is ever built with. With the grow threshold
/// below 0.5, two slots always leave one `Empty` slot after an insert.
const MIN_CAPACITY: usize = 2;

const GROW_LOAD_FACTOR: f64 = 0.46;
const SHRINK_TRIGGER_LOAD_FACTOR: f64 = 0.30;
const SHRINK_TARGET_LOAD_FACTOR: f64 = 0.36;
const SHRINK_DIVISOR: f64 = 1.3;

#[inline(always)]
fn load_factor(populated: usize, capacity: usize) -> f64 {
    populated as f64 / capacity as f64
}

/// Capacity chosen by a shrink rebuild: start just above `capacity / 1.3`
/// and walk upward until `populated` fits at a load factor of 0.36.
///
/// When the residual load is above 0.36 the result is larger than
/// `capacity`.
fn shrink_target(populated: usize, capacity: usize) -> usize {
    let mut candidate = (capacity as f64 / SHRINK_DIVISOR) as usize;
    loop {
        candidate += 1;
        if load_factor(populated, candidate) <= SHRINK_TARGET_LOAD_FACTOR {
            return candidate.max(MIN_CAPACITY);
        }
    }
}

fn empty_slots<V>(capacity: usize) -> Vec<Slot<V>> {
    let mut slots = Vec::with_capacity(capacity);
    slots.resize_with(capacity, || Slot::Empty);
    slots
}

#[derive(Clone)]
enum Slot<V> {
    Empty,
    Occupied { hash: u64, value: V },
    Tombstone,
}

impl<V> Slot<V> {
    #[inline(always)]
    fn is_occupied(&self) -> bool {
        matches!(self, Slot::Occupied { .. })
    }
}

/// The quadratic probe sequence for a digest.
///
/// Starts at `hash % capacity` and moves by 1, 4, 9, 16, ... slots, wrapping
/// around. The sequence is cut off after `capacity` positions; quadratic
/// steps modulo an arbitrary capacity are not guaranteed to reach every slot,
/// and an unbounded walk over a table with no reachable `Empty` slot would
/// never end.
struct ProbeSeq {
    pos: usize,
    step: usize,
    remaining: usize,
    capacity: usize,
}

impl ProbeSeq {
    #[inline(always)]
    fn new(hash: u64, capacity: usize) -> Self {
        debug_assert!(capacity > 0);
        Self {
            pos: (hash % capacity as u64) as usize,
            step: 1,
            remaining: capacity,
            capacity,
        }
    }
}

impl Iterator for ProbeSeq {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let pos = self.pos;
        let stride = ((self.step as u128 * self.step as u128) % self.capacity as u128) as usize;
        self.pos = (self.pos + stride) % self.capacity;
        self.step += 1;
        Some(pos)
    }
}

enum Probe {
    Found(usize),
    Vacant(usize),
    Exhausted,
}

/// A detached reference to a slot of a [`HashTable`].
///
/// Unlike a [`Cursor`], a position does not borrow the table, so it can be
/// kept across mutations. The table checks it on every use: a position taken
/// before a rebuild reports [`CursorError::Invalidated`], one whose element
/// was removed reports [`CursorError::Vacated`], and the end position reports
/// [`CursorError::End`] when read or advanced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    index: usize,
    epoch: u64,
}

impl Position {
    /// The slot index this position refers to. The end position has an
    /// index equal to the table's capacity.
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Debug statistics for hash table analysis.
///
/// Only available with the `stats` feature.
#[cfg(feature = "stats")]
#[derive(Debug, Clone)]
pub struct DebugStats {
    /// Number of live elements.
    pub populated: usize,
    /// Number of slots.
    pub capacity: usize,
    /// Number of tombstoned slots.
    pub tombstones: usize,
    /// Number of slots that have never been written since the last rebuild.
    pub empty_slots: usize,
    /// `populated / capacity`.
    pub load_factor: f64,
    /// `(populated + tombstones) / capacity`: the share of slots a probe
    /// cannot stop at.
    pub slot_utilization: f64,
    /// Longest probe sequence needed to reach a live element.
    pub max_probe_length: usize,
    /// Mean probe sequence length over live elements.
    pub mean_probe_length: f64,
}

#[cfg(feature = "stats")]
impl DebugStats {
    /// Pretty-print the debug statistics.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== Hash Table Debug Statistics ===");
        println!(
            "Population: {}/{} ({:.2}% load factor)",
            self.populated,
            self.capacity,
            self.load_factor * 100.0
        );
        println!(
            "Slot Usage: {} live + {} tombstones, {} empty ({:.2}% utilization)",
            self.populated,
            self.tombstones,
            self.empty_slots,
            self.slot_utilization * 100.0
        );
        println!(
            "Probe Length: max {}, mean {:.2}",
            self.max_probe_length, self.mean_probe_length
        );
    }
}

/// Number of live elements per probe length.
///
/// `counts()[n]` is the number of elements found after stepping `n` times
/// along their probe sequence; zero means the element sits in its home slot.
///
/// Only available with the `stats` feature.
#[cfg(feature = "stats")]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeHistogram {
    counts: Vec<usize>,
}

#[cfg(feature = "stats")]
impl ProbeHistogram {
    /// Element counts indexed by probe length.
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// Total number of elements in the histogram.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Longest probe length with at least one element, `None` when empty.
    pub fn max_probe_length(&self) -> Option<usize> {
        self.counts.iter().rposition(|&count| count != 0)
    }

    /// Print one line per probe length.
    #[cfg(feature = "std")]
    pub fn print(&self) {
        println!("=== Probe Length Histogram ===");
        let total = self.total().max(1);
        for (length, count) in self.counts.iter().enumerate() {
            println!(
                "{:>4}: {:>8} ({:.2}%)",
                length,
                count,
                *count as f64 / total as f64 * 100.0
            );
        }
    }
}

/// An open-addressing hash table using quadratic probing and tombstones.
///
/// `HashTable<V>` stores values of type `V`. Callers supply the digest and an
/// equality predicate for each operation, which lets the same table back maps
/// with any key type and any [`HashProvider`].
///
/// [`HashProvider`]: crate::digest::HashProvider
///
/// ## Example
///
/// ```rust
/// use quad_hash::digest::Hashable;
/// use quad_hash::hash_table::Entry;
/// use quad_hash::hash_table::HashTable;
///
/// #[derive(Debug, PartialEq)]
/// struct Person {
///     id: u64,
///     name: String,
/// }
///
/// let mut table = HashTable::new();
/// let hash = 123u64.digest();
///
/// match table.entry(hash, |p: &Person| p.id == 123) {
///     Entry::Vacant(entry) => {
///         entry.insert(Person {
///             id: 123,
///             name: "Alice".to_string(),
///         });
///     }
///     Entry::Occupied(_) => unreachable!(),
/// }
///
/// assert_eq!(table.find(hash, |p| p.id == 123).map(|p| p.name.as_str()), Some("Alice"));
/// ```
#[derive(Clone)]
pub struct HashTable<V> {
    slots: Vec<Slot<V>>,
    populated: usize,
    tombstones: usize,
    epoch: u64,
}

impl<V> Debug for HashTable<V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        use alloc::string::String;

        let popmap = self
            .slots
            .iter()
            .map(|slot| match slot {
                Slot::Empty => '.',
                Slot::Occupied { .. } => '#',
                Slot::Tombstone => 'x',
            })
            .collect::<String>();

        f.debug_struct("HashTable")
            .field("populated", &self.populated)
            .field("capacity", &self.slots.len())
            .field("tombstones", &self.tombstones)
            .field("epoch", &self.epoch)
            .field("popmap", &popmap)
            .finish()
    }
}

impl<V> Default for HashTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> HashTable<V> {
    /// Creates an empty table with [`DEFAULT_CAPACITY`] slots.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use quad_hash::hash_table::HashTable;
    /// let table: HashTable<u32> = HashTable::new();
    /// assert_eq!(table.capacity(), 113);
    /// ```
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty table with exactly `capacity` slots (at least two).
    ///
    /// The table grows before an insert that would start above a 0.46 load
    /// factor, so it holds up to roughly `0.46 * capacity` elements before
    /// the first rebuild.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use quad_hash::hash_table::HashTable;
    /// let table: HashTable<String> = HashTable::with_capacity(31);
    /// assert_eq!(table.capacity(), 31);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: empty_slots(capacity.max(MIN_CAPACITY)),
            populated: 0,
            tombstones: 0,
            epoch: 0,
        }
    }

    /// Returns the number of elements in the table.
    pub fn len(&self) -> usize {
        self.populated
    }

    /// Returns `true` if the table contains no elements.
    pub fn is_empty(&self) -> bool {
        self.populated == 0
    }

    /// Returns the number of slots.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of tombstoned slots awaiting the next rebuild.
    pub fn tombstones(&self) -> usize {
        self.tombstones
    }

    /// Returns `len() / capacity()`.
    pub fn load_factor(&self) -> f64 {
        load_factor(self.populated, self.slots.len())
    }

    #[inline]
    fn probe(&self, hash: u64, eq: impl Fn(&V) -> bool) -> Probe {
        for index in ProbeSeq::new(hash, self.slots.len()) {
            match &self.slots[index] {
                Slot::Empty => return Probe::Vacant(index),
                Slot::Occupied {
                    hash: stored,
                    value,
                } if *stored == hash && eq(value) => return Probe::Found(index),
                _ => {}
            }
        }
        Probe::Exhausted
    }

    #[inline]
    fn find_index(&self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<usize> {
        match self.probe(hash, eq) {
            Probe::Found(index) => Some(index),
            Probe::Vacant(_) | Probe::Exhausted => None,
        }
    }

    /// Returns a reference to the value matching `hash` and `eq`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use quad_hash::hash_table::HashTable;
    /// let mut table = HashTable::new();
    /// table.entry(7, |&v: &u32| v == 7).or_insert(7);
    ///
    /// assert_eq!(table.find(7, |&v| v == 7), Some(&7));
    /// assert_eq!(table.find(8, |&v| v == 8), None);
    /// ```
    pub fn find(&self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<&V> {
        self.find_index(hash, eq).map(|index| self.value_at(index))
    }

    /// Returns a mutable reference to the value matching `hash` and `eq`.
    pub fn find_mut(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<&mut V> {
        let index = self.find_index(hash, eq)?;
        Some(self.value_at_mut(index))
    }

    /// Returns a cursor on the value matching `hash` and `eq`, or the end
    /// cursor when there is none.
    pub fn find_cursor(&self, hash: u64, eq: impl Fn(&V) -> bool) -> Cursor<'_, V> {
        let index = self.find_index(hash, eq).unwrap_or(self.slots.len());
        Cursor { table: self, index }
    }

    /// Gets an entry for the given hash and equality predicate.
    ///
    /// If the load factor is above 0.46 the table is grown first, even when
    /// the entry turns out to be occupied.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use quad_hash::hash_table::Entry;
    /// # use quad_hash::hash_table::HashTable;
    /// let mut table = HashTable::new();
    ///
    /// match table.entry(1, |&(k, _): &(u64, &str)| k == 1) {
    ///     Entry::Vacant(entry) => {
    ///         entry.insert((1, "one"));
    ///     }
    ///     Entry::Occupied(mut entry) => {
    ///         entry.get_mut().1 = "uno";
    ///     }
    /// }
    ///
    /// assert_eq!(table.find(1, |&(k, _)| k == 1), Some(&(1, "one")));
    /// ```
    pub fn entry(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Entry<'_, V> {
        self.maybe_grow();
        loop {
            match self.probe(hash, &eq) {
                Probe::Found(index) => {
                    return Entry::Occupied(OccupiedEntry { table: self, index });
                }
                Probe::Vacant(index) => {
                    return Entry::Vacant(VacantEntry {
                        table: self,
                        hash,
                        index,
                    });
                }
                Probe::Exhausted => self.rebuild_after_exhaustion(),
            }
        }
    }

    /// Gets an entry, applying the grow check only when no value matches.
    ///
    /// Looking up a present value through this method never rebuilds the
    /// table, so outstanding [`Position`]s stay valid on a hit.
    pub fn entry_grow_on_miss(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Entry<'_, V> {
        if let Some(index) = self.find_index(hash, &eq) {
            return Entry::Occupied(OccupiedEntry { table: self, index });
        }
        self.entry(hash, eq)
    }

    /// Removes and returns the value matching `hash` and `eq`.
    ///
    /// The slot becomes a tombstone. If the remaining load factor is above
    /// 0.30 the table is rebuilt afterwards.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use quad_hash::hash_table::HashTable;
    /// let mut table = HashTable::new();
    /// table.entry(42, |&v: &u64| v == 42).or_insert(42);
    ///
    /// assert_eq!(table.remove(42, |&v| v == 42), Some(42));
    /// assert!(table.is_empty());
    /// assert_eq!(table.remove(42, |&v| v == 42), None);
    /// ```
    pub fn remove(&mut self, hash: u64, eq: impl Fn(&V) -> bool) -> Option<V> {
        let index = self.find_index(hash, eq)?;
        Some(self.remove_at(index))
    }

    /// Removes all elements, keeping the capacity.
    ///
    /// Outstanding [`Position`]s are invalidated.
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = Slot::Empty;
        }
        self.populated = 0;
        self.tombstones = 0;
        self.epoch = self.epoch.wrapping_add(1);
    }

    /// Returns an iterator over all values in slot order.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            slots: self.slots.iter(),
            remaining: self.populated,
        }
    }

    /// Returns an iterator over mutable references to all values in slot
    /// order.
    pub fn iter_mut(&mut self) -> IterMut<'_, V> {
        IterMut {
            slots: self.slots.iter_mut(),
            remaining: self.populated,
        }
    }

    /// Removes all values and returns them in slot order.
    ///
    /// The table is empty as soon as `drain` returns and keeps its capacity.
    /// Outstanding [`Position`]s are invalidated.
    pub fn drain(&mut self) -> Drain<'_, V> {
        let capacity = self.slots.len();
        let slots = mem::replace(&mut self.slots, empty_slots(capacity));
        let remaining = mem::replace(&mut self.populated, 0);
        self.tombstones = 0;
        self.epoch = self.epoch.wrapping_add(1);

        Drain {
            inner: IntoIter {
                slots: slots.into_iter(),
                remaining,
            },
            _table: PhantomData,
        }
    }

    /// Returns a cursor on the first live element, or the end cursor when
    /// the table is empty.
    pub fn cursor_begin(&self) -> Cursor<'_, V> {
        Cursor {
            table: self,
            index: self.next_occupied(0),
        }
    }

    /// Returns the end cursor.
    pub fn cursor_end(&self) -> Cursor<'_, V> {
        Cursor {
            table: self,
            index: self.slots.len(),
        }
    }

    /// Returns the position of the first live element, or the end position.
    pub fn begin(&self) -> Position {
        self.cursor_begin().position()
    }

    /// Returns the end position.
    pub fn end(&self) -> Position {
        self.cursor_end().position()
    }

    /// Re-attaches a cursor to `position`.
    ///
    /// The end position yields the end cursor.
    ///
    /// # Errors
    ///
    /// [`CursorError::Invalidated`] if the table was rebuilt since the
    /// position was taken, [`CursorError::Vacated`] if its element was
    /// removed.
    pub fn cursor_at(&self, position: Position) -> Result<Cursor<'_, V>, CursorError> {
        self.check_epoch(position)?;
        if position.index < self.slots.len() && !self.slots[position.index].is_occupied() {
            return Err(CursorError::Vacated);
        }
        Ok(Cursor {
            table: self,
            index: position.index,
        })
    }

    /// Returns the value at `position`.
    ///
    /// # Errors
    ///
    /// [`CursorError::End`] for the end position, otherwise as
    /// [`cursor_at`](Self::cursor_at).
    pub fn get_at(&self, position: Position) -> Result<&V, CursorError> {
        let index = self.occupied_index(position)?;
        Ok(self.value_at(index))
    }

    /// Returns a mutable reference to the value at `position`.
    ///
    /// # Errors
    ///
    /// As [`get_at`](Self::get_at).
    pub fn get_at_mut(&mut self, position: Position) -> Result<&mut V, CursorError> {
        let index = self.occupied_index(position)?;
        Ok(self.value_at_mut(index))
    }

    /// Returns the position of the next live element after `position`, or
    /// the end position.
    ///
    /// # Errors
    ///
    /// As [`get_at`](Self::get_at): advancing the end position is
    /// [`CursorError::End`].
    pub fn next_position(&self, position: Position) -> Result<Position, CursorError> {
        let index = self.occupied_index(position)?;
        Ok(Position {
            index: self.next_occupied(index + 1),
            epoch: self.epoch,
        })
    }

    /// Removes the value at `position`, with the same tombstone and rebuild
    /// behavior as [`remove`](Self::remove).
    ///
    /// # Errors
    ///
    /// As [`get_at`](Self::get_at).
    pub fn remove_at_position(&mut self, position: Position) -> Result<V, CursorError> {
        let index = self.occupied_index(position)?;
        Ok(self.remove_at(index))
    }

    fn check_epoch(&self, position: Position) -> Result<(), CursorError> {
        if position.epoch != self.epoch || position.index > self.slots.len() {
            return Err(CursorError::Invalidated);
        }
        Ok(())
    }

    fn occupied_index(&self, position: Position) -> Result<usize, CursorError> {
        self.check_epoch(position)?;
        match self.slots.get(position.index) {
            None => Err(CursorError::End),
            Some(slot) if slot.is_occupied() => Ok(position.index),
            Some(_) => Err(CursorError::Vacated),
        }
    }

    fn next_occupied(&self, from: usize) -> usize {
        self.slots
            .iter()
            .enumerate()
            .skip(from)
            .find(|(_, slot)| slot.is_occupied())
            .map_or(self.slots.len(), |(index, _)| index)
    }

    fn value_at(&self, index: usize) -> &V {
        match &self.slots[index] {
            Slot::Occupied { value, .. } => value,
            _ => unreachable!("slot {index} is not occupied"),
        }
    }

    fn value_at_mut(&mut self, index: usize) -> &mut V {
        match &mut self.slots[index] {
            Slot::Occupied { value, .. } => value,
            _ => unreachable!("slot {index} is not occupied"),
        }
    }

    fn occupy(&mut self, index: usize, hash: u64, value: V) -> &mut V {
        debug_assert!(matches!(self.slots[index], Slot::Empty));
        self.populated += 1;
        self.slots[index] = Slot::Occupied { hash, value };
        self.value_at_mut(index)
    }

    fn remove_at(&mut self, index: usize) -> V {
        let Slot::Occupied { value, .. } = mem::replace(&mut self.slots[index], Slot::Tombstone)
        else {
            unreachable!("slot {index} is not occupied");
        };
        self.populated -= 1;
        self.tombstones += 1;
        self.maybe_shrink();
        value
    }

    fn maybe_grow(&mut self) {
        if self.load_factor() > GROW_LOAD_FACTOR {
            let new_capacity = self.slots.len() * 2;
            rebuild_event!(
                old_capacity = self.slots.len(),
                new_capacity,
                populated = self.populated,
                "grow rebuild"
            );
            self.rebuild(new_capacity);
        }
    }

    fn maybe_shrink(&mut self) {
        if self.load_factor() > SHRINK_TRIGGER_LOAD_FACTOR {
            let new_capacity = shrink_target(self.populated, self.slots.len());
            rebuild_event!(
                old_capacity = self.slots.len(),
                new_capacity,
                populated = self.populated,
                "shrink rebuild"
            );
            self.rebuild(new_capacity);
        }
    }

    /// Called when a probe sequence for an insert met no `Empty` slot.
    /// Tombstones are purged at the current capacity first; if there are
    /// none, the table doubles.
    #[cold]
    fn rebuild_after_exhaustion(&mut self) {
        let new_capacity = if self.tombstones > 0 {
            self.slots.len()
        } else {
            self.slots.len() * 2
        };
        exhaustion_event!(
            capacity = self.slots.len(),
            populated = self.populated,
            tombstones = self.tombstones,
            new_capacity,
            "probe sequence exhausted"
        );
        self.rebuild(new_capacity);
    }

    /// Replaces the slot array with `new_capacity` empty slots and
    /// re-inserts every live element in old slot order. Tombstones are
    /// dropped.
    fn rebuild(&mut self, new_capacity: usize) {
        let old = mem::replace(&mut self.slots, empty_slots(new_capacity.max(MIN_CAPACITY)));
        self.populated = 0;
        self.tombstones = 0;
        self.epoch = self.epoch.wrapping_add(1);

        for slot in old {
            if let Slot::Occupied { hash, value } = slot {
                self.insert_unique(hash, value);
            }
        }
    }

    /// Inserts a value known not to be present.
    fn insert_unique(&mut self, hash: u64, value: V) {
        loop {
            let vacant = ProbeSeq::new(hash, self.slots.len())
                .find(|&index| matches!(self.slots[index], Slot::Empty));
            match vacant {
                Some(index) => {
                    self.occupy(index, hash, value);
                    return;
                }
                None => self.rebuild_after_exhaustion(),
            }
        }
    }

    /// Computes a histogram of probe lengths for the current table state.
    ///
    /// Only available with the `stats` feature.
    #[cfg(feature = "stats")]
    pub fn probe_histogram(&self) -> ProbeHistogram {
        let mut counts = alloc::vec![0usize; 1];
        for (index, slot) in self.slots.iter().enumerate() {
            if let Slot::Occupied { hash, .. } = slot {
                let length = self.probe_length(*hash, index);
                if counts.len() <= length {
                    counts.resize(length + 1, 0);
                }
                counts[length] += 1;
            }
        }
        ProbeHistogram { counts }
    }

    /// Collects statistics about the table.
    ///
    /// Only available with the `stats` feature.
    #[cfg(feature = "stats")]
    pub fn debug_stats(&self) -> DebugStats {
        let histogram = self.probe_histogram();
        let probe_total: usize = histogram
            .counts()
            .iter()
            .enumerate()
            .map(|(length, count)| length * count)
            .sum();
        let capacity = self.slots.len();

        DebugStats {
            populated: self.populated,
            capacity,
            tombstones: self.tombstones,
            empty_slots: capacity - self.populated - self.tombstones,
            load_factor: self.load_factor(),
            slot_utilization: load_factor(self.populated + self.tombstones, capacity),
            max_probe_length: histogram.max_probe_length().unwrap_or(0),
            mean_probe_length: if self.populated == 0 {
                0.0
            } else {
                probe_total as f64 / self.populated as f64
            },
        }
    }

    #[cfg(feature = "stats")]
    fn probe_length(&self, hash: u64, index: usize) -> usize {
        ProbeSeq::new(hash, self.slots.len())
            .position(|probe| probe == index)
            .unwrap_or(self.slots.len())
    }
}

/// A view into a single entry in a table, which may either be vacant or
/// occupied.
///
/// This enum is constructed from the [`entry`] method on [`HashTable`].
///
/// [`entry`]: HashTable::entry
pub enum Entry<'a, V> {
    /// An occupied entry.
    Occupied(OccupiedEntry<'a, V>),
    /// A vacant entry.
    Vacant(VacantEntry<'a, V>),
}

impl<'a, V> Entry<'a, V> {
    /// Inserts `default` if the entry is vacant and returns a mutable
    /// reference to the value.
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Inserts the result of `default` if the entry is vacant and returns a
    /// mutable reference to the value.
    pub fn or_insert_with(self, default: impl FnOnce() -> V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Provides in-place mutable access to an occupied entry.
    pub fn and_modify(self, f: impl FnOnce(&mut V)) -> Self {
        match self {
            Entry::Occupied(mut entry) => {
                f(entry.get_mut());
                Entry::Occupied(entry)
            }
            Entry::Vacant(entry) => Entry::Vacant(entry),
        }
    }

    /// Returns the position this entry refers to. For a vacant entry this is
    /// the slot an insert would use, which holds no element yet.
    pub fn position(&self) -> Position {
        match self {
            Entry::Occupied(entry) => entry.position(),
            Entry::Vacant(entry) => entry.position(),
        }
    }
}

impl<'a, V> Entry<'a, V>
where
    V: Default,
{
    /// Inserts the default value if the entry is vacant and returns a
    /// mutable reference to the value.
    pub fn or_default(self) -> &'a mut V {
        self.or_insert_with(Default::default)
    }
}

/// A view into a vacant entry in a [`HashTable`].
pub struct VacantEntry<'a, V> {
    table: &'a mut HashTable<V>,
    hash: u64,
    index: usize,
}

impl<'a, V> VacantEntry<'a, V> {
    /// Returns the digest this entry was looked up with.
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Returns the position of the slot an insert would use.
    pub fn position(&self) -> Position {
        Position {
            index: self.index,
            epoch: self.table.epoch,
        }
    }

    /// Inserts `value` into the slot found by the probe and returns a mutable
    /// reference to it.
    pub fn insert(self, value: V) -> &'a mut V {
        let VacantEntry { table, hash, index } = self;
        table.occupy(index, hash, value)
    }
}

/// A view into an occupied entry in a [`HashTable`].
pub struct OccupiedEntry<'a, V> {
    table: &'a mut HashTable<V>,
    index: usize,
}

impl<'a, V> OccupiedEntry<'a, V> {
    /// Gets a reference to the value in the entry.
    pub fn get(&self) -> &V {
        self.table.value_at(self.index)
    }

    /// Gets a mutable reference to the value in the entry.
    pub fn get_mut(&mut self) -> &mut V {
        self.table.value_at_mut(self.index)
    }

    /// Converts the entry into a mutable reference to the value.
    pub fn into_mut(self) -> &'a mut V {
        let OccupiedEntry { table, index } = self;
        table.value_at_mut(index)
    }

    /// Returns the position of the entry.
    pub fn position(&self) -> Position {
        Position {
            index: self.index,
            epoch: self.table.epoch,
        }
    }

    /// Removes the entry from the table and returns the value.
    ///
    /// Applies the same rebuild check as [`HashTable::remove`].
    pub fn remove(self) -> V {
        self.table.remove_at(self.index)
    }
}

/// A read-only cursor over the live slots of a [`HashTable`].
///
/// A cursor sits either on a live element or on the end sentinel, one past
/// the last slot. It borrows the table, so no rebuild can happen while it is
/// alive; use [`position`](Self::position) to keep a reference across
/// mutations.
pub struct Cursor<'a, V> {
    table: &'a HashTable<V>,
    index: usize,
}

impl<V> Clone for Cursor<'_, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for Cursor<'_, V> {}

impl<V> PartialEq for Cursor<'_, V> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.table, other.table) && self.index == other.index
    }
}

impl<V> Eq for Cursor<'_, V> {}

impl<V: Debug> Debug for Cursor<'_, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Cursor")
            .field("index", &self.index)
            .field("value", &self.get())
            .finish()
    }
}

impl<'a, V> Cursor<'a, V> {
    /// Returns `true` if the cursor is the end sentinel.
    pub fn is_end(&self) -> bool {
        self.index == self.table.slots.len()
    }

    /// Returns the value under the cursor, `None` at the end.
    pub fn get(&self) -> Option<&'a V> {
        match self.table.slots.get(self.index) {
            Some(Slot::Occupied { value, .. }) => Some(value),
            _ => None,
        }
    }

    /// Returns the value under the cursor.
    ///
    /// # Errors
    ///
    /// [`CursorError::End`] at the end sentinel.
    pub fn try_get(&self) -> Result<&'a V, CursorError> {
        self.get().ok_or(CursorError::End)
    }

    /// Moves to the next live element, or to the end sentinel.
    ///
    /// # Errors
    ///
    /// [`CursorError::End`] if the cursor is already at the end; it stays
    /// there.
    pub fn move_next(&mut self) -> Result<(), CursorError> {
        if self.is_end() {
            return Err(CursorError::End);
        }
        self.index = self.table.next_occupied(self.index + 1);
        Ok(())
    }

    /// Returns a detached position for this cursor.
    pub fn position(&self) -> Position {
        Position {
            index: self.index,
            epoch: self.table.epoch,
        }
    }
}

/// An iterator over the values of a [`HashTable`] in slot order.
///
/// This struct is created by the [`iter`] method on [`HashTable`].
///
/// [`iter`]: HashTable::iter
pub struct Iter<'a, V> {
    slots: core::slice::Iter<'a, Slot<V>>,
    remaining: usize,
}

impl<V> Clone for Iter<'_, V> {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        for slot in self.slots.by_ref() {
            if let Slot::Occupied { value, .. } = slot {
                self.remaining -= 1;
                return Some(value);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

impl<V> FusedIterator for Iter<'_, V> {}

/// A mutable iterator over the values of a [`HashTable`] in slot order.
pub struct IterMut<'a, V> {
    slots: core::slice::IterMut<'a, Slot<V>>,
    remaining: usize,
}

impl<'a, V> Iterator for IterMut<'a, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        for slot in self.slots.by_ref() {
            if let Slot::Occupied { value, .. } = slot {
                self.remaining -= 1;
                return Some(value);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for IterMut<'_, V> {}

impl<V> FusedIterator for IterMut<'_, V> {}

/// An owning iterator over the values of a [`HashTable`] in slot order.
pub struct IntoIter<V> {
    slots: alloc::vec::IntoIter<Slot<V>>,
    remaining: usize,
}

impl<V> Iterator for IntoIter<V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        for slot in self.slots.by_ref() {
            if let Slot::Occupied { value, .. } = slot {
                self.remaining -= 1;
                return Some(value);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for IntoIter<V> {}

impl<V> FusedIterator for IntoIter<V> {}

impl<V> IntoIterator for HashTable<V> {
    type Item = V;
    type IntoIter = IntoIter<V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            slots: self.slots.into_iter(),
            remaining: self.populated,
        }
    }
}

impl<'a, V> IntoIterator for &'a HashTable<V> {
    type Item = &'a V;
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A draining iterator over the values of a [`HashTable`].
///
/// This struct is created by the [`drain`] method on [`HashTable`]. The table
/// is already empty when it is created; values not consumed are dropped with
/// the iterator.
///
/// [`drain`]: HashTable::drain
pub struct Drain<'a, V> {
    inner: IntoIter<V>,
    _table: PhantomData<&'a mut HashTable<V>>,
}

impl<V> Iterator for Drain<'_, V> {
    type Item = V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for Drain<'_, V> {}

impl<V> FusedIterator for Drain<'_, V> {}
