use core::borrow::Borrow;
use core::fmt::Debug;
use core::iter::FusedIterator;
use core::ops::Index;

use crate::digest::DefaultHashProvider;
use crate::digest::HashProvider;
use crate::error::CursorError;
use crate::hash_table::Entry as TableEntry;
use crate::hash_table::HashTable;
use crate::hash_table::Position;

/// A key-value map backed by a quadratic-probing [`HashTable`].
///
/// `HashMap<K, V, P>` stores `(K, V)` pairs. Keys must be `Eq`, and the
/// provider `P` turns a key into its `u64` digest; the default provider uses
/// the key's [`Hashable`] implementation.
///
/// Iteration visits entries in slot order, which changes whenever the table
/// is rebuilt. Rebuilds happen before an insert when the load factor is above
/// 0.46 (doubling the capacity), and after a removal when the remaining load
/// factor is above 0.30.
///
/// [`Hashable`]: crate::digest::Hashable
///
/// # Examples
///
/// ```rust
/// use quad_hash::HashMap;
///
/// let mut map = HashMap::new();
/// for (value, key) in ["a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k"]
///     .into_iter()
///     .enumerate()
/// {
///     map.put(key, value + 1);
/// }
/// assert_eq!(map.size(), 11);
/// assert_eq!(map.maxsize(), 113);
///
/// for key in ["a", "b", "c", "d", "e"] {
///     map.remove(key);
/// }
/// assert_eq!(map.size(), 6);
/// assert!(map.find("a") == map.end());
/// assert_eq!(map.find("f").value(), Some(&6));
/// ```
#[derive(Clone)]
pub struct HashMap<K, V, P = DefaultHashProvider> {
    table: HashTable<(K, V)>,
    provider: P,
}

fn equivalent_key<K, Q, V>(key: &Q) -> impl Fn(&(K, V)) -> bool + '_
where
    K: Borrow<Q>,
    Q: ?Sized + Eq,
{
    move |(k, _)| key == <K as Borrow<Q>>::borrow(k)
}

impl<K, V> HashMap<K, V, DefaultHashProvider> {
    /// Creates an empty map with 113 slots.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use quad_hash::HashMap;
    /// let map: HashMap<u32, String> = HashMap::new();
    /// assert!(map.is_empty());
    /// assert_eq!(map.capacity(), 113);
    /// ```
    pub fn new() -> Self {
        Self::with_provider(DefaultHashProvider)
    }

    /// Creates an empty map with `capacity` slots.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use quad_hash::HashMap;
    /// let map: HashMap<u32, String> = HashMap::with_capacity(31);
    /// assert_eq!(map.capacity(), 31);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_provider(capacity, DefaultHashProvider)
    }
}

impl<K, V, P> HashMap<K, V, P> {
    /// Creates an empty map with 113 slots that digests keys with
    /// `provider`.
    pub fn with_provider(provider: P) -> Self {
        Self {
            table: HashTable::new(),
            provider,
        }
    }

    /// Creates an empty map with `capacity` slots that digests keys with
    /// `provider`.
    pub fn with_capacity_and_provider(capacity: usize, provider: P) -> Self {
        Self {
            table: HashTable::with_capacity(capacity),
            provider,
        }
    }

    /// Returns the provider used to digest keys.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Returns the number of elements in the map.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Alias for [`len`](Self::len).
    pub fn size(&self) -> usize {
        self.table.len()
    }

    /// Returns `true` if the map contains no elements.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Returns the number of slots in the underlying table.
    ///
    /// This is not the number of elements the map can hold before it grows:
    /// the table grows once more than 46% of its slots are in use.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    /// Alias for [`capacity`](Self::capacity).
    pub fn maxsize(&self) -> usize {
        self.table.capacity()
    }

    /// Returns `len() / capacity()`.
    pub fn load_factor(&self) -> f64 {
        self.table.load_factor()
    }

    /// Removes all elements, keeping the capacity.
    ///
    /// Outstanding [`Position`]s are invalidated.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use quad_hash::HashMap;
    /// let mut map = HashMap::new();
    /// map.put(1u32, "a");
    /// map.clear();
    /// assert!(map.is_empty());
    /// assert_eq!(map.capacity(), 113);
    /// ```
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Returns an iterator over the key-value pairs in slot order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.table.iter(),
        }
    }

    /// Returns an iterator over the key-value pairs in slot order, with
    /// mutable references to the values.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            inner: self.table.iter_mut(),
        }
    }

    /// Returns an iterator over the keys in slot order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over the values in slot order.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Returns an iterator over mutable references to the values in slot
    /// order.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut {
            inner: self.iter_mut(),
        }
    }

    /// Removes all key-value pairs and returns them in slot order.
    ///
    /// The map is empty once `drain` returns; pairs not consumed are dropped
    /// with the iterator.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use quad_hash::HashMap;
    /// let mut map = HashMap::new();
    /// map.put(1u32, "a");
    /// map.put(2u32, "b");
    ///
    /// let mut drained: Vec<_> = map.drain().collect();
    /// drained.sort();
    /// assert_eq!(drained, [(1, "a"), (2, "b")]);
    /// assert!(map.is_empty());
    /// ```
    pub fn drain(&mut self) -> Drain<'_, K, V> {
        Drain {
            inner: self.table.drain(),
        }
    }

    /// Returns a cursor on the first entry in slot order, or the end cursor
    /// when the map is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use quad_hash::HashMap;
    /// let mut map = HashMap::new();
    /// map.put(3u32, 30);
    /// map.put(1u32, 10);
    ///
    /// let mut cursor = map.begin();
    /// let mut seen = Vec::new();
    /// while let Some((key, value)) = cursor.get() {
    ///     seen.push((*key, *value));
    ///     cursor.move_next().unwrap();
    /// }
    /// assert!(cursor == map.end());
    /// assert_eq!(seen, [(1, 10), (3, 30)]);
    /// ```
    pub fn begin(&self) -> Cursor<'_, K, V> {
        Cursor {
            inner: self.table.cursor_begin(),
        }
    }

    /// Returns the end cursor.
    pub fn end(&self) -> Cursor<'_, K, V> {
        Cursor {
            inner: self.table.cursor_end(),
        }
    }

    /// Re-attaches a cursor to a detached [`Position`].
    ///
    /// # Errors
    ///
    /// [`CursorError::Invalidated`] if the map was rebuilt since the position
    /// was taken, [`CursorError::Vacated`] if its entry was removed.
    pub fn cursor_at(&self, position: Position) -> Result<Cursor<'_, K, V>, CursorError> {
        Ok(Cursor {
            inner: self.table.cursor_at(position)?,
        })
    }

    /// Returns the key-value pair at `position`.
    ///
    /// # Errors
    ///
    /// [`CursorError::End`] for the end position, [`CursorError::Invalidated`]
    /// after a rebuild, [`CursorError::Vacated`] if the entry was removed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use quad_hash::CursorError;
    /// # use quad_hash::HashMap;
    /// let mut map = HashMap::new();
    /// map.put(5u32, "five");
    ///
    /// let position = map.find(&5).position();
    /// assert_eq!(map.get_at(position), Ok((&5, &"five")));
    ///
    /// map.put(6u32, "six");
    /// assert_eq!(map.get_at(position), Ok((&5, &"five")));
    ///
    /// map.clear();
    /// assert_eq!(map.get_at(position), Err(CursorError::Invalidated));
    /// ```
    pub fn get_at(&self, position: Position) -> Result<(&K, &V), CursorError> {
        let (k, v) = self.table.get_at(position)?;
        Ok((k, v))
    }

    /// Returns the key and a mutable reference to the value at `position`.
    ///
    /// # Errors
    ///
    /// As [`get_at`](Self::get_at).
    pub fn get_at_mut(&mut self, position: Position) -> Result<(&K, &mut V), CursorError> {
        let (k, v) = self.table.get_at_mut(position)?;
        Ok((&*k, v))
    }

    /// Returns the position of the entry after `position` in slot order, or
    /// the end position.
    ///
    /// # Errors
    ///
    /// As [`get_at`](Self::get_at).
    pub fn next_position(&self, position: Position) -> Result<Position, CursorError> {
        self.table.next_position(position)
    }

    /// Removes the entry at `position` and returns it.
    ///
    /// Applies the same rebuild check as [`remove`](Self::remove), so the
    /// position of any other entry may be invalidated.
    ///
    /// # Errors
    ///
    /// As [`get_at`](Self::get_at).
    pub fn remove_at(&mut self, position: Position) -> Result<(K, V), CursorError> {
        self.table.remove_at_position(position)
    }

    /// Computes a histogram of probe lengths for the current map state.
    ///
    /// Only available with the `stats` feature.
    #[cfg(feature = "stats")]
    pub fn probe_histogram(&self) -> crate::hash_table::ProbeHistogram {
        self.table.probe_histogram()
    }

    /// Collects statistics about the underlying table.
    ///
    /// Only available with the `stats` feature.
    #[cfg(feature = "stats")]
    pub fn debug_stats(&self) -> crate::hash_table::DebugStats {
        self.table.debug_stats()
    }
}

impl<K, V, P> HashMap<K, V, P>
where
    K: Eq,
    P: HashProvider<K>,
{
    /// Inserts `value` under `key`, overwriting the value of an existing
    /// entry in place.
    ///
    /// The grow check runs first, so this can rebuild the table even when
    /// `key` is already present.
    pub fn put(&mut self, key: K, value: V) {
        self.insert(key, value);
    }

    /// Inserts a key-value pair, returning the previous value for `key`.
    ///
    /// When the key is already present its stored key is kept and only the
    /// value is replaced.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use quad_hash::HashMap;
    /// let mut map = HashMap::new();
    /// assert_eq!(map.insert(37u32, "a"), None);
    /// assert_eq!(map.insert(37u32, "b"), Some("a"));
    /// assert_eq!(map.get(&37), Some(&"b"));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let hash = self.provider.digest(&key);
        match self.table.entry(hash, |(k, _)| *k == key) {
            TableEntry::Occupied(mut entry) => {
                Some(core::mem::replace(&mut entry.get_mut().1, value))
            }
            TableEntry::Vacant(entry) => {
                entry.insert((key, value));
                None
            }
        }
    }

    /// Gets the entry for `key` for in-place manipulation.
    ///
    /// Like [`put`](Self::put), this applies the grow check before probing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use quad_hash::HashMap;
    /// let mut letters = HashMap::new();
    /// for ch in "a short treatise on fungi".chars() {
    ///     *letters.entry(ch).or_insert(0) += 1;
    /// }
    /// assert_eq!(letters[&'s'], 2);
    /// assert_eq!(letters[&'t'], 3);
    /// assert_eq!(letters.get(&'y'), None);
    /// ```
    pub fn entry(&mut self, key: K) -> Entry<'_, K, V> {
        let hash = self.provider.digest(&key);
        match self.table.entry(hash, |(k, _)| *k == key) {
            TableEntry::Occupied(entry) => Entry::Occupied(OccupiedEntry { entry }),
            TableEntry::Vacant(entry) => Entry::Vacant(VacantEntry { entry, key }),
        }
    }

    /// Returns a mutable reference to the value for `key`, inserting
    /// `V::default()` first if the key is absent.
    ///
    /// A hit never rebuilds the table; a miss applies the grow check before
    /// inserting.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use quad_hash::HashMap;
    /// let mut map: HashMap<&str, u32> = HashMap::new();
    /// *map.get_or_insert_default("hits") += 1;
    /// *map.get_or_insert_default("hits") += 1;
    /// assert_eq!(map.get("hits"), Some(&2));
    /// assert_eq!(*map.get_or_insert_default("misses"), 0);
    /// ```
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        let hash = self.provider.digest(&key);
        match self.table.entry_grow_on_miss(hash, |(k, _)| *k == key) {
            TableEntry::Occupied(entry) => &mut entry.into_mut().1,
            TableEntry::Vacant(entry) => &mut entry.insert((key, V::default())).1,
        }
    }

    /// Returns a cursor on the entry for `key`, or the end cursor.
    ///
    /// Removed slots hold no key and are stepped over, so a key that was
    /// removed and inserted again is found wherever it now lives.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use quad_hash::HashMap;
    /// let mut map = HashMap::new();
    /// map.put(String::from("f"), 6);
    ///
    /// assert_eq!(map.find("f").get(), Some((&String::from("f"), &6)));
    /// assert!(map.find("g").is_end());
    /// ```
    pub fn find<Q>(&self, key: &Q) -> Cursor<'_, K, V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
        P: HashProvider<Q>,
    {
        let hash = self.provider.digest(key);
        Cursor {
            inner: self.table.find_cursor(hash, equivalent_key(key)),
        }
    }

    /// Returns a reference to the value for `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
        P: HashProvider<Q>,
    {
        self.get_key_value(key).map(|(_, v)| v)
    }

    /// Returns a mutable reference to the value for `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use quad_hash::HashMap;
    /// let mut map = HashMap::new();
    /// map.put(1u32, String::from("hello"));
    /// if let Some(value) = map.get_mut(&1) {
    ///     value.push_str(" world");
    /// }
    /// assert_eq!(map.get(&1).map(String::as_str), Some("hello world"));
    /// ```
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
        P: HashProvider<Q>,
    {
        let hash = self.provider.digest(key);
        self.table
            .find_mut(hash, equivalent_key(key))
            .map(|(_, v)| v)
    }

    /// Returns the stored key and the value for `key`.
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
        P: HashProvider<Q>,
    {
        let hash = self.provider.digest(key);
        self.table
            .find(hash, equivalent_key(key))
            .map(|(k, v)| (k, v))
    }

    /// Returns `true` if the map contains `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
        P: HashProvider<Q>,
    {
        self.get_key_value(key).is_some()
    }

    /// Removes `key`, returning its value if it was present.
    ///
    /// The slot becomes a tombstone. If the remaining load factor is above
    /// 0.30 the table is rebuilt at a smaller capacity. Removing an absent
    /// key changes nothing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use quad_hash::HashMap;
    /// let mut map = HashMap::new();
    /// map.put(1u32, "a");
    /// assert_eq!(map.remove(&1), Some("a"));
    /// assert_eq!(map.remove(&1), None);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
        P: HashProvider<Q>,
    {
        self.remove_entry(key).map(|(_, v)| v)
    }

    /// Removes `key`, returning the stored key and value if it was present.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
        P: HashProvider<Q>,
    {
        let hash = self.provider.digest(key);
        self.table.remove(hash, equivalent_key(key))
    }
}

impl<K, V, P> Debug for HashMap<K, V, P>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, P> Default for HashMap<K, V, P>
where
    P: Default,
{
    fn default() -> Self {
        Self::with_provider(P::default())
    }
}

impl<K, V, P> PartialEq for HashMap<K, V, P>
where
    K: Eq,
    V: PartialEq,
    P: HashProvider<K>,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key).is_some_and(|v| *value == *v))
    }
}

impl<K, V, P> Eq for HashMap<K, V, P>
where
    K: Eq,
    V: Eq,
    P: HashProvider<K>,
{
}

impl<K, Q, V, P> Index<&Q> for HashMap<K, V, P>
where
    K: Eq + Borrow<Q>,
    Q: ?Sized + Eq,
    P: HashProvider<K> + HashProvider<Q>,
{
    type Output = V;

    /// Returns a reference to the value for `key`.
    ///
    /// # Panics
    ///
    /// Panics if `key` is not present.
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("key not found")
    }
}

impl<K, V, P> Extend<(K, V)> for HashMap<K, V, P>
where
    K: Eq,
    P: HashProvider<K>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<K, V, P> FromIterator<(K, V)> for HashMap<K, V, P>
where
    K: Eq,
    P: HashProvider<K> + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

impl<K, V, P> IntoIterator for HashMap<K, V, P> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.table.into_iter(),
        }
    }
}

impl<'a, K, V, P> IntoIterator for &'a HashMap<K, V, P> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, K, V, P> IntoIterator for &'a mut HashMap<K, V, P> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// A read-only cursor over the entries of a [`HashMap`] in slot order.
///
/// Created by [`HashMap::begin`], [`HashMap::end`], [`HashMap::find`] and
/// [`HashMap::cursor_at`]. Two cursors are equal when they sit on the same
/// slot of the same map.
pub struct Cursor<'a, K, V> {
    inner: crate::hash_table::Cursor<'a, (K, V)>,
}

impl<K, V> Clone for Cursor<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for Cursor<'_, K, V> {}

impl<K, V> PartialEq for Cursor<'_, K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<K, V> Eq for Cursor<'_, K, V> {}

impl<K: Debug, V: Debug> Debug for Cursor<'_, K, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Cursor")
            .field("position", &self.inner.position())
            .field("entry", &self.get())
            .finish()
    }
}

impl<'a, K, V> Cursor<'a, K, V> {
    /// Returns `true` if the cursor is the end sentinel.
    pub fn is_end(&self) -> bool {
        self.inner.is_end()
    }

    /// Returns the key-value pair under the cursor, `None` at the end.
    pub fn get(&self) -> Option<(&'a K, &'a V)> {
        self.inner.get().map(|(k, v)| (k, v))
    }

    /// Returns the key under the cursor, `None` at the end.
    pub fn key(&self) -> Option<&'a K> {
        self.inner.get().map(|(k, _)| k)
    }

    /// Returns the value under the cursor, `None` at the end.
    pub fn value(&self) -> Option<&'a V> {
        self.inner.get().map(|(_, v)| v)
    }

    /// Returns the key-value pair under the cursor.
    ///
    /// # Errors
    ///
    /// [`CursorError::End`] at the end sentinel.
    pub fn try_get(&self) -> Result<(&'a K, &'a V), CursorError> {
        self.inner.try_get().map(|(k, v)| (k, v))
    }

    /// Moves to the next entry in slot order, or to the end sentinel.
    ///
    /// # Errors
    ///
    /// [`CursorError::End`] if the cursor is already at the end.
    pub fn move_next(&mut self) -> Result<(), CursorError> {
        self.inner.move_next()
    }

    /// Returns a detached position that can outlive the borrow of the map.
    pub fn position(&self) -> Position {
        self.inner.position()
    }
}

/// A view into a single entry in the map, which may either be vacant or
/// occupied.
///
/// This enum is constructed from the [`entry`] method on [`HashMap`].
///
/// [`entry`]: HashMap::entry
pub enum Entry<'a, K, V> {
    /// A vacant entry.
    Vacant(VacantEntry<'a, K, V>),
    /// An occupied entry.
    Occupied(OccupiedEntry<'a, K, V>),
}

impl<'a, K, V> Entry<'a, K, V> {
    /// Inserts `default` if the entry is vacant and returns a mutable
    /// reference to the value.
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Inserts a value computed from a closure if the entry is vacant and
    /// returns a mutable reference.
    pub fn or_insert_with<F>(self, default: F) -> &'a mut V
    where
        F: FnOnce() -> V,
    {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Provides in-place mutable access to an occupied entry before any
    /// potential inserts.
    pub fn and_modify<F>(self, f: F) -> Self
    where
        F: FnOnce(&mut V),
    {
        match self {
            Entry::Occupied(mut entry) => {
                f(entry.get_mut());
                Entry::Occupied(entry)
            }
            Entry::Vacant(entry) => Entry::Vacant(entry),
        }
    }

    /// Returns a reference to this entry's key.
    pub fn key(&self) -> &K {
        match self {
            Entry::Occupied(entry) => entry.key(),
            Entry::Vacant(entry) => entry.key(),
        }
    }

    /// Returns the position of this entry. For a vacant entry the position
    /// names the slot an insert would use and reads as
    /// [`CursorError::Vacated`] until the insert happens.
    pub fn position(&self) -> Position {
        match self {
            Entry::Occupied(entry) => entry.position(),
            Entry::Vacant(entry) => entry.position(),
        }
    }
}

impl<'a, K, V> Entry<'a, K, V>
where
    V: Default,
{
    /// Inserts the default value if the entry is vacant and returns a mutable
    /// reference.
    pub fn or_default(self) -> &'a mut V {
        self.or_insert_with(Default::default)
    }
}

/// A view into a vacant entry in the map.
pub struct VacantEntry<'a, K, V> {
    entry: crate::hash_table::VacantEntry<'a, (K, V)>,
    key: K,
}

impl<'a, K, V> VacantEntry<'a, K, V> {
    /// Gets a reference to the key that would be used when inserting a value.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Take ownership of the key.
    pub fn into_key(self) -> K {
        self.key
    }

    /// Inserts the value into the map and returns a mutable reference to it.
    pub fn insert(self, value: V) -> &'a mut V {
        &mut self.entry.insert((self.key, value)).1
    }

    fn position(&self) -> Position {
        self.entry.position()
    }
}

/// A view into an occupied entry in the map.
pub struct OccupiedEntry<'a, K, V> {
    entry: crate::hash_table::OccupiedEntry<'a, (K, V)>,
}

impl<'a, K, V> OccupiedEntry<'a, K, V> {
    /// Gets a reference to the key in the entry.
    pub fn key(&self) -> &K {
        &self.entry.get().0
    }

    /// Gets a reference to the value in the entry.
    pub fn get(&self) -> &V {
        &self.entry.get().1
    }

    /// Gets a mutable reference to the value in the entry.
    pub fn get_mut(&mut self) -> &mut V {
        &mut self.entry.get_mut().1
    }

    /// Converts the entry into a mutable reference to the value.
    pub fn into_mut(self) -> &'a mut V {
        &mut self.entry.into_mut().1
    }

    /// Replaces the value in the entry and returns the old value.
    pub fn insert(&mut self, value: V) -> V {
        core::mem::replace(&mut self.entry.get_mut().1, value)
    }

    /// Returns the position of the entry.
    pub fn position(&self) -> Position {
        self.entry.position()
    }

    /// Removes the entry from the map and returns the value.
    ///
    /// Applies the same rebuild check as [`HashMap::remove`].
    pub fn remove(self) -> V {
        self.entry.remove().1
    }

    /// Removes the entry from the map and returns the key and value.
    pub fn remove_entry(self) -> (K, V) {
        self.entry.remove()
    }
}

/// An iterator over the key-value pairs of a [`HashMap`] in slot order.
pub struct Iter<'a, K, V> {
    inner: crate::hash_table::Iter<'a, (K, V)>,
}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

/// A mutable iterator over the key-value pairs of a [`HashMap`].
pub struct IterMut<'a, K, V> {
    inner: crate::hash_table::IterMut<'a, (K, V)>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (&*k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {}

impl<K, V> FusedIterator for IterMut<'_, K, V> {}

/// An iterator over the keys of a [`HashMap`].
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

/// An iterator over the values of a [`HashMap`].
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

impl<K, V> FusedIterator for Values<'_, K, V> {}

/// A mutable iterator over the values of a [`HashMap`].
pub struct ValuesMut<'a, K, V> {
    inner: IterMut<'a, K, V>,
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {}

impl<K, V> FusedIterator for ValuesMut<'_, K, V> {}

/// An owning iterator over the key-value pairs of a [`HashMap`].
pub struct IntoIter<K, V> {
    inner: crate::hash_table::IntoIter<(K, V)>,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

impl<K, V> FusedIterator for IntoIter<K, V> {}

/// A draining iterator over the key-value pairs of a [`HashMap`].
pub struct Drain<'a, K, V> {
    inner: crate::hash_table::Drain<'a, (K, V)>,
}

impl<K, V> Iterator for Drain<'_, K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Drain<'_, K, V> {}

impl<K, V> FusedIterator for Drain<'_, K, V> {}
