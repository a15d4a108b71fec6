use hashbrown::HashMap;
use std::{collections::BTreeMap, hash::BuildHasher, slice::Iter, vec::IntoIter};

#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Hash, Debug, Default)]
/// A string-keyed map implemented as a `Vec` of pairs sorted by key.
///
/// Sorted order is the only order the codec promises: map entry order is
/// not preserved across a decode, so maps are kept canonically sorted on
/// both paths.
pub struct VecMap<V>(Vec<(String, V)>);

impl<V> VecMap<V> {
    /// Creates a new `VecMap`.
    pub fn new() -> VecMap<V> { VecMap(Vec::new()) }

    /// Creates a `VecMap` from a `Vec` of pairs already sorted by key.
    pub fn from_sorted(v: Vec<(String, V)>) -> Self {
        // panic if `v` is not sorted
        debug_assert!(v.is_sorted_by(|(k1, _), (k2, _)| k1 <= k2));
        VecMap(v)
    }

    /// Returns length
    pub fn len(&self) -> usize { self.0.len() }

    /// Indicates whether or not the `VecMap` is empty.
    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    /// Returns an `Iter` of key value pairs.
    pub fn iter(&self) -> Iter<(String, V)> { self.0.iter() }

    /// Returns a reference to the value stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&V> {
        self.0
            .binary_search_by(|(k, _)| k.as_str().cmp(key))
            .ok()
            .map(|ix| &self.0[ix].1)
    }

    /// Consumes a `VecMap`, producing a `HashMap` from the entries.
    pub fn into_hashmap<S: BuildHasher + Default>(self) -> HashMap<String, V, S> {
        self.into_iter().collect()
    }
}

impl<V> From<Vec<(String, V)>> for VecMap<V> {
    fn from(mut v: Vec<(String, V)>) -> Self {
        v.sort_unstable_by(|(k1, _), (k2, _)| k1.cmp(k2));
        VecMap(v)
    }
}

impl<V, S: BuildHasher> From<HashMap<String, V, S>> for VecMap<V> {
    fn from(hm: HashMap<String, V, S>) -> Self {
        let v: Vec<(String, V)> = hm.into_iter().collect();
        v.into()
    }
}

impl<V> From<BTreeMap<String, V>> for VecMap<V> {
    fn from(bt: BTreeMap<String, V>) -> Self { Self::from_iter(bt) }
}

impl<V> IntoIterator for VecMap<V> {
    type IntoIter = IntoIter<(String, V)>;
    type Item = (String, V);

    fn into_iter(self) -> IntoIter<(String, V)> { self.0.into_iter() }
}

impl<V> FromIterator<(String, V)> for VecMap<V> {
    fn from_iter<I: IntoIterator<Item = (String, V)>>(iter: I) -> VecMap<V> {
        VecMap::from(Vec::from_iter(iter))
    }
}
