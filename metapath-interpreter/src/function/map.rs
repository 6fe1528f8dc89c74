use std::rc::Rc;

use ahash::{HashMap, HashMapExt};

use crate::atomic::{Atomic, MapKey};
use crate::error;
use crate::sequence;

/// A Metapath map.
///
/// Keys are atomic values, compared by their map key identity. Entries keep
/// the order in which they were first inserted.
#[derive(Debug, Clone)]
pub struct Map(Rc<MapInner>);

#[derive(Debug, Clone, Default)]
struct MapInner {
    index: HashMap<MapKey, usize>,
    entries: Vec<(Atomic, sequence::Sequence)>,
}

impl Map {
    /// Construct a map. Duplicate keys are `MPDY0137`.
    pub fn new(entries: Vec<(Atomic, sequence::Sequence)>) -> error::Result<Self> {
        let mut inner = MapInner {
            index: HashMap::with_capacity(entries.len()),
            entries: Vec::with_capacity(entries.len()),
        };
        for (key, value) in entries {
            let map_key = MapKey::new(&key);
            if inner.index.contains_key(&map_key) {
                return Err(error::Error::MPDY0137);
            }
            inner.index.insert(map_key, inner.entries.len());
            inner.entries.push((key, value));
        }
        Ok(Self(Rc::new(inner)))
    }

    /// Combine maps, with later values replacing earlier ones for the same
    /// key unless `use_first` is set.
    pub(crate) fn combine(maps: &[Map], use_first: bool) -> Self {
        let mut inner = MapInner::default();
        for map in maps {
            for (key, value) in map.0.entries.iter() {
                inner.insert(key.clone(), value.clone(), !use_first);
            }
        }
        Self(Rc::new(inner))
    }

    /// Combine maps, concatenating the values of duplicate keys.
    pub(crate) fn combine_concat(maps: &[Map]) -> Self {
        let mut inner = MapInner::default();
        for map in maps {
            for (key, value) in map.0.entries.iter() {
                let map_key = MapKey::new(key);
                match inner.index.get(&map_key) {
                    Some(i) => {
                        let existing = std::mem::take(&mut inner.entries[*i].1);
                        inner.entries[*i].1 = existing.concat(value.clone());
                    }
                    None => inner.insert(key.clone(), value.clone(), true),
                }
            }
        }
        Self(Rc::new(inner))
    }

    pub fn len(&self) -> usize {
        self.0.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.entries.is_empty()
    }

    pub fn get(&self, key: &Atomic) -> Option<&sequence::Sequence> {
        self.0
            .index
            .get(&MapKey::new(key))
            .map(|i| &self.0.entries[*i].1)
    }

    pub fn contains_key(&self, key: &Atomic) -> bool {
        self.0.index.contains_key(&MapKey::new(key))
    }

    /// The keys, in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &Atomic> {
        self.0.entries.iter().map(|(key, _)| key)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&Atomic, &sequence::Sequence)> {
        self.0.entries.iter().map(|(key, value)| (key, value))
    }

    /// A new map with the entry added, replacing any entry with the same
    /// key in place.
    pub(crate) fn put(&self, key: Atomic, value: &sequence::Sequence) -> Self {
        let mut inner = self.0.as_ref().clone();
        inner.insert(key, value.clone(), true);
        Self(Rc::new(inner))
    }

    pub(crate) fn remove_keys(&self, keys: &[Atomic]) -> Self {
        let remove = keys.iter().map(MapKey::new).collect::<Vec<_>>();
        let entries = self
            .0
            .entries
            .iter()
            .filter(|(key, _)| !remove.contains(&MapKey::new(key)))
            .cloned()
            .collect::<Vec<_>>();
        let mut inner = MapInner::default();
        for (key, value) in entries {
            inner.insert(key, value, true);
        }
        Self(Rc::new(inner))
    }

    pub(crate) fn deep_equal(
        &self,
        other: &Map,
        default_offset: chrono::FixedOffset,
    ) -> error::Result<bool> {
        if self.len() != other.len() {
            return Ok(false);
        }
        for (key, value) in self.entries() {
            match other.get(key) {
                Some(other_value) => {
                    if !value.deep_equal(other_value, default_offset)? {
                        return Ok(false);
                    }
                }
                None => return Ok(false),
            }
        }
        Ok(true)
    }

    pub fn display_representation(&self) -> String {
        let entries = self
            .entries()
            .map(|(key, value)| {
                format!(
                    "{}: {}",
                    key.display_representation(),
                    value.display_representation()
                )
            })
            .collect::<Vec<_>>();
        format!("map{{{}}}", entries.join(", "))
    }
}

impl MapInner {
    fn insert(&mut self, key: Atomic, value: sequence::Sequence, replace: bool) {
        let map_key = MapKey::new(&key);
        match self.index.get(&map_key) {
            Some(i) => {
                if replace {
                    self.entries[*i] = (key, value);
                }
            }
            None => {
                self.index.insert(map_key, self.entries.len());
                self.entries.push((key, value));
            }
        }
    }
}

impl PartialEq for Map {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries()
                .all(|(key, value)| other.get(key) == Some(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rust_decimal_macros::dec;

    fn int(i: i64) -> sequence::Sequence {
        Atomic::from(i).into()
    }

    #[test]
    fn test_duplicate_key() {
        let result = Map::new(vec![
            (Atomic::from(1i64), "a".into()),
            (Atomic::from(dec!(1.0)), "b".into()),
        ]);
        assert_eq!(result.unwrap_err(), error::Error::MPDY0137);
    }

    #[test]
    fn test_string_and_untyped_share_keys() {
        let map = Map::new(vec![(Atomic::from("a"), "x".into())]).unwrap();
        assert_eq!(
            map.get(&Atomic::Untyped("a".into())),
            Some(&sequence::Sequence::from("x"))
        );
    }

    #[test]
    fn test_put_keeps_order() {
        let map = Map::new(vec![
            (Atomic::from("a"), int(1)),
            (Atomic::from("b"), int(2)),
        ])
        .unwrap();
        let map = map.put(Atomic::from("a"), &int(3));
        let keys = map.keys().map(|k| k.string_value()).collect::<Vec<_>>();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(map.get(&Atomic::from("a")), Some(&int(3)));
    }

    #[test]
    fn test_combine() {
        let a = Map::new(vec![(Atomic::from("k"), int(1))]).unwrap();
        let b = Map::new(vec![(Atomic::from("k"), int(2))]).unwrap();
        let last = Map::combine(&[a.clone(), b.clone()], false);
        assert_eq!(last.get(&Atomic::from("k")), Some(&int(2)));
        let first = Map::combine(&[a.clone(), b.clone()], true);
        assert_eq!(first.get(&Atomic::from("k")), Some(&int(1)));
        let combined = Map::combine_concat(&[a, b]);
        assert_eq!(combined.get(&Atomic::from("k")).unwrap().len(), 2);
    }

    #[test]
    fn test_display() {
        let map = Map::new(vec![(Atomic::from("a"), int(1))]).unwrap();
        assert_eq!(map.display_representation(), "map{'a': 1}");
    }
}
