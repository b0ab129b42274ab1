//! A cache for the loaded tables and maps, shared by the views of one run.

use std::any::Any;
use std::collections::HashMap;

use crate::lsg::*;

/// The logical queries the dashboard loads.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub enum QueryKey {
    LocalBodies,
    Trends,
    /// A map file, keyed by its path.
    Map(String),
}

#[derive(Default)]
pub struct QueryCache {
    entries: HashMap<QueryKey, Arc<dyn Any + Send + Sync>>,
}

impl QueryCache {
    pub fn new() -> QueryCache {
        QueryCache::default()
    }

    /// The cached value for the key, or the result of `load`. Only successful
    /// loads are cached. A value cached under the same key with another type
    /// is replaced.
    pub fn get_or_load<T, F>(&mut self, key: QueryKey, load: F) -> LsgResult<Arc<T>>
    where
        T: Any + Send + Sync,
        F: FnOnce() -> LsgResult<T>,
    {
        if let Some(v) = self.get::<T>(&key) {
            return Ok(v);
        }
        debug!("QueryCache: loading {:?}", key);
        let value = load()?;
        Ok(self.insert(key, value))
    }

    /// The cached value for the key, if it holds a `T`.
    pub fn get<T: Any + Send + Sync>(&self, key: &QueryKey) -> Option<Arc<T>> {
        let entry = self.entries.get(key)?;
        match entry.clone().downcast::<T>() {
            Ok(v) => {
                debug!("QueryCache: hit {:?}", key);
                Some(v)
            }
            Err(_) => {
                warn!("QueryCache: {:?} holds another type, reloading", key);
                None
            }
        }
    }

    pub fn insert<T: Any + Send + Sync>(&mut self, key: QueryKey, value: T) -> Arc<T> {
        let value = Arc::new(value);
        self.entries.insert(key, value.clone());
        value
    }

    pub fn contains(&self, key: &QueryKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn invalidate(&mut self, key: &QueryKey) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn loads_once_per_key() {
        let mut cache = QueryCache::new();
        let calls = Cell::new(0);
        let load = || -> LsgResult<Vec<u32>> {
            calls.set(calls.get() + 1);
            Ok(vec![1u32, 2, 3])
        };
        let a = cache.get_or_load(QueryKey::Trends, load).unwrap();
        let b = cache.get_or_load(QueryKey::Trends, load).unwrap();
        assert_eq!(calls.get(), 1);
        assert!(Arc::ptr_eq(&a, &b));

        cache
            .get_or_load(QueryKey::Map("districts.json".to_string()), load)
            .unwrap();
        cache
            .get_or_load(QueryKey::Map("block-panchayats.json".to_string()), load)
            .unwrap();
        assert_eq!(calls.get(), 3);
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn failures_are_not_cached() {
        let mut cache = QueryCache::new();
        let res: LsgResult<Arc<u32>> = cache.get_or_load(QueryKey::LocalBodies, || {
            UnknownKpiSnafu { kpi: "x" }.fail()
        });
        assert!(res.is_err());
        assert!(!cache.contains(&QueryKey::LocalBodies));
        let v = cache.get_or_load(QueryKey::LocalBodies, || Ok(5u32)).unwrap();
        assert_eq!(*v, 5);
    }

    #[test]
    fn invalidate_and_clear() {
        let mut cache = QueryCache::new();
        cache.get_or_load(QueryKey::Trends, || Ok(1u8)).unwrap();
        cache.get_or_load(QueryKey::LocalBodies, || Ok(2u8)).unwrap();
        assert!(cache.invalidate(&QueryKey::Trends));
        assert!(!cache.invalidate(&QueryKey::Trends));
        let v = cache.get_or_load(QueryKey::Trends, || Ok(9u8)).unwrap();
        assert_eq!(*v, 9);
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn get_and_insert() {
        let mut cache = QueryCache::new();
        assert!(cache.get::<u8>(&QueryKey::Trends).is_none());
        let v = cache.insert(QueryKey::Trends, 3u8);
        let hit = cache.get::<u8>(&QueryKey::Trends).unwrap();
        assert!(Arc::ptr_eq(&v, &hit));
        assert!(cache.get::<String>(&QueryKey::Trends).is_none());
        let again = cache
            .get_or_load(QueryKey::Trends, || -> LsgResult<u8> { Ok(7) })
            .unwrap();
        assert_eq!(*again, 3);
    }

    #[test]
    fn type_mismatch_reloads() {
        let mut cache = QueryCache::new();
        cache.get_or_load(QueryKey::Trends, || Ok(1u8)).unwrap();
        let s = cache
            .get_or_load(QueryKey::Trends, || Ok("trends".to_string()))
            .unwrap();
        assert_eq!(s.as_str(), "trends");
    }
}
