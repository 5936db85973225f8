//! Named single-precision parameters of one fractal instance.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Parameter values keyed by name, iterated in insertion order.
///
/// An absent key means the fractal does not support that control, which is
/// different from a key holding `0.0`. Keys are never removed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterMap {
    entries: Vec<(String, f32)>,
}

impl ParameterMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<f32> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|&(_, value)| value)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn set(&mut self, name: &str, value: f32) {
        match self.entries.iter_mut().find(|(key, _)| key == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name.to_owned(), value)),
        }
    }

    /// Applies `f` to the value stored under `name`; does nothing when the key is absent.
    pub fn update(&mut self, name: &str, f: impl FnOnce(f32) -> f32) -> Option<f32> {
        let entry = self.entries.iter_mut().find(|(key, _)| key == name)?;
        entry.1 = f(entry.1);

        Some(entry.1)
    }

    #[must_use]
    pub fn snapshot(&self) -> Vec<(String, f32)> {
        self.entries.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f32)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), *value))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, f32)> for ParameterMap {
    fn from_iter<I: IntoIterator<Item = (S, f32)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (name, value) in iter {
            map.set(&name.into(), value);
        }
        map
    }
}

/// A parameter map shared between the interactive thread and render workers.
///
/// Every read-modify-write happens under a single lock acquisition and renders
/// copy the whole map, so a render never sees a torn mix of old and new values.
#[derive(Debug, Clone, Default)]
pub struct SharedParameters {
    inner: Arc<Mutex<ParameterMap>>,
}

impl SharedParameters {
    #[must_use]
    pub fn new(map: ParameterMap) -> Self {
        Self {
            inner: Arc::new(Mutex::new(map)),
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<f32> {
        self.lock().get(name)
    }

    pub fn set(&self, name: &str, value: f32) {
        self.lock().set(name, value);
    }

    /// Copy of the whole map taken atomically.
    #[must_use]
    pub fn snapshot(&self) -> ParameterMap {
        self.lock().clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&mut ParameterMap) -> R) -> R {
        f(&mut self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, ParameterMap> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_absent_key_differs_from_zero() {
        let mut map = ParameterMap::new();
        map.set("centerX", 0.0);

        assert_eq!(map.get("centerX"), Some(0.0));
        assert_eq!(map.get("centerY"), None);
        assert!(!map.contains("centerY"));
    }

    #[test]
    fn test_set_overwrites_without_reordering() {
        let mut map: ParameterMap = [("centerX", 1.0), ("centerY", 2.0), ("scale", 3.0)]
            .into_iter()
            .collect();

        map.set("centerX", 9.0);
        map.set("cX", -0.7);

        assert_eq!(
            map.snapshot(),
            vec![
                ("centerX".to_owned(), 9.0),
                ("centerY".to_owned(), 2.0),
                ("scale".to_owned(), 3.0),
                ("cX".to_owned(), -0.7),
            ]
        );
    }

    #[test]
    fn test_update_ignores_absent_keys() {
        let mut map: ParameterMap = [("scale", 2.0)].into_iter().collect();

        assert_eq!(map.update("scale", |s| s * 1.5), Some(3.0));
        assert_eq!(map.update("centerX", |x| x + 1.0), None);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_shared_snapshot_is_detached_copy() {
        let shared = SharedParameters::new([("scale", 1.0)].into_iter().collect());

        let snapshot = shared.snapshot();
        shared.set("scale", 4.0);

        assert_eq!(snapshot.get("scale"), Some(1.0));
        assert_eq!(shared.get("scale"), Some(4.0));
    }

    #[test]
    fn test_concurrent_updates_are_not_lost() {
        let shared = SharedParameters::new([("centerX", 0.0)].into_iter().collect());

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for _ in 0..250 {
                        shared.with(|map| map.update("centerX", |x| x + 1.0));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(shared.get("centerX"), Some(1000.0));
    }
}
