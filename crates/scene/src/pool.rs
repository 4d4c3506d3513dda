use std::collections::{BTreeMap, BTreeSet};

use crate::diff::{KeyedDiff, diff_keys};
use crate::entity::ElementKey;

/// Keyed population of retained visual elements.
///
/// Elements are looked up by key; iteration follows the order of the source
/// collection from the most recent [`ElementPool::reconcile`].
#[derive(Debug, Clone, PartialEq)]
pub struct ElementPool<E> {
    elements: BTreeMap<ElementKey, E>,
    order: Vec<ElementKey>,
}

impl<E> Default for ElementPool<E> {
    fn default() -> Self {
        Self {
            elements: BTreeMap::new(),
            order: Vec::new(),
        }
    }
}

impl<E> ElementPool<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.elements.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&E> {
        self.elements.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut E> {
        self.elements.get_mut(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &ElementKey> {
        self.order.iter()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ElementKey, &E)> {
        self.order
            .iter()
            .filter_map(|k| self.elements.get(k).map(|e| (k, e)))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut E> {
        let Self { elements, order } = self;
        let mut by_key: BTreeMap<&ElementKey, &mut E> = elements.iter_mut().collect();
        order.iter().filter_map(move |k| by_key.remove(k))
    }

    /// Removes every element. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let n = self.order.len();
        self.elements.clear();
        self.order.clear();
        n
    }

    /// Reconciles the pool against `source`.
    ///
    /// Exits are removed first. Keys new to the pool are built with `enter`;
    /// `update` then runs on every surviving and newly created element with
    /// its current datum. Repeated source keys after the first are skipped.
    pub fn reconcile<T>(
        &mut self,
        source: &[T],
        key_of: impl Fn(&T) -> &str,
        mut enter: impl FnMut(&T) -> E,
        mut update: impl FnMut(&mut E, &T),
    ) -> KeyedDiff {
        let diff = diff_keys(
            self.order.iter().map(ElementKey::as_str),
            source.iter().map(&key_of),
        );

        for key in &diff.exit {
            self.elements.remove(key);
        }

        let mut seen: BTreeSet<&str> = BTreeSet::new();
        let mut order = Vec::with_capacity(diff.surviving());
        for item in source {
            let key = key_of(item);
            if !seen.insert(key) {
                continue;
            }
            let element = self
                .elements
                .entry(ElementKey::from(key))
                .or_insert_with(|| enter(item));
            update(element, item);
            order.push(ElementKey::from(key));
        }
        self.order = order;

        diff
    }
}

#[cfg(test)]
mod tests {
    use super::ElementPool;

    #[derive(Debug, Clone, PartialEq)]
    struct Datum {
        key: &'static str,
        value: i32,
    }

    #[derive(Debug, Clone, PartialEq)]
    struct Element {
        generation: u32,
        value: i32,
    }

    fn d(key: &'static str, value: i32) -> Datum {
        Datum { key, value }
    }

    fn run(pool: &mut ElementPool<Element>, source: &[Datum], generation: u32) -> super::KeyedDiff {
        pool.reconcile(
            source,
            |d| d.key,
            |_| Element {
                generation,
                value: 0,
            },
            |e, d| e.value = d.value,
        )
    }

    #[test]
    fn enter_creates_and_update_applies() {
        let mut pool = ElementPool::new();
        let diff = run(&mut pool, &[d("a", 1), d("b", 2)], 0);
        assert_eq!(diff.enter.len(), 2);
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.get("b").map(|e| e.value), Some(2));
    }

    #[test]
    fn survivors_keep_identity_and_take_new_datum() {
        let mut pool = ElementPool::new();
        run(&mut pool, &[d("a", 1)], 0);
        let diff = run(&mut pool, &[d("a", 9), d("c", 3)], 1);
        assert_eq!(diff.update.len(), 1);
        let a = pool.get("a").expect("a survives");
        assert_eq!(a.generation, 0);
        assert_eq!(a.value, 9);
        assert_eq!(pool.get("c").map(|e| e.generation), Some(1));
    }

    #[test]
    fn exit_removes_and_reentry_is_fresh() {
        let mut pool = ElementPool::new();
        run(&mut pool, &[d("a", 1)], 0);
        run(&mut pool, &[], 1);
        assert!(pool.is_empty());
        run(&mut pool, &[d("a", 1)], 2);
        assert_eq!(pool.get("a").map(|e| e.generation), Some(2));
    }

    #[test]
    fn second_pass_on_same_source_is_stable() {
        let mut pool = ElementPool::new();
        let source = [d("a", 1), d("b", 2), d("c", 3)];
        run(&mut pool, &source, 0);
        let before: Vec<String> = pool.keys().map(|k| k.0.clone()).collect();
        let diff = run(&mut pool, &source, 1);
        assert!(diff.is_stable());
        let after: Vec<String> = pool.keys().map(|k| k.0.clone()).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn iteration_follows_latest_source_order() {
        let mut pool = ElementPool::new();
        run(&mut pool, &[d("a", 1), d("b", 2)], 0);
        run(&mut pool, &[d("b", 2), d("a", 1), d("b", 5)], 0);
        let order: Vec<&str> = pool.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(order, vec!["b", "a"]);
        assert_eq!(pool.get("b").map(|e| e.value), Some(2));
        assert_eq!(pool.clear(), 2);
    }

    #[test]
    fn mutable_iteration_follows_source_order() {
        let mut pool = ElementPool::new();
        run(&mut pool, &[d("c", 1), d("a", 2), d("b", 3)], 0);
        for (i, e) in pool.iter_mut().enumerate() {
            e.generation = i as u32;
        }
        let seen: Vec<(&str, u32)> = pool.iter().map(|(k, e)| (k.as_str(), e.generation)).collect();
        assert_eq!(seen, vec![("c", 0), ("a", 1), ("b", 2)]);
    }
}
