use std::collections::BTreeSet;

use crate::entity::ElementKey;

/// Outcome of matching an existing keyed population against a new source.
///
/// Ordering contract:
/// - `enter` and `update` follow source order.
/// - `exit` follows the order of the old population.
/// - `duplicates` lists source keys seen more than once, in source order;
///   only the first occurrence participates in the diff.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyedDiff {
    pub enter: Vec<ElementKey>,
    pub update: Vec<ElementKey>,
    pub exit: Vec<ElementKey>,
    pub duplicates: Vec<ElementKey>,
}

impl KeyedDiff {
    /// True when the population's key set is unchanged.
    pub fn is_stable(&self) -> bool {
        self.enter.is_empty() && self.exit.is_empty()
    }

    /// Number of elements alive after the diff is applied.
    pub fn surviving(&self) -> usize {
        self.enter.len() + self.update.len()
    }
}

/// Keyed enter/update/exit diff.
///
/// Identity is by key only: a key present on both sides is an update no
/// matter how its datum changed.
pub fn diff_keys<'a, 'b>(
    old: impl IntoIterator<Item = &'a str>,
    new: impl IntoIterator<Item = &'b str>,
) -> KeyedDiff {
    let old: Vec<&str> = old.into_iter().collect();
    let old_set: BTreeSet<&str> = old.iter().copied().collect();

    let mut out = KeyedDiff::default();
    let mut seen: BTreeSet<&str> = BTreeSet::new();
    for key in new {
        if !seen.insert(key) {
            out.duplicates.push(ElementKey::from(key));
            continue;
        }
        if old_set.contains(key) {
            out.update.push(ElementKey::from(key));
        } else {
            out.enter.push(ElementKey::from(key));
        }
    }

    let mut exited: BTreeSet<&str> = BTreeSet::new();
    for key in old {
        if !seen.contains(key) && exited.insert(key) {
            out.exit.push(ElementKey::from(key));
        }
    }

    out
}
