use std::borrow::Cow;
use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Key → threshold (preconditions, desired states) or key → delta (effects).
pub type Conditions = BTreeMap<Cow<'static, str>, i32>;

/// Symbolic snapshot of agent and world facts. Unset keys read as `0`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct WorldState {
    values: BTreeMap<Cow<'static, str>, i32>,
}

impl WorldState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> i32 {
        self.values.get(key).copied().unwrap_or(0)
    }

    pub fn set(&mut self, key: impl Into<Cow<'static, str>>, value: i32) {
        self.values.insert(key.into(), value);
    }

    pub fn with(mut self, key: impl Into<Cow<'static, str>>, value: i32) -> Self {
        self.set(key, value);
        self
    }

    /// Adds `delta` to the value at `key`.
    pub fn add(&mut self, key: impl Into<Cow<'static, str>>, delta: i32) {
        let value = self.values.entry(key.into()).or_insert(0);
        *value = value.saturating_add(delta);
    }

    /// `true` if every key in `requirements` is at or above its threshold.
    pub fn meets(&self, requirements: &Conditions) -> bool {
        requirements
            .iter()
            .all(|(key, &threshold)| self.get(key) >= threshold)
    }

    /// A copy with every effect added to the current values.
    pub fn applied(&self, effects: &Conditions) -> WorldState {
        let mut next = self.clone();
        for (key, &delta) in effects {
            next.add(key.clone(), delta);
        }
        next
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i32)> {
        self.values.iter().map(|(k, v)| (k.as_ref(), *v))
    }
}

impl<K> FromIterator<(K, i32)> for WorldState
where
    K: Into<Cow<'static, str>>,
{
    fn from_iter<I: IntoIterator<Item = (K, i32)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
