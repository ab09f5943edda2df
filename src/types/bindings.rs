//! Bind keys and ordered binding lists.

use super::BindValue;
use std::fmt;

/// Placeholder a value is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BindKey {
    /// 1-based ordinal (`:1`, `:2`, ...).
    Position(usize),
    /// Named placeholder (`:name`), stored without the colon.
    Name(String),
}

impl BindKey {
    /// The ordinal, if the key is positional.
    pub fn position(&self) -> Option<usize> {
        match self {
            BindKey::Position(p) => Some(*p),
            BindKey::Name(_) => None,
        }
    }
}

impl fmt::Display for BindKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindKey::Position(p) => write!(f, ":{}", p),
            BindKey::Name(name) => write!(f, ":{}", name),
        }
    }
}

impl From<usize> for BindKey {
    fn from(position: usize) -> Self {
        BindKey::Position(position)
    }
}

impl From<&str> for BindKey {
    fn from(name: &str) -> Self {
        BindKey::Name(name.trim_start_matches(':').to_string())
    }
}

impl From<String> for BindKey {
    fn from(name: String) -> Self {
        BindKey::from(name.as_str())
    }
}

/// Ordered mapping from bind key to value.
///
/// Insertion order is kept; it is the order binds reach the statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bindings {
    entries: Vec<(BindKey, BindValue)>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `values` to positions 1..=n.
    pub fn positional<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<BindValue>,
    {
        values
            .into_iter()
            .enumerate()
            .map(|(i, v)| (BindKey::Position(i + 1), v.into()))
            .collect()
    }

    /// Append a binding. A key already present is replaced in place.
    pub fn push(&mut self, key: impl Into<BindKey>, value: impl Into<BindValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Builder form of [`push`](Self::push).
    pub fn with(mut self, key: impl Into<BindKey>, value: impl Into<BindValue>) -> Self {
        self.push(key, value);
        self
    }

    /// Value bound at `key`, if any.
    pub fn get(&self, key: &BindKey) -> Option<&BindValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&BindKey, &BindValue)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Apply `f` to every value, keeping keys and order.
    pub fn map_values(self, mut f: impl FnMut(BindValue) -> BindValue) -> Self {
        Self {
            entries: self.entries.into_iter().map(|(k, v)| (k, f(v))).collect(),
        }
    }
}

impl<K: Into<BindKey>, V: Into<BindValue>> FromIterator<(K, V)> for Bindings {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut bindings = Bindings::new();
        for (k, v) in iter {
            bindings.push(k, v);
        }
        bindings
    }
}

impl IntoIterator for Bindings {
    type Item = (BindKey, BindValue);
    type IntoIter = std::vec::IntoIter<(BindKey, BindValue)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
