use std::fmt;

use serde::Serialize;

/// The four attribute categories synced to an index, in submission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeCategory {
    Searchable,
    Displayable,
    Filterable,
    Sortable,
}

impl AttributeCategory {
    pub const ALL: [AttributeCategory; 4] = [
        Self::Searchable,
        Self::Displayable,
        Self::Filterable,
        Self::Sortable,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Searchable => "searchable",
            Self::Displayable => "displayable",
            Self::Filterable => "filterable",
            Self::Sortable => "sortable",
        }
    }

    /// Human-readable action used as the task key in reports.
    pub fn description(self) -> &'static str {
        match self {
            Self::Searchable => "Update searchable attributes",
            Self::Displayable => "Update displayable attributes",
            Self::Filterable => "Update filterable attributes",
            Self::Sortable => "Update sortable attributes",
        }
    }
}

impl fmt::Display for AttributeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered set of field names. The first occurrence of a name wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AttributeSet(Vec<String>);

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>) -> bool {
        let field = field.into();
        if self.contains(&field) {
            return false;
        }
        self.0.push(field);
        true
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.iter().any(|f| f == field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }

    /// Fields of `self` that are not in `other`, keeping `self`'s order.
    pub fn difference(&self, other: &AttributeSet) -> AttributeSet {
        self.0
            .iter()
            .filter(|f| !other.contains(f))
            .cloned()
            .collect()
    }
}

impl<S: Into<String>> FromIterator<S> for AttributeSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = AttributeSet::new();
        for field in iter {
            set.insert(field);
        }
        set
    }
}

impl<'a> IntoIterator for &'a AttributeSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
