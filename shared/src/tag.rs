use std::fmt;

use serde::{Deserialize, Serialize};

/// Hierarchical classification label in dotted form, e.g. `quest.intro.line`.
///
/// Tags form a tree by path segment: `quest.intro` is an ancestor of
/// `quest.intro.line`. A non-exact query matches a tag against itself and
/// every ancestor, so a node tagged `quest.intro.line` answers a query for
/// `quest.intro`; an exact query compares whole paths.
#[derive(Debug, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Tag(String);

impl Tag {
    pub fn new(path: &str) -> Self {
        Self(path.to_string())
    }

    pub fn path(&self) -> &str {
        &self.0
    }

    /// Whether this tag answers a query for `query`.
    pub fn matches(&self, query: &Tag, exact: bool) -> bool {
        if self.0 == query.0 {
            return true;
        }
        if exact {
            return false;
        }
        self.0.len() > query.0.len()
            && self.0.starts_with(query.0.as_str())
            && self.0.as_bytes()[query.0.len()] == b'.'
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Tag {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

/// Ordered, duplicate-free collection of [`Tag`]s carried by a node.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct TagSet {
    tags: Vec<Tag>,
}

impl TagSet {
    pub fn new() -> Self {
        Self { tags: Vec::new() }
    }

    /// Returns false when the tag was already present.
    pub fn insert(&mut self, tag: Tag) -> bool {
        if self.tags.contains(&tag) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.tags.iter()
    }

    /// Whether any carried tag answers a query for `tag`.
    pub fn has(&self, tag: &Tag, exact: bool) -> bool {
        self.tags.iter().any(|carried| carried.matches(tag, exact))
    }

    /// Whether at least one tag in `query` is answered.
    pub fn has_any(&self, query: &TagSet, exact: bool) -> bool {
        query.iter().any(|tag| self.has(tag, exact))
    }

    /// Whether every tag in `query` is answered.
    pub fn has_all(&self, query: &TagSet, exact: bool) -> bool {
        query.iter().all(|tag| self.has(tag, exact))
    }
}

impl FromIterator<Tag> for TagSet {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        let mut set = TagSet::new();
        for tag in iter {
            set.insert(tag);
        }
        set
    }
}
