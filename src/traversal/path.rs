//! Canonical addressing of states across Map/Parallel nesting.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One segment of a [`StatePath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Segment {
    /// A state id within its `States` mapping.
    State(String),
    /// A branch index within a Parallel state's `Branches` array.
    Branch(usize),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::State(id) => write!(f, "{id}"),
            Segment::Branch(index) => write!(f, "{index}"),
        }
    }
}

/// Ordered address of a state at arbitrary nesting depth.
///
/// A path terminates in the addressed state's id. Descending into a Map
/// sub-workflow extends the path by the Map state's id; descending into a
/// Parallel branch extends it by the Parallel state's id and the branch
/// index. State ids are only unique within their own `States` mapping, so a
/// path is the only way to address a state unambiguously.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatePath(Vec<Segment>);

impl StatePath {
    /// The empty path, addressing the top-level scope.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// This path extended by a state id.
    #[must_use]
    pub fn child(&self, id: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(Segment::State(id.into()));
        Self(segments)
    }

    /// This path extended by a branch index.
    #[must_use]
    pub fn branch(&self, index: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(Segment::Branch(index));
        Self(segments)
    }

    /// The path with its last segment removed; root stays root.
    #[must_use]
    pub fn parent(&self) -> Self {
        let mut segments = self.0.clone();
        segments.pop();
        Self(segments)
    }

    /// The final segment, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Segment> {
        self.0.last()
    }
}

impl fmt::Display for StatePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, segment) in self.0.iter().enumerate() {
            if index > 0 {
                write!(f, "/")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl From<Vec<Segment>> for StatePath {
    fn from(segments: Vec<Segment>) -> Self {
        Self(segments)
    }
}
