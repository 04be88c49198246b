use serde::{Deserialize, Serialize};
use std::fmt;

/// The two kinds of recorded family fact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipKind {
    /// Directional: `source` is a parent of `target`.
    Parent,
    /// Symmetric in meaning, stored once per couple.
    Spouse,
}

impl RelationshipKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Parent => "parent",
            Self::Spouse => "spouse",
        }
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed fact linking two people.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Relationship {
    pub id: String,
    #[serde(alias = "sourceMemberId")]
    pub source: String,
    #[serde(alias = "targetMemberId")]
    pub target: String,
    #[serde(alias = "type")]
    pub kind: RelationshipKind,
}

impl Relationship {
    /// `parent` is a parent of `child`.
    pub fn parent(
        id: impl Into<String>,
        parent: impl Into<String>,
        child: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            source: parent.into(),
            target: child.into(),
            kind: RelationshipKind::Parent,
        }
    }

    /// `a` and `b` are (or were) married.
    pub fn spouse(id: impl Into<String>, a: impl Into<String>, b: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: a.into(),
            target: b.into(),
            kind: RelationshipKind::Spouse,
        }
    }

    #[must_use]
    pub const fn is_parent(&self) -> bool {
        matches!(self.kind, RelationshipKind::Parent)
    }

    #[must_use]
    pub const fn is_spouse(&self) -> bool {
        matches!(self.kind, RelationshipKind::Spouse)
    }

    /// The endpoint pair ordered lexicographically.
    ///
    /// Used as the identity of a couple regardless of storage direction.
    #[must_use]
    pub fn sorted_pair(&self) -> (&str, &str) {
        if self.source <= self.target {
            (&self.source, &self.target)
        } else {
            (&self.target, &self.source)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorted_pair_ignores_direction() {
        let a = Relationship::spouse("r1", "zed", "amy");
        let b = Relationship::spouse("r2", "amy", "zed");
        assert_eq!(a.sorted_pair(), ("amy", "zed"));
        assert_eq!(a.sorted_pair(), b.sorted_pair());
    }

    #[test]
    fn deserializes_type_alias() {
        let json = r#"{"id":"r1","sourceMemberId":"a","targetMemberId":"b","type":"parent"}"#;
        let rel: Relationship = serde_json::from_str(json).expect("parse relationship");
        assert!(rel.is_parent());
        assert_eq!(rel.source, "a");
        assert_eq!(rel.target, "b");
    }
}
