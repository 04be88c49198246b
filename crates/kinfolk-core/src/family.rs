//! Immutable family snapshots.
//!
//! A [`Family`] is the single input every computation in this crate borrows:
//! an id-keyed person map, the flat relationship list, and an optional root
//! person. Nothing here is mutated after construction; the editing layer
//! builds a new snapshot whenever its data changes.
//!
//! ## Versioning
//!
//! [`Family::content_hash`] is a BLAKE3 hash over everything kinship
//! resolution depends on. Callers that cache titles compare it against the
//! hash they cached under to decide whether the cache is stale.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::ErrorCode;
use crate::model::{Person, Relationship};

/// Failure to build or load a [`Family`].
#[derive(Debug, thiserror::Error)]
pub enum FamilyError {
    /// The family file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The family document is not valid JSON or has wrong field types.
    #[error("failed to parse family document: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two people share an id.
    #[error("duplicate person id '{0}'")]
    DuplicatePerson(String),
}

impl FamilyError {
    /// Machine-readable code for this failure.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound => {
                ErrorCode::FamilyFileMissing
            }
            Self::Io { .. } => ErrorCode::InternalUnexpected,
            Self::Parse(_) => ErrorCode::FamilyParseError,
            Self::DuplicatePerson(_) => ErrorCode::DuplicatePerson,
        }
    }
}

/// On-disk shape of a family file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FamilyDocument {
    #[serde(default, alias = "members")]
    pub people: Vec<Person>,
    #[serde(default)]
    pub relationships: Vec<Relationship>,
    #[serde(default, alias = "rootMemberId", skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
}

/// An immutable snapshot of people, relationships, and the root person.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Family {
    people: BTreeMap<String, Person>,
    relationships: Vec<Relationship>,
    root: Option<String>,
}

impl Family {
    /// Build a snapshot from people and relationships.
    ///
    /// Relationships that reference unknown people are kept; every consumer
    /// skips them, and [`crate::diagnostics`] reports them.
    ///
    /// # Errors
    ///
    /// Returns [`FamilyError::DuplicatePerson`] if two people share an id.
    pub fn new(
        people: impl IntoIterator<Item = Person>,
        relationships: Vec<Relationship>,
    ) -> Result<Self, FamilyError> {
        let mut map = BTreeMap::new();
        for person in people {
            if map.contains_key(&person.id) {
                return Err(FamilyError::DuplicatePerson(person.id));
            }
            map.insert(person.id.clone(), person);
        }

        Ok(Self {
            people: map,
            relationships,
            root: None,
        })
    }

    /// Set the root person.
    #[must_use]
    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Build a snapshot from a parsed [`FamilyDocument`].
    ///
    /// # Errors
    ///
    /// Returns [`FamilyError::DuplicatePerson`] if two people share an id.
    pub fn from_document(doc: FamilyDocument) -> Result<Self, FamilyError> {
        let mut family = Self::new(doc.people, doc.relationships)?;
        family.root = doc.root.filter(|r| !r.is_empty());
        Ok(family)
    }

    /// Parse a JSON family document.
    ///
    /// # Errors
    ///
    /// Returns [`FamilyError::Parse`] for malformed JSON and
    /// [`FamilyError::DuplicatePerson`] for repeated ids.
    pub fn from_json_str(json: &str) -> Result<Self, FamilyError> {
        let doc: FamilyDocument = serde_json::from_str(json)?;
        Self::from_document(doc)
    }

    /// Read and parse a JSON family file.
    ///
    /// # Errors
    ///
    /// Returns [`FamilyError::Io`] if the file cannot be read, otherwise the
    /// errors of [`Family::from_json_str`].
    #[instrument]
    pub fn load(path: &Path) -> Result<Self, FamilyError> {
        let content = std::fs::read_to_string(path).map_err(|source| FamilyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let family = Self::from_json_str(&content)?;
        debug!(
            people = family.len(),
            relationships = family.relationships.len(),
            "loaded family snapshot"
        );
        Ok(family)
    }

    /// Convert back into the on-disk document shape.
    #[must_use]
    pub fn to_document(&self) -> FamilyDocument {
        FamilyDocument {
            people: self.people.values().cloned().collect(),
            relationships: self.relationships.clone(),
            root: self.root.clone(),
        }
    }

    #[must_use]
    pub fn person(&self, id: &str) -> Option<&Person> {
        self.people.get(id)
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.people.contains_key(id)
    }

    /// People in ascending id order.
    pub fn people(&self) -> impl Iterator<Item = &Person> {
        self.people.values()
    }

    /// Person ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.people.keys().map(String::as_str)
    }

    #[must_use]
    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    #[must_use]
    pub fn root(&self) -> Option<&str> {
        self.root.as_deref()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.people.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// Parent relationships whose endpoints both exist.
    pub fn parent_links(&self) -> impl Iterator<Item = &Relationship> {
        self.relationships
            .iter()
            .filter(|r| r.is_parent() && self.links_known(r))
    }

    /// Spouse relationships whose endpoints both exist.
    pub fn spouse_links(&self) -> impl Iterator<Item = &Relationship> {
        self.relationships
            .iter()
            .filter(|r| r.is_spouse() && self.links_known(r))
    }

    /// Ids of the recorded parents of `child`, in relationship order.
    pub fn parents_of<'a>(&'a self, child: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.parent_links()
            .filter(move |r| r.target == child)
            .map(|r| r.source.as_str())
    }

    /// Ids of the recorded children of `parent`, in relationship order.
    pub fn children_of<'a>(&'a self, parent: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.parent_links()
            .filter(move |r| r.source == parent)
            .map(|r| r.target.as_str())
    }

    fn links_known(&self, rel: &Relationship) -> bool {
        self.people.contains_key(&rel.source) && self.people.contains_key(&rel.target)
    }

    /// BLAKE3 hash of the kinship-relevant content of this snapshot.
    ///
    /// Covers the sorted relationship facts plus each person's id, gender,
    /// and birth date. Names, statuses, and other display fields are
    /// excluded so cosmetic edits do not invalidate cached titles.
    #[must_use]
    pub fn content_hash(&self) -> String {
        let mut facts: Vec<(&str, &str, &str)> = self
            .relationships
            .iter()
            .map(|r| (r.kind.as_str(), r.source.as_str(), r.target.as_str()))
            .collect();
        facts.sort_unstable();

        let mut hasher = blake3::Hasher::new();
        for (kind, source, target) in facts {
            hasher.update(kind.as_bytes());
            hasher.update(b"\x00");
            hasher.update(source.as_bytes());
            hasher.update(b"\x00");
            hasher.update(target.as_bytes());
            hasher.update(b"\x00");
        }
        hasher.update(b"\x01");
        for person in self.people.values() {
            hasher.update(person.id.as_bytes());
            hasher.update(b"\x00");
            hasher.update(person.gender.as_str().as_bytes());
            hasher.update(b"\x00");
            if let Some(birth) = person.birth_date {
                hasher.update(birth.to_string().as_bytes());
            }
            hasher.update(b"\x00");
        }
        format!("blake3:{}", hasher.finalize())
    }
}
