use std::fmt;

/// Machine-readable error and diagnostic codes.
///
/// Load failures (`E1xxx`) stop a command; data findings (`E3xxx`) are
/// reported by [`crate::diagnostics`] but never prevent a computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ErrorCode {
    FamilyFileMissing,
    FamilyParseError,
    ConfigParseError,
    DuplicatePerson,
    PersonNotFound,
    RootNotSet,
    DanglingRelationship,
    SelfRelationship,
    ExcessParents,
    DuplicateRelationship,
    ParentCycle,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::FamilyFileMissing => "E1001",
            Self::FamilyParseError => "E1002",
            Self::ConfigParseError => "E1003",
            Self::DuplicatePerson => "E2001",
            Self::PersonNotFound => "E2002",
            Self::RootNotSet => "E2003",
            Self::DanglingRelationship => "E3001",
            Self::SelfRelationship => "E3002",
            Self::ExcessParents => "E3003",
            Self::DuplicateRelationship => "E3004",
            Self::ParentCycle => "E3005",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::FamilyFileMissing => "Family file not found",
            Self::FamilyParseError => "Family file parse error",
            Self::ConfigParseError => "Config file parse error",
            Self::DuplicatePerson => "Duplicate person id",
            Self::PersonNotFound => "Person not found",
            Self::RootNotSet => "Root person not set",
            Self::DanglingRelationship => "Relationship references an unknown person",
            Self::SelfRelationship => "Relationship links a person to themselves",
            Self::ExcessParents => "Person has more than two parents",
            Self::DuplicateRelationship => "Relationship fact recorded more than once",
            Self::ParentCycle => "Person is their own ancestor",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to users.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::FamilyFileMissing => Some("Pass --file <path> or create family.json here."),
            Self::FamilyParseError => Some("Fix the JSON syntax or field types and retry."),
            Self::ConfigParseError => Some("Fix syntax in .kinfolk/config.toml and retry."),
            Self::DuplicatePerson => Some("Give every person a unique id."),
            Self::PersonNotFound => Some("Check the id with `kin search <name>`."),
            Self::RootNotSet => Some("Pass --root <id> or set \"root\" in the family file."),
            Self::DanglingRelationship => Some("Remove the relationship or add the missing person."),
            Self::SelfRelationship => Some("Remove the relationship."),
            Self::ExcessParents => Some("Keep at most two parent links per child."),
            Self::DuplicateRelationship => None,
            Self::ParentCycle => Some("Remove one parent link in the cycle."),
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }

    /// Returns `true` for data-quality findings that are tolerated.
    #[must_use]
    pub const fn is_warning(self) -> bool {
        matches!(
            self,
            Self::DanglingRelationship
                | Self::SelfRelationship
                | Self::ExcessParents
                | Self::DuplicateRelationship
                | Self::ParentCycle
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::ErrorCode;
    use std::collections::HashSet;

    const ALL: [ErrorCode; 12] = [
        ErrorCode::FamilyFileMissing,
        ErrorCode::FamilyParseError,
        ErrorCode::ConfigParseError,
        ErrorCode::DuplicatePerson,
        ErrorCode::PersonNotFound,
        ErrorCode::RootNotSet,
        ErrorCode::DanglingRelationship,
        ErrorCode::SelfRelationship,
        ErrorCode::ExcessParents,
        ErrorCode::DuplicateRelationship,
        ErrorCode::ParentCycle,
        ErrorCode::InternalUnexpected,
    ];

    #[test]
    fn all_codes_are_unique() {
        let mut seen = HashSet::new();
        for code in ALL {
            assert!(seen.insert(code.code()), "duplicate code {}", code.code());
        }
    }

    #[test]
    fn code_format_is_machine_friendly() {
        for code in ALL {
            let s = code.code();
            assert_eq!(s.len(), 5);
            assert!(s.starts_with('E'));
            assert!(s.chars().skip(1).all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn data_findings_are_warnings() {
        assert!(ErrorCode::ParentCycle.is_warning());
        assert!(ErrorCode::DanglingRelationship.code().starts_with("E3"));
        assert!(!ErrorCode::FamilyParseError.is_warning());
    }
}
