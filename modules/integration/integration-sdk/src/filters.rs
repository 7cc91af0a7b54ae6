//! Per-consumer resource scope.

use std::collections::BTreeSet;

/// The set of resource codes (prison identifiers) a consumer may access.
///
/// Created once per inbound request and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConsumerFilters {
    /// No restriction: every resource is in scope.
    #[default]
    Unrestricted,
    /// Only the listed resource codes are in scope. An empty set denies all.
    RestrictedTo(BTreeSet<String>),
}

impl ConsumerFilters {
    /// Restrict to the given resource codes.
    #[must_use]
    pub fn restricted_to<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::RestrictedTo(codes.into_iter().map(Into::into).collect())
    }

    /// Build filters from an optional list, `None` meaning unrestricted.
    #[must_use]
    pub fn from_optional(codes: Option<Vec<String>>) -> Self {
        codes.map_or(Self::Unrestricted, Self::restricted_to)
    }

    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        matches!(self, Self::Unrestricted)
    }

    #[must_use]
    pub fn allows(&self, code: &str) -> bool {
        match self {
            Self::Unrestricted => true,
            Self::RestrictedTo(codes) => codes.contains(code),
        }
    }
}
