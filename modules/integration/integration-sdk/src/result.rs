//! Success-or-classified-errors container used by every upstream call.
//!
//! A result is either a success carrying a payload and no errors, or a
//! failure carrying no payload and one or more errors. The error list is
//! kept in call order; that order is part of the contract.
//!
//! ## Merge law
//!
//! Results for one logical operation are combined with [`UpstreamResult::zip`]
//! or [`combine_all`]: if any input carries errors, the merged result has no
//! payload and the concatenation of every input's errors in declared order.
//! Only when every input succeeds is a merged payload built.

use serde::Serialize;

use crate::error::{InvariantViolation, UpstreamApi, UpstreamError, UpstreamErrorType};

/// Outcome of one or more upstream calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpstreamResult<T> {
    data: Option<T>,
    errors: Vec<UpstreamError>,
}

impl<T> UpstreamResult<T> {
    #[must_use]
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            errors: Vec::new(),
        }
    }

    #[must_use]
    pub fn failure(errors: Vec<UpstreamError>) -> Self {
        Self { data: None, errors }
    }

    #[must_use]
    pub fn from_error(error: UpstreamError) -> Self {
        Self::failure(vec![error])
    }

    /// Build a result from raw parts as reported by an adapter.
    ///
    /// Errors win: a payload accompanying errors is discarded.
    #[must_use]
    pub fn from_parts(data: Option<T>, errors: Vec<UpstreamError>) -> Self {
        if errors.is_empty() {
            Self { data, errors }
        } else {
            Self::failure(errors)
        }
    }

    #[must_use]
    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    #[must_use]
    pub fn errors(&self) -> &[UpstreamError] {
        &self.errors
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Scan the errors oldest-first for one of the given type.
    #[must_use]
    pub fn has_error(&self, kind: UpstreamErrorType) -> bool {
        self.errors.iter().any(|e| e.kind == kind)
    }

    #[must_use]
    pub fn into_parts(self) -> (Option<T>, Vec<UpstreamError>) {
        (self.data, self.errors)
    }

    /// Shape a successful payload. Errors pass through untouched.
    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> UpstreamResult<U> {
        if self.errors.is_empty() {
            UpstreamResult {
                data: self.data.map(f),
                errors: self.errors,
            }
        } else {
            UpstreamResult::failure(self.errors)
        }
    }

    /// Merge two independent legs, `self` first.
    #[must_use]
    pub fn zip<U>(self, other: UpstreamResult<U>) -> UpstreamResult<(T, U)> {
        if self.errors.is_empty() && other.errors.is_empty() {
            return UpstreamResult {
                data: self.data.zip(other.data),
                errors: Vec::new(),
            };
        }
        let mut errors = self.errors;
        errors.extend(other.errors);
        UpstreamResult::failure(errors)
    }

    /// Resolve into the payload or the errors to propagate.
    ///
    /// # Errors
    ///
    /// Returns [`InvariantViolation`] when the result carries neither a
    /// payload nor errors.
    pub fn settle(
        self,
        system: UpstreamApi,
    ) -> Result<Result<T, Vec<UpstreamError>>, InvariantViolation> {
        if !self.errors.is_empty() {
            return Ok(Err(self.errors));
        }
        self.data
            .map(Ok)
            .ok_or_else(|| InvariantViolation::missing_data(system))
    }
}

/// Merge any number of independent legs in iteration order.
#[must_use]
pub fn combine_all<T, I>(results: I) -> UpstreamResult<Vec<T>>
where
    I: IntoIterator<Item = UpstreamResult<T>>,
{
    let mut errors = Vec::new();
    let mut items = Some(Vec::new());
    for result in results {
        if result.errors.is_empty() {
            match (items.as_mut(), result.data) {
                (Some(acc), Some(item)) => acc.push(item),
                _ => items = None,
            }
        } else {
            errors.extend(result.errors);
        }
    }
    if errors.is_empty() {
        UpstreamResult {
            data: items,
            errors,
        }
    } else {
        UpstreamResult::failure(errors)
    }
}
