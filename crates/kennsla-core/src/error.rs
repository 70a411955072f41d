//! Error types for the engine operations.
//!
//! Business failures are explicit values, not exceptions thrown across
//! layers: every engine operation returns either a success value or one of
//! the tagged failures below.

use std::fmt;

use thiserror::Error;

/// Machine-readable business-rule violation codes.
///
/// The string forms are part of the caller-facing contract and must be
/// preserved verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationCode {
  CourseAlreadyHasMainTeacher,
  PersonAlreadyRegisteredAsTeacherInCourse,
}

impl ValidationCode {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::CourseAlreadyHasMainTeacher => "COURSE_ALREADY_HAS_A_MAIN_TEACHER",
      Self::PersonAlreadyRegisteredAsTeacherInCourse => {
        "PERSON_ALREADY_REGISTERED_AS_TEACHER_IN_COURSE"
      }
    }
  }
}

impl fmt::Display for ValidationCode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// An error returned by an engine operation.
///
/// Generic over the store's own error type, which passes through untouched
/// as [`ServiceError::Store`] — infrastructure failures are distinct from
/// the business taxonomy.
#[derive(Debug, Error)]
pub enum ServiceError<E> {
  /// The referenced person or course instance does not exist. Deliberately
  /// does not say which.
  #[error("person or course instance not found")]
  NotFound,

  /// Page numbers are 1-based; zero is rejected, never clamped.
  #[error("invalid page number: {0}")]
  InvalidPage(u32),

  /// The requested page lies beyond the last page of a non-empty result.
  #[error("page {page} out of range: only {page_count} page(s)")]
  PageOutOfRange { page: u32, page_count: u32 },

  /// A business rule rejected the request.
  #[error("{0}")]
  Validation(ValidationCode),

  /// The storage backend failed.
  #[error("store error: {0}")]
  Store(#[source] E),
}

impl<E> ServiceError<E> {
  /// The validation code, if this is a business-rule rejection.
  pub fn validation_code(&self) -> Option<ValidationCode> {
    match self {
      Self::Validation(code) => Some(*code),
      _ => None,
    }
  }
}
