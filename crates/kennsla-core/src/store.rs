//! The `CourseStore` trait — the repository abstraction the engines
//! depend on.
//!
//! The trait is implemented by storage backends (e.g.
//! `kennsla-store-sqlite`) and by the in-memory store used in tests.
//! Higher layers depend on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  course::{CourseInstance, CourseOffering},
  person::{Person, Ssn},
  registration::{NewTeacherRegistration, TeacherRegistration, TeacherType},
};

/// Abstraction over a course-registration storage backend.
///
/// Writes are staged by [`CourseStore::create_teacher_registration`] and
/// [`CourseStore::update_teacher_registration_type`] and made durable by
/// [`CourseStore::commit`]; a failed commit must leave no partial writes
/// visible.
///
/// The backend must serialize the read-then-write sequence of a single
/// engine call with respect to other callers targeting the same course
/// instance — the engines rely on that to keep the main-teacher invariant
/// under concurrent requests.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes.
pub trait CourseStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Look up a person by SSN. Returns `None` if not found.
  fn find_person_by_ssn<'a>(
    &'a self,
    ssn: &'a Ssn,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + 'a;

  /// Look up a course instance by ID. Returns `None` if not found.
  fn find_course_instance(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<CourseInstance>, Self::Error>> + Send + '_;

  /// All course instances offered in `semester`, joined with their
  /// templates. An unknown semester yields an empty list, not an error.
  fn list_course_instances_by_semester<'a>(
    &'a self,
    semester: &'a str,
  ) -> impl Future<Output = Result<Vec<CourseOffering>, Self::Error>> + Send + 'a;

  /// All teacher registrations for one course instance.
  fn list_teacher_registrations(
    &self,
    course_instance_id: i64,
  ) -> impl Future<Output = Result<Vec<TeacherRegistration>, Self::Error>> + Send + '_;

  /// Stage a new registration. The assigned ID and timestamp come back in
  /// the returned record; the write is durable only after
  /// [`CourseStore::commit`].
  fn create_teacher_registration(
    &self,
    input: NewTeacherRegistration,
  ) -> impl Future<Output = Result<TeacherRegistration, Self::Error>> + Send + '_;

  /// Stage a role change on an existing registration.
  fn update_teacher_registration_type(
    &self,
    id: i64,
    new_type: TeacherType,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Flush staged writes. Fails atomically: on error no staged write
  /// becomes visible.
  fn commit(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
