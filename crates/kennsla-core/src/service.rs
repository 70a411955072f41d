//! The course query and teacher assignment engines.
//!
//! [`CourseService`] wraps a [`CourseStore`] and carries no other state:
//! every rule is evaluated against what the store returns during the call.
//! Joins and filters run here, in the engine, independent of what the
//! backing store can do server-side.

use crate::{
  course::{CourseSummary, DEFAULT_SEMESTER, Language},
  error::{ServiceError, ValidationCode},
  paging::{DEFAULT_PAGE_SIZE, PageInfo, PageResult},
  person::{PersonSummary, Ssn},
  registration::{NewTeacherRegistration, TeacherType},
  store::CourseStore,
};

/// The query and assignment engines, backed by a [`CourseStore`].
pub struct CourseService<S> {
  store:     S,
  page_size: u32,
}

impl<S: CourseStore> CourseService<S> {
  pub fn new(store: S) -> Self {
    Self { store, page_size: DEFAULT_PAGE_SIZE }
  }

  /// Override the page size used by
  /// [`CourseService::list_courses_by_semester`].
  pub fn with_page_size(mut self, page_size: u32) -> Self {
    self.page_size = page_size;
    self
  }

  /// The underlying store.
  pub fn store(&self) -> &S { &self.store }

  // ── Course query engine ───────────────────────────────────────────────────

  /// List the course instances offered in `semester` (defaults to
  /// [`DEFAULT_SEMESTER`] when absent or empty), with template names
  /// localized by `lang_tag` and items sliced to the 1-based `page`.
  ///
  /// Items are ordered by course-instance ID ascending; the set is the
  /// same regardless of the requested page, only sliced differently.
  /// A `page` of zero fails with [`ServiceError::InvalidPage`]; a page
  /// beyond the last page of a non-empty result fails with
  /// [`ServiceError::PageOutOfRange`]. An unknown semester yields an
  /// empty page, not an error.
  pub async fn list_courses_by_semester(
    &self,
    semester: Option<&str>,
    lang_tag: &str,
    page: u32,
  ) -> Result<PageResult<CourseSummary>, ServiceError<S::Error>> {
    if page < 1 {
      return Err(ServiceError::InvalidPage(page));
    }

    let semester = match semester {
      Some(s) if !s.is_empty() => s,
      _ => DEFAULT_SEMESTER,
    };
    let lang = Language::from_tag(lang_tag);

    let mut offerings = self
      .store
      .list_course_instances_by_semester(semester)
      .await
      .map_err(ServiceError::Store)?;
    offerings.sort_by_key(|o| o.course_instance_id);

    let total = offerings.len() as u32;
    let paging = PageInfo::compute(page, self.page_size, total);
    if total > 0 && page > paging.page_count {
      return Err(ServiceError::PageOutOfRange {
        page,
        page_count: paging.page_count,
      });
    }

    let start = (page as usize - 1) * self.page_size as usize;
    let mut items = Vec::new();
    for offering in offerings
      .into_iter()
      .skip(start)
      .take(self.page_size as usize)
    {
      let main_teacher =
        self.main_teacher_name(offering.course_instance_id).await?;
      items.push(CourseSummary {
        course_instance_id: offering.course_instance_id,
        name: offering.localized_name(lang).to_owned(),
        course_code: offering.course_code,
        main_teacher,
      });
    }

    Ok(PageResult { items, paging })
  }

  /// The main teacher's display name for a course instance, or an empty
  /// string when none is registered. Assistant registrations are ignored
  /// entirely — an instance with only assistants has no main teacher.
  async fn main_teacher_name(
    &self,
    course_instance_id: i64,
  ) -> Result<String, ServiceError<S::Error>> {
    let registrations = self
      .store
      .list_teacher_registrations(course_instance_id)
      .await
      .map_err(ServiceError::Store)?;

    let Some(main) = registrations.iter().find(|r| r.teacher_type.is_main())
    else {
      return Ok(String::new());
    };

    let person = self
      .store
      .find_person_by_ssn(&main.ssn)
      .await
      .map_err(ServiceError::Store)?;
    Ok(person.map(|p| p.name).unwrap_or_default())
  }

  // ── Teacher assignment engine ─────────────────────────────────────────────

  /// Register the person with `ssn` as a teacher of `course_instance_id`
  /// in the given role.
  ///
  /// Fails with [`ServiceError::NotFound`] when the person or the course
  /// instance is missing, and with [`ServiceError::Validation`] on a
  /// business-rule conflict. A successful call stages exactly one
  /// registration create-or-update and one commit; failure paths write
  /// nothing.
  pub async fn add_teacher_to_course(
    &self,
    course_instance_id: i64,
    ssn: &Ssn,
    teacher_type: TeacherType,
  ) -> Result<PersonSummary, ServiceError<S::Error>> {
    // Both lookups run before either failure is raised; the caller never
    // learns which reference was missing.
    let person = self
      .store
      .find_person_by_ssn(ssn)
      .await
      .map_err(ServiceError::Store)?;
    let course = self
      .store
      .find_course_instance(course_instance_id)
      .await
      .map_err(ServiceError::Store)?;
    let (Some(person), Some(_)) = (person, course) else {
      return Err(ServiceError::NotFound);
    };

    let registrations = self
      .store
      .list_teacher_registrations(course_instance_id)
      .await
      .map_err(ServiceError::Store)?;

    let main_ssn = registrations
      .iter()
      .find(|r| r.teacher_type.is_main())
      .map(|r| r.ssn.clone());
    let existing = registrations.iter().find(|r| &r.ssn == ssn);

    if teacher_type.is_main() {
      match existing {
        Some(registration) => {
          // A main teacher assigned to someone else blocks promotion,
          // even though this person is already registered.
          if matches!(&main_ssn, Some(main) if main != ssn) {
            return Err(ServiceError::Validation(
              ValidationCode::CourseAlreadyHasMainTeacher,
            ));
          }
          // No main teacher yet, or this person already is one:
          // idempotent role update.
          self
            .store
            .update_teacher_registration_type(
              registration.id,
              TeacherType::MainTeacher,
            )
            .await
            .map_err(ServiceError::Store)?;
        }
        None => {
          if main_ssn.is_some() {
            return Err(ServiceError::Validation(
              ValidationCode::CourseAlreadyHasMainTeacher,
            ));
          }
          self
            .store
            .create_teacher_registration(NewTeacherRegistration {
              course_instance_id,
              ssn: ssn.clone(),
              teacher_type,
            })
            .await
            .map_err(ServiceError::Store)?;
        }
      }
    } else {
      match existing {
        Some(registration) => {
          // Only the current main teacher may change their own role;
          // a re-registered assistant is rejected, same type or not.
          if !registration.teacher_type.is_main() {
            return Err(ServiceError::Validation(
              ValidationCode::PersonAlreadyRegisteredAsTeacherInCourse,
            ));
          }
          self
            .store
            .update_teacher_registration_type(registration.id, teacher_type)
            .await
            .map_err(ServiceError::Store)?;
        }
        None => {
          self
            .store
            .create_teacher_registration(NewTeacherRegistration {
              course_instance_id,
              ssn: ssn.clone(),
              teacher_type,
            })
            .await
            .map_err(ServiceError::Store)?;
        }
      }
    }

    self.store.commit().await.map_err(ServiceError::Store)?;

    Ok(person.into())
  }
}
