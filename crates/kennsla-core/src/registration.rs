//! Teacher registrations — the link between a person and a course instance.
//!
//! Registrations are created and updated in place by the assignment engine;
//! they are never deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::person::Ssn;

/// The role a person holds in a course instance.
///
/// At most one `MainTeacher` registration exists per course instance at any
/// time; any number of assistants are allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeacherType {
  MainTeacher,
  AssistantTeacher,
}

impl TeacherType {
  pub fn is_main(self) -> bool { matches!(self, Self::MainTeacher) }
}

/// A persisted registration row, unique per `(course_instance_id, ssn)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeacherRegistration {
  pub id:                 i64,
  pub course_instance_id: i64,
  pub ssn:                Ssn,
  pub teacher_type:       TeacherType,
  pub created_at:         DateTime<Utc>,
}

/// Input for creating a registration; the id and timestamp are assigned by
/// the store.
#[derive(Debug, Clone)]
pub struct NewTeacherRegistration {
  pub course_instance_id: i64,
  pub ssn:                Ssn,
  pub teacher_type:       TeacherType,
}
