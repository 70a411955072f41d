//! Encoding and decoding helpers between Rust domain types and the
//! plain-text representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings; teacher roles as short
//! lowercase tokens; SSNs as their digit strings.

use chrono::{DateTime, Utc};
use kennsla_core::{
  person::{Person, Ssn},
  registration::{TeacherRegistration, TeacherType},
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::Decode(e.to_string()))
}

// ─── TeacherType ─────────────────────────────────────────────────────────────

pub fn encode_teacher_type(t: TeacherType) -> &'static str {
  match t {
    TeacherType::MainTeacher => "main_teacher",
    TeacherType::AssistantTeacher => "assistant_teacher",
  }
}

pub fn decode_teacher_type(s: &str) -> Result<TeacherType> {
  match s {
    "main_teacher" => Ok(TeacherType::MainTeacher),
    "assistant_teacher" => Ok(TeacherType::AssistantTeacher),
    other => Err(Error::Decode(format!("unknown teacher type: {other:?}"))),
  }
}

// ─── Ssn ─────────────────────────────────────────────────────────────────────

pub fn decode_ssn(s: &str) -> Result<Ssn> {
  Ssn::parse(s).map_err(|e| Error::Decode(e.to_string()))
}

// ─── Raw rows ────────────────────────────────────────────────────────────────

/// A `persons` row before column decoding.
pub struct RawPerson {
  pub id:    i64,
  pub ssn:   String,
  pub name:  String,
  pub email: String,
}

impl RawPerson {
  pub fn into_person(self) -> Result<Person> {
    Ok(Person {
      id:    self.id,
      ssn:   decode_ssn(&self.ssn)?,
      name:  self.name,
      email: self.email,
    })
  }
}

/// A `teacher_registrations` row before column decoding.
pub struct RawRegistration {
  pub id:                 i64,
  pub course_instance_id: i64,
  pub ssn:                String,
  pub teacher_type:       String,
  pub created_at:         String,
}

impl RawRegistration {
  pub fn into_registration(self) -> Result<TeacherRegistration> {
    Ok(TeacherRegistration {
      id:                 self.id,
      course_instance_id: self.course_instance_id,
      ssn:                decode_ssn(&self.ssn)?,
      teacher_type:       decode_teacher_type(&self.teacher_type)?,
      created_at:         decode_dt(&self.created_at)?,
    })
  }
}
