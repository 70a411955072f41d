//! [`SqliteStore`] — the SQLite implementation of [`CourseStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use kennsla_core::{
  course::{CourseInstance, CourseOffering, CourseTemplate},
  person::{Person, Ssn},
  registration::{NewTeacherRegistration, TeacherRegistration, TeacherType},
  store::CourseStore,
};

use crate::{
  Error, Result,
  encode::{RawPerson, RawRegistration, encode_dt, encode_teacher_type},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A course store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. All calls
/// run on one connection, so store operations are serialized per process;
/// registration writes open a deferred transaction that
/// [`CourseStore::commit`] releases.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  // ── Catalog maintenance ───────────────────────────────────────────────────
  //
  // Persons, templates and instances are created outside the engines (by an
  // import job or the server's seed path). These helpers are not part of
  // the `CourseStore` trait and write in autocommit mode.

  pub async fn add_person(&self, person: &Person) -> Result<()> {
    let (id, ssn, name, email) = (
      person.id,
      person.ssn.as_str().to_owned(),
      person.name.clone(),
      person.email.clone(),
    );
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO persons (id, ssn, name, email) VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![id, ssn, name, email],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  pub async fn add_course_template(&self, template: &CourseTemplate) -> Result<()> {
    let (code, name, name_en, description) = (
      template.course_code.clone(),
      template.name.clone(),
      template.name_en.clone(),
      template.description.clone(),
    );
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO course_templates (course_code, name, name_en, description)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![code, name, name_en, description],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  pub async fn add_course_instance(&self, instance: &CourseInstance) -> Result<()> {
    let (id, code, semester) = (
      instance.id,
      instance.course_code.clone(),
      instance.semester.clone(),
    );
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO course_instances (id, course_code, semester)
           VALUES (?1, ?2, ?3)",
          rusqlite::params![id, code, semester],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

/// Start a transaction for staged registration writes unless one is
/// already open.
fn begin_if_needed(conn: &rusqlite::Connection) -> rusqlite::Result<()> {
  if conn.is_autocommit() {
    conn.execute_batch("BEGIN IMMEDIATE")?;
  }
  Ok(())
}

/// Roll the open transaction back so a failed write never leaves the
/// connection stuck mid-transaction.
fn rollback_quietly(conn: &rusqlite::Connection) {
  let _ = conn.execute_batch("ROLLBACK");
}

// ─── CourseStore impl ────────────────────────────────────────────────────────

impl CourseStore for SqliteStore {
  type Error = Error;

  async fn find_person_by_ssn(&self, ssn: &Ssn) -> Result<Option<Person>> {
    let ssn_str = ssn.as_str().to_owned();

    let raw: Option<RawPerson> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, ssn, name, email FROM persons WHERE ssn = ?1",
              rusqlite::params![ssn_str],
              |row| {
                Ok(RawPerson {
                  id:    row.get(0)?,
                  ssn:   row.get(1)?,
                  name:  row.get(2)?,
                  email: row.get(3)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawPerson::into_person).transpose()
  }

  async fn find_course_instance(&self, id: i64) -> Result<Option<CourseInstance>> {
    let instance = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, course_code, semester FROM course_instances WHERE id = ?1",
              rusqlite::params![id],
              |row| {
                Ok(CourseInstance {
                  id:          row.get(0)?,
                  course_code: row.get(1)?,
                  semester:    row.get(2)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    Ok(instance)
  }

  async fn list_course_instances_by_semester(
    &self,
    semester: &str,
  ) -> Result<Vec<CourseOffering>> {
    let semester = semester.to_owned();

    let rows = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT c.id, c.course_code, t.name, t.name_en
           FROM course_instances c
           JOIN course_templates t ON t.course_code = c.course_code
           WHERE c.semester = ?1
           ORDER BY c.id",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![semester], |row| {
            Ok(CourseOffering {
              course_instance_id: row.get(0)?,
              course_code:        row.get(1)?,
              name:               row.get(2)?,
              name_en:            row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(rows)
  }

  async fn list_teacher_registrations(
    &self,
    course_instance_id: i64,
  ) -> Result<Vec<TeacherRegistration>> {
    let raws: Vec<RawRegistration> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT id, course_instance_id, ssn, teacher_type, created_at
           FROM teacher_registrations
           WHERE course_instance_id = ?1",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![course_instance_id], |row| {
            Ok(RawRegistration {
              id:                 row.get(0)?,
              course_instance_id: row.get(1)?,
              ssn:                row.get(2)?,
              teacher_type:       row.get(3)?,
              created_at:         row.get(4)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws
      .into_iter()
      .map(RawRegistration::into_registration)
      .collect()
  }

  async fn create_teacher_registration(
    &self,
    input: NewTeacherRegistration,
  ) -> Result<TeacherRegistration> {
    let created_at = Utc::now();
    let course_instance_id = input.course_instance_id;
    let ssn_str = input.ssn.as_str().to_owned();
    let type_str = encode_teacher_type(input.teacher_type).to_owned();
    let at_str = encode_dt(created_at);

    let id = self
      .conn
      .call(move |conn| {
        begin_if_needed(conn)?;
        let inserted = conn.execute(
          "INSERT INTO teacher_registrations
             (course_instance_id, ssn, teacher_type, created_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![course_instance_id, ssn_str, type_str, at_str],
        );
        match inserted {
          Ok(_) => Ok(conn.last_insert_rowid()),
          Err(e) => {
            rollback_quietly(conn);
            Err(e.into())
          }
        }
      })
      .await?;

    Ok(TeacherRegistration {
      id,
      course_instance_id: input.course_instance_id,
      ssn: input.ssn,
      teacher_type: input.teacher_type,
      created_at,
    })
  }

  async fn update_teacher_registration_type(
    &self,
    id: i64,
    new_type: TeacherType,
  ) -> Result<()> {
    let type_str = encode_teacher_type(new_type).to_owned();

    self
      .conn
      .call(move |conn| {
        begin_if_needed(conn)?;
        let updated = conn.execute(
          "UPDATE teacher_registrations SET teacher_type = ?1 WHERE id = ?2",
          rusqlite::params![type_str, id],
        );
        match updated {
          Ok(_) => Ok(()),
          Err(e) => {
            rollback_quietly(conn);
            Err(e.into())
          }
        }
      })
      .await?;
    Ok(())
  }

  async fn commit(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        if !conn.is_autocommit() {
          conn.execute_batch("COMMIT")?;
        }
        Ok(())
      })
      .await?;
    Ok(())
  }
}
