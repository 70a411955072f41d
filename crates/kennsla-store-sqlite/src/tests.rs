//! Integration tests for `SqliteStore` against an in-memory database.

use kennsla_core::{
  ValidationCode,
  course::{CourseInstance, CourseTemplate},
  person::{Person, Ssn},
  registration::{NewTeacherRegistration, TeacherType},
  service::CourseService,
  store::CourseStore,
};

use crate::SqliteStore;

const SSN_DABS: &str = "1203735289";
const SSN_GUNNA: &str = "1234567890";
const SSN_KHF: &str = "0110813209";

fn ssn(s: &str) -> Ssn {
  Ssn::parse(s).unwrap()
}

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory().await.expect("in-memory store")
}

/// Same catalog the engine tests use: three persons, two templates, four
/// instances across three terms.
async fn seeded() -> SqliteStore {
  let s = store().await;

  for (id, ssn_str, name) in [
    (1, SSN_DABS, "Daníel B. Sigurgeirsson"),
    (2, SSN_GUNNA, "Guðrún Guðmundsdóttir"),
    (3, SSN_KHF, "Kristinn H. Freysteinsson"),
  ] {
    s.add_person(&Person {
      id,
      ssn: ssn(ssn_str),
      name: name.into(),
      email: format!("user{id}@example.is"),
    })
    .await
    .unwrap();
  }

  s.add_course_template(&CourseTemplate {
    course_code: "T-514-VEFT".into(),
    name:        "Vefþjónustur".into(),
    name_en:     "Web Services".into(),
    description: String::new(),
  })
  .await
  .unwrap();
  s.add_course_template(&CourseTemplate {
    course_code: "T-111-PROG".into(),
    name:        "Forritun".into(),
    name_en:     "Programming".into(),
    description: String::new(),
  })
  .await
  .unwrap();

  for (id, code, semester) in [
    (1200, "T-514-VEFT", "20143"),
    (1337, "T-514-VEFT", "20153"),
    (1338, "T-514-VEFT", "20163"),
    (1339, "T-111-PROG", "20163"),
  ] {
    s.add_course_instance(&CourseInstance {
      id,
      course_code: code.into(),
      semester: semester.into(),
    })
    .await
    .unwrap();
  }

  s
}

fn new_registration(course: i64, ssn_str: &str, teacher_type: TeacherType) -> NewTeacherRegistration {
  NewTeacherRegistration {
    course_instance_id: course,
    ssn: ssn(ssn_str),
    teacher_type,
  }
}

// ─── Lookups ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn find_person_by_ssn_roundtrip() {
  let s = seeded().await;

  let person = s.find_person_by_ssn(&ssn(SSN_DABS)).await.unwrap().unwrap();
  assert_eq!(person.name, "Daníel B. Sigurgeirsson");
  assert_eq!(person.ssn.as_str(), SSN_DABS);

  let missing = s.find_person_by_ssn(&ssn("9876543210")).await.unwrap();
  assert!(missing.is_none());
}

#[tokio::test]
async fn find_course_instance_roundtrip() {
  let s = seeded().await;

  let course = s.find_course_instance(1337).await.unwrap().unwrap();
  assert_eq!(course.course_code, "T-514-VEFT");
  assert_eq!(course.semester, "20153");

  assert!(s.find_course_instance(9999).await.unwrap().is_none());
}

#[tokio::test]
async fn list_by_semester_joins_templates_in_id_order() {
  let s = seeded().await;

  let rows = s.list_course_instances_by_semester("20163").await.unwrap();
  assert_eq!(rows.len(), 2);
  assert_eq!(rows[0].course_instance_id, 1338);
  assert_eq!(rows[0].name, "Vefþjónustur");
  assert_eq!(rows[0].name_en, "Web Services");
  assert_eq!(rows[1].course_instance_id, 1339);
  assert_eq!(rows[1].course_code, "T-111-PROG");

  let empty = s.list_course_instances_by_semester("29991").await.unwrap();
  assert!(empty.is_empty());
}

// ─── Registration writes ─────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_commit_registration() {
  let s = seeded().await;

  let created = s
    .create_teacher_registration(new_registration(1338, SSN_GUNNA, TeacherType::MainTeacher))
    .await
    .unwrap();
  s.commit().await.unwrap();

  assert!(created.id > 0);

  let regs = s.list_teacher_registrations(1338).await.unwrap();
  assert_eq!(regs.len(), 1);
  assert_eq!(regs[0].id, created.id);
  assert_eq!(regs[0].ssn.as_str(), SSN_GUNNA);
  assert_eq!(regs[0].teacher_type, TeacherType::MainTeacher);
  assert_eq!(regs[0].created_at, created.created_at);
}

#[tokio::test]
async fn update_registration_type() {
  let s = seeded().await;

  let created = s
    .create_teacher_registration(new_registration(1338, SSN_GUNNA, TeacherType::MainTeacher))
    .await
    .unwrap();
  s.commit().await.unwrap();

  s.update_teacher_registration_type(created.id, TeacherType::AssistantTeacher)
    .await
    .unwrap();
  s.commit().await.unwrap();

  let regs = s.list_teacher_registrations(1338).await.unwrap();
  assert_eq!(regs[0].teacher_type, TeacherType::AssistantTeacher);
}

#[tokio::test]
async fn duplicate_person_registration_violates_constraint() {
  let s = seeded().await;

  s.create_teacher_registration(new_registration(1338, SSN_GUNNA, TeacherType::AssistantTeacher))
    .await
    .unwrap();
  s.commit().await.unwrap();

  let err = s
    .create_teacher_registration(new_registration(
      1338,
      SSN_GUNNA,
      TeacherType::AssistantTeacher,
    ))
    .await;
  assert!(err.is_err());
}

#[tokio::test]
async fn second_main_teacher_violates_partial_index() {
  let s = seeded().await;

  s.create_teacher_registration(new_registration(1338, SSN_GUNNA, TeacherType::MainTeacher))
    .await
    .unwrap();
  s.commit().await.unwrap();

  // The engine refuses this earlier; the index is the DB-level backstop.
  let err = s
    .create_teacher_registration(new_registration(1338, SSN_KHF, TeacherType::MainTeacher))
    .await;
  assert!(err.is_err());

  // The failed write rolled back; the connection stays usable.
  s.create_teacher_registration(new_registration(1338, SSN_KHF, TeacherType::AssistantTeacher))
    .await
    .unwrap();
  s.commit().await.unwrap();

  let regs = s.list_teacher_registrations(1338).await.unwrap();
  assert_eq!(regs.len(), 2);
}

#[tokio::test]
async fn two_assistants_are_fine() {
  let s = seeded().await;

  s.create_teacher_registration(new_registration(1339, SSN_KHF, TeacherType::AssistantTeacher))
    .await
    .unwrap();
  s.create_teacher_registration(new_registration(1339, SSN_GUNNA, TeacherType::AssistantTeacher))
    .await
    .unwrap();
  s.commit().await.unwrap();

  let regs = s.list_teacher_registrations(1339).await.unwrap();
  assert_eq!(regs.len(), 2);
}

// ─── Engines over SQLite ─────────────────────────────────────────────────────

#[tokio::test]
async fn listing_through_the_engine() {
  let s = seeded().await;
  s.create_teacher_registration(new_registration(1337, SSN_DABS, TeacherType::MainTeacher))
    .await
    .unwrap();
  s.commit().await.unwrap();

  let service = CourseService::new(s);
  let page = service
    .list_courses_by_semester(Some("20153"), "en-US", 1)
    .await
    .unwrap();

  assert_eq!(page.items.len(), 1);
  assert_eq!(page.items[0].name, "Web Services");
  assert_eq!(page.items[0].main_teacher, "Daníel B. Sigurgeirsson");
}

#[tokio::test]
async fn assignment_through_the_engine() {
  let s = seeded().await;
  let service = CourseService::new(s.clone());

  let person = service
    .add_teacher_to_course(1338, &ssn(SSN_GUNNA), TeacherType::MainTeacher)
    .await
    .unwrap();
  assert_eq!(person.ssn.as_str(), SSN_GUNNA);

  // Committed: visible through the store directly.
  let regs = s.list_teacher_registrations(1338).await.unwrap();
  assert_eq!(regs.len(), 1);
  assert_eq!(regs[0].teacher_type, TeacherType::MainTeacher);

  // A second main teacher is refused by the engine before any write.
  let err = service
    .add_teacher_to_course(1338, &ssn(SSN_KHF), TeacherType::MainTeacher)
    .await
    .unwrap_err();
  assert_eq!(
    err.validation_code(),
    Some(ValidationCode::CourseAlreadyHasMainTeacher)
  );
  assert_eq!(s.list_teacher_registrations(1338).await.unwrap().len(), 1);
}
