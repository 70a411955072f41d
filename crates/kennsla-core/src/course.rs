//! Course catalog types — templates, instances, and the localized summary
//! rows produced by the query engine.

use serde::{Deserialize, Serialize};

/// The term assumed when a caller does not name one.
pub const DEFAULT_SEMESTER: &str = "20163";

/// A catalog-level course definition, independent of term.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseTemplate {
  /// Unique course code, e.g. `"T-514-VEFT"`.
  pub course_code: String,
  /// Icelandic (default-locale) name.
  pub name:        String,
  /// English name.
  pub name_en:     String,
  #[serde(default)]
  pub description: String,
}

/// One scheduled offering of a template in a specific term.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseInstance {
  pub id:          i64,
  pub course_code: String,
  /// Term identifier, e.g. `"20163"`.
  pub semester:    String,
}

/// A course instance joined with its template, as returned by
/// [`CourseStore::list_course_instances_by_semester`].
///
/// [`CourseStore::list_course_instances_by_semester`]: crate::store::CourseStore::list_course_instances_by_semester
#[derive(Debug, Clone)]
pub struct CourseOffering {
  pub course_instance_id: i64,
  pub course_code:        String,
  pub name:               String,
  pub name_en:            String,
}

impl CourseOffering {
  /// The template name in the requested locale.
  pub fn localized_name(&self, lang: Language) -> &str {
    match lang {
      Language::Icelandic => &self.name,
      Language::English => &self.name_en,
    }
  }
}

/// The two locales a template carries names for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
  Icelandic,
  English,
}

impl Language {
  /// `"is-IS"` selects Icelandic; anything else, recognised or not, falls
  /// back to English.
  pub fn from_tag(tag: &str) -> Self {
    if tag == "is-IS" { Self::Icelandic } else { Self::English }
  }
}

/// One row of the course listing: the instance, its template code, the
/// localized name, and the main teacher's display name (an empty string
/// when no main teacher is registered — never null).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseSummary {
  pub course_instance_id: i64,
  pub course_code:        String,
  pub name:               String,
  pub main_teacher:       String,
}
