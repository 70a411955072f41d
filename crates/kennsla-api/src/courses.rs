//! Handlers for `/courses` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/courses` | Optional `?semester=` and `?page=N`; localized by `Accept-Language` |
//! | `POST` | `/courses/{id}/teachers` | Body: `{"ssn":"...","type":"main_teacher"}`; 201 on success |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::{HeaderMap, StatusCode, header},
  response::IntoResponse,
};
use kennsla_core::{
  course::CourseSummary,
  paging::PageResult,
  person::Ssn,
  registration::TeacherType,
  service::CourseService,
  store::CourseStore,
};
use serde::Deserialize;

use crate::error::ApiError;

/// Fallback tag when the request carries no usable `Accept-Language`.
/// Anything that is not `is-IS` selects English anyway.
const DEFAULT_LANGUAGE: &str = "en-US";

/// The first tag of an `Accept-Language` header; quality weights and any
/// further alternatives are ignored.
fn primary_language(headers: &HeaderMap) -> String {
  headers
    .get(header::ACCEPT_LANGUAGE)
    .and_then(|v| v.to_str().ok())
    .and_then(|v| v.split(',').next())
    .map(|tag| tag.split(';').next().unwrap_or(tag).trim().to_owned())
    .filter(|tag| !tag.is_empty())
    .unwrap_or_else(|| DEFAULT_LANGUAGE.to_owned())
}

// ─── List ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub semester: Option<String>,
  /// 1-based page number; defaults to the first page.
  pub page:     Option<u32>,
}

/// `GET /courses[?semester=...][&page=N]`
pub async fn list<S>(
  State(service): State<Arc<CourseService<S>>>,
  Query(params): Query<ListParams>,
  headers: HeaderMap,
) -> Result<Json<PageResult<CourseSummary>>, ApiError>
where
  S: CourseStore + 'static,
{
  let lang = primary_language(&headers);
  let page = params.page.unwrap_or(1);

  let result = service
    .list_courses_by_semester(params.semester.as_deref(), &lang, page)
    .await
    .map_err(ApiError::from_service)?;
  Ok(Json(result))
}

// ─── Add teacher ─────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AddTeacherBody {
  pub ssn:          String,
  #[serde(rename = "type")]
  pub teacher_type: TeacherType,
}

/// `POST /courses/{id}/teachers` — returns 201 + the registered person.
pub async fn add_teacher<S>(
  State(service): State<Arc<CourseService<S>>>,
  Path(id): Path<i64>,
  Json(body): Json<AddTeacherBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CourseStore + 'static,
{
  // Malformed SSNs never reach the engine.
  let ssn =
    Ssn::parse(&body.ssn).map_err(|e| ApiError::BadRequest(e.to_string()))?;

  let person = service
    .add_teacher_to_course(id, &ssn, body.teacher_type)
    .await
    .map_err(ApiError::from_service)?;
  Ok((StatusCode::CREATED, Json(person)))
}
