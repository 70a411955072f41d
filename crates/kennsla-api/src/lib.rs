//! JSON REST API for Kennsla.
//!
//! Exposes an axum [`Router`] backed by any [`CourseStore`]. Auth, TLS, and
//! transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", kennsla_api::api_router(service.clone()))
//! ```

pub mod courses;
pub mod error;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use kennsla_core::{service::CourseService, store::CourseStore};

pub use error::ApiError;

/// Build a fully-materialised API router for `service`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(service: Arc<CourseService<S>>) -> Router<()>
where
  S: CourseStore + 'static,
{
  Router::new()
    .route("/courses", get(courses::list::<S>))
    .route("/courses/{id}/teachers", post(courses::add_teacher::<S>))
    .with_state(service)
}
