use std::borrow::Cow;

use aide::OperationIo;
use axum::{
	body::Body,
	extract::rejection,
	http::{Response, StatusCode},
	response::IntoResponse,
};
use schemars::JsonSchema;
use serde::Serialize;

pub type Map = serde_json::Map<String, serde_json::Value>;

/// A single client-facing error message, optionally tied to an input field
/// and carrying structured details.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct Message<'m> {
	pub content: Cow<'m, str>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub field: Option<Cow<'m, str>>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub details: Option<Map>,
}

impl<'m> Message<'m> {
	pub fn new(content: impl Into<Cow<'m, str>>) -> Self {
		Self {
			content: content.into(),
			field: None,
			details: None,
		}
	}

	pub fn field(mut self, field: impl Into<Cow<'m, str>>) -> Self {
		self.field = Some(field.into());
		self
	}

	pub fn detail(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
		self.details
			.get_or_insert_with(Map::new)
			.insert(key.into(), value.into());
		self
	}

	pub fn into_vec(self) -> Vec<Message<'m>> {
		vec![self]
	}
}

/// The body of every error response.
#[derive(Debug, Serialize, JsonSchema)]
pub struct ErrorResponse<'m> {
	pub success: bool,
	pub errors: Vec<Message<'m>>,
}

/// The status code and client-safe messages of a route error.
///
/// The [`std::fmt::Display`] output of implementors is presented to the
/// client, so it must not contain sensitive information.
pub trait ErrorShape: Sized {
	fn status(&self) -> StatusCode;
	fn into_errors(self) -> Vec<Message<'static>>;

	fn into_response(self) -> Response<Body> {
		let status = self.status();

		(
			status,
			axum::Json(ErrorResponse {
				success: false,
				errors: self.into_errors(),
			}),
		)
			.into_response()
	}
}

/// Errors any route can produce: extractor rejections, database failures
/// and rate limits. Module-specific errors wrap around it via
/// [`RouteError`].
#[derive(Debug, thiserror::Error)]
pub enum AppError {
	#[error("validation error")]
	Validation(#[from] validator::ValidationErrors),
	#[error("invalid request body")]
	Json(#[from] rejection::JsonRejection),
	#[error("invalid query string")]
	Query(#[from] rejection::QueryRejection),
	#[error("invalid path parameter")]
	Path(#[from] rejection::PathRejection),
	#[error("database error: {0}")]
	Database(#[from] sqlx::Error),
	#[error("rate limited")]
	RateLimit(tower_governor::GovernorError),
}

impl ErrorShape for AppError {
	fn status(&self) -> StatusCode {
		match self {
			Self::Validation(..) | Self::Json(..) | Self::Query(..) | Self::Path(..) => {
				StatusCode::BAD_REQUEST
			}
			Self::Database(..) => StatusCode::INTERNAL_SERVER_ERROR,
			Self::RateLimit(error) => match error {
				tower_governor::GovernorError::TooManyRequests { .. } => {
					StatusCode::TOO_MANY_REQUESTS
				}
				tower_governor::GovernorError::UnableToExtractKey => {
					StatusCode::INTERNAL_SERVER_ERROR
				}
				tower_governor::GovernorError::Other { code, .. } => *code,
			},
		}
	}

	fn into_errors(self) -> Vec<Message<'static>> {
		match self {
			Self::Validation(errors) => errors
				.field_errors()
				.into_iter()
				.flat_map(|(field, errors)| {
					errors
						.iter()
						.map(move |error| Message::new(error.to_string()).field(field))
						.collect::<Vec<_>>()
				})
				.collect(),
			Self::Json(error) => Message::new(error.body_text()).into_vec(),
			Self::Query(error) => Message::new(error.body_text()).into_vec(),
			Self::Path(error) => Message::new(error.body_text()).into_vec(),
			Self::Database(error) => {
				// Internals are logged, never shown to the client.
				tracing::error!(%error, "database error");

				Vec::new()
			}
			Self::RateLimit(error) => match error {
				tower_governor::GovernorError::TooManyRequests { wait_time, .. } => {
					Message::new("rate limited")
						.detail("retry_after_seconds", wait_time)
						.into_vec()
				}
				_ => Vec::new(),
			},
		}
	}
}

impl IntoResponse for AppError {
	fn into_response(self) -> Response<Body> {
		ErrorShape::into_response(self)
	}
}

/// The error type of a route handler: either a module-specific error or a
/// shared [`AppError`]. Modules alias this to their own error, e.g.
/// `type RouteError = error::RouteError<Error>`.
#[derive(Debug, OperationIo)]
pub enum RouteError<E> {
	App(AppError),
	Route(E),
}

impl<E> From<AppError> for RouteError<E> {
	fn from(error: AppError) -> Self {
		Self::App(error)
	}
}

impl<E> From<sqlx::Error> for RouteError<E> {
	fn from(error: sqlx::Error) -> Self {
		Self::App(AppError::Database(error))
	}
}

impl<E: ErrorShape> IntoResponse for RouteError<E> {
	fn into_response(self) -> Response<Body> {
		match self {
			Self::App(error) => ErrorShape::into_response(error),
			Self::Route(error) => ErrorShape::into_response(error),
		}
	}
}
