use aide::axum::{routing::get_with, ApiRouter};
use axum::http::StatusCode;

use crate::{error, AppState};

pub mod model;
pub mod route;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("only applicant accounts have an applicant profile")]
	NotAnApplicant,
	#[error("only employer accounts have an employer profile")]
	NotAnEmployer,
	#[error("profile has not been created yet")]
	ProfileNotFound,
}

pub type RouteError = error::RouteError<Error>;

impl From<Error> for RouteError {
	fn from(error: Error) -> Self {
		Self::Route(error)
	}
}

pub fn routes() -> ApiRouter<AppState> {
	use route::*;

	ApiRouter::new()
		.api_route(
			"/applicant",
			get_with(get_applicant_profile, get_applicant_profile_docs)
				.put_with(put_applicant_profile, put_applicant_profile_docs),
		)
		.api_route(
			"/employer",
			get_with(get_employer_profile, get_employer_profile_docs)
				.put_with(put_employer_profile, put_employer_profile_docs),
		)
}

impl error::ErrorShape for Error {
	fn status(&self) -> StatusCode {
		match self {
			Self::NotAnApplicant | Self::NotAnEmployer => StatusCode::FORBIDDEN,
			Self::ProfileNotFound => StatusCode::NOT_FOUND,
		}
	}

	fn into_errors(self) -> Vec<error::Message<'static>> {
		error::Message::new(self.to_string()).into_vec()
	}
}

#[cfg(test)]
mod test {
	use crate::test::*;

	#[sqlx::test]
	async fn test_applicant_profile_upsert(pool: Database) {
		let app = app(pool);

		register(&app, "ada@lovelace.dev", "applicant").await;

		let response = app.get("/profiles/applicant").await;

		assert_eq!(response.status_code(), 404);

		let response = app
			.put("/profiles/applicant")
			.json(&json!({
				"skills": "React, Node.js, PostgreSQL",
				"experience_years": 3,
				"position_type": "fullstack",
				"available": true,
			}))
			.await;

		assert_eq!(response.status_code(), 200);

		let profile = response.json::<serde_json::Value>();

		assert_eq!(profile["skills"], json!(["React", "Node.js", "PostgreSQL"]));

		// A second save must update the same row, not create another.
		let response = app
			.put("/profiles/applicant")
			.json(&json!({
				"skills": "Rust",
				"experience_years": 4,
				"position_type": "backend",
				"available": false,
			}))
			.await;

		assert_eq!(response.status_code(), 200);

		let updated = response.json::<serde_json::Value>();

		assert_eq!(updated["id"], profile["id"]);
		assert_eq!(updated["experience_years"], 4);
		assert_eq!(updated["skills"], json!(["Rust"]));
	}

	#[sqlx::test]
	async fn test_employer_cannot_save_applicant_profile(pool: Database) {
		let app = app(pool);

		register(&app, "boss@acme.dev", "employer").await;

		let response = app
			.put("/profiles/applicant")
			.json(&json!({
				"skills": "Rust",
				"experience_years": 1,
				"position_type": "backend",
				"available": true,
			}))
			.await;

		assert_eq!(response.status_code(), 403);
	}

	#[sqlx::test]
	async fn test_employer_profile_upsert(pool: Database) {
		let app = app(pool);

		register(&app, "boss@acme.dev", "employer").await;

		let response = app
			.put("/profiles/employer")
			.json(&json!({
				"company_name": "Acme",
				"industry": "Robotics",
				"founded_year": 2014,
			}))
			.await;

		assert_eq!(response.status_code(), 200);

		let response = app.get("/profiles/employer").await;

		assert_eq!(response.status_code(), 200);
		assert_eq!(response.json::<serde_json::Value>()["company_name"], "Acme");
	}

	#[sqlx::test]
	async fn test_profile_requires_session(pool: Database) {
		let app = app(pool);

		let response = app.get("/profiles/applicant").await;

		assert_eq!(response.status_code(), 401);
	}
}
