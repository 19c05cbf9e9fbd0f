use aide::axum::{
	routing::{get_with, put_with},
	ApiRouter,
};
use axum::http::StatusCode;
use uuid::Uuid;

use crate::{error, AppState};

pub mod model;
pub mod route;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("unknown application {0}")]
	UnknownApplication(Uuid),
	#[error("only applicant accounts submit applications")]
	NotAnApplicant,
	#[error("an applicant profile is required first")]
	NoApplicantProfile,
	#[error("only employer accounts review applications")]
	NotAnEmployer,
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
		.api_route("/", get_with(get_my_applications, get_my_applications_docs))
		.api_route(
			"/received",
			get_with(get_received_applications, get_received_applications_docs),
		)
		.api_route(
			"/:application_id",
			put_with(set_application_status, set_application_status_docs),
		)
}

impl error::ErrorShape for Error {
	fn status(&self) -> StatusCode {
		match self {
			Self::UnknownApplication(..) => StatusCode::NOT_FOUND,
			Self::NotAnApplicant | Self::NotAnEmployer => StatusCode::FORBIDDEN,
			Self::NoApplicantProfile => StatusCode::CONFLICT,
		}
	}

	fn into_errors(self) -> Vec<error::Message<'static>> {
		error::Message::new(self.to_string()).into_vec()
	}
}

#[cfg(test)]
mod test {
	use crate::test::*;

	async fn seed_application(pool: &Database) -> (axum_test::TestServer, axum_test::TestServer, Uuid) {
		let employer = app(pool.clone());

		register(&employer, "boss@acme.dev", "employer").await;
		save_employer_profile(&employer, "Acme").await;

		let response = employer
			.post("/jobs")
			.json(&json!({
				"title": "Backend engineer",
				"description": "We build delightful tools.",
				"position_type": "backend",
				"required_skills": "Rust, SQL",
				"experience_required": "2+ years",
			}))
			.await;

		let job_id: Uuid = response.json::<serde_json::Value>()["id"]
			.as_str()
			.unwrap()
			.parse()
			.unwrap();

		let applicant = app(pool.clone());

		register(&applicant, "ada@lovelace.dev", "applicant").await;
		save_applicant_profile(&applicant).await;

		applicant
			.post(&format!("/jobs/{job_id}/apply"))
			.json(&json!({ "cover_letter": "I love Rust." }))
			.await
			.assert_status_ok();

		(employer, applicant, job_id)
	}

	#[sqlx::test]
	async fn test_applicant_sees_submitted_applications(pool: Database) {
		let (_, applicant, job_id) = seed_application(&pool).await;

		let response = applicant.get("/applications").await;

		assert_eq!(response.status_code(), 200);

		let applications = response.json::<serde_json::Value>();

		assert_eq!(applications.as_array().unwrap().len(), 1);
		assert_eq!(applications[0]["job_id"], job_id.to_string());
		assert_eq!(applications[0]["job_title"], "Backend engineer");
		assert_eq!(applications[0]["company_name"], "Acme");
		assert_eq!(applications[0]["status"], "pending");
	}

	#[sqlx::test]
	async fn test_employer_sees_received_applications(pool: Database) {
		let (employer, _, _) = seed_application(&pool).await;

		let response = employer.get("/applications/received").await;

		assert_eq!(response.status_code(), 200);

		let applications = response.json::<serde_json::Value>();

		assert_eq!(applications.as_array().unwrap().len(), 1);
		assert_eq!(applications[0]["applicant_name"], "ada");
		assert_eq!(applications[0]["job_title"], "Backend engineer");
	}

	#[sqlx::test]
	async fn test_review_flow(pool: Database) {
		let (employer, applicant, _) = seed_application(&pool).await;

		let response = employer.get("/applications/received").await;
		let application_id = response.json::<serde_json::Value>()[0]["id"]
			.as_str()
			.unwrap()
			.to_owned();

		let response = employer
			.put(&format!("/applications/{application_id}"))
			.json(&json!({ "status": "reviewed" }))
			.await;

		assert_eq!(response.status_code(), 200);

		let response = applicant.get("/applications").await;

		assert_eq!(response.json::<serde_json::Value>()[0]["status"], "reviewed");
	}

	#[sqlx::test]
	async fn test_only_the_listing_owner_can_review(pool: Database) {
		let (employer, _, _) = seed_application(&pool).await;

		let response = employer.get("/applications/received").await;
		let application_id = response.json::<serde_json::Value>()[0]["id"]
			.as_str()
			.unwrap()
			.to_owned();

		let other = app(pool);

		register(&other, "rival@globex.dev", "employer").await;
		save_employer_profile(&other, "Globex").await;

		let response = other
			.put(&format!("/applications/{application_id}"))
			.json(&json!({ "status": "accepted" }))
			.await;

		assert_eq!(response.status_code(), 404);
	}

	#[sqlx::test]
	async fn test_listing_requires_applicant_profile(pool: Database) {
		let app = app(pool);

		register(&app, "ada@lovelace.dev", "applicant").await;

		let response = app.get("/applications").await;

		assert_eq!(response.status_code(), 409);
	}

	#[sqlx::test]
	async fn test_received_is_employer_only(pool: Database) {
		let (_, applicant, _) = seed_application(&pool).await;

		let response = applicant.get("/applications/received").await;

		assert_eq!(response.status_code(), 403);
	}
}
