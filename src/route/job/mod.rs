use aide::axum::{
	routing::{get_with, post_with},
	ApiRouter,
};
use axum::http::StatusCode;
use uuid::Uuid;

use crate::{error, AppState};

pub mod model;
pub mod route;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("unknown job {0}")]
	UnknownJob(Uuid),
	#[error("only employer accounts can manage job listings")]
	NotAnEmployer,
	#[error("an employer profile is required before posting a job")]
	NoEmployerProfile,
	#[error("only applicant accounts can apply to jobs")]
	NotAnApplicant,
	#[error("an applicant profile is required before applying")]
	NoApplicantProfile,
	#[error("you have already applied to this job")]
	AlreadyApplied,
	#[error("this job is no longer accepting applications")]
	JobClosed,
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
			"/",
			get_with(get_jobs, get_jobs_docs).post_with(create_job, create_job_docs),
		)
		.api_route("/mine", get_with(get_my_jobs, get_my_jobs_docs))
		.api_route(
			"/:job_id",
			get_with(get_job, get_job_docs).put_with(update_job, update_job_docs),
		)
		.api_route("/:job_id/apply", post_with(apply, apply_docs))
}

impl error::ErrorShape for Error {
	fn status(&self) -> StatusCode {
		match self {
			Self::UnknownJob(..) => StatusCode::NOT_FOUND,
			Self::NotAnEmployer | Self::NotAnApplicant => StatusCode::FORBIDDEN,
			Self::NoEmployerProfile
			| Self::NoApplicantProfile
			| Self::AlreadyApplied
			| Self::JobClosed => StatusCode::CONFLICT,
		}
	}

	fn into_errors(self) -> Vec<error::Message<'static>> {
		error::Message::new(self.to_string()).into_vec()
	}
}

#[cfg(test)]
mod test {
	use crate::test::*;

	async fn post_job(app: &axum_test::TestServer, title: &str, position_type: &str) -> Uuid {
		let response = app
			.post("/jobs")
			.json(&json!({
				"title": title,
				"description": "We build delightful tools.",
				"position_type": position_type,
				"required_skills": "Rust, SQL",
				"experience_required": "2+ years",
			}))
			.await;

		assert_eq!(response.status_code(), 200);

		response.json::<serde_json::Value>()["id"]
			.as_str()
			.unwrap()
			.parse()
			.unwrap()
	}

	#[sqlx::test]
	async fn test_posting_requires_employer_profile(pool: Database) {
		let app = app(pool);

		register(&app, "boss@acme.dev", "employer").await;

		let response = app
			.post("/jobs")
			.json(&json!({
				"title": "Backend engineer",
				"description": "We build delightful tools.",
				"position_type": "backend",
				"required_skills": "Rust",
				"experience_required": "2+ years",
			}))
			.await;

		assert_eq!(response.status_code(), 409);

		save_employer_profile(&app, "Acme").await;

		let job_id = post_job(&app, "Backend engineer", "backend").await;

		let response = app.get(&format!("/jobs/{job_id}")).await;

		assert_eq!(response.status_code(), 200);

		// The company name is stamped onto the listing at posting time.
		assert_eq!(response.json::<serde_json::Value>()["company_name"], "Acme");
	}

	#[sqlx::test]
	async fn test_applicants_cannot_post_jobs(pool: Database) {
		let app = app(pool);

		register(&app, "ada@lovelace.dev", "applicant").await;

		let response = app
			.post("/jobs")
			.json(&json!({
				"title": "Backend engineer",
				"description": "We build delightful tools.",
				"position_type": "backend",
				"required_skills": "Rust",
				"experience_required": "2+ years",
			}))
			.await;

		assert_eq!(response.status_code(), 403);
	}

	#[sqlx::test]
	async fn test_listing_filters(pool: Database) {
		let employer = app(pool.clone());

		register(&employer, "boss@acme.dev", "employer").await;
		save_employer_profile(&employer, "Acme").await;

		post_job(&employer, "Frontend engineer", "frontend").await;
		let closed = post_job(&employer, "Backend engineer", "backend").await;

		employer
			.put(&format!("/jobs/{closed}"))
			.json(&json!({ "status": "closed" }))
			.await
			.assert_status_ok();

		let viewer = app(pool);

		// Closed listings never show up in the public board.
		let response = viewer.get("/jobs").await;
		let jobs = response.json::<serde_json::Value>();

		assert_eq!(jobs.as_array().unwrap().len(), 1);
		assert_eq!(jobs[0]["title"], "Frontend engineer");

		let response = viewer.get("/jobs").add_query_param("search", "front").await;

		assert_eq!(response.json::<serde_json::Value>().as_array().unwrap().len(), 1);

		let response = viewer
			.get("/jobs")
			.add_query_param("position_type", "backend")
			.await;

		assert!(response.json::<serde_json::Value>().as_array().unwrap().is_empty());
	}

	#[sqlx::test]
	async fn test_own_listings_include_closed(pool: Database) {
		let app = app(pool);

		register(&app, "boss@acme.dev", "employer").await;
		save_employer_profile(&app, "Acme").await;

		let job_id = post_job(&app, "Backend engineer", "backend").await;

		app.put(&format!("/jobs/{job_id}"))
			.json(&json!({ "status": "closed" }))
			.await
			.assert_status_ok();

		let response = app.get("/jobs/mine").await;
		let jobs = response.json::<serde_json::Value>();

		assert_eq!(jobs.as_array().unwrap().len(), 1);
		assert_eq!(jobs[0]["status"], "closed");
	}

	#[sqlx::test]
	async fn test_apply_flow(pool: Database) {
		let employer = app(pool.clone());

		register(&employer, "boss@acme.dev", "employer").await;
		save_employer_profile(&employer, "Acme").await;

		let job_id = post_job(&employer, "Backend engineer", "backend").await;

		let applicant = app(pool);

		register(&applicant, "ada@lovelace.dev", "applicant").await;

		// Employer viewers get no eligibility hint.
		let response = employer.get(&format!("/jobs/{job_id}")).await;

		assert!(response.json::<serde_json::Value>().get("viewer").is_none());

		let response = applicant.get(&format!("/jobs/{job_id}")).await;

		assert_eq!(
			response.json::<serde_json::Value>()["viewer"],
			"profile_required"
		);

		let response = applicant
			.post(&format!("/jobs/{job_id}/apply"))
			.json(&json!({ "cover_letter": "I love Rust." }))
			.await;

		assert_eq!(response.status_code(), 409);

		save_applicant_profile(&applicant).await;

		let response = applicant.get(&format!("/jobs/{job_id}")).await;

		assert_eq!(response.json::<serde_json::Value>()["viewer"], "can_apply");

		let response = applicant
			.post(&format!("/jobs/{job_id}/apply"))
			.json(&json!({ "cover_letter": "I love Rust." }))
			.await;

		assert_eq!(response.status_code(), 200);

		let response = applicant.get(&format!("/jobs/{job_id}")).await;

		assert_eq!(
			response.json::<serde_json::Value>()["viewer"],
			"already_applied"
		);

		// The unique pair constraint turns a second application into a 409.
		let response = applicant
			.post(&format!("/jobs/{job_id}/apply"))
			.json(&json!({}))
			.await;

		assert_eq!(response.status_code(), 409);
	}

	#[sqlx::test]
	async fn test_cannot_apply_to_closed_job(pool: Database) {
		let employer = app(pool.clone());

		register(&employer, "boss@acme.dev", "employer").await;
		save_employer_profile(&employer, "Acme").await;

		let job_id = post_job(&employer, "Backend engineer", "backend").await;

		employer
			.put(&format!("/jobs/{job_id}"))
			.json(&json!({ "status": "closed" }))
			.await
			.assert_status_ok();

		let applicant = app(pool);

		register(&applicant, "ada@lovelace.dev", "applicant").await;
		save_applicant_profile(&applicant).await;

		let response = applicant
			.post(&format!("/jobs/{job_id}/apply"))
			.json(&json!({}))
			.await;

		assert_eq!(response.status_code(), 409);
	}

	#[sqlx::test]
	async fn test_only_the_owner_can_close_a_job(pool: Database) {
		let employer = app(pool.clone());

		register(&employer, "boss@acme.dev", "employer").await;
		save_employer_profile(&employer, "Acme").await;

		let job_id = post_job(&employer, "Backend engineer", "backend").await;

		let other = app(pool);

		register(&other, "rival@globex.dev", "employer").await;
		save_employer_profile(&other, "Globex").await;

		let response = other
			.put(&format!("/jobs/{job_id}"))
			.json(&json!({ "status": "closed" }))
			.await;

		assert_eq!(response.status_code(), 404);
	}
}
