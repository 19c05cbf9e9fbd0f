use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::model::{ApplicationStatus, JobStatus, PositionType};

/// A submitted application, exactly as stored.
#[derive(Debug, Serialize, JsonSchema, sqlx::FromRow)]
pub struct Application {
	/// The unique identifier of the application.
	pub id: Uuid,
	pub job_id: Uuid,
	pub applicant_id: Uuid,
	pub cover_letter: Option<String>,
	pub status: ApplicationStatus,
	pub created_at: chrono::DateTime<chrono::Utc>,
}

/// An application as the applicant sees it on their dashboard, with the
/// listing it was submitted to joined in.
#[derive(Debug, Serialize, JsonSchema, sqlx::FromRow)]
pub struct SubmittedApplication {
	pub id: Uuid,
	pub job_id: Uuid,
	pub status: ApplicationStatus,
	pub cover_letter: Option<String>,
	pub created_at: chrono::DateTime<chrono::Utc>,
	pub job_title: String,
	pub company_name: String,
	pub position_type: PositionType,
	pub salary_range: Option<String>,
	/// The current status of the listing itself.
	pub job_status: JobStatus,
}

/// An application as the employer sees it, with the listing and the
/// applicant joined in.
#[derive(Debug, Serialize, JsonSchema, sqlx::FromRow)]
pub struct ReceivedApplication {
	pub id: Uuid,
	pub job_id: Uuid,
	pub status: ApplicationStatus,
	pub cover_letter: Option<String>,
	pub created_at: chrono::DateTime<chrono::Utc>,
	pub job_title: String,
	pub applicant_name: String,
	pub applicant_email: String,
	pub skills: Vec<String>,
	pub experience_years: i32,
	pub resume_url: Option<String>,
}

#[derive(Debug, Deserialize, Validate, JsonSchema)]
pub struct StatusInput {
	pub status: ApplicationStatus,
}
