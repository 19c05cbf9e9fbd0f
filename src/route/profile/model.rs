use macros::model;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::model::PositionType;

/// The job-seeking side of an account. One row per applicant, saved as a
/// whole from the profile form.
#[model]
#[derive(Debug, Deserialize, Serialize, JsonSchema, Validate, sqlx::FromRow)]
pub struct ApplicantProfile {
	/// The unique identifier of the profile.
	#[serde(skip_deserializing)]
	pub id: Uuid,
	/// The account this profile belongs to.
	#[serde(skip_deserializing)]
	pub user_id: Uuid,
	/// Skills, submitted as comma-separated text.
	#[model(csv)]
	pub skills: Vec<String>,
	#[validate(range(min = 0, max = 60))]
	pub experience_years: i32,
	pub position_type: PositionType,
	#[validate(url)]
	pub resume_url: Option<String>,
	#[validate(url)]
	pub portfolio_url: Option<String>,
	#[validate(url)]
	pub github_url: Option<String>,
	#[validate(url)]
	pub linkedin_url: Option<String>,
	/// Whether the applicant is currently open to offers.
	pub available: bool,
	#[serde(skip_deserializing)]
	pub created_at: chrono::DateTime<chrono::Utc>,
	#[serde(skip_deserializing)]
	pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// The hiring side of an account. Job listings hang off of this profile,
/// so it must exist before the first listing is posted.
#[model]
#[derive(Debug, Deserialize, Serialize, JsonSchema, Validate, sqlx::FromRow)]
pub struct EmployerProfile {
	/// The unique identifier of the profile.
	#[serde(skip_deserializing)]
	pub id: Uuid,
	/// The account this profile belongs to.
	#[serde(skip_deserializing)]
	pub user_id: Uuid,
	#[validate(length(min = 1, max = 128))]
	pub company_name: String,
	#[validate(url)]
	pub website: Option<String>,
	/// Company size bracket, e.g. "11-50".
	#[validate(length(max = 32))]
	pub size: Option<String>,
	#[validate(url)]
	pub logo_url: Option<String>,
	#[validate(length(max = 4096))]
	pub description: Option<String>,
	#[validate(length(max = 128))]
	pub industry: Option<String>,
	#[validate(range(min = 1800, max = 2100))]
	pub founded_year: Option<i32>,
	#[serde(skip_deserializing)]
	pub created_at: chrono::DateTime<chrono::Utc>,
	#[serde(skip_deserializing)]
	pub updated_at: chrono::DateTime<chrono::Utc>,
}
