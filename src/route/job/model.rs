use macros::model;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::model::{JobStatus, PositionType};

/// A job listing on the public board.
///
/// The company name is denormalized from the employer profile at posting
/// time, so later profile edits do not rewrite published listings.
#[model]
#[derive(Debug, Deserialize, Serialize, JsonSchema, Validate, sqlx::FromRow)]
pub struct JobListing {
	/// The unique identifier of the listing.
	#[serde(skip_deserializing)]
	pub id: Uuid,
	/// The employer profile that posted the listing.
	#[serde(skip_deserializing)]
	pub employer_id: Uuid,
	#[validate(length(min = 3, max = 128))]
	pub title: String,
	#[validate(length(min = 1, max = 8192))]
	pub description: String,
	pub position_type: PositionType,
	/// Required skills, submitted as comma-separated text.
	#[model(csv)]
	pub required_skills: Vec<String>,
	/// Free-form salary range, e.g. "€60k-€80k".
	#[validate(length(max = 64))]
	pub salary_range: Option<String>,
	/// Free-form experience requirement, e.g. "2+ years".
	#[validate(length(min = 1, max = 128))]
	pub experience_required: String,
	#[serde(skip_deserializing)]
	pub company_name: String,
	/// Omitted on creation, listings start out open.
	#[serde(default)]
	pub status: JobStatus,
	#[serde(skip_deserializing)]
	pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Deserialize, Validate, JsonSchema)]
pub struct JobFilter {
	/// Only return listings for this position type.
	pub position_type: Option<PositionType>,
	/// Case-insensitive substring match against the title, company name
	/// and description.
	#[validate(length(max = 128))]
	pub search: Option<String>,
}

/// What the authenticated applicant can do with a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Eligibility {
	CanApply,
	AlreadyApplied,
	ProfileRequired,
}

/// A listing plus the viewer's standing towards it. The hint is absent
/// for anonymous and employer viewers.
#[derive(Debug, Serialize, JsonSchema)]
pub struct JobDetails {
	#[serde(flatten)]
	pub job: JobListing,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub viewer: Option<Eligibility>,
}

#[derive(Debug, Deserialize, Validate, JsonSchema)]
pub struct ApplyInput {
	#[validate(length(max = 4096))]
	pub cover_letter: Option<String>,
}
