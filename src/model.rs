//! Domain vocabulary shared across route modules.
//!
//! Every branching value the store holds is a closed enum on both sides:
//! a Postgres enum type in the schema and a Rust enum here, so branch
//! points are exhaustive matches rather than string comparison.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The role picked at registration. There is no operation that changes it
/// afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "user_type", rename_all = "lowercase")]
pub enum UserType {
	Applicant,
	Employer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "position_type", rename_all = "lowercase")]
pub enum PositionType {
	Frontend,
	Backend,
	Fullstack,
}

/// Gates visibility in the public jobs listing.
#[derive(
	Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, sqlx::Type,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "job_status", rename_all = "lowercase")]
pub enum JobStatus {
	#[default]
	Open,
	Closed,
}

#[derive(
	Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, sqlx::Type,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "application_status", rename_all = "lowercase")]
pub enum ApplicationStatus {
	#[default]
	Pending,
	Reviewed,
	Accepted,
	Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "post_type", rename_all = "lowercase")]
pub enum PostType {
	Project,
	Startup,
	Collaboration,
}

/// Only `active` posts show up in the community feed.
#[derive(
	Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, sqlx::Type,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "post_status", rename_all = "lowercase")]
pub enum PostStatus {
	#[default]
	Active,
	Archived,
}

#[derive(
	Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, sqlx::Type,
)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "connection_status", rename_all = "lowercase")]
pub enum ConnectionStatus {
	#[default]
	Pending,
	Accepted,
}

/// Splits comma-separated form input ("React, Node.js, ") into a trimmed,
/// non-empty list.
pub fn split_list(input: &str) -> Vec<String> {
	input
		.split(',')
		.map(str::trim)
		.filter(|entry| !entry.is_empty())
		.map(str::to_owned)
		.collect()
}
