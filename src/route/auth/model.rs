use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::model::UserType;

/// A registered account. Every account is either an applicant or an
/// employer, decided once at registration.
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema, Validate, sqlx::FromRow)]
pub struct Account {
	/// The unique identifier of the account.
	#[serde(skip_deserializing)]
	pub id: Uuid,
	/// The primary email address, used for logging in.
	#[validate(email)]
	pub email: String,
	/// The hashed password.
	#[serde(skip)]
	pub password: Vec<u8>,
	/// The name displayed across the site.
	#[validate(length(min = 1, max = 128))]
	pub full_name: String,
	pub user_type: UserType,
	#[validate(url)]
	pub avatar_url: Option<String>,
	#[validate(length(max = 128))]
	pub location: Option<String>,
	#[validate(url)]
	pub website: Option<String>,
	#[validate(url)]
	pub twitter_url: Option<String>,
	/// The creation time of the account.
	#[serde(skip_deserializing)]
	pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize, JsonSchema, sqlx::FromRow)]
pub struct Session {
	/// The session id.
	#[serde(rename = "session_id")]
	pub id: Uuid,
	/// The account that owns the session.
	#[serde(skip)]
	pub user_id: Uuid,
	/// The creation time of the session.
	pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Deserialize, Validate, JsonSchema)]
pub struct LoginInput {
	#[validate(email)]
	pub email: String,
	#[validate(length(min = 8, max = 128))]
	pub password: String,
}

#[derive(Debug, Deserialize, Validate, JsonSchema)]
pub struct RegisterInput {
	#[validate(email)]
	pub email: String,
	#[validate(length(min = 8, max = 128))]
	pub password: String,
	#[validate(length(min = 1, max = 128))]
	pub full_name: String,
	pub user_type: UserType,
}

/// A partial account update. Fields left out keep their current value,
/// including the role, which cannot be changed.
#[derive(Debug, Deserialize, Validate, JsonSchema)]
pub struct UpdateAccountInput {
	#[validate(email)]
	pub email: Option<String>,
	#[validate(length(min = 1, max = 128))]
	pub full_name: Option<String>,
	#[validate(url)]
	pub avatar_url: Option<String>,
	#[validate(length(max = 128))]
	pub location: Option<String>,
	#[validate(url)]
	pub website: Option<String>,
	#[validate(url)]
	pub twitter_url: Option<String>,
}
