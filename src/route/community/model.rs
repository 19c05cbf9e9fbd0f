use macros::model;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::model::{PostStatus, PostType};

fn validate_not_blank(content: &str) -> Result<(), ValidationError> {
	if content.trim().is_empty() {
		return Err(ValidationError::new("must not be blank"));
	}

	Ok(())
}

/// A community post. Projects, startups and collaboration calls all share
/// this shape.
#[model]
#[derive(Debug, Deserialize, Serialize, JsonSchema, Validate, sqlx::FromRow)]
pub struct CommunityPost {
	/// The unique identifier of the post.
	#[serde(skip_deserializing)]
	pub id: Uuid,
	/// The account that created the post.
	#[serde(skip_deserializing)]
	pub user_id: Uuid,
	#[validate(length(min = 3, max = 128))]
	pub title: String,
	#[validate(length(min = 1, max = 8192))]
	pub description: String,
	pub post_type: PostType,
	/// Technologies involved, submitted as comma-separated text.
	#[model(csv)]
	pub technologies: Vec<String>,
	/// Who the author hopes to hear from, e.g. "backend devs".
	#[validate(length(max = 256))]
	pub looking_for: Option<String>,
	#[serde(skip_deserializing)]
	pub status: PostStatus,
	#[serde(skip_deserializing)]
	pub created_at: chrono::DateTime<chrono::Utc>,
}

/// A post in the feed, with its author joined in.
#[derive(Debug, Serialize, JsonSchema, sqlx::FromRow)]
pub struct FeedPost {
	#[serde(flatten)]
	#[sqlx(flatten)]
	pub post: CommunityPost,
	pub author_name: String,
	pub author_avatar_url: Option<String>,
}

#[derive(Debug, Deserialize, Validate, JsonSchema)]
pub struct PostFilter {
	/// Only return posts of this type.
	pub post_type: Option<PostType>,
}

/// A comment with its author joined in.
#[derive(Debug, Serialize, JsonSchema, sqlx::FromRow)]
pub struct Comment {
	/// The unique identifier of the comment.
	pub id: Uuid,
	pub post_id: Uuid,
	pub user_id: Uuid,
	pub content: String,
	pub created_at: chrono::DateTime<chrono::Utc>,
	pub author_name: String,
	pub author_avatar_url: Option<String>,
}

#[derive(Debug, Deserialize, Validate, JsonSchema)]
pub struct CommentInput {
	#[validate(length(min = 1, max = 2048), custom(function = "validate_not_blank"))]
	pub content: String,
}

/// The like counter as the viewer sees it. The count is always a server
/// aggregate, never a client-adjusted number.
#[derive(Debug, Serialize, JsonSchema, sqlx::FromRow)]
pub struct LikeStatus {
	pub count: i64,
	pub liked: bool,
}

#[derive(Debug, Serialize, JsonSchema, sqlx::FromRow)]
pub struct CommentCount {
	pub count: i64,
}
