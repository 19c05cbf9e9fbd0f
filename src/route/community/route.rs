use aide::axum::IntoApiResponse;
use axum::{
	extract::State,
	http::StatusCode,
	response::IntoResponse,
};
use macros::route;
use uuid::Uuid;

use crate::{
	extract::{Json, Path, Query, Session},
	model::split_list,
	openapi::tag,
	AppState, Database,
};

use super::{model, share, Error, RouteError};

async fn ensure_post(database: &Database, post_id: Uuid) -> Result<(), RouteError> {
	let exists =
		sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM community_post WHERE id = $1)")
			.bind(post_id)
			.fetch_one(database)
			.await?;

	if exists {
		Ok(())
	} else {
		Err(Error::UnknownPost(post_id).into())
	}
}

/// The count is aggregated on every read, so it cannot drift below zero
/// or out of sync with the rows.
async fn like_status(
	database: &Database,
	post_id: Uuid,
	user_id: Uuid,
) -> Result<model::LikeStatus, RouteError> {
	let status = sqlx::query_as::<_, model::LikeStatus>(
		r"
			SELECT COUNT(*) AS count, COALESCE(bool_or(user_id = $2), false) AS liked
			FROM post_like
			WHERE post_id = $1
		",
	)
	.bind(post_id)
	.bind(user_id)
	.fetch_one(database)
	.await?;

	Ok(status)
}

/// List posts
/// Returns every active post, newest first, with its author joined in.
#[route(tag = tag::COMMUNITY)]
pub async fn get_posts(
	State(database): State<Database>,
	_session: Session,
	Query(filter): Query<model::PostFilter>,
) -> Result<Json<Vec<model::FeedPost>>, RouteError> {
	let posts = sqlx::query_as::<_, model::FeedPost>(
		r"
			SELECT p.*, acc.full_name AS author_name, acc.avatar_url AS author_avatar_url
			FROM community_post p
			JOIN account acc ON acc.id = p.user_id
			WHERE p.status = 'active'
				AND ($1::post_type IS NULL OR p.post_type = $1)
			ORDER BY p.created_at DESC
		",
	)
	.bind(filter.post_type)
	.fetch_all(&database)
	.await?;

	Ok(Json(posts))
}

/// Create post
/// Creates a new post under the authenticated account.
#[route(tag = tag::COMMUNITY)]
pub async fn create_post(
	State(database): State<Database>,
	session: Session,
	Json(input): Json<model::CreateCommunityPostInput>,
) -> Result<Json<model::CommunityPost>, RouteError> {
	let post = sqlx::query_as::<_, model::CommunityPost>(
		r"
			INSERT INTO community_post (user_id, title, description, post_type, technologies, looking_for)
			VALUES ($1, $2, $3, $4, $5, $6)
			RETURNING *
		",
	)
	.bind(session.user.id)
	.bind(&input.title)
	.bind(&input.description)
	.bind(input.post_type)
	.bind(split_list(&input.technologies))
	.bind(&input.looking_for)
	.fetch_one(&database)
	.await?;

	Ok(Json(post))
}

/// Delete post
/// Deletes one of the authenticated account's posts. Comments and likes go
/// with it.
#[route(tag = tag::COMMUNITY, response(status = 204, description = "Deleted successfully."))]
pub async fn delete_post(
	State(database): State<Database>,
	session: Session,
	Path(post_id): Path<Uuid>,
) -> Result<impl IntoApiResponse, RouteError> {
	let result = sqlx::query("DELETE FROM community_post WHERE id = $1 AND user_id = $2")
		.bind(post_id)
		.bind(session.user.id)
		.execute(&database)
		.await?;

	if result.rows_affected() == 0 {
		return Err(Error::UnknownPost(post_id).into());
	}

	Ok(StatusCode::NO_CONTENT.into_response())
}

/// List comments
/// Returns a post's comments, oldest first, with their authors joined in.
#[route(tag = tag::COMMUNITY)]
pub async fn get_comments(
	State(database): State<Database>,
	_session: Session,
	Path(post_id): Path<Uuid>,
) -> Result<Json<Vec<model::Comment>>, RouteError> {
	ensure_post(&database, post_id).await?;

	let comments = sqlx::query_as::<_, model::Comment>(
		r"
			SELECT c.id, c.post_id, c.user_id, c.content, c.created_at,
				acc.full_name AS author_name, acc.avatar_url AS author_avatar_url
			FROM post_comment c
			JOIN account acc ON acc.id = c.user_id
			WHERE c.post_id = $1
			ORDER BY c.created_at ASC
		",
	)
	.bind(post_id)
	.fetch_all(&database)
	.await?;

	Ok(Json(comments))
}

/// Create comment
/// Comments on a post. Content is stored trimmed.
#[route(tag = tag::COMMUNITY)]
pub async fn create_comment(
	State(database): State<Database>,
	session: Session,
	Path(post_id): Path<Uuid>,
	Json(input): Json<model::CommentInput>,
) -> Result<Json<model::Comment>, RouteError> {
	let content = input.content.trim();

	let (id, created_at) = sqlx::query_as::<_, (Uuid, chrono::DateTime<chrono::Utc>)>(
		r"
			INSERT INTO post_comment (post_id, user_id, content)
			VALUES ($1, $2, $3)
			RETURNING id, created_at
		",
	)
	.bind(post_id)
	.bind(session.user.id)
	.bind(content)
	.fetch_one(&database)
	.await
	.map_err(|e| match e {
		sqlx::Error::Database(ref d) if d.constraint() == Some("post_comment_post_id_fkey") => {
			Error::UnknownPost(post_id).into()
		}
		e => RouteError::from(e),
	})?;

	Ok(Json(model::Comment {
		id,
		post_id,
		user_id: session.user.id,
		content: content.to_owned(),
		created_at,
		author_name: session.user.full_name,
		author_avatar_url: session.user.avatar_url,
	}))
}

/// Delete comment
/// Deletes one of the authenticated account's comments.
#[route(tag = tag::COMMUNITY, response(status = 204, description = "Deleted successfully."))]
pub async fn delete_comment(
	State(database): State<Database>,
	session: Session,
	Path(comment_id): Path<Uuid>,
) -> Result<impl IntoApiResponse, RouteError> {
	let result = sqlx::query("DELETE FROM post_comment WHERE id = $1 AND user_id = $2")
		.bind(comment_id)
		.bind(session.user.id)
		.execute(&database)
		.await?;

	if result.rows_affected() == 0 {
		return Err(Error::UnknownComment(comment_id).into());
	}

	Ok(StatusCode::NO_CONTENT.into_response())
}

/// Count comments
/// Returns the number of comments on a post.
#[route(tag = tag::COMMUNITY)]
pub async fn get_comment_count(
	State(database): State<Database>,
	_session: Session,
	Path(post_id): Path<Uuid>,
) -> Result<Json<model::CommentCount>, RouteError> {
	ensure_post(&database, post_id).await?;

	let count = sqlx::query_as::<_, model::CommentCount>(
		"SELECT COUNT(*) AS count FROM post_comment WHERE post_id = $1",
	)
	.bind(post_id)
	.fetch_one(&database)
	.await?;

	Ok(Json(count))
}

/// Get likes
/// Returns a post's like count and whether the viewer has liked it.
#[route(tag = tag::COMMUNITY)]
pub async fn get_likes(
	State(database): State<Database>,
	session: Session,
	Path(post_id): Path<Uuid>,
) -> Result<Json<model::LikeStatus>, RouteError> {
	ensure_post(&database, post_id).await?;

	Ok(Json(like_status(&database, post_id, session.user.id).await?))
}

/// Like post
/// Likes a post. Liking an already-liked post is a no-op.
#[route(tag = tag::COMMUNITY)]
pub async fn like_post(
	State(database): State<Database>,
	session: Session,
	Path(post_id): Path<Uuid>,
) -> Result<Json<model::LikeStatus>, RouteError> {
	sqlx::query(
		r"
			INSERT INTO post_like (post_id, user_id)
			VALUES ($1, $2)
			ON CONFLICT DO NOTHING
		",
	)
	.bind(post_id)
	.bind(session.user.id)
	.execute(&database)
	.await
	.map_err(|e| match e {
		sqlx::Error::Database(ref d) if d.constraint() == Some("post_like_post_id_fkey") => {
			Error::UnknownPost(post_id).into()
		}
		e => RouteError::from(e),
	})?;

	Ok(Json(like_status(&database, post_id, session.user.id).await?))
}

/// Unlike post
/// Removes the viewer's like from a post. Unliking a post that was never
/// liked is a no-op.
#[route(tag = tag::COMMUNITY)]
pub async fn unlike_post(
	State(database): State<Database>,
	session: Session,
	Path(post_id): Path<Uuid>,
) -> Result<Json<model::LikeStatus>, RouteError> {
	ensure_post(&database, post_id).await?;

	sqlx::query("DELETE FROM post_like WHERE post_id = $1 AND user_id = $2")
		.bind(post_id)
		.bind(session.user.id)
		.execute(&database)
		.await?;

	Ok(Json(like_status(&database, post_id, session.user.id).await?))
}

/// Get share links
/// Returns the canonical URL of a post and prefilled share intents.
#[route(tag = tag::COMMUNITY)]
pub async fn get_share_links(
	State(state): State<AppState>,
	_session: Session,
	Path(post_id): Path<Uuid>,
) -> Result<Json<share::ShareLinks>, RouteError> {
	let title = sqlx::query_scalar::<_, String>("SELECT title FROM community_post WHERE id = $1")
		.bind(post_id)
		.fetch_optional(&state.database)
		.await?
		.ok_or(Error::UnknownPost(post_id))?;

	Ok(Json(share::share_links(
		&state.config.public_origin,
		post_id,
		&title,
	)))
}
