use aide::axum::{
	routing::{delete_with, get_with, put_with},
	ApiRouter,
};
use axum::http::StatusCode;
use uuid::Uuid;

use crate::{error, AppState};

pub mod model;
pub mod route;
pub mod share;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("unknown post {0}")]
	UnknownPost(Uuid),
	#[error("unknown comment {0}")]
	UnknownComment(Uuid),
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
			"/posts",
			get_with(get_posts, get_posts_docs).post_with(create_post, create_post_docs),
		)
		.api_route("/posts/:post_id", delete_with(delete_post, delete_post_docs))
		.api_route(
			"/posts/:post_id/comments",
			get_with(get_comments, get_comments_docs).post_with(create_comment, create_comment_docs),
		)
		.api_route(
			"/posts/:post_id/comments/count",
			get_with(get_comment_count, get_comment_count_docs),
		)
		.api_route("/posts/:post_id/likes", get_with(get_likes, get_likes_docs))
		.api_route(
			"/posts/:post_id/like",
			put_with(like_post, like_post_docs).delete_with(unlike_post, unlike_post_docs),
		)
		.api_route(
			"/posts/:post_id/share",
			get_with(get_share_links, get_share_links_docs),
		)
		.api_route(
			"/comments/:comment_id",
			delete_with(delete_comment, delete_comment_docs),
		)
}

impl error::ErrorShape for Error {
	fn status(&self) -> StatusCode {
		match self {
			Self::UnknownPost(..) | Self::UnknownComment(..) => StatusCode::NOT_FOUND,
		}
	}

	fn into_errors(self) -> Vec<error::Message<'static>> {
		error::Message::new(self.to_string()).into_vec()
	}
}

#[cfg(test)]
mod test {
	use crate::test::*;

	async fn create_post(app: &axum_test::TestServer, title: &str, post_type: &str) -> Uuid {
		let response = app
			.post("/community/posts")
			.json(&json!({
				"title": title,
				"description": "Looking for people to build with.",
				"post_type": post_type,
				"technologies": "Rust, Postgres",
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
	async fn test_feed_requires_session(pool: Database) {
		let app = app(pool);

		let response = app.get("/community/posts").await;

		assert_eq!(response.status_code(), 401);
	}

	#[sqlx::test]
	async fn test_feed_joins_author_and_filters_by_type(pool: Database) {
		let app = app(pool);

		register(&app, "ada@lovelace.dev", "applicant").await;

		create_post(&app, "Terminal file manager", "project").await;
		create_post(&app, "Looking for a cofounder", "startup").await;

		let response = app.get("/community/posts").await;
		let posts = response.json::<serde_json::Value>();

		assert_eq!(posts.as_array().unwrap().len(), 2);

		// Newest first.
		assert_eq!(posts[0]["title"], "Looking for a cofounder");
		assert_eq!(posts[0]["author_name"], "ada");
		assert_eq!(posts[1]["technologies"], json!(["Rust", "Postgres"]));

		let response = app
			.get("/community/posts")
			.add_query_param("post_type", "startup")
			.await;
		let posts = response.json::<serde_json::Value>();

		assert_eq!(posts.as_array().unwrap().len(), 1);
		assert_eq!(posts[0]["post_type"], "startup");
	}

	#[sqlx::test]
	async fn test_only_the_author_can_delete_a_post(pool: Database) {
		let author = app(pool.clone());

		register(&author, "ada@lovelace.dev", "applicant").await;

		let post_id = create_post(&author, "Terminal file manager", "project").await;

		let other = app(pool);

		register(&other, "joan@clarke.dev", "applicant").await;

		let response = other.delete(&format!("/community/posts/{post_id}")).await;

		assert_eq!(response.status_code(), 404);

		let response = author.delete(&format!("/community/posts/{post_id}")).await;

		assert_eq!(response.status_code(), 204);

		let response = author.delete(&format!("/community/posts/{post_id}")).await;

		assert_eq!(response.status_code(), 404);
	}

	#[sqlx::test]
	async fn test_comment_flow(pool: Database) {
		let app = app(pool);

		register(&app, "ada@lovelace.dev", "applicant").await;

		let post_id = create_post(&app, "Terminal file manager", "project").await;

		let response = app
			.post(&format!("/community/posts/{post_id}/comments"))
			.json(&json!({ "content": "   " }))
			.await;

		assert_eq!(response.status_code(), 400);

		let response = app
			.post(&format!("/community/posts/{post_id}/comments"))
			.json(&json!({ "content": "  Count me in!  " }))
			.await;

		assert_eq!(response.status_code(), 200);

		// Stored trimmed.
		assert_eq!(response.json::<serde_json::Value>()["content"], "Count me in!");

		let response = app
			.get(&format!("/community/posts/{post_id}/comments"))
			.await;
		let comments = response.json::<serde_json::Value>();

		assert_eq!(comments.as_array().unwrap().len(), 1);
		assert_eq!(comments[0]["author_name"], "ada");

		let response = app
			.get(&format!("/community/posts/{post_id}/comments/count"))
			.await;

		assert_eq!(response.json::<serde_json::Value>()["count"], 1);
	}

	#[sqlx::test]
	async fn test_only_the_author_can_delete_a_comment(pool: Database) {
		let author = app(pool.clone());

		register(&author, "ada@lovelace.dev", "applicant").await;

		let post_id = create_post(&author, "Terminal file manager", "project").await;

		let response = author
			.post(&format!("/community/posts/{post_id}/comments"))
			.json(&json!({ "content": "Count me in!" }))
			.await;

		let comment_id = response.json::<serde_json::Value>()["id"]
			.as_str()
			.unwrap()
			.to_owned();

		let other = app(pool);

		register(&other, "joan@clarke.dev", "applicant").await;

		let response = other
			.delete(&format!("/community/comments/{comment_id}"))
			.await;

		assert_eq!(response.status_code(), 404);

		let response = author
			.delete(&format!("/community/comments/{comment_id}"))
			.await;

		assert_eq!(response.status_code(), 204);
	}

	#[sqlx::test]
	async fn test_like_toggle_restores_state(pool: Database) {
		let app = app(pool);

		register(&app, "ada@lovelace.dev", "applicant").await;

		let post_id = create_post(&app, "Terminal file manager", "project").await;

		let response = app.get(&format!("/community/posts/{post_id}/likes")).await;

		assert_eq!(
			response.json::<serde_json::Value>(),
			json!({ "count": 0, "liked": false })
		);

		let response = app.put(&format!("/community/posts/{post_id}/like")).await;

		assert_eq!(
			response.json::<serde_json::Value>(),
			json!({ "count": 1, "liked": true })
		);

		// A repeated like is a no-op, not a second row.
		let response = app.put(&format!("/community/posts/{post_id}/like")).await;

		assert_eq!(
			response.json::<serde_json::Value>(),
			json!({ "count": 1, "liked": true })
		);

		let response = app
			.delete(&format!("/community/posts/{post_id}/like"))
			.await;

		assert_eq!(
			response.json::<serde_json::Value>(),
			json!({ "count": 0, "liked": false })
		);

		// Unliking when not liked stays at zero.
		let response = app
			.delete(&format!("/community/posts/{post_id}/like"))
			.await;

		assert_eq!(
			response.json::<serde_json::Value>(),
			json!({ "count": 0, "liked": false })
		);
	}

	#[sqlx::test]
	async fn test_likes_are_scoped_to_the_viewer(pool: Database) {
		let ada = app(pool.clone());

		register(&ada, "ada@lovelace.dev", "applicant").await;

		let post_id = create_post(&ada, "Terminal file manager", "project").await;

		ada.put(&format!("/community/posts/{post_id}/like"))
			.await
			.assert_status_ok();

		let joan = app(pool);

		register(&joan, "joan@clarke.dev", "applicant").await;

		let response = joan.get(&format!("/community/posts/{post_id}/likes")).await;

		assert_eq!(
			response.json::<serde_json::Value>(),
			json!({ "count": 1, "liked": false })
		);
	}

	#[sqlx::test]
	async fn test_like_of_unknown_post_is_404(pool: Database) {
		let app = app(pool);

		register(&app, "ada@lovelace.dev", "applicant").await;

		let response = app
			.put(&format!("/community/posts/{}/like", Uuid::new_v4()))
			.await;

		assert_eq!(response.status_code(), 404);
	}

	#[sqlx::test]
	async fn test_share_links(pool: Database) {
		let app = app(pool);

		register(&app, "ada@lovelace.dev", "applicant").await;

		let post_id = create_post(&app, "Terminal file manager", "project").await;

		let response = app.get(&format!("/community/posts/{post_id}/share")).await;

		assert_eq!(response.status_code(), 200);

		let links = response.json::<serde_json::Value>();

		assert_eq!(
			links["url"],
			format!("http://localhost:3000/community/post/{post_id}")
		);
		assert!(links["twitter"]
			.as_str()
			.unwrap()
			.contains("Terminal%20file%20manager"));
	}
}
