use aide::axum::{routing::get_with, ApiRouter};
use axum::http::StatusCode;
use uuid::Uuid;

use crate::{error, AppState};

pub mod model;
pub mod route;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("unknown account {0}")]
	UnknownAccount(Uuid),
	#[error("cannot connect to yourself")]
	SelfConnection,
	#[error("a connection between these accounts already exists")]
	AlreadyConnected,
}

pub type RouteError = error::RouteError<Error>;

impl From<Error> for RouteError {
	fn from(error: Error) -> Self {
		Self::Route(error)
	}
}

pub fn routes() -> ApiRouter<AppState> {
	use route::*;

	ApiRouter::new().api_route(
		"/:user_id",
		get_with(get_connection, get_connection_docs)
			.post_with(create_connection, create_connection_docs),
	)
}

impl error::ErrorShape for Error {
	fn status(&self) -> StatusCode {
		match self {
			Self::UnknownAccount(..) => StatusCode::NOT_FOUND,
			Self::SelfConnection => StatusCode::BAD_REQUEST,
			Self::AlreadyConnected => StatusCode::CONFLICT,
		}
	}

	fn into_errors(self) -> Vec<error::Message<'static>> {
		error::Message::new(self.to_string()).into_vec()
	}
}

#[cfg(test)]
mod test {
	use crate::test::*;

	async fn me(app: &axum_test::TestServer) -> Uuid {
		app.get("/auth/me").await.json::<serde_json::Value>()["id"]
			.as_str()
			.unwrap()
			.parse()
			.unwrap()
	}

	#[sqlx::test]
	async fn test_connection_is_symmetric(pool: Database) {
		let ada = app(pool.clone());
		let joan = app(pool);

		register(&ada, "ada@lovelace.dev", "applicant").await;
		register(&joan, "joan@clarke.dev", "applicant").await;

		let ada_id = me(&ada).await;
		let joan_id = me(&joan).await;

		let response = ada.get(&format!("/connections/{joan_id}")).await;

		assert_eq!(response.json::<serde_json::Value>()["status"], json!(null));

		let response = ada.post(&format!("/connections/{joan_id}")).await;

		assert_eq!(response.status_code(), 200);
		assert_eq!(response.json::<serde_json::Value>()["status"], "pending");

		// Both sides see the same pair.
		let response = ada.get(&format!("/connections/{joan_id}")).await;

		assert_eq!(response.json::<serde_json::Value>()["status"], "pending");

		let response = joan.get(&format!("/connections/{ada_id}")).await;

		assert_eq!(response.json::<serde_json::Value>()["status"], "pending");

		// The reverse ordering hits the same unique pair.
		let response = joan.post(&format!("/connections/{ada_id}")).await;

		assert_eq!(response.status_code(), 409);
	}

	#[sqlx::test]
	async fn test_cannot_connect_to_yourself(pool: Database) {
		let app = app(pool);

		register(&app, "ada@lovelace.dev", "applicant").await;

		let id = me(&app).await;

		let response = app.post(&format!("/connections/{id}")).await;

		assert_eq!(response.status_code(), 400);
	}

	#[sqlx::test]
	async fn test_unknown_account_is_404(pool: Database) {
		let app = app(pool);

		register(&app, "ada@lovelace.dev", "applicant").await;

		let response = app.post(&format!("/connections/{}", Uuid::new_v4())).await;

		assert_eq!(response.status_code(), 404);

		let response = app.get(&format!("/connections/{}", Uuid::new_v4())).await;

		assert_eq!(response.status_code(), 404);
	}

	#[sqlx::test]
	async fn test_requires_session(pool: Database) {
		let app = app(pool);

		let response = app.get(&format!("/connections/{}", Uuid::new_v4())).await;

		assert_eq!(response.status_code(), 401);
	}
}
