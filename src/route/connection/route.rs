use axum::extract::State;
use macros::route;
use uuid::Uuid;

use crate::{
	extract::{Json, Path, Session},
	model::ConnectionStatus,
	openapi::tag,
	Database,
};

use super::{model, Error, RouteError};

async fn ensure_account(database: &Database, user_id: Uuid) -> Result<(), RouteError> {
	let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM account WHERE id = $1)")
		.bind(user_id)
		.fetch_one(database)
		.await?;

	if exists {
		Ok(())
	} else {
		Err(Error::UnknownAccount(user_id).into())
	}
}

/// Get connection
/// Returns the viewer's standing towards another account, regardless of
/// which side sent the request.
#[route(tag = tag::CONNECTION)]
pub async fn get_connection(
	State(database): State<Database>,
	session: Session,
	Path(user_id): Path<Uuid>,
) -> Result<Json<model::ConnectionState>, RouteError> {
	ensure_account(&database, user_id).await?;

	let status = sqlx::query_scalar::<_, ConnectionStatus>(
		r"
			SELECT status FROM connection
			WHERE (user_id = $1 AND connected_user_id = $2)
				OR (user_id = $2 AND connected_user_id = $1)
		",
	)
	.bind(session.user.id)
	.bind(user_id)
	.fetch_optional(&database)
	.await?;

	Ok(Json(model::ConnectionState { status }))
}

/// Request connection
/// Sends a connection request to another account. At most one connection
/// exists per pair, whichever side sent it.
#[route(tag = tag::CONNECTION)]
pub async fn create_connection(
	State(database): State<Database>,
	session: Session,
	Path(user_id): Path<Uuid>,
) -> Result<Json<model::Connection>, RouteError> {
	if user_id == session.user.id {
		return Err(Error::SelfConnection.into());
	}

	let connection = sqlx::query_as::<_, model::Connection>(
		r"
			INSERT INTO connection (user_id, connected_user_id)
			VALUES ($1, $2)
			RETURNING *
		",
	)
	.bind(session.user.id)
	.bind(user_id)
	.fetch_one(&database)
	.await
	.map_err(|e| match e {
		sqlx::Error::Database(ref d) if d.constraint() == Some("connection_pair_key") => {
			Error::AlreadyConnected.into()
		}
		sqlx::Error::Database(ref d)
			if d.constraint() == Some("connection_connected_user_id_fkey") =>
		{
			Error::UnknownAccount(user_id).into()
		}
		e => RouteError::from(e),
	})?;

	Ok(Json(connection))
}
