use aide::axum::IntoApiResponse;
use argon2::Argon2;
use axum::{
	extract::State,
	http::{header, StatusCode},
	response::IntoResponse,
};
use macros::route;
use uuid::Uuid;

use crate::{
	extract::{Json, Session},
	openapi::tag,
	session, AppState, Database,
};

use super::{model, Error, RouteError};

pub const KEY_LENGTH: usize = 32;

/// Hashes a password with Argon2, using the account's id as a salt.
/// Since this is only used for logging in and registering, the scope of
/// this function can remain in here with no issues.
fn hash_password(
	hasher: &Argon2,
	password: &str,
	id: &Uuid,
) -> Result<[u8; KEY_LENGTH], argon2::Error> {
	let mut hash = [0; KEY_LENGTH];

	hasher.hash_password_into(password.as_bytes(), id.as_bytes(), &mut hash)?;
	Ok(hash)
}

/// Log in
/// Logs in to an account, returning an associated session cookie.
#[route(tag = tag::AUTH, response(status = 200, description = "Logged in successfully.", shape = "Json<model::Session>"))]
pub async fn login(
	State(state): State<AppState>,
	Json(auth): Json<model::LoginInput>,
) -> Result<impl IntoApiResponse, RouteError> {
	let user = sqlx::query_as::<_, model::Account>("SELECT * FROM account WHERE email = $1")
		.bind(&auth.email)
		.fetch_optional(&state.database)
		.await?;

	let Some(user) = user else {
		return Err(Error::InvalidEmailOrPassword.into());
	};

	let hashed = hash_password(&state.hasher, &auth.password, &user.id).map_err(Error::Argon)?;

	if user.password != hashed {
		return Err(Error::InvalidEmailOrPassword.into());
	}

	let session =
		sqlx::query_as::<_, model::Session>("INSERT INTO session (user_id) VALUES ($1) RETURNING *")
			.bind(user.id)
			.fetch_one(&state.database)
			.await?;

	let cookie = session::create_cookie(session.id);

	Ok(([(header::SET_COOKIE, cookie.to_string())], Json(session)))
}

/// Log out
/// Logs out of the authenticated account, clearing the session cookie.
#[route(tag = tag::AUTH, response(status = 204, description = "Logged out successfully."))]
pub async fn logout(
	State(database): State<Database>,
	session: Session,
) -> Result<impl IntoApiResponse, RouteError> {
	sqlx::query("DELETE FROM session WHERE id = $1")
		.bind(session.id)
		.execute(&database)
		.await?;

	// Clear the session cookie
	Ok((
		[(header::SET_COOKIE, session::clear_cookie().to_string())],
		StatusCode::NO_CONTENT,
	)
		.into_response())
}

/// Register account
/// Registers a new account, returning an associated session cookie.
#[route(tag = tag::AUTH, response(status = 200, description = "Registered successfully.", shape = "Json<model::Session>"))]
pub async fn register(
	State(state): State<AppState>,
	Json(auth): Json<model::RegisterInput>,
) -> Result<impl IntoApiResponse, RouteError> {
	let user_id = Uuid::new_v4();
	let hashed = hash_password(&state.hasher, &auth.password, &user_id).map_err(Error::Argon)?;

	let mut tx = state.database.begin().await?;

	sqlx::query(
		r"
			INSERT INTO account (id, email, password, full_name, user_type)
			VALUES ($1, $2, $3, $4, $5)
		",
	)
	.bind(user_id)
	.bind(&auth.email)
	.bind(&hashed[..])
	.bind(&auth.full_name)
	.bind(auth.user_type)
	.execute(&mut *tx)
	.await
	.map_err(|e| match e {
		sqlx::Error::Database(ref d) if d.constraint() == Some("account_email_key") => {
			Error::EmailTaken.into()
		}
		e => RouteError::from(e),
	})?;

	let session =
		sqlx::query_as::<_, model::Session>("INSERT INTO session (user_id) VALUES ($1) RETURNING *")
			.bind(user_id)
			.fetch_one(&mut *tx)
			.await?;

	tx.commit().await?;

	let cookie = session::create_cookie(session.id);

	Ok(([(header::SET_COOKIE, cookie.to_string())], Json(session)))
}

/// Get account
/// Returns the authenticated account.
#[route(tag = tag::AUTH)]
pub async fn get_me(session: Session) -> Json<model::Account> {
	Json(session.user)
}

/// Update account
/// Updates the authenticated account. Fields left out keep their current value.
#[route(tag = tag::AUTH)]
pub async fn update_me(
	State(database): State<Database>,
	session: Session,
	Json(input): Json<model::UpdateAccountInput>,
) -> Result<Json<model::Account>, RouteError> {
	let account = sqlx::query_as::<_, model::Account>(
		r"
			UPDATE account
			SET
				email = COALESCE($1, email),
				full_name = COALESCE($2, full_name),
				avatar_url = COALESCE($3, avatar_url),
				location = COALESCE($4, location),
				website = COALESCE($5, website),
				twitter_url = COALESCE($6, twitter_url)
			WHERE id = $7
			RETURNING *
		",
	)
	.bind(&input.email)
	.bind(&input.full_name)
	.bind(&input.avatar_url)
	.bind(&input.location)
	.bind(&input.website)
	.bind(&input.twitter_url)
	.bind(session.user.id)
	.fetch_one(&database)
	.await
	.map_err(|e| match e {
		sqlx::Error::Database(ref d) if d.constraint() == Some("account_email_key") => {
			Error::EmailTaken.into()
		}
		e => RouteError::from(e),
	})?;

	Ok(Json(account))
}
