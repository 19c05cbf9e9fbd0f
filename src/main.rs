#![warn(clippy::pedantic)]

mod error;
mod extract;
mod model;
mod openapi;
mod ratelimit;
mod route;
mod session;
mod trace;

use std::sync::Arc;

use aide::{axum::ApiRouter, openapi::OpenApi};
use argon2::Argon2;
use axum::Extension;
use tower::ServiceBuilder;
use tower_governor::GovernorLayer;
use tower_http::{
	compression::CompressionLayer,
	cors::CorsLayer,
	request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
	trace::TraceLayer,
};

pub type Database = sqlx::Pool<sqlx::Postgres>;
pub type AppState = State;

/// The shared application state.
///
/// This should contain all shared dependencies that handlers need to access,
/// such as the database pool and the hash configuration (expensive to create
/// per request).
#[derive(Clone, axum::extract::FromRef)]
pub struct State {
	pub database: Database,
	pub hasher: Argon2<'static>,
	pub config: Config,
}

#[derive(Clone)]
pub struct Config {
	/// Origin used to build share links, e.g. `https://rencontre.dev`.
	pub public_origin: Arc<str>,
}

impl Config {
	fn from_env() -> Self {
		Self {
			public_origin: std::env::var("PUBLIC_ORIGIN")
				.unwrap_or_else(|_| "http://localhost:3000".into())
				.into(),
		}
	}
}

/// Assembles the full application router. Rate limiting is optional so the
/// test harness can drive the router without peer addresses.
fn router(state: State, limits: Option<&ratelimit::Limits>) -> axum::Router {
	let mut api = OpenApi::default();

	let auth = route::auth::routes();
	let auth = match limits {
		Some(limits) => auth.layer(GovernorLayer {
			config: limits.secure.clone(),
		}),
		None => auth,
	};

	let app = ApiRouter::new()
		.nest("/docs", route::docs::routes())
		.nest("/auth", auth)
		.nest("/profiles", route::profile::routes())
		.nest("/jobs", route::job::routes())
		.nest("/applications", route::application::routes())
		.nest("/community", route::community::routes())
		.nest("/connections", route::connection::routes())
		.finish_api_with(&mut api, openapi::docs)
		.layer(
			ServiceBuilder::new()
				.layer(Extension(Arc::new(api)))
				.layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
				.layer(PropagateRequestIdLayer::x_request_id())
				.layer(TraceLayer::new_for_http())
				.layer(CorsLayer::permissive())
				.layer(CompressionLayer::new()),
		)
		.with_state(state);

	match limits {
		Some(limits) => app.layer(GovernorLayer {
			config: limits.default.clone(),
		}),
		None => app,
	}
}

#[tokio::main]
async fn main() {
	dotenvy::dotenv().ok();

	let _guard = trace::init_tracing_subscriber();

	let database = Database::connect(
		&std::env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
	)
	.await
	.expect("failed to connect to database");

	sqlx::migrate!()
		.run(&database)
		.await
		.expect("failed to run migrations");

	let state = State {
		database,
		hasher: Argon2::default(),
		config: Config::from_env(),
	};

	let limits = ratelimit::Limits::new();
	limits.spawn_cleanup();

	let app = router(state, Some(&limits));

	let port = std::env::var("PORT").map_or_else(
		|_| 3000,
		|port| port.parse().expect("PORT must be a number"),
	);

	let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
		.await
		.expect("failed to bind to port");

	tracing::info!("listening on port {}", port);

	axum::serve(
		listener,
		app.into_make_service_with_connect_info::<std::net::SocketAddr>(),
	)
	.await
	.unwrap();
}
