use std::{sync::Arc, time::Duration};

use axum::{
	body::Body,
	response::{IntoResponse, Response},
};
use governor::middleware::StateInformationMiddleware;
use tower_governor::{
	governor::{GovernorConfig, GovernorConfigBuilder},
	key_extractor::PeerIpKeyExtractor,
	GovernorError,
};

use crate::error::AppError;

pub type Limiter = Arc<GovernorConfig<PeerIpKeyExtractor, StateInformationMiddleware>>;

/// Per-IP rate limit tiers. `default` covers the whole API, `secure`
/// additionally throttles the credential endpoints.
pub struct Limits {
	pub default: Limiter,
	pub secure: Limiter,
}

impl Limits {
	pub fn new() -> Self {
		Self {
			default: Arc::new(
				GovernorConfigBuilder::default()
					.per_second(10)
					.burst_size(50)
					.use_headers()
					.error_handler(error_handler)
					.finish()
					.unwrap(),
			),
			secure: Arc::new(
				GovernorConfigBuilder::default()
					.per_second(1)
					.burst_size(5)
					.use_headers()
					.error_handler(error_handler)
					.finish()
					.unwrap(),
			),
		}
	}

	/// Spawns a thread that periodically drops inactive keys from the
	/// limiter storage, which otherwise grows with every peer seen.
	pub fn spawn_cleanup(&self) {
		let limiters = [
			self.default.limiter().clone(),
			self.secure.limiter().clone(),
		];
		let interval = Duration::from_secs(60);

		std::thread::spawn(move || loop {
			std::thread::sleep(interval);

			for limiter in &limiters {
				tracing::debug!("rate limiting storage size: {}", limiter.len());

				limiter.retain_recent();
			}
		});
	}
}

fn error_handler(error: GovernorError) -> Response<Body> {
	AppError::RateLimit(error).into_response()
}
