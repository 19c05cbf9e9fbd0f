use schemars::JsonSchema;
use serde::Serialize;
use uuid::Uuid;

use crate::model::ConnectionStatus;

/// A connection between two accounts. `user_id` is whichever side sent
/// the request; lookups treat the pair as unordered.
#[derive(Debug, Serialize, JsonSchema, sqlx::FromRow)]
pub struct Connection {
	/// The unique identifier of the connection.
	pub id: Uuid,
	pub user_id: Uuid,
	pub connected_user_id: Uuid,
	pub status: ConnectionStatus,
	pub created_at: chrono::DateTime<chrono::Utc>,
}

/// The viewer's standing towards another account. `status` is null when
/// no connection exists in either direction.
#[derive(Debug, Serialize, JsonSchema)]
pub struct ConnectionState {
	pub status: Option<ConnectionStatus>,
}
