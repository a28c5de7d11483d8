use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Authenticated user identity passed across crates.
///
/// Produced by `deck-auth` when a session token resolves, consumed by the
/// repository layer to scope every query to one owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AuthIdentity {
    /// Owning user id (`usr-` prefix).
    pub user_id: String,
    pub email: String,
}
