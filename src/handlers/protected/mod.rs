// handlers/protected/mod.rs - Protected handlers (bearer token required)
//
// Every route here runs behind jwt_auth_middleware, which injects
// AuthenticatedUser into the request extensions.
pub mod search;
pub mod users;

pub use search::search_get;
pub use users::{user_delete, user_get, user_insert, user_update, users_list};
