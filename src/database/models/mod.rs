pub mod auth_user;
pub mod user;

pub use auth_user::{AuthUser, AuthUserView, NewAuthUser};
pub use user::{NewUser, SearchParams, UserRecord};
