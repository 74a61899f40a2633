pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod repository;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::{MemoryCredentialStore, MemoryUserStore};
pub use models::{AuthUser, AuthUserView, NewAuthUser, NewUser, SearchParams, UserRecord};
pub use postgres::{PgCredentialStore, PgUserStore};
pub use repository::{CredentialStore, UserStore};
