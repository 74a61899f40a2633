// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Token acquisition, account registration and the liveness probe.
pub mod health;
pub mod register;
pub mod token;

pub use health::health_get;
pub use register::register_post;
pub use token::token_post;
