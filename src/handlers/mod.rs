// handlers/mod.rs - two security tiers
//
// public:    no authentication (/token, /users/auth, /health)
// protected: bearer token required, gated by middleware::jwt_auth_middleware
pub mod protected;
pub mod public;
