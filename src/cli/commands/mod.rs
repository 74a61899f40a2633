pub mod hash_password;
pub mod serve;
