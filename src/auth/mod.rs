pub mod middleware;
pub mod password;
pub mod principal;
pub mod rate_limit;
pub mod validate;
