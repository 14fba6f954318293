pub mod routes;

pub use routes::{utils, v1};
