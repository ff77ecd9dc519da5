pub mod ai;
pub mod export;
pub mod generate;
pub mod handlers;
pub mod query;
pub mod routes;

pub use routes::create_router;
