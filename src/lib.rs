pub mod db;
pub mod error;
pub mod group;
pub mod response;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::{AppState, Config};
