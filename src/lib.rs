//! Portfolio site: public landing page with a contact form, an admin panel,
//! and a same-origin proxy to the backend API that stores everything.

pub mod config;
pub mod contact;
pub mod content;
pub mod error;
pub mod flash;
pub mod middleware;
pub mod models;
pub mod phone;
pub mod routes;
pub mod session;
pub mod state;
pub mod templates;
pub mod upstream;

pub use config::Config;
pub use routes::router;
pub use state::AppState;
