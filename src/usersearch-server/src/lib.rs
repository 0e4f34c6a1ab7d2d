//! usersearch reference server
//!
//! Serves the user search contract over HTTP from an injected, read-only
//! [`dataset::UserSource`]. Used as a test double for clients and runnable
//! as a standalone binary.
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use usersearch_server::{api::AppState, dataset::Dataset, scenario::ScenarioTable};
//!
//! #[actix_web::main]
//! async fn main() -> anyhow::Result<()> {
//!     let dataset = Dataset::load("./data/users.json")?;
//!     let state = AppState::new(Arc::new(dataset), "Test")
//!         .with_scenarios(ScenarioTable::standard());
//!     let listener = std::net::TcpListener::bind("127.0.0.1:8080")?;
//!     usersearch_server::serve(listener, state)?.await?;
//!     Ok(())
//! }
//! ```

pub use usersearch_core;

pub mod api;
pub mod dataset;
pub mod scenario;
pub mod search;

use actix_web::{dev::Server, middleware::Logger, web, App, HttpServer};
use std::net::TcpListener;

/// Start serving on an already-bound listener.
///
/// The returned [`Server`] must be awaited or spawned to make progress.
pub fn serve(listener: TcpListener, state: api::AppState) -> std::io::Result<Server> {
    let state = web::Data::new(state);
    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .configure(api::configure)
    })
    .listen(listener)?
    .run();

    Ok(server)
}
