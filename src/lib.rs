pub mod auth;
pub mod config;
pub mod domain;
pub mod registry;
pub mod response;
pub mod routes;
pub mod startup;
pub mod store;
pub mod sync;
pub mod telemetry;
