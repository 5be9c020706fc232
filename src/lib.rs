pub mod config;
pub mod emitter;
pub mod error;
pub mod gateway;
pub mod input;
pub mod routes;
pub mod state;
pub mod toggles;
