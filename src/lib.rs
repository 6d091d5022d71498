pub mod alerts;
pub mod api;
pub mod check;
pub mod config;
pub mod errors;
pub mod feed;
pub mod models;
pub mod observability;
pub mod pipeline;
pub mod state;
pub mod tasks;
