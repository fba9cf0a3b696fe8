//! Library exports for authdemo, shared between the binary and tests.

pub mod app;
pub mod backend;
pub mod config;
pub mod dashboard;
pub mod models;
pub mod navigation;
pub mod render;
pub mod router;
pub mod session;
pub mod startup;
pub mod state;
pub mod utils;
