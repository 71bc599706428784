//! axum integration: client registration, façade functions and the proxy server

pub mod api;
pub mod extension;
pub mod facade;
