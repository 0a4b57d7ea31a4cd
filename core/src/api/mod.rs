pub mod backend;
pub mod client;

pub use backend::{endpoints, Backend};
pub use client::HttpBackend;
