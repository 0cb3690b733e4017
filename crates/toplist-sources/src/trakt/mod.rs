pub mod api;
pub mod auth;
pub mod client;
#[cfg(test)]
pub(crate) mod testing;

pub use client::TraktClient;
