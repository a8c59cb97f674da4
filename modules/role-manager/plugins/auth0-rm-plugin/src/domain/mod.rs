//! Domain layer for the Auth0 role manager plugin.

pub mod client;
pub mod error;
pub mod identity_map;
pub mod ports;
pub mod service;

#[cfg(test)]
mod test_support;

pub use error::DomainError;
pub use identity_map::IdentityMap;
pub use ports::{Auth0Directory, DirectoryGroup, DirectoryUser};
pub use service::Service;
