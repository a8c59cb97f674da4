//! Role Manager SDK
//!
//! This crate provides the contract a role resolution backend must implement
//! to be plugged into a policy enforcement point:
//!
//! - [`RoleManager`] - Role resolution trait invoked by the enforcer
//! - [`RoleManagerError`] - Error types
//! - [`ensure_no_domain`] - Guard for backends without multi-tenancy support
//!
//! ## Usage
//!
//! ```ignore
//! use role_manager_sdk::RoleManager;
//!
//! let rm: Arc<dyn RoleManager> = plugin.init(cfg).await?;
//!
//! if rm.has_link("alice@example.com", "admins", None).await? {
//!     // grant
//! }
//! ```
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod api;
pub mod error;
pub mod models;

// Re-export main types at crate root
pub use api::RoleManager;
pub use error::RoleManagerError;
pub use models::ensure_no_domain;
