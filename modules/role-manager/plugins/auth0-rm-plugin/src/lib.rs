//! Auth0 Role Manager Plugin
//!
//! Implements [`role_manager_sdk::RoleManager`] on top of the Auth0
//! Authorization Extension. Users and groups are resolved by name (email for
//! users, group name for groups) through an identity snapshot taken at
//! initialization; membership questions are answered by the extension API.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod domain;
pub mod infra;
pub mod module;

pub use config::Auth0RoleManagerConfig;
pub use domain::{DomainError, IdentityMap, Service};
pub use module::Auth0RoleManagerPlugin;
