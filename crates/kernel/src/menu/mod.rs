//! Console route and navigation management.
//!
//! Routes are collected from plugin definitions and provide:
//! - Path matching for console views
//! - Navigation entries grouped for the console sidebar
//! - Permission requirements per route

mod registry;

pub use registry::{MenuItem, RegisteredRoute, RegistryError, RouteMatch, RouteRegistry};
