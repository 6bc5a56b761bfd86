//! Service descriptors
//!
//! A service is any directory directly under the repository root that
//! carries a descriptor file. This module loads descriptors and turns them
//! into the entries of a build matrix.

pub mod descriptor;
pub mod discover;

pub use descriptor::{load_descriptor, ServiceFile};
pub use discover::{discover_services, Service};
