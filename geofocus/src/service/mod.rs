//! Integration boundary between data acquisition and country lookup.
//!
//! [`CountryService`] is what the HTTP server and the CLI hold. It applies
//! the [`StalePolicy`] on top of the provider and keeps the dataset
//! indexed for resolution.

mod country;
mod policy;

pub use country::{CountryService, Located};
pub use policy::StalePolicy;
