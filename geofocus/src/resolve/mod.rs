//! Country resolution from free-text queries.
//!
//! Queries and candidate fields go through the same [`normalize`] function,
//! then [`CountryResolver`] picks one feature by exact name, substring, or
//! ISO code.

mod normalize;
mod resolver;

pub use normalize::normalize;
pub use resolver::{CountryResolver, MatchKind};
