//! URL handling module for Linksieve
//!
//! This module provides URL validation and normalization, page identity
//! computation, host extraction, and internal/external host matching.

mod domain;
mod matcher;
mod normalize;

// Re-export main functions
pub use domain::authority;
pub use matcher::{HostMatch, SiteScope};
pub use normalize::{canonical_seed, is_valid, normalize, page_identity, parse_seed};
