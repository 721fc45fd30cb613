//! State management module
//!
//! This module contains the state types used during a crawl:
//! - PageState: Lifecycle of an internal page in the frontier
//! - LinkStatus: Outcome of checking an external link

mod link_status;
mod page_state;

pub use link_status::{LinkStatus, MOVED_PERMANENTLY, OK};
pub use page_state::PageState;
