//! Page state definitions for tracking crawl progress
//!
//! Every internal page moves through the same three states exactly once.
use std::fmt;

/// Represents the current state of an internal page in the crawl process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageState {
    /// Page has been discovered and sits in the frontier, unfetched
    Pending,

    /// Page is currently being fetched
    Fetching,

    /// Page was fetched (successfully or not); it is never fetched again
    Visited,
}

impl PageState {
    /// Returns true if this is a terminal state (no further processing needed)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Visited)
    }

    /// Returns true if moving from `self` to `next` is allowed
    ///
    /// The only legal moves are Pending -> Fetching -> Visited.
    pub fn can_transition_to(&self, next: PageState) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Fetching) | (Self::Fetching, Self::Visited)
        )
    }

    /// Short lowercase name of the state
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Fetching => "fetching",
            Self::Visited => "visited",
        }
    }
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_terminal() {
        assert!(!PageState::Pending.is_terminal());
        assert!(!PageState::Fetching.is_terminal());
        assert!(PageState::Visited.is_terminal());
    }

    #[test]
    fn test_legal_transitions() {
        assert!(PageState::Pending.can_transition_to(PageState::Fetching));
        assert!(PageState::Fetching.can_transition_to(PageState::Visited));
    }

    #[test]
    fn test_illegal_transitions() {
        let states = [PageState::Pending, PageState::Fetching, PageState::Visited];
        for from in states {
            for to in states {
                let legal = matches!(
                    (from, to),
                    (PageState::Pending, PageState::Fetching)
                        | (PageState::Fetching, PageState::Visited)
                );
                assert_eq!(
                    from.can_transition_to(to),
                    legal,
                    "unexpected result for {:?} -> {:?}",
                    from,
                    to
                );
            }
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", PageState::Pending), "pending");
        assert_eq!(format!("{}", PageState::Fetching), "fetching");
        assert_eq!(format!("{}", PageState::Visited), "visited");
    }
}
