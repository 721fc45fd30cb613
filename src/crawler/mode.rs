//! Classification modes

use crate::report::ExternalLinkRecord;
use crate::state::LinkStatus;
use std::fmt;
use std::str::FromStr;

/// Which external links a crawl reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Mode {
    /// Every external link on every internal page
    Inventory,
    /// External links that are unreachable or answer neither 200 nor 301
    Broken,
    /// External links answering 301, with their resolved destination
    Redirected,
}

impl Mode {
    /// All modes, in menu order
    pub const ALL: [Mode; 3] = [Mode::Inventory, Mode::Broken, Mode::Redirected];

    /// Maps a menu number (1, 2, 3) to a mode
    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Self::Inventory),
            2 => Some(Self::Broken),
            3 => Some(Self::Redirected),
            _ => None,
        }
    }

    /// Menu number of this mode
    pub fn number(&self) -> u8 {
        match self {
            Self::Inventory => 1,
            Self::Broken => 2,
            Self::Redirected => 3,
        }
    }

    /// Returns true if external links must be checked over the network
    pub fn needs_check(&self) -> bool {
        !matches!(self, Self::Inventory)
    }

    /// Applies this mode's policy to one (page, link) pair
    ///
    /// `status` is the checked status of `link`, if it was checked. Modes that
    /// need a status never select an unchecked link.
    pub fn select(
        &self,
        page: &str,
        link: &str,
        status: Option<&LinkStatus>,
    ) -> Option<ExternalLinkRecord> {
        match self {
            Self::Inventory => Some(ExternalLinkRecord::new(page, link)),
            Self::Broken => status
                .filter(|s| s.is_broken())
                .map(|_| ExternalLinkRecord::new(page, link)),
            Self::Redirected => status.filter(|s| s.is_redirected()).map(|s| {
                ExternalLinkRecord::redirected(page, link, s.redirect_to.clone().unwrap_or_default())
            }),
        }
    }

    /// Column headers of the exported table
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Self::Inventory | Self::Broken => &["#", "Page", "Link"],
            Self::Redirected => &["#", "Page", "Link", "Redirect destination"],
        }
    }

    /// Directory name used for this mode's exports
    pub fn folder_name(&self) -> &'static str {
        match self {
            Self::Inventory => "external_links",
            Self::Broken => "broken_links",
            Self::Redirected => "redirected_links",
        }
    }

    /// One-line description for menus
    pub fn description(&self) -> &'static str {
        match self {
            Self::Inventory => "All external links on all internal pages",
            Self::Broken => "Broken links (unreachable, or neither 200 nor 301)",
            Self::Redirected => "Redirected links (answering 301)",
        }
    }

    /// Lowercase name of the mode
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inventory => "inventory",
            Self::Broken => "broken",
            Self::Redirected => "redirected",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    /// Accepts a menu number or a mode name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(number) = s.parse::<u8>() {
            return Self::from_number(number).ok_or_else(|| format!("unknown mode number {}", number));
        }

        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown mode '{}'", s))
    }
}
