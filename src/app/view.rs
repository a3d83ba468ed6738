use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The five mutually exclusive screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Upload,
    Dashboard,
    Reviews,
    Actions,
    History,
}

impl View {
    pub const ALL: [View; 5] = [
        View::Upload,
        View::Dashboard,
        View::Reviews,
        View::Actions,
        View::History,
    ];

    /// Views that render a slice of the current analysis
    pub fn requires_analysis(&self) -> bool {
        matches!(self, View::Dashboard | View::Reviews | View::Actions)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            View::Upload => "upload",
            View::Dashboard => "dashboard",
            View::Reviews => "reviews",
            View::Actions => "actions",
            View::History => "history",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for View {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        View::ALL
            .iter()
            .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| format!("unknown view '{}'", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guarded_views() {
        assert!(!View::Upload.requires_analysis());
        assert!(!View::History.requires_analysis());
        assert!(View::Dashboard.requires_analysis());
        assert!(View::Reviews.requires_analysis());
        assert!(View::Actions.requires_analysis());
    }

    #[test]
    fn test_parse() {
        assert_eq!("Dashboard".parse::<View>().unwrap(), View::Dashboard);
        assert!("settings".parse::<View>().is_err());
    }
}
