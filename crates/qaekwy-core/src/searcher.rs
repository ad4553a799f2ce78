//! Search strategy selection

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// The search procedure the engine runs over the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SearcherType {
    /// Depth-first search.
    #[default]
    Dfs,
    /// Branch-and-bound; required for optimization objectives.
    Bab,
    /// Limited discrepancy search.
    Lds,
    /// Portfolio-based search.
    Pbs,
    /// Restart-based search; honors the model's cutoff.
    Rbs,
}

impl SearcherType {
    pub const ALL: [SearcherType; 5] = [
        SearcherType::Dfs,
        SearcherType::Bab,
        SearcherType::Lds,
        SearcherType::Pbs,
        SearcherType::Rbs,
    ];

    /// Wire name (`"DFS"`, `"BAB"`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            SearcherType::Dfs => "DFS",
            SearcherType::Bab => "BAB",
            SearcherType::Lds => "LDS",
            SearcherType::Pbs => "PBS",
            SearcherType::Rbs => "RBS",
        }
    }
}

impl fmt::Display for SearcherType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearcherType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        SearcherType::ALL
            .into_iter()
            .find(|searcher| searcher.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                ModelError::config(format!(
                    "unknown searcher '{s}', expected one of DFS, BAB, LDS, PBS, RBS"
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_any_case() {
        assert_eq!("dfs".parse::<SearcherType>().unwrap(), SearcherType::Dfs);
        assert_eq!("Bab".parse::<SearcherType>().unwrap(), SearcherType::Bab);
        assert_eq!("RBS".parse::<SearcherType>().unwrap(), SearcherType::Rbs);
    }

    #[test]
    fn test_parse_unknown_is_configuration_error() {
        let err = "bfs".parse::<SearcherType>().unwrap_err();
        assert_eq!(err.code(), "MODEL_CONFIGURATION");
        assert!(err.to_string().contains("DFS, BAB"));
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&SearcherType::Lds).unwrap();
        assert_eq!(json, "\"LDS\"");
        let back: SearcherType = serde_json::from_str("\"PBS\"").unwrap();
        assert_eq!(back, SearcherType::Pbs);
    }

    #[test]
    fn test_display_matches_wire_name() {
        for searcher in SearcherType::ALL {
            assert_eq!(searcher.to_string(), searcher.as_str());
        }
    }
}
