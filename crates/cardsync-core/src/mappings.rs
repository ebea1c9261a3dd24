//! Operator-maintained `group_id -> catalog set` mapping file.
//!
//! Generated by `map-groups`, then edited by hand for groups whose names
//! could not be mapped automatically.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Mapping entry for one marketplace group, keyed by group id in
/// [`GroupMappings`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupMapping {
    /// Marketplace group name, e.g. `"SV10: Destined Rivals"`.
    #[serde(default)]
    pub name: String,
    /// Set id found automatically from the group name, if any.
    #[serde(default)]
    pub auto_mapped_to: Option<String>,
    /// Operator override; an empty string means "not set".
    #[serde(default)]
    pub manual_set_id: String,
    #[serde(default)]
    pub skip: bool,
}

impl GroupMapping {
    /// The catalog set this group maps to: `None` when skipped, otherwise the
    /// manual override if populated, else the automatic mapping.
    #[must_use]
    pub fn resolved_set_id(&self) -> Option<&str> {
        if self.skip {
            return None;
        }
        let manual = self.manual_set_id.trim();
        if !manual.is_empty() {
            return Some(manual);
        }
        self.auto_mapped_to
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Group id (as a decimal string, matching the JSON object keys) to mapping.
pub type GroupMappings = BTreeMap<String, GroupMapping>;

/// Load the mapping file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read or is not valid JSON.
pub fn load_group_mappings(path: &Path) -> Result<GroupMappings, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    serde_json::from_str(&content).map_err(|e| ConfigError::JsonParse {
        path: path.display().to_string(),
        source: e,
    })
}

/// Write the mapping file as pretty-printed JSON.
///
/// # Errors
///
/// Returns `ConfigError::FileIo` if the file cannot be written.
pub fn save_group_mappings(path: &Path, mappings: &GroupMappings) -> Result<(), ConfigError> {
    let json = serde_json::to_string_pretty(mappings).map_err(|e| ConfigError::JsonParse {
        path: path.display().to_string(),
        source: e,
    })?;
    std::fs::write(path, json).map_err(|e| ConfigError::FileIo {
        path: path.display().to_string(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(auto: Option<&str>, manual: &str, skip: bool) -> GroupMapping {
        GroupMapping {
            name: "SV10: Destined Rivals".to_string(),
            auto_mapped_to: auto.map(str::to_string),
            manual_set_id: manual.to_string(),
            skip,
        }
    }

    #[test]
    fn manual_set_id_wins_over_auto_mapping() {
        assert_eq!(
            mapping(Some("sv10"), "sv10.5", false).resolved_set_id(),
            Some("sv10.5")
        );
    }

    #[test]
    fn auto_mapping_used_when_manual_empty() {
        assert_eq!(
            mapping(Some("sv10"), "", false).resolved_set_id(),
            Some("sv10")
        );
    }

    #[test]
    fn whitespace_manual_value_counts_as_empty() {
        assert_eq!(
            mapping(Some("sv10"), "   ", false).resolved_set_id(),
            Some("sv10")
        );
    }

    #[test]
    fn skip_overrides_everything() {
        assert_eq!(mapping(Some("sv10"), "sv10.5", true).resolved_set_id(), None);
    }

    #[test]
    fn unmapped_group_resolves_to_none() {
        assert_eq!(mapping(None, "", false).resolved_set_id(), None);
    }

    #[test]
    fn save_then_load_preserves_entries() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("manual_mappings.json");

        let mut mappings = GroupMappings::new();
        mappings.insert("24269".to_string(), mapping(Some("sv10"), "", false));
        mappings.insert("3170".to_string(), mapping(None, "swshp", false));

        save_group_mappings(&path, &mappings).expect("save mappings");
        let loaded = load_group_mappings(&path).expect("load mappings");
        assert_eq!(loaded, mappings);
        assert_eq!(loaded["3170"].resolved_set_id(), Some("swshp"));
    }

    #[test]
    fn load_tolerates_missing_optional_fields() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("manual_mappings.json");
        std::fs::write(&path, r#"{"1": {"manual_set_id": "base1"}}"#).expect("write");

        let loaded = load_group_mappings(&path).expect("load mappings");
        assert_eq!(loaded["1"].resolved_set_id(), Some("base1"));
        assert!(!loaded["1"].skip);
    }

    #[test]
    fn load_rejects_malformed_json() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("manual_mappings.json");
        std::fs::write(&path, "{not json").expect("write");
        assert!(matches!(
            load_group_mappings(&path),
            Err(ConfigError::JsonParse { .. })
        ));
    }
}
