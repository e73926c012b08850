//! JSON snapshot of the user roster and friendship rows

use anyhow::{anyhow, Context, Result};
use crate::model::{FriendshipRow, User};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Everything the store holds, in its physical two-row form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub users: Vec<User>,

    #[serde(default)]
    pub friendships: Vec<FriendshipRow>,
}

/// Read a snapshot file
pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    log::info!("Reading snapshot: {}", path.display());

    if !path.exists() {
        return Err(anyhow!("File not found: {}", path.display()));
    }

    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let snapshot: Snapshot = serde_json::from_str(&raw)
        .with_context(|| format!("parsing {}", path.display()))?;

    log::info!(
        "Loaded {} users and {} friendship rows",
        snapshot.users.len(),
        snapshot.friendships.len()
    );

    Ok(snapshot)
}

/// Write a snapshot file, creating parent directories as needed
pub fn save_snapshot(snapshot: &Snapshot, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut file = File::create(path)?;
    file.write_all(serde_json::to_string_pretty(snapshot)?.as_bytes())?;

    log::info!("Snapshot saved to {}", path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Edge;

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("snapshot.json");
        let snapshot = Snapshot {
            users: vec![User {
                id: "1".into(),
                name: "Ada".into(),
                email: "ada@example.com".into(),
                bio: Some("math".into()),
            }],
            friendships: Edge::new("1", "2").rows().to_vec(),
        };

        save_snapshot(&snapshot, &path).unwrap();
        assert_eq!(load_snapshot(&path).unwrap(), snapshot);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_snapshot(&dir.path().join("absent.json")).unwrap_err();
        assert!(err.to_string().contains("File not found"));
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users_only.json");
        fs::write(
            &path,
            r#"{"users":[{"id":"1","name":"Ada","email":"ada@example.com"}]}"#,
        )
        .unwrap();

        let snapshot = load_snapshot(&path).unwrap();
        assert_eq!(snapshot.users.len(), 1);
        assert_eq!(snapshot.users[0].bio, None);
        assert!(snapshot.friendships.is_empty());
    }
}
