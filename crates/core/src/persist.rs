//! Writing transcripts to disk.
//!
//! Saved conversations are write-once artifacts, nothing in this crate
//! reads them back.

use std::fmt::Display;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};

use crate::transcript::Turn;

/// Returns the file name a conversation saved at `now` is written to.
pub fn conversation_file_name<Tz>(now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!("conversation_{}.json", now.format("%Y%m%d_%H%M%S"))
}

/// Writes `turns` as a JSON array into `dir`, named after `now`.
///
/// Returns `Ok(None)` without touching the disk if there is nothing to
/// save. A file saved within the same second is replaced.
pub fn save_conversation<Tz>(
    turns: &[Turn],
    dir: &Path,
    now: DateTime<Tz>,
) -> io::Result<Option<PathBuf>>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if turns.is_empty() {
        debug!("nothing to save");
        return Ok(None);
    }

    let path = dir.join(conversation_file_name(&now));
    let content = serde_json::to_string_pretty(turns)?;
    fs::write(&path, content)?;
    info!("saved {} turns to {}", turns.len(), path.display());

    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};
    use serde_json::Value;

    use super::*;
    use crate::transcript::Role;

    fn fixed_time() -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(7, 5, 42)
            .unwrap()
            .and_utc()
    }

    #[test]
    fn test_file_name() {
        assert_eq!(
            conversation_file_name(&fixed_time()),
            "conversation_20240309_070542.json"
        );
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let turns = vec![
            Turn::new(Role::User, "hi"),
            Turn::new(Role::Assistant, "Hello there!"),
            Turn::new(Role::User, "quote \" and\nnewline"),
        ];

        let path = save_conversation(&turns, dir.path(), fixed_time())
            .unwrap()
            .unwrap();
        assert_eq!(path, dir.path().join("conversation_20240309_070542.json"));

        let content = fs::read_to_string(&path).unwrap();
        let loaded: Vec<Turn> = serde_json::from_str(&content).unwrap();
        assert_eq!(loaded, turns);

        let raw: Value = serde_json::from_str(&content).unwrap();
        assert_eq!(raw[0]["role"], "user");
        assert_eq!(raw[1]["role"], "assistant");
        assert_eq!(raw[1]["content"], "Hello there!");
    }

    #[test]
    fn test_two_space_indent() {
        let dir = tempfile::tempdir().unwrap();
        let turns = vec![Turn::new(Role::User, "hi")];

        let path = save_conversation(&turns, dir.path(), fixed_time())
            .unwrap()
            .unwrap();
        let content = fs::read_to_string(path).unwrap();
        assert_eq!(
            content,
            "[\n  {\n    \"role\": \"user\",\n    \"content\": \"hi\"\n  }\n]"
        );
    }

    #[test]
    fn test_empty_transcript_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let saved = save_conversation(&[], dir.path(), fixed_time()).unwrap();
        assert_eq!(saved, None);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let turns = vec![Turn::new(Role::User, "hi")];
        let missing = dir.path().join("does-not-exist");
        assert!(save_conversation(&turns, &missing, fixed_time()).is_err());
    }
}
