//! Runtime settings. There are no flags or environment variables; the front
//! end starts from `Settings::default()` and overrides fields as the user edits
//! them.

use std::path::PathBuf;

/// Database opened at startup.
pub const DEFAULT_DB_PATH: &str = "db.db";
/// Suggested target for "save as".
pub const DEFAULT_SAVE_PATH: &str = "db_saved.db";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Durable store loaded into the working copy on startup.
    pub db_path: PathBuf,
    pub save_path: PathBuf,
    /// Fixed seed for the season generator. `None` seeds from the clock.
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            save_path: PathBuf::from(DEFAULT_SAVE_PATH),
            seed: None,
        }
    }
}

impl Settings {
    /// Pin the season generator so runs can be replayed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_reference_files() {
        let settings = Settings::default();
        assert_eq!(settings.db_path, PathBuf::from("db.db"));
        assert_eq!(settings.save_path, PathBuf::from("db_saved.db"));
        assert_eq!(settings.seed, None);
        assert_eq!(settings.with_seed(7).seed, Some(7));
    }
}
