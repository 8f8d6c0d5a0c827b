//! Data directory resolution.

use std::path::{Path, PathBuf};

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "CONCIERGE_DATA_DIR";

/// Resolve the data directory.
///
/// `$CONCIERGE_DATA_DIR` if set, else `~/.concierge`, else `./.concierge`.
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".concierge");
    }

    PathBuf::from(".concierge")
}

/// `{data_dir}/config.toml`
pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_path() {
        let path = config_path(Path::new("/tmp/concierge"));
        assert_eq!(path, PathBuf::from("/tmp/concierge/config.toml"));
    }

    #[test]
    fn test_resolve_data_dir_from_env() {
        // SAFETY: This test is the only one touching this variable and restores it immediately.
        unsafe {
            std::env::set_var(DATA_DIR_ENV, "/tmp/test-concierge");
        }
        let dir = resolve_data_dir();
        assert_eq!(dir, PathBuf::from("/tmp/test-concierge"));
        unsafe {
            std::env::remove_var(DATA_DIR_ENV);
        }
    }
}
