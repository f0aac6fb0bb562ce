use std::path::PathBuf;

use dirs_next::{cache_dir, config_dir, home_dir};

/// Directory name used under the platform config/cache roots.
pub const APP_DIR_NAME: &str = "otpview";

/// Expands a leading `~` to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    let p = path.trim();
    let home = || home_dir().unwrap_or_else(|| PathBuf::from("~"));
    if p == "~" {
        return home();
    }
    if let Some(rest) = p.strip_prefix("~/").or_else(|| p.strip_prefix("~\\")) {
        return home().join(rest);
    }
    PathBuf::from(p)
}

/// `<config dir>/otpview`, or `./otpview` when the platform has none.
pub fn app_config_dir() -> PathBuf {
    config_dir().unwrap_or_else(|| PathBuf::from(".")).join(APP_DIR_NAME)
}

/// Default location of the TUI log file: `<cache dir>/otpview/otpview.log`.
pub fn default_log_path() -> PathBuf {
    cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR_NAME)
        .join("otpview.log")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_home_prefix() {
        let Some(home) = home_dir() else {
            return;
        };
        assert_eq!(expand_tilde("~"), home);
        assert_eq!(expand_tilde(" ~/a/b.json "), home.join("a/b.json"));
    }

    #[test]
    fn leaves_other_paths_alone() {
        assert_eq!(expand_tilde("/tmp/x~y"), PathBuf::from("/tmp/x~y"));
        assert_eq!(expand_tilde("rel/path"), PathBuf::from("rel/path"));
    }

    #[test]
    fn log_path_lives_under_app_dir() {
        let path = default_log_path();
        assert!(path.ends_with("otpview/otpview.log"), "{}", path.display());
    }
}
