//! Front end configuration.
//!
//! The palette is the only preference that survives a restart; it lives in
//! `<config dir>/foliosh/theme`.

use std::path::PathBuf;

use foliosh_core::models::Theme;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "FOLIOSH_LOG";

/// Directory name under the platform config directory.
const CONFIG_DIR_NAME: &str = "foliosh";

const THEME_FILE: &str = "theme";

fn theme_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(THEME_FILE))
}

/// Stored palette, if one was saved and still names a known theme.
pub fn load_theme() -> Option<Theme> {
    let path = theme_path()?;
    let stored = std::fs::read_to_string(&path).ok()?;
    match stored.trim().parse() {
        Ok(theme) => Some(theme),
        Err(e) => {
            tracing::warn!(path = %path.display(), "ignoring stored theme: {}", e);
            None
        }
    }
}

pub fn save_theme(theme: Theme) -> anyhow::Result<()> {
    let path = theme_path().ok_or_else(|| anyhow::anyhow!("no config directory"))?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, theme.name())?;
    Ok(())
}
