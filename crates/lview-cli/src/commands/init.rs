//! Config file initialization.

use std::path::Path;

use anyhow::{Context, Result};
use lview_core::Config;
use owo_colors::OwoColorize;

use super::{all_views, load_view_settings, save_view_settings};

/// Write `config` to `path` with every view's settings filled in
pub fn run(mut config: Config, path: &Path) -> Result<()> {
    let mut views = all_views();
    load_view_settings(&mut config.views, &mut views);
    save_view_settings(&mut config.views, &views);

    config
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Config written to {}", path.display().bold());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lview_core::ConfigStore;
    use lview_core::assist::{LAST_HIT_SECTION, SHOW_SMITE_KEY};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_writes_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("lview.toml");

        run(Config::default(), &path).unwrap();

        let mut loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.data_folder, Config::default().data_folder);
        assert!(loaded.views.contains(LAST_HIT_SECTION));
        assert!(!loaded.views.section(LAST_HIT_SECTION).get_bool(SHOW_SMITE_KEY, true));
    }

    #[test]
    fn test_keeps_existing_values() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lview.toml");
        fs::write(
            &path,
            "frame_interval_ms = 50\n\n[last_hit_assist]\nshowSmiteLastHit = true\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        run(config, &path).unwrap();

        let mut loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.frame_interval_ms, 50);
        assert!(loaded.views.section(LAST_HIT_SECTION).get_bool(SHOW_SMITE_KEY, false));
    }
}
