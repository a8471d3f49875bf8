//! CLI command implementations.

pub mod check;
pub mod fetch;
pub mod init;
pub mod offsets;
pub mod watch;

use lview_core::{ConfigSet, LastHitAssist, OverlayView};
use tracing::debug;

/// Every overlay view, in draw order
pub fn all_views() -> Vec<Box<dyn OverlayView>> {
    vec![Box::new(LastHitAssist::new())]
}

/// Apply each view's stored settings
pub fn load_view_settings(set: &mut ConfigSet, views: &mut [Box<dyn OverlayView>]) {
    for view in views.iter_mut() {
        let section = set.section(view.settings_section());
        view.on_load_settings(&section);
        debug!("Loaded settings for {}", view.name());
    }
}

/// Write each view's current settings back into `set`
pub fn save_view_settings(set: &mut ConfigSet, views: &[Box<dyn OverlayView>]) {
    for view in views {
        let mut section = set.section(view.settings_section());
        view.on_save_settings(&mut section);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lview_core::ConfigStore;
    use lview_core::assist::{LAST_HIT_SECTION, SHOW_MINION_KEY, SHOW_SMITE_KEY};

    #[test]
    fn test_settings_round_trip_through_views() {
        let mut set = ConfigSet::new();
        {
            let mut section = set.section(LAST_HIT_SECTION);
            section.set_bool(SHOW_SMITE_KEY, true);
            section.set_bool(SHOW_MINION_KEY, false);
        }

        let mut views = all_views();
        load_view_settings(&mut set, &mut views);

        let mut saved = ConfigSet::new();
        save_view_settings(&mut saved, &views);

        let section = saved.section(LAST_HIT_SECTION);
        assert!(section.get_bool(SHOW_SMITE_KEY, false));
        assert!(!section.get_bool(SHOW_MINION_KEY, true));
    }

    #[test]
    fn test_defaults_written_for_empty_config() {
        let mut set = ConfigSet::new();
        let mut views = all_views();
        load_view_settings(&mut set, &mut views);
        save_view_settings(&mut set, &views);

        assert!(set.contains(LAST_HIT_SECTION));
        let section = set.section(LAST_HIT_SECTION);
        assert!(!section.get_bool(SHOW_SMITE_KEY, true));
        assert!(section.get_bool(SHOW_MINION_KEY, false));
    }
}
