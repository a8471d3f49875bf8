//! Hardcoded spell corrections.
//!
//! Some missiles land on a predetermined point whose radius the spell data
//! does not describe. Those are listed here and patched after loading.

use std::collections::HashMap;

use tracing::{debug, warn};

use super::spell::{SpellFlags, SpellInfo};

/// One correction: flags to add and an optional impact radius
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpellException {
    pub name: &'static str,
    pub flags: SpellFlags,
    pub impact_radius: Option<f32>,
}

const fn fixed(name: &'static str, impact_radius: Option<f32>) -> SpellException {
    SpellException {
        name,
        flags: SpellFlags::FIXED_DESTINATION,
        impact_radius,
    }
}

pub const SPELL_EXCEPTIONS: &[SpellException] = &[
    fixed("flashfrostspell", None),
    fixed("apheliosrmis", None),
    fixed("bardrmissile", Some(350.0)),
    fixed("phosphorusbombmissile", Some(250.0)),
    fixed("ekkoqmis", None),
    fixed("gnarqmissile", None),
    fixed("gragasqmissile", Some(275.0)),
    fixed("gragasrboom", Some(400.0)),
    fixed("gravesqreturn", None),
    fixed("gravessmokegrenadeboom", Some(250.0)),
    fixed("heimerdingerespell", Some(250.0)),
    fixed("heimerdingerespell_ult", Some(250.0)),
    fixed("jhinetrap", Some(130.0)),
    fixed("jinxehit", Some(120.0)),
    fixed("aardrmissile", Some(250.0)),
    fixed("luxlightstrikekugel", Some(300.0)),
    fixed("namiqmissile", Some(180.0)),
    fixed("neekoq", Some(200.0)),
    fixed("sejuanirmissile", Some(1300.0)),
    fixed("seraphineqinitialmissile", Some(350.0)),
    fixed("sorakaqmissile", Some(235.0)),
    fixed("urgotqmissile", Some(180.0)),
    fixed("varusemissile", Some(260.0)),
    fixed("xerathlocuspulse", Some(200.0)),
    fixed("ziggsqspell", Some(150.0)),
    fixed("ziggsw", Some(240.0)),
    fixed("ziggse", Some(250.0)),
    fixed("ziggsrboom", Some(480.0)),
    fixed("zileanqmissile", Some(150.0)),
    fixed("zoeemis", Some(50.0)),
    fixed("viqmissile", None),
];

/// Outcome of an exception pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExceptionReport {
    pub applied: usize,
    /// Exception names with no matching spell; the table needs maintenance
    pub missing: Vec<&'static str>,
}

/// Apply `exceptions` to `spells`.
///
/// Entries whose spell is absent are reported, never inserted. Running the
/// pass twice leaves the table unchanged.
pub fn apply_spell_exceptions(
    spells: &mut HashMap<String, SpellInfo>,
    exceptions: &[SpellException],
) -> ExceptionReport {
    let mut report = ExceptionReport::default();

    for exception in exceptions {
        let Some(spell) = spells.get_mut(exception.name) else {
            warn!(
                "Spell exception '{}' has no matching spell data",
                exception.name
            );
            report.missing.push(exception.name);
            continue;
        };

        spell.add_flags(exception.flags);
        if let Some(radius) = exception.impact_radius {
            spell.set_impact_radius(radius);
        }
        report.applied += 1;
    }

    debug!(
        "Applied {} spell exceptions ({} missing)",
        report.applied,
        report.missing.len()
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spell(name: &str, radius: f32) -> SpellInfo {
        SpellInfo {
            name: name.to_string(),
            icon: name.to_string(),
            radius,
            ..SpellInfo::UNKNOWN
        }
    }

    fn table(names: &[&str]) -> HashMap<String, SpellInfo> {
        names
            .iter()
            .map(|name| (name.to_string(), spell(name, 70.0)))
            .collect()
    }

    #[test]
    fn test_exception_names_are_lowercase_and_unique() {
        let mut seen = std::collections::HashSet::new();
        for exception in SPELL_EXCEPTIONS {
            assert_eq!(exception.name, exception.name.to_lowercase());
            assert!(seen.insert(exception.name), "duplicate {}", exception.name);
            assert!(exception.flags.contains(SpellFlags::FIXED_DESTINATION));
        }
    }

    #[test]
    fn test_apply_sets_flag_and_radius() {
        let mut spells = table(&["ziggsrboom", "ekkoqmis", "ashebasicattack"]);
        let report = apply_spell_exceptions(&mut spells, SPELL_EXCEPTIONS);

        assert_eq!(report.applied, 2);
        let ziggs = &spells["ziggsrboom"];
        assert!(ziggs.has_flags(SpellFlags::FIXED_DESTINATION));
        assert_eq!(ziggs.radius, 480.0);

        let ekko = &spells["ekkoqmis"];
        assert!(ekko.has_flags(SpellFlags::FIXED_DESTINATION));
        assert_eq!(ekko.radius, 70.0);

        assert!(!spells["ashebasicattack"].has_flags(SpellFlags::FIXED_DESTINATION));
    }

    #[test]
    fn test_apply_is_idempotent() {
        let mut spells = table(&["bardrmissile", "viqmissile", "neekoq"]);
        apply_spell_exceptions(&mut spells, SPELL_EXCEPTIONS);
        let once = spells.clone();

        apply_spell_exceptions(&mut spells, SPELL_EXCEPTIONS);
        assert_eq!(spells, once);
    }

    #[test]
    fn test_missing_spells_are_reported_not_created() {
        let mut spells = table(&["gnarqmissile"]);
        let report = apply_spell_exceptions(&mut spells, SPELL_EXCEPTIONS);

        assert_eq!(report.applied, 1);
        assert_eq!(report.missing.len(), SPELL_EXCEPTIONS.len() - 1);
        assert!(report.missing.contains(&"zoeemis"));
        assert_eq!(spells.len(), 1);
    }
}
