//! Knowledge base check command.

use std::path::Path;

use anyhow::{Context, Result, bail};
use lview_core::{GameData, LoadReport, PngTextureLoader};
use owo_colors::OwoColorize;

/// Load `data_folder` the way the overlay does and print what was found
pub fn run(data_folder: &Path) -> Result<()> {
    let mut loader = PngTextureLoader::new();
    let data = match GameData::load(data_folder, &mut loader) {
        Ok(data) => data,
        Err(e) if e.is_not_found() => {
            bail!("{} (set data_folder in the config or pass --data-folder)", e)
        }
        Err(e) => {
            return Err(e)
                .with_context(|| format!("Failed to load data from {}", data_folder.display()));
        }
    };

    print_report(data_folder, data.report());
    Ok(())
}

fn print_report(data_folder: &Path, report: &LoadReport) {
    println!("Data folder: {}", data_folder.display().bold());
    println!();
    println!("  Units:   {}", report.units.green());
    println!("  Spells:  {}", report.spells.green());
    println!("  Images:  {}", report.images.green());

    if report.skipped_records() > 0 {
        println!(
            "  Skipped: {} ({} units, {} spells)",
            report.skipped_records().yellow(),
            report.skipped_units,
            report.skipped_spells
        );
    }
    if report.failed_images > 0 {
        println!("  Broken images: {}", report.failed_images.yellow());
    }

    let exceptions = &report.exceptions;
    println!(
        "  Spell exceptions: {} applied",
        exceptions.applied.green()
    );
    if !exceptions.missing.is_empty() {
        println!(
            "  {} exceptions name spells missing from the data:",
            exceptions.missing.len().yellow()
        );
        for name in &exceptions.missing {
            println!("    - {}", name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_missing_folder_fails() {
        let dir = tempdir().unwrap();
        assert!(run(&dir.path().join("absent")).is_err());
    }

    #[test]
    fn test_minimal_folder_loads() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("UnitData.json"), "[]").unwrap();
        fs::write(dir.path().join("SpellData.json"), "[]").unwrap();
        fs::write(dir.path().join("SpellDataCustom.json"), "[]").unwrap();

        assert!(run(dir.path()).is_ok());
    }
}
