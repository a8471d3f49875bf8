//! Unit data download from CommunityDragon.
//!
//! The character listing of a patch is an HTML directory index; each unit
//! folder holds a `<unit>.bin.json` with the raw unit properties.

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use tracing::{debug, info, warn};

use crate::shutdown::ShutdownSignal;

const CDRAGON_URL: &str = "https://raw.communitydragon.org";

/// The mirror rejects requests without a browser user agent
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux i686) AppleWebKit/537.17 (KHTML, like Gecko) Chrome/24.0.1312.27 Safari/537.17";

/// Delay between unit requests
const REQUEST_DELAY: Duration = Duration::from_millis(100);

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub fn characters_url(version: &str) -> String {
    format!("{}/{}/game/data/characters/", CDRAGON_URL, version)
}

pub fn unit_url(version: &str, unit: &str) -> String {
    format!(
        "{}/{}/game/data/characters/{}/{}.bin.json",
        CDRAGON_URL, version, unit, unit
    )
}

/// Unit folder names from a directory index page.
///
/// Entries look like `<a href="ashe/" title="ashe">ashe/</a>`; only names
/// made of ASCII word characters are accepted.
pub fn parse_unit_names(page: &str) -> Vec<String> {
    let is_word = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');

    page.split("<a href=\"")
        .skip(1)
        .filter_map(|entry| {
            let (href, rest) = entry.split_once("/\" title=\"")?;
            let (title, rest) = rest.split_once("\">")?;
            let (text, _) = rest.split_once("/</a>")?;
            (is_word(href) && is_word(title) && is_word(text)).then(|| text.to_string())
        })
        .collect()
}

/// Outcome of a download run
#[derive(Debug, Default)]
pub struct FetchReport {
    pub downloaded: usize,
    pub failed: Vec<String>,
    pub interrupted: bool,
}

/// Download every unit in `units` into `output` through `fetch`.
///
/// A failed unit is recorded and the run continues.
pub fn download_units<F>(
    version: &str,
    units: &[String],
    output: &Path,
    shutdown: &ShutdownSignal,
    mut fetch: F,
) -> Result<FetchReport>
where
    F: FnMut(&str) -> Result<String>,
{
    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;

    let mut report = FetchReport::default();
    for (i, unit) in units.iter().enumerate() {
        if i > 0 && shutdown.wait(REQUEST_DELAY) {
            report.interrupted = true;
            break;
        }

        let url = unit_url(version, unit);
        debug!("Requesting {}", url);

        let result = fetch(&url).and_then(|body| {
            let path = output.join(format!("{}.bin.json", unit));
            fs::write(&path, body).with_context(|| format!("Failed to write {}", path.display()))
        });

        match result {
            Ok(()) => report.downloaded += 1,
            Err(e) => {
                warn!("Failed to retrieve data for {}: {:#}", unit, e);
                report.failed.push(unit.clone());
            }
        }
    }

    Ok(report)
}

pub fn run(version: &str, output: &Path) -> Result<()> {
    let shutdown = Arc::new(ShutdownSignal::new());
    let shutdown_ctrlc = Arc::clone(&shutdown);
    ctrlc::set_handler(move || {
        info!("Received shutdown signal, stopping...");
        shutdown_ctrlc.trigger();
    })?;

    let config = ureq::Agent::config_builder()
        .timeout_global(Some(REQUEST_TIMEOUT))
        .build();
    let agent: ureq::Agent = config.into();

    let get = |url: &str| -> Result<String> {
        let mut resp = agent
            .get(url)
            .header("User-Agent", USER_AGENT)
            .call()
            .with_context(|| format!("GET {} failed", url))?;
        resp.body_mut()
            .read_to_string()
            .with_context(|| format!("Failed to read body of {}", url))
    };

    let list_url = characters_url(version);
    info!("Requesting {}", list_url);
    let page = get(&list_url)?;
    let units = parse_unit_names(&page);
    info!("Found {} units for {}", units.len(), version);

    let report = download_units(version, &units, output, &shutdown, get)?;

    println!(
        "Downloaded {} of {} units into {}",
        report.downloaded.green(),
        units.len(),
        output.display().bold()
    );
    if report.interrupted {
        println!("{}", "Interrupted before all units were fetched".yellow());
    }
    if !report.failed.is_empty() {
        println!("Error retrieving the following units:");
        for unit in &report.failed {
            println!("  - {}", unit.red());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use tempfile::tempdir;

    #[test]
    fn test_parse_directory_index() {
        let page = r#"
<html><body><pre>
<a href="../">../</a>
<a href="ashe/" title="ashe">ashe/</a>                2021-01-20 10:00  -
<a href="sru_chaosminionmelee/" title="sru_chaosminionmelee">sru_chaosminionmelee/</a>
<a href="odd-name/" title="odd-name">odd-name/</a>
<a href="readme.txt" title="readme.txt">readme.txt</a>
</pre></body></html>
"#;

        assert_eq!(
            parse_unit_names(page),
            vec!["ashe".to_string(), "sru_chaosminionmelee".to_string()]
        );
    }

    #[test]
    fn test_urls() {
        assert_eq!(
            characters_url("11.2"),
            "https://raw.communitydragon.org/11.2/game/data/characters/"
        );
        assert_eq!(
            unit_url("latest", "ashe"),
            "https://raw.communitydragon.org/latest/game/data/characters/ashe/ashe.bin.json"
        );
    }

    #[test]
    fn test_failures_are_collected() {
        let dir = tempdir().unwrap();
        let units = vec!["ashe".to_string(), "missing".to_string(), "annie".to_string()];
        let shutdown = ShutdownSignal::new();

        let report = download_units("11.2", &units, dir.path(), &shutdown, |url| {
            if url.contains("missing") {
                bail!("404 Not Found");
            }
            Ok(format!("{{\"url\": \"{}\"}}", url))
        })
        .unwrap();

        assert_eq!(report.downloaded, 2);
        assert_eq!(report.failed, vec!["missing".to_string()]);
        assert!(!report.interrupted);
        assert!(dir.path().join("ashe.bin.json").exists());
        assert!(!dir.path().join("missing.bin.json").exists());
    }

    #[test]
    fn test_shutdown_stops_download() {
        let dir = tempdir().unwrap();
        let units = vec!["ashe".to_string(), "annie".to_string()];
        let shutdown = ShutdownSignal::new();
        shutdown.trigger();

        let report =
            download_units("11.2", &units, dir.path(), &shutdown, |_| Ok("{}".to_string()))
                .unwrap();

        assert_eq!(report.downloaded, 1);
        assert!(report.interrupted);
    }
}
