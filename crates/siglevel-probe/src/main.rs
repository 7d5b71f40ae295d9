//! Signal level probe
//!
//! Command-line front end for `siglevel-core`.
//!
//! - `classify` reads radio readings as JSON lines on stdin and writes one
//!   `{"level": .., "source": ..}` object per reading on stdout
//! - `wifi` prints the bar level for a single Wi-Fi RSSI
//!
//! Logs go to stderr; set `RUST_LOG=siglevel_core=trace` to see every
//! classification decision.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use siglevel_core::classifier::LevelSource;
use siglevel_core::wifi::wifi_level;
use siglevel_core::{ClassifierConfig, ClassifierConfigInput, RadioMetrics, SignalLevelClassifier};
use tracing_subscriber::EnvFilter;

/// Classify raw radio metrics into signal bars.
#[derive(Parser, Debug)]
#[command(name = "siglevel-probe", about = "Classify radio metrics into signal bars")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify JSON-lines cellular readings from stdin.
    Classify {
        /// Classifier config (TOML).
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the configured maximum level.
        #[arg(long)]
        max_level: Option<u8>,
    },
    /// Bar level for a Wi-Fi RSSI.
    Wifi {
        /// RSSI in dBm. Missing reads as no signal.
        #[arg(long, allow_hyphen_values = true)]
        rssi: Option<i32>,

        /// Number of levels, including zero bars.
        #[arg(long, default_value_t = 5)]
        levels: u8,
    },
}

#[derive(Debug, Serialize)]
struct LevelLine {
    level: u8,
    source: LevelSource,
}

fn load_config(path: Option<&Path>, max_level: Option<u8>) -> anyhow::Result<ClassifierConfig> {
    let mut input = match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            ClassifierConfigInput::from_toml_str(&raw)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => ClassifierConfigInput::default(),
    };
    if max_level.is_some() {
        input.max_level = max_level;
    }
    Ok(input.resolve()?)
}

/// Classify every reading on `input`; malformed lines are logged and skipped.
/// Returns the number of readings classified.
fn run_classify<R: BufRead, W: Write>(
    classifier: &SignalLevelClassifier,
    input: R,
    mut output: W,
) -> anyhow::Result<usize> {
    let mut classified = 0;
    for (idx, line) in input.lines().enumerate() {
        let line = line.context("reading stdin")?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let metrics: RadioMetrics = match serde_json::from_str(trimmed) {
            Ok(metrics) => metrics,
            Err(e) => {
                tracing::warn!(line = idx + 1, error = %e, "skipping malformed reading");
                continue;
            }
        };
        let classification = classifier.classify_detailed(&metrics);
        let out = LevelLine {
            level: classification.bars(),
            source: classification.source,
        };
        serde_json::to_writer(&mut output, &out)?;
        output.write_all(b"\n")?;
        classified += 1;
    }
    output.flush()?;
    Ok(classified)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Classify { config, max_level } => {
            let config = load_config(config.as_deref(), max_level)?;
            tracing::info!(
                max_level = config.max_level,
                regional_lte = config.regional_lte,
                "siglevel-probe classifying stdin"
            );
            let classifier = SignalLevelClassifier::new(config);
            let stdin = io::stdin();
            let count = run_classify(&classifier, stdin.lock(), io::stdout().lock())?;
            tracing::info!(count, "done");
        }
        Command::Wifi { rssi, levels } => {
            println!("{}", wifi_level(rssi, levels));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify_lines(classifier: &SignalLevelClassifier, input: &str) -> (usize, String) {
        let mut out = Vec::new();
        let count = run_classify(classifier, input.as_bytes(), &mut out).unwrap();
        (count, String::from_utf8(out).unwrap())
    }

    #[test]
    fn classify_writes_one_line_per_reading() {
        let input = r#"{"family":"gsm","lte":{"rsrp_dbm":-90,"rssnr":150}}
{"family":"cdma","cdma":{"dbm":-99,"ecio":-200}}
{"family":"gsm","lte":{"rsrp_dbm":-200,"rssnr":1000}}
"#;
        let (count, out) = classify_lines(&SignalLevelClassifier::default(), input);
        assert_eq!(count, 3);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], r#"{"level":4,"source":"lte_rsrp"}"#);
        assert_eq!(lines[1], r#"{"level":0,"source":"cdma"}"#);
        assert_eq!(lines[2], r#"{"level":0,"source":"unknown"}"#);
    }

    #[test]
    fn classify_skips_blank_and_malformed_lines() {
        let input = "\nnot json\n{\"family\":\"gsm\",\"gsm\":{\"asu\":12}}\n{\"family\":\"wimax\"}\n";
        let (count, out) = classify_lines(&SignalLevelClassifier::default(), input);
        assert_eq!(count, 1);
        assert_eq!(out.trim(), r#"{"level":4,"source":"gsm"}"#);
    }

    #[test]
    fn max_level_flag_overrides_config() {
        let config = load_config(None, Some(6)).unwrap();
        assert_eq!(config.max_level, 6);
        assert!(load_config(None, Some(0)).is_err());
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let err = load_config(Some(Path::new("/nonexistent/siglevel.toml")), None).unwrap_err();
        assert!(err.to_string().contains("reading config"));
    }

    #[test]
    fn cli_parses_negative_rssi() {
        let cli = Cli::try_parse_from(["siglevel-probe", "wifi", "--rssi", "-70"]).unwrap();
        match cli.command {
            Command::Wifi { rssi, levels } => {
                assert_eq!(rssi, Some(-70));
                assert_eq!(levels, 5);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
