//! Configuration command handler.
//!
//! Prints the resolved configuration with the source of every value (default,
//! configuration file or environment).
//!
//! # Example Output
//!
//! ```json
//! {
//!   "bet_per_card": {
//!     "value": 10,
//!     "source": "default"
//!   },
//!   "pattern": {
//!     "value": "All",
//!     "source": "env"
//!   },
//!   ...
//! }
//! ```

use crate::config::{self, ConfigResolved};
use crate::error::CliError;
use crate::ui;
use std::io::Write;

/// Handle the cfg command.
///
/// # Errors
///
/// Returns `CliError::Config` if configuration loading fails.
/// Returns `CliError::Io` if writing to output stream fails.
pub fn handle_cfg_command(out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let resolved = match config::load_with_sources() {
        Ok(r) => r,
        Err(e) => {
            ui::write_error(err, &format!("Invalid configuration: {}", e))?;
            return Err(CliError::Config(format!("Invalid configuration: {}", e)));
        }
    };
    write_resolved(&resolved, out)
}

fn write_resolved(resolved: &ConfigResolved, out: &mut dyn Write) -> Result<(), CliError> {
    let ConfigResolved { config, sources } = resolved;
    let display = serde_json::json!({
        "bet_per_card": {
            "value": config.bet_per_card,
            "source": sources.bet_per_card,
        },
        "commission_rate": {
            "value": config.commission_rate,
            "source": sources.commission_rate,
        },
        "interval_ms": {
            "value": config.interval_ms,
            "source": sources.interval_ms,
        },
        "pattern": {
            "value": config.pattern,
            "source": sources.pattern,
        },
        "language": {
            "value": config.language,
            "source": sources.language,
        },
        "seed": {
            "value": config.seed,
            "source": sources.seed,
        },
        "shop_id": {
            "value": config.shop_id,
            "source": sources.shop_id,
        },
        "cards_dir": {
            "value": config.cards_dir,
            "source": sources.cards_dir,
        }
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(pairs: &[(&str, &str)]) -> serde_json::Value {
        let pairs: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let resolved = config::load_from(|key| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
        })
        .unwrap();
        let mut out = Vec::new();
        write_resolved(&resolved, &mut out).unwrap();
        serde_json::from_slice(&out).unwrap()
    }

    #[test]
    fn every_field_has_value_and_source() {
        let json = render(&[]);
        for key in [
            "bet_per_card",
            "commission_rate",
            "interval_ms",
            "pattern",
            "language",
            "seed",
            "shop_id",
            "cards_dir",
        ] {
            assert!(json[key].get("value").is_some(), "{} value", key);
            assert_eq!(json[key]["source"], "default", "{} source", key);
        }
        assert_eq!(json["pattern"]["value"], "All");
        assert_eq!(json["interval_ms"]["value"], 12_000);
    }

    #[test]
    fn env_values_are_attributed() {
        let json = render(&[
            ("SHOPBINGO_PATTERN", "Cross"),
            ("SHOPBINGO_SHOP_ID", "bahir-dar"),
        ]);
        assert_eq!(json["pattern"]["value"], "Cross");
        assert_eq!(json["pattern"]["source"], "env");
        assert_eq!(json["shop_id"]["value"], "bahir-dar");
        assert_eq!(json["bet_per_card"]["source"], "default");
    }
}
