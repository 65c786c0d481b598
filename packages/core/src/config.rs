use std::env;
use std::path::PathBuf;

use crate::cli::Cli;

#[derive(Debug, Clone)]
pub struct Config {
    pub roster_path: PathBuf,
    pub requeue_unmatched: bool,
}

impl Config {
    /// Process environment with command-line flags taking precedence.
    pub fn resolve(cli: &Cli) -> Result<Self, String> {
        Self::from_sources(cli, |key| env::var(key).ok())
    }

    /// `FRONT_DESK_ROSTER` is only required when `--roster` is absent;
    /// `--requeue-unmatched` switches requeueing on regardless of
    /// `FRONT_DESK_REQUEUE_UNMATCHED`.
    pub fn from_sources<F>(cli: &Cli, lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let roster_path = match &cli.roster {
            Some(path) => path.clone(),
            None => lookup("FRONT_DESK_ROSTER")
                .ok_or("FRONT_DESK_ROSTER or --roster is required")?
                .into(),
        };

        let requeue_from_env = match lookup("FRONT_DESK_REQUEUE_UNMATCHED") {
            Some(raw) => parse_flag(&raw)
                .ok_or_else(|| format!("Invalid FRONT_DESK_REQUEUE_UNMATCHED: {}", raw))?,
            None => false,
        };

        Ok(Self {
            roster_path,
            requeue_unmatched: cli.requeue_unmatched || requeue_from_env,
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn cli(roster: Option<&str>, requeue_unmatched: bool) -> Cli {
        Cli {
            roster: roster.map(PathBuf::from),
            requeue_unmatched,
        }
    }

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn parse_flag_accepts_common_spellings() {
        assert_eq!(parse_flag("true"), Some(true));
        assert_eq!(parse_flag(" YES "), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("off"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn roster_flag_overrides_environment() {
        let config = Config::from_sources(
            &cli(Some("cli.json"), false),
            env_of(&[("FRONT_DESK_ROSTER", "env.json")]),
        )
        .unwrap();
        assert_eq!(config.roster_path, PathBuf::from("cli.json"));
        assert!(!config.requeue_unmatched);
    }

    #[test]
    fn environment_supplies_missing_flags() {
        let config = Config::from_sources(
            &cli(None, false),
            env_of(&[
                ("FRONT_DESK_ROSTER", "env.json"),
                ("FRONT_DESK_REQUEUE_UNMATCHED", "true"),
            ]),
        )
        .unwrap();
        assert_eq!(config.roster_path, PathBuf::from("env.json"));
        assert!(config.requeue_unmatched);
    }

    #[test]
    fn requeue_flag_wins_over_env_false() {
        let config = Config::from_sources(
            &cli(Some("cli.json"), true),
            env_of(&[("FRONT_DESK_REQUEUE_UNMATCHED", "false")]),
        )
        .unwrap();
        assert!(config.requeue_unmatched);
    }

    #[test]
    fn missing_roster_is_an_error() {
        assert!(Config::from_sources(&cli(None, false), env_of(&[])).is_err());
    }

    #[test]
    fn malformed_requeue_value_is_an_error() {
        let err = Config::from_sources(
            &cli(Some("cli.json"), false),
            env_of(&[("FRONT_DESK_REQUEUE_UNMATCHED", "maybe")]),
        )
        .unwrap_err();
        assert!(err.contains("FRONT_DESK_REQUEUE_UNMATCHED"));
    }
}
