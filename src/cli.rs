//! Command-line argument parsing
//!
//! Flags use the `--name=value` form. Every option can also be set through a
//! `STEPVIZ_*` environment variable; explicit flags override the environment,
//! which overrides the defaults.

use crate::listing::Language;
use crate::playback::session::{Algorithm, SessionSettings};
use crate::steps::{self, MAX_NUMBER};
use crate::ui::theme::ThemeMode;
use std::env;
use std::path::PathBuf;
use std::process;
use std::time::Duration;

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const HELP_TEXT: &str = "\
stepviz: step-by-step algorithm walkthroughs

USAGE:
    stepviz [OPTIONS]

OPTIONS:
    --algorithm=NAME     Walkthrough to open: 'factors' or 'find-max' (default: factors)
    --number=N           Number to factorize (default: 24)
    --naive              Scan every divisor instead of stopping at the square root
    --max-number=N       Largest accepted number, 1 to 10000 (default: 10000)
    --values=A,B,C       Array for the find-max walkthrough (default: 3,7,2,9,4,1,8)
    --interval-ms=N      Autoplay interval in milliseconds (default: 1000)
    --language=LANG      Code listing language: 'js' or 'python' (default: js)
    --theme=MODE         Color theme: 'dark' or 'light' (default: dark)
    --print              Print the walkthrough to stdout instead of opening the TUI
    --log-file=PATH      Write logs to PATH
    --log-level=LEVEL    Log level: error, warn, info, debug, trace (default: info)
    --help, -h           Show this help message
    --version, -V        Show version

KEYBINDINGS:
    Left / Right          Step backward / forward
    1-9                   Step forward N times
    Space                 Toggle autoplay
    Enter / Backspace     Jump to end / start
    o                     Toggle optimized mode
    n                     Edit the number (or the values for find-max)
    a                     Switch algorithm
    l                     Switch listing language
    t                     Toggle light/dark theme
    Tab, Up / Down        Focus pane, scroll
    q                     Quit

ENVIRONMENT VARIABLES:
    STEPVIZ_ALGORITHM     Override --algorithm
    STEPVIZ_NUMBER        Override --number
    STEPVIZ_NAIVE         Override --naive (1/true to enable)
    STEPVIZ_MAX_NUMBER    Override --max-number
    STEPVIZ_VALUES        Override --values
    STEPVIZ_INTERVAL_MS   Override --interval-ms
    STEPVIZ_LANGUAGE      Override --language
    STEPVIZ_THEME         Override --theme
    STEPVIZ_LOG_FILE      Override --log-file
    STEPVIZ_LOG_LEVEL     Override --log-level";

/// Parsed command-line options
#[derive(Debug, Clone)]
pub struct Opts {
    pub algorithm: Algorithm,
    /// Kept signed so that out-of-range input reaches the generator's validation
    pub number: i64,
    pub optimized: bool,
    pub max_number: u32,
    pub values: Vec<i64>,
    pub interval_ms: u64,
    pub language: Language,
    pub theme: ThemeMode,
    /// Print the walkthrough and exit
    pub print: bool,
    pub log_file: Option<PathBuf>,
    pub log_level: tracing::Level,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    Help,
    Version,
    InvalidValue { flag: &'static str, value: String },
    UnknownArg(String),
}

impl Default for Opts {
    fn default() -> Self {
        let settings = SessionSettings::default();
        Opts {
            algorithm: settings.algorithm,
            number: settings.number,
            optimized: settings.optimized,
            max_number: MAX_NUMBER,
            values: settings.values,
            interval_ms: settings.interval.as_millis() as u64,
            language: Language::JavaScript,
            theme: ThemeMode::Dark,
            print: false,
            log_file: None,
            log_level: tracing::Level::INFO,
        }
    }
}

fn is_truthy(val: &str) -> bool {
    val == "1" || val.eq_ignore_ascii_case("true")
}

impl Opts {
    /// Parse process arguments and environment, exiting on `--help`,
    /// `--version` or a bad flag
    pub fn parse() -> Self {
        match Self::parse_from_env_and_args(env::args().skip(1), |key| env::var(key).ok()) {
            Ok(opts) => opts,
            Err(ParseError::Help) => {
                println!("{}", HELP_TEXT);
                process::exit(0);
            }
            Err(ParseError::Version) => {
                println!("stepviz {}", VERSION);
                process::exit(0);
            }
            Err(ParseError::InvalidValue { flag, value }) => {
                eprintln!("Invalid {} value: {}", flag, value);
                process::exit(1);
            }
            Err(ParseError::UnknownArg(arg)) => {
                eprintln!("Unknown argument: {}", arg);
                eprintln!("Run with --help for usage information.");
                process::exit(1);
            }
        }
    }

    pub fn parse_from_env_and_args<I, S, F>(args: I, get_env: F) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        F: Fn(&str) -> Option<String>,
    {
        let mut opts = Self::default();

        // Environment first; malformed values are ignored
        if let Some(val) = get_env("STEPVIZ_ALGORITHM") {
            if let Ok(a) = val.parse() {
                opts.algorithm = a;
            }
        }
        if let Some(val) = get_env("STEPVIZ_NUMBER") {
            if let Ok(n) = val.trim().parse() {
                opts.number = n;
            }
        }
        if let Some(val) = get_env("STEPVIZ_NAIVE") {
            opts.optimized = !is_truthy(&val);
        }
        if let Some(val) = get_env("STEPVIZ_MAX_NUMBER") {
            if let Some(n) = parse_ceiling(&val) {
                opts.max_number = n;
            }
        }
        if let Some(val) = get_env("STEPVIZ_VALUES") {
            if let Ok(values) = steps::parse_values(&val) {
                opts.values = values;
            }
        }
        if let Some(val) = get_env("STEPVIZ_INTERVAL_MS") {
            if let Ok(n) = val.trim().parse() {
                opts.interval_ms = n;
            }
        }
        if let Some(val) = get_env("STEPVIZ_LANGUAGE") {
            if let Ok(l) = val.parse() {
                opts.language = l;
            }
        }
        if let Some(val) = get_env("STEPVIZ_THEME") {
            if let Ok(t) = val.parse() {
                opts.theme = t;
            }
        }
        if let Some(val) = get_env("STEPVIZ_LOG_FILE") {
            if !val.trim().is_empty() {
                opts.log_file = Some(PathBuf::from(val));
            }
        }
        if let Some(val) = get_env("STEPVIZ_LOG_LEVEL") {
            if let Ok(l) = val.trim().parse() {
                opts.log_level = l;
            }
        }

        for arg in args {
            let arg = arg.as_ref();
            let (name, value) = match arg.split_once('=') {
                Some((name, value)) => (name, Some(value)),
                None => (arg, None),
            };

            match (name, value) {
                ("--help" | "-h", None) => return Err(ParseError::Help),
                ("--version" | "-V", None) => return Err(ParseError::Version),
                ("--naive", None) => opts.optimized = false,
                ("--print", None) => opts.print = true,
                ("--algorithm", Some(v)) => {
                    opts.algorithm = v.parse().map_err(|_| invalid("--algorithm", v))?;
                }
                ("--number", Some(v)) => {
                    opts.number = v.trim().parse().map_err(|_| invalid("--number", v))?;
                }
                ("--max-number", Some(v)) => {
                    opts.max_number = parse_ceiling(v).ok_or_else(|| invalid("--max-number", v))?;
                }
                ("--values", Some(v)) => {
                    opts.values = steps::parse_values(v).map_err(|_| invalid("--values", v))?;
                }
                ("--interval-ms", Some(v)) => {
                    opts.interval_ms = v
                        .trim()
                        .parse::<u64>()
                        .ok()
                        .filter(|n| *n > 0)
                        .ok_or_else(|| invalid("--interval-ms", v))?;
                }
                ("--language", Some(v)) => {
                    opts.language = v.parse().map_err(|_| invalid("--language", v))?;
                }
                ("--theme", Some(v)) => {
                    opts.theme = v.parse().map_err(|_| invalid("--theme", v))?;
                }
                ("--log-file", Some(v)) if !v.is_empty() => {
                    opts.log_file = Some(PathBuf::from(v));
                }
                ("--log-level", Some(v)) => {
                    opts.log_level = v.trim().parse().map_err(|_| invalid("--log-level", v))?;
                }
                _ => return Err(ParseError::UnknownArg(arg.to_string())),
            }
        }

        Ok(opts)
    }

    /// Session inputs derived from these options
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            algorithm: self.algorithm,
            number: self.number,
            optimized: self.optimized,
            max_number: self.max_number,
            values: self.values.clone(),
            interval: Duration::from_millis(self.interval_ms),
        }
    }
}

/// A ceiling may only lower the default cap
fn parse_ceiling(val: &str) -> Option<u32> {
    val.trim()
        .parse::<u32>()
        .ok()
        .filter(|n| (1..=MAX_NUMBER).contains(n))
}

fn invalid(flag: &'static str, value: &str) -> ParseError {
    ParseError::InvalidValue {
        flag,
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn parse_with_env(
        args: &[&str],
        env_pairs: &[(&'static str, &'static str)],
    ) -> Result<Opts, ParseError> {
        let map: HashMap<&str, &str> = env_pairs.iter().copied().collect();
        Opts::parse_from_env_and_args(args.iter(), |key| map.get(key).map(|v| v.to_string()))
    }

    #[test]
    fn test_defaults() {
        let opts = parse_with_env(&[], &[]).unwrap();
        assert_eq!(opts.algorithm, Algorithm::Factors);
        assert_eq!(opts.number, 24);
        assert!(opts.optimized);
        assert_eq!(opts.max_number, 10_000);
        assert_eq!(opts.interval_ms, 1000);
        assert_eq!(opts.language, Language::JavaScript);
        assert_eq!(opts.theme, ThemeMode::Dark);
        assert!(!opts.print);
        assert!(opts.log_file.is_none());
        assert_eq!(opts.log_level, tracing::Level::INFO);
    }

    #[test]
    fn test_flags() {
        let opts = parse_with_env(
            &[
                "--number=36",
                "--naive",
                "--algorithm=find-max",
                "--values=4,1,9",
                "--language=python",
                "--theme=light",
                "--interval-ms=250",
                "--print",
                "--log-level=debug",
            ],
            &[],
        )
        .unwrap();
        assert_eq!(opts.number, 36);
        assert!(!opts.optimized);
        assert_eq!(opts.algorithm, Algorithm::FindMax);
        assert_eq!(opts.values, vec![4, 1, 9]);
        assert_eq!(opts.language, Language::Python);
        assert_eq!(opts.theme, ThemeMode::Light);
        assert_eq!(opts.interval_ms, 250);
        assert!(opts.print);
        assert_eq!(opts.log_level, tracing::Level::DEBUG);
    }

    #[test]
    fn test_env_overrides_defaults_and_flags_override_env() {
        let opts = parse_with_env(
            &["--number=12"],
            &[("STEPVIZ_NUMBER", "99"), ("STEPVIZ_NAIVE", "true"), ("STEPVIZ_THEME", "light")],
        )
        .unwrap();
        assert_eq!(opts.number, 12);
        assert!(!opts.optimized);
        assert_eq!(opts.theme, ThemeMode::Light);
    }

    #[test]
    fn test_malformed_env_is_ignored() {
        let opts = parse_with_env(&[], &[("STEPVIZ_INTERVAL_MS", "soon")]).unwrap();
        assert_eq!(opts.interval_ms, 1000);
    }

    #[test]
    fn test_max_number_cannot_exceed_default_cap() {
        assert_eq!(
            parse_with_env(&["--max-number=4294967295"], &[]).unwrap_err(),
            ParseError::InvalidValue {
                flag: "--max-number",
                value: "4294967295".to_string()
            }
        );
        assert!(parse_with_env(&["--max-number=0"], &[]).is_err());

        let opts = parse_with_env(&["--max-number=500"], &[]).unwrap();
        assert_eq!(opts.max_number, 500);

        let opts = parse_with_env(&[], &[("STEPVIZ_MAX_NUMBER", "20000")]).unwrap();
        assert_eq!(opts.max_number, MAX_NUMBER);
    }

    #[test]
    fn test_negative_number_reaches_validation() {
        let opts = parse_with_env(&["--number=-3"], &[]).unwrap();
        assert_eq!(opts.number, -3);
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse_with_env(&["--help"], &[]).unwrap_err(), ParseError::Help);
        assert_eq!(parse_with_env(&["-V"], &[]).unwrap_err(), ParseError::Version);
        assert_eq!(
            parse_with_env(&["--number=abc"], &[]).unwrap_err(),
            ParseError::InvalidValue {
                flag: "--number",
                value: "abc".to_string()
            }
        );
        assert_eq!(
            parse_with_env(&["--interval-ms=0"], &[]).unwrap_err(),
            ParseError::InvalidValue {
                flag: "--interval-ms",
                value: "0".to_string()
            }
        );
        assert_eq!(
            parse_with_env(&["--bogus"], &[]).unwrap_err(),
            ParseError::UnknownArg("--bogus".to_string())
        );
    }

    #[test]
    fn test_help_mentions_every_flag() {
        for flag in ["--algorithm", "--number", "--naive", "--values", "--print", "--log-file"] {
            assert!(HELP_TEXT.contains(flag));
        }
        assert!(!VERSION.is_empty());
    }
}
