use clap::{builder::ValueParser, Arg, Command};

pub const ARG_VERBOSITY: &str = "verbosity";
pub const ENV_LOG_LEVEL: &str = "RESETFLOW_LOG_LEVEL";

/// Highest verbosity that still changes the filter; `-vvvv` and above mean trace.
const MAX_VERBOSITY: u8 = 4;

/// Accepts the level either as a count (`0`..=`4`) or by name, so
/// `RESETFLOW_LOG_LEVEL=debug` and `-vvv` select the same filter.
#[must_use]
pub fn parse_log_level() -> ValueParser {
    ValueParser::from(|value: &str| -> Result<u8, String> {
        let value = value.trim();
        if let Ok(count) = value.parse::<u8>() {
            return if count <= MAX_VERBOSITY {
                Ok(count)
            } else {
                Err(format!("log level must be 0-{MAX_VERBOSITY}, got {count}"))
            };
        }

        match value.to_ascii_lowercase().as_str() {
            "error" | "off" => Ok(0),
            "warn" | "warning" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(MAX_VERBOSITY),
            other => Err(format!(
                "unknown log level {other:?}, expected error, warn, info, debug or trace"
            )),
        }
    })
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_VERBOSITY)
            .short('v')
            .long("verbose")
            .help("Log more: -v warnings, -vv API calls and reset steps, -vvv request details")
            .long_help(
                "Log verbosity, written to stderr. Repeat -v to raise it, or set a level \
                 name (error, warn, info, debug, trace). RUST_LOG, when set, takes precedence.",
            )
            .env(ENV_LOG_LEVEL)
            .global(true)
            .action(clap::ArgAction::Count)
            .value_parser(parse_log_level()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_env(value: &str) -> Result<Option<u8>, clap::Error> {
        temp_env::with_var(ENV_LOG_LEVEL, Some(value), || {
            with_args(Command::new("resetflow"))
                .try_get_matches_from(["resetflow"])
                .map(|matches| matches.get_one::<u8>(ARG_VERBOSITY).copied())
        })
    }

    #[test]
    fn level_names_map_to_counts() {
        assert_eq!(parse_env("warn").ok(), Some(Some(1)));
        assert_eq!(parse_env("DEBUG").ok(), Some(Some(3)));
        assert_eq!(parse_env("trace").ok(), Some(Some(4)));
        assert_eq!(parse_env("2").ok(), Some(Some(2)));
    }

    #[test]
    fn out_of_range_and_unknown_levels_fail() {
        assert!(parse_env("9").is_err());
        assert!(parse_env("loud").is_err());
    }
}
