use clap::{Arg, Command};

pub const ARG_API_URL: &str = "api-url";
pub const ARG_TIMEOUT: &str = "timeout";
pub const ARG_SESSION_FILE: &str = "session-file";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_API_URL)
                .short('u')
                .long(ARG_API_URL)
                .help("Backend base URL")
                .default_value(crate::api::DEFAULT_API_URL)
                .env("RESETFLOW_API_URL")
                .global(true),
        )
        .arg(
            Arg::new(ARG_TIMEOUT)
                .short('t')
                .long(ARG_TIMEOUT)
                .help("Request timeout in seconds")
                .default_value("30")
                .env("RESETFLOW_TIMEOUT")
                .global(true)
                .value_parser(clap::value_parser!(u64).range(1..=600)),
        )
        .arg(
            Arg::new(ARG_SESSION_FILE)
                .long(ARG_SESSION_FILE)
                .help("Where the login session is stored")
                .long_help(
                    "Where the login session is stored. Defaults to resetflow/session.json in the user config directory.",
                )
                .env("RESETFLOW_SESSION_FILE")
                .global(true)
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
}
