pub mod connection;
pub mod logging;
pub mod records;
pub mod session;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    ColorChoice, Command,
};

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("resetflow")
        .about("Password reset and account tools for the technician services backend")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true);

    let command = connection::with_args(command);
    let command = session::with_subcommands(command);
    let command = records::with_subcommands(command);
    logging::with_args(command)
}

#[cfg(test)]
mod tests {
    use super::connection::{ARG_API_URL, ARG_SESSION_FILE, ARG_TIMEOUT};
    use super::logging::ARG_VERBOSITY;
    use super::*;
    use std::path::PathBuf;

    const ENV_VARS: [&str; 4] = [
        "RESETFLOW_API_URL",
        "RESETFLOW_TIMEOUT",
        "RESETFLOW_SESSION_FILE",
        "RESETFLOW_LOG_LEVEL",
    ];

    fn without_env<F: FnOnce()>(f: F) {
        temp_env::with_vars(ENV_VARS.map(|key| (key, None::<&str>)), f);
    }

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "resetflow");
        assert_eq!(
            command.get_version().map(ToString::to_string),
            Some(env!("CARGO_PKG_VERSION").to_string())
        );
    }

    #[test]
    fn test_defaults() {
        without_env(|| {
            let matches = new().get_matches_from(vec!["resetflow", "whoami"]);
            assert_eq!(
                matches.get_one::<String>(ARG_API_URL).cloned(),
                Some(crate::api::DEFAULT_API_URL.to_string())
            );
            assert_eq!(matches.get_one::<u64>(ARG_TIMEOUT).copied(), Some(30));
            assert!(matches.get_one::<PathBuf>(ARG_SESSION_FILE).is_none());
            assert_eq!(matches.get_one::<u8>(ARG_VERBOSITY).copied(), Some(0));
            assert_eq!(matches.subcommand_name(), Some(session::CMD_WHOAMI));
        });
    }

    #[test]
    fn test_env_overrides() {
        temp_env::with_vars(
            [
                ("RESETFLOW_API_URL", Some("https://api.example.com")),
                ("RESETFLOW_TIMEOUT", Some("5")),
                ("RESETFLOW_SESSION_FILE", Some("/tmp/resetflow.json")),
                ("RESETFLOW_LOG_LEVEL", None),
            ],
            || {
                let matches = new().get_matches_from(vec!["resetflow", "logout"]);
                assert_eq!(
                    matches.get_one::<String>(ARG_API_URL).cloned(),
                    Some("https://api.example.com".to_string())
                );
                assert_eq!(matches.get_one::<u64>(ARG_TIMEOUT).copied(), Some(5));
                assert_eq!(
                    matches.get_one::<PathBuf>(ARG_SESSION_FILE).cloned(),
                    Some(PathBuf::from("/tmp/resetflow.json"))
                );
            },
        );
    }

    #[test]
    fn test_global_args_after_subcommand() {
        without_env(|| {
            let matches = new().get_matches_from(vec![
                "resetflow",
                "reset",
                "--email",
                "user@example.com",
                "--timeout",
                "10",
                "-vv",
            ]);
            assert_eq!(matches.get_one::<u8>(ARG_VERBOSITY).copied(), Some(2));
            let (name, sub) = matches.subcommand().unwrap();
            assert_eq!(name, session::CMD_RESET);
            assert_eq!(
                sub.get_one::<String>(session::ARG_EMAIL).cloned(),
                Some("user@example.com".to_string())
            );
            assert_eq!(sub.get_one::<u64>(ARG_TIMEOUT).copied(), Some(10));
        });
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        without_env(|| {
            let result = new().try_get_matches_from(vec!["resetflow", "--timeout", "0", "whoami"]);
            assert!(result.is_err());
        });
    }

    #[test]
    fn test_records_subcommands() {
        without_env(|| {
            let matches = new().get_matches_from(vec![
                "resetflow",
                "clients",
                "create",
                "--name",
                "Joao",
                "--email",
                "joao@example.com",
                "--cpf",
                "111.444.777-35",
                "--birth-date",
                "1990-01-01",
            ]);
            let (_, clients) = matches.subcommand().unwrap();
            let (name, create) = clients.subcommand().unwrap();
            assert_eq!(name, records::CMD_CREATE);
            assert_eq!(
                create.get_one::<String>(records::ARG_CPF).cloned(),
                Some("111.444.777-35".to_string())
            );

            let matches =
                new().get_matches_from(vec!["resetflow", "regions", "list", "--active"]);
            let (_, regions) = matches.subcommand().unwrap();
            let (_, list) = regions.subcommand().unwrap();
            assert!(list.get_flag(records::ARG_ACTIVE));
        });
    }

    #[test]
    fn test_subcommand_is_required() {
        without_env(|| {
            assert!(new().try_get_matches_from(vec!["resetflow"]).is_err());
            assert!(new()
                .try_get_matches_from(vec!["resetflow", "users"])
                .is_err());
        });
    }
}
