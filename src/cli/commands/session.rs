use clap::{Arg, Command};

pub const CMD_RESET: &str = "reset";
pub const CMD_LOGIN: &str = "login";
pub const CMD_LOGOUT: &str = "logout";
pub const CMD_WHOAMI: &str = "whoami";

pub const ARG_EMAIL: &str = "email";

fn email_arg() -> Arg {
    Arg::new(ARG_EMAIL)
        .short('e')
        .long(ARG_EMAIL)
        .help("Account email; prompted for when omitted")
}

#[must_use]
pub fn with_subcommands(command: Command) -> Command {
    command
        .subcommand(
            Command::new(CMD_RESET)
                .about("Reset a forgotten password with an emailed code")
                .arg(email_arg()),
        )
        .subcommand(
            Command::new(CMD_LOGIN)
                .about("Log in and store the session")
                .arg(email_arg()),
        )
        .subcommand(Command::new(CMD_LOGOUT).about("Forget the stored session"))
        .subcommand(Command::new(CMD_WHOAMI).about("Show the stored session"))
}
