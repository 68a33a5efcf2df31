use clap::{Arg, ArgAction, Command};

pub const CMD_USERS: &str = "users";
pub const CMD_CLIENTS: &str = "clients";
pub const CMD_SPECIALTIES: &str = "specialties";
pub const CMD_REGIONS: &str = "regions";

pub const CMD_LIST: &str = "list";
pub const CMD_GET: &str = "get";
pub const CMD_SEARCH: &str = "search";
pub const CMD_CREATE: &str = "create";
pub const CMD_DELETE: &str = "delete";
pub const CMD_DEACTIVATE: &str = "deactivate";
pub const CMD_CITY: &str = "city";
pub const CMD_INITIALIZE: &str = "initialize";

pub const ARG_ID: &str = "id";
pub const ARG_NAME: &str = "name";
pub const ARG_EMAIL: &str = "email";
pub const ARG_ACCESS_LEVEL: &str = "access-level";
pub const ARG_CPF: &str = "cpf";
pub const ARG_BIRTH_DATE: &str = "birth-date";
pub const ARG_DESCRIPTION: &str = "description";
pub const ARG_CITY: &str = "city";
pub const ARG_ACTIVE: &str = "active";

fn id_arg() -> Arg {
    Arg::new(ARG_ID)
        .help("Record id")
        .required(true)
        .value_parser(clap::value_parser!(i64))
}

fn name_arg(help: &'static str) -> Arg {
    Arg::new(ARG_NAME)
        .short('n')
        .long(ARG_NAME)
        .help(help)
        .required(true)
}

fn get() -> Command {
    Command::new(CMD_GET).about("Show one record").arg(id_arg())
}

fn delete() -> Command {
    Command::new(CMD_DELETE).about("Delete a record").arg(id_arg())
}

fn search() -> Command {
    Command::new(CMD_SEARCH)
        .about("Search by name")
        .arg(Arg::new(ARG_NAME).help("Name or part of it").required(true))
}

fn list_with_active() -> Command {
    Command::new(CMD_LIST).about("List records").arg(
        Arg::new(ARG_ACTIVE)
            .long(ARG_ACTIVE)
            .help("Only active records")
            .action(ArgAction::SetTrue),
    )
}

fn account_args(command: Command) -> Command {
    command
        .arg(name_arg("Full name"))
        .arg(
            Arg::new(ARG_EMAIL)
                .short('e')
                .long(ARG_EMAIL)
                .help("Login email")
                .required(true),
        )
}

fn users() -> Command {
    Command::new(CMD_USERS)
        .about("Manage user accounts")
        .subcommand_required(true)
        .subcommand(Command::new(CMD_LIST).about("List users"))
        .subcommand(get())
        .subcommand(search())
        .subcommand(
            account_args(Command::new(CMD_CREATE).about("Create a user; the password is prompted"))
                .arg(
                    Arg::new(ARG_ACCESS_LEVEL)
                        .long(ARG_ACCESS_LEVEL)
                        .help("Access level, e.g. USER or ADMIN"),
                ),
        )
        .subcommand(delete())
}

fn clients() -> Command {
    Command::new(CMD_CLIENTS)
        .about("Manage clients")
        .subcommand_required(true)
        .subcommand(Command::new(CMD_LIST).about("List clients"))
        .subcommand(get())
        .subcommand(search())
        .subcommand(
            account_args(
                Command::new(CMD_CREATE).about("Register a client; the password is prompted"),
            )
            .arg(
                Arg::new(ARG_CPF)
                    .long(ARG_CPF)
                    .help("CPF, with or without punctuation")
                    .required(true),
            )
            .arg(
                Arg::new(ARG_BIRTH_DATE)
                    .long(ARG_BIRTH_DATE)
                    .help("Birth date, YYYY-MM-DD")
                    .required(true),
            ),
        )
        .subcommand(
            Command::new(CMD_DEACTIVATE)
                .about("Mark a client inactive")
                .arg(id_arg()),
        )
        .subcommand(delete())
}

fn specialties() -> Command {
    Command::new(CMD_SPECIALTIES)
        .about("Technician specialties")
        .subcommand_required(true)
        .subcommand(list_with_active())
        .subcommand(get())
        .subcommand(
            Command::new(CMD_CREATE)
                .about("Create a specialty")
                .arg(name_arg("Specialty name"))
                .arg(Arg::new(ARG_DESCRIPTION).short('d').long(ARG_DESCRIPTION)),
        )
        .subcommand(Command::new(CMD_INITIALIZE).about("Seed the default specialties"))
}

fn regions() -> Command {
    Command::new(CMD_REGIONS)
        .about("Service regions")
        .subcommand_required(true)
        .subcommand(list_with_active())
        .subcommand(get())
        .subcommand(
            Command::new(CMD_CITY)
                .about("Regions serving a city")
                .arg(Arg::new(ARG_CITY).help("City name").required(true)),
        )
        .subcommand(
            Command::new(CMD_CREATE)
                .about("Create a region")
                .arg(
                    Arg::new(ARG_CITY)
                        .short('c')
                        .long(ARG_CITY)
                        .help("City")
                        .required(true),
                )
                .arg(name_arg("Region name"))
                .arg(Arg::new(ARG_DESCRIPTION).short('d').long(ARG_DESCRIPTION)),
        )
        .subcommand(Command::new(CMD_INITIALIZE).about("Seed the default regions"))
}

#[must_use]
pub fn with_subcommands(command: Command) -> Command {
    command
        .subcommand(users())
        .subcommand(clients())
        .subcommand(specialties())
        .subcommand(regions())
}
