use crate::cli::actions::{
    clients::ClientsCommand,
    lookups::{RegionsCommand, SpecialtiesCommand},
    reset, session,
    users::UsersCommand,
    Action,
};
use crate::cli::commands::{connection, records, session as session_cmd};
use crate::cli::globals::GlobalArgs;
use anyhow::{bail, Context, Result};
use clap::ArgMatches;
use std::path::PathBuf;

/// # Errors
/// Returns an error if required arguments are missing or inconsistent.
pub fn handler(matches: &ArgMatches) -> Result<Action> {
    let globals = global_args(matches)?;

    let (name, sub_m) = matches.subcommand().context("missing subcommand")?;
    let action = match name {
        session_cmd::CMD_RESET => Action::Reset(reset::Args {
            globals,
            email: optional(sub_m, session_cmd::ARG_EMAIL),
        }),
        session_cmd::CMD_LOGIN => Action::Login(session::LoginArgs {
            globals,
            email: optional(sub_m, session_cmd::ARG_EMAIL),
        }),
        session_cmd::CMD_LOGOUT => Action::Logout(globals),
        session_cmd::CMD_WHOAMI => Action::Whoami(globals),
        records::CMD_USERS => Action::Users(globals, users(sub_m)?),
        records::CMD_CLIENTS => Action::Clients(globals, clients(sub_m)?),
        records::CMD_SPECIALTIES => Action::Specialties(globals, specialties(sub_m)?),
        records::CMD_REGIONS => Action::Regions(globals, regions(sub_m)?),
        other => bail!("unknown command: {other}"),
    };

    Ok(action)
}

fn global_args(matches: &ArgMatches) -> Result<GlobalArgs> {
    let api_url = matches
        .get_one::<String>(connection::ARG_API_URL)
        .cloned()
        .context("missing required argument: --api-url")?;
    let timeout = matches
        .get_one::<u64>(connection::ARG_TIMEOUT)
        .copied()
        .unwrap_or(30);

    let globals = GlobalArgs::new(api_url).with_timeout_seconds(timeout);

    // fail on a bad URL before any prompt is shown
    globals.api_config()?;

    Ok(match matches.get_one::<PathBuf>(connection::ARG_SESSION_FILE) {
        Some(path) => globals.with_session_file(path.clone()),
        None => globals,
    })
}

fn optional(matches: &ArgMatches, id: &str) -> Option<String> {
    matches.get_one::<String>(id).cloned()
}

fn required(matches: &ArgMatches, id: &str) -> Result<String> {
    optional(matches, id).with_context(|| format!("missing required argument: {id}"))
}

fn id(matches: &ArgMatches) -> Result<i64> {
    matches
        .get_one::<i64>(records::ARG_ID)
        .copied()
        .context("missing required argument: id")
}

fn nested(matches: &ArgMatches) -> Result<(&str, &ArgMatches)> {
    matches.subcommand().context("missing subcommand")
}

fn users(matches: &ArgMatches) -> Result<UsersCommand> {
    let (name, sub_m) = nested(matches)?;
    Ok(match name {
        records::CMD_LIST => UsersCommand::List,
        records::CMD_GET => UsersCommand::Get(id(sub_m)?),
        records::CMD_SEARCH => UsersCommand::Search(required(sub_m, records::ARG_NAME)?),
        records::CMD_CREATE => UsersCommand::Create {
            name: required(sub_m, records::ARG_NAME)?,
            email: required(sub_m, records::ARG_EMAIL)?,
            access_level: optional(sub_m, records::ARG_ACCESS_LEVEL),
        },
        records::CMD_DELETE => UsersCommand::Delete(id(sub_m)?),
        other => bail!("unknown users command: {other}"),
    })
}

fn clients(matches: &ArgMatches) -> Result<ClientsCommand> {
    let (name, sub_m) = nested(matches)?;
    Ok(match name {
        records::CMD_LIST => ClientsCommand::List,
        records::CMD_GET => ClientsCommand::Get(id(sub_m)?),
        records::CMD_SEARCH => ClientsCommand::Search(required(sub_m, records::ARG_NAME)?),
        records::CMD_CREATE => ClientsCommand::Create {
            name: required(sub_m, records::ARG_NAME)?,
            email: required(sub_m, records::ARG_EMAIL)?,
            cpf: required(sub_m, records::ARG_CPF)?,
            birth_date: required(sub_m, records::ARG_BIRTH_DATE)?,
        },
        records::CMD_DEACTIVATE => ClientsCommand::Deactivate(id(sub_m)?),
        records::CMD_DELETE => ClientsCommand::Delete(id(sub_m)?),
        other => bail!("unknown clients command: {other}"),
    })
}

fn specialties(matches: &ArgMatches) -> Result<SpecialtiesCommand> {
    let (name, sub_m) = nested(matches)?;
    Ok(match name {
        records::CMD_LIST => SpecialtiesCommand::List {
            active: sub_m.get_flag(records::ARG_ACTIVE),
        },
        records::CMD_GET => SpecialtiesCommand::Get(id(sub_m)?),
        records::CMD_CREATE => SpecialtiesCommand::Create {
            name: required(sub_m, records::ARG_NAME)?,
            description: optional(sub_m, records::ARG_DESCRIPTION),
        },
        records::CMD_INITIALIZE => SpecialtiesCommand::Initialize,
        other => bail!("unknown specialties command: {other}"),
    })
}

fn regions(matches: &ArgMatches) -> Result<RegionsCommand> {
    let (name, sub_m) = nested(matches)?;
    Ok(match name {
        records::CMD_LIST => RegionsCommand::List {
            active: sub_m.get_flag(records::ARG_ACTIVE),
        },
        records::CMD_GET => RegionsCommand::Get(id(sub_m)?),
        records::CMD_CITY => RegionsCommand::City(required(sub_m, records::ARG_CITY)?),
        records::CMD_CREATE => RegionsCommand::Create {
            city: required(sub_m, records::ARG_CITY)?,
            name: required(sub_m, records::ARG_NAME)?,
            description: optional(sub_m, records::ARG_DESCRIPTION),
        },
        records::CMD_INITIALIZE => RegionsCommand::Initialize,
        other => bail!("unknown regions command: {other}"),
    })
}
