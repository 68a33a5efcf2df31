use super::prompt::Prompt;
use crate::api::ApiClient;
use crate::cli::globals::GlobalArgs;
use crate::features::users::{client, UserPayload};
use anyhow::Result;
use std::io::{BufRead, Write};

#[derive(Debug)]
pub enum UsersCommand {
    List,
    Get(i64),
    Search(String),
    Create {
        name: String,
        email: String,
        access_level: Option<String>,
    },
    Delete(i64),
}

/// # Errors
/// Returns an error if the request fails.
pub async fn execute(globals: &GlobalArgs, command: UsersCommand) -> Result<()> {
    let api = globals.authenticated_client()?;
    run(&api, &mut Prompt::stdio(), command).await
}

/// # Errors
/// Returns an error if the request fails or the terminal closes.
pub async fn run<R: BufRead, W: Write>(
    api: &ApiClient,
    prompt: &mut Prompt<R, W>,
    command: UsersCommand,
) -> Result<()> {
    match command {
        UsersCommand::List => prompt.show(&client::list_users(api).await?),
        UsersCommand::Get(id) => prompt.show(&client::get_user(api, id).await?),
        UsersCommand::Search(name) => prompt.show(&client::search_users(api, &name).await?),
        UsersCommand::Create {
            name,
            email,
            access_level,
        } => {
            let password = prompt.ask_secret("Password")?;
            let payload = UserPayload {
                name,
                email,
                password: Some(password),
                access_level,
            };
            prompt.show(&client::create_user(api, &payload).await?)
        }
        UsersCommand::Delete(id) => {
            client::delete_user(api, id).await?;
            prompt.say(format!("User {id} deleted."))
        }
    }
}
