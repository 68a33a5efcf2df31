use super::prompt::Prompt;
use crate::api::ApiClient;
use crate::cli::globals::GlobalArgs;
use crate::features::clients::{client, ClientPayload};
use crate::features::users::UserPayload;
use anyhow::Result;
use std::io::{BufRead, Write};

#[derive(Debug)]
pub enum ClientsCommand {
    List,
    Get(i64),
    Search(String),
    Create {
        name: String,
        email: String,
        cpf: String,
        birth_date: String,
    },
    Deactivate(i64),
    Delete(i64),
}

/// # Errors
/// Returns an error if the request fails.
pub async fn execute(globals: &GlobalArgs, command: ClientsCommand) -> Result<()> {
    let api = globals.authenticated_client()?;
    run(&api, &mut Prompt::stdio(), command).await
}

/// # Errors
/// Returns an error if the request fails or the terminal closes.
pub async fn run<R: BufRead, W: Write>(
    api: &ApiClient,
    prompt: &mut Prompt<R, W>,
    command: ClientsCommand,
) -> Result<()> {
    match command {
        ClientsCommand::List => prompt.show(&client::list_clients(api).await?),
        ClientsCommand::Get(id) => prompt.show(&client::get_client(api, id).await?),
        ClientsCommand::Search(name) => prompt.show(&client::search_clients(api, &name).await?),
        ClientsCommand::Create {
            name,
            email,
            cpf,
            birth_date,
        } => {
            let password = prompt.ask_secret("Password")?;
            let payload = ClientPayload {
                cpf,
                birth_date,
                user: UserPayload {
                    name,
                    email,
                    password: Some(password),
                    access_level: None,
                },
                status: None,
            };
            prompt.show(&client::create_client(api, &payload).await?)
        }
        ClientsCommand::Deactivate(id) => {
            let updated = client::deactivate_client(api, id).await?;
            prompt.say(format!(
                "Client {id} is now {}.",
                updated.status.as_deref().unwrap_or("inactive")
            ))
        }
        ClientsCommand::Delete(id) => {
            client::delete_client(api, id).await?;
            prompt.say(format!("Client {id} deleted."))
        }
    }
}
