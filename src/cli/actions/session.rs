use super::prompt::Prompt;
use crate::api::ApiClient;
use crate::cli::globals::GlobalArgs;
use crate::features::auth::{AuthContext, Session, SessionStore};
use anyhow::Result;
use std::io::{BufRead, Write};

#[derive(Debug)]
pub struct LoginArgs {
    pub globals: GlobalArgs,
    pub email: Option<String>,
}

/// # Errors
/// Returns an error if login fails or the session cannot be stored.
pub async fn login(args: LoginArgs) -> Result<()> {
    let api = args.globals.api_client()?;
    let auth = args.globals.auth_context()?;
    let mut prompt = Prompt::stdio();
    run_login(&auth, &api, &mut prompt, args.email).await
}

/// # Errors
/// Returns an error if login fails or the session cannot be stored.
pub async fn run_login<S, R, W>(
    auth: &AuthContext<S>,
    api: &ApiClient,
    prompt: &mut Prompt<R, W>,
    email: Option<String>,
) -> Result<()>
where
    S: SessionStore,
    R: BufRead,
    W: Write,
{
    let email = prompt.value_or_ask(email, "Email")?;
    let password = prompt.ask_secret("Password")?;
    let session = auth.login(api, &email, &password).await?;
    prompt.say(format!("Logged in as {}.", session.display_name()))
}

/// # Errors
/// Returns an error if the session file cannot be removed.
pub fn logout(globals: &GlobalArgs) -> Result<()> {
    let auth = globals.auth_context()?;
    let was_logged_in = auth.is_authenticated();
    auth.logout()?;
    if was_logged_in {
        println!("Logged out.");
    } else {
        println!("No active session.");
    }
    Ok(())
}

/// # Errors
/// Returns an error if the session file cannot be read.
pub fn whoami(globals: &GlobalArgs) -> Result<()> {
    let auth = globals.auth_context()?;
    match auth.session() {
        Some(session) => println!("{}", describe(&session)),
        None => println!("Not logged in."),
    }
    Ok(())
}

fn describe(session: &Session) -> String {
    let mut line = format!("{} <{}>", session.display_name(), session.email);
    if let Some(kind) = &session.kind {
        line.push_str(&format!(" ({kind})"));
    }
    if let Some(id) = session.user_id {
        line.push_str(&format!(" id={id}"));
    }
    line
}
