use crate::cli::actions::{clients, lookups, reset, session, users, Action};
use anyhow::Result;

/// Execute the provided action.
// This is the single dispatch point for all CLI actions.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::Reset(args) => reset::execute(args).await,
        Action::Login(args) => session::login(args).await,
        Action::Logout(globals) => session::logout(&globals),
        Action::Whoami(globals) => session::whoami(&globals),
        Action::Users(globals, command) => users::execute(&globals, command).await,
        Action::Clients(globals, command) => clients::execute(&globals, command).await,
        Action::Specialties(globals, command) => lookups::execute_specialties(&globals, command).await,
        Action::Regions(globals, command) => lookups::execute_regions(&globals, command).await,
    }
}
