pub mod clients;
pub mod lookups;
pub mod prompt;
pub mod reset;
pub mod session;
pub mod users;

// Internal "interpreter" for `Action`.
mod run;

use crate::cli::globals::GlobalArgs;

#[derive(Debug)]
pub enum Action {
    Reset(reset::Args),
    Login(session::LoginArgs),
    Logout(GlobalArgs),
    Whoami(GlobalArgs),
    Users(GlobalArgs, users::UsersCommand),
    Clients(GlobalArgs, clients::ClientsCommand),
    Specialties(GlobalArgs, lookups::SpecialtiesCommand),
    Regions(GlobalArgs, lookups::RegionsCommand),
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> anyhow::Result<()> {
        run::execute(self).await
    }
}
