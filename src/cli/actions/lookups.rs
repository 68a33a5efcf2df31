use super::prompt::Prompt;
use crate::api::ApiClient;
use crate::cli::globals::GlobalArgs;
use crate::features::lookups::{regions, specialties, Region, Specialty};
use anyhow::Result;
use std::io::{BufRead, Write};

#[derive(Debug)]
pub enum SpecialtiesCommand {
    List { active: bool },
    Get(i64),
    Create {
        name: String,
        description: Option<String>,
    },
    Initialize,
}

#[derive(Debug)]
pub enum RegionsCommand {
    List { active: bool },
    Get(i64),
    City(String),
    Create {
        city: String,
        name: String,
        description: Option<String>,
    },
    Initialize,
}

/// # Errors
/// Returns an error if the request fails.
pub async fn execute_specialties(globals: &GlobalArgs, command: SpecialtiesCommand) -> Result<()> {
    let api = globals.authenticated_client()?;
    run_specialties(&api, &mut Prompt::stdio(), command).await
}

/// # Errors
/// Returns an error if the request fails.
pub async fn execute_regions(globals: &GlobalArgs, command: RegionsCommand) -> Result<()> {
    let api = globals.authenticated_client()?;
    run_regions(&api, &mut Prompt::stdio(), command).await
}

/// # Errors
/// Returns an error if the request fails.
pub async fn run_specialties<R: BufRead, W: Write>(
    api: &ApiClient,
    prompt: &mut Prompt<R, W>,
    command: SpecialtiesCommand,
) -> Result<()> {
    match command {
        SpecialtiesCommand::List { active: true } => {
            prompt.show(&specialties::list_active_specialties(api).await?)
        }
        SpecialtiesCommand::List { active: false } => {
            prompt.show(&specialties::list_specialties(api).await?)
        }
        SpecialtiesCommand::Get(id) => prompt.show(&specialties::get_specialty(api, id).await?),
        SpecialtiesCommand::Create { name, description } => {
            let specialty = Specialty::new(name, description);
            prompt.show(&specialties::create_specialty(api, &specialty).await?)
        }
        SpecialtiesCommand::Initialize => {
            prompt.say(specialties::initialize_specialties(api).await?)
        }
    }
}

/// # Errors
/// Returns an error if the request fails.
pub async fn run_regions<R: BufRead, W: Write>(
    api: &ApiClient,
    prompt: &mut Prompt<R, W>,
    command: RegionsCommand,
) -> Result<()> {
    match command {
        RegionsCommand::List { active: true } => {
            prompt.show(&regions::list_active_regions(api).await?)
        }
        RegionsCommand::List { active: false } => prompt.show(&regions::list_regions(api).await?),
        RegionsCommand::Get(id) => prompt.show(&regions::get_region(api, id).await?),
        RegionsCommand::City(city) => prompt.show(&regions::regions_by_city(api, &city).await?),
        RegionsCommand::Create {
            city,
            name,
            description,
        } => {
            let region = Region::new(city, name, description);
            prompt.show(&regions::create_region(api, &region).await?)
        }
        RegionsCommand::Initialize => prompt.say(regions::initialize_regions(api).await?),
    }
}
