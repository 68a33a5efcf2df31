//! Interactive password reset. The wizard only renders and collects input;
//! every transition is decided by `ResetFlow`.

use super::prompt::Prompt;
use crate::cli::globals::GlobalArgs;
use crate::features::reset::{
    HttpResetService, Phase, ResetError, ResetFlow, ResetService, StepIndicator,
};
use anyhow::Result;
use std::io::{BufRead, Write};
use tracing::debug;

/// Typed at the code prompt to start over with another email.
pub const RESTART_KEYWORD: &str = "restart";

#[derive(Debug)]
pub struct Args {
    pub globals: GlobalArgs,
    pub email: Option<String>,
}

/// # Errors
/// Returns an error if the client cannot be configured or the terminal closes.
pub async fn execute(args: Args) -> Result<()> {
    let api = args.globals.api_client()?;
    let flow = ResetFlow::new(HttpResetService::new(api)).with_timeout(args.globals.timeout);
    let mut prompt = Prompt::stdio();
    run_wizard(&flow, &mut prompt, args.email).await
}

/// Drives `flow` to completion, re-prompting after every refused step.
///
/// # Errors
/// Returns an error only when input or output fails; flow errors are shown and retried.
pub async fn run_wizard<S, R, W>(
    flow: &ResetFlow<S>,
    prompt: &mut Prompt<R, W>,
    email: Option<String>,
) -> Result<()>
where
    S: ResetService,
    R: BufRead,
    W: Write,
{
    let mut email = email;

    loop {
        let phase = flow.phase();
        prompt.say(render_progress(&flow.progress()))?;

        let result = match phase {
            Phase::RequestCode => {
                let value = prompt.value_or_ask(email.take(), "Email")?;
                flow.request_code(&value).await
            }
            Phase::VerifyCode => {
                prompt.say(format!(
                    "Enter the 6-digit code sent to {} (or '{RESTART_KEYWORD}' to change the email).",
                    flow.email().unwrap_or_default()
                ))?;
                let code = prompt.ask("Code")?;
                if code.trim().eq_ignore_ascii_case(RESTART_KEYWORD) {
                    flow.reset();
                    continue;
                }
                flow.verify_code(&code).await
            }
            Phase::SetPassword => {
                let password = prompt.ask_secret("New password")?;
                let confirmation = prompt.ask_secret("Confirm password")?;
                flow.set_new_password(password, confirmation).await
            }
            Phase::Complete => {
                prompt.say("Password updated. You can now log in with the new password.")?;
                return Ok(());
            }
        };

        match result {
            Ok(outcome) => debug!(?outcome, "reset step submitted"),
            Err(err) => prompt.say(format!("Error: {}", error_text(&err)))?,
        }
    }
}

fn error_text(err: &ResetError) -> String {
    match err {
        ResetError::Service(api) => api.user_message().to_string(),
        other => other.to_string(),
    }
}

/// One-line step indicator, e.g. `[1 Email] > [2 Code] >  3 New password`.
#[must_use]
pub fn render_progress(steps: &[StepIndicator]) -> String {
    steps
        .iter()
        .map(|step| {
            if step.active {
                format!("[{} {}]", step.step, step.label)
            } else {
                format!(" {} {}", step.step, step.label)
            }
        })
        .collect::<Vec<_>>()
        .join(" > ")
}
