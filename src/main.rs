// Entrypoint for the Mastermind CLI.
// - Keeps `main` small: build an API client and hand it to a session.
// - The session owns the client and releases it on every exit path.

use std::process::ExitCode;

use mastermind_cli::{api::ApiClient, game::Session, logging, ui::TerminalConsole};

fn main() -> anyhow::Result<ExitCode> {
    logging::init();

    // Base URL comes from `MASTERMIND_API_URL` or defaults to the public
    // server. See `config::Config::from_env`.
    let api = ApiClient::from_env()?;

    // Blocks until the code is cracked, the user exits or startup fails.
    let outcome = Session::new(api, TerminalConsole::new()).run();
    Ok(outcome.exit_code())
}
