// Game session: start one remote game, then read guesses until the code
// is cracked or the user leaves. All scoring happens on the server; this
// side only validates input, forwards guesses and renders the feedback.

use std::process::ExitCode;

use crate::api::GameApi;
use crate::error::ApiError;
use crate::guess::Guess;
use crate::protocol::{GameSession, GuessReply};
use crate::ui::{Console, Tone};

/// Exit status when no game could be started.
pub const EXIT_START_FAILED: u8 = 2;

const FAREWELL: &str = "👋 Exiting. See you next time!";
const INVALID_GUESS: &str = "⚠️ Invalid guess. Use exactly 4 digits from 1–6.";

/// What one line of user input means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Exit,
    Guess(Guess),
    Invalid,
}

impl Command {
    /// Surrounding whitespace is ignored and `exit` matches in any case.
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.eq_ignore_ascii_case("exit") {
            return Command::Exit;
        }
        match Guess::parse(line) {
            Some(guess) => Command::Guess(guess),
            None => Command::Invalid,
        }
    }
}

/// How a session ended.
#[derive(Debug)]
pub enum Outcome {
    /// Four blacks on attempt `attempts`.
    Won { attempts: u32 },
    /// The user typed `exit`.
    Exited,
    /// Standard input closed (or failed) before the game finished.
    InputClosed,
    /// The create-game call failed; nothing was played.
    StartFailed(ApiError),
}

impl Outcome {
    /// Process exit status: 0 unless the game never started.
    pub fn status(&self) -> u8 {
        match self {
            Outcome::StartFailed(_) => EXIT_START_FAILED,
            _ => 0,
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.status())
    }
}

/// Owns the server client and the console for the lifetime of one game.
pub struct Session<A: GameApi, C: Console> {
    api: A,
    console: C,
}

impl<A: GameApi, C: Console> Session<A, C> {
    pub fn new(api: A, console: C) -> Self {
        Session { api, console }
    }

    /// Play until a terminal state is reached. The API client is released
    /// before returning, whichever way the game ended.
    pub fn run(mut self) -> Outcome {
        let outcome = self.play();
        tracing::debug!(?outcome, "session finished");
        let Session { api, .. } = self;
        drop(api);
        outcome
    }

    fn play(&mut self) -> Outcome {
        let api = &self.api;
        let game = match self.console.busy("Starting a new game...", || api.create_game()) {
            Ok(game) => game,
            Err(e) => {
                tracing::debug!("create game failed: {e:?}");
                self.console
                    .print(Tone::Error, &format!("❌ Could not start game: {e}"));
                return Outcome::StartFailed(e);
            }
        };
        tracing::info!(game_id = %game.game_id, "game started");
        self.print_banner(&game);

        let mut attempt: u32 = 1;
        loop {
            let prompt = format!("Attempt {attempt}: Enter guess or 'exit'");
            let line = match self.console.read_line(&prompt) {
                Ok(Some(line)) => line,
                Ok(None) => {
                    self.console.print(Tone::Plain, FAREWELL);
                    return Outcome::InputClosed;
                }
                Err(e) => {
                    tracing::debug!("failed to read input: {e}");
                    self.console.print(Tone::Plain, FAREWELL);
                    return Outcome::InputClosed;
                }
            };

            let guess = match Command::parse(&line) {
                Command::Exit => {
                    self.console.print(Tone::Plain, FAREWELL);
                    return Outcome::Exited;
                }
                Command::Invalid => {
                    self.console.print(Tone::Warning, INVALID_GUESS);
                    continue;
                }
                Command::Guess(guess) => guess,
            };

            if self.submit(&game, attempt, &guess) {
                return Outcome::Won { attempts: attempt };
            }
            attempt += 1;
        }
    }

    /// Send one guess and report the result. Returns true when it cracked
    /// the code; every failure is reported and the game carries on.
    fn submit(&mut self, game: &GameSession, attempt: u32, guess: &Guess) -> bool {
        let api = &self.api;
        let reply = self
            .console
            .busy("Checking guess...", || api.submit_guess(&game.game_id, guess));

        match reply {
            Ok(GuessReply::Feedback(feedback)) => {
                tracing::debug!(attempt, %guess, ?feedback, "guess scored");
                self.console
                    .print(Tone::Plain, &format!("Feedback: {}", feedback.pegs()));
                self.console.print(Tone::Plain, "");
                if feedback.is_solved() {
                    let noun = if attempt == 1 { "attempt" } else { "attempts" };
                    self.console.print(
                        Tone::Success,
                        &format!("🎉 You cracked the code in {attempt} {noun}!"),
                    );
                    return true;
                }
            }
            Ok(GuessReply::Rejected(err)) => {
                self.console
                    .print(Tone::Warning, &format!("⚠️ {}", err.message));
            }
            Err(e) => {
                tracing::debug!(attempt, "guess failed: {e:?}");
                self.console.print(Tone::Error, &e.to_string());
            }
        }
        false
    }

    fn print_banner(&mut self, game: &GameSession) {
        let c = &mut self.console;
        c.print(Tone::Plain, "");
        c.print(
            Tone::Success,
            &format!("🎮 Game started! Your Game ID: {}", game.game_id),
        );
        c.print(Tone::Plain, "");
        c.print(
            Tone::Plain,
            "Guess the 4-digit code. Digits range from 1 to 6 and must be unique.",
        );
        c.print(Tone::Plain, "");
        c.print(Tone::Plain, "You have unlimited attempts!");
        c.print(Tone::Plain, "");
        c.print(Tone::Plain, "🎯 Feedback Guide:");
        c.print(Tone::Plain, "B = Correct digit in the correct position");
        c.print(Tone::Plain, "W = Correct digit but in the wrong position");
        c.print(Tone::Plain, "");
        c.print(
            Tone::Plain,
            "Example: If the code is 1234 and you guess 1243, the feedback will be: BBWW",
        );
        c.print(Tone::Plain, "Type 'exit' at any time to quit the game.");
        c.print(Tone::Plain, "");
    }
}
