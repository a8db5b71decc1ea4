// End-to-end runs of the game loop with a scripted console and a fake
// server. No network and no terminal involved.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use mastermind_cli::api::GameApi;
use mastermind_cli::error::{ApiError, ProtocolError};
use mastermind_cli::game::{Outcome, Session, EXIT_START_FAILED};
use mastermind_cli::guess::Guess;
use mastermind_cli::protocol::{GameSession, GuessFeedback, GuessReply, ServerError};
use mastermind_cli::ui::LineConsole;

#[derive(Default)]
struct Log {
    creates: u32,
    guesses: Vec<(String, String)>,
    released: bool,
}

struct FakeApi {
    start: RefCell<Option<Result<GameSession, ApiError>>>,
    replies: RefCell<VecDeque<Result<GuessReply, ApiError>>>,
    log: Rc<RefCell<Log>>,
}

impl FakeApi {
    fn new(game_id: &str) -> Self {
        Self::starting_with(Ok(GameSession {
            game_id: game_id.to_string(),
        }))
    }

    fn starting_with(start: Result<GameSession, ApiError>) -> Self {
        FakeApi {
            start: RefCell::new(Some(start)),
            replies: RefCell::new(VecDeque::new()),
            log: Rc::default(),
        }
    }

    fn reply(self, reply: Result<GuessReply, ApiError>) -> Self {
        self.replies.borrow_mut().push_back(reply);
        self
    }

    fn feedback(self, black: u32, white: u32) -> Self {
        self.reply(Ok(GuessReply::Feedback(GuessFeedback { black, white })))
    }

    fn log(&self) -> Rc<RefCell<Log>> {
        Rc::clone(&self.log)
    }
}

impl GameApi for FakeApi {
    fn create_game(&self) -> Result<GameSession, ApiError> {
        self.log.borrow_mut().creates += 1;
        self.start
            .borrow_mut()
            .take()
            .expect("create_game called more than once")
    }

    fn submit_guess(&self, game_id: &str, guess: &Guess) -> Result<GuessReply, ApiError> {
        self.log
            .borrow_mut()
            .guesses
            .push((game_id.to_string(), guess.to_string()));
        self.replies
            .borrow_mut()
            .pop_front()
            .expect("unexpected guess submitted")
    }
}

impl Drop for FakeApi {
    fn drop(&mut self) {
        self.log.borrow_mut().released = true;
    }
}

fn play(api: FakeApi, input: &str) -> (Outcome, String) {
    let mut console = LineConsole::new(input.as_bytes(), Vec::new());
    let outcome = Session::new(api, &mut console).run();
    let output = String::from_utf8(console.into_output()).unwrap();
    (outcome, output)
}

#[test]
fn winning_on_first_attempt() {
    let api = FakeApi::new("abc123").feedback(4, 0);
    let log = api.log();

    let (outcome, output) = play(api, "1234\n");

    assert!(matches!(outcome, Outcome::Won { attempts: 1 }));
    assert_eq!(
        log.borrow().guesses,
        vec![("abc123".to_string(), "1234".to_string())]
    );
    assert!(output.contains("Your Game ID: abc123"));
    let feedback = output.find("Feedback: BBBB\n").unwrap();
    let victory = output.find("You cracked the code in 1 attempt!").unwrap();
    assert!(feedback < victory);
    assert!(!output.contains("Attempt 2"));
    assert!(log.borrow().released);
}

#[test]
fn exit_skips_the_network() {
    for input in ["exit\n", "EXIT\n", "  Exit  \n"] {
        let api = FakeApi::new("g1");
        let log = api.log();

        let (outcome, output) = play(api, input);

        assert!(matches!(outcome, Outcome::Exited), "{input:?}");
        assert!(log.borrow().guesses.is_empty());
        assert_eq!(log.borrow().creates, 1);
        assert!(output.contains("Exiting. See you next time!"));
        assert!(log.borrow().released);
    }
}

#[test]
fn invalid_guess_reprompts_same_attempt() {
    let api = FakeApi::new("g1");
    let log = api.log();

    let (outcome, output) = play(api, "12\n\n7777\nexit\n");

    assert!(matches!(outcome, Outcome::Exited));
    assert!(log.borrow().guesses.is_empty());
    assert_eq!(output.matches("Invalid guess").count(), 3);
    assert_eq!(output.matches("Attempt 1: Enter guess or 'exit': ").count(), 4);
    assert!(!output.contains("Attempt 2"));
}

#[test]
fn duplicate_digits_reach_the_server() {
    let api = FakeApi::new("g1").feedback(1, 0);
    let log = api.log();

    let (_, _) = play(api, "1122\nexit\n");

    assert_eq!(
        log.borrow().guesses,
        vec![("g1".to_string(), "1122".to_string())]
    );
}

#[test]
fn partial_feedback_keeps_playing() {
    let api = FakeApi::new("g1").feedback(2, 1).feedback(0, 0);

    let (outcome, output) = play(api, "1234\n5612\nexit\n");

    assert!(matches!(outcome, Outcome::Exited));
    assert!(output.contains("Feedback: BBW\n"));
    assert!(output.contains("Feedback: \n"));
    assert!(output.contains("Attempt 3: "));
}

#[test]
fn server_error_is_reported_and_counts_as_attempt() {
    let api = FakeApi::new("g1")
        .reply(Ok(GuessReply::Rejected(ServerError {
            message: "bad game id".into(),
        })))
        .feedback(4, 0);

    let (outcome, output) = play(api, "1234\n4321\n");

    assert!(output.contains("⚠️ bad game id"));
    assert!(matches!(outcome, Outcome::Won { attempts: 2 }));
    assert!(output.contains("You cracked the code in 2 attempts!"));
}

#[test]
fn transport_and_decode_failures_are_recovered() {
    let api = FakeApi::new("g1")
        .reply(Err(ProtocolError::UnreadableResponse.into()))
        .reply(Err(ApiError::Timeout(Duration::from_secs(10))));
    let log = api.log();

    let (outcome, output) = play(api, "1111\n2222\nexit\n");

    assert!(matches!(outcome, Outcome::Exited));
    assert_eq!(log.borrow().guesses.len(), 2);
    assert!(output.contains("Server returned an unreadable or unexpected response."));
    assert!(output.contains("request timed out after 10s"));
    assert!(output.contains("Attempt 3: "));
}

#[test]
fn start_failure_ends_before_any_prompt() {
    let api = FakeApi::starting_with(Err(ApiError::Timeout(Duration::from_secs(10))));
    let log = api.log();

    let (outcome, output) = play(api, "1234\n");

    assert!(matches!(outcome, Outcome::StartFailed(ApiError::Timeout(_))));
    assert_eq!(outcome.status(), EXIT_START_FAILED);
    assert!(output.contains("❌ Could not start game"));
    assert!(!output.contains("Attempt"));
    assert!(log.borrow().guesses.is_empty());
    assert!(log.borrow().released);
}

#[test]
fn closed_input_ends_the_game() {
    let api = FakeApi::new("g1");
    let log = api.log();

    let (outcome, output) = play(api, "");

    assert!(matches!(outcome, Outcome::InputClosed));
    assert_eq!(outcome.status(), 0);
    assert!(output.contains("Exiting. See you next time!"));
    assert!(log.borrow().released);
}
