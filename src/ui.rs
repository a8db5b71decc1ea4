// UI layer: the game loop talks to a `Console` and never touches stdin
// or stdout directly. `TerminalConsole` is what the binary uses; it
// prompts through `dialoguer`, colors messages and shows a spinner while
// a request is in flight. When stdin is not a terminal (piped input,
// scripts) it falls back to plain line-based I/O.

use console::Term;
use crossterm::style::{style, Stylize};
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, BufRead, IsTerminal, StdinLock, Stdout, Write};
use std::time::Duration;

/// How a message should stand out. Plain consoles ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Warning,
    Error,
    Success,
}

/// Line-oriented terminal I/O used by the game session.
pub trait Console {
    /// Show `prompt` and block for one line. `Ok(None)` means the input
    /// is closed and no more lines will come.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Print one message followed by a newline.
    fn print(&mut self, tone: Tone, text: &str);

    /// Run `work` while telling the user we are waiting on `message`.
    fn busy<T>(&mut self, _message: &str, work: impl FnOnce() -> T) -> T {
        work()
    }
}

impl<C: Console> Console for &mut C {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        (**self).read_line(prompt)
    }

    fn print(&mut self, tone: Tone, text: &str) {
        (**self).print(tone, text)
    }

    fn busy<T>(&mut self, message: &str, work: impl FnOnce() -> T) -> T {
        (**self).busy(message, work)
    }
}

/// Plain text console over any reader/writer pair.
pub struct LineConsole<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LineConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        LineConsole { input, output }
    }

    /// Everything written so far (useful when `W` is a `Vec<u8>`).
    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Console for LineConsole<R, W> {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}: ")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn print(&mut self, _tone: Tone, text: &str) {
        if let Err(e) = writeln!(self.output, "{text}") {
            tracing::warn!("failed to write to console: {e}");
        }
    }
}

/// Console bound to the process's stdin/stdout.
pub enum TerminalConsole {
    Interactive,
    Piped(LineConsole<StdinLock<'static>, Stdout>),
}

impl TerminalConsole {
    /// Pick interactive mode when stdin is a terminal, plain lines otherwise.
    pub fn new() -> Self {
        if io::stdin().is_terminal() {
            TerminalConsole::Interactive
        } else {
            TerminalConsole::Piped(LineConsole::new(io::stdin().lock(), io::stdout()))
        }
    }
}

impl Default for TerminalConsole {
    fn default() -> Self {
        Self::new()
    }
}

/// Prompts share stdout with the rest of the game text.
fn prompt_term() -> Term {
    Term::stdout()
}

impl Console for TerminalConsole {
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        match self {
            TerminalConsole::Interactive => {
                // `interact_text_on` draws on the given terminal; the plain
                // `interact_text` would put the prompt on stderr.
                let line: String = Input::new()
                    .with_prompt(prompt)
                    .allow_empty(true)
                    .interact_text_on(&prompt_term())?;
                Ok(Some(line))
            }
            TerminalConsole::Piped(console) => console.read_line(prompt),
        }
    }

    fn print(&mut self, tone: Tone, text: &str) {
        match self {
            TerminalConsole::Interactive => match tone {
                Tone::Plain => println!("{text}"),
                Tone::Warning => println!("{}", style(text).yellow()),
                Tone::Error => println!("{}", style(text).red()),
                Tone::Success => println!("{}", style(text).green().bold()),
            },
            TerminalConsole::Piped(console) => console.print(tone, text),
        }
    }

    fn busy<T>(&mut self, message: &str, work: impl FnOnce() -> T) -> T {
        if !matches!(self, TerminalConsole::Interactive) {
            return work();
        }
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));
        let result = work();
        spinner.finish_and_clear();
        result
    }
}
