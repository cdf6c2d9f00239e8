use std::collections::VecDeque;
use std::io::{BufRead, Write};

use anyhow::Context;
use listing_core::{update, AppState, Effect, Msg, Operation, Prompt, MENU_ITEMS};
use listing_logging::{harvest_error, harvest_info};

/// Carries out one [`Operation`], writing progress and results to `out`.
pub trait OperationRunner {
    fn run(&mut self, operation: &Operation, out: &mut (dyn Write + Send)) -> anyhow::Result<()>;
}

/// Line-oriented menu loop: reads input, feeds [`update`], executes effects.
pub struct Shell<R, W, X> {
    input: R,
    output: W,
    runner: X,
    state: AppState,
}

impl<R: BufRead, W: Write + Send, X: OperationRunner> Shell<R, W, X> {
    pub fn new(input: R, output: W, runner: X) -> Self {
        Self {
            input,
            output,
            runner,
            state: AppState::new(),
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    #[cfg(test)]
    pub fn into_parts(self) -> (W, X) {
        (self.output, self.runner)
    }

    /// Runs until the user quits or input ends. Only terminal IO failures
    /// are returned; operation errors are reported and the menu comes back.
    pub fn run(&mut self) -> anyhow::Result<()> {
        let mut inbox = VecDeque::from([Msg::Started]);
        loop {
            while let Some(msg) = inbox.pop_front() {
                let (next, effects) = update(std::mem::take(&mut self.state), msg);
                self.state = next;
                for effect in effects {
                    if let Some(follow_up) = self.execute(effect)? {
                        inbox.push_back(follow_up);
                    }
                }
            }
            if self.state.is_closed() {
                return Ok(());
            }
            inbox.push_back(self.read_message()?);
        }
    }

    fn read_message(&mut self) -> anyhow::Result<Msg> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("failed to read from standard input")?;
        if read == 0 {
            harvest_info!("Input closed");
            return Ok(Msg::InputClosed);
        }
        let line = line.trim_end_matches(&['\r', '\n'][..]).to_string();
        Ok(self.state.message_for_line(line))
    }

    fn execute(&mut self, effect: Effect) -> anyhow::Result<Option<Msg>> {
        match effect {
            Effect::ShowMenu => {
                writeln!(self.output, "\nMenu:")?;
                for item in MENU_ITEMS {
                    writeln!(self.output, "{item}")?;
                }
                self.prompt(Prompt::Choice)?;
            }
            Effect::Prompt(prompt) => self.prompt(prompt)?,
            Effect::Suggest(skills) => {
                writeln!(self.output, "Did you mean: {}?", skills.join(", "))?;
            }
            Effect::Notice(text) => writeln!(self.output, "{text}")?,
            Effect::Run(operation) => {
                harvest_info!("Running {:?}", operation);
                let msg = match self.runner.run(&operation, &mut self.output) {
                    Ok(()) => Msg::OperationFinished,
                    Err(err) => {
                        harvest_error!("{:?} failed: {:#}", operation, err);
                        Msg::OperationFailed(format!("{err:#}"))
                    }
                };
                return Ok(Some(msg));
            }
            Effect::Quit => self.output.flush()?,
        }
        Ok(None)
    }

    fn prompt(&mut self, prompt: Prompt) -> anyhow::Result<()> {
        write!(self.output, "{}", prompt.text())?;
        self.output.flush().context("failed to write to standard output")
    }
}
