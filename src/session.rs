//! The generate → review → act cycle.
//!
//! Each cycle reads the staged diff, asks the provider for a message and hands
//! it to the [`InteractionLoop`]. Choosing "regenerate" starts a new cycle;
//! every other outcome ends the session.

use std::io::{BufRead, Write};

use tracing::{debug, info};

use crate::error::SessionError;
use crate::git::{CommitSink, DiffSource};
use crate::interaction::{Action, InteractionLoop};
use crate::provider::MessageProvider;
use crate::text::{Language, Text};

/// Wires the diff source, provider and commit sink together.
pub struct Session<'a, D: ?Sized, P: ?Sized, S: ?Sized> {
    source: &'a D,
    provider: &'a P,
    sink: &'a S,
    language: Language,
}

impl<'a, D, P, S> Session<'a, D, P, S>
where
    D: DiffSource + ?Sized,
    P: MessageProvider + ?Sized,
    S: CommitSink + ?Sized,
{
    pub fn new(source: &'a D, provider: &'a P, sink: &'a S, language: Language) -> Self {
        Self {
            source,
            provider,
            sink,
            language,
        }
    }

    /// Read the staged diff and generate one candidate message.
    pub async fn draft(&self) -> Result<String, SessionError> {
        let diff = self.source.diff()?;
        debug!("Requesting message for {} char diff", diff.chars().count());
        let message = self.provider.generate(&diff).await?;
        Ok(message)
    }

    /// Run cycles until the user commits or quits.
    ///
    /// Returns [`Action::Commit`] or [`Action::Quit`]. Diff and provider
    /// failures end the session with an error.
    pub async fn run<R, W>(&self, mut input: R, mut output: W) -> Result<Action, SessionError>
    where
        R: BufRead,
        W: Write,
    {
        let mut cycle = 0u32;
        loop {
            cycle += 1;
            writeln!(output, "{}", Text::Generating.get(self.language))?;
            output.flush()?;

            let message = self.draft().await?;

            let action = InteractionLoop::new(&mut input, &mut output, self.sink, self.language)
                .run(message)?;

            if action != Action::Regenerate {
                info!("Session ended with {:?} after {} cycle(s)", action, cycle);
                return Ok(action);
            }
            debug!("Regenerating message (cycle {})", cycle + 1);
        }
    }
}
