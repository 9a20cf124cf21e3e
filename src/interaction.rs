//! Review loop for a generated commit message.
//!
//! Shows the candidate, then reads one choice per line:
//! `y` commit, `e` edit, `r` regenerate, `q` quit.

use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::git::CommitSink;
use crate::text::{Language, Text};

const OUTER_RULE_WIDTH: usize = 40;
const INNER_RULE_WIDTH: usize = 20;

/// Outcome of one user choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Commit,
    Edit,
    Regenerate,
    Quit,
}

impl Action {
    /// Map a trimmed, lowercased choice to an action.
    pub fn from_choice(choice: &str) -> Option<Self> {
        match choice {
            "y" => Some(Action::Commit),
            "e" => Some(Action::Edit),
            "r" => Some(Action::Regenerate),
            "q" => Some(Action::Quit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Presenting,
    AwaitingChoice,
    Editing,
    Committing,
    Done(Action),
}

/// Interactive review of one candidate message.
///
/// Owns the candidate for the duration of [`InteractionLoop::run`]; edits
/// replace it wholesale.
pub struct InteractionLoop<'a, R, W, S: ?Sized> {
    input: R,
    output: W,
    sink: &'a S,
    language: Language,
    message: String,
}

impl<'a, R, W, S> InteractionLoop<'a, R, W, S>
where
    R: BufRead,
    W: Write,
    S: CommitSink + ?Sized,
{
    pub fn new(input: R, output: W, sink: &'a S, language: Language) -> Self {
        Self {
            input,
            output,
            sink,
            language,
            message: String::new(),
        }
    }

    /// The current candidate message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Review `initial_message` until the user commits, regenerates or quits.
    ///
    /// Returns [`Action::Commit`] only after a successful commit. A failed
    /// commit is reported and the user is asked again with the same message.
    /// End of input at any prompt ends the loop with [`Action::Quit`].
    pub fn run(&mut self, initial_message: impl Into<String>) -> io::Result<Action> {
        self.message = initial_message.into();
        let mut state = State::Presenting;

        loop {
            state = match state {
                State::Presenting => {
                    self.present()?;
                    State::AwaitingChoice
                }
                State::AwaitingChoice => self.await_choice()?,
                State::Editing => self.edit()?,
                State::Committing => self.commit()?,
                State::Done(action) => {
                    debug!("Interaction finished with {:?}", action);
                    return Ok(action);
                }
            };
        }
    }

    fn present(&mut self) -> io::Result<()> {
        let outer = "=".repeat(OUTER_RULE_WIDTH);
        let inner = "-".repeat(INNER_RULE_WIDTH);
        writeln!(self.output)?;
        writeln!(self.output, "{}", outer)?;
        writeln!(self.output, "{}", Text::SuggestedMessage.get(self.language))?;
        writeln!(self.output, "{}", inner)?;
        writeln!(self.output, "{}", self.message)?;
        writeln!(self.output, "{}", inner)?;
        writeln!(self.output, "{}", outer)?;
        writeln!(self.output)?;
        Ok(())
    }

    fn await_choice(&mut self) -> io::Result<State> {
        write!(self.output, "{}", Text::Options.get(self.language))?;
        self.output.flush()?;

        let Some(line) = self.read_line()? else {
            return Ok(State::Done(Action::Quit));
        };

        let choice = line.trim().to_lowercase();
        let next = match Action::from_choice(&choice) {
            Some(Action::Commit) => State::Committing,
            Some(Action::Edit) => State::Editing,
            Some(Action::Regenerate) => State::Done(Action::Regenerate),
            Some(Action::Quit) => {
                writeln!(self.output, "{}", Text::Canceled.get(self.language))?;
                State::Done(Action::Quit)
            }
            None => {
                writeln!(self.output, "{}", Text::InvalidOption.get(self.language))?;
                State::AwaitingChoice
            }
        };
        Ok(next)
    }

    fn edit(&mut self) -> io::Result<State> {
        write!(self.output, "{}", Text::EnterNewMessage.get(self.language))?;
        self.output.flush()?;

        if let Some(line) = self.read_line()? {
            let replacement = line.trim();
            if !replacement.is_empty() {
                self.message = replacement.to_string();
            }
        }
        Ok(State::Presenting)
    }

    fn commit(&mut self) -> io::Result<State> {
        match self.sink.commit(&self.message) {
            Ok(git_output) => {
                write!(self.output, "{}", git_output)?;
                writeln!(self.output, "{}", Text::CommitSuccess.get(self.language))?;
                Ok(State::Done(Action::Commit))
            }
            Err(e) => {
                debug!("Commit failed: {}", e);
                writeln!(self.output, "{}{}", Text::CommitFailed.get(self.language), e)?;
                Ok(State::AwaitingChoice)
            }
        }
    }

    /// Read one line; `None` at end of input. Invalid UTF-8 is replaced
    /// rather than rejected.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Cursor;

    use crate::error::GitError;
    use crate::git::commit::MockCommitSink;

    fn run_with(input: &str, sink: &MockCommitSink, initial: &str) -> (Action, String, String) {
        let mut output = Vec::new();
        let mut lp = InteractionLoop::new(Cursor::new(input.to_string()), &mut output, sink, Language::English);
        let action = lp.run(initial).unwrap();
        let message = lp.message().to_string();
        drop(lp);
        (action, message, String::from_utf8(output).unwrap())
    }

    fn failing_commit() -> GitError {
        GitError::CommitFailed {
            status: "exit status: 1".to_string(),
            output: "nothing to commit".to_string(),
        }
    }

    #[test]
    fn test_action_from_choice() {
        assert_eq!(Action::from_choice("y"), Some(Action::Commit));
        assert_eq!(Action::from_choice("e"), Some(Action::Edit));
        assert_eq!(Action::from_choice("r"), Some(Action::Regenerate));
        assert_eq!(Action::from_choice("q"), Some(Action::Quit));
        assert_eq!(Action::from_choice("yes"), None);
        assert_eq!(Action::from_choice(""), None);
    }

    #[test]
    fn test_commit_success_terminates_with_commit() {
        let mut sink = MockCommitSink::new();
        sink.expect_commit()
            .withf(|m| m == "Add foo.txt")
            .times(1)
            .returning(|_| Ok("[main abc123] Add foo.txt\n".to_string()));

        let (action, message, output) = run_with("y\n", &sink, "Add foo.txt");
        assert_eq!(action, Action::Commit);
        assert_eq!(message, "Add foo.txt");
        assert!(output.contains("[main abc123] Add foo.txt"));
        assert!(output.contains("Commit successful!"));
    }

    #[test]
    fn test_choice_is_trimmed_and_lowercased() {
        let mut sink = MockCommitSink::new();
        sink.expect_commit().times(1).returning(|_| Ok(String::new()));

        let (action, _, _) = run_with("  Y  \n", &sink, "msg");
        assert_eq!(action, Action::Commit);
    }

    #[test]
    fn test_commit_failure_keeps_message_and_continues() {
        let mut sink = MockCommitSink::new();
        sink.expect_commit()
            .withf(|m| m == "original")
            .times(1)
            .returning(|_| Err(failing_commit()));

        // Fails once, then the user quits.
        let (action, message, output) = run_with("y\nq\n", &sink, "original");
        assert_eq!(action, Action::Quit);
        assert_eq!(message, "original");
        assert!(output.contains("Commit failed: "));
        assert!(output.contains("nothing to commit"));
        // The message is not re-presented after the failure.
        assert_eq!(output.matches("Suggested Commit Message:").count(), 1);
    }

    #[test]
    fn test_commit_retry_after_failure() {
        let mut sink = MockCommitSink::new();
        let mut seq = mockall::Sequence::new();
        sink.expect_commit()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(failing_commit()));
        sink.expect_commit()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(String::new()));

        let (action, _, _) = run_with("y\ny\n", &sink, "msg");
        assert_eq!(action, Action::Commit);
    }

    #[test]
    fn test_regenerate_does_not_commit() {
        let mut sink = MockCommitSink::new();
        sink.expect_commit().times(0);

        let (action, message, _) = run_with("r\n", &sink, "draft");
        assert_eq!(action, Action::Regenerate);
        assert_eq!(message, "draft");
    }

    #[test]
    fn test_quit_prints_cancel_notice() {
        let sink = MockCommitSink::new();
        let (action, _, output) = run_with("q\n", &sink, "draft");
        assert_eq!(action, Action::Quit);
        assert!(output.contains("Operation canceled."));
    }

    #[test]
    fn test_end_of_input_at_choice_is_quit() {
        let sink = MockCommitSink::new();
        let (action, _, output) = run_with("", &sink, "draft");
        assert_eq!(action, Action::Quit);
        assert!(!output.contains("Operation canceled."));
    }

    #[test]
    fn test_edit_with_empty_line_keeps_message() {
        let mut sink = MockCommitSink::new();
        sink.expect_commit()
            .withf(|m| m == "draft")
            .times(1)
            .returning(|_| Ok(String::new()));

        let (action, message, output) = run_with("e\n   \ny\n", &sink, "draft");
        assert_eq!(action, Action::Commit);
        assert_eq!(message, "draft");
        assert_eq!(output.matches("Suggested Commit Message:").count(), 2);
    }

    #[test]
    fn test_edit_replaces_message_exactly() {
        let mut sink = MockCommitSink::new();
        sink.expect_commit()
            .withf(|m| m == "fix: handle empty diff")
            .times(1)
            .returning(|_| Ok(String::new()));

        let (action, message, output) = run_with("e\nfix: handle empty diff\ny\n", &sink, "draft");
        assert_eq!(action, Action::Commit);
        assert_eq!(message, "fix: handle empty diff");
        assert!(output.contains("Enter new Commit Message: "));
    }

    #[test]
    fn test_end_of_input_while_editing_keeps_message_then_quits() {
        let sink = MockCommitSink::new();
        let (action, message, _) = run_with("e\n", &sink, "draft");
        assert_eq!(action, Action::Quit);
        assert_eq!(message, "draft");
    }

    #[test]
    fn test_invalid_option_reprompts() {
        let sink = MockCommitSink::new();
        let (action, message, output) = run_with("x\nyes\nq\n", &sink, "draft");
        assert_eq!(action, Action::Quit);
        assert_eq!(message, "draft");
        assert_eq!(output.matches("Invalid option, please try again.").count(), 2);
        assert_eq!(output.matches("Options: ").count(), 3);
    }

    #[test]
    fn test_non_utf8_choice_is_invalid_option() {
        let sink = MockCommitSink::new();
        let mut output = Vec::new();
        let input = Cursor::new(vec![0xff, 0xfe, b'\n', b'q', b'\n']);
        let mut lp = InteractionLoop::new(input, &mut output, &sink, Language::English);
        assert_eq!(lp.run("draft").unwrap(), Action::Quit);
        assert_eq!(lp.message(), "draft");
        drop(lp);
        let output = String::from_utf8(output).unwrap();
        assert_eq!(output.matches("Invalid option, please try again.").count(), 1);
    }

    #[test]
    fn test_non_utf8_edit_is_kept_lossily() {
        let mut sink = MockCommitSink::new();
        sink.expect_commit()
            .withf(|m| m == "fix \u{FFFD}")
            .times(1)
            .returning(|_| Ok(String::new()));
        let mut output = Vec::new();
        let mut input = b"e\nfix ".to_vec();
        input.extend_from_slice(&[0xff, b'\n', b'y', b'\n']);
        let mut lp = InteractionLoop::new(Cursor::new(input), &mut output, &sink, Language::English);
        assert_eq!(lp.run("draft").unwrap(), Action::Commit);
    }

    #[test]
    fn test_presentation_frame() {
        let sink = MockCommitSink::new();
        let (_, _, output) = run_with("q\n", &sink, "feat: add login");
        let expected = format!(
            "\n{}\nSuggested Commit Message:\n{}\nfeat: add login\n{}\n{}\n\n",
            "=".repeat(40),
            "-".repeat(20),
            "-".repeat(20),
            "=".repeat(40)
        );
        assert!(output.starts_with(&expected));
    }

    #[test]
    fn test_chinese_prompts() {
        let sink = MockCommitSink::new();
        let mut output = Vec::new();
        let mut lp = InteractionLoop::new(Cursor::new("q\n"), &mut output, &sink, Language::Chinese);
        assert_eq!(lp.run("草稿").unwrap(), Action::Quit);
        drop(lp);
        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("建议的 Commit Message:"));
        assert!(output.contains("操作已取消。"));
    }
}
