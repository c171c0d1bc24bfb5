//! Interactive chat REPL for weather-agent.
//!
//! Each line read is an independent query: there is no memory across turns,
//! and every query runs under the same fixed session id. Typing `exit` (any
//! case) quits before anything is sent.

mod input;

pub use input::{LineReader, ReadOutcome, ReadlineInput};

use anyhow::Result;
use colored::Colorize;
use std::io::{self, Write};
use tracing::debug;

use crate::agent::QueryProcessor;
use crate::config::Config;
use crate::constants::{DEFAULT_SESSION_ID, EXIT_COMMAND, INPUT_PROMPT, WELCOME_BANNER};
use crate::provider::Provider;
use crate::tools::ToolRegistry;

/// Runs the interactive chat REPL against the configured provider.
///
/// # Readline behavior
///
/// - **Ctrl+C** / **Ctrl+D**: exits cleanly with "goodbye."
/// - Readline history is persisted to `~/.cache/weather-agent/chat_history.txt`
pub async fn run_chat(config: Config) -> Result<()> {
    let provider = Provider::from_config(&config, ToolRegistry::with_builtins())?;
    debug!(
        provider = provider.kind().name(),
        model = provider.model(),
        "starting chat"
    );
    let processor = QueryProcessor::new(Box::new(provider));

    let history_path = Config::cache_dir()
        .ok()
        .map(|dir| dir.join(crate::constants::HISTORY_FILENAME));
    let mut input = ReadlineInput::open(history_path)?;

    let result = run_loop(&mut input, &mut io::stdout(), &processor, DEFAULT_SESSION_ID).await;
    input.save_history();
    result
}

/// Reads queries until `exit`, end of input, or interruption, printing
/// `Agent: <answer>` and a blank line after each one.
pub async fn run_loop(
    input: &mut dyn LineReader,
    out: &mut dyn Write,
    processor: &QueryProcessor,
    session_id: &str,
) -> Result<()> {
    writeln!(out, "{}", WELCOME_BANNER)?;

    loop {
        match input.read_line(INPUT_PROMPT) {
            Ok(ReadOutcome::Line(line)) => {
                if line.eq_ignore_ascii_case(EXIT_COMMAND) {
                    debug!("exit requested");
                    break;
                }

                let response = processor.process_query(&line, session_id).await;
                writeln!(out, "Agent: {}", response)?;
                writeln!(out)?;
                out.flush()?;
            }
            Ok(ReadOutcome::Eof) | Ok(ReadOutcome::Interrupted) => {
                writeln!(out, "{}", "goodbye.".dimmed())?;
                break;
            }
            Err(e) => {
                eprintln!("{} {}", "error:".red().bold(), e);
                break;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::tests::MockEngine;
    use std::collections::VecDeque;
    use std::rc::Rc;

    /// Replays fixed outcomes, then reports end of input.
    struct ScriptedInput {
        outcomes: VecDeque<Result<ReadOutcome>>,
        prompts: Vec<String>,
    }

    impl ScriptedInput {
        fn lines(lines: &[&str]) -> Self {
            Self::outcomes(
                lines
                    .iter()
                    .map(|l| Ok(ReadOutcome::Line(l.to_string())))
                    .collect(),
            )
        }

        fn outcomes(outcomes: Vec<Result<ReadOutcome>>) -> Self {
            Self {
                outcomes: outcomes.into(),
                prompts: Vec::new(),
            }
        }
    }

    impl LineReader for ScriptedInput {
        fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome> {
            self.prompts.push(prompt.to_string());
            self.outcomes.pop_front().unwrap_or(Ok(ReadOutcome::Eof))
        }
    }

    async fn run_script(
        input: &mut ScriptedInput,
        engine: MockEngine,
    ) -> (String, usize) {
        let seen = Rc::clone(&engine.seen);
        let processor = QueryProcessor::new(Box::new(engine));
        let mut out = Vec::new();
        run_loop(input, &mut out, &processor, DEFAULT_SESSION_ID)
            .await
            .unwrap();
        let calls = seen.borrow().len();
        (String::from_utf8(out).unwrap(), calls)
    }

    #[tokio::test]
    async fn test_exit_any_case_stops_without_query() {
        for word in ["exit", "Exit", "EXIT", "eXiT"] {
            let mut input = ScriptedInput::lines(&[word, "never sent"]);
            let (out, calls) = run_script(&mut input, MockEngine::weather()).await;
            assert_eq!(calls, 0, "{word} should not reach the engine");
            assert!(out.starts_with("Welcome to the Weather Agent! Type 'exit' to quit.\n"));
            assert!(!out.contains("Agent:"));
            assert_eq!(input.prompts, vec!["Enter your query: "]);
        }
    }

    #[tokio::test]
    async fn test_exit_requires_exact_match() {
        let mut input = ScriptedInput::lines(&[" exit", "exit!", "exit"]);
        let (_, calls) = run_script(&mut input, MockEngine::weather()).await;
        assert_eq!(calls, 2);
    }

    #[tokio::test]
    async fn test_prints_agent_answer_with_blank_line() {
        let mut input = ScriptedInput::lines(&["What's the weather in Paris?", "exit"]);
        let (out, calls) = run_script(&mut input, MockEngine::weather()).await;
        assert_eq!(calls, 1);
        assert!(out.contains("Agent: It's sunny and 25°C in Paris.\n\n"));
    }

    #[tokio::test]
    async fn test_empty_line_is_forwarded() {
        let engine = MockEngine::new(|state| {
            Ok(crate::engine::EngineReply::Conversation(state))
        });
        let seen = Rc::clone(&engine.seen);
        let mut input = ScriptedInput::lines(&["", "exit"]);
        let (out, _) = run_script(&mut input, engine).await;
        assert_eq!(seen.borrow()[0].messages[0].text(), "");
        assert!(out.contains("Agent: No response content found\n\n"));
    }

    #[tokio::test]
    async fn test_error_is_printed_and_loop_continues() {
        let mut input = ScriptedInput::lines(&["first", "second", "exit"]);
        let (out, calls) = run_script(&mut input, MockEngine::failing("timed out")).await;
        assert_eq!(calls, 2);
        assert_eq!(out.matches("Agent: Error: timed out\n\n").count(), 2);
        assert_eq!(input.prompts.len(), 3);
    }

    #[tokio::test]
    async fn test_eof_and_interrupt_end_loop() {
        let mut input = ScriptedInput::outcomes(vec![Ok(ReadOutcome::Eof)]);
        let (out, calls) = run_script(&mut input, MockEngine::weather()).await;
        assert_eq!(calls, 0);
        assert!(out.contains("goodbye."));

        let mut input = ScriptedInput::outcomes(vec![
            Ok(ReadOutcome::Line("hi".into())),
            Ok(ReadOutcome::Interrupted),
            Ok(ReadOutcome::Line("never".into())),
        ]);
        let (_, calls) = run_script(&mut input, MockEngine::weather()).await;
        assert_eq!(calls, 1);
    }

    #[tokio::test]
    async fn test_read_error_ends_loop() {
        let mut input = ScriptedInput::outcomes(vec![
            Err(anyhow::anyhow!("terminal went away")),
            Ok(ReadOutcome::Line("never".into())),
        ]);
        let (_, calls) = run_script(&mut input, MockEngine::weather()).await;
        assert_eq!(calls, 0);
    }
}
