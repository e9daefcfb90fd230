//! Terminal audience over any async line reader and writer.
//!
//! The REPL and the audience adapters share one `Console` so that buffered
//! stdin is read from a single place.

use async_trait::async_trait;
use std::io;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stdout};
use tokio::sync::Mutex;

use crate::domain::audience::EventCandidate;
use crate::ports::{AudienceError, SuggestionSource, VoteCollector, VoteOutcome};

/// Words that end suggestion intake, compared case-insensitively.
const END_SENTINELS: &[&str] = &["end", "fin", "stop", "exit"];

/// Line-oriented terminal.
pub struct Console<R, W> {
    reader: R,
    writer: W,
}

pub type StdConsole = Console<BufReader<Stdin>, Stdout>;

pub type SharedConsole<R, W> = Arc<Mutex<Console<R, W>>>;

impl StdConsole {
    pub fn stdio() -> Self {
        Console::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
    }
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn shared(self) -> SharedConsole<R, W> {
        Arc::new(Mutex::new(self))
    }

    /// Writes text as is and flushes.
    pub async fn write(&mut self, text: &str) -> io::Result<()> {
        self.writer.write_all(text.as_bytes()).await?;
        self.writer.flush().await
    }

    pub async fn say(&mut self, line: &str) -> io::Result<()> {
        self.write(&format!("{}\n", line)).await
    }

    /// Prints `prompt` and reads one line. `None` on end of input.
    ///
    /// Invalid UTF-8 is replaced with U+FFFD instead of failing the read.
    pub async fn prompt(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.write(prompt).await?;

        let mut line = Vec::new();
        if self.reader.read_until(b'\n', &mut line).await? == 0 {
            return Ok(None);
        }
        Ok(Some(String::from_utf8_lossy(&line).trim().to_string()))
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }
}

/// Collects suggestions typed one per line.
pub struct ConsoleSuggestionSource<R, W> {
    console: SharedConsole<R, W>,
}

impl<R, W> ConsoleSuggestionSource<R, W> {
    pub fn new(console: SharedConsole<R, W>) -> Self {
        Self { console }
    }
}

#[async_trait]
impl<R, W> SuggestionSource for ConsoleSuggestionSource<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn collect(&self, max: usize) -> Result<Vec<String>, AudienceError> {
        let mut console = self.console.lock().await;

        console.say("").await?;
        console.say("=== AUDIENCE PARTICIPATION ===").await?;
        console
            .say(&format!(
                "Suggest disruptive events to help Mme Dubois! Up to {} suggestions.",
                max
            ))
            .await?;
        console.say("Type 'end' (or an empty line) to finish.").await?;

        let mut suggestions = Vec::new();
        while suggestions.len() < max {
            let prompt = format!("Suggestion {}: ", suggestions.len() + 1);
            let Some(line) = console.prompt(&prompt).await? else {
                break;
            };
            if line.is_empty() || END_SENTINELS.contains(&line.to_lowercase().as_str()) {
                break;
            }
            suggestions.push(line);
        }

        console
            .say(&format!("{} suggestion(s) collected.", suggestions.len()))
            .await?;
        Ok(suggestions)
    }
}

/// Single voter at the terminal.
pub struct ConsoleVoteCollector<R, W> {
    console: SharedConsole<R, W>,
}

impl<R, W> ConsoleVoteCollector<R, W> {
    pub fn new(console: SharedConsole<R, W>) -> Self {
        Self { console }
    }
}

#[async_trait]
impl<R, W> VoteCollector for ConsoleVoteCollector<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn conduct(&self, candidates: &[EventCandidate]) -> Result<VoteOutcome, AudienceError> {
        if candidates.is_empty() {
            return Err(AudienceError::NoCandidates);
        }

        let mut console = self.console.lock().await;
        console.say("").await?;
        console.say("=== VOTE - pick the event that happens next ===").await?;
        for (i, candidate) in candidates.iter().enumerate() {
            console
                .say(&format!("{}. {}\n   -> {}", i + 1, candidate.label, candidate.description))
                .await?;
        }

        let prompt = format!("Your vote (1-{}): ", candidates.len());
        loop {
            let Some(choice) = console.prompt(&prompt).await? else {
                console.say("Vote cancelled, picking the first event.").await?;
                return Ok(VoteOutcome::new(0, 0));
            };

            match choice.parse::<usize>() {
                Ok(n) if (1..=candidates.len()).contains(&n) => {
                    console
                        .say(&format!("Selected: {}", candidates[n - 1].label))
                        .await?;
                    return Ok(VoteOutcome::new(n - 1, 1));
                }
                _ => {
                    console
                        .say(&format!(
                            "Invalid choice. Enter a number between 1 and {}.",
                            candidates.len()
                        ))
                        .await?;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestConsole = Console<&'static [u8], Vec<u8>>;

    fn console(input: &'static str) -> SharedConsole<&'static [u8], Vec<u8>> {
        TestConsole::new(input.as_bytes(), Vec::new()).shared()
    }

    async fn output(console: &SharedConsole<&'static [u8], Vec<u8>>) -> String {
        String::from_utf8(console.lock().await.writer().clone()).unwrap()
    }

    fn candidates() -> Vec<EventCandidate> {
        vec![
            EventCandidate::new("Dog", "Barks"),
            EventCandidate::new("Doorbell", "Rings"),
            EventCandidate::new("Cough", "Needs water"),
        ]
    }

    #[tokio::test]
    async fn invalid_utf8_line_does_not_end_input() {
        let mut console = TestConsole::new(b"\xff\xfe hello\nstatus\n", Vec::new());

        let first = console.prompt("> ").await.unwrap().unwrap();
        assert!(first.ends_with("hello"));
        assert!(first.contains('\u{FFFD}'));

        assert_eq!(console.prompt("> ").await.unwrap().as_deref(), Some("status"));
        assert_eq!(console.prompt("> ").await.unwrap(), None);
    }

    #[tokio::test]
    async fn suggestions_stop_at_sentinel() {
        let console = console("the dog barks\n  the kettle  \nFIN\nignored\n");
        let source = ConsoleSuggestionSource::new(console.clone());

        let suggestions = source.collect(10).await.unwrap();

        assert_eq!(suggestions, vec!["the dog barks", "the kettle"]);
        assert!(output(&console).await.contains("2 suggestion(s) collected."));
    }

    #[tokio::test]
    async fn suggestions_stop_at_empty_line_and_eof() {
        let source = ConsoleSuggestionSource::new(console("one\n\ntwo\n"));
        assert_eq!(source.collect(10).await.unwrap(), vec!["one"]);

        let source = ConsoleSuggestionSource::new(console("one\ntwo"));
        assert_eq!(source.collect(10).await.unwrap(), vec!["one", "two"]);
    }

    #[tokio::test]
    async fn suggestions_stop_at_limit() {
        let source = ConsoleSuggestionSource::new(console("a\nb\nc\nd\n"));
        assert_eq!(source.collect(2).await.unwrap(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn vote_reprompts_on_invalid_choice() {
        let console = console("zero\n7\n2\n");
        let voter = ConsoleVoteCollector::new(console.clone());

        let outcome = voter.conduct(&candidates()).await.unwrap();

        assert_eq!(outcome, VoteOutcome::new(1, 1));
        let out = output(&console).await;
        assert_eq!(out.matches("Invalid choice").count(), 2);
        assert!(out.contains("1. Dog\n   -> Barks"));
        assert!(out.contains("Selected: Doorbell"));
    }

    #[tokio::test]
    async fn vote_defaults_to_first_on_eof() {
        let voter = ConsoleVoteCollector::new(console("nope\n"));

        let outcome = voter.conduct(&candidates()).await.unwrap();

        assert_eq!(outcome, VoteOutcome::new(0, 0));
    }

    #[tokio::test]
    async fn vote_without_candidates_fails() {
        let voter = ConsoleVoteCollector::new(console("1\n"));
        assert_eq!(voter.conduct(&[]).await, Err(AudienceError::NoCandidates));
    }
}
