//! Command execution for the REPL and script runner.
//!
//! Each input line is parsed into a [`Command`], checked against the route
//! gate, and run against the gateway or the suggestion pipeline.

use crate::formatter::{
    format_recent_searches, format_search_result, format_session, format_suggestions,
};
use crate::gateway::AuthGateway;
use crate::pipeline::{SEARCH_FAILED, SubmitOutcome, SuggestionPipeline};
use crate::route::{Route, Screen, resolve_route};
use std::sync::Arc;

pub const HELP: &str = "\
Commands:
  login <username> <password>   start a session
  logout                        end the session
  whoami                        show the current user
  type <text>                   type into the search box and show suggestions
  search <word>                 look a word up
  pick <n|word>                 search a suggestion
  history [n]                   show recent searches, or search entry n again
  help                          show this help";

#[derive(Debug, thiserror::Error)]
pub enum ExecutorError {
    #[error("Unknown command: {0}. Type 'help' for a list of commands.")]
    UnknownCommand(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Please log in first.")]
    NotAuthenticated,

    #[error("Still checking the session, try again.")]
    Loading,

    #[error("{0}")]
    Login(String),

    #[error("Logout failed.")]
    Logout,

    #[error("{0}")]
    Search(String),

    #[error("No suggestion {0}.")]
    NoSuggestion(String),

    #[error("No recent search {0}.")]
    NoRecentSearch(usize),
}

/// Where `pick` takes its word from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickTarget {
    /// 1-based position in the suggestion list.
    Index(usize),
    Word(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login { username: String, password: String },
    Logout,
    WhoAmI,
    Type(String),
    Search(String),
    Pick(PickTarget),
    History,
    /// Searches the n-th recent search (1-based) again.
    Recent(usize),
    Help,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, ExecutorError> {
        let line = line.trim();
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        match name.to_lowercase().as_str() {
            "login" => {
                let mut parts = rest.split_whitespace();
                match (parts.next(), parts.next(), parts.next()) {
                    (Some(username), Some(password), None) => Ok(Command::Login {
                        username: username.to_string(),
                        password: password.to_string(),
                    }),
                    _ => Err(ExecutorError::Usage("login <username> <password>")),
                }
            }
            "logout" => Ok(Command::Logout),
            "whoami" => Ok(Command::WhoAmI),
            "type" => Ok(Command::Type(rest.to_string())),
            "search" if !rest.is_empty() => Ok(Command::Search(rest.to_string())),
            "search" => Err(ExecutorError::Usage("search <word>")),
            "pick" if rest.is_empty() => Err(ExecutorError::Usage("pick <n|word>")),
            "pick" => Ok(Command::Pick(match rest.parse::<usize>() {
                Ok(n) => PickTarget::Index(n),
                Err(_) => PickTarget::Word(rest.to_string()),
            })),
            "history" if rest.is_empty() => Ok(Command::History),
            "history" => rest
                .parse::<usize>()
                .map(Command::Recent)
                .map_err(|_| ExecutorError::Usage("history [n]")),
            "help" => Ok(Command::Help),
            _ => Err(ExecutorError::UnknownCommand(name.to_string())),
        }
    }
}

/// Result of executing a command.
#[derive(Debug)]
pub struct ExecutionResult {
    /// Formatted output string for display.
    pub output: String,
    /// Whether execution was successful.
    pub success: bool,
}

impl ExecutionResult {
    fn ok(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            success: true,
        }
    }
}

pub struct CommandExecutor {
    gateway: Arc<AuthGateway>,
    pipeline: SuggestionPipeline,
}

impl CommandExecutor {
    pub fn new(pipeline: SuggestionPipeline) -> Self {
        Self {
            gateway: Arc::clone(pipeline.gateway()),
            pipeline,
        }
    }

    pub fn pipeline(&self) -> &SuggestionPipeline {
        &self.pipeline
    }

    /// Execute a line of input.
    pub async fn execute_line(&mut self, line: &str) -> Result<ExecutionResult, ExecutorError> {
        let command = Command::parse(line)?;
        self.execute(command).await
    }

    pub async fn execute(&mut self, command: Command) -> Result<ExecutionResult, ExecutorError> {
        match command {
            Command::Help => Ok(ExecutionResult::ok(HELP)),
            Command::WhoAmI => Ok(ExecutionResult::ok(format_session(
                &self.gateway.session().await,
            ))),
            Command::Login { username, password } => self.login(&username, &password).await,
            Command::Logout => {
                if self.gateway.logout().await {
                    Ok(ExecutionResult::ok("Logged out."))
                } else {
                    Err(ExecutorError::Logout)
                }
            }
            Command::Type(text) => {
                self.enter_dictionary().await?;
                self.type_text(&text).await
            }
            Command::Search(word) => {
                self.enter_dictionary().await?;
                let outcome = self.pipeline.submit(&word).await;
                self.render_submit(outcome)
            }
            Command::Pick(target) => {
                self.enter_dictionary().await?;
                let word = self.pick_word(target)?;
                let outcome = self.pipeline.select_suggestion(&word).await;
                self.render_submit(outcome)
            }
            Command::Recent(n) => {
                self.enter_dictionary().await?;
                let word = n
                    .checked_sub(1)
                    .and_then(|i| self.pipeline.history().entries().get(i))
                    .map(|entry| entry.word.clone())
                    .ok_or(ExecutorError::NoRecentSearch(n))?;
                let outcome = self.pipeline.select_suggestion(&word).await;
                self.render_submit(outcome)
            }
            Command::History => {
                self.enter_dictionary().await?;
                Ok(ExecutionResult::ok(format_recent_searches(
                    self.pipeline.history(),
                )))
            }
        }
    }

    async fn screen_for(&self, route: Route) -> Screen {
        let loading = self.gateway.is_loading().await;
        resolve_route(route, loading, &self.gateway.session().await)
    }

    /// Gates dictionary commands on the session and makes sure the word
    /// cache has been fetched.
    async fn enter_dictionary(&mut self) -> Result<(), ExecutorError> {
        match self.screen_for(Route::Dictionary).await {
            Screen::Dictionary => {
                self.pipeline.load_word_cache().await;
                Ok(())
            }
            Screen::Login => Err(ExecutorError::NotAuthenticated),
            Screen::Loading => Err(ExecutorError::Loading),
        }
    }

    async fn login(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<ExecutionResult, ExecutorError> {
        if self.screen_for(Route::Login).await == Screen::Dictionary {
            let session = self.gateway.session().await;
            return Ok(ExecutionResult::ok(format!(
                "Already logged in as {}.",
                format_session(&session)
            )));
        }

        let outcome = self.gateway.login(username, password).await;
        if !outcome.success {
            return Err(ExecutorError::Login(outcome.message.unwrap_or_default()));
        }
        self.pipeline.load_word_cache().await;
        Ok(ExecutionResult::ok(format!("Logged in as @{username}.")))
    }

    /// Feeds `text` one character at a time, as fast as a paste, then waits
    /// for the debounce to resolve the final term.
    async fn type_text(&mut self, text: &str) -> Result<ExecutionResult, ExecutorError> {
        let mut typed = String::new();
        for ch in text.chars() {
            typed.push(ch);
            self.pipeline.on_input(&typed);
        }
        if text.is_empty() {
            self.pipeline.on_input("");
        }

        self.pipeline.settle().await;
        Ok(ExecutionResult::ok(format_suggestions(
            self.pipeline.suggestions(),
        )))
    }

    fn pick_word(&self, target: PickTarget) -> Result<String, ExecutorError> {
        match target {
            PickTarget::Word(word) => Ok(word),
            PickTarget::Index(n) => {
                // Live suggestions first, then the "did you mean" list of the last result.
                let list = if self.pipeline.suggestions().is_empty() {
                    self.pipeline
                        .result()
                        .map(|r| r.suggestions.as_slice())
                        .unwrap_or_default()
                } else {
                    self.pipeline.suggestions()
                };
                n.checked_sub(1)
                    .and_then(|i| list.get(i))
                    .cloned()
                    .ok_or_else(|| ExecutorError::NoSuggestion(n.to_string()))
            }
        }
    }

    fn render_submit(&self, outcome: SubmitOutcome) -> Result<ExecutionResult, ExecutorError> {
        match outcome {
            SubmitOutcome::Found | SubmitOutcome::NotFound => match self.pipeline.result() {
                Some(result) => Ok(ExecutionResult::ok(format_search_result(result))),
                None => Err(ExecutorError::Search(SEARCH_FAILED.to_string())),
            },
            SubmitOutcome::Ignored => Err(ExecutorError::Usage("search <word>")),
            SubmitOutcome::Failed => Err(ExecutorError::Search(
                self.pipeline.error().unwrap_or(SEARCH_FAILED).to_string(),
            )),
        }
    }
}
