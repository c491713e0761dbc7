mod common;

use common::{MockBackend, checked_gateway};
use glossa_engine::cli::{self, OutputHandlers};
use glossa_engine::executor::CommandExecutor;
use glossa_engine::history::SearchHistory;
use glossa_engine::pipeline::{DEFAULT_DEBOUNCE, SuggestionPipeline};
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

fn discard(_: &str) {}

const QUIET: OutputHandlers = OutputHandlers {
    out: discard,
    err: discard,
};

async fn executor_for(mock: &Arc<MockBackend>) -> CommandExecutor {
    let gateway = checked_gateway(mock).await;
    CommandExecutor::new(SuggestionPipeline::new(
        gateway,
        SearchHistory::in_memory(),
        DEFAULT_DEBOUNCE,
    ))
}

fn script(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn test_run_file_skips_comments_and_blank_lines() {
    let mock = Arc::new(MockBackend::authenticated("ada"));
    let mut executor = executor_for(&mock).await;
    let file = script("# lookups\n\nsearch one\n   \n  # indented comment\nsearch two\n");

    cli::run_file(&mut executor, QUIET, file.path())
        .await
        .unwrap();

    assert_eq!(mock.searched(), vec!["one", "two"]);
}

#[tokio::test]
async fn test_run_file_stops_at_first_failing_line() {
    let mock = Arc::new(MockBackend::authenticated("ada"));
    let mut executor = executor_for(&mock).await;
    let file = script("# lookups\n\nsearch one\nbogus\nsearch two\n");

    let err = cli::run_file(&mut executor, QUIET, file.path())
        .await
        .unwrap_err();

    assert!(err.to_string().starts_with("Error on line 4 'bogus'"));
    assert_eq!(mock.searched(), vec!["one"]);
}

#[tokio::test]
async fn test_run_file_reports_missing_script() {
    let mock = Arc::new(MockBackend::authenticated("ada"));
    let mut executor = executor_for(&mock).await;
    let dir = tempfile::tempdir().unwrap();

    let result = cli::run_file(&mut executor, QUIET, &dir.path().join("missing.txt")).await;

    assert!(result.is_err());
    assert!(mock.searched().is_empty());
}
