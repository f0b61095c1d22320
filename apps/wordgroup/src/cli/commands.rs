//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::api::{self, AppState};
use crate::session;
use crate::{AppError, Config, DatamuseClient, TextSink};
use std::path::{Path, PathBuf};
use wordgroup_core::{
    Grouping, KeySelector, Page, Record, Relation, RenderSink, Value, group_json,
};

// =============================================================================
// FILE SIZE LIMITS
// =============================================================================

/// Maximum file size for grouping input (100 MB).
const MAX_GROUP_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), AppError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| AppError::Io(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(AppError::Io(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Resolve an input path and make sure it is a regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, AppError> {
    let canonical = path.canonicalize().map_err(|e| {
        AppError::Io(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(AppError::Io(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), AppError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::Io(format!("Cannot encode JSON output: {}", e)))?;
    println!("{}", text);
    Ok(())
}

// =============================================================================
// LOOKUP COMMANDS
// =============================================================================

/// Look up rhymes or similar words and print the page.
pub async fn cmd_lookup(
    config: &Config,
    relation: Relation,
    word: &str,
    json_mode: bool,
) -> Result<(), AppError> {
    let client = DatamuseClient::new(&config.api)?;
    let entries = client.fetch(relation, word).await?;
    let page = Page::for_relation(relation, word.trim(), entries)?;

    if json_mode {
        return print_json(&page);
    }

    TextSink::stdout().render(&page)?;
    Ok(())
}

// =============================================================================
// GROUP COMMAND
// =============================================================================

/// Group the records in a JSON file by a field.
pub fn cmd_group(file: &Path, by: &str, json_mode: bool) -> Result<(), AppError> {
    tracing::info!("Grouping {:?} by '{}'", file, by);

    let validated_path = validate_file_path(file)?;
    validate_file_size(&validated_path, MAX_GROUP_FILE_SIZE)?;

    let contents = std::fs::read(&validated_path)
        .map_err(|e| AppError::Io(format!("Read file: {}", e)))?;
    let input: serde_json::Value = serde_json::from_slice(&contents)
        .map_err(|e| AppError::Io(format!("Invalid JSON in {:?}: {}", file, e)))?;

    let grouped = group_file_contents(&input, by)?;

    if json_mode {
        return print_json(&crate::api::GroupResponse::from(grouped));
    }

    print_grouping(&grouped);
    Ok(())
}

/// Group parsed file contents by a field.
pub fn group_file_contents(
    input: &serde_json::Value,
    by: &str,
) -> Result<Grouping<Value, Record>, AppError> {
    Ok(group_json(input, &KeySelector::field(by))?)
}

fn print_grouping(grouped: &Grouping<Value, Record>) {
    if grouped.is_empty() {
        println!("(no records)");
        return;
    }

    for (key, records) in grouped.iter() {
        println!("{} ({})", key, records.len());
        for record in records {
            println!("  {}", serde_json::to_string(record).unwrap_or_default());
        }
    }
}

// =============================================================================
// SESSION COMMAND
// =============================================================================

/// Run the interactive session on stdin/stdout.
pub async fn cmd_session(config: &Config) -> Result<(), AppError> {
    let client = DatamuseClient::new(&config.api)?;
    let mut sink = TextSink::stdout();

    println!(
        "wordgroup {} - type a word for rhymes, 'help' for commands",
        env!("CARGO_PKG_VERSION")
    );

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let state = session::run(&client, &mut sink, stdin).await?;

    sink.render_saved(&state.saved)?;
    Ok(())
}

// =============================================================================
// SERVER COMMAND
// =============================================================================

/// Start the HTTP server.
pub async fn cmd_server(config: &Config, host: &str, port: u16) -> Result<(), AppError> {
    let client = DatamuseClient::new(&config.api)?;

    println!("wordgroup HTTP Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:     {}", host);
    println!("  Port:     {}", port);
    println!("  Word API: {}", client.base_url());
    println!();
    println!("Endpoints:");
    println!("  POST /group         - Group records by a field");
    println!("  GET  /rhymes?word=  - Rhymes by syllable count");
    println!("  GET  /similar?word= - Similar words");
    println!("  GET  /saved         - Saved words");
    println!("  POST /saved         - Save a word");
    println!("  GET  /health        - Health check");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    let addr = format!("{}:{}", host, port);
    api::run_server(&addr, AppState::new(client)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn group_file_contents_by_field() {
        let input = json!([
            {"name": "Steve", "team": "blue"},
            {"name": "Jack", "team": "red"},
            {"name": "Carol", "team": "blue"}
        ]);

        let grouped = group_file_contents(&input, "team").expect("group");
        let keys: Vec<String> = grouped.keys().map(ToString::to_string).collect();
        assert_eq!(keys, vec!["blue", "red"]);
        assert_eq!(grouped.item_count(), 3);
    }

    #[test]
    fn group_file_contents_rejects_non_array() {
        let result = group_file_contents(&json!({"team": "blue"}), "team");
        assert!(matches!(result, Err(AppError::Group(_))));
    }

    #[test]
    fn group_file_contents_keeps_other_fields() {
        let input = json!([
            {"name": "Steve", "team": "blue", "weight": 72.5},
            {"name": "Jack", "team": "red", "meta": {"x": 1}}
        ]);

        let grouped = group_file_contents(&input, "team").expect("group");
        assert_eq!(grouped.len(), 2);
    }

    #[test]
    fn group_file_contents_bounds_record_count() {
        let input = serde_json::Value::Array(vec![
            json!({"k": 1});
            wordgroup_core::primitives::MAX_GROUP_ITEMS + 1
        ]);
        assert!(matches!(
            group_file_contents(&input, "k"),
            Err(AppError::Group(wordgroup_core::GroupError::InvalidArgument(_)))
        ));
    }

    #[test]
    fn validate_file_path_rejects_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(matches!(
            validate_file_path(dir.path()),
            Err(AppError::Io(_))
        ));
    }

    #[test]
    fn validate_file_size_limit() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("records.json");
        std::fs::write(&path, "[]").expect("write");

        assert!(validate_file_size(&path, 10).is_ok());
        assert!(validate_file_size(&path, 1).is_err());
    }

    #[test]
    fn cmd_group_reads_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("records.json");
        std::fs::write(&path, r#"[{"k": 1}, {"k": 2}, {"k": 1}]"#).expect("write");

        assert!(cmd_group(&path, "k", true).is_ok());
    }

    #[test]
    fn cmd_group_reports_mixed_keys() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("records.json");
        std::fs::write(&path, r#"[{"k": 1}, {"k": "one"}]"#).expect("write");

        assert!(matches!(
            cmd_group(&path, "k", false),
            Err(AppError::Group(_))
        ));
    }
}
