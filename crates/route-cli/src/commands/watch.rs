//! Watch command implementation.
//!
//! Generates once, then regenerates whenever a file under the input
//! directory is created, modified or removed. Runs until Ctrl-C.
//!
//! Events are forwarded from the `notify` callback thread into a tokio
//! channel and handled one at a time. Writes of the generator's own
//! outputs and temp files are ignored so that an output file inside the
//! input directory does not trigger a regeneration loop.

use super::generate::{GenerateSummary, generate_once};
use anyhow::{Context, Result};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use route_core::cli::{ExitCode, OutputFormat};
use route_core::{Error, GeneratorConfig};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Capacity of the event channel between the watcher and the loop.
const EVENT_BUFFER: usize = 100;

/// Runs the watch command.
///
/// Generation failures while watching are logged and do not stop the
/// loop.
///
/// # Errors
///
/// Returns an error if the input directory does not exist or the file
/// watcher cannot be started.
pub async fn run(config: GeneratorConfig, output_format: OutputFormat) -> Result<ExitCode> {
    if !config.input_dir.is_dir() {
        return Err(Error::ResourceNotFound {
            resource: config.input_dir.display().to_string(),
        }
        .into());
    }

    let input_dir = std::path::absolute(&config.input_dir)
        .with_context(|| format!("failed to resolve {}", config.input_dir.display()))?;
    let ignored = generated_outputs(&config);

    regenerate(&config, output_format);

    let (tx, mut rx) = mpsc::channel::<Event>(EVENT_BUFFER);
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
        Ok(event) => {
            let _ = tx.blocking_send(event);
        }
        Err(e) => warn!("Watch error: {e}"),
    })
    .context("failed to create file watcher")?;

    watcher
        .watch(&input_dir, RecursiveMode::Recursive)
        .with_context(|| format!("failed to watch {}", input_dir.display()))?;
    info!("Watching {} for changes (Ctrl-C to stop)", input_dir.display());

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("Stopping watcher");
                break;
            }
            event = rx.recv() => {
                let Some(event) = event else {
                    warn!("File watcher closed unexpectedly");
                    break;
                };
                if !is_relevant(&event, &ignored) {
                    continue;
                }
                debug!("Change detected: {:?} {:?}", event.kind, event.paths);
                regenerate(&config, output_format);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn regenerate(config: &GeneratorConfig, output_format: OutputFormat) {
    match generate_once(config) {
        Ok(summary) => print_summary(&summary, output_format),
        Err(e) => error!("Generation failed: {e:#}"),
    }
}

fn print_summary(summary: &GenerateSummary, output_format: OutputFormat) {
    match crate::formatters::format_output(summary, output_format) {
        Ok(formatted) => println!("{formatted}"),
        Err(e) => error!("Failed to format summary: {e:#}"),
    }
}

/// Every path the generator may write for `config`, made absolute.
fn generated_outputs(config: &GeneratorConfig) -> Vec<PathBuf> {
    [
        config.output_file.clone(),
        config.sibling_output("test.ts"),
        config.sibling_output("api.ts"),
        config.sibling_output("analytics.json"),
    ]
    .into_iter()
    .map(|p| std::path::absolute(&p).unwrap_or(p))
    .collect()
}

/// Returns `true` if `event` should trigger a regeneration.
///
/// Only create, modify and remove events count, and at least one of the
/// paths must be neither a generator output nor a `.tmp` file.
fn is_relevant(event: &Event, ignored: &[PathBuf]) -> bool {
    matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    ) && event.paths.iter().any(|p| !is_ignored(p, ignored))
}

fn is_ignored(path: &Path, ignored: &[PathBuf]) -> bool {
    path.extension().is_some_and(|ext| ext == "tmp") || ignored.iter().any(|g| g == path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::common::exit_code_for;
    use notify::event::{AccessKind, CreateKind, ModifyKind, RemoveKind};

    fn ignored() -> Vec<PathBuf> {
        vec![PathBuf::from("/app/pages/routes.ts")]
    }

    #[test]
    fn test_route_file_changes_are_relevant() {
        for kind in [
            EventKind::Create(CreateKind::File),
            EventKind::Modify(ModifyKind::Any),
            EventKind::Remove(RemoveKind::Folder),
        ] {
            let event = Event::new(kind).add_path(PathBuf::from("/app/pages/about.tsx"));
            assert!(is_relevant(&event, &ignored()), "{kind:?}");
        }
    }

    #[test]
    fn test_access_events_ignored() {
        let event = Event::new(EventKind::Access(AccessKind::Any))
            .add_path(PathBuf::from("/app/pages/about.tsx"));
        assert!(!is_relevant(&event, &ignored()));
    }

    #[test]
    fn test_own_outputs_ignored() {
        let output = Event::new(EventKind::Modify(ModifyKind::Any))
            .add_path(PathBuf::from("/app/pages/routes.ts"));
        assert!(!is_relevant(&output, &ignored()));

        let temp = Event::new(EventKind::Create(CreateKind::File))
            .add_path(PathBuf::from("/app/pages/routes.ts.tmp"));
        assert!(!is_relevant(&temp, &ignored()));

        let rename = Event::new(EventKind::Modify(ModifyKind::Any))
            .add_path(PathBuf::from("/app/pages/routes.ts.tmp"))
            .add_path(PathBuf::from("/app/pages/blog.tsx"));
        assert!(is_relevant(&rename, &ignored()));
    }

    #[test]
    fn test_generated_outputs_are_absolute() {
        let config = GeneratorConfig::default();
        let outputs = generated_outputs(&config);
        assert_eq!(outputs.len(), 4);
        assert!(outputs.iter().all(|p| p.is_absolute()));
        assert!(outputs[3].ends_with("src/routes.analytics.json"));
    }

    #[tokio::test]
    async fn test_missing_input_dir() {
        let temp = tempfile::TempDir::new().unwrap();
        let config = GeneratorConfig {
            input_dir: temp.path().join("missing"),
            ..Default::default()
        };
        let err = run(config, OutputFormat::Json).await.unwrap_err();
        assert_eq!(exit_code_for(&err), ExitCode::INVALID_INPUT);
    }
}
