//! Context wiring and per-command handlers.
//!
//! - `run()`: main dispatch (called by `main.rs`)
//! - `init_context()`: resolves the data directory and builds the API
//! - `handle_*()`: call the API and hand the result to `print.rs`

use super::print::{print_config, print_messages, print_records};
use super::setup::{Cli, Commands, ScopeArgs};
use clap::Parser;
use copydeck::api::{ConfigAction, CopyApi};
use copydeck::commands::CopydeckPaths;
use copydeck::config::CopydeckConfig;
use copydeck::error::{CopyError, Result};
use copydeck::model::{DraftItem, Scope};
use copydeck::store::fs_backend::FsBackend;
use copydeck::store::record_store::RecordStore;
use directories::ProjectDirs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

const HOME_ENV: &str = "COPYDECK_HOME";
const LOG_ENV: &str = "COPYDECK_LOG";

type FileApi = CopyApi<RecordStore<FsBackend>>;

struct AppContext {
    api: FileApi,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Commands::Sync {
            scope,
            drafts,
            authoritative,
            dry_run,
            no_title_match,
            json,
        } => handle_sync(
            &mut ctx,
            scope,
            &drafts,
            SyncFlags {
                authoritative,
                dry_run,
                no_title_match,
                json,
            },
        ),
        Commands::List { scope, json } => handle_list(&ctx, scope, json),
        Commands::Config { key, value } => handle_config(&ctx, key, value),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "copydeck=debug"
    } else {
        "copydeck=warn"
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = resolve_data_dir(cli.data_dir.clone())?;
    tracing::debug!(data_dir = %data_dir.display(), "using data directory");

    let config = CopydeckConfig::load(&data_dir)?;
    let store = RecordStore::with_backend(FsBackend::new(data_dir.clone()));
    let api = CopyApi::new(store, CopydeckPaths { data_dir }, config);

    Ok(AppContext { api })
}

/// `--data-dir` wins, then `$COPYDECK_HOME`, then the platform data directory.
fn resolve_data_dir(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir);
    }
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "copydeck", "copydeck")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| CopyError::Api("Could not determine a data directory".to_string()))
}

struct SyncFlags {
    authoritative: bool,
    dry_run: bool,
    no_title_match: bool,
    json: bool,
}

fn handle_sync(
    ctx: &mut AppContext,
    scope: ScopeArgs,
    drafts_path: &Path,
    flags: SyncFlags,
) -> Result<()> {
    let scope = Scope::from(scope);
    let drafts = read_drafts(drafts_path)?;

    let mut options = ctx.api.options(flags.authoritative);
    if flags.no_title_match {
        options.match_titles = false;
    }

    if flags.dry_run {
        let result = ctx.api.plan_copy(&scope, drafts, options)?;
        if flags.json {
            println!("{}", serde_json::to_string_pretty(&result.plan)?);
        } else {
            print_messages(&result.messages);
        }
        return Ok(());
    }

    if flags.json {
        let response = ctx.api.sync(&scope, drafts, options);
        println!("{}", serde_json::to_string(&response)?);
        if !response.success {
            std::process::exit(1);
        }
        return Ok(());
    }

    match ctx.api.sync_copy(&scope, drafts, options) {
        Ok(result) => {
            print_messages(&result.messages);
            Ok(())
        }
        Err(err) => {
            if err.is_partial() {
                eprintln!(
                    "Run `copydeck list --site {} --user {}` to see what was saved.",
                    scope.site_id, scope.user_id
                );
            }
            Err(err)
        }
    }
}

fn read_drafts(path: &Path) -> Result<Vec<DraftItem>> {
    let content = if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        std::fs::read_to_string(path).map_err(|e| {
            CopyError::Api(format!("Could not read drafts from {}: {}", path.display(), e))
        })?
    };

    serde_json::from_str(&content)
        .map_err(|e| CopyError::Api(format!("Invalid drafts file {}: {}", path.display(), e)))
}

fn handle_list(ctx: &AppContext, scope: ScopeArgs, json: bool) -> Result<()> {
    let result = ctx.api.list_copy(&Scope::from(scope))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result.records)?);
        return Ok(());
    }

    print_records(&result.records);
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = ctx.api.config(action)?;
    if let Some(config) = &result.config {
        if result.messages.is_empty() {
            print_config(config);
        }
    }
    print_messages(&result.messages);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_flag_wins() {
        let dir = resolve_data_dir(Some(PathBuf::from("/tmp/copydeck-flag"))).unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/copydeck-flag"));
    }

    #[test]
    fn read_drafts_parses_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("drafts.json");
        std::fs::write(
            &path,
            r#"[{"title": "Launch", "body": "We are live"}, {"id": "6f1c2a1e-2b7d-4f59-9d3c-1a8f3b2c4d5e", "title": "Old"}]"#,
        )
        .unwrap();

        let drafts = read_drafts(&path).unwrap();
        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].title(), "Launch");
        assert!(drafts[0].id.is_none());
        assert!(drafts[1].id.is_some());
    }

    #[test]
    fn read_drafts_reports_bad_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("drafts.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = read_drafts(&path).unwrap_err();
        assert!(err.to_string().contains("Invalid drafts file"));
    }

    #[test]
    fn read_drafts_reports_missing_file() {
        let err = read_drafts(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("Could not read drafts"));
    }
}
