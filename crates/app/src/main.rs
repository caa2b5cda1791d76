use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use jukelet_core::AppConfig;
use jukelet_engine::{Event, FetchKind, MemorySurface, Widget, WidgetConfig};
use jukelet_sources::{build_source, fetch_snippet, PlaylistLoader, TextSource};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn};

mod audio;
mod commands;
mod terminal;

use audio::HeadlessAudio;
use commands::{parse_command, Command, HELP};
use terminal::{format_list, format_now_playing, format_snippet, TerminalSurface};

#[derive(Parser, Debug)]
#[command(name = "jukelet", about = "Playlist player with a polled status snippet")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    Run,
    Doctor,
    Status,
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cmd = cli.command.unwrap_or(Commands::Run);
    let cfg_path = cli.config.unwrap_or_else(default_config_path);

    match cmd {
        Commands::Config {
            action: ConfigAction::Init,
        } => {
            init_config(&cfg_path)?;
            println!("Initialized config at {}", cfg_path.display());
            Ok(())
        }
        Commands::Doctor => {
            let cfg = load_or_default(&cfg_path)?;
            init_logging(&cfg.log_level);
            doctor(&cfg).await
        }
        Commands::Status => {
            let cfg = load_or_default(&cfg_path)?;
            init_logging(&cfg.log_level);
            status(&cfg).await
        }
        Commands::Run => {
            let cfg = load_or_default(&cfg_path)?;
            init_logging(&cfg.log_level);
            run(cfg).await
        }
    }
}

async fn run(cfg: AppConfig) -> Result<()> {
    let mut widget = Widget::new(
        WidgetConfig::from_app_config(&cfg),
        HeadlessAudio::default(),
        TerminalSurface::default(),
    );
    let (tx, mut rx) = mpsc::channel::<Event>(16);

    info!(
        playlist = %cfg.playlist.source,
        snippet = %cfg.snippet.source,
        "jukelet started"
    );
    println!("{HELP}");

    if let Some(ticket) = widget.begin_fetch(FetchKind::Playlist) {
        let loader = PlaylistLoader::new(build_source(&cfg.playlist.source, false), &cfg.playlist);
        let tx = tx.clone();
        tokio::spawn(async move {
            let outcome = loader.load().await;
            let _ = tx.send(Event::PlaylistLoaded { ticket, outcome }).await;
        });
    }

    let snippet_source = build_source(&cfg.snippet.source, true);
    let mut snippet_timer =
        tokio::time::interval(Duration::from_secs(cfg.snippet.interval_secs.max(1)));
    let mut clock = tokio::time::interval(Duration::from_millis(cfg.player.tick_ms.max(50)));
    let mut last_tick = Instant::now();

    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    loop {
        tokio::select! {
            _ = snippet_timer.tick() => {
                spawn_snippet_fetch(&mut widget, snippet_source.clone(), tx.clone());
            }
            _ = clock.tick() => {
                let now = Instant::now();
                let elapsed = now.duration_since(last_tick);
                last_tick = now;
                if let Some(signal) = widget.audio_mut().advance(elapsed) {
                    widget.enqueue(signal);
                }
            }
            Some(event) = rx.recv() => {
                widget.enqueue(event);
            }
            line = stdin.next_line(), if stdin_open => {
                match line {
                    Ok(Some(line)) if line.trim().is_empty() => {}
                    Ok(Some(line)) => match parse_command(&line) {
                        Ok(Command::Event(event)) => widget.enqueue(event),
                        Ok(Command::Redraw) => widget.render_player(),
                        Ok(Command::Help) => println!("{HELP}"),
                        Ok(Command::Quit) => break,
                        Err(err) => println!("{err}"),
                    },
                    Ok(None) => {
                        info!("stdin closed; controls disabled");
                        stdin_open = false;
                    }
                    Err(err) => {
                        warn!(error=%err, "failed reading stdin; controls disabled");
                        stdin_open = false;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("received ctrl-c; shutting down");
                break;
            }
        }
        widget.process_pending();
    }

    widget.shutdown();
    Ok(())
}

fn spawn_snippet_fetch(
    widget: &mut Widget<HeadlessAudio, TerminalSurface>,
    source: Arc<dyn TextSource>,
    tx: mpsc::Sender<Event>,
) {
    let Some(ticket) = widget.begin_fetch(FetchKind::Snippet) else {
        return;
    };
    tokio::spawn(async move {
        let result = fetch_snippet(source.as_ref()).await;
        let _ = tx.send(Event::SnippetFetched { ticket, result }).await;
    });
}

async fn doctor(cfg: &AppConfig) -> Result<()> {
    println!("== jukelet doctor ==");

    let playlist = build_source(&cfg.playlist.source, false);
    println!("Playlist source: {} ({})", playlist.location(), playlist.name());
    let outcome = PlaylistLoader::new(playlist, &cfg.playlist).load().await;
    match &outcome.error {
        None => println!("Playlist: {} playable tracks", outcome.tracks.len()),
        Some(err) => println!("Playlist error: {err}"),
    }

    let snippet = build_source(&cfg.snippet.source, true);
    println!("Snippet source: {} ({})", snippet.location(), snippet.name());
    match fetch_snippet(snippet.as_ref()).await {
        Ok(s) => println!(
            "Snippet: {} chars of text, {} media links",
            s.text.chars().count(),
            s.media.len()
        ),
        Err(err) => println!("Snippet error: {err}"),
    }

    Ok(())
}

/// One-shot load of both sources, printed through the same views `run` uses.
async fn status(cfg: &AppConfig) -> Result<()> {
    let mut widget = Widget::new(
        WidgetConfig::from_app_config(cfg),
        HeadlessAudio::default(),
        MemorySurface::default(),
    );

    if let Some(ticket) = widget.begin_fetch(FetchKind::Playlist) {
        let loader = PlaylistLoader::new(build_source(&cfg.playlist.source, false), &cfg.playlist);
        let outcome = loader.load().await;
        widget.dispatch(Event::PlaylistLoaded { ticket, outcome });
    }
    if let Some(ticket) = widget.begin_fetch(FetchKind::Snippet) {
        let source = build_source(&cfg.snippet.source, true);
        let result = fetch_snippet(source.as_ref()).await;
        widget.dispatch(Event::SnippetFetched { ticket, result });
    }

    let surface = widget.surface();
    if let Some(view) = &surface.now_playing {
        println!("{}", format_now_playing(view));
    }
    if let Some(view) = &surface.list {
        for line in format_list(view) {
            println!("{line}");
        }
    }
    if let Some(view) = &surface.snippet {
        for line in format_snippet(view) {
            println!("{line}");
        }
    }

    Ok(())
}

fn default_config_path() -> PathBuf {
    let base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.join("jukelet").join("config.toml")
}

fn init_config(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }
    let cfg = AppConfig::default();
    let toml = toml::to_string_pretty(&cfg)?;
    std::fs::write(path, toml)
        .with_context(|| format!("failed to write config file {}", path.display()))?;
    Ok(())
}

fn load_or_default(path: &Path) -> Result<AppConfig> {
    let mut cfg = if !path.exists() {
        AppConfig::default()
    } else {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&data).with_context(|| format!("failed to parse {}", path.display()))?
    };
    apply_env_overrides(&mut cfg);
    Ok(cfg)
}

fn init_logging(log_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_new(log_level)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}

fn apply_env_overrides(cfg: &mut AppConfig) {
    if let Ok(v) = std::env::var("JUKELET_PLAYLIST_SOURCE") {
        if !v.trim().is_empty() {
            cfg.playlist.source = v;
        }
    }
    if let Ok(v) = std::env::var("JUKELET_SNIPPET_SOURCE") {
        if !v.trim().is_empty() {
            cfg.snippet.source = v;
        }
    }
    if let Ok(v) = std::env::var("JUKELET_LOG_LEVEL") {
        if !v.trim().is_empty() {
            cfg.log_level = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{init_config, load_or_default};
    use jukelet_core::{AppConfig, HighlightPolicy};

    #[test]
    fn init_then_load_round_trips_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        init_config(&path).unwrap();
        let cfg = load_or_default(&path).unwrap();

        assert_eq!(cfg.snippet.interval_secs, 30);
        assert_eq!(cfg.player.highlight, HighlightPolicy::Index);
    }

    #[test]
    fn missing_file_means_defaults_and_bad_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_or_default(&dir.path().join("absent.toml")).is_ok());

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "log_level = [").unwrap();
        assert!(load_or_default(&bad).is_err());
    }

    #[test]
    fn env_overrides_replace_sources_and_log_level() {
        let dir = tempfile::tempdir().unwrap();
        std::env::set_var("JUKELET_PLAYLIST_SOURCE", "https://gist.test/raw/playlist.json");
        std::env::set_var("JUKELET_SNIPPET_SOURCE", "https://gist.test/raw/message.txt");
        std::env::set_var("JUKELET_LOG_LEVEL", "  ");

        let cfg = load_or_default(&dir.path().join("absent.toml")).unwrap();
        std::env::set_var("JUKELET_LOG_LEVEL", "debug");
        let verbose = load_or_default(&dir.path().join("absent.toml")).unwrap();

        std::env::remove_var("JUKELET_PLAYLIST_SOURCE");
        std::env::remove_var("JUKELET_SNIPPET_SOURCE");
        std::env::remove_var("JUKELET_LOG_LEVEL");

        assert_eq!(cfg.playlist.source, "https://gist.test/raw/playlist.json");
        assert_eq!(cfg.snippet.source, "https://gist.test/raw/message.txt");
        assert_eq!(cfg.log_level, AppConfig::default().log_level);
        assert_eq!(verbose.log_level, "debug");
    }
}
