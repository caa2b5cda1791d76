use jukelet_core::MediaKind;
use jukelet_engine::{ListView, NowPlayingView, PlayIcon, ProgressView, SnippetView, Surface};

const IDLE_PROGRESS: &str = "-:-- [------------------------------] -:--";

/// Prints each region to stdout whenever its content changes.
#[derive(Default)]
pub struct TerminalSurface {
    now_playing: Option<NowPlayingView>,
    list: Option<ListView>,
    progress_label: Option<String>,
    snippet: Option<SnippetView>,
}

impl Surface for TerminalSurface {
    fn show_now_playing(&mut self, view: &NowPlayingView) {
        if self.now_playing.as_ref() == Some(view) {
            return;
        }
        println!("{}", format_now_playing(view));
        if let Some(err) = &view.error {
            println!("  ! {err}");
        }
        self.now_playing = Some(view.clone());
    }

    fn show_list(&mut self, view: &ListView) {
        if self.list.as_ref() == Some(view) {
            return;
        }
        for line in format_list(view) {
            println!("{line}");
        }
        self.list = Some(view.clone());
    }

    fn show_progress(&mut self, view: Option<&ProgressView>) {
        let label = view.map(format_progress);
        if self.progress_label == label {
            return;
        }
        println!("{}", label.as_deref().unwrap_or(IDLE_PROGRESS));
        self.progress_label = label;
    }

    fn show_snippet(&mut self, view: &SnippetView) {
        if self.snippet.as_ref() == Some(view) {
            return;
        }
        for line in format_snippet(view) {
            println!("{line}");
        }
        self.snippet = Some(view.clone());
    }
}

pub fn format_now_playing(view: &NowPlayingView) -> String {
    let icon = match view.icon {
        PlayIcon::Play => " >",
        PlayIcon::Pause => "||",
    };
    if view.artist.is_empty() {
        format!("[{icon}] {}", view.title)
    } else {
        format!("[{icon}] {} - {}", view.artist, view.title)
    }
}

pub fn format_list(view: &ListView) -> Vec<String> {
    match view {
        ListView::Empty { message } => vec![message.clone()],
        ListView::Tracks(entries) => entries
            .iter()
            .map(|e| {
                let marker = if e.active { '*' } else { ' ' };
                format!("{marker} {:>2}. {} - {}", e.index + 1, e.artist, e.title)
            })
            .collect(),
    }
}

pub fn format_progress(view: &ProgressView) -> String {
    const WIDTH: usize = 30;
    let filled = ((view.percent / 100.0) * WIDTH as f64).round() as usize;
    let filled = filled.min(WIDTH);
    format!(
        "{} [{}{}] {}",
        view.current,
        "#".repeat(filled),
        "-".repeat(WIDTH - filled),
        view.total
    )
}

pub fn format_snippet(view: &SnippetView) -> Vec<String> {
    let mut lines: Vec<String> = view.text.lines().map(|l| format!("> {l}")).collect();
    for item in &view.media {
        let label = match &item.kind {
            MediaKind::Image => format!("[image] {}", item.url),
            MediaKind::Video => format!("[video] {}", item.url),
            MediaKind::Embed { embed_url, .. } => format!("[youtube] {embed_url}"),
            MediaKind::Ignored => continue,
        };
        lines.push(format!("> {label}"));
    }
    lines
}
