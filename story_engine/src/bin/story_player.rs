//! Story Player - plays a branching story in the terminal.
//!
//! Usage: `story_player [config.toml]`. Numbers pick choices, `/back`, `/restart`,
//! `/tone <gentle|snark>` and `/debug` are commands, `/quit` exits, and anything
//! else is free text for the trigger rules.

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use story_engine::{
    Command, ContentLoader, FileNoteLog, Markup, MemoryNoteLog, NoteLog, Presenter, Session,
    StoryConfig, TracingSink,
};
use story_graph::{Scene, SceneId};

/// Prints scenes and responses to stdout.
struct TerminalPresenter {
    markup: Markup,
    choices: Vec<String>,
}

impl TerminalPresenter {
    fn new(markup: Markup) -> Self {
        Self {
            markup,
            choices: Vec::new(),
        }
    }
}

impl Presenter for TerminalPresenter {
    fn show_scene(&mut self, scene: &Scene) {
        self.choices = scene.choices.iter().map(|c| c.label.clone()).collect();

        println!();
        println!("== {} ==", scene.title);
        println!("{}", self.markup.render(&scene.text));
        for (i, label) in self.choices.iter().enumerate() {
            println!("  {}. {}", i + 1, label);
        }
    }

    fn show_unknown_scene(&mut self, id: &SceneId) {
        self.choices.clear();
        println!();
        println!("Unknown scene: {}", id);
    }

    fn show_response(&mut self, text: &str) {
        println!();
        println!("{}", self.markup.render(text));
    }

    fn highlight_choices(&mut self, indices: &[usize]) {
        for &i in indices {
            if let Some(label) = self.choices.get(i) {
                println!("  > {}. {}", i + 1, label);
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "story_engine=info,story_analytics=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => StoryConfig::load(Path::new(&path))
            .with_context(|| format!("failed to read config {}", path))?,
        None => StoryConfig::default(),
    };

    let content = ContentLoader::from_config(&config)
        .load()
        .context("failed to load story")?;

    let notes: Box<dyn NoteLog> = match &config.notes.path {
        Some(path) => Box::new(FileNoteLog::new(path, config.notes.capacity)),
        None => Box::new(MemoryNoteLog::new(config.notes.capacity)),
    };

    let presenter = TerminalPresenter::new(config.markup);
    let mut session = Session::start(content, &config, presenter, TracingSink, notes);
    tracing::info!("Session {} ready", session.id());

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        if matches!(line.trim(), "/quit" | "/q") {
            break;
        }

        match Command::parse_line(&line) {
            Some(command) => {
                if let Err(err) = session.handle(command) {
                    println!("{}", err);
                }
            }
            None if line.trim().is_empty() => {}
            None => println!("Unknown command."),
        }
    }

    Ok(())
}
