use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use companion::config::{CompanionConfig, Voice};
use companion::inputs::{self, ListenEvent};
use companion::kernel::capabilities::Capabilities;
use companion::kernel::intent::Classifier;
use companion::kernel::journal::Journal;
use companion::kernel::workspace::WorkspaceActions;
use companion::outputs::text::{render_message, render_notes, render_tasks};
use companion::outputs::{ConsoleSpeech, SayCommand, SpeechSink};
use companion::services::WebInfoSource;
use companion::store::{open_store, Sender};
use companion::Dispatcher;

const UNSUPPORTED_INPUT: &str =
    "Your device does not support voice input. Showing the conversation log only.";

#[derive(Debug, Parser)]
#[command(name = "companion", about = "Voice companion for tasks, notes and quick lookups")]
struct Args {
    /// TOML configuration file.
    #[arg(short, long, env = "COMPANION_CONFIG")]
    config: Option<PathBuf>,

    /// Directory for the durable store. Omit to keep everything in memory.
    #[arg(long, env = "COMPANION_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// How replies are vocalized.
    #[arg(long, value_enum)]
    voice: Option<Voice>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("setting default subscriber failed")?;

    let args = Args::parse();
    let mut config = match &args.config {
        Some(path) => CompanionConfig::load(path)?,
        None => CompanionConfig::default(),
    };
    if args.data_dir.is_some() {
        config.data_dir = args.data_dir;
    }
    if let Some(voice) = args.voice {
        config.speech.voice = voice;
    }

    tracing::info!("Companion booting...");

    let (store, backend) = open_store(config.data_dir.as_deref()).await;
    tracing::info!("Storage backend: {:?}", backend);

    let speech: Arc<dyn SpeechSink> = match config.speech.voice {
        Voice::Console => Arc::new(ConsoleSpeech),
        Voice::Say => Arc::new(SayCommand::new()),
    };
    let info = Arc::new(WebInfoSource::new(config.endpoints.clone(), config.timeout()));
    let journal = Journal::spawn(store.clone(), config.timeout());
    let capabilities = Capabilities::new(info, store.clone(), config.timeout());
    let dispatcher = Dispatcher::new(
        Classifier::new(config.slot_defaults()),
        capabilities,
        journal.clone(),
        speech.clone(),
    );
    let actions = WorkspaceActions::new(store, journal.clone(), speech);

    for message in actions.history(config.history_limit).await {
        println!("{}", render_message(&message));
    }

    let shutdown = CancellationToken::new();
    let ctrl_c = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    let Some(mut listener) = inputs::detect(config.speech.input) else {
        journal.append(Sender::System, UNSUPPORTED_INPUT);
        println!("System: {}", UNSUPPORTED_INPUT);
        println!("{}", render_tasks(&actions.tasks().await));
        println!("{}", render_notes(&actions.notes().await));
        shutdown.cancelled().await;
        journal.flush().await;
        return Ok(());
    };

    tracing::info!("Companion ready. Type /help for workspace commands, Ctrl+C to stop.");

    loop {
        let session = shutdown.child_token();
        match listener.listen(&session).await {
            ListenEvent::Utterance(line) if line.starts_with('/') => {
                run_command(&actions, &line, config.history_limit).await;
            }
            ListenEvent::Utterance(text) => {
                let reply = dispatcher.handle(&text).await;
                if config.speech.voice != Voice::Console {
                    println!("Bot: {}", reply);
                }
            }
            ListenEvent::Error(reason) => {
                let notice = format!("Error: {}", reason);
                println!("System: {}", notice);
                journal.append(Sender::System, notice);
            }
            ListenEvent::Stopped if shutdown.is_cancelled() => break,
            ListenEvent::Stopped => {}
            ListenEvent::Closed => break,
        }
    }

    journal.flush().await;
    tracing::info!("Companion stopped.");
    Ok(())
}

/// Presentation-side workspace commands; these never reach the classifier.
async fn run_command(actions: &WorkspaceActions, line: &str, history_limit: usize) {
    let mut parts = line.split_whitespace();
    let command = parts.next().unwrap_or_default();
    let arg = parts.next().unwrap_or_default();

    match command {
        "/tasks" => println!("{}", render_tasks(&actions.tasks().await)),
        "/notes" => println!("{}", render_notes(&actions.notes().await)),
        "/history" => {
            for message in actions.history(history_limit).await {
                println!("{}", render_message(&message));
            }
        }
        "/done" | "/undo" => match arg.parse() {
            Ok(id) => {
                if let Some(task) = actions.toggle_task(id, command == "/done").await {
                    println!("{}", render_tasks(&[task]));
                }
            }
            Err(_) => println!("Usage: {} <task-id>", command),
        },
        "/rm-task" => match arg.parse() {
            Ok(id) => {
                actions.delete_task(id).await;
            }
            Err(_) => println!("Usage: /rm-task <task-id>"),
        },
        "/clear-tasks" => {
            actions.clear_tasks().await;
        }
        "/rm-note" => match arg.parse() {
            Ok(id) => {
                actions.delete_note(id).await;
            }
            Err(_) => println!("Usage: /rm-note <note-id>"),
        },
        "/clear-notes" => {
            actions.clear_notes().await;
        }
        _ => println!(
            "Commands: /tasks, /notes, /history, /done <id>, /undo <id>, /rm-task <id>, /clear-tasks, /rm-note <id>, /clear-notes"
        ),
    }
}
