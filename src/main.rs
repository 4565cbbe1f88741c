use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use healiofy_assistant::chatbot::{ChatbotApi, ChatbotError, HttpChatbot};
use healiofy_assistant::config::AssistantConfig;
use healiofy_assistant::conversation::{ConversationManager, SubmitOutcome};
use healiofy_assistant::format::{format, render_text};
use healiofy_assistant::model::{ContextMode, DisplayMessage, PrescriptionAnalysis};
use healiofy_assistant::notify::{LogNotifier, Notification, Notifier, Severity};
use healiofy_assistant::storage::{FileStore, KeyValueStore, StorageError};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("chatbot setup failed: {0}")]
    Chatbot(#[from] ChatbotError),
    #[error("storage setup failed: {0}")]
    Storage(#[from] StorageError),
    #[error("io failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid prescription file {path}: {source}")]
    Prescription { path: PathBuf, source: serde_json::Error },
}

#[derive(Parser, Debug)]
#[command(name = "healiofy-chat", about = "Prescription-aware health assistant chat")]
struct Cli {
    /// Directory holding the persisted conversation.
    #[arg(long, env = "ASSISTANT_STORAGE_DIR")]
    storage_dir: Option<PathBuf>,

    /// JSON file with a prescription analysis to use as context.
    #[arg(long)]
    prescription: Option<PathBuf>,

    /// Chat as an unauthenticated guest.
    #[arg(long)]
    guest: bool,

    /// Start in `prescription` or `general` mode.
    #[arg(long)]
    mode: Option<ContextMode>,
}

/// Prints notifications inline with the transcript and logs them.
struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        let marker = match notification.severity {
            Severity::Default => "*",
            Severity::Destructive => "!",
        };
        println!("[{marker}] {}: {}", notification.title, notification.description);
        LogNotifier.notify(notification);
    }
}

const HELP: &str = "commands: /reset /link /mode /panel /suggest [N] (draft a question) /history /help /quit";

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = AssistantConfig::from_env();
    if let Some(dir) = cli.storage_dir {
        config.storage_dir = dir;
    }

    let prescription = cli.prescription.map(read_prescription).transpose()?;
    let store = FileStore::open(config.storage_dir.clone())?;
    tracing::info!(dir = %store.dir().display(), "storage ready");
    let chatbot = HttpChatbot::from_env()?;

    let manager = ConversationManager::new(
        Arc::new(store) as Arc<dyn KeyValueStore>,
        Arc::new(chatbot) as Arc<dyn ChatbotApi>,
        Arc::new(ConsoleNotifier) as Arc<dyn Notifier>,
    )
    .with_guest_delay(config.guest_delay);
    manager.set_authenticated(!cli.guest).await;
    manager.set_prescription(prescription).await;
    if let Some(mode) = cli.mode {
        manager.set_context_mode(mode).await;
    }

    print_header(&manager).await;
    for message in manager.messages().await {
        print_message(&message);
    }
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut draft: Option<&'static str> = None;
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        if !run_command(&manager, line, &mut draft).await {
            break;
        }
    }
    Ok(())
}

fn read_prescription(path: PathBuf) -> Result<PrescriptionAnalysis, CliError> {
    let raw = std::fs::read_to_string(&path)?;
    serde_json::from_str(&raw).map_err(|source| CliError::Prescription { path, source })
}

/// Handle one input line. Returns `false` to quit.
///
/// `draft` holds a selected suggestion; an empty line sends it.
async fn run_command(manager: &ConversationManager, line: &str, draft: &mut Option<&'static str>) -> bool {
    let (command, arg) = line.split_once(' ').unwrap_or((line, ""));
    match command {
        "" => {
            if let Some(question) = draft.take() {
                submit(manager, question).await;
            }
        }
        "/quit" | "/exit" => return false,
        "/help" => println!("{HELP}"),
        "/reset" => {
            manager.reset_conversation().await;
            print_header(manager).await;
            for message in manager.messages().await {
                print_message(&message);
            }
        }
        "/link" => {
            if manager.can_toggle_link().await {
                manager.toggle_context_link().await;
                print_header(manager).await;
            } else {
                println!("linking needs prescription mode and an analyzed prescription");
            }
        }
        "/mode" => {
            let mode = manager.context_mode().await.toggled();
            manager.set_context_mode(mode).await;
            print_header(manager).await;
        }
        "/panel" => {
            for entry in manager.side_panel().await.to_lines() {
                println!("{entry}");
            }
        }
        "/suggest" => match arg.trim().parse::<usize>() {
            Ok(n) if n >= 1 => match manager.select_suggestion(n - 1).await {
                Some(question) => {
                    *draft = Some(question);
                    println!("draft: {question}");
                    println!("(press Enter to send, or type your own message)");
                }
                None => println!("no suggestion {n}"),
            },
            _ => {
                for (i, question) in manager.suggested_questions().await.iter().enumerate() {
                    println!("  {}. {question}", i + 1);
                }
            }
        },
        "/history" => {
            for message in manager.messages().await {
                print_message(&message);
            }
        }
        _ if command.starts_with('/') => println!("unknown command {command}; {HELP}"),
        _ => {
            *draft = None;
            submit(manager, line).await;
        }
    }
    true
}

async fn submit(manager: &ConversationManager, text: &str) {
    match manager.submit(text).await {
        SubmitOutcome::Ignored => {}
        SubmitOutcome::Guest | SubmitOutcome::Answered(_) | SubmitOutcome::Failed(_) => {
            if let Some(reply) = manager.messages().await.last() {
                print_message(reply);
            }
        }
    }
}

async fn print_header(manager: &ConversationManager) {
    let mut header = format!("== {} | {}", manager.mode_label().await, manager.status_line().await);
    if manager.can_toggle_link().await {
        header.push_str(" | ");
        header.push_str(manager.link_label().await);
    }
    println!("{header}");
}

fn print_message(message: &DisplayMessage) {
    println!("{}", message.header_label());
    if message.is_user {
        println!("{}", message.text);
    } else {
        println!("{}", render_text(&format(&message.text)));
    }
    println!();
}
