use std::borrow::Cow::{self, Borrowed, Owned};
use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;

use brainbloom_application::AppContext;
use brainbloom_core::directory::{ResourceFilter, ResourceKind, phone_for_action};
use brainbloom_core::session::{
    CrisisAlert, IgnoreReason, Message, MessageKind, Sender, SessionEvent, SessionStore,
    SubmitOutcome,
};
use brainbloom_core::user::IdentityProvider;

use super::{directory, monitor};

const SLASH_COMMANDS: [&str; 8] = [
    "/mood",
    "/moods",
    "/dismiss",
    "/peers",
    "/resources",
    "/agents",
    "/emergency",
    "/help",
];

const MOOD_USAGE: &str = "Usage: /mood <1-5> [notes]";

/// One line of REPL input, parsed.
#[derive(Debug, Clone, PartialEq)]
enum ChatCommand {
    /// Plain text for the agent
    Say(String),
    Mood { score: u8, notes: Option<String> },
    Moods,
    Dismiss,
    Peers,
    Resources(ResourceFilter),
    Agents,
    Emergency,
    Help,
    Quit,
    Unknown(String),
    Usage(&'static str),
}

/// Parses a REPL line. Blank lines yield `None`.
fn parse_line(line: &str) -> Option<ChatCommand> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    if line == "quit" || line == "exit" {
        return Some(ChatCommand::Quit);
    }
    let Some(rest) = line.strip_prefix('/') else {
        return Some(ChatCommand::Say(line.to_string()));
    };

    let (name, args) = match rest.split_once(char::is_whitespace) {
        Some((name, args)) => (name, args.trim()),
        None => (rest, ""),
    };

    let command = match name {
        "mood" => parse_mood(args),
        "moods" => ChatCommand::Moods,
        "dismiss" => ChatCommand::Dismiss,
        "peers" => ChatCommand::Peers,
        "resources" => ChatCommand::Resources(parse_resource_filter(args)),
        "agents" => ChatCommand::Agents,
        "emergency" => ChatCommand::Emergency,
        "help" => ChatCommand::Help,
        other => ChatCommand::Unknown(format!("/{other}")),
    };
    Some(command)
}

fn parse_mood(args: &str) -> ChatCommand {
    let (score, notes) = match args.split_once(char::is_whitespace) {
        Some((score, notes)) => (score, Some(notes.trim().to_string())),
        None => (args, None),
    };
    match score.parse::<u8>() {
        Ok(score) => ChatCommand::Mood { score, notes },
        Err(_) => ChatCommand::Usage(MOOD_USAGE),
    }
}

/// `[kind] [search]`: a leading word that names a resource kind filters by
/// kind, everything else is search text.
fn parse_resource_filter(args: &str) -> ResourceFilter {
    let (first, remainder) = match args.split_once(char::is_whitespace) {
        Some((first, remainder)) => (first, remainder.trim()),
        None => (args, ""),
    };
    match first.parse::<ResourceKind>() {
        Ok(kind) => ResourceFilter {
            search: remainder.to_string(),
            kind: Some(kind),
        },
        Err(_) => ResourceFilter {
            search: args.to_string(),
            kind: None,
        },
    }
}

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: SLASH_COMMANDS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        if !line.starts_with('/') || line.contains(' ') {
            return Ok((0, vec![]));
        }

        let candidates = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: cmd.clone(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Owned(hint.bright_black().to_string())
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];
        if !line.starts_with('/') || line.contains(' ') {
            return None;
        }
        self.commands
            .iter()
            .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
            .map(|cmd| cmd[line.len()..].to_string())
    }
}

impl Validator for CliHelper {}

/// Runs the chat REPL until `quit`, `exit` or Ctrl-D.
///
/// Replies are awaited on spawned tasks so the prompt stays responsive; a
/// background renderer prints every session event as it arrives.
pub async fn run(context: &AppContext, identity: &dyn IdentityProvider) -> Result<()> {
    let session = Arc::clone(context.session());
    let renderer = spawn_renderer(session.subscribe());

    let mut rl: Editor<CliHelper, DefaultHistory> = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    println!("{}", "=== BrainBloom ===".bright_magenta().bold());
    if let Some(user) = identity.current_user() {
        println!("{}", format!("Welcome back, {}.", user.name).bright_green());
    }
    println!("{}", "How are you feeling today?".bright_blue());
    println!(
        "{}",
        "Type a message, '/help' for commands, or 'quit' to exit.".bright_black()
    );
    println!();

    loop {
        let line = match rl.readline("> ") {
            Ok(line) => line,
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
                continue;
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "Take care. Goodbye!".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {err:?}").red());
                break;
            }
        };

        let Some(command) = parse_line(&line) else {
            continue;
        };
        let _ = rl.add_history_entry(line.trim());

        match command {
            ChatCommand::Quit => {
                println!("{}", "Take care. Goodbye!".bright_green());
                break;
            }
            ChatCommand::Say(text) => spawn_submit(Arc::clone(&session), text),
            ChatCommand::Mood { score, notes } => {
                if let Err(e) = session.record_mood(score, notes) {
                    println!("{}", e.to_string().red());
                }
            }
            ChatCommand::Moods => print_moods(&session),
            ChatCommand::Dismiss => {
                if session.crisis_alert().is_some() {
                    session.dismiss_crisis_alert();
                } else {
                    println!("{}", "No active crisis alert.".bright_black());
                }
            }
            ChatCommand::Peers => report(directory::peers(context).await),
            ChatCommand::Resources(filter) => report(
                directory::resources(context, filter.kind, filter.search).await,
            ),
            ChatCommand::Agents => report(monitor::run(context, false).await),
            ChatCommand::Emergency => directory::print_emergency(),
            ChatCommand::Help => print_help(),
            ChatCommand::Unknown(name) => {
                println!(
                    "{}",
                    format!("Unknown command: {name}. Type /help.").bright_black()
                );
            }
            ChatCommand::Usage(usage) => println!("{}", usage.yellow()),
        }
    }

    renderer.abort();
    Ok(())
}

/// Submits on a background task and reports what the renderer cannot see.
fn spawn_submit(session: Arc<SessionStore>, text: String) {
    tokio::spawn(async move {
        match session.submit_user_message(&text).await {
            Ok(SubmitOutcome::Ignored(IgnoreReason::AlreadyComposing)) => {
                println!(
                    "{}",
                    "Still working on a reply. Your message was not sent.".yellow()
                );
            }
            Ok(_) => {}
            Err(e) => {
                eprintln!(
                    "{}",
                    format!("Couldn't get a reply ({e}). Please try again.").red()
                );
            }
        }
    });
}

fn report(result: Result<()>) {
    if let Err(e) = result {
        eprintln!("{}", format!("Error: {e}").red());
    }
}

fn spawn_renderer(mut events: broadcast::Receiver<SessionEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => render_event(&event),
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "[Chat] Renderer fell behind");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}

fn render_event(event: &SessionEvent) {
    match event {
        SessionEvent::MessageAppended { message } => render_message(message),
        SessionEvent::ComposingChanged { composing: true } => {
            println!("{}", "BrainBloom is typing...".bright_black().italic());
        }
        SessionEvent::ComposingChanged { composing: false } => {}
        SessionEvent::CrisisAlertRaised { alert } => render_alert(alert),
        SessionEvent::CrisisAlertCleared { .. } => {
            println!("{}", "Crisis alert dismissed.".bright_black());
        }
        SessionEvent::MoodRecorded { entry } => {
            println!(
                "{}",
                format!("Mood logged: {} ({})", entry.mood.value(), entry.mood.label()).green()
            );
            if let Some(triggers) = entry.triggers.as_ref().filter(|t| !t.is_empty()) {
                println!("  {}", format!("Triggers: {}", triggers.join(", ")).bright_black());
            }
        }
    }
}

fn render_message(message: &Message) {
    let time = message.timestamp.format("%H:%M").to_string();
    match message.sender {
        // Already visible at the prompt.
        Sender::User => {}
        Sender::Agent => {
            let body = match message.kind.unwrap_or_default() {
                MessageKind::Crisis | MessageKind::Warning => message.content.yellow(),
                MessageKind::Normal => message.content.bright_blue(),
            };
            println!("{} {}", "BrainBloom:".bright_magenta().bold(), body);
            println!("{}", time.bright_black());
        }
        Sender::System => println!("{}", message.content.bright_black()),
    }
}

fn render_alert(alert: &CrisisAlert) {
    println!();
    println!(
        "{} {}",
        "!! Crisis Support Needed".bright_red().bold(),
        format!("[{}]", alert.level).red()
    );
    println!("   {}", alert.message);
    for action in &alert.actions {
        match phone_for_action(action) {
            Some(phone) => println!("   - {} ({})", action.bold(), phone.bright_red()),
            None => println!("   - {} (try /resources crisis_center)", action.bold()),
        }
    }
    println!("   {}", "You are not alone. Type /dismiss to hide this alert.".bright_black());
    println!();
}

fn print_moods(session: &SessionStore) {
    let state = session.snapshot();
    if state.moods.is_empty() {
        println!("{}", "No mood check-ins yet. Try /mood 3.".bright_black());
        return;
    }
    for entry in &state.moods {
        println!(
            "  {} {} ({}) {}",
            entry.date.format("%Y-%m-%d %H:%M").to_string().bright_black(),
            entry.mood.value(),
            entry.mood.label(),
            entry.notes.as_deref().unwrap_or("")
        );
    }
    let summary = state.mood_summary();
    if let Some(average) = summary.average {
        println!("  {} entries, average {:.1}", summary.count, average);
    }
}

fn print_help() {
    println!("{}", "Commands:".bold());
    let rows = [
        ("/mood <1-5> [notes]", "Log how you feel"),
        ("/moods", "Show your mood log"),
        ("/dismiss", "Hide the crisis alert"),
        ("/peers", "Find peer supporters"),
        ("/resources [kind] [search]", "Find professional help nearby"),
        ("/agents", "Show agent status"),
        ("/emergency", "Show emergency hotlines"),
        ("quit", "Leave the chat"),
    ];
    for (command, description) in rows {
        println!("  {:<28} {}", command.bright_cyan(), description);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_submitted_trimmed() {
        assert_eq!(
            parse_line("  hello there "),
            Some(ChatCommand::Say("hello there".to_string()))
        );
        assert_eq!(parse_line("   "), None);
        assert_eq!(parse_line("exit"), Some(ChatCommand::Quit));
    }

    #[test]
    fn test_mood_command() {
        assert_eq!(
            parse_line("/mood 4 rough day at work"),
            Some(ChatCommand::Mood {
                score: 4,
                notes: Some("rough day at work".to_string())
            })
        );
        assert_eq!(
            parse_line("/mood 2"),
            Some(ChatCommand::Mood {
                score: 2,
                notes: None
            })
        );
        assert_eq!(parse_line("/mood"), Some(ChatCommand::Usage(MOOD_USAGE)));
        assert_eq!(parse_line("/mood great"), Some(ChatCommand::Usage(MOOD_USAGE)));
    }

    #[test]
    fn test_resources_command() {
        assert_eq!(
            parse_line("/resources therapist anxiety"),
            Some(ChatCommand::Resources(ResourceFilter {
                search: "anxiety".to_string(),
                kind: Some(ResourceKind::Therapist),
            }))
        );
        assert_eq!(
            parse_line("/resources group therapy"),
            Some(ChatCommand::Resources(ResourceFilter {
                search: "group therapy".to_string(),
                kind: None,
            }))
        );
        assert_eq!(
            parse_line("/resources"),
            Some(ChatCommand::Resources(ResourceFilter::default()))
        );
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(
            parse_line("/plan"),
            Some(ChatCommand::Unknown("/plan".to_string()))
        );
    }

    #[test]
    fn test_every_slash_command_parses() {
        for command in SLASH_COMMANDS {
            let parsed = parse_line(command).unwrap();
            assert!(!matches!(parsed, ChatCommand::Unknown(_)), "{command}");
        }
    }
}
