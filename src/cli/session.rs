//! Interactive quote session.
//!
//! Launched by running `quotedeck` with no subcommand. An empty line deals
//! a new quote; type `help` for commands, Tab for completion.

use rustyline::completion::{Completer, Pair};
use rustyline::config::CompletionType;
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{
    Cmd, ConditionalEventHandler, Editor, Event, EventContext, EventHandler, Helper, KeyEvent,
    RepeatCount,
};

use crate::acquisition::{PageSelector, DEFAULT_SETTLE, MAX_PAGE};
use crate::cli::fetch_cmd::MAX_WAIT_SECS;
use crate::cli::{copy_cmd, doctor, export_cmd, status_cmd};
use crate::config::Config;
use crate::controller::App;
use crate::export::{self, preview};
use crate::view::{Notice, UiSurface};
use std::path::Path;
use std::time::Duration;

/// Available session commands.
const COMMANDS: &[(&str, &str)] = &[
    ("new", "Show a new random quote (empty line works too)"),
    ("scrape", "Scrape quotes: scrape [1-10|random]"),
    ("page", "Choose the page to scrape: page <1-10|random>"),
    ("wait", "Set the scrape settle wait: wait <seconds>"),
    ("history", "List history, or reload an entry: history <n>"),
    ("copy", "Copy the current quote text"),
    ("export", "Save the current quote as a PNG card"),
    ("preview", "Render the current card inline"),
    ("share", "Print a tweet link ('share image' for cards)"),
    ("tags", "Toggle the tag row"),
    ("author", "Toggle the author link row"),
    ("test", "Test the scraping API connection"),
    ("status", "Show cache and API status"),
    ("clear", "Clear all cached data"),
    ("cls", "Clear the screen"),
    ("doctor", "Run environment checks"),
    ("help", "Show available commands"),
    ("exit", "Quit the session"),
];

/// Session helper for tab completion.
struct QuoteHelper;

impl Default for QuoteHelper {
    fn default() -> Self {
        Self
    }
}

impl Completer for QuoteHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let input = &line[..pos];

        if !input.contains(' ') {
            let matches: Vec<Pair> = COMMANDS
                .iter()
                .filter(|(cmd, _)| cmd.starts_with(input))
                .map(|(cmd, desc)| Pair {
                    display: format!("{cmd:<10} {desc}"),
                    replacement: format!("{cmd} "),
                })
                .collect();
            return Ok((0, matches));
        }

        // Argument completion for the few commands that take keywords.
        let parts: Vec<&str> = input.splitn(2, ' ').collect();
        let cmd = parts[0];
        let args = if parts.len() > 1 { parts[1] } else { "" };

        let keywords: &[&str] = match cmd {
            "scrape" | "s" | "page" => &["random"],
            "share" => &["image"],
            _ => return Ok((pos, Vec::new())),
        };

        let prefix_start = input.len() - args.len();
        let matches: Vec<Pair> = keywords
            .iter()
            .filter(|k| k.starts_with(args.trim()))
            .map(|k| Pair {
                display: k.to_string(),
                replacement: format!("{k} "),
            })
            .collect();
        Ok((prefix_start, matches))
    }
}

impl Hinter for QuoteHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &rustyline::Context<'_>) -> Option<String> {
        if pos < line.len() || line.is_empty() {
            return None;
        }
        if !line.contains(' ') {
            for (cmd, _) in COMMANDS {
                if cmd.starts_with(line) && *cmd != line {
                    return Some(cmd[line.len()..].to_string());
                }
            }
        }
        None
    }
}

impl Highlighter for QuoteHelper {}
impl Validator for QuoteHelper {}
impl Helper for QuoteHelper {}

struct TabCompleteOrAcceptHint;

impl ConditionalEventHandler for TabCompleteOrAcceptHint {
    fn handle(
        &self,
        _evt: &Event,
        _n: RepeatCount,
        _positive: bool,
        ctx: &EventContext<'_>,
    ) -> Option<Cmd> {
        if ctx.has_hint() {
            Some(Cmd::CompleteHint)
        } else {
            Some(Cmd::Complete)
        }
    }
}

/// Scrape settings carried across commands.
struct SessionState {
    page: PageSelector,
    wait: Duration,
}

/// Run the interactive session.
pub async fn run(config: &Config) -> anyhow::Result<()> {
    eprintln!();
    eprintln!(
        "  \x1b[32m\u{275d}\x1b[0m \x1b[1mquotedeck v{}\x1b[0m \x1b[90m\u{2014} Terminal quote studio\x1b[0m",
        env!("CARGO_PKG_VERSION")
    );
    eprintln!();
    eprintln!(
        "    Press \x1b[36mEnter\x1b[0m for a new quote, \x1b[90mTab\x1b[0m to complete, \x1b[90mexit\x1b[0m to quit."
    );
    eprintln!();

    let mut app = App::bootstrap(config)?;
    let mut ui = crate::cli::surface::TermSurface::new();
    if let Err(e) = app.startup(&mut ui).await {
        eprintln!("  Error: {e:#}");
    }

    let rl_config = rustyline::Config::builder()
        .history_ignore_space(true)
        .auto_add_history(true)
        .completion_type(CompletionType::List)
        .completion_prompt_limit(20)
        .build();

    let mut rl: Editor<QuoteHelper, rustyline::history::DefaultHistory> =
        Editor::with_config(rl_config)?;
    rl.set_helper(Some(QuoteHelper));
    rl.bind_sequence(
        KeyEvent::from('\t'),
        EventHandler::Conditional(Box::new(TabCompleteOrAcceptHint)),
    );

    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    let hist_path = std::path::PathBuf::from(&home).join(".quotedeck_history");
    if hist_path.exists() {
        let _ = rl.load_history(&hist_path);
    }

    let mut state = SessionState {
        page: PageSelector::Random,
        wait: DEFAULT_SETTLE,
    };
    let prompt = " \x1b[36mquote>\x1b[0m ";

    loop {
        match rl.readline(prompt) {
            Ok(line) => {
                let line = line.trim();

                let input = line.strip_prefix('/').unwrap_or(line);
                let mut parts = input.splitn(2, ' ');
                let cmd = parts.next().unwrap_or("");
                let args = parts.next().unwrap_or("").trim();

                match cmd {
                    "" | "new" | "n" => {
                        if let Err(e) = app.select_random(&mut ui) {
                            eprintln!("  Error: {e:#}");
                        }
                    }
                    "scrape" | "s" => {
                        if !args.is_empty() {
                            match parse_page(args) {
                                Ok(page) => state.page = page,
                                Err(msg) => {
                                    eprintln!("  {msg}");
                                    continue;
                                }
                            }
                        }
                        if let Err(e) = app.fetch(state.page, state.wait, &mut ui).await {
                            eprintln!("  Error: {e:#}");
                        }
                    }
                    "page" => {
                        if args.is_empty() {
                            eprintln!("  Page: {}", describe_page(state.page));
                        } else {
                            match parse_page(args) {
                                Ok(page) => {
                                    state.page = page;
                                    eprintln!("  Page: {}", describe_page(page));
                                }
                                Err(msg) => eprintln!("  {msg}"),
                            }
                        }
                    }
                    "wait" => {
                        if args.is_empty() {
                            eprintln!("  Settle wait: {:.1}s", state.wait.as_secs_f32());
                        } else {
                            match parse_wait(args) {
                                Ok(wait) => {
                                    state.wait = wait;
                                    eprintln!("  Settle wait: {:.1}s", wait.as_secs_f32());
                                }
                                Err(msg) => eprintln!("  {msg}"),
                            }
                        }
                    }
                    "history" | "h" => {
                        if args.is_empty() {
                            app.show_history_list(&mut ui);
                        } else {
                            match args.parse::<usize>() {
                                Ok(n) if n >= 1 => app.show_history(n - 1, &mut ui),
                                _ => eprintln!("  Usage: history <number>"),
                            }
                        }
                    }
                    "copy" | "c" => match app.current_quote().cloned() {
                        Some(quote) => {
                            let text = export::card_text(&quote.text, &quote.author);
                            let _ = copy_cmd::copy_text_reporting(&text, &mut ui).await;
                        }
                        None => no_quote(&mut ui),
                    },
                    "export" | "e" => match app.current_quote().cloned() {
                        Some(quote) => {
                            let img = export_cmd::generate_card(&quote, &mut ui);
                            match export_cmd::save_generated(&img, Path::new("."), &mut ui) {
                                Ok(path) => {
                                    print!("{}", preview::ansi_preview(&img));
                                    println!("  {}", path.display());
                                }
                                Err(e) => eprintln!("  Error: {e:#}"),
                            }
                        }
                        None => no_quote(&mut ui),
                    },
                    "preview" => match app.current_quote() {
                        Some(quote) => {
                            let img = export::render_card(&quote.text, &quote.author);
                            print!("{}", preview::ansi_preview(&img));
                        }
                        None => no_quote(&mut ui),
                    },
                    "share" => {
                        if args == "image" {
                            ui.notify(&Notice::info("Sharing feature coming soon!"));
                        } else {
                            match app.current_quote() {
                                Some(quote) => {
                                    println!(
                                        "  {}",
                                        export::tweet_url(&quote.text, &quote.author)
                                    );
                                }
                                None => no_quote(&mut ui),
                            }
                        }
                    }
                    "tags" | "t" => {
                        let on = app.toggle_tags(&mut ui);
                        eprintln!("  Tags {}", if on { "shown" } else { "hidden" });
                    }
                    "author" | "a" => {
                        let on = app.toggle_author_link(&mut ui);
                        eprintln!("  Author link {}", if on { "shown" } else { "hidden" });
                    }
                    "test" => {
                        app.probe_api(&mut ui).await;
                    }
                    "status" => status_cmd::print_status(&app.status()),
                    "clear" => {
                        if let Err(e) = app.clear_cache(&mut ui) {
                            eprintln!("  Error: {e:#}");
                        }
                    }
                    "cls" => eprint!("\x1b[2J\x1b[H"),
                    "doctor" => {
                        if let Err(e) = doctor::run(config).await {
                            eprintln!("  Error: {e:#}");
                        }
                    }
                    "help" | "?" => cmd_help(),
                    "exit" | "quit" | "q" => {
                        eprintln!("  \x1b[90m\u{2728}\x1b[0m Goodbye!");
                        break;
                    }
                    _ => {
                        eprintln!("  Unknown command '{cmd}'. Type help for commands.");
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                eprintln!("  \x1b[90m(Ctrl+C)\x1b[0m Type \x1b[1mexit\x1b[0m to quit.");
            }
            Err(ReadlineError::Eof) => {
                eprintln!("  \x1b[90m\u{2728}\x1b[0m Goodbye!");
                break;
            }
            Err(err) => {
                eprintln!("  Error: {err}");
                break;
            }
        }
    }

    let _ = std::fs::create_dir_all(hist_path.parent().unwrap_or(std::path::Path::new(".")));
    let _ = rl.save_history(&hist_path);

    Ok(())
}

fn no_quote(ui: &mut dyn UiSurface) {
    ui.notify(&Notice::warning("No quotes available. Please scrape first."));
}

fn cmd_help() {
    eprintln!();
    eprintln!("  Commands:");
    eprintln!();
    for (cmd, desc) in COMMANDS {
        eprintln!("    {cmd:<10} {desc}");
    }
    eprintln!();
    eprintln!("  Tip: an empty line deals a new quote.");
    eprintln!();
}

fn parse_page(arg: &str) -> Result<PageSelector, String> {
    if arg.eq_ignore_ascii_case("random") {
        return Ok(PageSelector::Random);
    }
    match arg.parse::<u32>() {
        Ok(n) if (1..=MAX_PAGE).contains(&n) => Ok(PageSelector::Page(n)),
        _ => Err(format!("Usage: page <1-{MAX_PAGE}|random>")),
    }
}

fn describe_page(page: PageSelector) -> String {
    match page {
        PageSelector::Random => "random".to_string(),
        PageSelector::Page(n) => n.to_string(),
    }
}

fn parse_wait(arg: &str) -> Result<Duration, String> {
    match arg.parse::<f32>() {
        Ok(secs) if secs.is_finite() && secs >= 0.0 => {
            Ok(Duration::from_secs_f32(secs.min(MAX_WAIT_SECS)))
        }
        _ => Err(format!("Usage: wait <seconds> (0-{MAX_WAIT_SECS:.0})")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_page_accepts_range_and_random() {
        assert_eq!(parse_page("3").unwrap(), PageSelector::Page(3));
        assert_eq!(parse_page("random").unwrap(), PageSelector::Random);
        assert_eq!(parse_page("RANDOM").unwrap(), PageSelector::Random);
        assert!(parse_page("0").is_err());
        assert!(parse_page("11").is_err());
        assert!(parse_page("abc").is_err());
    }

    #[test]
    fn test_parse_wait_clamps_to_limit() {
        assert_eq!(parse_wait("2").unwrap(), Duration::from_secs(2));
        assert_eq!(parse_wait("0").unwrap(), Duration::ZERO);
        assert_eq!(
            parse_wait("99").unwrap(),
            Duration::from_secs_f32(MAX_WAIT_SECS)
        );
        assert!(parse_wait("-1").is_err());
        assert!(parse_wait("NaN").is_err());
    }

    #[test]
    fn test_describe_page() {
        assert_eq!(describe_page(PageSelector::Random), "random");
        assert_eq!(describe_page(PageSelector::Page(7)), "7");
    }
}
