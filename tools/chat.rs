/// Chat: console stand-in for the voice platform.
///
/// Usage: chat [--config <file.ron>] [--lexicon <dir>] [--seed <n>] [--markup]
///
/// Type what you would say: "yes", "no", "make a word", "how many",
/// "help", "stop". `:intent <name>` sends an intent by name, `:state`
/// shows the session state, `:quit` ends the session.

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process;

use word_maker::schema::intent::Intent;
use word_maker::schema::response::DialogResponse;
use word_maker::schema::session::{DialogRequest, SessionState};
use word_maker::WordMaker;

const SESSION_ID: &str = "console";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let mut builder = WordMaker::builder();
    let mut show_markup = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" if i + 1 < args.len() => {
                i += 1;
                builder = builder.config_file(Path::new(&args[i])).unwrap_or_else(|e| {
                    eprintln!("Error loading config '{}': {}", args[i], e);
                    process::exit(1);
                });
            }
            "--lexicon" if i + 1 < args.len() => {
                i += 1;
                builder = builder.lexicon_dir(&args[i]);
            }
            "--seed" if i + 1 < args.len() => {
                i += 1;
                let seed = args[i].parse().unwrap_or_else(|_| {
                    eprintln!("Error: --seed must be an integer");
                    process::exit(1);
                });
                builder = builder.seed(seed);
            }
            "--markup" => show_markup = true,
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                process::exit(1);
            }
        }
        i += 1;
    }

    let mut maker = builder.build().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    let mut state = SessionState::Stateless;
    if !send(&mut maker, &mut state, Intent::StartSession, show_markup) {
        return;
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("you> ");
        stdout.flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).is_err() || line.is_empty() {
            send(&mut maker, &mut state, Intent::SessionEnded, show_markup);
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let intent = if let Some(command) = line.strip_prefix(':') {
            let parts: Vec<&str> = command.split_whitespace().collect();
            match parts.first().copied() {
                Some("quit") | Some("q") => Intent::SessionEnded,
                Some("state") => {
                    println!("state: {} (token {:?})", state, state.token());
                    continue;
                }
                Some("intent") if parts.len() > 1 => Intent::from_name(parts[1]),
                _ => {
                    println!("Commands: :intent <name>, :state, :quit");
                    continue;
                }
            }
        } else {
            intent_for(line)
        };

        if !send(&mut maker, &mut state, intent, show_markup) {
            break;
        }
    }
}

/// Run one turn. Returns false once the session is over.
fn send(maker: &mut WordMaker, state: &mut SessionState, intent: Intent, markup: bool) -> bool {
    let request = DialogRequest::new(SESSION_ID, intent, *state);
    match maker.handle(&request) {
        Ok(Some(response)) => {
            print_response(&response, markup);
            *state = response.state;
            !response.should_end_session
        }
        Ok(None) => {
            println!("(session ended)");
            false
        }
        Err(e) => {
            eprintln!("ERROR: {}", e);
            false
        }
    }
}

/// Rough keyword spotting, standing in for the platform's language model.
fn intent_for(utterance: &str) -> Intent {
    let lower = utterance.to_lowercase();
    let words: Vec<&str> = lower
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();
    let has = |w: &str| words.contains(&w);

    if has("stop") {
        Intent::Stop
    } else if has("cancel") {
        Intent::Cancel
    } else if has("help") {
        Intent::Help
    } else if lower.contains("how many") {
        Intent::RequestCount
    } else if has("word") || has("another") {
        Intent::RequestWord
    } else if has("yes") || has("sure") || has("yeah") || has("ok") {
        Intent::Yes
    } else if has("no") || has("nope") {
        Intent::No
    } else if has("open") || has("start") || has("launch") {
        Intent::StartSession
    } else {
        Intent::Unhandled
    }
}

fn print_response(response: &DialogResponse, markup: bool) {
    let render = |text: &str| {
        if markup {
            text.to_string()
        } else {
            strip_markup(text)
        }
    };

    println!("maker> {}", render(&response.speech));
    if let Some(ref card) = response.card {
        println!("  +-- {}", card.title);
        println!("  |   {}", card.body);
        println!("  +-- [{}]", card.images.small_image_url);
    }
    if let Some(ref reprompt) = response.reprompt {
        println!("  (if silent: {})", render(reprompt));
    }
}

/// Drop speech markup tags and collapse the whitespace they leave behind.
fn strip_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;
    for c in text.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => {
                in_tag = false;
                out.push(' ');
            }
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn print_usage() {
    println!("Usage: chat [--config <file.ron>] [--lexicon <dir>] [--seed <n>] [--markup]");
    println!();
    println!("Say: yes, no, make a word, how many, help, stop");
    println!("Commands: :intent <name>, :state, :quit");
}
