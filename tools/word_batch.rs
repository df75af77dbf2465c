/// Word Batch: print a batch of generated words.
///
/// Usage: word_batch [--count <n>] [--seed <n>] [--lexicon <dir>] [--config <file.ron>] [--spell]
use std::collections::HashSet;
use std::path::Path;
use std::process;

use word_maker::core::composer::spell;
use word_maker::WordMaker;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let mut builder = WordMaker::builder();
    let mut count = 10usize;
    let mut with_spelling = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" if i + 1 < args.len() => {
                i += 1;
                count = args[i].parse().unwrap_or_else(|_| {
                    eprintln!("Error: --count must be a positive integer");
                    process::exit(1);
                });
            }
            "--seed" if i + 1 < args.len() => {
                i += 1;
                let seed = args[i].parse().unwrap_or_else(|_| {
                    eprintln!("Error: --seed must be an integer");
                    process::exit(1);
                });
                builder = builder.seed(seed);
            }
            "--lexicon" if i + 1 < args.len() => {
                i += 1;
                builder = builder.lexicon_dir(&args[i]);
            }
            "--config" if i + 1 < args.len() => {
                i += 1;
                builder = builder.config_file(Path::new(&args[i])).unwrap_or_else(|e| {
                    eprintln!("Error loading config '{}': {}", args[i], e);
                    process::exit(1);
                });
            }
            "--spell" => with_spelling = true,
            "--help" | "-h" => {
                println!(
                    "Usage: word_batch [--count <n>] [--seed <n>] [--lexicon <dir>] [--config <file.ron>] [--spell]"
                );
                process::exit(0);
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                process::exit(1);
            }
        }
        i += 1;
    }

    let mut maker = builder.build().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        process::exit(1);
    });

    let mut seen = HashSet::new();
    for _ in 0..count {
        let word = maker.make_word().unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            process::exit(1);
        });
        if with_spelling {
            println!("{:<24} {}", word, spell(&word));
        } else {
            println!("{}", word);
        }
        seen.insert(word);
    }

    eprintln!(
        "{} words, {} distinct, vocabulary estimate {}",
        count,
        seen.len(),
        maker.vocabulary_size()
    );
}
