/// Lexicon Linter: checks a lexicon directory before it ships.
///
/// Usage: lexicon_linter <lexicon_dir>

use std::collections::HashMap;
use std::path::Path;
use std::process;

use word_maker::core::generator::{estimate_vocabulary_size, WordGenerator};
use word_maker::core::lexicon::Lexicon;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        println!("Usage: lexicon_linter <lexicon_dir>");
        process::exit(0);
    }

    let lexicon = match Lexicon::load(Path::new(&args[1])) {
        Ok(lexicon) => lexicon,
        Err(e) => {
            eprintln!("ERROR: Failed to load lexicon: {}", e);
            process::exit(1);
        }
    };

    println!(
        "Loaded {} roots, {} suffixes, {} forbidden sequences, {} + {} exclusions",
        lexicon.roots().len(),
        lexicon.suffixes().len(),
        lexicon.forbidden().len(),
        lexicon.corpus_len(),
        lexicon.supplemental_len()
    );

    let (errors, warnings) = lint_lexicon(&lexicon);

    println!("\n=== Lexicon Lint Report ===\n");

    if errors.is_empty() && warnings.is_empty() {
        println!("All checks passed!");
    }

    for warning in &warnings {
        println!("WARNING: {}", warning);
    }

    for error in &errors {
        println!("ERROR: {}", error);
    }

    println!(
        "\nSummary: {} errors, {} warnings, vocabulary estimate {}",
        errors.len(),
        warnings.len(),
        estimate_vocabulary_size(&lexicon)
    );

    if errors.is_empty() {
        process::exit(0);
    } else {
        process::exit(1);
    }
}

fn lint_lexicon(lexicon: &Lexicon) -> (Vec<String>, Vec<String>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    // Duplicates are allowed, but worth seeing at a glance
    for (kind, items) in [("root", lexicon.roots()), ("suffix", lexicon.suffixes())] {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for item in items {
            *counts.entry(item.as_str()).or_default() += 1;
        }
        let mut repeated: Vec<(&str, usize)> =
            counts.into_iter().filter(|(_, n)| *n > 1).collect();
        repeated.sort();
        for (item, n) in repeated {
            warnings.push(format!("{} '{}' appears {} times (weighted draw)", kind, item, n));
        }
    }

    // A morpheme containing a forbidden sequence can never appear in output
    for (kind, items) in [("root", lexicon.roots()), ("suffix", lexicon.suffixes())] {
        for item in items {
            if lexicon.is_forbidden(item) {
                warnings.push(format!(
                    "{} '{}' contains a forbidden sequence and is never used",
                    kind, item
                ));
            }
            if item.is_empty() {
                errors.push(format!("{} list contains an empty entry", kind));
                continue;
            }
            if !item.chars().all(|c| c.is_ascii_lowercase()) {
                errors.push(format!(
                    "{} '{}' has characters outside a-z and cannot be spelled out",
                    kind, item
                ));
            }
        }
    }

    // Single-root words make up ~85% of draws; if none survive, generation
    // spins on the rare multi-root draws.
    let generator = WordGenerator::new(lexicon);
    let mut accepted = 0usize;
    let mut total = 0usize;
    for root in lexicon.roots() {
        for suffix in lexicon.suffixes() {
            total += 1;
            if generator.accepts(&format!("{}{}", root, suffix)) {
                accepted += 1;
            }
        }
    }
    if accepted == 0 {
        errors.push("no root + suffix combination passes the filters".to_string());
    } else {
        let rate = accepted as f64 / total as f64;
        println!(
            "{} of {} root + suffix combinations pass ({:.1}%)",
            accepted,
            total,
            rate * 100.0
        );
        if rate < 0.25 {
            warnings.push(format!(
                "only {:.1}% of root + suffix combinations pass; generation will retry often",
                rate * 100.0
            ));
        }
    }

    (errors, warnings)
}
