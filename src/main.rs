use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use hashspell::{CheckOutcome, Config, HashFunction, SpellChecker};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

const QUIT: &str = "quit";

#[derive(Debug, Clone, Copy, ValueEnum)]
enum HashArg {
    Sum,
    PositionWeighted,
}

impl From<HashArg> for HashFunction {
    fn from(arg: HashArg) -> Self {
        match arg {
            HashArg::Sum => HashFunction::Sum,
            HashArg::PositionWeighted => HashFunction::PositionWeighted,
        }
    }
}

/// Interactive spell checker. Type words, or "quit" to quit.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Word list to load.
    #[arg(default_value = "dictionary.txt")]
    dictionary: PathBuf,

    /// Initial number of hash table buckets.
    #[arg(long, default_value_t = hashspell::config::DEFAULT_CAPACITY)]
    capacity: usize,

    #[arg(long, value_enum, default_value_t = HashArg::Sum)]
    hash: HashArg,

    /// Compare words exactly as typed instead of lowercasing them.
    #[arg(long)]
    keep_case: bool,

    /// Score dictionary words in parallel.
    #[arg(long)]
    parallel: bool,

    /// Print one JSON object per checked word.
    #[arg(long)]
    json: bool,

    /// Dump the loaded hash table before starting.
    #[arg(long)]
    print_table: bool,
}

impl Args {
    fn config(&self) -> Config {
        Config::default()
            .with_capacity(self.capacity)
            .with_hash(self.hash.into())
            .with_normalize_case(!self.keep_case)
            .with_parallel_scoring(self.parallel)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = args.config();
    let started = Instant::now();
    let mut checker = SpellChecker::from_file(&args.dictionary, config)
        .with_context(|| format!("failed to load {}", args.dictionary.display()))?;
    let load_time = started.elapsed();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.print_table {
        write!(out, "{}", checker.dictionary())?;
    }
    if !args.json {
        writeln!(out, "{}", load_summary(checker.len(), load_time))?;
    }

    let stdin = io::stdin();
    run_session(&mut checker, &config, stdin.lock(), &mut out, args.json)
}

fn load_summary(words: usize, elapsed: Duration) -> String {
    format!(
        "Dictionary of {words} words loaded in {:.6} seconds",
        elapsed.as_secs_f64()
    )
}

/// Reads queries a line at a time until `quit` or end of input. Every
/// whitespace-separated token on a line is checked on its own.
fn run_session<R: BufRead, W: Write>(
    checker: &mut SpellChecker,
    config: &Config,
    mut input: R,
    out: &mut W,
    json: bool,
) -> Result<()> {
    let mut line = String::new();
    loop {
        if !json {
            write!(out, "Enter a word or \"{QUIT}\" to quit: ")?;
            out.flush()?;
        }
        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(());
        }
        for token in line.split_whitespace() {
            let token = config.normalize(token);
            if token == QUIT {
                return Ok(());
            }
            let outcome = checker.check(&token);
            report(out, &outcome, json)?;
        }
    }
}

fn report(out: &mut impl Write, outcome: &CheckOutcome, json: bool) -> Result<()> {
    if json {
        serde_json::to_writer(&mut *out, outcome)?;
        writeln!(out)?;
        return Ok(());
    }
    match outcome {
        CheckOutcome::Correct { word } => {
            writeln!(out, "The inputted word '{word}' is spelled correctly.\n")?;
        }
        CheckOutcome::Misspelled { word, suggestions } => {
            writeln!(out, "The inputted word '{word}' is spelled incorrectly.")?;
            if suggestions.is_empty() {
                writeln!(out, "No suggestions: the dictionary is empty.\n")?;
            } else {
                let words: Vec<&str> = suggestions.iter().map(|s| s.word.as_str()).collect();
                writeln!(out, "Did you mean...: {} ?\n", words.join(" "))?;
            }
        }
    }
    Ok(())
}
