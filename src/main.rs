//! Interpret chat messages from the command line
//!
//! Usage:
//!   anota "gastei 37,90 no supermercado ontem" "resumo da semana"
//!   anota --now 2024-08-10 --json < mensagens.txt
//!   anota --session "recebi 1500 de salário" "saldo do mês" "desfazer último"

use std::io::BufRead;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use anota::cli::{session::Journal, table::Table};
use anota::interpret::error::Record;
use anota::{Interpretation, Interpreter, Lexicon, Message};

#[derive(Parser, Debug)]
#[command(name = "anota")]
#[command(about = "Turn Portuguese chat messages into transactions or commands")]
struct Args {
    /// Messages to interpret; read one per line from stdin if none is given
    messages: Vec<String>,

    /// Reference instant, YYYY-MM-DD or YYYY-MM-DDTHH:MM[:SS] (default: now)
    #[arg(long, value_parser = parse_now)]
    now: Option<NaiveDateTime>,

    /// JSON file overriding the built-in keyword tables
    #[arg(long)]
    lexicon: Option<PathBuf>,

    /// Print one JSON object per message instead of a table
    #[arg(long)]
    json: bool,

    /// Record transactions and answer commands as a chat session would
    #[arg(long)]
    session: bool,
}

fn parse_now(s: &str) -> Result<NaiveDateTime, String> {
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date.and_time(chrono::NaiveTime::MIN));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .map_err(|_| format!("'{}' is not YYYY-MM-DD or YYYY-MM-DDTHH:MM[:SS]", s))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let lexicon = match &args.lexicon {
        Some(path) => Lexicon::load(path)?,
        None => Lexicon::default(),
    };
    let interpreter = Interpreter::new(lexicon);
    let now = args.now.unwrap_or_else(|| chrono::Local::now().naive_local());
    info!(%now, "reference instant");

    let messages = if args.messages.is_empty() {
        std::io::stdin()
            .lock()
            .lines()
            .collect::<std::io::Result<Vec<_>>>()
            .context("Reading messages from stdin")?
    } else {
        args.messages.clone()
    };

    let mut journal = Journal::new();
    let mut rows = Vec::new();
    for text in messages {
        let interp = interpreter.interpret(&Message::new(text.as_str(), now, ()));
        let diagnostics = match &interp {
            Interpretation::Unrecognized(u) => Record::from_unrecognized(u),
            Interpretation::Transaction(rec) => Record::check(rec, now.date()),
            Interpretation::Command(_) => Record::new(),
        };
        if !diagnostics.is_empty() {
            eprint!("{}", diagnostics);
        }
        if args.json {
            println!("{}", serde_json::to_string(&interp)?);
        }
        if args.session {
            println!("{}", journal.apply(&interp, now.date()));
        }
        rows.push((text, interp));
    }
    if !args.json && !args.session {
        print!("{}", Table::from(&rows));
    }
    Ok(())
}
