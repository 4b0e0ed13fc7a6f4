use std::io::{BufRead, Write};
use std::sync::Arc;

use anyhow::{anyhow, bail, Result};
use faq_engine::{FaqEngine, RecordingNotifier, Session, SortBy};

use crate::output::{print_categories, print_hits, print_vote, Format};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Search(String),
    Category(String),
    Sort(SortBy),
    Clear,
    Vote { id: String, helpful: bool },
    Tally(String),
    Show,
    Categories,
    Quit,
}

impl Command {
    /// `Ok(None)` for blank lines and `#` comments.
    fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        let command = match word {
            "search" => Command::Search(rest.to_string()),
            "category" => Command::Category(rest.to_string()),
            "sort" => Command::Sort(rest.parse()?),
            "clear" => Command::Clear,
            "vote" => {
                let mut parts = rest.split_whitespace();
                let id = parts.next().ok_or_else(|| anyhow!("usage: vote <id> up|down"))?;
                let helpful = match parts.next() {
                    Some("up") => true,
                    Some("down") => false,
                    _ => bail!("usage: vote <id> up|down"),
                };
                Command::Vote {
                    id: id.to_string(),
                    helpful,
                }
            }
            "tally" if !rest.is_empty() => Command::Tally(rest.to_string()),
            "tally" => bail!("usage: tally <id>"),
            "show" => Command::Show,
            "categories" => Command::Categories,
            "quit" | "exit" => Command::Quit,
            other => bail!("unknown command: {other}"),
        };
        Ok(Some(command))
    }
}

/// Runs line commands against one session until `quit` or end of input.
/// Bad commands are reported inline and do not end the session.
pub fn run_session<R: BufRead, W: Write>(
    engine: Arc<FaqEngine>,
    format: Format,
    input: R,
    out: &mut W,
) -> Result<()> {
    let mut session = Session::with_notifier(engine, RecordingNotifier::new());

    for line in input.lines() {
        let line = line?;
        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(err) => {
                writeln!(out, "error: {err:#}")?;
                continue;
            }
        };
        tracing::debug!(?command, "session command");

        match command {
            Command::Search(term) => session.set_search(term),
            Command::Category(category) => session.set_category(&category),
            Command::Sort(sort) => session.set_sort(sort),
            Command::Clear => session.clear_filters(),
            Command::Vote { id, helpful } => {
                let tally = session.vote(&id, helpful);
                let ack = session.notifier().last().unwrap_or_default();
                print_vote(out, format, &id, ack, tally)?;
            }
            Command::Tally(id) => {
                let tally = session.tally(&id);
                writeln!(
                    out,
                    "id={id} helpful={} not_helpful={}",
                    tally.helpful, tally.not_helpful
                )?;
            }
            Command::Show => {
                let results = session.query();
                print_hits(out, format, Some(session.state()), &results.hits)?;
            }
            Command::Categories => print_categories(out, format, &session.engine().categories())?,
            Command::Quit => break,
        }
    }

    Ok(())
}
