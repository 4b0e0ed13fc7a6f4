use std::io::Write;

use anyhow::{bail, Result};
use faq_engine::{EffectiveTally, QueryHit, QueryState};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Json,
}

impl Format {
    pub fn parse(format: &str) -> Result<Self> {
        match format {
            "text" => Ok(Format::Text),
            "json" => Ok(Format::Json),
            other => bail!("unknown output format: {other}"),
        }
    }
}

#[derive(Serialize)]
struct JsonHits<'a> {
    count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    query: Option<&'a QueryState>,
    hits: &'a [QueryHit<'a>],
}

pub fn print_hits<W: Write>(
    out: &mut W,
    format: Format,
    query: Option<&QueryState>,
    hits: &[QueryHit<'_>],
) -> Result<()> {
    match format {
        Format::Text => {
            writeln!(out, "{} questions found", hits.len())?;
            for hit in hits {
                let record = hit.record;
                writeln!(out, "[{}] {}", record.id, record.question)?;
                write!(
                    out,
                    "    category={} helpful={} not_helpful={}",
                    record.category, hit.tally.helpful, hit.tally.not_helpful
                )?;
                if let Some(score) = hit.score {
                    write!(out, " score={score:.4}")?;
                }
                writeln!(out)?;
            }
        }
        Format::Json => {
            let json = JsonHits {
                count: hits.len(),
                query,
                hits,
            };
            writeln!(out, "{}", serde_json::to_string_pretty(&json)?)?;
        }
    }
    Ok(())
}

pub fn print_categories<W: Write>(out: &mut W, format: Format, categories: &[String]) -> Result<()> {
    match format {
        Format::Text => {
            for category in categories {
                writeln!(out, "{category}")?;
            }
        }
        Format::Json => writeln!(out, "{}", serde_json::to_string_pretty(categories)?)?,
    }
    Ok(())
}

#[derive(Serialize)]
struct JsonVote<'a> {
    id: &'a str,
    acknowledgment: &'a str,
    helpful: u32,
    not_helpful: u32,
}

pub fn print_vote<W: Write>(
    out: &mut W,
    format: Format,
    id: &str,
    acknowledgment: &str,
    tally: EffectiveTally,
) -> Result<()> {
    match format {
        Format::Text => {
            writeln!(out, "{acknowledgment}")?;
            writeln!(
                out,
                "id={id} helpful={} not_helpful={}",
                tally.helpful, tally.not_helpful
            )?;
        }
        Format::Json => {
            let json = JsonVote {
                id,
                acknowledgment,
                helpful: tally.helpful,
                not_helpful: tally.not_helpful,
            };
            writeln!(out, "{}", serde_json::to_string_pretty(&json)?)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use faq_engine::{Catalog, FaqEngine, VoteLedger};

    #[test]
    fn rejects_unknown_format() {
        assert_eq!(Format::parse("json").expect("json"), Format::Json);
        assert!(Format::parse("yaml").is_err());
    }

    #[test]
    fn text_hits_include_count_and_tallies() {
        let engine = FaqEngine::with_defaults(Catalog::builtin().expect("builtin"));
        let state = QueryState::category("Payments");
        let results = engine.query(&state, &VoteLedger::new());

        let mut buf = Vec::new();
        print_hits(&mut buf, Format::Text, Some(&state), &results.hits).expect("print");
        let text = String::from_utf8(buf).expect("utf8");

        assert!(text.starts_with("1 questions found\n"));
        assert!(text.contains("[2] What payment methods work best for Indian freelancers?"));
        assert!(text.contains("helpful=156 not_helpful=8"));
        assert!(!text.contains("score="));
    }

    #[test]
    fn json_vote_has_tally_fields() {
        let mut buf = Vec::new();
        let tally = EffectiveTally {
            helpful: 11,
            not_helpful: 0,
        };
        print_vote(&mut buf, Format::Json, "1", "Thanks for your feedback!", tally).expect("print");

        let json: serde_json::Value = serde_json::from_slice(&buf).expect("json");
        assert_eq!(json["helpful"], 11);
        assert_eq!(json["acknowledgment"], "Thanks for your feedback!");
    }
}
