use crate::config::EngineConfig;
use crate::fuzzy::{field_norm, Haystack, MatchOptions, Pattern};
use crate::model::{FaqRecord, SearchField};

#[derive(Debug, Clone)]
struct IndexedValue {
    field: SearchField,
    text: Haystack,
    norm: f64,
}

/// One search hit: the record's position in the catalog and its combined score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredMatch {
    pub position: usize,
    pub score: f64,
    pub fields: Vec<SearchField>,
}

/// Fuzzy index over question, answer and every tag of each record.
#[derive(Debug, Clone)]
pub struct FuzzyIndex {
    records: Vec<Vec<IndexedValue>>,
    options: MatchOptions,
    max_chunk: usize,
    key_weight: f64,
}

impl FuzzyIndex {
    pub fn build(records: &[FaqRecord], config: &EngineConfig) -> Self {
        let records: Vec<Vec<IndexedValue>> = records.iter().map(index_record).collect();
        let values: usize = records.iter().map(Vec::len).sum();
        tracing::debug!(records = records.len(), values, "fuzzy index built");

        Self {
            records,
            options: MatchOptions::from(config),
            max_chunk: config.max_pattern_chunk,
            key_weight: 1.0 / SearchField::ALL.len() as f64,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Matches ordered by ascending score, ties in catalog order.
    pub fn search(&self, term: &str) -> Vec<ScoredMatch> {
        let pattern = Pattern::new(term, self.max_chunk);
        if pattern.is_empty() {
            return Vec::new();
        }

        let mut scored: Vec<ScoredMatch> = self
            .records
            .iter()
            .enumerate()
            .filter_map(|(position, values)| self.score_record(&pattern, position, values))
            .collect();

        scored.sort_by(|a, b| a.score.total_cmp(&b.score));
        scored
    }

    fn score_record(
        &self,
        pattern: &Pattern,
        position: usize,
        values: &[IndexedValue],
    ) -> Option<ScoredMatch> {
        let mut total = 1.0f64;
        let mut fields = Vec::new();

        for value in values {
            let Some(score) = pattern.score(&value.text, &self.options) else {
                continue;
            };
            let base = if score == 0.0 { f64::EPSILON } else { score };
            total *= base.powf(self.key_weight * value.norm);
            if !fields.contains(&value.field) {
                fields.push(value.field);
            }
        }

        (!fields.is_empty()).then_some(ScoredMatch {
            position,
            score: total,
            fields,
        })
    }
}

fn index_record(record: &FaqRecord) -> Vec<IndexedValue> {
    let mut values = Vec::with_capacity(2 + record.tags.len());
    values.push(indexed(SearchField::Question, &record.question));
    values.push(indexed(SearchField::Answer, &record.answer));
    values.extend(record.tags.iter().map(|tag| indexed(SearchField::Tags, tag)));
    values
}

fn indexed(field: SearchField, text: &str) -> IndexedValue {
    IndexedValue {
        field,
        text: Haystack::new(text),
        norm: field_norm(text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn mk_record(id: &str, question: &str, answer: &str, tags: &[&str]) -> FaqRecord {
        FaqRecord {
            id: id.to_string(),
            question: question.to_string(),
            answer: answer.to_string(),
            category: "General".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            helpful_count: 0,
            not_helpful_count: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn index(records: &[FaqRecord]) -> FuzzyIndex {
        FuzzyIndex::build(records, &EngineConfig::default())
    }

    #[test]
    fn matches_on_tag_only() {
        let records = vec![
            mk_record("a", "How do I file returns?", "Talk to your accountant.", &["gst"]),
            mk_record("b", "How do I get paid?", "Bank transfer.", &["payment"]),
        ];
        let hits = index(&records).search("gst");

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].position, 0);
        assert_eq!(hits[0].fields, vec![SearchField::Tags]);
    }

    #[test]
    fn exact_tag_outranks_question_match() {
        let records = vec![
            mk_record("a", "Can I pay by upi today?", "Yes.", &[]),
            mk_record("b", "Which methods are supported?", "Many.", &["upi"]),
        ];
        let hits = index(&records).search("upi");

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].position, 1);
        assert!(hits[0].score < hits[1].score);
    }

    #[test]
    fn equal_scores_keep_catalog_order() {
        let records = vec![
            mk_record("a", "Refunds", "x", &[]),
            mk_record("b", "Refunds", "x", &[]),
        ];
        let positions: Vec<usize> = index(&records)
            .search("refunds")
            .into_iter()
            .map(|m| m.position)
            .collect();
        assert_eq!(positions, vec![0, 1]);
    }

    #[test]
    fn blank_term_and_empty_index_yield_nothing() {
        let records = vec![mk_record("a", "Refunds", "x", &[])];
        assert!(index(&records).search("").is_empty());
        assert!(index(&[]).search("refunds").is_empty());
    }
}
