//! Approximate substring scoring.
//!
//! A pattern matches a field when some substring of the field is within a few
//! edits of the pattern and starts close to the expected location. The score
//! of a candidate is
//!
//! ```text
//! errors / pattern_len + |match_start - location| / distance
//! ```
//!
//! and the field matches when the best candidate scores at or below the
//! threshold. A score of 0 means the whole field equals the pattern; any other
//! match scores at least [`MIN_SCORE`].
//!
//! Patterns longer than `max_chunk` characters are split into chunks that are
//! matched independently, each expected at `location + chunk_start`. The last
//! chunk is aligned to the end of the pattern so every chunk is full length.

use crate::config::EngineConfig;

pub const MIN_SCORE: f64 = 0.001;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchOptions {
    pub threshold: f64,
    pub location: usize,
    pub distance: usize,
}

impl From<&EngineConfig> for MatchOptions {
    fn from(config: &EngineConfig) -> Self {
        Self {
            threshold: config.threshold,
            location: config.location,
            distance: config.distance,
        }
    }
}

/// Lowercased, pre-split text of one indexed field value.
#[derive(Debug, Clone)]
pub struct Haystack {
    lowered: String,
    chars: Vec<char>,
}

impl Haystack {
    pub fn new(text: &str) -> Self {
        let lowered = text.to_lowercase();
        let chars = lowered.chars().collect();
        Self { lowered, chars }
    }
}

#[derive(Debug, Clone)]
struct Chunk {
    start: usize,
    chars: Vec<char>,
}

#[derive(Debug, Clone)]
pub struct Pattern {
    lowered: String,
    chunks: Vec<Chunk>,
}

impl Pattern {
    pub fn new(pattern: &str, max_chunk: usize) -> Self {
        let lowered = pattern.to_lowercase();
        let chars: Vec<char> = lowered.chars().collect();
        let max_chunk = max_chunk.max(1);
        let len = chars.len();
        let mut chunks = Vec::new();

        if len <= max_chunk {
            if len > 0 {
                chunks.push(Chunk { start: 0, chars });
            }
        } else {
            let remainder = len % max_chunk;
            let mut start = 0;
            while start < len - remainder {
                chunks.push(Chunk {
                    start,
                    chars: chars[start..start + max_chunk].to_vec(),
                });
                start += max_chunk;
            }
            if remainder > 0 {
                let start = len - max_chunk;
                chunks.push(Chunk {
                    start,
                    chars: chars[start..].to_vec(),
                });
            }
        }

        Self { lowered, chunks }
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Score of the best match in `text`, or `None` when nothing is within
    /// the threshold.
    pub fn score(&self, text: &Haystack, options: &MatchOptions) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        if text.lowered == self.lowered {
            return Some(0.0);
        }

        let mut total = 0.0;
        let mut matched = false;
        for chunk in &self.chunks {
            match chunk_score(&chunk.chars, &text.chars, options.location + chunk.start, options) {
                Some(score) => {
                    matched = true;
                    total += score;
                }
                None => total += 1.0,
            }
        }

        matched.then(|| total / self.chunks.len() as f64)
    }
}

/// Length penalty for a field value: `1 / sqrt(word_count)`, kept to three
/// decimals.
pub fn field_norm(text: &str) -> f64 {
    let tokens = text.split(' ').filter(|t| !t.is_empty()).count().max(1);
    let norm = 1.0 / (tokens as f64).sqrt();
    (norm * 1000.0).round() / 1000.0
}

fn match_score(errors: usize, pattern_len: usize, start: usize, expected: usize, distance: usize) -> f64 {
    let accuracy = errors as f64 / pattern_len as f64;
    let proximity = start.abs_diff(expected);
    if distance == 0 {
        return if proximity == 0 { accuracy } else { 1.0 };
    }
    accuracy + proximity as f64 / distance as f64
}

/// Semi-global edit distance: the pattern must be consumed in full, the text
/// match may start and end anywhere. Each cell carries the text offset where
/// its alignment starts so the location penalty can be applied.
fn chunk_score(pattern: &[char], text: &[char], location: usize, options: &MatchOptions) -> Option<f64> {
    let m = pattern.len();
    let expected = location.min(text.len());

    let mut prev: Vec<usize> = (0..=m).collect();
    let mut prev_start = vec![0usize; m + 1];
    let mut cur = vec![0usize; m + 1];
    let mut cur_start = vec![0usize; m + 1];
    let mut best: Option<f64> = None;

    for (j, &c) in text.iter().enumerate() {
        cur[0] = 0;
        cur_start[0] = j + 1;

        for i in 1..=m {
            let substitution = prev[i - 1] + usize::from(pattern[i - 1] != c);
            let extra_text = prev[i] + 1;
            let missing_text = cur[i - 1] + 1;

            // Equal costs keep the start nearest the expected location.
            let (cost, start) = [
                (substitution, prev_start[i - 1]),
                (extra_text, prev_start[i]),
                (missing_text, cur_start[i - 1]),
            ]
            .into_iter()
            .min_by_key(|&(cost, start)| (cost, start.abs_diff(expected)))
            .unwrap_or((substitution, prev_start[i - 1]));
            cur[i] = cost;
            cur_start[i] = start;
        }

        let errors = cur[m];
        if errors < m {
            let score = match_score(errors, m, cur_start[m], expected, options.distance);
            if score <= options.threshold {
                best = Some(best.map_or(score, |b: f64| b.min(score)));
            }
        }

        std::mem::swap(&mut prev, &mut cur);
        std::mem::swap(&mut prev_start, &mut cur_start);
    }

    best.map(|score| score.max(MIN_SCORE))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> MatchOptions {
        MatchOptions::from(&EngineConfig::default())
    }

    fn score(pattern: &str, text: &str) -> Option<f64> {
        Pattern::new(pattern, 32).score(&Haystack::new(text), &opts())
    }

    #[test]
    fn whole_field_equality_scores_zero() {
        assert_eq!(score("gst", "gst"), Some(0.0));
        assert_eq!(score("GST", "gst"), Some(0.0));
    }

    #[test]
    fn exact_prefix_scores_minimum() {
        assert_eq!(score("pay", "payment"), Some(MIN_SCORE));
    }

    #[test]
    fn location_penalty_grows_with_offset() {
        let s = score("gst", "how do i handle gst and tax").expect("match");
        assert!((s - 0.16).abs() < 1e-9, "score was {s}");
    }

    #[test]
    fn match_too_far_from_location_is_rejected() {
        let text = format!("{}tax", "x".repeat(50));
        assert_eq!(score("tax", &text), None);
    }

    #[test]
    fn tolerates_a_typo() {
        let s = score("paymnt", "payment methods").expect("match");
        assert!((s - 1.0 / 6.0).abs() < 1e-9, "score was {s}");
    }

    #[test]
    fn equal_cost_alignments_prefer_start_near_location() {
        let s = score("abcd", "zzzzabbcd").expect("match");
        assert!((s - 0.29).abs() < 1e-9, "score was {s}");

        let s = score("abcd", "zzzzzabbcd").expect("match at threshold");
        assert!((s - 0.30).abs() < 1e-9, "score was {s}");
    }

    #[test]
    fn rejects_too_many_errors() {
        assert_eq!(score("gts", "gst"), None);
        assert_eq!(score("zzzzqqqq", "what payment methods work best"), None);
    }

    #[test]
    fn empty_pattern_or_text_never_matches() {
        assert_eq!(score("", "anything"), None);
        assert_eq!(score("abc", ""), None);
    }

    #[test]
    fn long_patterns_are_chunked() {
        let text = "what payment methods work best for indian freelancers and agencies";
        let pattern = &text[..40];
        let p = Pattern::new(pattern, 32);
        assert_eq!(p.chunks.len(), 2);
        assert_eq!(p.chunks[1].start, 8);
        assert_eq!(p.score(&Haystack::new(text), &opts()), Some(MIN_SCORE));
    }

    #[test]
    fn zero_distance_requires_exact_location() {
        let options = MatchOptions {
            distance: 0,
            ..opts()
        };
        let p = Pattern::new("tax", 32);
        assert!(p.score(&Haystack::new("tax rules"), &options).is_some());
        assert_eq!(p.score(&Haystack::new("a tax rule"), &options), None);
    }

    #[test]
    fn field_norm_penalises_long_fields() {
        assert_eq!(field_norm("gst"), 1.0);
        assert_eq!(field_norm("one two three four"), 0.5);
        assert_eq!(field_norm("a b c"), 0.577);
        assert_eq!(field_norm(""), 1.0);
    }
}
