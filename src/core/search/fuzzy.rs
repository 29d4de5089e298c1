//! Approximate substring matching.
//!
//! A field's distance to the query is the cheapest alignment of the
//! whole pattern against any substring of the field, where every edit
//! (substitution, insertion, deletion) costs `1 / pattern_len` and the
//! alignment start costs `start / distance`. Both terms land in [0, 1]
//! for realistic inputs; the result is clamped to 1.
//!
//! Comparison is case-insensitive and char-based, so multi-byte text
//! never splits inside a code point.

/// Stand-in for a perfect score inside weighted products.
///
/// A zero factor would erase every other field's contribution.
pub const EPSILON: f64 = f64::EPSILON;

/// A prepared, lowercased query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    chars: Vec<char>,
}

impl Pattern {
    pub fn new(query: &str) -> Self {
        Self {
            chars: query.trim().chars().flat_map(char::to_lowercase).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

/// Field matcher with a fixed acceptance threshold
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyMatcher {
    threshold: f64,
    distance: usize,
}

impl FuzzyMatcher {
    pub fn new(threshold: f64, distance: usize) -> Self {
        Self {
            threshold,
            distance,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Score a single field, `None` when it misses the threshold
    pub fn field_score(&self, pattern: &Pattern, text: &str) -> Option<f64> {
        if pattern.is_empty() {
            return None;
        }
        let text: Vec<char> = text.chars().flat_map(char::to_lowercase).collect();
        if text.is_empty() {
            return None;
        }

        let score = self.distance_to(&pattern.chars, &text)?;
        (score <= self.threshold).then_some(score)
    }

    /// Cost of the start offset `j`
    fn location_cost(&self, j: usize) -> f64 {
        if self.distance == 0 {
            if j == 0 {
                0.0
            } else {
                1.0
            }
        } else {
            j as f64 / self.distance as f64
        }
    }

    /// Minimal alignment cost, `None` if already past the threshold
    fn distance_to(&self, pattern: &[char], text: &[char]) -> Option<f64> {
        let step = 1.0 / pattern.len() as f64;

        // Row 0: alignment may start anywhere, paying only for the offset
        let mut prev: Vec<f64> = (0..=text.len()).map(|j| self.location_cost(j)).collect();
        let mut cur = vec![0.0; text.len() + 1];

        for &p in pattern {
            cur[0] = prev[0] + step;
            let mut row_min = cur[0];

            for (j, &t) in text.iter().enumerate() {
                let substitute = prev[j] + if p == t { 0.0 } else { step };
                let skip_pattern = prev[j + 1] + step;
                let skip_text = cur[j] + step;
                let best = substitute.min(skip_pattern).min(skip_text);
                cur[j + 1] = best;
                row_min = row_min.min(best);
            }

            // Costs only grow from row to row
            if row_min > self.threshold {
                return None;
            }

            std::mem::swap(&mut prev, &mut cur);
        }

        prev.iter()
            .copied()
            .min_by(f64::total_cmp)
            .map(|score| score.min(1.0))
    }
}

/// Length normalisation so long fields don't win on volume alone
///
/// `1 / sqrt(token count)`, rounded to three decimals.
pub fn field_norm(text: &str) -> f64 {
    let tokens = text.split_whitespace().count().max(1);
    let norm = 1.0 / (tokens as f64).sqrt();
    (norm * 1000.0).round() / 1000.0
}
