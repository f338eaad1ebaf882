use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

const KEYWORDS_WEIGHT: f64 = 0.6;
const TITLE_WEIGHT: f64 = 0.3;
const DESCRIPTION_WEIGHT: f64 = 0.1;

fn word_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\w+").expect("static word pattern"))
}

/// Lowercased set of alphanumeric word tokens.
pub fn tokenize(text: &str) -> HashSet<String> {
    word_pattern()
        .find_iter(&text.to_lowercase())
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Relevance of a result to `query` in `[0, 1]`.
///
/// Each field scores the share of query tokens it contains; the fields are then
/// combined with fixed weights (keywords 0.6, title 0.3, description 0.1) and the
/// total is rounded to four decimal places.
pub fn compute_confidence(
    query: &str,
    title: &str,
    description: &str,
    keywords: &[String],
) -> f64 {
    let query_terms = tokenize(query);
    if query_terms.is_empty() {
        return 0.0;
    }

    let keywords_text = keywords.join(" ");
    let fields = [
        (keywords_text.as_str(), KEYWORDS_WEIGHT),
        (title, TITLE_WEIGHT),
        (description, DESCRIPTION_WEIGHT),
    ];

    let total: f64 = fields
        .iter()
        .map(|(text, weight)| {
            let field_terms = tokenize(text);
            let matches = query_terms.intersection(&field_terms).count();
            matches as f64 / query_terms.len() as f64 * weight
        })
        .sum();

    ((total * 10_000.0).round() / 10_000.0).min(1.0)
}
