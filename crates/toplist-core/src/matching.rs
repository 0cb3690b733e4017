use toplist_models::CatalogItem;
use tracing::trace;

/// Minimum similarity for a search result to count as a match. Scores are
/// strictly compared, so exactly 70 is rejected.
pub const MATCH_THRESHOLD: f64 = 70.0;

/// Normalized Levenshtein similarity on a 0-100 scale; 100 means the
/// strings are identical. No case folding or other normalization.
pub fn similarity(a: &str, b: &str) -> f64 {
    if a == b {
        return 100.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let distance = levenshtein(a, b);
    let max_len = a.chars().count().max(b.chars().count());
    100.0 * (1.0 - distance as f64 / max_len as f64)
}

fn levenshtein(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let n = b_chars.len();

    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr: Vec<usize> = vec![0; n + 1];

    for (i, a_char) in a_chars.iter().enumerate() {
        curr[0] = i + 1;
        for (j, b_char) in b_chars.iter().enumerate() {
            let cost = usize::from(a_char != b_char);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// First candidate whose title clears the threshold against the query, in
/// the order the search API returned them. The scan stops on the first
/// hit; when nothing clears the threshold the caller skips the title.
pub fn first_match<'a>(query: &str, candidates: &'a [CatalogItem]) -> Option<&'a CatalogItem> {
    for candidate in candidates {
        let score = similarity(query, &candidate.title);
        trace!(
            "Comparing \"{}\" with \"{}\", similarity score: {:.0}",
            query,
            candidate.title,
            score
        );
        if score > MATCH_THRESHOLD {
            return Some(candidate);
        }
    }
    None
}
