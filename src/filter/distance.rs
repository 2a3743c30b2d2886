//! Levenshtein distance and the length-adaptive tolerance used by the
//! banned-word matcher.

/// Classic Levenshtein distance: the minimum number of single-character
/// insertions, deletions and substitutions turning `a` into `b`.
/// A transposition counts as two edits.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut dp = vec![vec![0usize; b.len() + 1]; a.len() + 1];
    for i in 0..=a.len() {
        dp[i][0] = i;
    }
    for j in 0..=b.len() {
        dp[0][j] = j;
    }

    for i in 1..=a.len() {
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            dp[i][j] = (dp[i - 1][j] + 1)
                .min(dp[i][j - 1] + 1)
                .min(dp[i - 1][j - 1] + cost);
        }
    }

    dp[a.len()][b.len()]
}

/// Maximum accepted edit distance for a normalized token of the given
/// length: tokens of four characters or fewer must match exactly, longer
/// tokens tolerate one or two edits.
pub fn fuzzy_threshold(token_len: usize) -> usize {
    match token_len {
        0..=4 => 0,
        5..=7 => 1,
        _ => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_basics() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("spam", "spam"), 0);
        assert_eq!(levenshtein("", "spam"), 4);
        assert_eq!(levenshtein("spam", ""), 4);
    }

    #[test]
    fn distance_is_symmetric() {
        assert_eq!(
            levenshtein("casino", "kasino"),
            levenshtein("kasino", "casino")
        );
        assert_eq!(levenshtein("casino", "kasino"), 1);
    }

    #[test]
    fn transposition_costs_two_edits() {
        assert_eq!(levenshtein("telegram", "telegrma"), 2);
    }

    #[test]
    fn threshold_bands() {
        assert_eq!(fuzzy_threshold(0), 0);
        assert_eq!(fuzzy_threshold(4), 0);
        assert_eq!(fuzzy_threshold(5), 1);
        assert_eq!(fuzzy_threshold(7), 1);
        assert_eq!(fuzzy_threshold(8), 2);
        assert_eq!(fuzzy_threshold(20), 2);
    }
}
