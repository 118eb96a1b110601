//! Shared numeric utilities
//!
//! Implemented once here and shared by the merchant grouper and the
//! recurring-pattern detector rather than duplicated per caller.

/// Arithmetic mean. Empty input yields 0.0.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation. Empty input yields 0.0.
pub fn stddev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let avg = mean(values);
    let variance = values.iter().map(|v| (v - avg).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Consistency score in [0, 100]: how tightly `values` cluster around their
/// mean, measured as `100 - cv * 100` where cv is the coefficient of
/// variation. A zero mean scores 100 (no spread to measure against).
pub fn consistency_score(values: &[f64]) -> f64 {
    let avg = mean(values);
    if avg == 0.0 {
        return 100.0;
    }
    (100.0 - stddev(values) / avg * 100.0).max(0.0)
}

/// Classic Levenshtein edit distance with unit insert/delete/substitute
/// costs, O(len(a) * len(b)) over a two-row DP table.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0usize; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitute = prev[j] + usize::from(ca != cb);
            let insert = curr[j] + 1;
            let delete = prev[j + 1] + 1;
            curr[j + 1] = substitute.min(insert).min(delete);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_and_stddev() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[2.0, 4.0, 6.0]), 4.0);

        assert_eq!(stddev(&[]), 0.0);
        assert_eq!(stddev(&[5.0, 5.0, 5.0]), 0.0);
        // Population stddev of [2, 4, 6]: sqrt(8/3)
        let sd = stddev(&[2.0, 4.0, 6.0]);
        assert!((sd - (8.0f64 / 3.0).sqrt()).abs() < 1e-9);
    }

    #[test]
    fn test_consistency_score_bounds() {
        assert_eq!(consistency_score(&[10.0, 10.0, 10.0]), 100.0);
        assert_eq!(consistency_score(&[]), 100.0);
        // Wild spread floors at zero rather than going negative
        assert_eq!(consistency_score(&[1.0, 1000.0, 1.0, 1.0]), 0.0);
    }

    #[test]
    fn test_levenshtein() {
        assert_eq!(levenshtein("", ""), 0);
        assert_eq!(levenshtein("abc", ""), 3);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("netflix", "netflix"), 0);
        assert_eq!(levenshtein("netflix", "netfllx"), 1);
    }
}
