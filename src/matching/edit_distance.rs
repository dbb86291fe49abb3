//! Edit distance functions.
//!
//! Both public functions normalize their inputs (trim + lower-case) and
//! operate on chars. The `*_chars` variants skip normalization for callers
//! that already hold normalized char buffers.

use super::normalize::fold;

/// Levenshtein distance between two strings after trimming and lower-casing.
///
/// Insertions, deletions and substitutions each cost 1.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a = fold(a);
    let b = fold(b);

    if a == b {
        return 0;
    }

    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    levenshtein_chars(&a, &b)
}

/// Levenshtein distance over char slices, using two rolling rows sized by
/// the shorter input.
pub fn levenshtein_chars(a: &[char], b: &[char]) -> usize {
    // Keep the shorter side in the inner loop so the rows are O(min(|a|, |b|)).
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };

    if short.is_empty() {
        return long.len();
    }

    let mut prev: Vec<usize> = (0..=short.len()).collect();
    let mut curr: Vec<usize> = vec![0; short.len() + 1];

    for (i, lc) in long.iter().enumerate() {
        curr[0] = i + 1;
        for (j, sc) in short.iter().enumerate() {
            let cost = usize::from(lc != sc);
            curr[j + 1] = (prev[j + 1] + 1)
                .min(curr[j] + 1)
                .min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[short.len()]
}

/// Damerau-Levenshtein (optimal string alignment) distance after trimming
/// and lower-casing.
///
/// Like [`levenshtein`], but swapping two adjacent characters also costs 1,
/// so `"teh"` is one edit away from `"the"`.
pub fn damerau_levenshtein(a: &str, b: &str) -> usize {
    let a = fold(a);
    let b = fold(b);

    if a == b {
        return 0;
    }

    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    damerau_levenshtein_chars(&a, &b)
}

/// Damerau-Levenshtein distance over char slices using the full
/// `(|a|+1) x (|b|+1)` table.
pub fn damerau_levenshtein_chars(a: &[char], b: &[char]) -> usize {
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let rows = a.len() + 1;
    let cols = b.len() + 1;
    let mut d = vec![vec![0usize; cols]; rows];

    for (i, row) in d.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, cell) in d[0].iter_mut().enumerate() {
        *cell = j;
    }

    for i in 1..rows {
        for j in 1..cols {
            let cost = usize::from(a[i - 1] != b[j - 1]);

            d[i][j] = (d[i - 1][j] + 1)
                .min(d[i][j - 1] + 1)
                .min(d[i - 1][j - 1] + cost);

            if i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
                d[i][j] = d[i][j].min(d[i - 2][j - 2] + cost);
            }
        }
    }

    d[a.len()][b.len()]
}
