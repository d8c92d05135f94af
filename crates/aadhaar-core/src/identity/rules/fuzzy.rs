//! Fuzzy string similarity for noisy OCR keywords.
//!
//! Scores follow the Ratcliff/Obershelp "gestalt" measure: the number of
//! characters in recursively found longest common blocks, doubled and divided
//! by the total length, scaled to 0-100.

/// Similarity of two whole strings (0-100).
pub fn ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    ratio_chars(&a, &b)
}

/// Best similarity of `needle` against any same-length window of `haystack`.
///
/// When the haystack is shorter than the needle the whole haystack is
/// compared, so a short line cannot score 100 against a longer keyword.
pub fn partial_ratio(haystack: &str, needle: &str) -> u8 {
    let hay: Vec<char> = haystack.chars().collect();
    let needle: Vec<char> = needle.chars().collect();

    if hay.is_empty() || needle.is_empty() {
        return 0;
    }

    if hay.len() <= needle.len() {
        return ratio_chars(&hay, &needle);
    }

    let mut best = 0;
    for window in hay.windows(needle.len()) {
        let score = ratio_chars(window, &needle);
        if score > best {
            best = score;
            if best == 100 {
                break;
            }
        }
    }
    best
}

fn ratio_chars(a: &[char], b: &[char]) -> u8 {
    let total = a.len() + b.len();
    if total == 0 {
        return 0;
    }
    let matches = matching_chars(a, b);
    (200.0 * matches as f64 / total as f64).round() as u8
}

fn matching_chars(a: &[char], b: &[char]) -> usize {
    let (i, j, len) = longest_common_block(a, b);
    if len == 0 {
        return 0;
    }
    len + matching_chars(&a[..i], &b[..j]) + matching_chars(&a[i + len..], &b[j + len..])
}

/// Longest common substring as `(start_a, start_b, len)`, earliest on ties.
fn longest_common_block(a: &[char], b: &[char]) -> (usize, usize, usize) {
    let mut best = (0, 0, 0);
    let mut prev = vec![0usize; b.len() + 1];
    let mut row = vec![0usize; b.len() + 1];

    for i in 0..a.len() {
        for j in 0..b.len() {
            row[j + 1] = if a[i] == b[j] { prev[j] + 1 } else { 0 };
            let len = row[j + 1];
            if len > best.2 {
                best = (i + 1 - len, j + 1 - len, len);
            }
        }
        std::mem::swap(&mut prev, &mut row);
    }

    best
}
