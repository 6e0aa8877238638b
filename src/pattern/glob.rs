//! Single-segment glob matching.
//!
//! Matches one `/`-free segment of a candidate against one segment of a
//! pattern. Only `?` and `*` are special here; `**` is handled one level up
//! because it spans segments.

/// Returns true if `text` matches the glob `pattern`.
///
/// - `?` consumes exactly one character.
/// - `*` consumes zero or more characters.
///
/// Runs in O(p * t) worst case using the classic two-pointer scan that
/// remembers the last `*` and retries from one character further on mismatch.
pub fn matches(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();

    let (mut p, mut t) = (0, 0);
    // (pattern index of the last `*`, text index it currently resumes from)
    let mut star: Option<(usize, usize)> = None;

    while t < text.len() {
        match pattern.get(p) {
            Some('*') => {
                star = Some((p, t));
                p += 1;
            }
            Some(&c) if c == '?' || c == text[t] => {
                p += 1;
                t += 1;
            }
            _ => match star {
                Some((star_p, star_t)) => {
                    p = star_p + 1;
                    t = star_t + 1;
                    star = Some((star_p, star_t + 1));
                }
                None => return false,
            },
        }
    }

    pattern[p..].iter().all(|&c| c == '*')
}

/// Returns true if the segment contains a glob metacharacter.
pub fn has_wildcard(segment: &str) -> bool {
    segment.contains(['*', '?'])
}
