//! Glob matching with the same dialect as Redis `KEYS`/`SCAN MATCH`.
//!
//! Supported tokens: `*`, `?`, `[abc]`, `[a-z]`, `[^a]` and `\x` escapes.

const GLOB_SPECIALS: [char; 5] = ['*', '?', '[', ']', '\\'];

/// Escape every glob metacharacter so `text` only matches itself.
pub fn escape_glob(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + 4);
    for ch in text.chars() {
        if GLOB_SPECIALS.contains(&ch) {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

pub fn glob_matches(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();

    let mut p = 0;
    let mut t = 0;
    // Position of the last `*` and the text index it is currently absorbing up to.
    let mut star: Option<(usize, usize)> = None;

    while t < text.len() {
        if pattern.get(p) == Some(&'*') {
            star = Some((p, t));
            p += 1;
            continue;
        }
        if p < pattern.len()
            && let Some(next) = match_single(&pattern, p, text[t])
        {
            p = next;
            t += 1;
            continue;
        }
        match star {
            Some((star_p, star_t)) => {
                p = star_p + 1;
                t = star_t + 1;
                star = Some((star_p, star_t + 1));
            }
            None => return false,
        }
    }

    while pattern.get(p) == Some(&'*') {
        p += 1;
    }
    p == pattern.len()
}

/// Match one non-`*` token at `p` against `ch`; returns the index after the token.
fn match_single(pattern: &[char], p: usize, ch: char) -> Option<usize> {
    match pattern[p] {
        '?' => Some(p + 1),
        '\\' => match pattern.get(p + 1) {
            Some(&escaped) => (escaped == ch).then_some(p + 2),
            None => (ch == '\\').then_some(p + 1),
        },
        '[' => match match_class(pattern, p, ch) {
            Some((matched, next)) => matched.then_some(next),
            // Unterminated class: the bracket is a literal.
            None => (ch == '[').then_some(p + 1),
        },
        literal => (literal == ch).then_some(p + 1),
    }
}

/// Evaluate the bracket class starting at `start`. `None` when it is unterminated.
fn match_class(pattern: &[char], start: usize, ch: char) -> Option<(bool, usize)> {
    let mut i = start + 1;
    let negate = pattern.get(i) == Some(&'^');
    if negate {
        i += 1;
    }

    let mut matched = false;
    loop {
        let mut low = *pattern.get(i)?;
        if low == ']' {
            break;
        }
        if low == '\\' {
            i += 1;
            low = *pattern.get(i)?;
        }

        let is_range = pattern.get(i + 1) == Some(&'-')
            && pattern.get(i + 2).is_some_and(|high| *high != ']');
        if is_range {
            let high = pattern[i + 2];
            let (low, high) = if low <= high { (low, high) } else { (high, low) };
            matched |= (low..=high).contains(&ch);
            i += 3;
        } else {
            matched |= low == ch;
            i += 1;
        }
    }

    Some((matched != negate, i + 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_matches_any_suffix_including_empty() {
        assert!(glob_matches("catalog:*", "catalog:"));
        assert!(glob_matches("catalog:*", "catalog:all:page:0:size:10"));
        assert!(!glob_matches("catalog:*", "catalo"));
        assert!(!glob_matches("catalog:*", "other:catalog:all"));
    }

    #[test]
    fn star_in_the_middle_backtracks() {
        assert!(glob_matches("a*b*c", "axxbyyc"));
        assert!(glob_matches("a*b", "abab"));
        assert!(!glob_matches("a*b", "abac"));
        assert!(glob_matches("*", ""));
    }

    #[test]
    fn question_mark_matches_exactly_one_char() {
        assert!(glob_matches("page:?", "page:7"));
        assert!(!glob_matches("page:?", "page:"));
        assert!(!glob_matches("page:?", "page:10"));
    }

    #[test]
    fn character_classes_and_negation() {
        assert!(glob_matches("size:[0-9]", "size:5"));
        assert!(!glob_matches("size:[0-9]", "size:x"));
        assert!(glob_matches("[^a]bc", "xbc"));
        assert!(!glob_matches("[^a]bc", "abc"));
        assert!(glob_matches("h[ae]llo", "hello"));
    }

    #[test]
    fn escapes_make_metacharacters_literal() {
        assert!(glob_matches(r"a\*b", "a*b"));
        assert!(!glob_matches(r"a\*b", "axb"));
        assert!(glob_matches(r"\[x\]", "[x]"));
    }

    #[test]
    fn escaped_text_matches_only_itself() {
        let raw = "we[ir]d*?\\prefix:";
        let escaped = escape_glob(raw);
        assert!(glob_matches(&escaped, raw));
        assert!(!glob_matches(&escaped, "weid*?\\prefix:"));
        assert!(!glob_matches(&escaped, "we[ir]dXY\\prefix:"));
    }

    #[test]
    fn unterminated_class_is_literal() {
        assert!(glob_matches("a[b", "a[b"));
        assert!(!glob_matches("a[b", "ab"));
    }
}
