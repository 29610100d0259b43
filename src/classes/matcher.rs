//! Boundary-aware matching of class tokens
//!
//! A token only matches where it is not directly preceded or followed by an
//! identifier character (`[A-Za-z0-9_-]`), so `css-12` never matches inside
//! `css-123` or `xcss-12`.

/// Prefix the renderer puts in front of every generated identifier
pub const MACHINE_PREFIX: &str = "css-";

/// The machine-generated class token for an identifier (`css-<id>`)
pub fn machine_token(id: &str) -> String {
    format!("{}{}", MACHINE_PREFIX, id)
}

fn is_ident_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-'
}

/// Byte offsets of every boundary-delimited occurrence of `token`
pub fn find_token(haystack: &str, token: &str) -> Vec<usize> {
    if token.is_empty() {
        return Vec::new();
    }

    let bytes = haystack.as_bytes();
    haystack
        .match_indices(token)
        .map(|(start, _)| start)
        .filter(|&start| {
            let end = start + token.len();
            let before_ok = start == 0 || !is_ident_byte(bytes[start - 1]);
            let after_ok = end == bytes.len() || !is_ident_byte(bytes[end]);
            before_ok && after_ok
        })
        .collect()
}

/// Whether `token` occurs in `haystack` on identifier boundaries
pub fn contains_token(haystack: &str, token: &str) -> bool {
    !find_token(haystack, token).is_empty()
}

/// Replace every boundary-delimited occurrence of `token`
pub fn replace_token(haystack: &str, token: &str, replacement: &str) -> String {
    let positions = find_token(haystack, token);
    if positions.is_empty() {
        return haystack.to_string();
    }

    let mut out = String::with_capacity(haystack.len());
    let mut last = 0;
    for start in positions {
        out.push_str(&haystack[last..start]);
        out.push_str(replacement);
        last = start + token.len();
    }
    out.push_str(&haystack[last..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_vs_prefix() {
        let css = ".css-123{color:red}.css-12{color:blue}";
        assert_eq!(find_token(css, "css-12"), vec![20]);
        assert_eq!(find_token(css, "css-123"), vec![1]);
    }

    #[test]
    fn test_boundaries() {
        assert!(contains_token("css-a", "css-a"));
        assert!(contains_token("<div class=\"x css-a\">", "css-a"));
        assert!(contains_token(".css-a:hover,.css-a>p", "css-a"));
        assert!(!contains_token("xcss-a", "css-a"));
        assert!(!contains_token("css-a-look1", "css-a"));
        assert!(!contains_token("css-a_b", "css-a"));
        assert!(!contains_token("anything", ""));
    }

    #[test]
    fn test_replace_all_occurrences() {
        let css = ".css-1{a:b}.css-1:hover{c:d}.css-10{e:f}";
        assert_eq!(
            replace_token(css, "css-1", "GEL-x"),
            ".GEL-x{a:b}.GEL-x:hover{c:d}.css-10{e:f}"
        );
    }

    #[test]
    fn test_replace_without_match_is_identity() {
        assert_eq!(replace_token("body{}", "css-1", "GEL-x"), "body{}");
    }

    #[test]
    fn test_multibyte_neighbours() {
        let html = "<p class=\"css-1\">café css-1</p>";
        assert_eq!(replace_token(html, "css-1", "G"), "<p class=\"G\">café G</p>");
    }
}
