// Brace Pattern Scanner
// Locates expansion groups in a pattern while skipping escaped delimiters

/// Byte written over both halves of an escape sequence in the scan view
const MASK: u8 = 0;

fn is_escapable(byte: u8) -> bool {
    matches!(byte, b'\\' | b',' | b'{' | b'}')
}

/// Same-length view of a pattern with every escape sequence masked out
///
/// The view is only used to find delimiter positions. Text is always sliced
/// from the original pattern, so indices found here apply to it directly.
#[derive(Debug, Clone)]
pub struct ScanView {
    bytes: Vec<u8>,
}

impl ScanView {
    pub fn new(pattern: &str) -> Self {
        let mut bytes = pattern.as_bytes().to_vec();
        let mut i = 0;
        while i + 1 < bytes.len() {
            if bytes[i] == b'\\' && is_escapable(bytes[i + 1]) {
                bytes[i] = MASK;
                bytes[i + 1] = MASK;
                i += 2;
            } else {
                i += 1;
            }
        }
        Self { bytes }
    }

    /// Find the leftmost group that has at least one top-level comma
    ///
    /// A brace pair without a top-level comma is not a group; the search
    /// moves on to the next `{`, which may sit inside the rejected pair.
    pub fn find_group(&self) -> Option<Group> {
        let mut start = 0;
        while let Some(offset) = self.bytes[start..].iter().position(|&b| b == b'{') {
            let open = start + offset;
            if let Some(group) = self.group_at(open) {
                return Some(group);
            }
            start = open + 1;
        }
        None
    }

    fn group_at(&self, open: usize) -> Option<Group> {
        let mut depth = 1usize;
        let mut splits = Vec::new();

        for (i, &byte) in self.bytes.iter().enumerate().skip(open + 1) {
            match byte {
                b'{' => depth += 1,
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        if splits.is_empty() {
                            return None;
                        }
                        return Some(Group {
                            open,
                            close: i,
                            splits,
                        });
                    }
                }
                b',' if depth == 1 => splits.push(i),
                _ => {}
            }
        }

        // Ran off the end: unmatched `{`
        None
    }
}

/// A located `{alt,alt,...}` group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// Index of the opening `{`
    pub open: usize,
    /// Index of the matching `}`
    pub close: usize,
    /// Indices of the top-level commas
    splits: Vec<usize>,
}

impl Group {
    /// Text before the group
    pub fn head<'a>(&self, pattern: &'a str) -> &'a str {
        &pattern[..self.open]
    }

    /// Text after the group
    pub fn tail<'a>(&self, pattern: &'a str) -> &'a str {
        &pattern[self.close + 1..]
    }

    /// Raw alternatives, still escaped and possibly holding nested groups
    pub fn alternatives<'a>(&self, pattern: &'a str) -> Vec<&'a str> {
        let mut alternatives = Vec::with_capacity(self.splits.len() + 1);
        let mut start = self.open + 1;
        for &split in &self.splits {
            alternatives.push(&pattern[start..split]);
            start = split + 1;
        }
        alternatives.push(&pattern[start..self.close]);
        alternatives
    }

    pub fn alternative_count(&self) -> usize {
        self.splits.len() + 1
    }
}

/// Resolve escape sequences in a single left-to-right pass
///
/// `\\` becomes `\` and `\{`, `\}`, `\,` lose their backslash. Any other
/// backslash is kept as-is, so `\\{` yields `\{` rather than `{`.
pub fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(&next) = chars.peek() {
                if next.is_ascii() && is_escapable(next as u8) {
                    out.push(next);
                    chars.next();
                    continue;
                }
            }
        }
        out.push(ch);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_view_masks_escapes() {
        assert!(ScanView::new(r"a\{b\,c\}d").find_group().is_none());
        // Escaped comma leaves a single alternative
        assert!(ScanView::new(r"{a\,b}").find_group().is_none());
    }

    #[test]
    fn test_double_backslash_does_not_escape_brace() {
        // `\\` is consumed as a pair, leaving the `{` live
        let group = ScanView::new(r"\\{a,b}").find_group().unwrap();
        assert_eq!(group.open, 2);
        assert_eq!(group.close, 6);
    }

    #[test]
    fn test_find_simple_group() {
        let pattern = "x{a,b,c}y";
        let group = ScanView::new(pattern).find_group().unwrap();

        assert_eq!(group.head(pattern), "x");
        assert_eq!(group.tail(pattern), "y");
        assert_eq!(group.alternatives(pattern), vec!["a", "b", "c"]);
        assert_eq!(group.alternative_count(), 3);
    }

    #[test]
    fn test_nested_commas_do_not_split_outer_group() {
        let pattern = "{a,b{c,d}}";
        let group = ScanView::new(pattern).find_group().unwrap();
        assert_eq!(group.alternatives(pattern), vec!["a", "b{c,d}"]);
    }

    #[test]
    fn test_group_without_comma_is_skipped() {
        let pattern = "{x}{a,b}";
        let group = ScanView::new(pattern).find_group().unwrap();
        assert_eq!(group.open, 3);
        assert_eq!(group.head(pattern), "{x}");
    }

    #[test]
    fn test_search_retries_inside_rejected_pair() {
        let pattern = "{x{a,b}}";
        let group = ScanView::new(pattern).find_group().unwrap();
        assert_eq!(group.open, 2);
        assert_eq!(group.alternatives(pattern), vec!["a", "b"]);
        assert_eq!(group.tail(pattern), "}");
    }

    #[test]
    fn test_unmatched_brace_has_no_group() {
        assert!(ScanView::new("{a,b").find_group().is_none());
        assert!(ScanView::new("a}b,c").find_group().is_none());
        assert!(ScanView::new("").find_group().is_none());
    }

    #[test]
    fn test_unescape() {
        assert_eq!(unescape(r"a\{b\}c\,d"), "a{b}c,d");
        assert_eq!(unescape(r"a\\b"), r"a\b");
        assert_eq!(unescape(r"\\{"), r"\{");
        assert_eq!(unescape(r"\n\"), r"\n\");
        assert_eq!(unescape("plain"), "plain");
    }

    #[test]
    fn test_multibyte_text_is_preserved() {
        let pattern = "é{ü,ß}ñ";
        let group = ScanView::new(pattern).find_group().unwrap();
        assert_eq!(group.alternatives(pattern), vec!["ü", "ß"]);
        assert_eq!(group.tail(pattern), "ñ");
    }
}
