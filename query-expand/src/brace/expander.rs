// Brace Expansion
// Expands `{a,b}` groups in a pattern into every concrete alternative

use crate::brace::scanner::{unescape, ScanView};

use tracing::trace;

/// Expander for brace patterns
///
/// Groups are expanded one at a time, left to right. Each alternative is
/// expanded recursively with the text around the group carried along as a
/// fixed prefix and suffix, so later groups multiply the output of earlier
/// ones:
///
/// ```
/// use query_expand::BraceExpander;
///
/// assert_eq!(
///     BraceExpander::expand("{a,b}-{1,2}"),
///     vec!["a-1", "a-2", "b-1", "b-2"]
/// );
/// ```
pub struct BraceExpander;

impl BraceExpander {
    /// Expand a pattern into its ordered list of literal strings
    ///
    /// Never fails: malformed brace text is passed through literally.
    pub fn expand(pattern: &str) -> Vec<String> {
        let mut expanded = Vec::new();
        Self::expand_into("", pattern, "", &mut expanded);
        expanded
    }

    /// Check whether a pattern contains at least one expandable group
    pub fn has_groups(pattern: &str) -> bool {
        ScanView::new(pattern).find_group().is_some()
    }

    fn expand_into(prefix: &str, pattern: &str, suffix: &str, dest: &mut Vec<String>) {
        let view = ScanView::new(pattern);

        match view.find_group() {
            Some(group) => {
                trace!(
                    pattern,
                    open = group.open,
                    close = group.close,
                    alternatives = group.alternative_count(),
                    "expanding brace group"
                );

                let head = format!("{}{}", prefix, group.head(pattern));
                let tail = format!("{}{}", group.tail(pattern), suffix);
                for alternative in group.alternatives(pattern) {
                    Self::expand_into(&head, alternative, &tail, dest);
                }
            }
            // Nothing left here; keep going on the carried suffix
            None if !suffix.is_empty() => {
                let head = format!("{}{}", prefix, pattern);
                Self::expand_into(&head, suffix, "", dest);
            }
            None => {
                let value = unescape(&format!("{}{}", prefix, pattern));
                trace!(value = %value, "expanded pattern");
                dest.push(value);
            }
        }
    }
}
