// Input sanitization and live text statistics.
//
// All lengths are measured in `char`s so truncation never splits a
// multi-byte character.

/// Default maximum number of characters kept after sanitization.
pub const DEFAULT_MAX_CHARS: usize = 5000;

/// Live statistics for the current text field content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stats {
    /// Number of space-separated tokens in the sanitized text.
    pub word_count: usize,
    /// Sanitized length, capped at the policy maximum.
    pub char_count: usize,
}

/// Character-limit policy applied to sanitized text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputPolicy {
    pub max_chars: usize,
}

impl Default for InputPolicy {
    fn default() -> Self {
        InputPolicy {
            max_chars: DEFAULT_MAX_CHARS,
        }
    }
}

impl InputPolicy {
    pub fn new(max_chars: usize) -> Self {
        InputPolicy { max_chars }
    }

    /// Whether a text of `char_count` characters may be submitted.
    pub fn accepts(&self, char_count: usize) -> bool {
        char_count > 0 && char_count <= self.max_chars
    }
}

/// Outcome of recomputing stats for a raw field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Measured {
    pub stats: Stats,
    /// Sanitized text, already truncated to the policy maximum.
    pub sanitized: String,
    /// Set when the sanitized text exceeded the maximum; the field content
    /// must be replaced with `sanitized`.
    pub truncated: bool,
}

/// Collapse every run of whitespace to a single space and trim both ends.
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

/// Truncate `text` to at most `max_chars` characters.
///
/// Returns `true` if anything was cut.
pub fn truncate_chars(text: &mut String, max_chars: usize) -> bool {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => {
            text.truncate(byte_idx);
            true
        }
        None => false,
    }
}

/// Count space-separated tokens in already-sanitized text.
pub fn word_count(sanitized: &str) -> usize {
    if sanitized.is_empty() {
        0
    } else {
        sanitized.split(' ').count()
    }
}

/// Sanitize `raw`, enforce the policy maximum, and derive stats.
pub fn measure(raw: &str, policy: &InputPolicy) -> Measured {
    let mut sanitized = sanitize(raw);
    let truncated = truncate_chars(&mut sanitized, policy.max_chars);

    // A cut can leave a trailing space where a word boundary fell.
    if truncated && sanitized.ends_with(' ') {
        sanitized.pop();
    }

    let char_count = sanitized.chars().count().min(policy.max_chars);
    Measured {
        stats: Stats {
            word_count: word_count(&sanitized),
            char_count,
        },
        sanitized,
        truncated,
    }
}

/// Format the word counter label ("1 word", "3 words").
pub fn format_word_count(count: usize) -> String {
    if count == 1 {
        format!("{count} word")
    } else {
        format!("{count} words")
    }
}

/// Format the character counter label ("15 / 5000 characters").
pub fn format_char_count(count: usize, max_chars: usize) -> String {
    format!("{count} / {max_chars} characters")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_collapses_and_trims() {
        assert_eq!(sanitize("   Great   product!!   "), "Great product!!");
        assert_eq!(sanitize("a\tb\n\nc"), "a b c");
        assert_eq!(sanitize("single"), "single");
    }

    #[test]
    fn sanitize_whitespace_only_is_empty() {
        for input in ["", " ", "\t\t", "\n \r\n ", "\u{3000}\u{a0}"] {
            assert_eq!(sanitize(input), "", "input {input:?}");
            assert_eq!(word_count(&sanitize(input)), 0);
        }
    }

    #[test]
    fn sanitize_is_idempotent() {
        let inputs = [
            "  hello   world ",
            "\tline one\nline two\n",
            "already clean",
            "",
            "  ünïcödé  \u{2003} text ",
        ];
        for input in inputs {
            let once = sanitize(input);
            assert_eq!(sanitize(&once), once, "input {input:?}");
        }
    }

    #[test]
    fn measure_scenario_great_product() {
        let m = measure("   Great   product!!   ", &InputPolicy::default());
        assert_eq!(m.sanitized, "Great product!!");
        assert_eq!(m.stats.word_count, 2);
        assert_eq!(m.stats.char_count, 15);
        assert!(!m.truncated);
    }

    #[test]
    fn measure_empty_has_zero_stats() {
        let m = measure("   \n  ", &InputPolicy::default());
        assert_eq!(m.stats, Stats::default());
        assert!(m.sanitized.is_empty());
    }

    #[test]
    fn measure_truncates_to_max() {
        let raw = "x".repeat(DEFAULT_MAX_CHARS + 250);
        let m = measure(&raw, &InputPolicy::default());
        assert!(m.truncated);
        assert_eq!(m.sanitized.chars().count(), DEFAULT_MAX_CHARS);
        assert_eq!(m.stats.char_count, DEFAULT_MAX_CHARS);
        assert_eq!(m.stats.word_count, 1);
    }

    #[test]
    fn measure_never_exceeds_max_for_various_inputs() {
        let policy = InputPolicy::new(10);
        let inputs = [
            "a b c d e f g h i j k l m n",
            "      spaced        out      words      ",
            "ééééééééééééééé",
            "exactly10!",
            "short",
        ];
        for input in inputs {
            let m = measure(input, &policy);
            assert!(m.sanitized.chars().count() <= 10, "input {input:?}");
            assert!(m.stats.char_count <= 10);
        }
    }

    #[test]
    fn measure_truncation_respects_char_boundaries() {
        let policy = InputPolicy::new(3);
        let m = measure("日本語テキスト", &policy);
        assert_eq!(m.sanitized, "日本語");
        assert_eq!(m.stats.char_count, 3);
    }

    #[test]
    fn measure_truncation_drops_dangling_space() {
        let policy = InputPolicy::new(6);
        let m = measure("hello world", &policy);
        assert_eq!(m.sanitized, "hello");
        assert_eq!(m.stats.word_count, 1);
        assert_eq!(m.stats.char_count, 5);
    }

    #[test]
    fn measure_cut_between_words_is_one_short_of_max() {
        let m = measure(&"word ".repeat(2000), &InputPolicy::default());
        assert!(m.truncated);
        assert!(!m.sanitized.ends_with(' '));
        assert_eq!(m.stats.char_count, DEFAULT_MAX_CHARS - 1);
        assert_eq!(m.stats.word_count, 1000);
        assert_eq!(sanitize(&m.sanitized), m.sanitized);
    }

    #[test]
    fn truncate_chars_reports_cut() {
        let mut s = "abcdef".to_string();
        assert!(truncate_chars(&mut s, 4));
        assert_eq!(s, "abcd");
        assert!(!truncate_chars(&mut s, 4));
        assert!(!truncate_chars(&mut s, 10));
    }

    #[test]
    fn policy_accepts_range() {
        let policy = InputPolicy::new(5);
        assert!(!policy.accepts(0));
        assert!(policy.accepts(1));
        assert!(policy.accepts(5));
        assert!(!policy.accepts(6));
    }

    #[test]
    fn counter_labels() {
        assert_eq!(format_word_count(0), "0 words");
        assert_eq!(format_word_count(1), "1 word");
        assert_eq!(format_word_count(2), "2 words");
        assert_eq!(format_char_count(15, 5000), "15 / 5000 characters");
    }
}
