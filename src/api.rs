use crate::segment::{BreakIterator, FilteredBreakIterator, RuleBreakIterator, Suppressions};
use crate::SegmentKind;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use tracing::debug;

/// Options for [`segment_with`] and [`segment_verbose_with`].
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Which rule set to run.
    pub kind: SegmentKind,
    /// Suppress sentence breaks after common English abbreviations. Only
    /// affects [`SegmentKind::Sentence`].
    pub suppressions: bool,
    /// Stop after this many segments.
    pub max_segments: Option<usize>,
}

/// An owned segment.
///
/// `start`/`end` are byte offsets into the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub start: usize,
    pub end: usize,
    /// Rule-status tag (see [`status`](crate::status)).
    pub status: i32,
    /// Name of the rule that placed the boundary at `end`.
    pub rule: String,
}

/// Result from [`segment`] and [`segment_with`].
#[derive(Debug, Clone)]
pub struct SegmentResult {
    pub text: String,
    pub segments: Vec<Span>,
    pub elapsed: Duration,
}

/// Additional details returned by [`segment_verbose_with`].
#[derive(Debug, Clone)]
pub struct SegmentDetails {
    /// Total elapsed time.
    pub total: Duration,
    /// Name of the rule set that ran.
    pub rule_set: &'static str,
    /// Every boundary found, start and end of text included.
    pub boundaries: Vec<usize>,
    /// How many boundaries each rule placed, by rule name.
    pub rule_counts: Vec<(String, usize)>,
    /// Sentence boundaries removed by abbreviation suppression.
    pub suppressed: Vec<usize>,
}

/// Result from [`segment_verbose_with`].
#[derive(Debug, Clone)]
pub struct SegmentResultVerbose {
    pub text: String,
    pub segments: Vec<Span>,
    pub elapsed: Duration,
    pub details: SegmentDetails,
}

/// Split `text` into words with the default [`Options`].
///
/// # Example
/// ```
/// use ruleseg::segment;
///
/// let out = segment("two words");
/// let words: Vec<&str> = out.segments.iter().map(|s| s.text.as_str()).collect();
/// assert_eq!(words, ["two", " ", "words"]);
/// ```
pub fn segment(text: &str) -> SegmentResult {
    segment_with(text, &Options::default())
}

/// Split `text` with the rule set and limits in `options`.
pub fn segment_with(text: &str, options: &Options) -> SegmentResult {
    let started = Instant::now();
    let segments = run(text, options);
    SegmentResult { text: text.to_string(), segments, elapsed: started.elapsed() }
}

/// Like [`segment_with`], and also report which rules placed the boundaries
/// and which boundaries were suppressed.
pub fn segment_verbose_with(text: &str, options: &Options) -> SegmentResultVerbose {
    let started = Instant::now();
    let segments = run(text, options);

    let mut boundaries = vec![0];
    boundaries.extend(segments.iter().map(|s| s.end));

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for span in &segments {
        *counts.entry(span.rule.as_str()).or_default() += 1;
    }
    let rule_counts = counts.into_iter().map(|(rule, n)| (rule.to_string(), n)).collect();

    let suppressed = if suppressing(options) {
        let last = boundaries.last().copied().unwrap_or(0);
        RuleBreakIterator::new(options.kind.rule_set(), text)
            .boundaries()
            .take_while(|&b| b <= last)
            .filter(|b| boundaries.binary_search(b).is_err())
            .collect()
    } else {
        Vec::new()
    };

    let total = started.elapsed();
    let details = SegmentDetails { total, rule_set: options.kind.name(), boundaries, rule_counts, suppressed };
    SegmentResultVerbose { text: text.to_string(), segments, elapsed: total, details }
}

fn suppressing(options: &Options) -> bool {
    options.suppressions && options.kind == SegmentKind::Sentence
}

fn run(text: &str, options: &Options) -> Vec<Span> {
    let limit = options.max_segments.unwrap_or(usize::MAX);
    let inner = RuleBreakIterator::new(options.kind.rule_set(), text);
    let spans = if suppressing(options) {
        let mut it = FilteredBreakIterator::new(inner, Suppressions::english());
        collect(&mut it, limit, |it| it.rule_name())
    } else {
        let mut it = inner;
        collect(&mut it, limit, |it| it.rule_name())
    };
    debug!(kind = options.kind.name(), len = text.len(), segments = spans.len(), "segmented");
    spans
}

fn collect<'t, I>(it: &mut I, limit: usize, rule_name: impl Fn(&mut I) -> Option<&'static str>) -> Vec<Span>
where
    I: BreakIterator<'t>,
{
    let text = it.text();
    let mut spans = Vec::new();
    let mut start = it.first();
    while spans.len() < limit {
        let Some(end) = it.next() else {
            break;
        };
        spans.push(Span {
            text: text[start..end].to_string(),
            start,
            end,
            status: it.rule_status(),
            rule: rule_name(&mut *it).unwrap_or("any").to_string(),
        });
        start = end;
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status;

    fn texts(spans: &[Span]) -> Vec<&str> {
        spans.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn segment_splits_words_with_status() {
        let res = segment("Isn't it 2.25?");
        assert_eq!(texts(&res.segments), ["Isn't", " ", "it", " ", "2.25", "?"]);
        let statuses: Vec<i32> = res.segments.iter().map(|s| s.status).collect();
        let expected = [
            status::WORD_LETTER,
            status::WORD_NONE,
            status::WORD_LETTER,
            status::WORD_NONE,
            status::WORD_NUMBER,
            status::WORD_NONE,
        ];
        assert_eq!(statuses, expected);
        assert_eq!(res.segments[4].start, 9);
        assert_eq!(res.segments[4].end, 13);
    }

    #[test]
    fn max_segments_stops_early() {
        let opts = Options { max_segments: Some(2), ..Options::default() };
        let res = segment_with("a b c d", &opts);
        assert_eq!(texts(&res.segments), ["a", " "]);
    }

    #[test]
    fn sentence_suppression_is_opt_in() {
        let text = "Mr. Smith went home. He left.";
        let plain = segment_with(text, &Options { kind: SegmentKind::Sentence, ..Options::default() });
        assert_eq!(texts(&plain.segments), ["Mr. ", "Smith went home. ", "He left."]);

        let opts = Options { kind: SegmentKind::Sentence, suppressions: true, ..Options::default() };
        let filtered = segment_verbose_with(text, &opts);
        assert_eq!(texts(&filtered.segments), ["Mr. Smith went home. ", "He left."]);
        assert_eq!(filtered.details.suppressed, [4]);
        assert_eq!(filtered.details.boundaries, [0, 21, 29]);
    }

    #[test]
    fn verbose_reports_rules() {
        let opts = Options { kind: SegmentKind::Grapheme, ..Options::default() };
        let res = segment_verbose_with("a\r\nb", &opts);
        assert_eq!(texts(&res.segments), ["a", "\r\n", "b"]);
        assert_eq!(res.details.rule_set, "grapheme");
        assert_eq!(res.details.boundaries, [0, 1, 3, 4]);
        let rules: Vec<&str> = res.details.rule_counts.iter().map(|(r, _)| r.as_str()).collect();
        assert_eq!(rules, ["GB4", "GB5", "eot"]);
        assert!(res.details.suppressed.is_empty());
        assert_eq!(res.elapsed, res.details.total);
    }

    #[test]
    fn empty_text_has_no_segments() {
        let res = segment("");
        assert!(res.segments.is_empty());
    }
}
