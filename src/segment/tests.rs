use super::*;
use crate::BreakError;

const SAMPLE: &str = "This is a word break. Isn't it? 2.25";
const SAMPLE_BOUNDARIES: &[usize] = &[0, 4, 5, 7, 8, 9, 10, 14, 15, 20, 21, 22, 27, 28, 30, 31, 32, 36];

fn forward(rules: &'static RuleSet, text: &str) -> Vec<usize> {
    RuleBreakIterator::new(rules, text).boundaries().collect()
}

fn backward<'t>(it: &mut impl BreakIterator<'t>) -> Vec<usize> {
    let mut out = vec![it.last()];
    while let Some(b) = it.previous() {
        out.push(b);
    }
    out.reverse();
    out
}

fn pieces<'t>(rules: &'static RuleSet, text: &'t str) -> Vec<&'t str> {
    RuleBreakIterator::new(rules, text).segments().map(|s| s.text).collect()
}

fn filtered_pieces(text: &str) -> Vec<&str> {
    let mut it = FilteredBreakIterator::new(RuleBreakIterator::new(RuleSet::sentence(), text), Suppressions::english());
    let mut out = Vec::new();
    let mut start = it.first();
    while let Some(end) = it.next() {
        out.push(&text[start..end]);
        start = end;
    }
    out
}

#[test]
fn word_sample_next_by() {
    for rules in [RuleSet::word(), RuleSet::ascii_word()] {
        let mut it = RuleBreakIterator::new(rules, SAMPLE);
        assert_eq!(it.first(), 0);
        assert_eq!(it.next_by(9), Some(20), "{}", rules.name());
        assert_eq!(&SAMPLE[10..20], "word break");
        assert_eq!(it.next(), Some(21), "{}", rules.name());
        assert_eq!(forward(rules, SAMPLE), SAMPLE_BOUNDARIES, "{}", rules.name());
        assert_eq!(backward(&mut it), SAMPLE_BOUNDARIES, "{}", rules.name());
    }
}

#[test]
fn next_by_past_the_edge_leaves_position() {
    let mut it = RuleBreakIterator::new(RuleSet::word(), SAMPLE);
    it.next_by(3);
    assert_eq!(it.current(), 7);
    assert_eq!(it.next_by(100), None);
    assert_eq!(it.current(), 7);
    assert_eq!(it.next_by(-2), Some(4));
    assert_eq!(it.next_by(-3), None);
    assert_eq!(it.current(), 4);
    assert_eq!(it.next_by(0), Some(4));
}

#[test]
fn crlf_is_one_grapheme() {
    let text = "\r\n";
    let mut it = RuleBreakIterator::new(RuleSet::grapheme(), text);
    assert_eq!(forward(RuleSet::grapheme(), text), [0, 2]);
    assert_eq!(backward(&mut it), [0, 2]);
    assert_eq!(it.is_boundary(1), Ok(false));
    assert_eq!(it.current(), 2);
    assert_eq!(it.is_boundary(0), Ok(true));
    assert_eq!(it.is_boundary(2), Ok(true));
    assert_eq!(it.following(0), Ok(Some(2)));
    assert_eq!(it.following(1), Ok(Some(2)));
    assert_eq!(it.preceding(1), Ok(Some(0)));
    assert_eq!(it.preceding(2), Ok(Some(0)));
    assert_eq!(it.following(2), Ok(None));
    assert_eq!(it.preceding(0), Ok(None));
}

#[test]
fn grapheme_clusters() {
    let cases: Vec<(Vec<&str>, &str)> = vec![
        (vec!["e\u{301}", "x"], "e\u{301}x"),
        (vec!["\u{1F1FA}\u{1F1F8}", "\u{1F1EB}\u{1F1F7}"], "\u{1F1FA}\u{1F1F8}\u{1F1EB}\u{1F1F7}"),
        (vec!["\u{1F468}\u{200D}\u{1F469}", "!"], "\u{1F468}\u{200D}\u{1F469}!"),
        (vec!["\u{1100}\u{1161}\u{11A8}"], "\u{1100}\u{1161}\u{11A8}"),
        (vec!["\u{D55C}", "\u{AD6D}"], "\u{D55C}\u{AD6D}"),
        (vec!["a", "\r\n", "b"], "a\r\nb"),
        (vec!["\n", "\u{301}"], "\n\u{301}"),
        (vec![], ""),
    ];
    for (expected, text) in cases {
        assert_eq!(pieces(RuleSet::grapheme(), text), expected, "text {text:?}");
    }
}

#[test]
fn word_segments_and_status() {
    let cases: Vec<(Vec<(&str, i32)>, &str)> = vec![
        (
            vec![("can't", status::WORD_LETTER), (" ", status::WORD_NONE), ("stop", status::WORD_LETTER)],
            "can't stop",
        ),
        (vec![("3.14", status::WORD_NUMBER), ("!", status::WORD_NONE)], "3.14!"),
        (vec![("foo_bar", status::WORD_LETTER)], "foo_bar"),
        (
            vec![
                ("ひらがな", status::WORD_KANA),
                ("カタカナ", status::WORD_KANA),
                ("漢", status::WORD_IDEO),
                ("字", status::WORD_IDEO),
            ],
            "ひらがなカタカナ漢字",
        ),
        (vec![("\u{1F44D}\u{1F3FD}", status::WORD_NONE), ("ok", status::WORD_LETTER)], "\u{1F44D}\u{1F3FD}ok"),
        (vec![("a", status::WORD_LETTER), ("  ", status::WORD_NONE), ("b", status::WORD_LETTER)], "a  b"),
        (vec![("a", status::WORD_LETTER), (":", status::WORD_NONE), ("b", status::WORD_LETTER)], "a:b"),
        (vec![("l\u{B7}l", status::WORD_LETTER)], "l\u{B7}l"),
    ];
    for (expected, text) in cases {
        let got: Vec<(&str, i32)> =
            RuleBreakIterator::new(RuleSet::word(), text).segments().map(|s| (s.text, s.status)).collect();
        assert_eq!(got, expected, "text {text:?}");
    }
}

#[test]
fn status_vec_lists_every_tag() {
    let text = "abc123 x";
    let mut it = RuleBreakIterator::new(RuleSet::word(), text);
    assert_eq!(it.rule_status_vec(), [0]);
    assert_eq!(it.next(), Some(6));
    assert_eq!(it.rule_status(), status::WORD_LETTER);
    assert_eq!(it.rule_status_vec(), [status::WORD_NUMBER, status::WORD_LETTER]);
    assert_eq!(it.next(), Some(7));
    assert_eq!(it.rule_status_vec(), [status::WORD_NONE]);
}

#[test]
fn line_breaks_and_status() {
    let text = "Hello world\nBye";
    let got: Vec<(&str, i32, &str)> =
        RuleBreakIterator::new(RuleSet::line(), text).segments().map(|s| (s.text, s.status, s.rule)).collect();
    assert_eq!(
        got,
        [
            ("Hello ", status::LINE_SOFT, "LB18"),
            ("world\n", status::LINE_HARD, "LB5"),
            ("Bye", status::LINE_SOFT, "eot"),
        ]
    );

    let cases: Vec<(Vec<&str>, &str)> = vec![
        (vec!["a-", "b"], "a-b"),
        (vec!["中", "文", "字"], "中文字"),
        (vec!["(see) ", "this"], "(see) this"),
        (vec!["$(12.50) ", "now"], "$(12.50) now"),
        (vec!["x\u{200B}", "y"], "x\u{200B}y"),
        (vec!["a\u{2060}b"], "a\u{2060}b"),
        (vec![",2.5"], ",2.5"),
        (vec![".5"], ".5"),
        (vec!["/2.5"], "/2.5"),
        (vec!["a\n", ".7"], "a\n.7"),
        (vec!["\u{3002}$"], "\u{3002}$"),
        (vec![" \u{3002}$"], " \u{3002}$"),
        (vec![")%"], ")%"),
        (vec!["$("], "$("),
        (vec!["$\u{FF08}\u{200D}  a\u{E9}"], "$\u{FF08}\u{200D}  a\u{E9}"),
    ];
    for (expected, text) in cases {
        assert_eq!(pieces(RuleSet::line(), text), expected, "text {text:?}");
    }
}

#[test]
fn sentences() {
    let cases: Vec<(Vec<&str>, &str)> = vec![
        (vec!["Hello there. how are you? ", "Fine!\n", "Next"], "Hello there. how are you? Fine!\nNext"),
        (vec!["It costs 2.5 dollars."], "It costs 2.5 dollars."),
        (vec!["(Done.) ", "Then"], "(Done.) Then"),
    ];
    for (expected, text) in cases {
        assert_eq!(pieces(RuleSet::sentence(), text), expected, "text {text:?}");
    }

    let text = "One.\nTwo.";
    let got: Vec<i32> = RuleBreakIterator::new(RuleSet::sentence(), text).segments().map(|s| s.status).collect();
    assert_eq!(got, [status::SENTENCE_SEP, status::SENTENCE_TERM]);
}

#[test]
fn abbreviations_suppress_sentence_breaks() {
    let text = "Dr. Watson met Mr. Holmes. They talked.";
    assert_eq!(pieces(RuleSet::sentence(), text), ["Dr. ", "Watson met Mr. ", "Holmes. ", "They talked."]);
    assert_eq!(filtered_pieces(text), ["Dr. Watson met Mr. Holmes. ", "They talked."]);

    // Only whole words count.
    assert_eq!(filtered_pieces("Say XMr. Then go."), ["Say XMr. ", "Then go."]);

    // Hard breaks after an abbreviation are kept.
    let cases: Vec<(Vec<&str>, &str)> = vec![
        (vec!["See Mr.\n", "Smith went."], "See Mr.\nSmith went."),
        (vec!["See Mr. \r\n", "Smith went."], "See Mr. \r\nSmith went."),
        (vec!["See Mr.\u{2029}", "Smith went."], "See Mr.\u{2029}Smith went."),
        (vec!["See Mr.\t Smith went."], "See Mr.\t Smith went."),
    ];
    for (expected, text) in cases {
        assert_eq!(filtered_pieces(text), expected, "text {text:?}");
    }
}

#[test]
fn filtered_iterator_random_access() {
    let text = "Dr. Watson met Mr. Holmes. They talked.";
    let mut it = FilteredBreakIterator::new(RuleBreakIterator::new(RuleSet::sentence(), text), Suppressions::english());
    assert_eq!(backward(&mut it), [0, 27, 39]);
    assert_eq!(it.following(5), Ok(Some(27)));
    assert_eq!(it.preceding(20), Ok(Some(0)));
    assert_eq!(it.preceding(30), Ok(Some(27)));
    assert_eq!(it.is_boundary(19), Ok(false));
    assert_eq!(it.current(), 27);
    assert_eq!(it.is_boundary(27), Ok(true));
    assert_eq!(it.rule_name(), Some("SB11"));
    assert_eq!(it.following(100), Err(BreakError::OffsetOutOfRange { offset: 100, range: 0..39 }));
}

#[test]
fn custom_suppressions() {
    let list = Suppressions::new(["approx.", "Fig."]).unwrap();
    assert_eq!(list.len(), 2);
    assert!(!list.is_empty());
    let text = "See Fig. Two below. Done.";
    let mut it = FilteredBreakIterator::new(RuleBreakIterator::new(RuleSet::sentence(), text), &list);
    assert_eq!(it.next(), Some(20));
    assert_eq!(it.next(), Some(25));
    assert_eq!(it.next(), None);

    let err = Suppressions::new(["etc.", "etc."]).unwrap_err();
    assert_eq!(err, crate::TrieError::DuplicateKey(".cte".to_string()));
}

#[test]
fn offset_errors() {
    let text = "héllo";
    let mut it = RuleBreakIterator::new(RuleSet::word(), text);
    assert_eq!(it.is_boundary(7), Err(BreakError::OffsetOutOfRange { offset: 7, range: 0..6 }));
    assert_eq!(it.preceding(9), Err(BreakError::OffsetOutOfRange { offset: 9, range: 0..6 }));
    // Inside 'é': not a boundary, moves to the next one.
    assert_eq!(it.is_boundary(2), Ok(false));
    assert_eq!(it.current(), 6);

    assert_eq!(it.set_text_range(text, 4..2), Err(BreakError::InvalidRange { range: 4..2, len: 6 }));
    assert_eq!(it.set_text_range(text, 0..9), Err(BreakError::InvalidRange { range: 0..9, len: 6 }));
    assert_eq!(it.set_text_range(text, 2..6), Err(BreakError::NotCharBoundary(2)));
}

#[test]
fn text_range_limits_the_scan() {
    let text = "one two three";
    let mut it = RuleBreakIterator::new(RuleSet::word(), text);
    it.set_text_range(text, 4..13).unwrap();
    assert_eq!(it.boundaries().collect::<Vec<_>>(), [4, 7, 8, 13]);
    assert_eq!(it.first(), 4);
    assert_eq!(it.previous(), None);
    assert_eq!(it.is_boundary(3), Err(BreakError::OffsetOutOfRange { offset: 3, range: 4..13 }));
    assert_eq!(it.preceding(4), Ok(None));
    assert_eq!(it.following(5), Ok(Some(7)));

    // A word cut by the range end still ends there.
    it.set_text_range(text, 0..6).unwrap();
    assert_eq!(it.boundaries().collect::<Vec<_>>(), [0, 3, 4, 6]);
}

#[test]
fn refresh_text_keeps_position() {
    let original = String::from("alpha beta");
    let copy = original.clone();
    let mut it = RuleBreakIterator::new(RuleSet::word(), &original);
    it.next();
    it.next();
    assert_eq!(it.refresh_text(&copy), Ok(()));
    assert_eq!(it.current(), 6);
    assert_eq!(it.next(), Some(10));
    assert_eq!(it.refresh_text("alpha gamma"), Err(BreakError::TextMismatch));
}

#[test]
fn clones_are_equal_and_independent() {
    let mut it = RuleBreakIterator::new(RuleSet::word(), SAMPLE);
    it.next_by(4);
    let mut copy = it.clone();
    assert_eq!(copy, it);
    assert_eq!(copy.next(), it.next());
    assert_eq!(copy.next(), Some(10));
    assert_ne!(copy, it);

    let other = String::from(SAMPLE);
    let mut same_content = RuleBreakIterator::new(RuleSet::word(), &other);
    same_content.next_by(5);
    assert_eq!(same_content, it);

    let line = RuleBreakIterator::new(RuleSet::line(), SAMPLE);
    assert_ne!(line, RuleBreakIterator::new(RuleSet::word(), SAMPLE));
}

#[test]
fn reset_restores_the_initial_state() {
    let fresh = RuleBreakIterator::new(RuleSet::sentence(), SAMPLE);
    let mut it = fresh.clone();
    it.last();
    it.previous();
    it.following(3).unwrap();
    it.reset();
    assert_eq!(it, fresh);
    assert_eq!(it.current(), 0);
    assert_eq!(it.rule_status(), 0);
    assert_eq!(it.rule_name(), Some("sot"));

    let mut word = RuleBreakIterator::new(RuleSet::word(), "x");
    word.set_text(SAMPLE);
    assert_eq!(word.boundaries().collect::<Vec<_>>(), SAMPLE_BOUNDARIES);
}

#[test]
fn long_text_agrees_in_both_directions() {
    let text = "alpha beta, gamma.\r\n".repeat(600);
    for rules in [RuleSet::grapheme(), RuleSet::word(), RuleSet::line(), RuleSet::sentence(), RuleSet::ascii_word()] {
        let fwd = forward(rules, &text);
        let mut it = RuleBreakIterator::new(rules, &text);
        assert_eq!(backward(&mut it), fwd, "{}", rules.name());
        for offset in (0..text.len()).step_by(97) {
            let expected = fwd.iter().copied().find(|&b| b > offset);
            assert_eq!(it.following(offset), Ok(expected), "{} following({offset})", rules.name());
            let expected = fwd.iter().copied().rev().find(|&b| b < offset);
            assert_eq!(it.preceding(offset), Ok(expected), "{} preceding({offset})", rules.name());
            assert_eq!(it.is_boundary(offset), Ok(fwd.binary_search(&offset).is_ok()), "{}", rules.name());
        }
    }
}

#[test]
fn pattern_rule_sets() {
    let rules = RuleSet::builder("digits", &["other", "digit"], Classifier::patterns(&[("[0-9]", 1)], 0).unwrap())
        .rules(vec![rule!("run": [1] x [1]), rule!("split": [*] / [*])])
        .resync(classes![0], classes![*])
        .build();
    assert_eq!(rules.name(), "digits");
    assert_eq!(rules.rules().len(), 2);
    assert_eq!(rules.class_name(1), "digit");
    assert_eq!(rules.class_name(9), "?");
    let text = "ab1234c5";
    let got: Vec<(&str, &str)> = RuleBreakIterator::new(&rules, text).segments().map(|s| (s.text, s.rule)).collect();
    assert_eq!(got, [("a", "split"), ("b", "split"), ("1234", "split"), ("c", "split"), ("5", "eot")]);
}

#[test]
fn done_sentinel_value() {
    assert_eq!(DONE, -1);
    let mut it = RuleBreakIterator::new(RuleSet::word(), "ab");
    it.last();
    assert_eq!(it.next().map_or(DONE, |b| b as i64), DONE);
}
