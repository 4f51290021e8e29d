//! Seeded random-text checks that every navigation method of a break iterator
//! reports the same boundary set.

use crate::segment::{BreakIterator, FilteredBreakIterator, RuleBreakIterator, RuleSet, Suppressions};

/// Characters (or short sequences) drawn for every rule set.
const COMMON: &[&str] = &[
    "a", "Z", "é", "7", " ", "  ", "\t", "\r", "\n", "\r\n", ".", ",", "'", "\"", "?", "!", "-", "(", ")", "$", "%",
    "\u{301}", "\u{200D}", "\u{200B}", "\u{2060}", "\u{AD}", "\u{1F600}", "\u{1F3FD}", "\u{1F1FA}", "\u{1F1F8}",
    "\u{85}", "\u{2028}", "\u{2029}",
];

const SCRIPTS: &[&str] = &[
    "\u{5D0}", "\u{5F4}", "ひ", "カ", "ー", "漢", "字", "、", "。", "\u{FF08}", "\u{FF09}", "\u{1100}",
    "\u{1161}", "\u{11A8}", "\u{D55C}", "\u{E01}", "\u{E31}", "\u{915}", "\u{94D}", "_", "\u{FE0F}", "\u{1F44D}",
];

const WORDS: &[&str] = &["Mr.", "Dr.", "etc.", "e.g.", "U.S.", "Smith", "he", "2.5", "x"];

/// A random text of up to `max_pieces` pieces.
fn random_text(rng: &mut fastrand::Rng, max_pieces: usize) -> String {
    let len = rng.usize(0..=max_pieces);
    let mut text = String::new();
    for _ in 0..len {
        let pool = match rng.u8(0..10) {
            0..=5 => COMMON,
            6..=8 => SCRIPTS,
            _ => WORDS,
        };
        text.push_str(pool[rng.usize(0..pool.len())]);
    }
    text
}

fn check_agreement<'t>(it: &mut impl BreakIterator<'t>, label: &str) {
    let text = it.text();
    let mut forward = vec![it.first()];
    while let Some(b) = it.next() {
        assert!(b > *forward.last().unwrap(), "{label}: next() went backwards in {text:?}");
        forward.push(b);
    }
    assert_eq!(forward.first(), Some(&0), "{label}: {text:?}");
    assert_eq!(forward.last(), Some(&text.len()), "{label}: {text:?}");

    let mut backward = vec![it.last()];
    while let Some(b) = it.previous() {
        backward.push(b);
    }
    backward.reverse();
    assert_eq!(backward, forward, "{label}: previous() disagrees with next() in {text:?}");

    for offset in 0..=text.len() {
        let is = forward.binary_search(&offset).is_ok();
        assert_eq!(it.is_boundary(offset), Ok(is), "{label}: is_boundary({offset}) in {text:?}");

        let following = forward.iter().copied().find(|&b| b > offset);
        assert_eq!(it.following(offset), Ok(following), "{label}: following({offset}) in {text:?}");
        if let Some(b) = following {
            assert_eq!(it.current(), b);
        }

        let preceding = forward.iter().copied().rev().find(|&b| b < offset);
        assert_eq!(it.preceding(offset), Ok(preceding), "{label}: preceding({offset}) in {text:?}");
    }
}

fn run_monkey(rules: &'static RuleSet, seeds: std::ops::Range<u64>) {
    for seed in seeds {
        let mut rng = fastrand::Rng::with_seed(seed);
        let text = random_text(&mut rng, 40);
        let mut it = RuleBreakIterator::new(rules, &text);
        check_agreement(&mut it, &format!("{} seed {seed}", rules.name()));
    }
}

#[test]
fn grapheme_monkey() {
    run_monkey(RuleSet::grapheme(), 0..300);
}

#[test]
fn word_monkey() {
    run_monkey(RuleSet::word(), 1000..1300);
}

#[test]
fn sentence_monkey() {
    run_monkey(RuleSet::sentence(), 2000..2300);
}

#[test]
fn line_monkey() {
    run_monkey(RuleSet::line(), 3000..3300);
}

#[test]
fn ascii_word_monkey() {
    run_monkey(RuleSet::ascii_word(), 4000..4300);
}

#[test]
fn filtered_sentence_monkey() {
    for seed in 5000..5300 {
        let mut rng = fastrand::Rng::with_seed(seed);
        let text = random_text(&mut rng, 40);
        let inner = RuleBreakIterator::new(RuleSet::sentence(), &text);
        let mut it = FilteredBreakIterator::new(inner, Suppressions::english());
        check_agreement(&mut it, &format!("filtered seed {seed}"));
    }
}

/// Long texts exercise cache eviction and reseeding.
#[test]
fn long_text_monkey() {
    let mut rng = fastrand::Rng::with_seed(77);
    for rules in [RuleSet::word(), RuleSet::line()] {
        let text = random_text(&mut rng, 3000);
        let mut it = RuleBreakIterator::new(rules, &text);
        let forward: Vec<usize> = it.boundaries().collect();
        let mut backward = vec![it.last()];
        while let Some(b) = it.previous() {
            backward.push(b);
        }
        backward.reverse();
        assert_eq!(backward, forward, "{}", rules.name());
        for _ in 0..200 {
            let offset = rng.usize(0..=text.len());
            let following = forward.iter().copied().find(|&b| b > offset);
            assert_eq!(it.following(offset), Ok(following), "{} following({offset})", rules.name());
        }
    }
}
