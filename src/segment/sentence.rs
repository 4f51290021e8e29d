//! Sentence boundary rules.

use super::class::{ClassId, ClassSet, Classifier};
use super::rule_set::{RuleSet, StatusRule};
use super::scanner::Window;
use super::status::{SENTENCE_SEP, SENTENCE_TERM};
use icu_properties::CodePointMapData;
use icu_properties::props::SentenceBreak;
use once_cell::sync::Lazy;

const OTHER: ClassId = 0;
const CR: ClassId = 1;
const LF: ClassId = 2;
const SEP: ClassId = 3;
const EXTEND: ClassId = 4;
const FORMAT: ClassId = 5;
const SP: ClassId = 6;
const LOWER: ClassId = 7;
const UPPER: ClassId = 8;
const OLETTER: ClassId = 9;
const NUMERIC: ClassId = 10;
const ATERM: ClassId = 11;
const STERM: ClassId = 12;
const CLOSE: ClassId = 13;
const SCONTINUE: ClassId = 14;

const NAMES: &[&str] = &[
    "Other", "CR", "LF", "Sep", "Extend", "Format", "Sp", "Lower", "Upper", "OLetter", "Numeric", "ATerm", "STerm",
    "Close", "SContinue",
];

const SATERM: ClassSet = classes![STERM, ATERM];
/// Classes that end the SB8 lookahead.
const SB8_STOP: ClassSet = classes![OLETTER, UPPER, LOWER, SEP, CR, LF, STERM, ATERM];

fn classify(ch: char) -> ClassId {
    match CodePointMapData::<SentenceBreak>::new().get(ch) {
        SentenceBreak::CR => CR,
        SentenceBreak::LF => LF,
        SentenceBreak::Sep => SEP,
        SentenceBreak::Extend => EXTEND,
        SentenceBreak::Format => FORMAT,
        SentenceBreak::Sp => SP,
        SentenceBreak::Lower => LOWER,
        SentenceBreak::Upper => UPPER,
        SentenceBreak::OLetter => OLETTER,
        SentenceBreak::Numeric => NUMERIC,
        SentenceBreak::ATerm => ATERM,
        SentenceBreak::STerm => STERM,
        SentenceBreak::Close => CLOSE,
        SentenceBreak::SContinue => SCONTINUE,
        _ => OTHER,
    }
}

/// History ends with `term Close*`, or `term Close* Sp*` when `spaces` is set.
fn ends_with_term(w: &Window<'_>, spaces: bool, term: ClassSet) -> bool {
    let mut back = w.back().peekable();
    if spaces {
        while back.next_if_eq(&SP).is_some() {}
    }
    while back.next_if_eq(&CLOSE).is_some() {}
    back.next().is_some_and(|c| term.has(c))
}

fn status_tag(class: ClassId) -> i32 {
    match class {
        SEP | CR | LF => SENTENCE_SEP,
        _ => SENTENCE_TERM,
    }
}

pub(crate) static RULES: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::builder("sentence", NAMES, Classifier::table(classify))
        .rules(vec![
            rule!("SB3": [CR] x [LF]),
            rule!("SB4": [SEP, CR, LF] / [*]),
            rule!("SB6": [ATERM] x [NUMERIC]),
            rule!("SB7": [ATERM] x [UPPER] if |w| classes![UPPER, LOWER].has_opt(w.before(2))),
            rule!("SB8": [ATERM, CLOSE, SP] x [*]
                if |w| ends_with_term(w, true, classes![ATERM]) && w.ahead().find(|&c| SB8_STOP.has(c)) == Some(LOWER)),
            rule!("SB8a": [STERM, ATERM, CLOSE, SP] x [SCONTINUE, STERM, ATERM] if |w| ends_with_term(w, true, SATERM)),
            rule!("SB9": [STERM, ATERM, CLOSE] x [CLOSE, SP, SEP, CR, LF] if |w| ends_with_term(w, false, SATERM)),
            rule!("SB10": [STERM, ATERM, CLOSE, SP] x [SP, SEP, CR, LF] if |w| ends_with_term(w, true, SATERM)),
            rule!("SB11": [STERM, ATERM, CLOSE, SP] / [*] if |w| ends_with_term(w, true, SATERM)),
            rule!("SB998": [*] x [*]),
        ])
        .ignorable(classes![EXTEND, FORMAT], classes![SEP, CR, LF], None)
        .hard_breaks(classes![SEP, LF])
        .resync(classes![CR], classes![^LF])
        .status(StatusRule::LastClass(status_tag))
        .build()
});
