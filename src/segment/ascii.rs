//! A small word rule set for ASCII text, with classes defined by regex
//! patterns instead of Unicode properties.

use super::class::{ClassId, Classifier};
use super::rule_set::{RuleSet, StatusRule};
use super::status::{WORD_LETTER, WORD_NONE, WORD_NUMBER};
use once_cell::sync::Lazy;

const OTHER: ClassId = 0;
const LETTER: ClassId = 1;
const DIGIT: ClassId = 2;
const APOSTROPHE: ClassId = 3;
const MID_NUM: ClassId = 4;
const SPACE: ClassId = 5;
const CR: ClassId = 6;
const LF: ClassId = 7;

const NAMES: &[&str] = &["Other", "Letter", "Digit", "Apostrophe", "MidNum", "Space", "CR", "LF"];

const PATTERNS: &[(&str, ClassId)] = &[
    ("[A-Za-z]", LETTER),
    ("[0-9]", DIGIT),
    ("'", APOSTROPHE),
    ("[.,]", MID_NUM),
    ("[ \t]", SPACE),
    ("\r", CR),
    ("\n", LF),
];

fn status_tag(class: ClassId) -> Option<i32> {
    match class {
        LETTER => Some(WORD_LETTER),
        DIGIT => Some(WORD_NUMBER),
        APOSTROPHE | MID_NUM => None,
        _ => Some(WORD_NONE),
    }
}

pub(crate) static RULES: Lazy<RuleSet> = Lazy::new(|| {
    let classifier = Classifier::patterns(PATTERNS, OTHER).expect("ascii class patterns compile");
    RuleSet::builder("ascii-word", NAMES, classifier)
        .rules(vec![
            rule!("cr-lf": [CR] x [LF]),
            rule!("after-newline": [CR, LF] / [*]),
            rule!("before-newline": [*] / [CR, LF]),
            rule!("alnum": [LETTER, DIGIT] x [LETTER, DIGIT]),
            rule!("contraction": [LETTER] x [APOSTROPHE] if |w| w.after(2) == Some(LETTER)),
            rule!("contraction": [APOSTROPHE] x [LETTER] if |w| w.before(2) == Some(LETTER)),
            rule!("decimal": [DIGIT] x [MID_NUM, APOSTROPHE] if |w| w.after(2) == Some(DIGIT)),
            rule!("decimal": [MID_NUM, APOSTROPHE] x [DIGIT] if |w| w.before(2) == Some(DIGIT)),
            rule!("spaces": [SPACE] x [SPACE]),
            rule!("any": [*] / [*]),
        ])
        .hard_breaks(classes![LF])
        .resync(classes![CR], classes![^LF])
        .resync(classes![OTHER], classes![*])
        .resync(classes![^SPACE], classes![SPACE])
        .status(StatusRule::MaxOfClasses(status_tag))
        .build()
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_classes() {
        let cases: Vec<(ClassId, char)> =
            vec![(LETTER, 'q'), (DIGIT, '4'), (APOSTROPHE, '\''), (MID_NUM, ','), (SPACE, '\t'), (OTHER, 'é')];
        for (expected, ch) in cases {
            assert_eq!(RULES.classify(ch), expected, "char {ch:?}");
        }
    }
}
