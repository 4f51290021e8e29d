//! Word boundary rules, with Hiragana runs kept together and ideographs
//! standing alone.
//!
//! Colons (`:`, U+FE55, U+FF1A) are not MidLetter here, so `"a:b"` splits
//! into three words.
//!
//! Status tags follow the `WORD_*` ranges in [`status`](super::status).

use super::class::{ClassId, ClassSet, Classifier};
use super::rule_set::{RuleSet, StatusRule};
use super::status::{WORD_IDEO, WORD_KANA, WORD_LETTER, WORD_NONE, WORD_NUMBER};
use icu_properties::props::{ExtendedPictographic, Ideographic, Script, WordBreak};
use icu_properties::{CodePointMapData, CodePointSetData};
use once_cell::sync::Lazy;

const OTHER: ClassId = 0;
const CR: ClassId = 1;
const LF: ClassId = 2;
const NEWLINE: ClassId = 3;
const EXTEND: ClassId = 4;
const ZWJ: ClassId = 5;
const FORMAT: ClassId = 6;
const KATAKANA: ClassId = 7;
const HEBREW_LETTER: ClassId = 8;
const ALETTER: ClassId = 9;
const SINGLE_QUOTE: ClassId = 10;
const DOUBLE_QUOTE: ClassId = 11;
const MID_NUM_LET: ClassId = 12;
const MID_LETTER: ClassId = 13;
const MID_NUM: ClassId = 14;
const NUMERIC: ClassId = 15;
const EXTEND_NUM_LET: ClassId = 16;
const RI: ClassId = 17;
const WSEG_SPACE: ClassId = 18;
const EXT_PICT: ClassId = 19;
const HIRAGANA: ClassId = 20;
const IDEOGRAPHIC: ClassId = 21;

const NAMES: &[&str] = &[
    "Other",
    "CR",
    "LF",
    "Newline",
    "Extend",
    "ZWJ",
    "Format",
    "Katakana",
    "Hebrew_Letter",
    "ALetter",
    "Single_Quote",
    "Double_Quote",
    "MidNumLet",
    "MidLetter",
    "MidNum",
    "Numeric",
    "ExtendNumLet",
    "RI",
    "WSegSpace",
    "ExtPict",
    "Hiragana",
    "Ideographic",
];

const AHLETTER: ClassSet = classes![ALETTER, HEBREW_LETTER];

fn classify(ch: char) -> ClassId {
    match CodePointMapData::<WordBreak>::new().get(ch) {
        WordBreak::CR => CR,
        WordBreak::LF => LF,
        WordBreak::Newline => NEWLINE,
        WordBreak::Extend => EXTEND,
        WordBreak::ZWJ => ZWJ,
        WordBreak::Format => FORMAT,
        WordBreak::Katakana => KATAKANA,
        WordBreak::HebrewLetter => HEBREW_LETTER,
        WordBreak::ALetter => ALETTER,
        WordBreak::SingleQuote => SINGLE_QUOTE,
        WordBreak::DoubleQuote => DOUBLE_QUOTE,
        WordBreak::MidNumLet => MID_NUM_LET,
        WordBreak::MidLetter if is_colon(ch) => OTHER,
        WordBreak::MidLetter => MID_LETTER,
        WordBreak::MidNum => MID_NUM,
        WordBreak::Numeric => NUMERIC,
        WordBreak::ExtendNumLet => EXTEND_NUM_LET,
        WordBreak::RegionalIndicator => RI,
        WordBreak::WSegSpace => WSEG_SPACE,
        _ => classify_other(ch),
    }
}

fn is_colon(ch: char) -> bool {
    matches!(ch, ':' | '\u{FE55}' | '\u{FF1A}')
}

fn classify_other(ch: char) -> ClassId {
    if CodePointSetData::new::<ExtendedPictographic>().contains(ch) {
        EXT_PICT
    } else if CodePointMapData::<Script>::new().get(ch) == Script::Hiragana {
        HIRAGANA
    } else if CodePointSetData::new::<Ideographic>().contains(ch) {
        IDEOGRAPHIC
    } else {
        OTHER
    }
}

fn status_tag(class: ClassId) -> Option<i32> {
    match class {
        ALETTER | HEBREW_LETTER => Some(WORD_LETTER),
        NUMERIC => Some(WORD_NUMBER),
        KATAKANA | HIRAGANA => Some(WORD_KANA),
        IDEOGRAPHIC => Some(WORD_IDEO),
        SINGLE_QUOTE | DOUBLE_QUOTE | MID_NUM_LET | MID_LETTER | MID_NUM | EXTEND_NUM_LET => None,
        _ => Some(WORD_NONE),
    }
}

pub(crate) static RULES: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::builder("word", NAMES, Classifier::table(classify))
        .rules(vec![
            rule!("WB3": [CR] x [LF]),
            rule!("WB3a": [CR, LF, NEWLINE] / [*]),
            rule!("WB3b": [*] / [CR, LF, NEWLINE]),
            rule!("WB3c": [*] x [EXT_PICT] if |w| w.raw_prev() == ZWJ),
            rule!("WB3d": [WSEG_SPACE] x [WSEG_SPACE] if |w| w.raw_prev() == WSEG_SPACE),
            rule!("WB5": [ALETTER, HEBREW_LETTER] x [ALETTER, HEBREW_LETTER]),
            rule!("WB6": [ALETTER, HEBREW_LETTER] x [MID_LETTER, MID_NUM_LET, SINGLE_QUOTE]
                if |w| AHLETTER.has_opt(w.after(2))),
            rule!("WB7": [MID_LETTER, MID_NUM_LET, SINGLE_QUOTE] x [ALETTER, HEBREW_LETTER]
                if |w| AHLETTER.has_opt(w.before(2))),
            rule!("WB7a": [HEBREW_LETTER] x [SINGLE_QUOTE]),
            rule!("WB7b": [HEBREW_LETTER] x [DOUBLE_QUOTE] if |w| w.after(2) == Some(HEBREW_LETTER)),
            rule!("WB7c": [DOUBLE_QUOTE] x [HEBREW_LETTER] if |w| w.before(2) == Some(HEBREW_LETTER)),
            rule!("WB8": [NUMERIC] x [NUMERIC]),
            rule!("WB9": [ALETTER, HEBREW_LETTER] x [NUMERIC]),
            rule!("WB10": [NUMERIC] x [ALETTER, HEBREW_LETTER]),
            rule!("WB11": [MID_NUM, MID_NUM_LET, SINGLE_QUOTE] x [NUMERIC] if |w| w.before(2) == Some(NUMERIC)),
            rule!("WB12": [NUMERIC] x [MID_NUM, MID_NUM_LET, SINGLE_QUOTE] if |w| w.after(2) == Some(NUMERIC)),
            rule!("WB13": [KATAKANA] x [KATAKANA]),
            rule!("WB13a": [ALETTER, HEBREW_LETTER, NUMERIC, KATAKANA, EXTEND_NUM_LET] x [EXTEND_NUM_LET]),
            rule!("WB13b": [EXTEND_NUM_LET] x [ALETTER, HEBREW_LETTER, NUMERIC, KATAKANA]),
            rule!("WB15": [RI] x [RI] if |w| w.count_back(classes![RI]) % 2 == 1),
            rule!("hiragana": [HIRAGANA] x [HIRAGANA]),
            rule!("WB999": [*] / [*]),
        ])
        .ignorable(classes![EXTEND, FORMAT, ZWJ], classes![CR, LF, NEWLINE], None)
        .hard_breaks(classes![LF, NEWLINE])
        .resync(classes![CR], classes![^LF])
        .resync(classes![OTHER, EXT_PICT, IDEOGRAPHIC], classes![*])
        .resync(classes![^WSEG_SPACE], classes![WSEG_SPACE])
        .resync(classes![WSEG_SPACE], classes![^WSEG_SPACE])
        .status(StatusRule::MaxOfClasses(status_tag))
        .build()
});

#[cfg(test)]
pub(crate) fn class_of(ch: char) -> &'static str {
    NAMES[classify(ch) as usize]
}

#[cfg(test)]
mod tests {
    use super::class_of;

    #[test]
    fn property_classes() {
        let cases: Vec<(&str, char)> = vec![
            ("ALetter", 'a'),
            ("Numeric", '7'),
            ("Single_Quote", '\''),
            ("MidNumLet", '.'),
            ("MidNum", ','),
            ("Katakana", 'カ'),
            ("Hiragana", 'ひ'),
            ("Ideographic", '漢'),
            ("ExtPict", '\u{1F600}'),
            ("WSegSpace", ' '),
            ("Extend", '\u{301}'),
            ("Other", '?'),
            ("Other", ':'),
            ("Other", '\u{FF1A}'),
            ("MidLetter", '\u{B7}'),
        ];
        for (expected, ch) in cases {
            assert_eq!(class_of(ch), expected, "char {ch:?}");
        }
    }
}
