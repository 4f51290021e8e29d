//! Line-break opportunities.
//!
//! Classes are the Line_Break values after the usual resolution of ambiguous
//! ones: AI, SG and XX become AL; SA becomes CM for marks and AL otherwise;
//! CJ becomes NS. Opening and closing punctuation is split by East Asian
//! width because the letter-punctuation rules only apply to the narrow forms.
//! Unassigned Extended_Pictographic code points behave as emoji bases.
//!
//! Numbers (LB25) use the pairwise form: a prefix or postfix sign binds to an
//! adjacent number or bracket, and infix separators bind to a following digit
//! even without a digit before them, so `",2.5"` and `"$("` stay whole.

use super::class::{ClassId, ClassSet, Classifier};
use super::rule_set::{RuleSet, StatusRule};
use super::scanner::Window;
use super::status::{LINE_HARD, LINE_SOFT};
use icu_properties::props::{EastAsianWidth, ExtendedPictographic, GeneralCategory, LineBreak};
use icu_properties::{CodePointMapData, CodePointSetData};
use once_cell::sync::Lazy;

const AL: ClassId = 0;
const BK: ClassId = 1;
const CR: ClassId = 2;
const LF: ClassId = 3;
const NL: ClassId = 4;
const SP: ClassId = 5;
const ZW: ClassId = 6;
const ZWJ: ClassId = 7;
const CM: ClassId = 8;
const WJ: ClassId = 9;
const GL: ClassId = 10;
const BA: ClassId = 11;
const BB: ClassId = 12;
const B2: ClassId = 13;
const HY: ClassId = 14;
const CB: ClassId = 15;
const CL: ClassId = 16;
const CP: ClassId = 17;
const CP_EA: ClassId = 18;
const EX: ClassId = 19;
const IN: ClassId = 20;
const IS: ClassId = 21;
const NS: ClassId = 22;
const OP: ClassId = 23;
const OP_EA: ClassId = 24;
const QU: ClassId = 25;
const SY: ClassId = 26;
const PO: ClassId = 27;
const PR: ClassId = 28;
const NU: ClassId = 29;
const HL: ClassId = 30;
const ID: ClassId = 31;
const EB: ClassId = 32;
const EM: ClassId = 33;
const JL: ClassId = 34;
const JV: ClassId = 35;
const JT: ClassId = 36;
const H2: ClassId = 37;
const H3: ClassId = 38;
const RI: ClassId = 39;

const NAMES: &[&str] = &[
    "AL", "BK", "CR", "LF", "NL", "SP", "ZW", "ZWJ", "CM", "WJ", "GL", "BA", "BB", "B2", "HY", "CB", "CL", "CP",
    "CP_EA", "EX", "IN", "IS", "NS", "OP", "OP_EA", "QU", "SY", "PO", "PR", "NU", "HL", "ID", "EB", "EM", "JL", "JV",
    "JT", "H2", "H3", "RI",
];

const OPEN: ClassSet = classes![OP, OP_EA];
const CLOSE: ClassSet = classes![CL, CP, CP_EA];

fn is_east_asian(ch: char) -> bool {
    matches!(
        CodePointMapData::<EastAsianWidth>::new().get(ch),
        EastAsianWidth::Fullwidth | EastAsianWidth::Wide | EastAsianWidth::Halfwidth
    )
}

fn classify(ch: char) -> ClassId {
    match CodePointMapData::<LineBreak>::new().get(ch) {
        LineBreak::MandatoryBreak => BK,
        LineBreak::CarriageReturn => CR,
        LineBreak::LineFeed => LF,
        LineBreak::NextLine => NL,
        LineBreak::Space => SP,
        LineBreak::ZWSpace => ZW,
        LineBreak::ZWJ => ZWJ,
        LineBreak::CombiningMark => CM,
        LineBreak::WordJoiner => WJ,
        LineBreak::Glue => GL,
        LineBreak::BreakAfter => BA,
        LineBreak::BreakBefore => BB,
        LineBreak::BreakBoth => B2,
        LineBreak::Hyphen => HY,
        LineBreak::ContingentBreak => CB,
        LineBreak::ClosePunctuation => CL,
        LineBreak::CloseParenthesis if is_east_asian(ch) => CP_EA,
        LineBreak::CloseParenthesis => CP,
        LineBreak::Exclamation => EX,
        LineBreak::Inseparable => IN,
        LineBreak::InfixNumeric => IS,
        LineBreak::Nonstarter | LineBreak::ConditionalJapaneseStarter => NS,
        LineBreak::OpenPunctuation if is_east_asian(ch) => OP_EA,
        LineBreak::OpenPunctuation => OP,
        LineBreak::Quotation => QU,
        LineBreak::BreakSymbols => SY,
        LineBreak::PostfixNumeric => PO,
        LineBreak::PrefixNumeric => PR,
        LineBreak::Numeric => NU,
        LineBreak::HebrewLetter => HL,
        LineBreak::Ideographic if is_unassigned_pictographic(ch) => EB,
        LineBreak::Ideographic => ID,
        LineBreak::EBase => EB,
        LineBreak::EModifier => EM,
        LineBreak::JL => JL,
        LineBreak::JV => JV,
        LineBreak::JT => JT,
        LineBreak::H2 => H2,
        LineBreak::H3 => H3,
        LineBreak::RegionalIndicator => RI,
        LineBreak::ComplexContext => match CodePointMapData::<GeneralCategory>::new().get(ch) {
            GeneralCategory::NonspacingMark | GeneralCategory::SpacingMark => CM,
            _ => AL,
        },
        _ => AL,
    }
}

fn is_unassigned_pictographic(ch: char) -> bool {
    CodePointSetData::new::<ExtendedPictographic>().contains(ch)
        && CodePointMapData::<GeneralCategory>::new().get(ch) == GeneralCategory::Unassigned
}

/// The class before `c1`'s run of spaces (or `c1` itself) is in `set`.
fn after_spaces(w: &Window<'_>, set: ClassSet) -> bool {
    set.has_opt(w.back_skipping(classes![SP]))
}

fn status_tag(class: ClassId) -> i32 {
    match class {
        BK | CR | LF | NL => LINE_HARD,
        _ => LINE_SOFT,
    }
}

pub(crate) static RULES: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::builder("line", NAMES, Classifier::table(classify))
        .rules(vec![
            rule!("LB4": [BK] / [*]),
            rule!("LB5": [CR] x [LF]),
            rule!("LB5": [CR, LF, NL] / [*]),
            rule!("LB6": [*] x [BK, CR, LF, NL]),
            rule!("LB7": [*] x [SP, ZW]),
            rule!("LB8": [ZW, SP] / [*] if |w| w.back_skipping(classes![SP]) == Some(ZW)),
            rule!("LB8a": [*] x [*] if |w| w.raw_prev() == ZWJ),
            rule!("LB11": [*] x [WJ]),
            rule!("LB11": [WJ] x [*]),
            rule!("LB12": [GL] x [*]),
            rule!("LB12a": [^SP, BA, HY] x [GL]),
            rule!("LB13": [*] x [CL, CP, CP_EA, EX, IS, SY]),
            rule!("LB14": [OP, OP_EA, SP] x [*] if |w| after_spaces(w, OPEN)),
            rule!("LB15": [QU, SP] x [OP, OP_EA] if |w| after_spaces(w, classes![QU])),
            rule!("LB16": [CL, CP, CP_EA, SP] x [NS] if |w| after_spaces(w, CLOSE)),
            rule!("LB17": [B2, SP] x [B2] if |w| after_spaces(w, classes![B2])),
            rule!("LB18": [SP] / [*]),
            rule!("LB19": [*] x [QU]),
            rule!("LB19": [QU] x [*]),
            rule!("LB20": [*] / [CB]),
            rule!("LB20": [CB] / [*]),
            rule!("LB21": [*] x [BA, HY, NS]),
            rule!("LB21": [BB] x [*]),
            rule!("LB21a": [HY, BA] x [*] if |w| w.before(2) == Some(HL)),
            rule!("LB21b": [SY] x [HL]),
            rule!("LB22": [*] x [IN]),
            rule!("LB23": [AL, HL] x [NU]),
            rule!("LB23": [NU] x [AL, HL]),
            rule!("LB23a": [PR] x [ID, EB, EM]),
            rule!("LB23a": [ID, EB, EM] x [PO]),
            rule!("LB24": [PR, PO] x [AL, HL]),
            rule!("LB24": [AL, HL] x [PR, PO]),
            rule!("LB25": [CL, CP, CP_EA, NU] x [PO, PR]),
            rule!("LB25": [PO, PR] x [OP, OP_EA, NU]),
            rule!("LB25": [HY, IS, NU, SY] x [NU]),
            rule!("LB26": [JL] x [JL, JV, H2, H3]),
            rule!("LB26": [JV, H2] x [JV, JT]),
            rule!("LB26": [JT, H3] x [JT]),
            rule!("LB27": [JL, JV, JT, H2, H3] x [PO]),
            rule!("LB27": [PR] x [JL, JV, JT, H2, H3]),
            rule!("LB28": [AL, HL] x [AL, HL]),
            rule!("LB29": [IS] x [AL, HL]),
            rule!("LB30": [AL, HL, NU] x [OP]),
            rule!("LB30": [CP] x [AL, HL, NU]),
            rule!("LB30a": [RI] x [RI] if |w| w.count_back(classes![RI]) % 2 == 1),
            rule!("LB30b": [EB] x [EM]),
            rule!("LB31": [*] / [*]),
        ])
        .ignorable(classes![CM, ZWJ], classes![BK, CR, LF, NL, SP, ZW], Some(AL))
        .hard_breaks(classes![BK, LF, NL])
        .resync(classes![CR], classes![^LF])
        .resync(classes![ID], classes![ID])
        .status(StatusRule::LastClass(status_tag))
        .build()
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolved_classes() {
        let cases: Vec<(ClassId, char)> = vec![
            (AL, 'a'),
            (NU, '3'),
            (SP, ' '),
            (OP, '('),
            (CP, ')'),
            (OP_EA, '\u{FF08}'),
            (CL, '\u{FF09}'),
            (ID, '\u{6F22}'),
            (NS, '\u{30E3}'),
            (HY, '-'),
            (QU, '"'),
            (BK, '\u{2028}'),
            (AL, '\u{0E01}'),
            (CM, '\u{0E31}'),
            (H2, '\u{AC00}'),
            (RI, '\u{1F1E6}'),
            (EB, '\u{1FFFD}'),
        ];
        for (expected, ch) in cases {
            assert_eq!(NAMES[classify(ch) as usize], NAMES[expected as usize], "char {ch:?}");
        }
    }
}
