//! Extended grapheme cluster rules.

use super::class::{ClassId, Classifier};
use super::rule_set::{RuleSet, StatusRule};
use icu_properties::props::{ExtendedPictographic, GraphemeClusterBreak};
use icu_properties::{CodePointMapData, CodePointSetData};
use once_cell::sync::Lazy;

const OTHER: ClassId = 0;
const CR: ClassId = 1;
const LF: ClassId = 2;
const CONTROL: ClassId = 3;
const EXTEND: ClassId = 4;
const ZWJ: ClassId = 5;
const RI: ClassId = 6;
const PREPEND: ClassId = 7;
const SPACING_MARK: ClassId = 8;
const L: ClassId = 9;
const V: ClassId = 10;
const T: ClassId = 11;
const LV: ClassId = 12;
const LVT: ClassId = 13;
const EXT_PICT: ClassId = 14;

const NAMES: &[&str] = &[
    "Other", "CR", "LF", "Control", "Extend", "ZWJ", "RI", "Prepend", "SpacingMark", "L", "V", "T", "LV", "LVT",
    "ExtPict",
];

fn classify(ch: char) -> ClassId {
    match CodePointMapData::<GraphemeClusterBreak>::new().get(ch) {
        GraphemeClusterBreak::CR => CR,
        GraphemeClusterBreak::LF => LF,
        GraphemeClusterBreak::Control => CONTROL,
        GraphemeClusterBreak::Extend => EXTEND,
        GraphemeClusterBreak::ZWJ => ZWJ,
        GraphemeClusterBreak::RegionalIndicator => RI,
        GraphemeClusterBreak::Prepend => PREPEND,
        GraphemeClusterBreak::SpacingMark => SPACING_MARK,
        GraphemeClusterBreak::L => L,
        GraphemeClusterBreak::V => V,
        GraphemeClusterBreak::T => T,
        GraphemeClusterBreak::LV => LV,
        GraphemeClusterBreak::LVT => LVT,
        _ if CodePointSetData::new::<ExtendedPictographic>().contains(ch) => EXT_PICT,
        _ => OTHER,
    }
}

pub(crate) static RULES: Lazy<RuleSet> = Lazy::new(|| {
    RuleSet::builder("grapheme", NAMES, Classifier::table(classify))
        .rules(vec![
            rule!("GB3": [CR] x [LF]),
            rule!("GB4": [CONTROL, CR, LF] / [*]),
            rule!("GB5": [*] / [CONTROL, CR, LF]),
            rule!("GB6": [L] x [L, V, LV, LVT]),
            rule!("GB7": [LV, V] x [V, T]),
            rule!("GB8": [LVT, T] x [T]),
            rule!("GB9": [*] x [EXTEND, ZWJ]),
            rule!("GB9a": [*] x [SPACING_MARK]),
            rule!("GB9b": [PREPEND] x [*]),
            // ExtPict Extend* ZWJ x ExtPict
            rule!("GB11": [ZWJ] x [EXT_PICT] if |w| w.back().skip(1).find(|&c| c != EXTEND) == Some(EXT_PICT)),
            // Regional indicators pair up.
            rule!("GB12": [RI] x [RI] if |w| w.count_back(classes![RI]) % 2 == 1),
            rule!("GB999": [*] / [*]),
        ])
        .hard_breaks(classes![CONTROL, LF])
        .resync(classes![CR], classes![^LF])
        .resync(classes![OTHER, EXT_PICT], classes![^EXTEND, ZWJ, SPACING_MARK])
        .status(StatusRule::Constant(0))
        .build()
});
