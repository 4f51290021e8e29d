//! Character classes and classifiers.
//!
//! Every rule set numbers its own classes (`ClassId`, at most 64 of them) and
//! supplies a classifier that maps a `char` to one of them. Classifiers are
//! either compiled functions over Unicode property tables or ordered lists of
//! single-character regex patterns.

use crate::BreakError;
use regex::Regex;

/// Index of a character class within one rule set.
pub type ClassId = u8;

bitflags::bitflags! {
    /// Set of class ids, one bit per class.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ClassSet: u64 {
        const _ = !0;
    }
}

impl ClassSet {
    pub const fn of(id: ClassId) -> Self {
        Self::from_bits_retain(1u64 << id)
    }

    pub const fn has(self, id: ClassId) -> bool {
        self.bits() & (1u64 << id) != 0
    }

    pub fn has_opt(self, id: Option<ClassId>) -> bool {
        id.is_some_and(|id| self.has(id))
    }
}

/// Maps characters to class ids.
#[derive(Debug)]
pub enum Classifier {
    /// Compiled lookup, usually over Unicode property tables.
    Table(fn(char) -> ClassId),
    /// First matching single-character pattern wins.
    Patterns(PatternClasses),
}

impl Classifier {
    pub fn table(f: fn(char) -> ClassId) -> Self {
        Classifier::Table(f)
    }

    /// Build a pattern classifier; each pattern must match exactly one character.
    pub fn patterns(patterns: &[(&str, ClassId)], default: ClassId) -> Result<Self, BreakError> {
        PatternClasses::new(patterns, default).map(Classifier::Patterns)
    }

    pub fn classify(&self, ch: char) -> ClassId {
        match self {
            Classifier::Table(f) => f(ch),
            Classifier::Patterns(p) => p.classify(ch),
        }
    }
}

#[derive(Debug)]
pub struct PatternClasses {
    ascii: [ClassId; 128],
    patterns: Vec<(Regex, ClassId)>,
    default: ClassId,
}

impl PatternClasses {
    fn new(patterns: &[(&str, ClassId)], default: ClassId) -> Result<Self, BreakError> {
        let mut compiled = Vec::with_capacity(patterns.len());
        for (pattern, class) in patterns {
            let re = Regex::new(&format!("^(?:{pattern})$")).map_err(|e| BreakError::InvalidPattern {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })?;
            compiled.push((re, *class));
        }
        let mut classes = Self { ascii: [default; 128], patterns: compiled, default };
        for b in 0u8..128 {
            classes.ascii[b as usize] = classes.classify_slow(b as char);
        }
        Ok(classes)
    }

    fn classify(&self, ch: char) -> ClassId {
        if ch.is_ascii() { self.ascii[ch as usize] } else { self.classify_slow(ch) }
    }

    fn classify_slow(&self, ch: char) -> ClassId {
        let mut buf = [0u8; 4];
        let s = ch.encode_utf8(&mut buf);
        self.patterns.iter().find(|(re, _)| re.is_match(s)).map_or(self.default, |(_, class)| *class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_set_membership() {
        let set = ClassSet::of(3) | ClassSet::of(63);
        assert!(set.has(3) && set.has(63));
        assert!(!set.has(4));
        assert!(set.has_opt(Some(63)));
        assert!(!set.has_opt(None));
        assert!(ClassSet::all().has(40));
    }

    #[test]
    fn patterns_are_anchored_and_ordered() {
        let classifier = Classifier::patterns(&[("[a-z]", 1), ("[a-z0-9]", 2), ("é", 3)], 0).unwrap();
        let cases: Vec<(ClassId, char)> = vec![(1, 'q'), (2, '7'), (3, 'é'), (0, 'Q'), (0, '-')];
        for (expected, ch) in cases {
            assert_eq!(classifier.classify(ch), expected, "char {ch:?}");
        }
    }

    #[test]
    fn invalid_pattern_is_reported() {
        let err = Classifier::patterns(&[("[a-", 1)], 0).unwrap_err();
        assert!(matches!(err, BreakError::InvalidPattern { ref pattern, .. } if pattern == "[a-"));
    }
}
