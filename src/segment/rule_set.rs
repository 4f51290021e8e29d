//! Rule tables.
//!
//! A [`RuleSet`] is the unit of variation between grapheme, word, sentence and
//! line segmentation: the same scanner runs over all of them. Besides the
//! ordered adjacency rules it carries the parameters that shape the scan:
//!
//! - `ignorable`: classes folded into the preceding character (`X Extend* -> X`)
//!   unless that character's class is one of the `anchors`;
//! - `orphan`: the class used for an ignorable that could not be folded;
//! - `hard_breaks` and `resync`: locally provable boundaries, used as restart
//!   points for backward and random-access queries;
//! - `status`: how the rule-status tag of a segment is derived.

use super::class::{ClassId, ClassSet, Classifier};
use super::scanner::Window;

/// What a matching rule decides for the candidate position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Break,
    Keep,
}

/// Extra context check for a rule, evaluated after both class sets matched.
pub type Guard = fn(&Window<'_>) -> bool;

/// One adjacency rule: `prev` is tested against the significant class before
/// the candidate, `next` against the one after it.
#[derive(Debug, Clone)]
pub struct Rule {
    pub name: &'static str,
    pub prev: ClassSet,
    pub next: ClassSet,
    pub action: Action,
    pub guard: Option<Guard>,
}

impl Rule {
    pub const fn new(
        name: &'static str,
        prev: ClassSet,
        next: ClassSet,
        action: Action,
        guard: Option<Guard>,
    ) -> Self {
        Self { name, prev, next, action, guard }
    }

    pub(crate) fn applies(&self, window: &Window<'_>) -> bool {
        self.prev.has(window.prev()) && self.next.has(window.next()) && self.guard.is_none_or(|g| g(window))
    }
}

/// How a segment's rule-status tag is computed.
#[derive(Debug, Clone, Copy)]
pub enum StatusRule {
    Constant(i32),
    /// Highest tag over the segment's classes; classes mapped to `None` do not
    /// contribute. A segment with no tagged class gets 0.
    MaxOfClasses(fn(ClassId) -> Option<i32>),
    /// Tag of the segment's last class.
    LastClass(fn(ClassId) -> i32),
}

impl StatusRule {
    pub(crate) fn status(&self, classes: &[ClassId]) -> i32 {
        match *self {
            StatusRule::Constant(tag) => tag,
            StatusRule::MaxOfClasses(tag) => classes.iter().filter_map(|&c| tag(c)).max().unwrap_or(0),
            StatusRule::LastClass(tag) => classes.last().map_or(0, |&c| tag(c)),
        }
    }

    pub(crate) fn tags(&self, classes: &[ClassId]) -> Vec<i32> {
        match *self {
            StatusRule::MaxOfClasses(tag) => {
                let mut tags: Vec<i32> = classes.iter().filter_map(|&c| tag(c)).collect();
                tags.sort_unstable();
                tags.dedup();
                if tags.is_empty() { vec![0] } else { tags }
            }
            _ => vec![self.status(classes)],
        }
    }
}

/// Immutable, shareable segmentation rules.
#[derive(Debug)]
pub struct RuleSet {
    pub(crate) name: &'static str,
    pub(crate) class_names: &'static [&'static str],
    pub(crate) classifier: Classifier,
    pub(crate) rules: Vec<Rule>,
    pub(crate) ignorable: ClassSet,
    pub(crate) anchors: ClassSet,
    pub(crate) orphan: Option<ClassId>,
    pub(crate) hard_breaks: ClassSet,
    pub(crate) resync: Vec<(ClassSet, ClassSet)>,
    pub(crate) status: StatusRule,
}

impl RuleSet {
    /// Start a custom rule set. `class_names[id]` names class `id` in traces.
    pub fn builder(name: &'static str, class_names: &'static [&'static str], classifier: Classifier) -> RuleSetBuilder {
        RuleSetBuilder {
            set: RuleSet {
                name,
                class_names,
                classifier,
                rules: Vec::new(),
                ignorable: ClassSet::empty(),
                anchors: ClassSet::empty(),
                orphan: None,
                hard_breaks: ClassSet::empty(),
                resync: Vec::new(),
                status: StatusRule::Constant(0),
            },
        }
    }

    /// Extended grapheme clusters.
    pub fn grapheme() -> &'static RuleSet {
        &super::grapheme::RULES
    }

    /// Words, with letter/number/kana/ideograph status tags.
    pub fn word() -> &'static RuleSet {
        &super::word::RULES
    }

    pub fn sentence() -> &'static RuleSet {
        &super::sentence::RULES
    }

    /// Line-break opportunities; hard breaks carry a distinct status.
    pub fn line() -> &'static RuleSet {
        &super::line::RULES
    }

    /// Small pattern-defined word rules for ASCII text.
    pub fn ascii_word() -> &'static RuleSet {
        &super::ascii::RULES
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn classify(&self, ch: char) -> ClassId {
        self.classifier.classify(ch)
    }

    pub fn class_name(&self, id: ClassId) -> &'static str {
        self.class_names.get(id as usize).copied().unwrap_or("?")
    }

    /// First matching rule for the window; no match breaks.
    pub(crate) fn decide(&self, window: &Window<'_>) -> (Action, &'static str) {
        self.rules.iter().find(|r| r.applies(window)).map_or((Action::Break, "any"), |r| (r.action, r.name))
    }

    /// True if a boundary between raw classes `a` and `b` holds in every context.
    pub(crate) fn is_resync_pair(&self, a: ClassId, b: ClassId) -> bool {
        if self.hard_breaks.has(a) {
            return true;
        }
        if self.ignorable.has(b) && !self.anchors.has(a) {
            return false;
        }
        self.resync.iter().any(|(prev, next)| prev.has(a) && next.has(b))
    }
}

/// Assembles a [`RuleSet`].
#[derive(Debug)]
pub struct RuleSetBuilder {
    set: RuleSet,
}

impl RuleSetBuilder {
    pub fn rules(mut self, rules: Vec<Rule>) -> Self {
        self.set.rules = rules;
        self
    }

    /// Classes folded into the preceding character unless it is an anchor;
    /// an ignorable that starts a unit is treated as `orphan` (or itself).
    pub fn ignorable(mut self, ignorable: ClassSet, anchors: ClassSet, orphan: Option<ClassId>) -> Self {
        self.set.ignorable = ignorable;
        self.set.anchors = anchors;
        self.set.orphan = orphan;
        self
    }

    /// Classes after which a boundary is unconditional.
    pub fn hard_breaks(mut self, classes: ClassSet) -> Self {
        self.set.hard_breaks = classes;
        self
    }

    /// A pair of raw classes that always has a boundary between them.
    pub fn resync(mut self, prev: ClassSet, next: ClassSet) -> Self {
        self.set.resync.push((prev, next));
        self
    }

    pub fn status(mut self, status: StatusRule) -> Self {
        self.set.status = status;
        self
    }

    pub fn build(self) -> RuleSet {
        debug_assert!(
            self.set.ignorable.is_empty() || self.set.anchors.contains(self.set.hard_breaks),
            "hard-break classes must not absorb ignorables"
        );
        self.set
    }
}
