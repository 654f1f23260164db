//! Aggregates independent reasons for a control to be disabled.
//!
//! Rather than toggling a control directly, callers add and remove named
//! causes. The control is disabled while at least one cause is present, so
//! two unrelated reasons (say, an empty input and a request in flight) can
//! hold it disabled at once and it only re-enables once both are cleared.

use std::collections::HashSet;
use std::hash::Hash;

/// Something with a settable disabled flag.
pub trait Disableable {
    fn set_disabled(&mut self, disabled: bool);
    fn is_disabled(&self) -> bool;
}

/// Plain boolean target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Toggle {
    disabled: bool,
}

impl Toggle {
    pub fn new(disabled: bool) -> Self {
        Self { disabled }
    }
}

impl Disableable for Toggle {
    fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    fn is_disabled(&self) -> bool {
        self.disabled
    }
}

/// Owns one [`Disableable`] target and the set of causes disabling it.
///
/// Every mutation re-applies `target.set_disabled(!causes.is_empty())`,
/// including mutations that leave the set unchanged.
#[derive(Debug)]
pub struct DisableAggregator<C, T> {
    causes: HashSet<C>,
    target: T,
}

impl<C, T> DisableAggregator<C, T>
where
    C: Eq + Hash,
    T: Disableable,
{
    /// Wrap `target`, immediately enabling it since no causes exist yet.
    pub fn new(target: T) -> Self {
        let mut aggregator = Self {
            causes: HashSet::new(),
            target,
        };
        aggregator.apply();
        aggregator
    }

    /// Add a reason to disable. Adding a cause twice has no extra effect.
    pub fn add_cause(&mut self, cause: C) {
        self.causes.insert(cause);
        self.apply();
    }

    /// Remove a reason to disable. Removing an absent cause has no effect.
    pub fn remove_cause(&mut self, cause: &C) {
        self.causes.remove(cause);
        self.apply();
    }

    /// Add `cause` when `active`, otherwise remove it.
    pub fn set_cause(&mut self, cause: C, active: bool) {
        if active {
            self.add_cause(cause);
        } else {
            self.remove_cause(&cause);
        }
    }

    pub fn clear_causes(&mut self) {
        self.causes.clear();
        self.apply();
    }

    pub fn has_cause(&self, cause: &C) -> bool {
        self.causes.contains(cause)
    }

    /// Current causes, in no particular order.
    pub fn causes(&self) -> impl Iterator<Item = &C> {
        self.causes.iter()
    }

    /// True while at least one cause is present. Does not consult the target.
    pub fn is_disabled(&self) -> bool {
        !self.causes.is_empty()
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    fn apply(&mut self) {
        let disabled = self.is_disabled();
        self.target.set_disabled(disabled);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct CountingTarget {
        disabled: bool,
        writes: usize,
    }

    impl Disableable for CountingTarget {
        fn set_disabled(&mut self, disabled: bool) {
            self.disabled = disabled;
            self.writes += 1;
        }

        fn is_disabled(&self) -> bool {
            self.disabled
        }
    }

    #[test]
    fn new_enables_a_disabled_target() {
        let aggregator: DisableAggregator<&str, _> = DisableAggregator::new(Toggle::new(true));
        assert!(!aggregator.is_disabled());
        assert!(!aggregator.target().is_disabled());
    }

    #[test]
    fn stays_disabled_until_every_cause_is_removed() {
        let mut aggregator = DisableAggregator::new(Toggle::default());

        aggregator.add_cause("x");
        aggregator.add_cause("y");
        aggregator.remove_cause(&"x");
        assert!(aggregator.is_disabled());
        assert!(aggregator.target().is_disabled());

        aggregator.remove_cause(&"y");
        assert!(!aggregator.is_disabled());
        assert!(!aggregator.target().is_disabled());
    }

    #[test]
    fn re_adding_a_cause_needs_one_removal() {
        let mut aggregator = DisableAggregator::new(Toggle::default());

        aggregator.add_cause(1);
        aggregator.add_cause(1);
        aggregator.remove_cause(&1);

        assert!(!aggregator.target().is_disabled());
    }

    #[test]
    fn removing_absent_cause_still_reapplies_flag() {
        let mut aggregator: DisableAggregator<u8, _> =
            DisableAggregator::new(CountingTarget::default());
        assert_eq!(aggregator.target().writes, 1);

        // Something else flipped the target behind the aggregator's back.
        aggregator.target_mut().disabled = true;
        aggregator.remove_cause(&7);

        assert_eq!(aggregator.target().writes, 2);
        assert!(!aggregator.target().is_disabled());
    }

    #[test]
    fn set_cause_follows_condition() {
        let mut aggregator = DisableAggregator::new(Toggle::default());

        aggregator.set_cause("empty", true);
        assert!(aggregator.has_cause(&"empty"));
        assert!(aggregator.target().is_disabled());

        aggregator.set_cause("empty", false);
        assert!(!aggregator.has_cause(&"empty"));
        assert!(!aggregator.target().is_disabled());
    }

    #[test]
    fn clear_causes_enables() {
        let mut aggregator = DisableAggregator::new(Toggle::default());
        aggregator.add_cause("a");
        aggregator.add_cause("b");

        aggregator.clear_causes();

        assert_eq!(aggregator.causes().count(), 0);
        assert!(!aggregator.target().is_disabled());
    }
}
