// SPDX-License-Identifier: MPL-2.0
//! Change tracking for values forwarded to the sphere engine.

/// Remembers the last value handed to the engine so a command is only
/// issued when that value changes.
///
/// Each tracker is independent: observing one never affects another.
#[derive(Debug, Clone, PartialEq)]
pub struct Watched<T> {
    last: Option<T>,
}

impl<T> Default for Watched<T> {
    fn default() -> Self {
        Self { last: None }
    }
}

impl<T: Clone + PartialEq> Watched<T> {
    /// Records `value`. Returns `true` on the first observation after a
    /// reset and whenever `value` differs from the previous one.
    pub fn changed(&mut self, value: &T) -> bool {
        if self.last.as_ref() == Some(value) {
            return false;
        }
        self.last = Some(value.clone());
        true
    }

    /// Forgets the last value; the next observation fires.
    pub fn reset(&mut self) {
        self.last = None;
    }

    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.last.as_ref()
    }
}

impl<T: Clone + PartialEq> Watched<Vec<T>> {
    /// Same as [`Watched::changed`] for a sequence produced by `items`.
    /// The sequence is only collected when it differs from the last one.
    pub fn changed_seq<'a, I>(&mut self, items: impl Fn() -> I) -> bool
    where
        I: Iterator<Item = &'a T>,
        T: 'a,
    {
        if self.last.as_ref().is_some_and(|last| last.iter().eq(items())) {
            return false;
        }
        self.last = Some(items().cloned().collect());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_observation_fires_even_for_none() {
        let mut watched: Watched<Option<u32>> = Watched::default();
        assert!(watched.changed(&None));
        assert!(!watched.changed(&None));
    }

    #[test]
    fn fires_only_on_change() {
        let mut watched = Watched::default();
        assert!(watched.changed(&Some(1)));
        assert!(!watched.changed(&Some(1)));
        assert!(watched.changed(&Some(2)));
        assert!(watched.changed(&None));
    }

    #[test]
    fn reset_makes_next_observation_fire() {
        let mut watched = Watched::default();
        watched.changed(&Some("a"));
        watched.reset();
        assert!(watched.last().is_none());
        assert!(watched.changed(&Some("a")));
    }

    #[test]
    fn sequence_fires_only_when_items_differ() {
        let source = vec![1, 2, 3];
        let mut watched: Watched<Vec<i32>> = Watched::default();

        assert!(watched.changed_seq(|| source.iter().filter(|n| **n > 1)));
        assert_eq!(watched.last(), Some(&vec![2, 3]));
        assert!(!watched.changed_seq(|| source.iter().filter(|n| **n > 1)));
        assert!(watched.changed_seq(|| source.iter()));
        assert!(watched.changed_seq(|| [].iter()));
        assert_eq!(watched.last(), Some(&Vec::new()));
    }

    #[test]
    fn trackers_are_independent() {
        let mut layer = Watched::default();
        let mut sphere = Watched::default();
        layer.changed(&Some("l1"));
        sphere.changed(&Some("s1"));

        assert!(layer.changed(&Some("l2")));
        assert!(!sphere.changed(&Some("s1")));
    }
}
