//! Running vote counts of the current poll.

use std::collections::BTreeMap;

use super::value_object::OptionId;

/// Mapping from option id to vote count.
///
/// Only ids the tally was created with can be counted, so an out-of-range
/// answer can never introduce a new key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally(BTreeMap<OptionId, u32>);

impl Tally {
    /// Create a tally with every given option at zero.
    pub fn zeroed(option_ids: impl IntoIterator<Item = OptionId>) -> Self {
        Self(option_ids.into_iter().map(|id| (id, 0)).collect())
    }

    /// Add one vote. Returns `false` if the option is not part of the tally.
    pub fn increment(&mut self, option_id: OptionId) -> bool {
        match self.0.get_mut(&option_id) {
            Some(count) => {
                *count += 1;
                true
            }
            None => false,
        }
    }

    pub fn count(&self, option_id: OptionId) -> Option<u32> {
        self.0.get(&option_id).copied()
    }

    /// Sum of all votes.
    pub fn total(&self) -> u32 {
        self.0.values().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (OptionId, u32)> + '_ {
        self.0.iter().map(|(id, count)| (*id, *count))
    }
}
