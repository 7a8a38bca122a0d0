use std::collections::BTreeMap;

use crate::constants::{DIFFICULTY_TABLE, INITIAL_FRAME_DELAY_MS};

/// Score -> frame delay table. A delay only changes when the score lands
/// exactly on a key; scores between keys keep whatever was set last.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DifficultySchedule {
    initial_delay: u64,
    thresholds: BTreeMap<u32, u64>,
}

impl DifficultySchedule {
    pub fn new(initial_delay: u64, thresholds: impl IntoIterator<Item = (u32, u64)>) -> Self {
        DifficultySchedule { initial_delay, thresholds: thresholds.into_iter().collect() }
    }

    pub fn initial_delay(&self) -> u64 {
        self.initial_delay
    }

    pub fn delay_for(&self, score: u32) -> Option<u64> {
        self.thresholds.get(&score).copied()
    }
}

impl Default for DifficultySchedule {
    fn default() -> Self {
        DifficultySchedule::new(INITIAL_FRAME_DELAY_MS, DIFFICULTY_TABLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_keys_only() {
        let schedule = DifficultySchedule::default();
        assert_eq!(schedule.initial_delay(), 23);
        assert_eq!(schedule.delay_for(1), Some(23));
        assert_eq!(schedule.delay_for(20), Some(22));
        assert_eq!(schedule.delay_for(21), None);
        assert_eq!(schedule.delay_for(49), None);
        assert_eq!(schedule.delay_for(250), Some(15));
        assert_eq!(schedule.delay_for(1000), None);
    }

    #[test]
    fn custom_table() {
        let schedule = DifficultySchedule::new(40, [(2, 30), (4, 10)]);
        assert_eq!(schedule.initial_delay(), 40);
        assert_eq!(schedule.delay_for(2), Some(30));
        assert_eq!(schedule.delay_for(3), None);
        assert_eq!(schedule.delay_for(4), Some(10));
    }
}
