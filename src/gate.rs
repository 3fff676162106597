//! Unlock gating and overall progress.

use serde::Serialize;

use crate::level::{Level, completed_levels};

/// Level 0 is always open; any other level opens once its immediate predecessor
/// is complete. Earlier levels are not consulted.
pub fn is_level_unlocked(index: usize, levels: &[Level]) -> bool {
    if index == 0 {
        return true;
    }
    levels.get(index - 1).is_some_and(|prev| prev.status)
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct OverallProgress {
    pub completed: usize,
    pub total: usize,
    pub percentage: u32,
}

impl OverallProgress {
    /// Whether the "adventure complete" celebration should be on screen.
    pub fn should_celebrate(&self) -> bool {
        self.percentage == 100
    }
}

pub fn overall_progress(levels: &[Level]) -> OverallProgress {
    let completed = completed_levels(levels);
    let total = levels.len();
    let percentage = if total == 0 {
        0
    } else {
        (completed as f64 / total as f64 * 100.0).round() as u32
    };
    OverallProgress {
        completed,
        total,
        percentage,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goal::TaskType;

    fn levels(statuses: &[bool]) -> Vec<Level> {
        statuses
            .iter()
            .enumerate()
            .map(|(i, s)| Level {
                source_type: TaskType::Daily,
                source_index: i,
                status: *s,
                tasks: Vec::new(),
            })
            .collect()
    }

    #[test]
    fn test_first_level_always_unlocked() {
        assert!(is_level_unlocked(0, &[]));
        assert!(is_level_unlocked(0, &levels(&[false, false])));
    }

    #[test]
    fn test_single_predecessor_gate() {
        let lv = levels(&[true, false, true]);
        assert!(is_level_unlocked(1, &lv));
        assert!(!is_level_unlocked(2, &lv));
        // Predecessor complete unlocks even with an incomplete level further back.
        let lv = levels(&[false, true, false]);
        assert!(is_level_unlocked(2, &lv));
    }

    #[test]
    fn test_unlock_out_of_range() {
        let lv = levels(&[true]);
        assert!(is_level_unlocked(1, &lv));
        assert!(!is_level_unlocked(2, &lv));
    }

    #[test]
    fn test_overall_progress() {
        assert_eq!(overall_progress(&[]), OverallProgress::default());
        let full = overall_progress(&levels(&[true, true]));
        assert_eq!(
            full,
            OverallProgress { completed: 2, total: 2, percentage: 100 }
        );
        assert!(full.should_celebrate());
        let third = overall_progress(&levels(&[true, false, false]));
        assert_eq!(third.percentage, 33);
        assert!(!third.should_celebrate());
        assert_eq!(overall_progress(&levels(&[true, true, false])).percentage, 67);
    }
}
