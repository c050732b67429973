//! Daily illumination window

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Hours of the day during which illumination is permitted
///
/// Both bounds are exclusive. A window whose start is later than its
/// end wraps past midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimeWindow {
    pub start_hour: u8,
    pub end_hour: u8,
}

impl TimeWindow {
    /// Create a window from 24-hour bounds
    pub const fn new(start_hour: u8, end_hour: u8) -> Self {
        Self {
            start_hour,
            end_hour,
        }
    }

    /// Check if the window crosses midnight
    pub fn wraps(&self) -> bool {
        self.start_hour > self.end_hour
    }

    /// Check if a 24-hour clock hour falls inside the window
    pub fn contains(&self, hour: u8) -> bool {
        if self.wraps() {
            hour > self.start_hour || hour < self.end_hour
        } else {
            hour > self.start_hour && hour < self.end_hour
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_evening_window() {
        let w = TimeWindow::new(20, 22);
        assert!(!w.wraps());
        assert!(!w.contains(19));
        assert!(!w.contains(20));
        assert!(w.contains(21));
        assert!(!w.contains(22));
    }

    #[test]
    fn test_overnight_window() {
        let w = TimeWindow::new(22, 2);
        assert!(w.wraps());
        assert!(w.contains(23));
        assert!(w.contains(0));
        assert!(w.contains(1));
        assert!(!w.contains(2));
        assert!(!w.contains(3));
        assert!(!w.contains(22));
    }

    #[test]
    fn test_empty_window() {
        let w = TimeWindow::new(8, 8);
        assert!((0..24).all(|h| !w.contains(h)));
    }

    proptest! {
        #[test]
        fn prop_wrapping_is_complement_of_reverse(start in 0u8..24, end in 0u8..24, hour in 0u8..24) {
            prop_assume!(start > end);
            let forward = TimeWindow::new(start, end);
            let reverse = TimeWindow::new(end, start);
            let on_bound = hour == start || hour == end;
            if !on_bound {
                prop_assert_eq!(forward.contains(hour), !reverse.contains(hour));
            } else {
                prop_assert!(!forward.contains(hour));
            }
        }
    }
}
