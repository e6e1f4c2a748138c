/// Canonical rotation marker after anonymization.
pub const TURN_MARKER: &str = "player is now first player";

/// Running turn counter, seeded at 0. The marker line itself already belongs
/// to the new turn.
#[derive(Debug, Default)]
pub struct TurnCounter {
    turn: i64,
}

impl TurnCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, action_name: &str) -> i64 {
        if action_name == TURN_MARKER {
            self.turn += 1;
        }
        self.turn
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_starts_new_turn_on_itself() {
        let mut turns = TurnCounter::new();
        assert_eq!(turns.observe("player placed a worker"), 0);
        assert_eq!(turns.observe(TURN_MARKER), 1);
        assert_eq!(turns.observe("player gained i wood"), 1);
        assert_eq!(turns.observe(TURN_MARKER), 2);
    }

    #[test]
    fn test_counter_is_non_decreasing() {
        let mut turns = TurnCounter::new();
        let mut last = 0;
        for name in ["a", TURN_MARKER, "b", "c", TURN_MARKER, TURN_MARKER, "d"] {
            let turn = turns.observe(name);
            assert!(turn >= last);
            last = turn;
        }
        assert_eq!(last, 3);
    }
}
