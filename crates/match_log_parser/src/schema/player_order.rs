use crate::error::NormalizeError;

/// Substring that marks a first-player rotation line.
pub const FIRST_PLAYER_MARKER: &str = "is now first player";

/// The platform seats at most four players per table.
const MAX_SEATS: usize = 4;

/// Ordered list of distinct player display names for one match, fixed once
/// resolved. Order is first-player rotation order as it appears in the log;
/// first occurrence wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerOrder(Vec<String>);

impl PlayerOrder {
    pub fn resolve(game_id: i64, lines: &[String]) -> Result<Self, NormalizeError> {
        let mut names: Vec<String> = Vec::new();

        for line in lines {
            if names.len() == MAX_SEATS {
                break;
            }
            if !line.contains(FIRST_PLAYER_MARKER) {
                continue;
            }
            let Some(end) = line.find(" is") else {
                continue;
            };
            let name = &line[..end];
            if !name.is_empty() && !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }

        if names.is_empty() {
            return Err(NormalizeError::unattributable(game_id));
        }
        Ok(PlayerOrder(names))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.0.iter().position(|n| n == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_resolve_first_seen_order() {
        let log = lines(&[
            "The colors of Bob, Alice have been assigned",
            "Bob is now first player",
            "Bob gained 2 wood",
            "Alice is now first player",
            "Bob is now first player",
        ]);
        let order = PlayerOrder::resolve(7, &log).unwrap();
        assert_eq!(order.names(), &["Bob".to_string(), "Alice".to_string()]);
        assert_eq!(order.index_of("Alice"), Some(1));
        assert_eq!(order.index_of("Carol"), None);
    }

    #[test]
    fn test_resolve_caps_at_four_seats() {
        let log = lines(&[
            "A is now first player",
            "B is now first player",
            "C is now first player",
            "D is now first player",
            "E is now first player",
        ]);
        let order = PlayerOrder::resolve(7, &log).unwrap();
        assert_eq!(order.len(), 4);
        assert_eq!(order.index_of("E"), None);
    }

    #[test]
    fn test_resolve_without_markers_is_unattributable() {
        let log = lines(&["Alice gained 2 wood", "End of the game"]);
        assert_eq!(
            PlayerOrder::resolve(42, &log),
            Err(NormalizeError::unattributable(42))
        );
    }
}
