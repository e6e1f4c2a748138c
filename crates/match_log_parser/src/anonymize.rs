use regex::Regex;
use std::sync::OnceLock;

use crate::schema::PlayerOrder;

/// Token substituted for every player display name.
pub const PLAYER_TOKEN: &str = "player";

/// Mask character substituted for every digit, one-for-one.
pub const DIGIT_MASK: char = 'i';

fn digit_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[0-9]+").unwrap())
}

/// Integer value of the first maximal digit run in the line, or -1 when the
/// line carries no digits (or the run overflows i64).
pub fn extract_value(line: &str) -> i64 {
    digit_run()
        .find(line)
        .and_then(|m| m.as_str().parse::<i64>().ok())
        .unwrap_or(-1)
}

/// Replace every occurrence of every player name with the generic token,
/// then mask each digit character. Name substitution runs in `PlayerOrder`
/// order over the already-substituted string, so a name that is a substring
/// of a later name is an accepted limitation. Value extraction must happen
/// before this.
pub fn anonymize(line: &str, order: &PlayerOrder) -> String {
    let mut out = line.to_string();
    for name in order.names() {
        out = out.replace(name.as_str(), PLAYER_TOKEN);
    }
    out.chars()
        .map(|c| if c.is_ascii_digit() { DIGIT_MASK } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order() -> PlayerOrder {
        let log = vec![
            "Alice is now first player".to_string(),
            "Bob is now first player".to_string(),
        ];
        PlayerOrder::resolve(1, &log).unwrap()
    }

    #[test]
    fn test_extract_first_digit_run() {
        assert_eq!(extract_value("Alice scored 12 points, now 34 total"), 12);
        assert_eq!(extract_value("no digits here"), -1);
        assert_eq!(extract_value("007 licensed"), 7);
    }

    #[test]
    fn test_anonymize_names_and_digits() {
        assert_eq!(
            anonymize("Alice scored 12 points, now 34 total", &order()),
            "player scored ii points, now ii total"
        );
    }

    #[test]
    fn test_masking_preserves_length() {
        let line = "Bob gained 2 wood and 10 food";
        assert_eq!(
            anonymize(line, &order()).chars().count(),
            line.replace("Bob", PLAYER_TOKEN).chars().count()
        );
    }

    #[test]
    fn test_all_names_absent_after_anonymize() {
        let order = order();
        let out = anonymize("Alice traded with Bob", &order);
        for name in order.names() {
            assert!(!out.contains(name.as_str()));
        }
        assert_eq!(out, "player traded with player");
    }
}
