use crate::schema::PlayerOrder;

/// Sentinel player_number for lines not attributable to a specific player.
pub const SYSTEM_PLAYER: i64 = -1;

const ABANDON_PHRASE: &str = "chose to abandon";
const END_OF_GAME_PHRASE: &str = "end of the game";
const REMATCH_PHRASE: &str = "rematch";
const COLOR_PREAMBLE_PHRASE: &str = "colors of";
const TIMEOUT_PHRASE: &str = "out of time";

/// Classification of a single raw log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// A player gave up; the whole match must be discarded.
    Abandoned,
    /// End-of-game, rematch offer or color-assignment preamble.
    System,
    /// Attributed to the player at this index of the `PlayerOrder`.
    Player(usize),
    /// No special case applied and no player name matched.
    Unattributed,
}

/// The slice of the line that all per-line processing operates on: timeout
/// notices are cut after the phrase itself, everything else passes through.
pub fn effective_line(line: &str) -> &str {
    match line.find(TIMEOUT_PHRASE) {
        Some(at) => &line[..at + TIMEOUT_PHRASE.len()],
        None => line,
    }
}

/// Classify one line against the resolved player order. Precedence:
/// abandonment, system lines, then name attribution on the timeout-truncated
/// line. On a name collision the first name in `PlayerOrder` wins.
pub fn classify(line: &str, order: &PlayerOrder) -> LineKind {
    let lowered = line.to_lowercase();

    if lowered.contains(ABANDON_PHRASE) {
        return LineKind::Abandoned;
    }
    if lowered.contains(END_OF_GAME_PHRASE)
        || lowered.contains(REMATCH_PHRASE)
        || lowered.contains(COLOR_PREAMBLE_PHRASE)
    {
        return LineKind::System;
    }

    let scan = effective_line(line);
    let mut hit: Option<usize> = None;
    for (idx, name) in order.names().iter().enumerate() {
        if !scan.contains(name.as_str()) {
            continue;
        }
        match hit {
            None => hit = Some(idx),
            Some(first) => {
                tracing::warn!(first, also_matched = idx, "ambiguous name match; keeping first");
                break;
            }
        }
    }

    match hit {
        Some(idx) => LineKind::Player(idx),
        None => LineKind::Unattributed,
    }
}
