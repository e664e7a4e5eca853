//! Rank resolution against a precomputed rank list.

use serde::{Serialize, Serializer};

use crate::snapshot::RankedList;

/// A player's position within an eligible rank list. `NotApplicable` is the
/// ordinary outcome for players below the mode's participation threshold,
/// not an error. A rank is always ≥ 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rank {
    Ranked(u32),
    NotApplicable,
}

impl Rank {
    pub fn is_ranked(&self) -> bool {
        matches!(self, Rank::Ranked(_))
    }

    pub fn position(&self) -> Option<u32> {
        match self {
            Rank::Ranked(n) => Some(*n),
            Rank::NotApplicable => None,
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Rank::Ranked(n) => write!(f, "{n}"),
            Rank::NotApplicable => write!(f, "N/A"),
        }
    }
}

impl Serialize for Rank {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Rank::Ranked(n) => serializer.serialize_u32(*n),
            Rank::NotApplicable => serializer.serialize_none(),
        }
    }
}

/// Find a player's rank in a sorted eligible list. The identity matches the
/// display name exactly, or the stable ID case-insensitively.
pub fn resolve_rank(identity: &str, list: &RankedList) -> Rank {
    match list
        .entries
        .iter()
        .position(|e| e.player_name == identity || e.player_id.eq_ignore_ascii_case(identity))
    {
        Some(index) => Rank::Ranked(index as u32 + 1),
        None => Rank::NotApplicable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::RankedEntry;

    fn list(entries: &[(&str, &str)]) -> RankedList {
        RankedList {
            entries: entries
                .iter()
                .map(|(id, name)| RankedEntry {
                    player_id: id.to_string(),
                    player_name: name.to_string(),
                    accuracy: 0.5,
                    games_played: 10,
                })
                .collect(),
        }
    }

    #[test]
    fn test_rank_is_index_plus_one() {
        let list = list(&[("a1", "Alice"), ("b2", "Bob"), ("c3", "Cara")]);
        assert_eq!(resolve_rank("Alice", &list), Rank::Ranked(1));
        assert_eq!(resolve_rank("Cara", &list), Rank::Ranked(3));
    }

    #[test]
    fn test_absent_player_is_not_applicable_never_zero() {
        let list = list(&[("a1", "Alice")]);
        let rank = resolve_rank("Zed", &list);
        assert_eq!(rank, Rank::NotApplicable);
        assert_eq!(rank.position(), None);
    }

    #[test]
    fn test_id_match_is_case_insensitive() {
        let list = list(&[("a1", "Alice"), ("B2", "Bob")]);
        assert_eq!(resolve_rank("b2", &list), Rank::Ranked(2));
        assert_eq!(resolve_rank("A1", &list), Rank::Ranked(1));
        // Name matching stays exact.
        assert_eq!(resolve_rank("alice", &list), Rank::NotApplicable);
    }

    #[test]
    fn test_empty_list() {
        let list = RankedList::default();
        assert_eq!(resolve_rank("Alice", &list), Rank::NotApplicable);
    }

    #[test]
    fn test_rank_display_and_serialize() {
        assert_eq!(Rank::Ranked(4).to_string(), "4");
        assert_eq!(Rank::NotApplicable.to_string(), "N/A");
        assert_eq!(serde_json::to_string(&Rank::Ranked(4)).unwrap(), "4");
        assert_eq!(serde_json::to_string(&Rank::NotApplicable).unwrap(), "null");
    }
}
