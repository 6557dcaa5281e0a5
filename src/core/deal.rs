//! Negotiated deals between two players.
//!
//! Deals are carried on `GameState` for visibility only. Round resolution
//! never reads them; their lifecycle belongs to `crate::tools`.

use serde::{Deserialize, Serialize};

use super::player::PlayerId;

/// Lifecycle of a deal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DealStatus {
    Proposed,
    Accepted,
    Rejected,
    Expired,
}

impl DealStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            DealStatus::Proposed => "proposed",
            DealStatus::Accepted => "accepted",
            DealStatus::Rejected => "rejected",
            DealStatus::Expired => "expired",
        }
    }

    /// Whether the deal can still be answered.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, DealStatus::Proposed)
    }
}

impl std::fmt::Display for DealStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An out-of-band agreement proposed by one player to another.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deal {
    pub deal_id: String,
    pub from_player: PlayerId,
    pub to_player: PlayerId,
    pub terms: String,
    pub created_round: u32,
    pub status: DealStatus,
}

impl Deal {
    /// A freshly proposed deal.
    #[must_use]
    pub fn proposed(
        deal_id: impl Into<String>,
        from_player: PlayerId,
        to_player: PlayerId,
        terms: impl Into<String>,
        created_round: u32,
    ) -> Self {
        Self {
            deal_id: deal_id.into(),
            from_player,
            to_player,
            terms: terms.into(),
            created_round,
            status: DealStatus::Proposed,
        }
    }

    /// Whether `player` is one of the two parties.
    #[must_use]
    pub fn involves(&self, player: &PlayerId) -> bool {
        &self.from_player == player || &self.to_player == player
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deal_wire_fields() {
        let deal = Deal::proposed("D1", PlayerId::seat(1), PlayerId::seat(3), "share vault", 2);
        let json = serde_json::to_value(&deal).unwrap();

        assert_eq!(json["deal_id"], "D1");
        assert_eq!(json["from_player"], "P1");
        assert_eq!(json["to_player"], "P3");
        assert_eq!(json["terms"], "share vault");
        assert_eq!(json["created_round"], 2);
        assert_eq!(json["status"], "proposed");
    }

    #[test]
    fn test_involves() {
        let deal = Deal::proposed("D1", PlayerId::seat(1), PlayerId::seat(2), "truce", 0);
        assert!(deal.involves(&PlayerId::seat(1)));
        assert!(deal.involves(&PlayerId::seat(2)));
        assert!(!deal.involves(&PlayerId::seat(4)));
    }

    #[test]
    fn test_only_proposed_is_open() {
        assert!(DealStatus::Proposed.is_open());
        assert!(!DealStatus::Accepted.is_open());
        assert!(!DealStatus::Rejected.is_open());
        assert!(!DealStatus::Expired.is_open());
    }
}
