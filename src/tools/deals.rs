//! Deal lifecycle.
//!
//! Each operation takes a state and returns a new one with
//! `active_deals` updated. Nothing else on the state changes.

use crate::core::{Deal, DealStatus, GameState, PlayerId};
use crate::error::DealError;

/// Propose a deal from `from` to `to`.
///
/// Deal ids are `D1`, `D2`, ... in proposal order, so replays produce the
/// same ids.
pub fn propose_deal(
    state: &GameState,
    from: &PlayerId,
    to: &PlayerId,
    terms: &str,
) -> Result<(GameState, Deal), DealError> {
    for id in [from, to] {
        if state.player(id).is_none() {
            return Err(DealError::UnknownPlayer(id.clone()));
        }
    }
    if from == to {
        return Err(DealError::SelfDeal(from.clone()));
    }
    let terms = terms.trim();
    if terms.is_empty() {
        return Err(DealError::BlankTerms);
    }

    let deal_id = format!("D{}", state.active_deals.len() + 1);
    let deal = Deal::proposed(deal_id, from.clone(), to.clone(), terms, state.round);

    let mut next = state.clone();
    next.active_deals.push_back(deal.clone());
    tracing::debug!(deal = %deal.deal_id, from = %from, to = %to, "deal proposed");
    Ok((next, deal))
}

/// Accept or reject a proposed deal. Only its recipient may answer.
pub fn respond_to_deal(
    state: &GameState,
    responder: &PlayerId,
    deal_id: &str,
    accept: bool,
) -> Result<(GameState, Deal), DealError> {
    let index = state
        .active_deals
        .iter()
        .position(|d| d.deal_id == deal_id)
        .ok_or_else(|| DealError::UnknownDeal(deal_id.to_string()))?;
    let deal = &state.active_deals[index];

    if &deal.to_player != responder {
        return Err(DealError::NotRecipient {
            deal_id: deal_id.to_string(),
            recipient: deal.to_player.clone(),
            responder: responder.clone(),
        });
    }
    if !deal.status.is_open() {
        return Err(DealError::NotOpen {
            deal_id: deal_id.to_string(),
            status: deal.status,
        });
    }

    let mut updated = deal.clone();
    updated.status = if accept {
        DealStatus::Accepted
    } else {
        DealStatus::Rejected
    };

    let mut next = state.clone();
    next.active_deals.set(index, updated.clone());
    tracing::debug!(deal = %deal_id, status = %updated.status, "deal answered");
    Ok((next, updated))
}

/// Expire proposed deals that have gone unanswered for `ttl_rounds` rounds.
///
/// Returns the new state and the number of deals expired.
#[must_use]
pub fn expire_deals(state: &GameState, ttl_rounds: u32) -> (GameState, usize) {
    let mut next = state.clone();
    let mut expired = 0;
    for deal in next.active_deals.iter_mut() {
        if deal.status.is_open() && state.round.saturating_sub(deal.created_round) >= ttl_rounds {
            deal.status = DealStatus::Expired;
            expired += 1;
        }
    }
    if expired > 0 {
        tracing::debug!(expired, round = state.round, "deals expired");
    }
    (next, expired)
}

/// Deals involving `player`, in proposal order.
pub fn deals_for<'a>(state: &'a GameState, player: &'a PlayerId) -> impl Iterator<Item = &'a Deal> {
    state.active_deals.iter().filter(move |d| d.involves(player))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::generate;

    fn p(n: usize) -> PlayerId {
        PlayerId::seat(n)
    }

    #[test]
    fn test_propose_assigns_sequential_ids() {
        let state = generate("deals", 10).unwrap();
        let (state, first) = propose_deal(&state, &p(1), &p(2), "no steals").unwrap();
        let (state, second) = propose_deal(&state, &p(3), &p(1), "share scanner").unwrap();

        assert_eq!(first.deal_id, "D1");
        assert_eq!(second.deal_id, "D2");
        assert_eq!(second.status, DealStatus::Proposed);
        assert_eq!(state.active_deals.len(), 2);
        assert_eq!(deals_for(&state, &p(1)).count(), 2);
        assert_eq!(deals_for(&state, &p(4)).count(), 0);
    }

    #[test]
    fn test_propose_leaves_input_untouched() {
        let state = generate("deals", 10).unwrap();
        let (next, _) = propose_deal(&state, &p(1), &p(2), "truce").unwrap();

        assert!(state.active_deals.is_empty());
        assert_eq!(next.board, state.board);
        assert_eq!(next.players, state.players);
    }

    #[test]
    fn test_propose_errors() {
        let state = generate("deals", 10).unwrap();
        assert_eq!(
            propose_deal(&state, &p(1), &p(9), "x").unwrap_err(),
            DealError::UnknownPlayer(p(9))
        );
        assert_eq!(
            propose_deal(&state, &p(2), &p(2), "x").unwrap_err(),
            DealError::SelfDeal(p(2))
        );
        assert_eq!(
            propose_deal(&state, &p(1), &p(2), "  ").unwrap_err(),
            DealError::BlankTerms
        );
    }

    #[test]
    fn test_respond() {
        let state = generate("deals", 10).unwrap();
        let (state, deal) = propose_deal(&state, &p(1), &p(2), "truce").unwrap();

        assert!(matches!(
            respond_to_deal(&state, &p(3), &deal.deal_id, true),
            Err(DealError::NotRecipient { .. })
        ));
        assert_eq!(
            respond_to_deal(&state, &p(2), "D7", true).unwrap_err(),
            DealError::UnknownDeal("D7".into())
        );

        let (state, accepted) = respond_to_deal(&state, &p(2), &deal.deal_id, true).unwrap();
        assert_eq!(accepted.status, DealStatus::Accepted);
        assert_eq!(state.active_deals[0].status, DealStatus::Accepted);

        assert_eq!(
            respond_to_deal(&state, &p(2), &deal.deal_id, false).unwrap_err(),
            DealError::NotOpen {
                deal_id: "D1".into(),
                status: DealStatus::Accepted
            }
        );
    }

    #[test]
    fn test_expire() {
        let mut state = generate("deals", 10).unwrap();
        let (next, _) = propose_deal(&state, &p(1), &p(2), "early").unwrap();
        state = next;
        state.round = 3;
        let (next, _) = propose_deal(&state, &p(3), &p(4), "late").unwrap();
        state = next;
        let (next, _) = respond_to_deal(&state, &p(4), "D2", false).unwrap();
        state = next;

        let (expired_state, expired) = expire_deals(&state, 3);
        assert_eq!(expired, 1);
        assert_eq!(expired_state.active_deals[0].status, DealStatus::Expired);
        assert_eq!(expired_state.active_deals[1].status, DealStatus::Rejected);

        let (_, none) = expire_deals(&state, 4);
        assert_eq!(none, 0);
    }
}
