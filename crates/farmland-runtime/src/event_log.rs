//! Event log
//!
//! Append-only record of every event the runtime committed, stamped with the
//! transaction and height that produced it. Supports filtered queries and a
//! full replay into a [`LedgerSummary`].

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use farmland_core::{Address, Amount, BlockHeight, Event, EventKind, SwapDirection, TxId};

use crate::summary::{LedgerSummary, TokenSummary};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Position in the log, from 0
    pub sequence: u64,
    pub height: BlockHeight,
    pub tx_id: TxId,
    pub event: Event,
}

/// Conjunctive filter; unset fields match everything
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventFilter {
    /// Only events this address takes part in
    #[serde(default)]
    pub account: Option<Address>,
    /// Only these kinds (empty = all)
    #[serde(default)]
    pub kinds: Vec<EventKind>,
    #[serde(default)]
    pub from_height: Option<BlockHeight>,
    /// Inclusive
    #[serde(default)]
    pub to_height: Option<BlockHeight>,
}

impl EventFilter {
    pub fn matches(&self, record: &EventRecord) -> bool {
        if let Some(from) = self.from_height {
            if record.height < from {
                return false;
            }
        }
        if let Some(to) = self.to_height {
            if record.height > to {
                return false;
            }
        }
        if !self.kinds.is_empty() && !self.kinds.contains(&record.event.kind()) {
            return false;
        }
        match &self.account {
            Some(account) => record.event.involves(account),
            None => true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    records: Vec<EventRecord>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, height: BlockHeight, tx_id: &TxId, events: Vec<Event>) {
        for event in events {
            let sequence = self.records.len() as u64;
            self.records.push(EventRecord {
                sequence,
                height,
                tx_id: tx_id.clone(),
                event,
            });
        }
    }

    pub fn records(&self) -> &[EventRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn query(&self, filter: &EventFilter) -> Vec<&EventRecord> {
        self.records.iter().filter(|r| filter.matches(r)).collect()
    }

    /// Swaps by `account` in both directions, oldest first
    pub fn swap_history(&self, account: &Address, from_height: Option<BlockHeight>) -> Vec<&EventRecord> {
        let filter = EventFilter {
            account: Some(*account),
            kinds: vec![EventKind::SwapExecuted],
            from_height,
            to_height: None,
        };
        self.query(&filter)
    }

    /// Rebuild the ledger summary from events alone
    pub fn replay(&self) -> LedgerSummary {
        let mut replay = Replay::default();
        for record in &self.records {
            replay.apply(&record.event);
        }
        replay.finish()
    }
}

/// Fold state for [`EventLog::replay`]
#[derive(Default)]
struct Replay {
    summary: LedgerSummary,
    tokens: BTreeMap<Address, TokenSummary>,
}

impl Replay {
    fn token(&mut self, address: Address) -> &mut TokenSummary {
        self.tokens.entry(address).or_insert_with(|| TokenSummary {
            address,
            ..TokenSummary::default()
        })
    }

    fn credit(&mut self, token: Address, account: Address, amount: Amount) {
        if amount == 0 {
            return;
        }
        let entry = self.token(token).balances.entry(account).or_insert(0);
        *entry = entry.saturating_add(amount);
    }

    fn debit(&mut self, token: Address, account: Address, amount: Amount) {
        let balances = &mut self.token(token).balances;
        if let Some(balance) = balances.get_mut(&account) {
            *balance = balance.saturating_sub(amount);
            if *balance == 0 {
                balances.remove(&account);
            }
        }
    }

    fn apply(&mut self, event: &Event) {
        match event {
            Event::TokenDeployed { token, .. } => {
                self.token(*token);
            }
            Event::PoolDeployed {
                pool,
                fls,
                reserve,
                owner,
                rate,
                rate_scale,
            } => {
                self.summary.pool = *pool;
                self.summary.fls.address = *fls;
                self.summary.reserve.address = *reserve;
                self.summary.pool_owner = *owner;
                self.summary.rate = *rate;
                self.summary.rate_scale = *rate_scale;
            }
            Event::RoleGranted { role, account, .. } => {
                self.summary
                    .roles
                    .entry(role.clone())
                    .or_default()
                    .insert(*account);
            }
            Event::RoleRevoked { role, account, .. } => {
                if let Some(members) = self.summary.roles.get_mut(role) {
                    members.remove(account);
                    if members.is_empty() {
                        self.summary.roles.remove(role);
                    }
                }
            }
            Event::Transfer {
                token,
                from,
                to,
                amount,
            } => {
                self.debit(*token, *from, *amount);
                self.credit(*token, *to, *amount);
            }
            Event::Minted {
                token, to, amount, ..
            } => {
                self.credit(*token, *to, *amount);
                let supply = &mut self.token(*token).total_supply;
                *supply = supply.saturating_add(*amount);
            }
            Event::Burned {
                token,
                from,
                amount,
                ..
            } => {
                self.debit(*token, *from, *amount);
                let supply = &mut self.token(*token).total_supply;
                *supply = supply.saturating_sub(*amount);
            }
            Event::Paused { .. } => self.summary.paused = true,
            Event::Unpaused { .. } => self.summary.paused = false,
            Event::ExchangeRateUpdated { rate, .. } => self.summary.rate = *rate,
            Event::OwnershipTransferred { new_owner, .. } => self.summary.pool_owner = *new_owner,
            // Balance effects already carried by Transfer/Minted/Burned
            Event::RoleAdminChanged { .. }
            | Event::Approval { .. }
            | Event::SwapExecuted { .. }
            | Event::ReserveDeposited { .. }
            | Event::ReserveWithdrawn { .. } => {}
        }
    }

    fn finish(mut self) -> LedgerSummary {
        let fls = self.summary.fls.address;
        let reserve = self.summary.reserve.address;
        if let Some(token) = self.tokens.remove(&fls) {
            self.summary.fls = token;
        }
        if let Some(token) = self.tokens.remove(&reserve) {
            self.summary.reserve = token;
        }
        self.summary
    }
}

/// Direction-tagged amounts of a swap record, if it is one
pub fn swap_legs(record: &EventRecord) -> Option<(SwapDirection, Amount, Amount)> {
    match &record.event {
        Event::SwapExecuted {
            direction,
            reserve_amount,
            fls_amount,
            ..
        } => Some((*direction, *reserve_amount, *fls_amount)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(n: u64) -> Address {
        Address::from_low_u64(n)
    }

    fn log() -> EventLog {
        let mut log = EventLog::new();
        let token = addr(100);
        log.append(
            0,
            &TxId::from_sequence(0),
            vec![Event::Minted {
                token,
                to: addr(1),
                amount: 50,
                operator: addr(1),
            }],
        );
        log.append(
            1,
            &TxId::from_sequence(1),
            vec![
                Event::Transfer {
                    token,
                    from: addr(1),
                    to: addr(2),
                    amount: 20,
                },
                Event::SwapExecuted {
                    pool: addr(200),
                    account: addr(2),
                    reserve_amount: 10,
                    fls_amount: 10,
                    direction: SwapDirection::ReserveToFls,
                },
            ],
        );
        log.append(
            2,
            &TxId::from_sequence(2),
            vec![Event::SwapExecuted {
                pool: addr(200),
                account: addr(2),
                reserve_amount: 5,
                fls_amount: 5,
                direction: SwapDirection::FlsToReserve,
            }],
        );
        log
    }

    #[test]
    fn test_sequence_and_tx_stamping() {
        let log = log();
        assert_eq!(log.len(), 4);
        let sequences: Vec<u64> = log.records().iter().map(|r| r.sequence).collect();
        assert_eq!(sequences, vec![0, 1, 2, 3]);
        assert_eq!(log.records()[2].tx_id, TxId::from_sequence(1));
    }

    #[test]
    fn test_query_by_account_kind_and_height() {
        let log = log();
        assert_eq!(
            log.query(&EventFilter {
                account: Some(addr(1)),
                ..Default::default()
            })
            .len(),
            2
        );
        assert_eq!(
            log.query(&EventFilter {
                kinds: vec![EventKind::Transfer, EventKind::Minted],
                ..Default::default()
            })
            .len(),
            2
        );
        assert_eq!(
            log.query(&EventFilter {
                from_height: Some(1),
                to_height: Some(1),
                ..Default::default()
            })
            .len(),
            2
        );
        assert!(log
            .query(&EventFilter {
                account: Some(addr(9)),
                ..Default::default()
            })
            .is_empty());
    }

    #[test]
    fn test_swap_history() {
        let log = log();
        let swaps = log.swap_history(&addr(2), None);
        assert_eq!(swaps.len(), 2);
        assert_eq!(
            swap_legs(swaps[1]),
            Some((SwapDirection::FlsToReserve, 5, 5))
        );
        assert_eq!(log.swap_history(&addr(2), Some(2)).len(), 1);
        assert!(log.swap_history(&addr(1), None).is_empty());
    }

    #[test]
    fn test_replay_drops_zeroed_balances() {
        let mut log = EventLog::new();
        let token = addr(100);
        log.append(
            0,
            &TxId::from_sequence(0),
            vec![
                Event::PoolDeployed {
                    pool: addr(200),
                    fls: token,
                    reserve: addr(101),
                    owner: addr(1),
                    rate: 1,
                    rate_scale: 1,
                },
                Event::Minted {
                    token,
                    to: addr(1),
                    amount: 10,
                    operator: addr(1),
                },
                Event::Burned {
                    token,
                    from: addr(1),
                    amount: 10,
                    operator: addr(1),
                },
            ],
        );
        let summary = log.replay();
        assert_eq!(summary.fls.address, token);
        assert_eq!(summary.fls.total_supply, 0);
        assert!(summary.fls.balances.is_empty());
        assert_eq!(summary.pool_owner, addr(1));
    }
}
