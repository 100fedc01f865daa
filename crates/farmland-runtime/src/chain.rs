//! Chain runtime
//!
//! Hosts the contracts and applies transactions one at a time. A call runs
//! against a copy of the state; only a successful call is committed, so a
//! failed transaction leaves state, height and event log untouched.

use tracing::{debug, info, warn};

use farmland_core::{
    Address, Amount, BlockHeight, Event, GenesisConfig, LedgerError, LedgerResult, Result, Role,
    SwapDirection, TxId,
};
use fls_token::{FlsToken, ReserveToken, TokenMetadata};
use liquidity_pool::{LiquidityPool, PoolState, SwapQuote};

use crate::call::Call;
use crate::event_log::EventLog;
use crate::receipt::Receipt;
use crate::state::State;
use crate::summary::LedgerSummary;

/// Leading byte of runtime-assigned contract addresses
const CONTRACT_ADDRESS_PREFIX: u8 = 0xc0;

/// Deployment order at genesis
const FLS_NONCE: u64 = 1;
const RESERVE_NONCE: u64 = 2;
const POOL_NONCE: u64 = 3;

/// Deterministic address of the `nonce`-th contract deployed
pub fn contract_address(nonce: u64) -> Address {
    let mut bytes = [0u8; 20];
    bytes[0] = CONTRACT_ADDRESS_PREFIX;
    bytes[12..].copy_from_slice(&nonce.to_be_bytes());
    Address::new(bytes)
}

#[derive(Debug, Clone)]
pub struct Chain {
    state: State,
    height: BlockHeight,
    log: EventLog,
}

impl Chain {
    /// Deploy FLS, the reserve token and the pool as described by `config`
    pub fn genesis(config: &GenesisConfig) -> Result<Self> {
        config.validate()?;

        let deployer = config.deployer;
        let mut events = Vec::new();

        let mut fls = FlsToken::deploy(
            contract_address(FLS_NONCE),
            deployer,
            TokenMetadata::new(config.token.name.clone(), config.token.symbol.clone()),
            &mut events,
        );
        let reserve = ReserveToken::deploy(
            contract_address(RESERVE_NONCE),
            deployer,
            TokenMetadata::new(config.reserve.name.clone(), config.reserve.symbol.clone()),
            &mut events,
        );
        let pool = LiquidityPool::deploy(
            contract_address(POOL_NONCE),
            deployer,
            reserve_address(&reserve),
            fls_address(&fls),
            config.pool.initial_rate,
            config.pool.rate_scale,
            &mut events,
        )?;

        if config.authorize_pool {
            fls.grant_role(deployer, &Role::MINTER, pool.address(), &mut events)?;
        }

        let mut log = EventLog::new();
        let event_count = events.len();
        log.append(0, &TxId::from_sequence(0), events);

        info!(
            fls = %fls_address(&fls),
            reserve = %reserve_address(&reserve),
            pool = %pool.address(),
            deployer = %deployer,
            events = event_count,
            "Genesis complete"
        );
        if !config.authorize_pool {
            warn!("Pool not granted MINTER at genesis; swaps will fail until it is");
        }

        Ok(Self {
            state: State { fls, reserve, pool },
            height: 0,
            log,
        })
    }

    /// Apply `call` on behalf of `caller`, committing only on success
    pub fn submit(&mut self, caller: Address, call: Call) -> LedgerResult<Receipt> {
        debug!(caller = %caller, call = call.name(), "Submitting transaction");

        if self.is_contract(&caller) {
            warn!(
                caller = %caller,
                call = call.name(),
                "Transaction rejected: contract accounts cannot originate transactions"
            );
            return Err(LedgerError::ContractCaller { account: caller });
        }

        let mut next = self.state.clone();
        let mut events = Vec::new();

        let swap = match next.apply(caller, &call, &mut events) {
            Ok(swap) => swap,
            Err(e) => {
                warn!(
                    caller = %caller,
                    call = call.name(),
                    code = e.error_code(),
                    "Transaction rejected: {}",
                    e
                );
                return Err(e);
            }
        };

        let height = self.height + 1;
        let tx_id = TxId::from_sequence(height);

        self.state = next;
        self.height = height;
        self.log.append(height, &tx_id, events.clone());

        info!(
            tx_id = %tx_id,
            height,
            call = call.name(),
            events = events.len(),
            "Transaction committed"
        );

        Ok(Receipt {
            tx_id,
            height,
            caller,
            call,
            events,
            swap,
        })
    }

    pub fn state(&self) -> &State {
        &self.state
    }

    pub fn fls(&self) -> &FlsToken {
        &self.state.fls
    }

    pub fn reserve(&self) -> &ReserveToken {
        &self.state.reserve
    }

    pub fn pool(&self) -> &LiquidityPool {
        &self.state.pool
    }

    pub fn height(&self) -> BlockHeight {
        self.height
    }

    pub fn events(&self) -> &EventLog {
        &self.log
    }

    /// Whether `account` is one of the deployed contracts
    pub fn is_contract(&self, account: &Address) -> bool {
        *account == fls_address(&self.state.fls)
            || *account == reserve_address(&self.state.reserve)
            || *account == self.state.pool.address()
    }

    /// Whether the pool currently holds `MINTER` on FLS
    pub fn pool_is_authorized(&self) -> bool {
        self.state.pool.is_authorized(&self.state.fls)
    }

    pub fn pool_state(&self) -> PoolState {
        self.state.pool.snapshot(&self.state.fls, &self.state.reserve)
    }

    pub fn quote(&self, direction: SwapDirection, amount: Amount) -> LedgerResult<SwapQuote> {
        self.state.pool.quote(direction, amount)
    }

    /// Summary of the live state
    pub fn summary(&self) -> LedgerSummary {
        LedgerSummary::from_state(&self.state)
    }

    /// Summary rebuilt from the event log
    pub fn replay(&self) -> LedgerSummary {
        self.log.replay()
    }

    /// Events of the transaction at `height` (genesis is 0)
    pub fn events_at(&self, height: BlockHeight) -> Vec<&Event> {
        self.log
            .records()
            .iter()
            .filter(|r| r.height == height)
            .map(|r| &r.event)
            .collect()
    }
}

fn fls_address(fls: &FlsToken) -> Address {
    fls_token::Fungible::address(fls)
}

fn reserve_address(reserve: &ReserveToken) -> Address {
    fls_token::Fungible::address(reserve)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::call::{FlsCall, PoolCall, ReserveCall};
    use crate::event_log::EventFilter;
    use farmland_core::constants::UNIT;
    use farmland_core::{Error, EventKind};
    use fls_token::Fungible;

    const DEPLOYER: Address = Address::new([
        0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1,
    ]);

    fn user() -> Address {
        Address::from_low_u64(2)
    }

    fn chain() -> Chain {
        Chain::genesis(&GenesisConfig::default()).unwrap()
    }

    fn pool_address(chain: &Chain) -> Address {
        chain.pool().address()
    }

    fn fund_user(chain: &mut Chain, amount: Amount) {
        let pool = pool_address(chain);
        chain
            .submit(DEPLOYER, Call::Reserve(ReserveCall::Mint { to: user(), amount }))
            .unwrap();
        chain
            .submit(
                user(),
                Call::Reserve(ReserveCall::Approve {
                    spender: pool,
                    amount,
                }),
            )
            .unwrap();
    }

    #[test]
    fn test_genesis() {
        let chain = chain();
        assert_eq!(chain.height(), 0);
        assert!(chain.pool_is_authorized());
        assert!(chain.fls().has_role(&Role::OWNER, &DEPLOYER));
        assert_eq!(chain.fls().symbol(), "FLS");
        assert_eq!(chain.reserve().metadata().symbol, "USDC");
        assert_eq!(
            chain.pool().get_pool_pair_addresses(),
            (contract_address(RESERVE_NONCE), contract_address(FLS_NONCE))
        );
        assert!(!chain.events().is_empty());
        assert!(chain.events().records().iter().all(|r| r.height == 0));
    }

    #[test]
    fn test_genesis_without_pool_authorization() {
        let config = GenesisConfig {
            authorize_pool: false,
            ..Default::default()
        };
        let mut chain = Chain::genesis(&config).unwrap();
        assert!(!chain.pool_is_authorized());

        fund_user(&mut chain, 100);
        let err = chain
            .submit(user(), Call::Pool(PoolCall::SwapReserveForFls { amount: 100 }))
            .unwrap_err();
        assert!(matches!(err, LedgerError::Unauthorized { .. }));
    }

    #[test]
    fn test_genesis_rejects_zero_rate() {
        let mut config = GenesisConfig::default();
        config.pool.initial_rate = 0;
        assert!(matches!(Chain::genesis(&config), Err(Error::Config(_))));
    }

    #[test]
    fn test_swap_reserve_for_fls_scenario() {
        let mut chain = chain();
        fund_user(&mut chain, 1000 * UNIT);

        let receipt = chain
            .submit(
                user(),
                Call::Pool(PoolCall::SwapReserveForFls { amount: 300 * UNIT }),
            )
            .unwrap();

        assert_eq!(receipt.height, 3);
        assert_eq!(receipt.swap.as_ref().map(|q| q.output), Some(300 * UNIT));
        assert_eq!(chain.fls().balance_of(&user()), 300 * UNIT);
        assert_eq!(chain.pool_state().custody, 300 * UNIT);
    }

    #[test]
    fn test_swap_fls_for_reserve_scenario() {
        let mut chain = chain();
        let pool = pool_address(&chain);
        chain
            .submit(
                DEPLOYER,
                Call::Fls(FlsCall::GrantRole {
                    role: Role::MINTER,
                    account: DEPLOYER,
                }),
            )
            .unwrap();
        chain
            .submit(DEPLOYER, Call::Fls(FlsCall::Mint { to: user(), amount: 900 * UNIT }))
            .unwrap();
        chain
            .submit(DEPLOYER, Call::Reserve(ReserveCall::Mint { to: pool, amount: 30_000 * UNIT }))
            .unwrap();

        chain
            .submit(
                user(),
                Call::Pool(PoolCall::SwapFlsForReserve { amount: 600 * UNIT }),
            )
            .unwrap();

        assert_eq!(chain.fls().balance_of(&user()), 300 * UNIT);
        assert_eq!(chain.reserve().balance_of(&user()), 600 * UNIT);
    }

    #[test]
    fn test_failed_transaction_changes_nothing() {
        let mut chain = chain();
        fund_user(&mut chain, 100);
        let state = chain.state().clone();
        let height = chain.height();
        let logged = chain.events().len();

        let err = chain
            .submit(user(), Call::Pool(PoolCall::SwapReserveForFls { amount: 101 }))
            .unwrap_err();
        assert!(matches!(err, LedgerError::InsufficientAllowance { .. }));

        let err = chain
            .submit(user(), Call::Pool(PoolCall::UpdateExchangeRate { rate: 4 }))
            .unwrap_err();
        assert!(matches!(err, LedgerError::Unauthorized { .. }));

        assert_eq!(chain.state(), &state);
        assert_eq!(chain.height(), height);
        assert_eq!(chain.events().len(), logged);
    }

    #[test]
    fn test_contracts_cannot_originate_transactions() {
        let mut chain = chain();
        let pool = pool_address(&chain);
        let fls = contract_address(FLS_NONCE);
        let reserve = contract_address(RESERVE_NONCE);
        let thief = Address::from_low_u64(66);
        chain
            .submit(DEPLOYER, Call::Reserve(ReserveCall::Mint { to: pool, amount: 30_000 }))
            .unwrap();

        let state = chain.state().clone();
        let height = chain.height();
        let logged = chain.events().len();

        let attempts = vec![
            (pool, Call::Reserve(ReserveCall::Transfer { to: thief, amount: 30_000 })),
            (pool, Call::Fls(FlsCall::Mint { to: thief, amount: 1_000_000 })),
            (
                pool,
                Call::Reserve(ReserveCall::Approve {
                    spender: pool,
                    amount: 500,
                }),
            ),
            (pool, Call::Pool(PoolCall::SwapReserveForFls { amount: 500 })),
            (fls, Call::Fls(FlsCall::Transfer { to: thief, amount: 1 })),
            (reserve, Call::Reserve(ReserveCall::Transfer { to: thief, amount: 1 })),
        ];
        for (caller, call) in attempts {
            assert!(chain.is_contract(&caller));
            let err = chain.submit(caller, call).unwrap_err();
            assert_eq!(err, LedgerError::ContractCaller { account: caller });
        }

        assert!(!chain.is_contract(&DEPLOYER));
        assert_eq!(chain.state(), &state);
        assert_eq!(chain.height(), height);
        assert_eq!(chain.events().len(), logged);
        assert_eq!(chain.reserve().balance_of(&thief), 0);
        assert_eq!(chain.fls().balance_of(&thief), 0);
        assert_eq!(chain.fls().balance_of(&pool), 0);
        assert_eq!(chain.pool_state().custody, 30_000);
    }

    #[test]
    fn test_tx_ids_follow_height() {
        let mut chain = chain();
        let receipt = chain
            .submit(DEPLOYER, Call::Pool(PoolCall::UpdateExchangeRate { rate: 4 }))
            .unwrap();
        assert_eq!(receipt.tx_id, TxId::from_sequence(1));
        assert_eq!(chain.events_at(1).len(), 1);
        assert_eq!(chain.pool().get_exchange_rate(), 4);
    }

    #[test]
    fn test_replay_matches_live_state() {
        let mut chain = chain();
        let pool = pool_address(&chain);
        fund_user(&mut chain, 5_000);

        let calls = vec![
            (user(), Call::Pool(PoolCall::SwapReserveForFls { amount: 1_200 })),
            (user(), Call::Pool(PoolCall::SwapFlsForReserve { amount: 200 })),
            (
                DEPLOYER,
                Call::Fls(FlsCall::GrantRole {
                    role: Role::PAUSER,
                    account: DEPLOYER,
                }),
            ),
            (DEPLOYER, Call::Fls(FlsCall::Pause)),
            // Rejected while paused
            (user(), Call::Fls(FlsCall::Transfer { to: DEPLOYER, amount: 1 })),
            (DEPLOYER, Call::Fls(FlsCall::Unpause)),
            (user(), Call::Fls(FlsCall::Transfer { to: DEPLOYER, amount: 150 })),
            (DEPLOYER, Call::Pool(PoolCall::UpdateExchangeRate { rate: 2 })),
            (DEPLOYER, Call::Pool(PoolCall::WithdrawReserve { amount: 300 })),
            (
                DEPLOYER,
                Call::Fls(FlsCall::RevokeRole {
                    role: Role::PAUSER,
                    account: DEPLOYER,
                }),
            ),
            (user(), Call::Pool(PoolCall::SwapFlsForReserve { amount: 850 })),
            (DEPLOYER, Call::Pool(PoolCall::TransferOwnership { new_owner: user() })),
            (user(), Call::Reserve(ReserveCall::Transfer { to: pool, amount: 7 })),
        ];
        for (caller, call) in calls {
            let _ = chain.submit(caller, call);
            assert_eq!(chain.replay(), chain.summary());
        }

        let summary = chain.summary();
        assert!(!summary.paused);
        assert_eq!(summary.rate, 2);
        assert_eq!(summary.pool_owner, user());
        assert!(!summary.roles.contains_key(&Role::PAUSER));
        assert_eq!(
            summary.fls.balances.values().sum::<Amount>(),
            summary.fls.total_supply
        );
    }

    #[test]
    fn test_swap_history_from_chain() {
        let mut chain = chain();
        fund_user(&mut chain, 1_000);
        chain
            .submit(user(), Call::Pool(PoolCall::SwapReserveForFls { amount: 400 }))
            .unwrap();
        chain
            .submit(user(), Call::Pool(PoolCall::SwapFlsForReserve { amount: 100 }))
            .unwrap();

        let history = chain.events().swap_history(&user(), None);
        assert_eq!(history.len(), 2);
        assert!(history.iter().all(|r| r.event.kind() == EventKind::SwapExecuted));

        let approvals = chain.events().query(&EventFilter {
            account: Some(user()),
            kinds: vec![EventKind::Approval],
            ..Default::default()
        });
        assert_eq!(approvals.len(), 1);
    }
}
