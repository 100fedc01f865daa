use serde::{Deserialize, Serialize};

use farmland_core::{Address, BlockHeight, Event, TxId};
use liquidity_pool::SwapQuote;

use crate::call::Call;

/// Outcome of a committed transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub tx_id: TxId,
    pub height: BlockHeight,
    pub caller: Address,
    pub call: Call,
    pub events: Vec<Event>,
    /// Executed swap, for pool swap calls
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swap: Option<SwapQuote>,
}
