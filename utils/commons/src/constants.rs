//! Event tags start below the range CIS-2 reserves for its standard events.

/// Tag for the ItemListed event.
pub const ITEM_LISTED_TAG: u8 = u8::MAX - 5;

/// Tag for the ItemCanceled event.
pub const ITEM_CANCELED_TAG: u8 = u8::MAX - 6;

/// Tag for the ItemBought event.
pub const ITEM_BOUGHT_TAG: u8 = u8::MAX - 7;

/// Tag for the ProceedsWithdrawn event.
pub const PROCEEDS_WITHDRAWN_TAG: u8 = u8::MAX - 8;

/// Entrypoints of the CIS-2 token registry used by the marketplace.
pub const BALANCE_OF: &str = "balanceOf";
pub const OPERATOR_OF: &str = "operatorOf";
pub const TRANSFER: &str = "transfer";
