//! A marketplace for NFTs held in CIS-2 token contracts.
//!
//! # Description
//! A seller lists a token at a fixed price after making this contract an
//! operator in the token's contract. The token never leaves the seller until
//! somebody buys it: the purchase moves the token straight from the seller to
//! the buyer and credits the listed price to the seller's proceeds, which the
//! seller withdraws later with `withdrawProceeds`.
//!
//! All bookkeeping is done before the contract calls out to a token contract
//! or transfers CCD, so a call that re-enters the marketplace always observes
//! the updated listings and proceeds.
#![cfg_attr(not(feature = "std"), no_std)]
use crate::{events::*, external::*, helper::*, state::*};
use commons::*;
use concordium_std::*;

mod contract;
mod events;
mod external;
mod helper;
mod state;
