use super::*;

/// An active offer to sell a token.
#[derive(Debug, Serialize, SchemaType, Clone, Copy, PartialEq, Eq)]
pub struct Listing {
    /// Account that listed the token and gets paid for it.
    pub seller: AccountAddress,
    /// Asking price, never zero.
    pub price: Amount,
}

/// The contract state.
#[derive(Serial, DeserialWithState, StateClone)]
#[concordium(state_parameter = "S")]
pub struct State<S: HasStateApi> {
    /// Active listings.
    pub listings: StateMap<Token, Listing, S>,
    /// Withdrawable sale revenue. A missing entry is a zero balance.
    pub proceeds: StateMap<AccountAddress, Amount, S>,
}

// Functions for creating and updating the contract state.
impl<S: HasStateApi> State<S> {
    /// Creates a new state with no listings.
    pub fn empty(state_builder: &mut StateBuilder<S>) -> Self {
        Self {
            listings: state_builder.new_map(),
            proceeds: state_builder.new_map(),
        }
    }

    pub fn listing(&self, token: &Token) -> Option<Listing> {
        self.listings.get(token).map(|listing| *listing)
    }

    pub fn proceeds_of(&self, account: &AccountAddress) -> Amount {
        self.proceeds
            .get(account)
            .map(|balance| *balance)
            .unwrap_or_else(Amount::zero)
    }

    /// Insert a listing, replacing any previous listing of the token.
    pub fn list(
        &mut self,
        token: Token,
        seller: AccountAddress,
        price: Amount,
    ) -> ContractResult<()> {
        ensure!(
            price > Amount::zero(),
            CustomContractError::PriceMustBeAboveZero
        );

        self.listings.insert(token, Listing { seller, price });

        Ok(())
    }

    /// Returns the listing of `token` if `sender` is its seller.
    pub fn seller_listing(&self, token: &Token, sender: &Address) -> ContractResult<Listing> {
        let listing = self
            .listing(token)
            .ok_or(CustomContractError::NotListed)?;

        ensure!(
            sender.matches_account(&listing.seller),
            CustomContractError::NotOwner
        );

        Ok(listing)
    }

    /// Remove a listing on behalf of its seller.
    pub fn cancel(&mut self, token: &Token, sender: &Address) -> ContractResult<Listing> {
        let listing = self.seller_listing(token, sender)?;
        self.listings.remove(token);

        Ok(listing)
    }

    /// Change the price of a listing on behalf of its seller.
    /// Returns the updated listing.
    pub fn update_price(
        &mut self,
        token: &Token,
        sender: &Address,
        price: Amount,
    ) -> ContractResult<Listing> {
        let listing = self.seller_listing(token, sender)?;

        ensure!(
            price > Amount::zero(),
            CustomContractError::PriceMustBeAboveZero
        );

        let listing = Listing { price, ..listing };
        self.listings.insert(token.clone(), listing);

        Ok(listing)
    }

    /// Book a sale: the listing is consumed and its price credited to the
    /// seller. Returns the consumed listing.
    pub fn settle(&mut self, token: &Token) -> ContractResult<Listing> {
        let listing = self
            .listing(token)
            .ok_or(CustomContractError::NotListed)?;

        self.listings.remove(token);
        self.credit(listing.seller, listing.price);

        Ok(listing)
    }

    /// Reverse a `settle` whose token transfer did not go through.
    pub fn unsettle(&mut self, token: Token, listing: Listing) {
        let balance = self.proceeds_of(&listing.seller) - listing.price;
        if balance == Amount::zero() {
            self.proceeds.remove(&listing.seller);
        } else {
            self.proceeds.insert(listing.seller, balance);
        }

        self.listings.insert(token, listing);
    }

    pub fn credit(&mut self, account: AccountAddress, amount: Amount) {
        // Bounded by the total CCD supply.
        let balance = self.proceeds_of(&account) + amount;
        self.proceeds.insert(account, balance);
    }

    /// Zero the balance of `account` and return what it was.
    /// Fails with NoProceeds if there is nothing to take.
    pub fn take_proceeds(&mut self, account: &AccountAddress) -> ContractResult<Amount> {
        let balance = self.proceeds_of(account);
        ensure!(balance > Amount::zero(), CustomContractError::NoProceeds);

        self.proceeds.remove(account);

        Ok(balance)
    }

    pub fn view_listings(&self, params: &ViewListingsParams) -> Vec<ListingEntry> {
        self.listings
            .iter()
            .skip(params.skip as usize)
            .take(params.show as usize)
            .map(|(token, listing)| ListingEntry {
                token: (*token).clone(),
                seller: listing.seller,
                price: listing.price,
            })
            .collect()
    }
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use concordium_cis2::*;
    use test_infrastructure::*;

    const NFT: ContractAddress = ContractAddress {
        index: 2,
        subindex: 0,
    };
    const SELLER: AccountAddress = AccountAddress([1; 32]);
    const STRANGER: AccountAddress = AccountAddress([3; 32]);
    const PRICE: Amount = Amount::from_ccd(100);

    fn token(id: u8) -> Token {
        Token::new(NFT, TokenIdVec(vec![id]))
    }

    fn empty_state() -> State<TestStateApi> {
        let mut state_builder = TestStateBuilder::new();
        State::empty(&mut state_builder)
    }

    #[concordium_test]
    fn test_list_replaces_previous_listing() {
        let mut state = empty_state();

        claim_eq!(state.list(token(0), SELLER, PRICE), Ok(()));
        claim_eq!(state.list(token(0), STRANGER, PRICE * 2), Ok(()));
        claim_eq!(
            state.listing(&token(0)),
            Some(Listing {
                seller: STRANGER,
                price: PRICE * 2,
            })
        );
        claim_eq!(state.listings.iter().count(), 1);
    }

    #[concordium_test]
    fn test_list_rejects_zero_price() {
        let mut state = empty_state();

        claim_eq!(
            state.list(token(0), SELLER, Amount::zero()),
            Err(CustomContractError::PriceMustBeAboveZero)
        );
        claim_eq!(state.listing(&token(0)), None);
    }

    #[concordium_test]
    fn test_credit_accumulates() {
        let mut state = empty_state();

        claim_eq!(state.proceeds_of(&SELLER), Amount::zero());
        state.credit(SELLER, PRICE);
        state.credit(SELLER, PRICE);
        claim_eq!(state.proceeds_of(&SELLER), PRICE * 2);
    }

    #[concordium_test]
    fn test_take_proceeds_only_once() {
        let mut state = empty_state();
        state.credit(SELLER, PRICE);

        claim_eq!(state.take_proceeds(&SELLER), Ok(PRICE));
        claim_eq!(state.proceeds_of(&SELLER), Amount::zero());
        claim_eq!(
            state.take_proceeds(&SELLER),
            Err(CustomContractError::NoProceeds)
        );
    }

    #[concordium_test]
    fn test_unsettle_restores_listing_and_proceeds() {
        let mut state = empty_state();
        state.credit(SELLER, PRICE);
        state
            .list(token(0), SELLER, PRICE)
            .expect_report("Listing should succeed");

        let listing = state.settle(&token(0)).expect_report("Token is listed");
        claim_eq!(state.listing(&token(0)), None);
        claim_eq!(state.proceeds_of(&SELLER), PRICE * 2);

        state.unsettle(token(0), listing);
        claim_eq!(state.listing(&token(0)), Some(listing));
        claim_eq!(state.proceeds_of(&SELLER), PRICE);
    }

    #[concordium_test]
    fn test_seller_listing_checks_listing_before_seller() {
        let mut state = empty_state();
        let stranger = Address::Account(STRANGER);

        claim_eq!(
            state.seller_listing(&token(0), &stranger),
            Err(CustomContractError::NotListed)
        );

        state
            .list(token(0), SELLER, PRICE)
            .expect_report("Listing should succeed");
        claim_eq!(
            state.seller_listing(&token(0), &stranger),
            Err(CustomContractError::NotOwner)
        );
    }
}
