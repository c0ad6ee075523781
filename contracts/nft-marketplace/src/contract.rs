use super::*;

/// Initialize the marketplace with no listings and no proceeds.
#[init(contract = "NftMarketplace")]
fn init<S: HasStateApi>(
    _ctx: &impl HasInitContext,
    state_builder: &mut StateBuilder<S>,
) -> InitResult<State<S>> {
    Ok(State::empty(state_builder))
}

/// List a token for sale at a fixed price.
///
/// The token stays with the seller. Before listing, the seller has to add
/// this contract as an operator in the token contract, so that the token can
/// be moved to the buyer on purchase.
///
/// A listing whose seller no longer holds the token is replaced.
///
/// Rejects if:
/// - Sender is a contract address.
/// - It fails to parse the parameter.
/// - The token is listed and its seller still holds it.
/// - Sender does not hold the token.
/// - The price is zero.
/// - This contract is not an operator of the sender.
#[receive(
    contract = "NftMarketplace",
    name = "listItem",
    parameter = "ListItemParams",
    mutable,
    enable_logger
)]
fn list_item<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let seller = get_account_address(ctx.sender())?;
    let params: ListItemParams = ctx.parameter_cursor().get()?;

    if let Some(listing) = host.state().listing(&params.token) {
        ensure!(
            !host.cis2_holds(&params.token, Address::Account(listing.seller))?,
            CustomContractError::AlreadyListed
        );
    }

    ensure!(
        host.cis2_holds(&params.token, Address::Account(seller))?,
        CustomContractError::NotOwner
    );

    ensure!(
        params.price > Amount::zero(),
        CustomContractError::PriceMustBeAboveZero
    );

    ensure_marketplace_approved(host, ctx.self_address(), &params.token, seller)?;

    host.state_mut()
        .list(params.token.clone(), seller, params.price)?;

    // Event for listing NFT.
    logger.log(&MarketplaceEvent::ItemListed(ItemListedEvent {
        seller,
        token: params.token,
        price: params.price,
    }))?;

    Ok(())
}

/// Remove a listing.
///
/// Operator rights granted to this contract are left untouched, the seller
/// revokes them in the token contract if desired.
///
/// Rejects if:
/// - It fails to parse the parameter.
/// - The token is not listed.
/// - Sender is not the seller.
#[receive(
    contract = "NftMarketplace",
    name = "cancelListing",
    parameter = "Token",
    mutable,
    enable_logger
)]
fn cancel_listing<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let token: Token = ctx.parameter_cursor().get()?;

    let listing = host.state_mut().cancel(&token, &ctx.sender())?;

    // Event for unlisting NFT.
    logger.log(&MarketplaceEvent::ItemCanceled(ItemCanceledEvent {
        seller: listing.seller,
        token,
    }))?;

    Ok(())
}

/// Update the price of a listed token.
///
/// Rejects if:
/// - It fails to parse the parameter.
/// - The token is not listed.
/// - Sender is not the seller.
/// - The new price is zero.
#[receive(
    contract = "NftMarketplace",
    name = "updateListing",
    parameter = "UpdateListingParams",
    mutable,
    enable_logger
)]
fn update_listing<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let params: UpdateListingParams = ctx.parameter_cursor().get()?;

    let listing = host
        .state_mut()
        .update_price(&params.token, &ctx.sender(), params.price)?;

    // Re-announce the listing with its new price.
    logger.log(&MarketplaceEvent::ItemListed(ItemListedEvent {
        seller: listing.seller,
        token: params.token,
        price: listing.price,
    }))?;

    Ok(())
}

/// Buy a listed token.
///
/// The listed price is credited to the seller's proceeds. Any amount sent on
/// top of the price stays with the contract.
///
/// Rejects if:
/// - It fails to parse the parameter.
/// - The token is not listed.
/// - Sender is a contract address.
/// - The amount is less than the listed price.
/// - The seller no longer holds the token.
/// - The seller revoked the operator rights of this contract.
/// - The token contract rejects the transfer.
#[receive(
    contract = "NftMarketplace",
    name = "buyItem",
    parameter = "Token",
    mutable,
    enable_logger,
    payable
)]
fn buy_item<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    amount: Amount,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let token: Token = ctx.parameter_cursor().get()?;

    let listing = host
        .state()
        .listing(&token)
        .ok_or(CustomContractError::NotListed)?;

    let buyer = get_account_address(ctx.sender())?;

    // Ensuring price of NFT is lesser or equal to the amount passed
    ensure!(amount >= listing.price, CustomContractError::PriceNotMet);

    ensure!(
        host.cis2_holds(&token, Address::Account(listing.seller))?,
        CustomContractError::NotOwner
    );

    ensure_marketplace_approved(host, ctx.self_address(), &token, listing.seller)?;

    // Book the sale before calling out to the token contract.
    let listing = host.state_mut().settle(&token)?;

    if host.cis2_transfer(&token, listing.seller, buyer).is_err() {
        host.state_mut().unsettle(token, listing);
        bail!(CustomContractError::TokenTransferFailed);
    }

    // Event for buying NFT.
    logger.log(&MarketplaceEvent::ItemBought(ItemBoughtEvent {
        buyer,
        token,
        price: listing.price,
    }))?;

    Ok(())
}

/// Send all proceeds of the sender to the sender.
///
/// Rejects if:
/// - Sender is a contract address.
/// - Sender has no proceeds.
/// - The transfer fails.
#[receive(
    contract = "NftMarketplace",
    name = "withdrawProceeds",
    mutable,
    enable_logger
)]
fn withdraw_proceeds<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &mut impl HasHost<State<S>, StateApiType = S>,
    logger: &mut impl HasLogger,
) -> ContractResult<()> {
    let account = get_account_address(ctx.sender())?;

    // Balance is zeroed before the transfer.
    let amount = host.state_mut().take_proceeds(&account)?;

    if let Err(error) = host.invoke_transfer(&account, amount) {
        host.state_mut().credit(account, amount);
        return Err(error.into());
    }

    logger.log(&MarketplaceEvent::ProceedsWithdrawn(
        ProceedsWithdrawnEvent { account, amount },
    ))?;

    Ok(())
}

/// View function that returns the listing of the given token, if any.
#[receive(
    contract = "NftMarketplace",
    name = "getListing",
    parameter = "Token",
    return_value = "Option<Listing>"
)]
fn get_listing<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Option<Listing>> {
    let token: Token = ctx.parameter_cursor().get()?;

    Ok(host.state().listing(&token))
}

/// View function that returns the withdrawable proceeds of an account.
#[receive(
    contract = "NftMarketplace",
    name = "getProceeds",
    parameter = "AccountAddress",
    return_value = "Amount"
)]
fn get_proceeds<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Amount> {
    let account: AccountAddress = ctx.parameter_cursor().get()?;

    Ok(host.state().proceeds_of(&account))
}

/// View function that returns a page of the active listings.
#[receive(
    contract = "NftMarketplace",
    name = "viewListings",
    parameter = "ViewListingsParams",
    return_value = "Vec<ListingEntry>"
)]
fn view_listings<S: HasStateApi>(
    ctx: &impl HasReceiveContext,
    host: &impl HasHost<State<S>, StateApiType = S>,
) -> ContractResult<Vec<ListingEntry>> {
    let params: ViewListingsParams = ctx.parameter_cursor().get()?;

    Ok(host.state().view_listings(&params))
}

#[concordium_cfg_test]
mod tests {
    use super::*;
    use commons::test::*;
    use concordium_cis2::*;
    use test_infrastructure::*;

    const MARKETPLACE: ContractAddress = ContractAddress {
        index: 1,
        subindex: 0,
    };
    const NFT: ContractAddress = ContractAddress {
        index: 2,
        subindex: 0,
    };

    const SELLER: AccountAddress = AccountAddress([1; 32]);
    const BUYER: AccountAddress = AccountAddress([2; 32]);
    const STRANGER: AccountAddress = AccountAddress([3; 32]);

    const PRICE: Amount = Amount::from_ccd(100);

    fn token_0() -> Token {
        Token::new(NFT, TokenIdVec(vec![0]))
    }

    fn token_1() -> Token {
        Token::new(NFT, TokenIdVec(vec![1]))
    }

    fn receive_ctx(sender: AccountAddress, parameter: &[u8]) -> TestReceiveContext {
        let mut ctx = TestReceiveContext::empty();
        ctx.set_sender(Address::Account(sender))
            .set_self_address(MARKETPLACE)
            .set_parameter(parameter);
        ctx
    }

    fn default_host() -> TestHost<State<TestStateApi>> {
        let ctx = TestInitContext::empty();
        let mut state_builder = TestStateBuilder::new();

        // Call the init method.
        let state =
            init(&ctx, &mut state_builder).expect_report("Failed during init_NftMarketplace");

        TestHost::new(state, state_builder)
    }

    /// Token registry in which `owner` holds every token and has made the
    /// marketplace an operator if `approved`.
    fn setup_registry(host: &mut TestHost<State<TestStateApi>>, owner: AccountAddress, approved: bool) {
        host.setup_mock_entrypoint(
            NFT,
            OwnedEntrypointName::new_unchecked(String::from(BALANCE_OF)),
            parse_and_map_mock(move |params: &ContractBalanceOfQueryParams| {
                let balances: Vec<ContractTokenAmount> = params
                    .queries
                    .iter()
                    .map(|query| {
                        if query.address == Address::Account(owner) {
                            ContractTokenAmount::from(1)
                        } else {
                            ContractTokenAmount::from(0)
                        }
                    })
                    .collect();
                Some(BalanceOfQueryResponse(balances))
            }),
        );
        host.setup_mock_entrypoint(
            NFT,
            OwnedEntrypointName::new_unchecked(String::from(OPERATOR_OF)),
            parse_and_map_mock(move |params: &OperatorOfQueryParams| {
                let operators: Vec<bool> = params
                    .queries
                    .iter()
                    .map(|query| {
                        approved
                            && query.owner == Address::Account(owner)
                            && query.address == Address::Contract(MARKETPLACE)
                    })
                    .collect();
                Some(OperatorOfQueryResponse(operators))
            }),
        );
        host.setup_mock_entrypoint(
            NFT,
            OwnedEntrypointName::new_unchecked(String::from(TRANSFER)),
            parse_and_check_mock(
                move |params: &TransferParameter| match params.0.as_slice() {
                    [transfer] => {
                        transfer.from == Address::Account(owner)
                            && transfer.amount == ContractTokenAmount::from(1)
                            && matches!(transfer.to, Receiver::Account(to) if to == BUYER)
                    }
                    _ => false,
                },
                (),
            ),
        );
    }

    fn list(
        host: &mut TestHost<State<TestStateApi>>,
        seller: AccountAddress,
        token: Token,
        price: Amount,
    ) -> ContractResult<()> {
        let bytes = to_bytes(&ListItemParams { token, price });
        let ctx = receive_ctx(seller, &bytes);
        let mut logger = TestLogger::init();

        list_item(&ctx, host, &mut logger)
    }

    fn cancel(
        host: &mut TestHost<State<TestStateApi>>,
        sender: AccountAddress,
        token: Token,
    ) -> ContractResult<()> {
        let bytes = to_bytes(&token);
        let ctx = receive_ctx(sender, &bytes);
        let mut logger = TestLogger::init();

        cancel_listing(&ctx, host, &mut logger)
    }

    fn update(
        host: &mut TestHost<State<TestStateApi>>,
        sender: AccountAddress,
        token: Token,
        price: Amount,
    ) -> ContractResult<()> {
        let bytes = to_bytes(&UpdateListingParams { token, price });
        let ctx = receive_ctx(sender, &bytes);
        let mut logger = TestLogger::init();

        update_listing(&ctx, host, &mut logger)
    }

    fn buy(
        host: &mut TestHost<State<TestStateApi>>,
        buyer: AccountAddress,
        token: Token,
        amount: Amount,
    ) -> ContractResult<()> {
        let bytes = to_bytes(&token);
        let ctx = receive_ctx(buyer, &bytes);
        let mut logger = TestLogger::init();

        host.set_self_balance(host.self_balance() + amount);
        buy_item(&ctx, host, amount, &mut logger)
    }

    fn withdraw(host: &mut TestHost<State<TestStateApi>>, sender: AccountAddress) -> ContractResult<()> {
        let ctx = receive_ctx(sender, &[]);
        let mut logger = TestLogger::init();

        withdraw_proceeds(&ctx, host, &mut logger)
    }

    fn listing_of(host: &TestHost<State<TestStateApi>>, token: Token) -> Option<Listing> {
        let bytes = to_bytes(&token);
        let ctx = receive_ctx(STRANGER, &bytes);

        get_listing(&ctx, host).expect_report("getListing should not fail")
    }

    fn proceeds_of(host: &TestHost<State<TestStateApi>>, account: AccountAddress) -> Amount {
        let bytes = to_bytes(&account);
        let ctx = receive_ctx(STRANGER, &bytes);

        get_proceeds(&ctx, host).expect_report("getProceeds should not fail")
    }

    /// Host with `token_0` listed by `SELLER` at `PRICE`.
    fn listed_host() -> TestHost<State<TestStateApi>> {
        let mut host = default_host();
        setup_registry(&mut host, SELLER, true);
        claim_eq!(list(&mut host, SELLER, token_0(), PRICE), Ok(()));
        host
    }

    /// Test initialization succeeds.
    #[concordium_test]
    fn test_init() {
        let host = default_host();

        claim_eq!(
            host.state().listings.iter().count(),
            0,
            "No listings should be initialized"
        );
        claim_eq!(
            host.state().proceeds.iter().count(),
            0,
            "No proceeds should be initialized"
        );
    }

    #[concordium_test]
    fn test_new_account_has_no_proceeds() {
        let host = default_host();

        claim_eq!(proceeds_of(&host, SELLER), Amount::zero());
    }

    #[concordium_test]
    fn test_list_item() {
        let mut host = default_host();
        setup_registry(&mut host, SELLER, true);

        let bytes = to_bytes(&ListItemParams {
            token: token_0(),
            price: PRICE,
        });
        let ctx = receive_ctx(SELLER, &bytes);
        let mut logger = TestLogger::init();

        let result = list_item(&ctx, &mut host, &mut logger);

        claim_eq!(result, Ok(()));
        claim_eq!(
            listing_of(&host, token_0()),
            Some(Listing {
                seller: SELLER,
                price: PRICE,
            })
        );

        // Check the logs
        claim_eq!(logger.logs.len(), 1, "Only one event should be logged");
        let event = MarketplaceEvent::deserial(&mut Cursor::new(&logger.logs[0]))
            .expect_report("Event should parse");
        claim_eq!(
            event,
            MarketplaceEvent::ItemListed(ItemListedEvent {
                seller: SELLER,
                token: token_0(),
                price: PRICE,
            })
        );
    }

    #[concordium_test]
    fn test_list_item_already_listed() {
        let mut host = listed_host();

        let result = list(&mut host, SELLER, token_0(), PRICE * 2);

        claim_eq!(result, Err(CustomContractError::AlreadyListed));
        claim_eq!(listing_of(&host, token_0()).map(|l| l.price), Some(PRICE));
    }

    #[concordium_test]
    fn test_list_item_not_owner() {
        let mut host = default_host();
        setup_registry(&mut host, SELLER, true);

        let result = list(&mut host, STRANGER, token_0(), PRICE);

        claim_eq!(result, Err(CustomContractError::NotOwner));
        claim_eq!(listing_of(&host, token_0()), None);
    }

    #[concordium_test]
    fn test_list_item_zero_price() {
        let mut host = default_host();
        setup_registry(&mut host, SELLER, true);

        let result = list(&mut host, SELLER, token_0(), Amount::zero());

        claim_eq!(result, Err(CustomContractError::PriceMustBeAboveZero));
        claim_eq!(listing_of(&host, token_0()), None);
    }

    #[concordium_test]
    fn test_list_item_not_approved() {
        let mut host = default_host();
        setup_registry(&mut host, SELLER, false);

        let result = list(&mut host, SELLER, token_0(), PRICE);

        claim_eq!(result, Err(CustomContractError::NotApprovedForMarketplace));
        claim_eq!(listing_of(&host, token_0()), None);
    }

    #[concordium_test]
    fn test_list_item_contract_sender() {
        let mut host = default_host();
        setup_registry(&mut host, SELLER, true);

        let bytes = to_bytes(&ListItemParams {
            token: token_0(),
            price: PRICE,
        });
        let mut ctx = receive_ctx(SELLER, &bytes);
        ctx.set_sender(Address::Contract(NFT));
        let mut logger = TestLogger::init();

        let result = list_item(&ctx, &mut host, &mut logger);

        claim_eq!(result, Err(CustomContractError::OnlyAccountAddress));
    }

    #[concordium_test]
    fn test_list_item_incompatible_registry() {
        let mut host = default_host();
        setup_registry(&mut host, SELLER, true);
        // Answers with two balances for a single query
        host.setup_mock_entrypoint(
            NFT,
            OwnedEntrypointName::new_unchecked(String::from(BALANCE_OF)),
            parse_and_map_mock(|_: &ContractBalanceOfQueryParams| {
                Some(BalanceOfQueryResponse(vec![
                    ContractTokenAmount::from(1),
                    ContractTokenAmount::from(1),
                ]))
            }),
        );

        let result = list(&mut host, SELLER, token_0(), PRICE);

        claim_eq!(result, Err(CustomContractError::Incompatible));
    }

    #[concordium_test]
    fn test_cancel_listing_not_listed() {
        let mut host = default_host();

        let result = cancel(&mut host, SELLER, token_0());

        claim_eq!(result, Err(CustomContractError::NotListed));
    }

    #[concordium_test]
    fn test_cancel_listing_not_seller() {
        let mut host = listed_host();

        let result = cancel(&mut host, STRANGER, token_0());

        claim_eq!(result, Err(CustomContractError::NotOwner));
        claim!(listing_of(&host, token_0()).is_some());
    }

    #[concordium_test]
    fn test_cancel_listing() {
        let mut host = listed_host();

        let bytes = to_bytes(&token_0());
        let ctx = receive_ctx(SELLER, &bytes);
        let mut logger = TestLogger::init();

        let result = cancel_listing(&ctx, &mut host, &mut logger);

        claim_eq!(result, Ok(()));
        claim_eq!(listing_of(&host, token_0()), None);
        claim_eq!(logger.logs.len(), 1, "Only one event should be logged");
        claim_eq!(
            logger.logs[0],
            to_bytes(&MarketplaceEvent::ItemCanceled(ItemCanceledEvent {
                seller: SELLER,
                token: token_0(),
            })),
            "Incorrect event emitted"
        );
    }

    #[concordium_test]
    fn test_update_listing_not_listed() {
        let mut host = default_host();

        let result = update(&mut host, SELLER, token_0(), PRICE * 2);

        claim_eq!(result, Err(CustomContractError::NotListed));
    }

    #[concordium_test]
    fn test_update_listing_not_seller() {
        let mut host = listed_host();

        let result = update(&mut host, STRANGER, token_0(), PRICE * 2);

        claim_eq!(result, Err(CustomContractError::NotOwner));
        claim_eq!(listing_of(&host, token_0()).map(|l| l.price), Some(PRICE));
    }

    #[concordium_test]
    fn test_update_listing_zero_price() {
        let mut host = listed_host();

        let result = update(&mut host, SELLER, token_0(), Amount::zero());

        claim_eq!(result, Err(CustomContractError::PriceMustBeAboveZero));
        claim_eq!(listing_of(&host, token_0()).map(|l| l.price), Some(PRICE));
    }

    #[concordium_test]
    fn test_update_listing() {
        let mut host = listed_host();

        let bytes = to_bytes(&UpdateListingParams {
            token: token_0(),
            price: PRICE * 2,
        });
        let ctx = receive_ctx(SELLER, &bytes);
        let mut logger = TestLogger::init();

        let result = update_listing(&ctx, &mut host, &mut logger);

        claim_eq!(result, Ok(()));
        claim_eq!(
            listing_of(&host, token_0()),
            Some(Listing {
                seller: SELLER,
                price: PRICE * 2,
            })
        );
        claim_eq!(
            logger.logs,
            vec![to_bytes(&MarketplaceEvent::ItemListed(ItemListedEvent {
                seller: SELLER,
                token: token_0(),
                price: PRICE * 2,
            }))],
            "Update should re-announce the listing"
        );
    }

    #[concordium_test]
    fn test_buy_item_not_listed() {
        let mut host = default_host();
        setup_registry(&mut host, SELLER, true);

        let result = buy(&mut host, BUYER, token_0(), PRICE);

        claim_eq!(result, Err(CustomContractError::NotListed));
    }

    #[concordium_test]
    fn test_buy_item_price_not_met() {
        let mut host = listed_host();

        let result = buy(&mut host, BUYER, token_0(), Amount::from_ccd(50));

        claim_eq!(result, Err(CustomContractError::PriceNotMet));
        claim_eq!(
            listing_of(&host, token_0()),
            Some(Listing {
                seller: SELLER,
                price: PRICE,
            })
        );
        claim_eq!(proceeds_of(&host, SELLER), Amount::zero());
    }

    #[concordium_test]
    fn test_buy_item() {
        let mut host = listed_host();

        let bytes = to_bytes(&token_0());
        let ctx = receive_ctx(BUYER, &bytes);
        let mut logger = TestLogger::init();
        host.set_self_balance(PRICE);

        let result = buy_item(&ctx, &mut host, PRICE, &mut logger);

        claim_eq!(result, Ok(()));
        claim_eq!(listing_of(&host, token_0()), None);
        claim_eq!(proceeds_of(&host, SELLER), PRICE);
        claim_eq!(proceeds_of(&host, BUYER), Amount::zero());
        claim_eq!(logger.logs.len(), 1, "Only one event should be logged");
        claim_eq!(
            logger.logs[0],
            to_bytes(&MarketplaceEvent::ItemBought(ItemBoughtEvent {
                buyer: BUYER,
                token: token_0(),
                price: PRICE,
            })),
            "Incorrect event emitted"
        );
    }

    #[concordium_test]
    fn test_buy_item_overpaid_credits_listed_price() {
        let mut host = listed_host();

        let result = buy(&mut host, BUYER, token_0(), PRICE * 3);

        claim_eq!(result, Ok(()));
        claim_eq!(proceeds_of(&host, SELLER), PRICE);
    }

    #[concordium_test]
    fn test_buy_item_books_sale_before_transfer() {
        let mut host = listed_host();
        host.setup_mock_entrypoint(
            NFT,
            OwnedEntrypointName::new_unchecked(String::from(TRANSFER)),
            parse_and_inspect_mock(
                |_: &TransferParameter, state: &State<TestStateApi>| {
                    state.listing(&token_0()).is_none() && state.proceeds_of(&SELLER) == PRICE
                },
                (),
            ),
        );

        let result = buy(&mut host, BUYER, token_0(), PRICE);

        claim_eq!(result, Ok(()));
    }

    #[concordium_test]
    fn test_buy_item_transfer_rejected() {
        let mut host = listed_host();
        host.setup_mock_entrypoint(
            NFT,
            OwnedEntrypointName::new_unchecked(String::from(TRANSFER)),
            parse_and_reject_mock::<TransferParameter, _>(),
        );

        let result = buy(&mut host, BUYER, token_0(), PRICE);

        claim_eq!(result, Err(CustomContractError::TokenTransferFailed));
        claim_eq!(
            listing_of(&host, token_0()),
            Some(Listing {
                seller: SELLER,
                price: PRICE,
            })
        );
        claim_eq!(proceeds_of(&host, SELLER), Amount::zero());
    }

    #[concordium_test]
    fn test_buy_item_approval_revoked() {
        let mut host = listed_host();
        setup_registry(&mut host, SELLER, false);

        let result = buy(&mut host, BUYER, token_0(), PRICE);

        claim_eq!(result, Err(CustomContractError::NotApprovedForMarketplace));
        claim!(listing_of(&host, token_0()).is_some());
        claim_eq!(proceeds_of(&host, SELLER), Amount::zero());
    }

    #[concordium_test]
    fn test_withdraw_proceeds_none() {
        let mut host = default_host();

        let result = withdraw(&mut host, STRANGER);

        claim_eq!(result, Err(CustomContractError::NoProceeds));
    }

    #[concordium_test]
    fn test_withdraw_proceeds() {
        let mut host = listed_host();
        claim_eq!(buy(&mut host, BUYER, token_0(), PRICE), Ok(()));

        let ctx = receive_ctx(SELLER, &[]);
        let mut logger = TestLogger::init();

        let result = withdraw_proceeds(&ctx, &mut host, &mut logger);

        claim_eq!(result, Ok(()));
        claim!(host.transfer_occurred(&SELLER, PRICE));
        claim_eq!(proceeds_of(&host, SELLER), Amount::zero());
        claim_eq!(
            logger.logs[0],
            to_bytes(&MarketplaceEvent::ProceedsWithdrawn(
                ProceedsWithdrawnEvent {
                    account: SELLER,
                    amount: PRICE,
                }
            )),
            "Incorrect event emitted"
        );

        // Nothing left to withdraw a second time
        claim_eq!(
            withdraw(&mut host, SELLER),
            Err(CustomContractError::NoProceeds)
        );
    }

    #[concordium_test]
    fn test_withdraw_proceeds_transfer_fails() {
        let mut host = listed_host();
        claim_eq!(buy(&mut host, BUYER, token_0(), PRICE), Ok(()));
        host.set_self_balance(Amount::zero());

        let result = withdraw(&mut host, SELLER);

        claim_eq!(result, Err(CustomContractError::InvokeTransferError));
        claim_eq!(proceeds_of(&host, SELLER), PRICE);
    }

    #[concordium_test]
    fn test_list_and_buy() {
        let mut host = listed_host();

        claim_eq!(buy(&mut host, BUYER, token_0(), PRICE), Ok(()));

        claim_eq!(listing_of(&host, token_0()), None);
        claim_eq!(proceeds_of(&host, SELLER), PRICE);

        // Buyer now owns the token and can list it.
        setup_registry(&mut host, BUYER, true);
        claim_eq!(list(&mut host, BUYER, token_0(), PRICE * 2), Ok(()));
        claim_eq!(
            listing_of(&host, token_0()),
            Some(Listing {
                seller: BUYER,
                price: PRICE * 2,
            })
        );
    }

    #[concordium_test]
    fn test_buy_at_old_price_after_update() {
        let mut host = listed_host();
        claim_eq!(update(&mut host, SELLER, token_0(), PRICE * 2), Ok(()));

        let result = buy(&mut host, BUYER, token_0(), PRICE);

        claim_eq!(result, Err(CustomContractError::PriceNotMet));
        claim_eq!(listing_of(&host, token_0()).map(|l| l.price), Some(PRICE * 2));
    }

    #[concordium_test]
    fn test_buy_after_cancel() {
        let mut host = listed_host();
        claim_eq!(cancel(&mut host, SELLER, token_0()), Ok(()));

        let result = buy(&mut host, STRANGER, token_0(), PRICE);

        claim_eq!(result, Err(CustomContractError::NotListed));
        claim_eq!(listing_of(&host, token_0()), None);
        claim_eq!(proceeds_of(&host, SELLER), Amount::zero());
    }

    #[concordium_test]
    fn test_view_listings() {
        let mut host = listed_host();
        claim_eq!(list(&mut host, SELLER, token_1(), PRICE * 2), Ok(()));

        let bytes = to_bytes(&ViewListingsParams { skip: 0, show: 10 });
        let ctx = receive_ctx(STRANGER, &bytes);
        let all = view_listings(&ctx, &host).expect_report("viewListings should not fail");
        claim_eq!(all.len(), 2);
        claim!(all.contains(&ListingEntry {
            token: token_1(),
            seller: SELLER,
            price: PRICE * 2,
        }));

        let bytes = to_bytes(&ViewListingsParams { skip: 1, show: 10 });
        let ctx = receive_ctx(STRANGER, &bytes);
        let page = view_listings(&ctx, &host).expect_report("viewListings should not fail");
        claim_eq!(page.len(), 1);
    }

    #[concordium_test]
    fn test_list_item_replaces_stale_listing() {
        let mut host = listed_host();
        // The token moved to BUYER outside the marketplace.
        setup_registry(&mut host, BUYER, true);

        let bytes = to_bytes(&ListItemParams {
            token: token_0(),
            price: PRICE * 2,
        });
        let ctx = receive_ctx(BUYER, &bytes);
        let mut logger = TestLogger::init();

        let result = list_item(&ctx, &mut host, &mut logger);

        claim_eq!(result, Ok(()));
        claim_eq!(
            listing_of(&host, token_0()),
            Some(Listing {
                seller: BUYER,
                price: PRICE * 2,
            })
        );
        claim_eq!(
            logger.logs,
            vec![to_bytes(&MarketplaceEvent::ItemListed(ItemListedEvent {
                seller: BUYER,
                token: token_0(),
                price: PRICE * 2,
            }))]
        );
    }

    #[concordium_test]
    fn test_list_item_stale_listing_needs_owner() {
        let mut host = listed_host();
        setup_registry(&mut host, BUYER, true);

        let result = list(&mut host, STRANGER, token_0(), PRICE);

        claim_eq!(result, Err(CustomContractError::NotOwner));
        claim_eq!(listing_of(&host, token_0()).map(|l| l.seller), Some(SELLER));
    }

    #[concordium_test]
    fn test_list_item_balance_query_rejected() {
        let mut host = default_host();
        setup_registry(&mut host, SELLER, true);
        host.setup_mock_entrypoint(
            NFT,
            OwnedEntrypointName::new_unchecked(String::from(BALANCE_OF)),
            parse_and_reject_mock::<ContractBalanceOfQueryParams, _>(),
        );

        let result = list(&mut host, SELLER, token_0(), PRICE);

        claim_eq!(result, Err(CustomContractError::InvokeContractError));
        claim_eq!(listing_of(&host, token_0()), None);
    }

    #[concordium_test]
    fn test_list_item_operator_query_rejected() {
        let mut host = default_host();
        setup_registry(&mut host, SELLER, true);
        host.setup_mock_entrypoint(
            NFT,
            OwnedEntrypointName::new_unchecked(String::from(OPERATOR_OF)),
            parse_and_reject_mock::<OperatorOfQueryParams, _>(),
        );

        let result = list(&mut host, SELLER, token_0(), PRICE);

        claim_eq!(result, Err(CustomContractError::InvokeContractError));
        claim_eq!(listing_of(&host, token_0()), None);
    }

    #[concordium_test]
    fn test_list_item_unparsable_balance() {
        let mut host = default_host();
        setup_registry(&mut host, SELLER, true);
        // Empty answer where a list of balances is expected
        host.setup_mock_entrypoint(
            NFT,
            OwnedEntrypointName::new_unchecked(String::from(BALANCE_OF)),
            parse_and_check_mock(|_: &ContractBalanceOfQueryParams| true, ()),
        );

        let result = list(&mut host, SELLER, token_0(), PRICE);

        claim_eq!(result, Err(CustomContractError::Incompatible));
    }

    #[concordium_test]
    fn test_list_item_balance_without_return_value() {
        let mut host = default_host();
        setup_registry(&mut host, SELLER, true);
        host.setup_mock_entrypoint(
            NFT,
            OwnedEntrypointName::new_unchecked(String::from(BALANCE_OF)),
            parse_and_empty_mock::<ContractBalanceOfQueryParams, _>(),
        );

        let result = list(&mut host, SELLER, token_0(), PRICE);

        claim_eq!(result, Err(CustomContractError::Incompatible));
    }

    #[concordium_test]
    fn test_list_item_operator_response_length() {
        let mut host = default_host();
        setup_registry(&mut host, SELLER, true);
        host.setup_mock_entrypoint(
            NFT,
            OwnedEntrypointName::new_unchecked(String::from(OPERATOR_OF)),
            parse_and_map_mock(|_: &OperatorOfQueryParams| {
                Some(OperatorOfQueryResponse(vec![true, true]))
            }),
        );

        let result = list(&mut host, SELLER, token_0(), PRICE);

        claim_eq!(result, Err(CustomContractError::Incompatible));
    }

    #[concordium_test]
    fn test_list_item_operator_without_return_value() {
        let mut host = default_host();
        setup_registry(&mut host, SELLER, true);
        host.setup_mock_entrypoint(
            NFT,
            OwnedEntrypointName::new_unchecked(String::from(OPERATOR_OF)),
            parse_and_empty_mock::<OperatorOfQueryParams, _>(),
        );

        let result = list(&mut host, SELLER, token_0(), PRICE);

        claim_eq!(result, Err(CustomContractError::Incompatible));
    }

    #[concordium_test]
    fn test_buy_item_operator_query_rejected() {
        let mut host = listed_host();
        host.setup_mock_entrypoint(
            NFT,
            OwnedEntrypointName::new_unchecked(String::from(OPERATOR_OF)),
            parse_and_reject_mock::<OperatorOfQueryParams, _>(),
        );

        let result = buy(&mut host, BUYER, token_0(), PRICE);

        claim_eq!(result, Err(CustomContractError::InvokeContractError));
        claim!(listing_of(&host, token_0()).is_some());
        claim_eq!(proceeds_of(&host, SELLER), Amount::zero());
    }

    #[concordium_test]
    fn test_buy_item_seller_no_longer_holds() {
        let mut host = listed_host();
        setup_registry(&mut host, STRANGER, true);

        let result = buy(&mut host, BUYER, token_0(), PRICE);

        claim_eq!(result, Err(CustomContractError::NotOwner));
        claim!(listing_of(&host, token_0()).is_some());
        claim_eq!(proceeds_of(&host, SELLER), Amount::zero());
    }

    #[concordium_test]
    fn test_buy_item_contract_sender() {
        let mut host = listed_host();

        let bytes = to_bytes(&token_0());
        let mut ctx = receive_ctx(BUYER, &bytes);
        ctx.set_sender(Address::Contract(NFT));
        let mut logger = TestLogger::init();

        let result = buy_item(&ctx, &mut host, PRICE, &mut logger);

        claim_eq!(result, Err(CustomContractError::OnlyAccountAddress));
        claim!(listing_of(&host, token_0()).is_some());
    }

    #[concordium_test]
    fn test_buy_item_contract_sender_not_listed() {
        let mut host = default_host();
        setup_registry(&mut host, SELLER, true);

        let bytes = to_bytes(&token_0());
        let mut ctx = receive_ctx(BUYER, &bytes);
        ctx.set_sender(Address::Contract(NFT));
        let mut logger = TestLogger::init();

        let result = buy_item(&ctx, &mut host, PRICE, &mut logger);

        claim_eq!(result, Err(CustomContractError::NotListed));
    }

    #[concordium_test]
    fn test_withdraw_proceeds_contract_sender() {
        let mut host = default_host();

        let mut ctx = receive_ctx(SELLER, &[]);
        ctx.set_sender(Address::Contract(NFT));
        let mut logger = TestLogger::init();

        let result = withdraw_proceeds(&ctx, &mut host, &mut logger);

        claim_eq!(result, Err(CustomContractError::OnlyAccountAddress));
    }
}
