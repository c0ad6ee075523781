use super::*;

pub fn get_account_address(address: Address) -> ContractResult<AccountAddress> {
    match address {
        Address::Account(addr) => Ok(addr),
        Address::Contract(_) => bail!(CustomContractError::OnlyAccountAddress),
    }
}

/// Rejects unless `owner` has made the marketplace an operator in the token's
/// contract.
pub fn ensure_marketplace_approved<S: HasStateApi>(
    host: &impl HasHost<State<S>, StateApiType = S>,
    self_address: ContractAddress,
    token: &Token,
    owner: AccountAddress,
) -> ContractResult<()> {
    let approved = host.cis2_is_operator(
        &token.contract,
        Address::Account(owner),
        Address::Contract(self_address),
    )?;

    ensure!(approved, CustomContractError::NotApprovedForMarketplace);

    Ok(())
}
