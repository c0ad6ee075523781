use concordium_cis2::*;
use concordium_std::*;

use crate::{
    ContractBalanceOfQueryParams, ContractBalanceOfQueryResponse, ContractReadError,
    ContractTokenAmount, Token, TransferParameter, BALANCE_OF, OPERATOR_OF, TRANSFER,
};

/// Calls into a CIS-2 token registry.
///
/// An NFT registry reports the owner of a token as the only address holding a
/// non-zero balance of it, and lets operators move all tokens of an owner.
pub trait HostCis2Ext<S>: HasHost<S> {
    /// Whether `address` holds the token.
    fn cis2_holds(
        &self,
        token: &Token,
        address: Address,
    ) -> Result<bool, ContractReadError<Self::ReturnValueType>> {
        let parameter = ContractBalanceOfQueryParams {
            queries: vec![BalanceOfQuery {
                token_id: token.id.clone(),
                address,
            }],
        };

        let mut result = self
            .invoke_contract_read_only(
                &token.contract,
                &parameter,
                EntrypointName::new_unchecked(BALANCE_OF),
                Amount::zero(),
            )
            .map_err(ContractReadError::Call)?
            .ok_or(ContractReadError::Compatibility)?;

        let response = ContractBalanceOfQueryResponse::deserial(&mut result)
            .map_err(|_| ContractReadError::Parse)?;

        match response.0.as_slice() {
            [balance] => Ok(*balance != ContractTokenAmount::from(0)),
            _ => Err(ContractReadError::Compatibility),
        }
    }

    /// Whether `operator` may transfer tokens of `owner` in the registry.
    fn cis2_is_operator(
        &self,
        registry: &ContractAddress,
        owner: Address,
        operator: Address,
    ) -> Result<bool, ContractReadError<Self::ReturnValueType>> {
        let parameter = OperatorOfQueryParams {
            queries: vec![OperatorOfQuery {
                owner,
                address: operator,
            }],
        };

        let mut result = self
            .invoke_contract_read_only(
                registry,
                &parameter,
                EntrypointName::new_unchecked(OPERATOR_OF),
                Amount::zero(),
            )
            .map_err(ContractReadError::Call)?
            .ok_or(ContractReadError::Compatibility)?;

        let response =
            OperatorOfQueryResponse::deserial(&mut result).map_err(|_| ContractReadError::Parse)?;

        match response.0.as_slice() {
            [is_operator] => Ok(*is_operator),
            _ => Err(ContractReadError::Compatibility),
        }
    }

    /// Moves a single unit of the token from `from` to the account `to`.
    fn cis2_transfer(
        &mut self,
        token: &Token,
        from: AccountAddress,
        to: AccountAddress,
    ) -> Result<(), CallContractError<Self::ReturnValueType>> {
        let parameter: TransferParameter = TransferParams(vec![Transfer {
            token_id: token.id.clone(),
            amount: ContractTokenAmount::from(1),
            from: Address::Account(from),
            to: Receiver::from_account(to),
            data: AdditionalData::empty(),
        }]);

        self.invoke_contract(
            &token.contract,
            &parameter,
            EntrypointName::new_unchecked(TRANSFER),
            Amount::zero(),
        )?;

        Ok(())
    }
}

impl<S, H: HasHost<S>> HostCis2Ext<S> for H {}
