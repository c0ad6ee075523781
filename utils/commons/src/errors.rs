use super::*;

/// The custom errors the marketplace can produce.
#[derive(Serialize, Debug, PartialEq, Eq, Reject, SchemaType)]
pub enum CustomContractError {
    /// Failed parsing the parameter (Error code: -1).
    #[from(ParseError)]
    ParseParams,
    /// Failed logging: Log is full (Error code: -2).
    LogFull,
    /// Failed logging: Log is malformed (Error code: -3).
    LogMalformed,
    /// Listing price must be above zero (Error code: -4).
    PriceMustBeAboveZero,
    /// Sender does not own the token or the listing (Error code: -5).
    NotOwner,
    /// Marketplace is not an operator of the token owner (Error code: -6).
    NotApprovedForMarketplace,
    /// Token is already listed for sale (Error code: -7).
    AlreadyListed,
    /// Token is not listed for sale (Error code: -8).
    NotListed,
    /// Attached amount is below the listed price (Error code: -9).
    PriceNotMet,
    /// Nothing to withdraw (Error code: -10).
    NoProceeds,
    /// Only account addresses can trade on the marketplace (Error code: -11).
    OnlyAccountAddress,
    /// Failed to invoke a contract (Error code: -12).
    InvokeContractError,
    /// Failed to invoke a transfer (Error code: -13).
    InvokeTransferError,
    /// Token registry rejected the purchase transfer (Error code: -14).
    TokenTransferFailed,
    /// Incompatible contract (Error code: -15)
    Incompatible,
}

/// Mapping the logging errors to CustomContractError.
impl From<LogError> for CustomContractError {
    fn from(le: LogError) -> Self {
        match le {
            LogError::Full => Self::LogFull,
            LogError::Malformed => Self::LogMalformed,
        }
    }
}

/// Mapping errors related to contract invocations to CustomContractError.
impl<T> From<CallContractError<T>> for CustomContractError {
    fn from(_cce: CallContractError<T>) -> Self {
        Self::InvokeContractError
    }
}

/// Mapping errors related to transfer invocations to CustomContractError.
impl From<TransferError> for CustomContractError {
    fn from(_te: TransferError) -> Self {
        Self::InvokeTransferError
    }
}

/// Failure of a read-only query against another contract.
#[derive(Debug)]
pub enum ContractReadError<R> {
    Call(CallContractError<R>),
    Compatibility,
    Parse,
}

impl<R> From<ContractReadError<R>> for CustomContractError {
    fn from(error: ContractReadError<R>) -> Self {
        match error {
            ContractReadError::Call(_) => Self::InvokeContractError,
            ContractReadError::Compatibility | ContractReadError::Parse => Self::Incompatible,
        }
    }
}
