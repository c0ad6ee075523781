use super::*;

/// A token, globally identified by its registry contract and its id there.
#[derive(Debug, Serialize, SchemaType, PartialEq, Eq, Clone)]
pub struct Token {
    pub contract: ContractAddress,
    pub id: ContractTokenId,
}

impl Token {
    pub fn new(contract: ContractAddress, id: ContractTokenId) -> Self {
        Self { contract, id }
    }
}
