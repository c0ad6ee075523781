use super::*;

#[derive(Debug, Serialize, SchemaType)]
pub struct ListItemParams {
    /// Token to put up for sale
    pub token: Token,
    /// Asking price
    pub price: Amount,
}

/// Update Price Params.
#[derive(Debug, Serialize, SchemaType)]
pub struct UpdateListingParams {
    /// Token to update price
    pub token: Token,
    /// New cost of NFT
    pub price: Amount,
}

#[derive(Debug, Serialize, SchemaType)]
pub struct ViewListingsParams {
    pub skip: u32,
    pub show: u32,
}

#[derive(Debug, Serialize, SchemaType, PartialEq, Eq)]
pub struct ListingEntry {
    pub token: Token,
    pub seller: AccountAddress,
    pub price: Amount,
}
