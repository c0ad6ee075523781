use super::*;

/// A token was put up for sale or its price changed.
#[derive(Debug, Serialize, SchemaType, PartialEq, Eq)]
pub struct ItemListedEvent {
    pub seller: AccountAddress,
    pub token: Token,
    pub price: Amount,
}

#[derive(Debug, Serialize, SchemaType, PartialEq, Eq)]
pub struct ItemCanceledEvent {
    pub seller: AccountAddress,
    pub token: Token,
}

#[derive(Debug, Serialize, SchemaType, PartialEq, Eq)]
pub struct ItemBoughtEvent {
    pub buyer: AccountAddress,
    pub token: Token,
    /// The listed price credited to the seller.
    pub price: Amount,
}

#[derive(Debug, Serialize, SchemaType, PartialEq, Eq)]
pub struct ProceedsWithdrawnEvent {
    pub account: AccountAddress,
    pub amount: Amount,
}

/// Tagged Custom event to be serialized for the event log.
#[derive(Debug, PartialEq, Eq)]
pub enum MarketplaceEvent {
    /// Listing NFT or updating its price
    ItemListed(ItemListedEvent),
    /// Unlisting NFT
    ItemCanceled(ItemCanceledEvent),
    /// Buying NFT
    ItemBought(ItemBoughtEvent),
    /// Withdrawing proceeds
    ProceedsWithdrawn(ProceedsWithdrawnEvent),
}

impl Serial for MarketplaceEvent {
    fn serial<W: Write>(&self, out: &mut W) -> Result<(), W::Err> {
        match self {
            MarketplaceEvent::ItemListed(event) => {
                out.write_u8(ITEM_LISTED_TAG)?;
                event.serial(out)
            }
            MarketplaceEvent::ItemCanceled(event) => {
                out.write_u8(ITEM_CANCELED_TAG)?;
                event.serial(out)
            }
            MarketplaceEvent::ItemBought(event) => {
                out.write_u8(ITEM_BOUGHT_TAG)?;
                event.serial(out)
            }
            MarketplaceEvent::ProceedsWithdrawn(event) => {
                out.write_u8(PROCEEDS_WITHDRAWN_TAG)?;
                event.serial(out)
            }
        }
    }
}

impl Deserial for MarketplaceEvent {
    fn deserial<R: Read>(source: &mut R) -> ParseResult<Self> {
        let tag = source.read_u8()?;
        match tag {
            ITEM_LISTED_TAG => ItemListedEvent::deserial(source).map(MarketplaceEvent::ItemListed),
            ITEM_CANCELED_TAG => {
                ItemCanceledEvent::deserial(source).map(MarketplaceEvent::ItemCanceled)
            }
            ITEM_BOUGHT_TAG => ItemBoughtEvent::deserial(source).map(MarketplaceEvent::ItemBought),
            PROCEEDS_WITHDRAWN_TAG => {
                ProceedsWithdrawnEvent::deserial(source).map(MarketplaceEvent::ProceedsWithdrawn)
            }
            _ => Err(ParseError::default()),
        }
    }
}
