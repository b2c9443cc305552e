//! # Market Module
//!
//! Player-to-player item listings behind an injectable repository.
//!
//! The engine holds no global listing table. Callers own a [`MarketRepository`] and pass
//! it to the operations that need it; [`InMemoryMarket`] is the bundled implementation and
//! broadcasts a [`MarketEvent`] for every change.

pub mod store;

pub use store::*;

use crate::game::{Character, Inventory, ItemId};
use crate::{RuneforgeError, RuneforgeResult};
use log::info;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// An item stack offered for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketListing {
    pub id: Uuid,
    pub seller: String,
    pub item_id: ItemId,
    pub quantity: u32,
    /// Total price in gold
    pub price: u32,
    /// Unix time in milliseconds
    pub listed_at: u64,
}

impl MarketListing {
    /// Creates a listing with a fresh id.
    pub fn new(seller: &str, item_id: &str, quantity: u32, price: u32) -> Self {
        let listed_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        Self {
            id: Uuid::new_v4(),
            seller: seller.to_string(),
            item_id: item_id.to_string(),
            quantity,
            price,
            listed_at,
        }
    }
}

/// Moves items out of the seller's inventory into a new listing.
pub fn list_for_sale(
    market: &mut impl MarketRepository,
    seller: &Character,
    inventory: &mut Inventory,
    item_id: &str,
    quantity: u32,
    price: u32,
) -> RuneforgeResult<Uuid> {
    if quantity == 0 {
        return Err(RuneforgeError::InvalidAction(
            "Cannot list zero items".to_string(),
        ));
    }
    inventory.remove(item_id, quantity)?;
    let listing = MarketListing::new(&seller.name, item_id, quantity, price);
    let id = listing.id;
    market.add(listing);
    info!("{} listed {} x{} for {} gold", seller.name, item_id, quantity, price);
    Ok(id)
}

/// Buys a listing: gold leaves the buyer, the items join their inventory and the
/// listing is removed.
pub fn purchase(
    market: &mut impl MarketRepository,
    listing_id: Uuid,
    buyer: &mut Character,
    inventory: &mut Inventory,
) -> RuneforgeResult<MarketListing> {
    let price = market
        .get(listing_id)
        .map(|listing| listing.price)
        .ok_or_else(|| RuneforgeError::InvalidAction(format!("No listing {}", listing_id)))?;
    if buyer.gold < price {
        return Err(RuneforgeError::InvalidAction(format!(
            "{} cannot afford {} gold",
            buyer.name, price
        )));
    }

    let listing = market.remove(listing_id)?;
    buyer.gold -= price;
    inventory.add(&listing.item_id, listing.quantity);
    info!(
        "{} bought {} x{} from {} for {} gold",
        buyer.name, listing.item_id, listing.quantity, listing.seller, price
    );
    Ok(listing)
}
