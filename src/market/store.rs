//! # Listing Store
//!
//! The repository interface and its in-memory implementation.

use super::MarketListing;
use crate::{RuneforgeError, RuneforgeResult};
use log::trace;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

/// Change notifications published by a market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketEvent {
    Listed(MarketListing),
    Updated(MarketListing),
    Removed(Uuid),
}

/// Storage for market listings.
pub trait MarketRepository {
    /// Stores a listing and returns its id.
    fn add(&mut self, listing: MarketListing) -> Uuid;

    /// Removes a listing. Unknown ids are an error.
    fn remove(&mut self, id: Uuid) -> RuneforgeResult<MarketListing>;

    /// Replaces the stored listing with the same id. Unknown ids are an error.
    fn update(&mut self, listing: MarketListing) -> RuneforgeResult<()>;

    fn get(&self, id: Uuid) -> Option<&MarketListing>;

    /// All listings, oldest first.
    fn list(&self) -> Vec<&MarketListing>;
}

/// Listings held in memory, with a broadcast channel of changes.
#[derive(Debug)]
pub struct InMemoryMarket {
    listings: Vec<MarketListing>,
    events: broadcast::Sender<MarketEvent>,
}

impl InMemoryMarket {
    /// Creates an empty market buffering up to 64 undelivered events per subscriber.
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (events, _) = broadcast::channel(capacity.max(1));
        Self {
            listings: Vec::new(),
            events,
        }
    }

    /// Receives every change made after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<MarketEvent> {
        self.events.subscribe()
    }

    fn publish(&self, event: MarketEvent) {
        if self.events.send(event).is_err() {
            trace!("No market subscribers");
        }
    }

    fn not_found(id: Uuid) -> RuneforgeError {
        RuneforgeError::InvalidAction(format!("No listing {}", id))
    }
}

impl Default for InMemoryMarket {
    fn default() -> Self {
        Self::new()
    }
}

impl MarketRepository for InMemoryMarket {
    fn add(&mut self, listing: MarketListing) -> Uuid {
        let id = listing.id;
        self.listings.push(listing.clone());
        self.publish(MarketEvent::Listed(listing));
        id
    }

    fn remove(&mut self, id: Uuid) -> RuneforgeResult<MarketListing> {
        let index = self
            .listings
            .iter()
            .position(|l| l.id == id)
            .ok_or_else(|| Self::not_found(id))?;
        let listing = self.listings.remove(index);
        self.publish(MarketEvent::Removed(id));
        Ok(listing)
    }

    fn update(&mut self, listing: MarketListing) -> RuneforgeResult<()> {
        let slot = self
            .listings
            .iter_mut()
            .find(|l| l.id == listing.id)
            .ok_or_else(|| Self::not_found(listing.id))?;
        *slot = listing.clone();
        self.publish(MarketEvent::Updated(listing));
        Ok(())
    }

    fn get(&self, id: Uuid) -> Option<&MarketListing> {
        self.listings.iter().find(|l| l.id == id)
    }

    fn list(&self) -> Vec<&MarketListing> {
        self.listings.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribers_see_changes() {
        let mut market = InMemoryMarket::new();
        let mut events = market.subscribe();

        let mut listing = MarketListing::new("Smith", "iron", 5, 20);
        let id = market.add(listing.clone());
        listing.price = 15;
        market.update(listing.clone()).unwrap();
        market.remove(id).unwrap();

        assert_eq!(events.try_recv().unwrap(), MarketEvent::Listed(MarketListing { price: 20, ..listing.clone() }));
        assert_eq!(events.try_recv().unwrap(), MarketEvent::Updated(listing));
        assert_eq!(events.try_recv().unwrap(), MarketEvent::Removed(id));
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn test_unknown_ids() {
        let mut market = InMemoryMarket::new();
        assert!(market.remove(Uuid::new_v4()).is_err());
        assert!(market
            .update(MarketListing::new("Smith", "iron", 1, 1))
            .is_err());
        assert!(market.get(Uuid::new_v4()).is_none());
    }

    #[test]
    fn test_publish_without_subscribers() {
        let mut market = InMemoryMarket::default();
        market.add(MarketListing::new("Smith", "wood", 3, 6));
        assert_eq!(market.list().len(), 1);
    }

    #[test]
    fn test_multiple_subscribers() {
        let mut market = InMemoryMarket::new();
        let mut first = market.subscribe();
        let mut second = market.subscribe();
        let id = market.add(MarketListing::new("Smith", "herb", 2, 4));
        assert_eq!(first.try_recv().unwrap(), second.try_recv().unwrap());
        assert_eq!(market.list()[0].id, id);
    }
}
