use serde::Serialize;
use uuid::Uuid;

use crate::models::Booking;

/// Ordered collection of one session's bookings.
///
/// Insertion order is display order. Every booking keeps the id it was
/// created with, so edits and removals never depend on a position taken from
/// a filtered view.
#[derive(Debug, Clone, Default)]
pub struct BookingStore {
    bookings: Vec<Booking>,
}

/// A booking from a filtered view, with its position in the full list
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct IndexedBooking {
    pub position: usize,
    #[serde(flatten)]
    pub booking: Booking,
}

impl BookingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, booking: Booking) -> Uuid {
        let id = booking.id;
        self.bookings.push(booking);
        tracing::debug!(%id, len = self.bookings.len(), "Booking added");
        id
    }

    /// Replaces the booking wholesale; only the id carries over.
    pub fn update(&mut self, id: &Uuid, booking: Booking) -> Result<(), StoreError> {
        let index = self.position(id).ok_or(StoreError::NotFound(*id))?;
        self.update_at(index, booking)
    }

    pub fn update_at(&mut self, index: usize, mut booking: Booking) -> Result<(), StoreError> {
        let len = self.bookings.len();
        let slot = self
            .bookings
            .get_mut(index)
            .ok_or(StoreError::IndexOutOfBounds { index, len })?;
        booking.id = slot.id;
        *slot = booking;
        tracing::debug!(id = %slot.id, index, "Booking updated");
        Ok(())
    }

    pub fn remove(&mut self, id: &Uuid) -> Result<Booking, StoreError> {
        let index = self.position(id).ok_or(StoreError::NotFound(*id))?;
        self.remove_at(index)
    }

    pub fn remove_at(&mut self, index: usize) -> Result<Booking, StoreError> {
        let len = self.bookings.len();
        if index >= len {
            return Err(StoreError::IndexOutOfBounds { index, len });
        }
        let removed = self.bookings.remove(index);
        tracing::debug!(id = %removed.id, index, "Booking removed");
        Ok(removed)
    }

    pub fn list(&self) -> &[Booking] {
        &self.bookings
    }

    /// Filtered view in original order, each item tagged with its original position
    pub fn list_filtered<P>(&self, predicate: P) -> Vec<IndexedBooking>
    where
        P: Fn(&Booking) -> bool,
    {
        self.bookings
            .iter()
            .enumerate()
            .filter(|(_, b)| predicate(b))
            .map(|(position, b)| IndexedBooking {
                position,
                booking: b.clone(),
            })
            .collect()
    }

    pub fn housing(&self) -> Vec<IndexedBooking> {
        self.list_filtered(|b| b.booking_type.is_housing())
    }

    pub fn get(&self, id: &Uuid) -> Option<&Booking> {
        self.bookings.iter().find(|b| &b.id == id)
    }

    pub fn position(&self, id: &Uuid) -> Option<usize> {
        self.bookings.iter().position(|b| &b.id == id)
    }

    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("Booking not found: {0}")]
    NotFound(Uuid),

    #[error("Booking index {index} out of range for {len} bookings")]
    IndexOutOfBounds { index: usize, len: usize },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BookingType;

    fn flight(title: &str) -> Booking {
        Booking::new(BookingType::Flight, title, "2024-06-01")
    }

    fn titles(store: &BookingStore) -> Vec<&str> {
        store.list().iter().map(|b| b.title.as_str()).collect()
    }

    #[test]
    fn test_add_preserves_order() {
        let mut store = BookingStore::new();
        let (b1, b2, b3) = (flight("B1"), flight("B2"), flight("B3"));
        store.add(b1.clone());
        store.add(b2.clone());
        store.add(b3.clone());
        assert_eq!(store.list(), &[b1, b2, b3]);
    }

    #[test]
    fn test_remove_shifts_left() {
        let mut store = BookingStore::new();
        for t in ["B1", "B2", "B3"] {
            store.add(flight(t));
        }
        let removed = store.remove_at(1).unwrap();
        assert_eq!(removed.title, "B2");
        assert_eq!(titles(&store), vec!["B1", "B3"]);
    }

    #[test]
    fn test_update_is_total() {
        let mut store = BookingStore::new();
        let mut b1 = flight("B1");
        b1.details = Some("window seat".to_string());
        let id = store.add(b1);
        store.add(flight("B2"));

        store.update_at(0, flight("B1'")).unwrap();
        let updated = &store.list()[0];
        assert_eq!(updated.title, "B1'");
        assert_eq!(updated.details, None);
        assert_eq!(updated.id, id);
        assert_eq!(titles(&store), vec!["B1'", "B2"]);
    }

    #[test]
    fn test_out_of_range_is_reported() {
        let mut store = BookingStore::new();
        store.add(flight("B1"));
        assert_eq!(
            store.remove_at(3),
            Err(StoreError::IndexOutOfBounds { index: 3, len: 1 })
        );
        assert_eq!(
            store.update_at(1, flight("x")),
            Err(StoreError::IndexOutOfBounds { index: 1, len: 1 })
        );
        let missing = Uuid::new_v4();
        assert_eq!(store.remove(&missing), Err(StoreError::NotFound(missing)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove_duplicate_by_id() {
        let mut store = BookingStore::new();
        let first = store.add(flight("Same"));
        let second = store.add(flight("Same"));
        store.remove(&second).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.list()[0].id, first);
    }

    #[test]
    fn test_filtered_positions_survive_duplicates() {
        let mut store = BookingStore::new();
        let stay = Booking::new(BookingType::Housing, "Loft", "2024-06-01");
        store.add(flight("B1"));
        store.add(stay.clone());
        store.add(flight("B2"));
        store.add(Booking { id: Uuid::new_v4(), ..stay });

        let housing = store.housing();
        let positions: Vec<usize> = housing.iter().map(|h| h.position).collect();
        let scanned: Vec<usize> = store
            .list()
            .iter()
            .enumerate()
            .filter(|(_, b)| b.booking_type.is_housing())
            .map(|(i, _)| i)
            .collect();
        assert_eq!(positions, scanned);
        assert_eq!(positions, vec![1, 3]);
        for item in &housing {
            assert_eq!(store.position(&item.booking.id), Some(item.position));
        }
    }
}
