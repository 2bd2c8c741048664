//! Seat map derivation.
//!
//! The service has no real inventory feed, so occupancy is simulated: each
//! seat is drawn occupied with a fixed probability from an RNG seeded by
//! the flight id. The seed makes a flight's map stable across requests and
//! across viewers, instead of reshuffling on every page load. Seats held
//! by confirmed bookings in the ledger are then overlaid as occupied, so a
//! seat booked through this process never shows as available again.

use std::collections::BTreeMap;
use std::hash::{DefaultHasher, Hash, Hasher};

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    error::AppError,
    models::flight::{SeatMapResponse, SeatStatus},
    store::Store,
};

/// Seat letters within a row, aisle between C and D.
pub const SEAT_LETTERS: [char; 6] = ['A', 'B', 'C', 'D', 'E', 'F'];

/// Probability that the simulation marks a seat occupied.
const OCCUPIED_PROBABILITY: f64 = 0.3;

/// Build the seat map for one flight.
///
/// Rows are numbered from 1; seat codes are row number plus letter
/// ("1A".."{rows}F"). Returns [`AppError::FlightNotFound`] for an unknown
/// flight id.
pub fn seat_map(store: &Store, flight_id: &str, rows: u32) -> Result<SeatMapResponse, AppError> {
    let flight = store.flight(flight_id).ok_or(AppError::FlightNotFound)?;

    let mut rng = StdRng::seed_from_u64(seed_for(&flight.id));
    let mut seats = BTreeMap::new();

    for row in 1..=rows {
        for letter in SEAT_LETTERS {
            let status = if rng.random_bool(OCCUPIED_PROBABILITY) {
                SeatStatus::Occupied
            } else {
                SeatStatus::Available
            };
            seats.insert(format!("{row}{letter}"), status);
        }
    }

    // Ledger truth wins over the simulation
    for seat in store.booked_seats(flight_id) {
        if let Some(status) = seats.get_mut(&seat) {
            *status = SeatStatus::Occupied;
        }
    }

    Ok(SeatMapResponse {
        flight_id: flight.id,
        rows,
        seats,
    })
}

/// Stable per-flight RNG seed.
///
/// `DefaultHasher::new()` uses fixed keys, so the same flight id hashes
/// to the same seed across requests and process restarts.
fn seed_for(flight_id: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    flight_id.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::booking::Booking;
    use chrono::Utc;

    #[test]
    fn maps_cover_the_whole_cabin() {
        let store = Store::new();
        store.seed_flights();

        let map = seat_map(&store, "FL001", 30).unwrap();
        assert_eq!(map.flight_id, "FL001");
        assert_eq!(map.rows, 30);
        assert_eq!(map.seats.len(), 180);
        assert!(map.seats.contains_key("1A"));
        assert!(map.seats.contains_key("30F"));
        assert!(!map.seats.contains_key("31A"));
    }

    #[test]
    fn maps_are_stable_per_flight() {
        let store = Store::new();
        store.seed_flights();

        let first = seat_map(&store, "FL001", 30).unwrap();
        let second = seat_map(&store, "FL001", 30).unwrap();
        assert_eq!(first.seats, second.seats);
    }

    #[test]
    fn booked_seats_override_the_simulation() {
        let store = Store::new();
        store.seed_flights();

        // Find a seat the simulation leaves available, then book it
        let before = seat_map(&store, "FL001", 30).unwrap();
        let (seat, _) = before
            .seats
            .iter()
            .find(|(_, status)| **status == SeatStatus::Available)
            .expect("a 30-row map has at least one available seat");

        store
            .try_insert_booking(Booking {
                id: "SK123456".to_string(),
                booking_reference: "SK123456".to_string(),
                flight_id: "FL001".to_string(),
                passengers: vec![],
                seats: vec![seat.clone()],
                total_price: 450.0,
                booking_date: Utc::now(),
                payment_status: "completed".to_string(),
            })
            .unwrap();

        let after = seat_map(&store, "FL001", 30).unwrap();
        assert_eq!(after.seats[seat], SeatStatus::Occupied);

        // Other flights are unaffected
        let other = seat_map(&store, "FL002", 30).unwrap();
        assert_eq!(other.seats.len(), 180);
    }

    #[test]
    fn unknown_flights_have_no_map() {
        let store = Store::new();
        store.seed_flights();
        assert!(matches!(
            seat_map(&store, "FL999", 30).unwrap_err(),
            AppError::FlightNotFound
        ));
    }
}
