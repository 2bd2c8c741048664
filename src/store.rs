//! In-memory ledgers acting as the system of record.
//!
//! This module replaces a database layer: each entity type lives in a
//! process-wide map behind a `parking_lot::RwLock`. Nothing is persisted,
//! so every ledger resets to its seeded state on restart.
//!
//! Handlers never touch the maps directly; they go through the typed
//! methods on [`Store`]. Tests construct their own `Store`, which is what
//! makes the storage substitutable without touching handler logic.
//!
//! Lock guards are taken and dropped inside each method and are never
//! held across an `.await`.

use std::collections::{BTreeMap, HashMap, btree_map};
use std::sync::Arc;

use parking_lot::RwLock;
use uuid::Uuid;

use crate::config::Config;
use crate::models::{
    booking::{Booking, BookingDraft},
    flight::Flight,
    user::User,
};

/// Shared application state handed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    pub config: Config,
}

/// The three ledgers plus the draft table.
///
/// - `users`: account directory, keyed by user id
/// - `flights`: flight catalog, keyed by flight id, seeded at startup
/// - `bookings`: booking ledger, keyed by booking reference
/// - `drafts`: in-progress booking wizards, keyed by draft id
#[derive(Default)]
pub struct Store {
    users: RwLock<HashMap<Uuid, User>>,
    flights: RwLock<BTreeMap<String, Flight>>,
    bookings: RwLock<BTreeMap<String, Booking>>,
    drafts: RwLock<HashMap<Uuid, BookingDraft>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Populate the flight catalog with the static sample flights.
    ///
    /// Called once at startup; the catalog is immutable afterwards.
    /// Returns the number of flights seeded.
    pub fn seed_flights(&self) -> usize {
        let sample = sample_flights();
        let count = sample.len();

        let mut flights = self.flights.write();
        for flight in sample {
            flights.insert(flight.id.clone(), flight);
        }

        count
    }

    // --- Flight catalog ---

    /// All flights in catalog order.
    pub fn flights(&self) -> Vec<Flight> {
        self.flights.read().values().cloned().collect()
    }

    /// Exact-key flight lookup.
    pub fn flight(&self, id: &str) -> Option<Flight> {
        self.flights.read().get(id).cloned()
    }

    // --- Account directory ---

    /// Insert a user unless their email is already taken.
    ///
    /// The uniqueness check and the insert happen under one write lock,
    /// so two concurrent registrations for the same email cannot both
    /// succeed.
    pub fn insert_user_unique(&self, user: User) -> bool {
        let mut users = self.users.write();

        if users.values().any(|u| u.email == user.email) {
            return false;
        }

        users.insert(user.id, user);
        true
    }

    pub fn find_user_by_email(&self, email: &str) -> Option<User> {
        self.users.read().values().find(|u| u.email == email).cloned()
    }

    pub fn user(&self, id: Uuid) -> Option<User> {
        self.users.read().get(&id).cloned()
    }

    // --- Booking ledger ---

    /// Insert a booking unless its reference is already taken.
    ///
    /// Returns a clone of the stored record on success and hands the
    /// booking back on collision so the caller can re-derive a reference.
    /// Check and insert happen under one write lock: two bookings landing
    /// on the same timestamp-derived reference can no longer silently
    /// overwrite each other.
    pub fn try_insert_booking(&self, booking: Booking) -> Result<Booking, Booking> {
        let mut bookings = self.bookings.write();

        match bookings.entry(booking.booking_reference.clone()) {
            btree_map::Entry::Occupied(_) => Err(booking),
            btree_map::Entry::Vacant(slot) => Ok(slot.insert(booking).clone()),
        }
    }

    /// Exact-key booking lookup by reference.
    pub fn booking(&self, reference: &str) -> Option<Booking> {
        self.bookings.read().get(reference).cloned()
    }

    /// All bookings, in reference order.
    pub fn bookings(&self) -> Vec<Booking> {
        self.bookings.read().values().cloned().collect()
    }

    /// Seat codes already held by confirmed bookings on one flight.
    pub fn booked_seats(&self, flight_id: &str) -> Vec<String> {
        self.bookings
            .read()
            .values()
            .filter(|b| b.flight_id == flight_id)
            .flat_map(|b| b.seats.iter().cloned())
            .collect()
    }

    // --- Booking drafts ---

    pub fn insert_draft(&self, draft: BookingDraft) {
        self.drafts.write().insert(draft.id, draft);
    }

    pub fn draft(&self, id: Uuid) -> Option<BookingDraft> {
        self.drafts.read().get(&id).cloned()
    }

    /// Apply a step update to a draft in place.
    ///
    /// Returns the updated draft, or `None` when no draft exists under
    /// the id.
    pub fn update_draft(
        &self,
        id: Uuid,
        apply: impl FnOnce(&mut BookingDraft),
    ) -> Option<BookingDraft> {
        let mut drafts = self.drafts.write();
        let draft = drafts.get_mut(&id)?;
        apply(draft);
        Some(draft.clone())
    }

    pub fn remove_draft(&self, id: Uuid) -> Option<BookingDraft> {
        self.drafts.write().remove(&id)
    }

    // --- Health ---

    /// (users, flights, bookings) counts for the health endpoint.
    pub fn counts(&self) -> (usize, usize, usize) {
        (
            self.users.read().len(),
            self.flights.read().len(),
            self.bookings.read().len(),
        )
    }
}

/// The static seed catalog.
fn sample_flights() -> Vec<Flight> {
    vec![
        Flight {
            id: "FL001".to_string(),
            airline: "SkyAir".to_string(),
            flight_number: "SA-101".to_string(),
            from: "New York (JFK)".to_string(),
            to: "London (LHR)".to_string(),
            departure_time: "2024-12-20T10:00:00".to_string(),
            arrival_time: "2024-12-20T22:00:00".to_string(),
            duration: "7h 30m".to_string(),
            price: 450.0,
            available_seats: 45,
            total_seats: 180,
        },
        Flight {
            id: "FL002".to_string(),
            airline: "AeroGlobal".to_string(),
            flight_number: "AG-205".to_string(),
            from: "New York (JFK)".to_string(),
            to: "London (LHR)".to_string(),
            departure_time: "2024-12-20T14:30:00".to_string(),
            arrival_time: "2024-12-21T02:30:00".to_string(),
            duration: "8h 00m".to_string(),
            price: 380.0,
            available_seats: 78,
            total_seats: 180,
        },
        Flight {
            id: "FL003".to_string(),
            airline: "SkyAir".to_string(),
            flight_number: "SA-102".to_string(),
            from: "New York (JFK)".to_string(),
            to: "London (LHR)".to_string(),
            departure_time: "2024-12-21T08:00:00".to_string(),
            arrival_time: "2024-12-21T20:00:00".to_string(),
            duration: "7h 30m".to_string(),
            price: 520.0,
            available_seats: 12,
            total_seats: 180,
        },
    ]
}
