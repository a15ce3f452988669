pub mod models;
pub mod dates;
pub mod draft;
pub mod store;
pub mod infer;
pub mod session;

pub use models::{Booking, BookingType};
pub use draft::{BookingDraft, ValidationError};
pub use store::{BookingStore, IndexedBooking, StoreError};
pub use infer::{infer_listing, ListingGuess};
pub use session::{Command, CommandError, Outcome, TripSession};
