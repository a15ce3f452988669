use uuid::Uuid;

use crate::draft::{BookingDraft, ValidationError};
use crate::models::Booking;
use crate::store::{BookingStore, StoreError};

/// Discrete user actions applied to a session
#[derive(Debug, Clone)]
pub enum Command {
    AddBooking(BookingDraft),
    UpdateBooking { id: Uuid, draft: BookingDraft },
    RemoveBooking(Uuid),
    OpenEditForm(Uuid),
    CancelEdit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Added(Uuid),
    Updated(Uuid),
    Removed(Booking),
    EditOpened(BookingDraft),
    EditCancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// State owned by one browser session: its bookings and the booking being edited, if any
#[derive(Debug, Clone, Default)]
pub struct TripSession {
    pub store: BookingStore,
    pub editing: Option<Uuid>,
}

impl TripSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a command. On error the session is left unchanged.
    pub fn dispatch(&mut self, command: Command) -> Result<Outcome, CommandError> {
        match command {
            Command::AddBooking(draft) => {
                let booking = draft.into_booking()?;
                Ok(Outcome::Added(self.store.add(booking)))
            }
            Command::UpdateBooking { id, draft } => {
                if self.store.get(&id).is_none() {
                    return Err(StoreError::NotFound(id).into());
                }
                let booking = draft.into_booking()?;
                self.store.update(&id, booking)?;
                self.editing = None;
                Ok(Outcome::Updated(id))
            }
            Command::RemoveBooking(id) => {
                let removed = self.store.remove(&id)?;
                if self.editing == Some(id) {
                    self.editing = None;
                }
                Ok(Outcome::Removed(removed))
            }
            Command::OpenEditForm(id) => {
                let booking = self.store.get(&id).ok_or(StoreError::NotFound(id))?;
                let draft = BookingDraft::from_booking(booking);
                self.editing = Some(id);
                Ok(Outcome::EditOpened(draft))
            }
            Command::CancelEdit => {
                self.editing = None;
                Ok(Outcome::EditCancelled)
            }
        }
    }

    /// The booking currently open in the edit form, if it still exists
    pub fn editing_booking(&self) -> Option<&Booking> {
        self.editing.as_ref().and_then(|id| self.store.get(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BookingType;

    fn draft(booking_type: BookingType, title: &str) -> BookingDraft {
        BookingDraft {
            title: title.to_string(),
            start_date: "2024-06-01".to_string(),
            ..BookingDraft::new(booking_type)
        }
    }

    #[test]
    fn test_rejected_add_leaves_store_unchanged() {
        let mut session = TripSession::new();
        let result = session.dispatch(Command::AddBooking(draft(BookingType::Flight, "")));
        assert_eq!(result, Err(CommandError::Validation(ValidationError::TitleRequired)));
        assert!(session.store.is_empty());

        let result = session.dispatch(Command::AddBooking(draft(BookingType::Housing, "")));
        assert!(matches!(result, Ok(Outcome::Added(_))));
        assert_eq!(session.store.len(), 1);
    }

    #[test]
    fn test_edit_flow() {
        let mut session = TripSession::new();
        let Outcome::Added(id) = session
            .dispatch(Command::AddBooking(draft(BookingType::Train, "Eurostar")))
            .unwrap()
        else {
            panic!("expected Added");
        };

        let Outcome::EditOpened(mut form) = session.dispatch(Command::OpenEditForm(id)).unwrap() else {
            panic!("expected EditOpened");
        };
        assert_eq!(session.editing, Some(id));
        assert_eq!(form.title, "Eurostar");

        form.title = "Thalys".to_string();
        form.end_date = "2024-06-02".to_string();
        assert_eq!(
            session.dispatch(Command::UpdateBooking { id, draft: form }).unwrap(),
            Outcome::Updated(id)
        );
        assert_eq!(session.editing, None);
        let updated = session.store.get(&id).unwrap();
        assert_eq!(updated.title, "Thalys");
        assert_eq!(updated.date, "2024-06-01 → 2024-06-02");
    }

    #[test]
    fn test_invalid_update_keeps_edit_open() {
        let mut session = TripSession::new();
        let id = session.store.add(Booking::new(BookingType::Flight, "JFK → CDG", "2024-06-01"));
        session.dispatch(Command::OpenEditForm(id)).unwrap();

        let result = session.dispatch(Command::UpdateBooking {
            id,
            draft: draft(BookingType::Flight, ""),
        });
        assert!(matches!(result, Err(CommandError::Validation(_))));
        assert_eq!(session.editing, Some(id));
        assert_eq!(session.store.get(&id).unwrap().title, "JFK → CDG");
    }

    #[test]
    fn test_remove_clears_editing() {
        let mut session = TripSession::new();
        let id = session.store.add(Booking::new(BookingType::Activity, "Louvre", "2024-06-02"));
        session.dispatch(Command::OpenEditForm(id)).unwrap();
        session.dispatch(Command::RemoveBooking(id)).unwrap();
        assert_eq!(session.editing, None);
        assert!(session.store.is_empty());
    }

    #[test]
    fn test_stale_id_is_not_found() {
        let mut session = TripSession::new();
        let stale = Uuid::new_v4();
        assert_eq!(
            session.dispatch(Command::RemoveBooking(stale)),
            Err(CommandError::Store(StoreError::NotFound(stale)))
        );
        assert!(session.dispatch(Command::OpenEditForm(stale)).is_err());
        assert_eq!(session.editing, None);
    }
}
