//! Owner-scoped ticket operations. Every lookup goes through the owner id, so
//! a foreign ticket behaves exactly like a missing one.

use chrono::Utc;
use tracing::{info, warn};

use supportly_store::TicketBook;
use supportly_types::api::TicketForm;
use supportly_types::models::{Ticket, TicketId, TicketStats, TicketStatus, UserId};

use crate::error::ApiError;

const MIN_TITLE_CHARS: usize = 3;

struct ValidTicket {
    title: String,
    description: String,
    status: TicketStatus,
}

fn validate(form: &TicketForm) -> Result<ValidTicket, ApiError> {
    let title = form.title.trim();
    let mut errors = Vec::new();

    if title.is_empty() {
        errors.push("Ticket title is required".to_string());
    } else if title.chars().count() < MIN_TITLE_CHARS {
        errors.push("Title must be at least 3 characters".to_string());
    }

    let status = form.status.parse::<TicketStatus>();
    if status.is_err() {
        errors.push("Invalid status selected".to_string());
    }

    match status {
        Ok(status) if errors.is_empty() => Ok(ValidTicket {
            title: title.to_string(),
            description: form.description.trim().to_string(),
            status,
        }),
        _ => Err(ApiError::Validation(errors)),
    }
}

pub fn create(book: &mut TicketBook, owner: UserId, form: &TicketForm) -> Result<Ticket, ApiError> {
    let valid = validate(form)?;
    let ticket = book
        .insert(owner, valid.title, valid.description, valid.status, Utc::now())
        .clone();

    info!("User {} created ticket {}", owner, ticket.id);
    Ok(ticket)
}

pub fn list(book: &TicketBook, owner: UserId) -> Vec<Ticket> {
    book.owned_by(owner).cloned().collect()
}

pub fn find(book: &TicketBook, ticket_id: TicketId, owner: UserId) -> Option<Ticket> {
    book.get_owned(ticket_id, owner).cloned()
}

/// Validation runs first. A `ticket_id` of `None` (unparsable input) matches
/// no ticket.
pub fn update(
    book: &mut TicketBook,
    ticket_id: Option<TicketId>,
    owner: UserId,
    form: &TicketForm,
) -> Result<Ticket, ApiError> {
    let valid = validate(form)?;

    let Some(ticket) = ticket_id.and_then(|id| book.get_owned_mut(id, owner)) else {
        warn!("User {} tried to update unavailable ticket {:?}", owner, ticket_id);
        return Err(ApiError::NotFoundOrUnauthorized);
    };

    ticket.title = valid.title;
    ticket.description = valid.description;
    ticket.status = valid.status;
    ticket.updated_at = Some(Utc::now());

    info!("User {} updated ticket {}", owner, ticket.id);
    Ok(ticket.clone())
}

pub fn delete(
    book: &mut TicketBook,
    ticket_id: Option<TicketId>,
    owner: UserId,
) -> Result<Ticket, ApiError> {
    let Some(ticket) = ticket_id.and_then(|id| book.remove_owned(id, owner)) else {
        warn!("User {} tried to delete unavailable ticket {:?}", owner, ticket_id);
        return Err(ApiError::NotFoundOrUnauthorized);
    };

    info!("User {} deleted ticket {}", owner, ticket.id);
    Ok(ticket)
}

pub fn stats(book: &TicketBook, owner: UserId) -> TicketStats {
    TicketStats::from_tickets(book.owned_by(owner))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANN: UserId = 1;
    const BOB: UserId = 2;

    fn form(title: &str, status: &str) -> TicketForm {
        TicketForm {
            title: title.into(),
            description: String::new(),
            status: status.into(),
        }
    }

    fn validation_messages(result: Result<Ticket, ApiError>) -> Vec<String> {
        match result {
            Err(ApiError::Validation(messages)) => messages,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn create_assigns_sequential_ids() {
        let mut book = TicketBook::default();
        let first = create(&mut book, ANN, &form("Printer broken", "Open")).unwrap();
        let second = create(&mut book, BOB, &form("VPN down", "Ongoing")).unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(first.owner_user_id, ANN);
        assert_eq!(first.status, TicketStatus::Open);
        assert_eq!(first.updated_at, None);
        assert_eq!(second.id, 2);
    }

    #[test]
    fn create_rejects_bad_input() {
        let mut book = TicketBook::default();
        assert_eq!(
            validation_messages(create(&mut book, ANN, &form("   ", "Open"))),
            vec!["Ticket title is required"]
        );
        assert_eq!(
            validation_messages(create(&mut book, ANN, &form("ab", "Closed"))),
            vec!["Title must be at least 3 characters", "Invalid status selected"]
        );
        assert!(book.is_empty());
    }

    #[test]
    fn list_only_returns_own_tickets() {
        let mut book = TicketBook::default();
        let a1 = create(&mut book, ANN, &form("first", "Open")).unwrap();
        create(&mut book, BOB, &form("other", "Open")).unwrap();
        let a2 = create(&mut book, ANN, &form("second", "Resolved")).unwrap();

        let mine = list(&book, ANN);
        assert_eq!(mine, vec![a1, a2]);
        assert!(list(&book, BOB).iter().all(|t| t.owner_user_id == BOB));
    }

    #[test]
    fn update_changes_fields_and_stamps() {
        let mut book = TicketBook::default();
        let ticket = create(&mut book, ANN, &form("Printer broken", "Open")).unwrap();

        let edit = TicketForm {
            title: "Printer fixed".into(),
            description: "  toner replaced ".into(),
            status: "Resolved".into(),
        };
        let updated = update(&mut book, Some(ticket.id), ANN, &edit).unwrap();
        assert_eq!(updated.title, "Printer fixed");
        assert_eq!(updated.description, "toner replaced");
        assert_eq!(updated.status, TicketStatus::Resolved);
        assert!(updated.updated_at.is_some());
        assert_eq!(find(&book, ticket.id, ANN), Some(updated));
    }

    #[test]
    fn non_owner_cannot_touch_ticket() {
        let mut book = TicketBook::default();
        let ticket = create(&mut book, ANN, &form("Printer broken", "Open")).unwrap();

        let existing = update(&mut book, Some(ticket.id), BOB, &form("hijacked", "Open"));
        let missing = update(&mut book, Some(42), BOB, &form("hijacked", "Open"));
        assert!(matches!(existing, Err(ApiError::NotFoundOrUnauthorized)));
        assert!(matches!(missing, Err(ApiError::NotFoundOrUnauthorized)));

        assert!(matches!(
            delete(&mut book, Some(ticket.id), BOB),
            Err(ApiError::NotFoundOrUnauthorized)
        ));
        assert!(matches!(
            delete(&mut book, None, ANN),
            Err(ApiError::NotFoundOrUnauthorized)
        ));

        assert_eq!(find(&book, ticket.id, ANN).unwrap().title, "Printer broken");
        assert_eq!(find(&book, ticket.id, BOB), None);
    }

    #[test]
    fn update_validates_before_lookup() {
        let mut book = TicketBook::default();
        assert_eq!(
            validation_messages(update(&mut book, Some(99), ANN, &form("", "Open"))),
            vec!["Ticket title is required"]
        );
    }

    #[test]
    fn stats_match_listing() {
        let mut book = TicketBook::default();
        for (title, status) in [("one", "Open"), ("two", "Ongoing"), ("three", "Resolved"), ("four", "Open")] {
            create(&mut book, ANN, &form(title, status)).unwrap();
        }
        create(&mut book, BOB, &form("bob's", "Open")).unwrap();

        let counts = stats(&book, ANN);
        assert_eq!(counts.total, list(&book, ANN).len());
        assert_eq!(counts.total, counts.open + counts.ongoing + counts.resolved);
        assert_eq!((counts.open, counts.ongoing, counts.resolved), (2, 1, 1));
    }

    #[test]
    fn deleted_id_is_not_reused() {
        let mut book = TicketBook::default();
        create(&mut book, ANN, &form("first", "Open")).unwrap();
        let second = create(&mut book, ANN, &form("second", "Open")).unwrap();
        delete(&mut book, Some(second.id), ANN).unwrap();

        let third = create(&mut book, ANN, &form("third", "Open")).unwrap();
        assert_eq!(third.id, 3);
        assert_eq!(list(&book, ANN).len(), 2);
    }
}
