//! The contact store: the only place the contact list changes.
//!
//! Every mutation is a [`state::Action`] run through the pure
//! [`state::reduce`]. Mutations that touch the list are written to the
//! injected [`ContactStorage`] before the new snapshot replaces the old one,
//! so a failed write leaves the store as it was.

pub mod duplicate_guard;
pub mod filter_view;
pub mod state;

pub use duplicate_guard::{is_duplicate, DuplicateCheck};
pub use filter_view::visible_contacts;
pub use state::{reduce, Action, PhonebookState};

use crate::storage::ContactStorage;
use shared_types::{Contact, DuplicateError};

#[derive(Debug, thiserror::Error)]
pub enum ContactStoreError {
    #[error(transparent)]
    Duplicate(#[from] DuplicateError),

    #[error("Contact {0} must not be empty")]
    EmptyField(&'static str),

    #[error("Failed to persist contacts: {0:#}")]
    Storage(anyhow::Error),
}

impl From<anyhow::Error> for ContactStoreError {
    fn from(err: anyhow::Error) -> Self {
        ContactStoreError::Storage(err)
    }
}

/// The four sample contacts used when nothing has been persisted yet
pub fn seed_contacts() -> Vec<Contact> {
    vec![
        Contact::new("id-1", "Rosie Simpson", "459-12-56"),
        Contact::new("id-2", "Hermione Kline", "443-89-12"),
        Contact::new("id-3", "Eden Clements", "645-17-79"),
        Contact::new("id-4", "Annie Copeland", "227-91-26"),
    ]
}

pub struct ContactStore {
    state: PhonebookState,
    storage: Box<dyn ContactStorage>,
}

impl ContactStore {
    /// Loads the persisted list, falling back to the seed contacts when the
    /// slot is empty. The filter always starts out empty.
    pub fn open(storage: Box<dyn ContactStorage>) -> anyhow::Result<Self> {
        let items = match storage.load()? {
            Some(items) => {
                tracing::info!("Loaded {} contacts from storage", items.len());
                items
            }
            None => {
                tracing::info!("No saved contacts found, starting from seed list");
                seed_contacts()
            }
        };

        Ok(Self {
            state: PhonebookState::with_items(items),
            storage,
        })
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.state.items
    }

    pub fn filter(&self) -> &str {
        &self.state.filter
    }

    pub fn visible_contacts(&self) -> Vec<Contact> {
        visible_contacts(&self.state.items, &self.state.filter)
    }

    pub fn add_contact(&mut self, name: &str, number: &str) -> Result<Contact, ContactStoreError> {
        if name.is_empty() {
            return Err(ContactStoreError::EmptyField("name"));
        }
        if number.is_empty() {
            return Err(ContactStoreError::EmptyField("number"));
        }

        if let Some(err) = is_duplicate(&self.state.items, name, number).into_error(name, number) {
            tracing::info!("Rejected contact: {}", err);
            return Err(err.into());
        }

        let contact = Contact::new(uuid::Uuid::new_v4().to_string(), name, number);
        self.dispatch(Action::AddContact(contact.clone()))?;

        tracing::info!("Added contact {} ({})", contact.name, contact.id);
        Ok(contact)
    }

    /// Removing an id that is not present is not an error.
    pub fn remove_contact(&mut self, id: &str) -> Result<(), ContactStoreError> {
        let before = self.state.items.len();
        self.dispatch(Action::RemoveContact(id.to_string()))?;

        if self.state.items.len() < before {
            tracing::info!("Removed contact {}", id);
        } else {
            tracing::debug!("No contact with id {}, nothing removed", id);
        }
        Ok(())
    }

    pub fn set_filter(&mut self, filter: &str) {
        self.state = reduce(&self.state, Action::FilterChange(filter.to_string()));
    }

    fn dispatch(&mut self, action: Action) -> Result<(), ContactStoreError> {
        let persist = action.touches_items();
        let next = reduce(&self.state, action);

        if persist {
            self.storage.save(&next.items)?;
        }

        self.state = next;
        Ok(())
    }
}
