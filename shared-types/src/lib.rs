pub mod contact;

pub use contact::{
    Contact, ContactsResponse, CreateContactRequest, DuplicateError, DuplicateField,
    FilterChangeRequest,
};
