use shared_types::Contact;

/// Contacts whose name contains `filter`, ignoring case, in collection order.
/// An empty filter matches every contact.
pub fn visible_contacts(contacts: &[Contact], filter: &str) -> Vec<Contact> {
    let normalized_filter = filter.to_lowercase();

    contacts
        .iter()
        .filter(|contact| contact.name.to_lowercase().contains(&normalized_filter))
        .cloned()
        .collect()
}
