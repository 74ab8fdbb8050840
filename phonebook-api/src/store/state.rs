use shared_types::Contact;

/// Immutable snapshot of the phonebook. Only `items` is ever persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhonebookState {
    pub items: Vec<Contact>,
    pub filter: String,
}

impl PhonebookState {
    pub fn with_items(items: Vec<Contact>) -> Self {
        Self {
            items,
            filter: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    AddContact(Contact),
    RemoveContact(String),
    FilterChange(String),
}

impl Action {
    /// Whether applying this action changes what goes into the persisted slot
    pub fn touches_items(&self) -> bool {
        !matches!(self, Action::FilterChange(_))
    }
}

/// Applies `action` to `state` and returns the next snapshot.
///
/// Duplicate checks happen before dispatch; the reducer itself never fails.
pub fn reduce(state: &PhonebookState, action: Action) -> PhonebookState {
    match action {
        Action::AddContact(contact) => {
            let mut items = Vec::with_capacity(state.items.len() + 1);
            items.push(contact);
            items.extend(state.items.iter().cloned());
            PhonebookState {
                items,
                filter: state.filter.clone(),
            }
        }
        Action::RemoveContact(id) => PhonebookState {
            items: state
                .items
                .iter()
                .filter(|item| item.id != id)
                .cloned()
                .collect(),
            filter: state.filter.clone(),
        },
        Action::FilterChange(filter) => PhonebookState {
            items: state.items.clone(),
            filter,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed_contacts;

    #[test]
    fn test_add_prepends() {
        let state = PhonebookState::with_items(seed_contacts());
        let contact = Contact::new("new", "Jacob Mercer", "555-00-11");

        let next = reduce(&state, Action::AddContact(contact.clone()));

        assert_eq!(next.items.len(), 5);
        assert_eq!(next.items[0], contact);
        assert_eq!(&next.items[1..], &state.items[..]);
        assert_eq!(state.items.len(), 4);
    }

    #[test]
    fn test_remove_missing_id_is_noop() {
        let state = PhonebookState::with_items(seed_contacts());
        let next = reduce(&state, Action::RemoveContact("missing".to_string()));
        assert_eq!(next, state);
    }

    #[test]
    fn test_remove_keeps_order() {
        let state = PhonebookState::with_items(seed_contacts());
        let next = reduce(&state, Action::RemoveContact("id-2".to_string()));

        let ids: Vec<&str> = next.items.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["id-1", "id-3", "id-4"]);
    }

    #[test]
    fn test_filter_change_leaves_items() {
        let state = PhonebookState::with_items(seed_contacts());
        let next = reduce(&state, Action::FilterChange("ros".to_string()));

        assert_eq!(next.filter, "ros");
        assert_eq!(next.items, state.items);
        assert!(!Action::FilterChange(String::new()).touches_items());
        assert!(Action::RemoveContact(String::new()).touches_items());
    }
}
