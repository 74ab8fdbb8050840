use shared_types::{Contact, DuplicateError, DuplicateField};

/// Result of checking a candidate contact against the collection.
///
/// Both fields are checked independently, so a candidate may collide on
/// name and number at the same time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DuplicateCheck {
    pub name_conflict: bool,
    pub number_conflict: bool,
}

impl DuplicateCheck {
    /// Converts a failed check into the error shown to the user. The name
    /// conflict wins when both fields collide.
    pub fn into_error(self, name: &str, number: &str) -> Option<DuplicateError> {
        if self.name_conflict {
            Some(DuplicateError {
                field: DuplicateField::Name,
                value: name.to_string(),
            })
        } else if self.number_conflict {
            Some(DuplicateError {
                field: DuplicateField::Number,
                value: number.to_string(),
            })
        } else {
            None
        }
    }
}

/// Exact, case-sensitive comparison of `name` and `number` against every
/// existing contact. No trimming or normalization is applied.
pub fn is_duplicate(contacts: &[Contact], name: &str, number: &str) -> DuplicateCheck {
    DuplicateCheck {
        name_conflict: contacts.iter().any(|contact| contact.name == name),
        number_conflict: contacts.iter().any(|contact| contact.number == number),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed_contacts;

    #[test]
    fn test_no_conflict() {
        let check = is_duplicate(&seed_contacts(), "Jacob Mercer", "555-00-11");
        assert_eq!(check, DuplicateCheck::default());
        assert_eq!(check.into_error("Jacob Mercer", "555-00-11"), None);
    }

    #[test]
    fn test_name_and_number_checked_independently() {
        let contacts = seed_contacts();

        let check = is_duplicate(&contacts, "Rosie Simpson", "000-00-00");
        assert!(check.name_conflict);
        assert!(!check.number_conflict);

        let check = is_duplicate(&contacts, "Someone Else", "443-89-12");
        assert!(!check.name_conflict);
        assert!(check.number_conflict);
    }

    #[test]
    fn test_comparison_is_exact() {
        let contacts = seed_contacts();

        let clear = DuplicateCheck::default();
        assert_eq!(is_duplicate(&contacts, "rosie simpson", "x"), clear);
        assert_eq!(is_duplicate(&contacts, "Rosie Simpson ", "x"), clear);
        assert_eq!(is_duplicate(&contacts, "x", " 459-12-56"), clear);
    }

    #[test]
    fn test_name_conflict_reported_first() {
        let check = is_duplicate(&seed_contacts(), "Eden Clements", "227-91-26");
        assert!(check.name_conflict && check.number_conflict);

        let err = check.into_error("Eden Clements", "227-91-26").unwrap();
        assert_eq!(err.field, DuplicateField::Name);
        assert_eq!(err.to_string(), "Eden Clements is already in contacts");
    }
}
