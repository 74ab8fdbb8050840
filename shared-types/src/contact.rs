use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub number: String,
}

impl Contact {
    pub fn new(id: impl Into<String>, name: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            number: number.into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export)]
pub struct CreateContactRequest {
    pub name: String,
    pub number: String,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export)]
pub struct FilterChangeRequest {
    pub filter: String,
}

#[derive(Debug, Serialize, TS)]
#[ts(export)]
pub struct ContactsResponse {
    pub contacts: Vec<Contact>,
    pub filter: String,
}

/// Which field of a new contact collided with an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum DuplicateField {
    Name,
    Number,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, thiserror::Error)]
#[ts(export)]
#[error("{value} is already in contacts")]
pub struct DuplicateError {
    pub field: DuplicateField,
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_shape() {
        let contacts = vec![
            Contact::new("id-1", "Rosie Simpson", "459-12-56"),
            Contact::new("id-2", "Hermione Kline", "443-89-12"),
        ];

        let json = serde_json::to_string(&contacts).unwrap();
        assert_eq!(
            json,
            r#"[{"id":"id-1","name":"Rosie Simpson","number":"459-12-56"},{"id":"id-2","name":"Hermione Kline","number":"443-89-12"}]"#
        );

        let restored: Vec<Contact> = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, contacts);
    }

    #[test]
    fn test_duplicate_error_message() {
        let err = DuplicateError {
            field: DuplicateField::Number,
            value: "459-12-56".to_string(),
        };
        assert_eq!(err.to_string(), "459-12-56 is already in contacts");
    }
}
