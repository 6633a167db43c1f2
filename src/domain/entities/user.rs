use serde_json::json;

use super::{int_field, string_field, CatalogEntity, Record};
use crate::shared::errors::{CatalogError, CatalogResult};
use crate::shared::utils::Validator;

/// A catalog user. Login uniqueness is recommended but only the integer
/// `user_id` is enforced as a key; the email format is deliberately not
/// validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    login: String,
    password: String,
    email: String,
    user_id: i32,
}

impl User {
    pub fn new(
        login: String,
        password: String,
        email: String,
        user_id: i32,
    ) -> CatalogResult<Self> {
        Validator::validate_login(&login)?;
        Validator::validate_password(&password)?;
        Validator::validate_id("user_id", user_id)?;

        Ok(Self {
            login,
            password,
            email,
            user_id,
        })
    }

    pub fn login(&self) -> &str {
        &self.login
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn user_id(&self) -> i32 {
        self.user_id
    }
}

fn invalid(message: String) -> CatalogError {
    CatalogError::InvalidUserData(message)
}

impl CatalogEntity for User {
    const KIND: &'static str = "user";

    fn id(&self) -> i32 {
        self.user_id
    }

    fn encode(&self) -> Record {
        let mut record = Record::new();
        record.insert("kind".into(), json!("user"));
        record.insert("login".into(), json!(self.login));
        record.insert("password".into(), json!(self.password));
        record.insert("email".into(), json!(self.email));
        record.insert("user_id".into(), json!(self.user_id));
        record
    }

    fn decode(record: &Record) -> CatalogResult<Self> {
        Self::new(
            string_field(record, "login", invalid)?,
            string_field(record, "password", invalid)?,
            string_field(record, "email", invalid)?,
            int_field(record, "user_id", invalid)?,
        )
    }

    fn recognizes(record: &Record) -> bool {
        match record.get("kind").and_then(|kind| kind.as_str()) {
            Some("user") => true,
            Some(_) => false,
            None => record.contains_key("login"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> User {
        User::new(
            "alice".to_string(),
            "hunter2".to_string(),
            "alice@example.com".to_string(),
            7,
        )
        .unwrap()
    }

    #[test]
    fn test_user_construction_validates_fields() {
        assert_eq!(alice().user_id(), 7);

        let empty_login = User::new(String::new(), "pw".to_string(), String::new(), 1);
        assert!(matches!(empty_login, Err(CatalogError::Validation(_))));

        let negative_id = User::new("bob".to_string(), "pw".to_string(), String::new(), -3);
        assert!(matches!(negative_id, Err(CatalogError::Validation(_))));
    }

    #[test]
    fn test_email_format_is_not_validated() {
        let user = User::new(
            "bob".to_string(),
            "pw".to_string(),
            "not-an-email".to_string(),
            2,
        );
        assert!(user.is_ok());
    }

    #[test]
    fn test_user_round_trip() {
        let user = alice();
        let decoded = User::decode(&user.encode()).unwrap();
        assert_eq!(decoded, user);
    }

    #[test]
    fn test_decode_rejects_missing_field() {
        let mut record = alice().encode();
        record.remove("password");

        let err = User::decode(&record).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidUserData(ref msg) if msg.contains("password")));
    }
}
