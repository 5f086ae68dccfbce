use serde::{Deserialize, Serialize};

/// Delivery addresses for one dispatch.
///
/// Both fields are optional. A recipient with neither address is legal; the
/// dispatcher reports both channels as skipped rather than erroring. The
/// phone number is expected in E.164 format (`+<countrycode><number>`) and
/// is validated by the SMS channel, not here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Recipient {
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl Recipient {
    /// A recipient reachable by email only.
    pub fn email(address: impl Into<String>) -> Self {
        Self {
            email: Some(address.into()),
            phone: None,
        }
    }

    /// A recipient reachable by SMS only.
    pub fn phone(number: impl Into<String>) -> Self {
        Self {
            email: None,
            phone: Some(number.into()),
        }
    }

    /// A recipient reachable on both channels.
    pub fn new(email: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            phone: Some(phone.into()),
        }
    }

    /// `true` when no delivery address is present at all.
    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.phone.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_recipient_is_empty() {
        assert!(Recipient::default().is_empty());
    }

    #[test]
    fn single_channel_recipients_are_not_empty() {
        assert!(!Recipient::email("a@b.com").is_empty());
        assert!(!Recipient::phone("+15551234567").is_empty());
    }

    #[test]
    fn recipient_deserializes_from_partial_json() {
        let recipient: Recipient =
            serde_json::from_str(r#"{"email":"grower@example.com"}"#).unwrap();
        assert_eq!(recipient.email.as_deref(), Some("grower@example.com"));
        assert!(recipient.phone.is_none());
    }
}
