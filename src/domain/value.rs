use crate::domain::validation::ValidationError;

use phonenumber::country;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Gateway account user name.
///
/// Invariant: non-empty after trimming.
pub struct Username(String);

impl Username {
    /// Form field name used by the gateway (`u`).
    pub const FIELD: &'static str = "u";

    /// Create a validated [`Username`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated user name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// Gateway account password (or API key used in its place).
///
/// Invariant: must not be empty (whitespace is preserved and allowed).
pub struct Password(String);

impl Password {
    /// Form field name used by the gateway (`p`).
    pub const FIELD: &'static str = "p";

    /// Create a validated [`Password`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the password as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Sender identity shown to the recipient (`from`).
///
/// Invariant: non-empty after trimming; at most 11 characters when alphanumeric,
/// at most 16 when purely numeric.
pub struct SenderId(String);

impl SenderId {
    /// Form field name used by the gateway (`from`).
    pub const FIELD: &'static str = "from";

    /// Maximum length of an alphanumeric sender id.
    pub const MAX_ALPHANUMERIC: usize = 11;
    /// Maximum length of a purely numeric sender id.
    pub const MAX_NUMERIC: usize = 16;

    /// Create a validated [`SenderId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let max = if trimmed.chars().all(|c| c.is_ascii_digit()) {
            Self::MAX_NUMERIC
        } else {
            Self::MAX_ALPHANUMERIC
        };
        let actual = trimmed.chars().count();
        if actual > max {
            return Err(ValidationError::SenderTooLong { max, actual });
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated sender id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Carrier-assigned identifier of an incoming message.
///
/// Invariant: non-empty after trimming.
pub struct MessageId(String);

impl MessageId {
    /// Name used in validation errors.
    pub const FIELD: &'static str = "id";

    /// Create a validated [`MessageId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Unvalidated destination address as sent to the gateway (`to`).
///
/// Invariant: non-empty after trimming. This type does not normalize; if you want E.164
/// normalization, parse into [`PhoneNumber`] and convert it into [`RawPhoneNumber`].
pub struct RawPhoneNumber(String);

impl RawPhoneNumber {
    /// Form field name used by the gateway (`to`).
    pub const FIELD: &'static str = "to";

    /// Create a validated (non-empty) raw phone number.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Raw (trimmed) value as sent to the gateway.
    pub fn raw(&self) -> &str {
        &self.0
    }
}

impl From<PhoneNumber> for RawPhoneNumber {
    /// Recipient entry carrying the E.164 form.
    fn from(value: PhoneNumber) -> Self {
        Self(value.e164)
    }
}

#[derive(Debug, Clone)]
/// A recipient normalized to E.164 before it goes into sms77's `to` list.
///
/// The gateway receives the `to` field as written, so `0170 1234567` and
/// `+49 170 1234567` would otherwise be two different recipients. Here they
/// compare (and hash) equal.
pub struct PhoneNumber {
    raw: String,
    e164: String,
    parsed: phonenumber::PhoneNumber,
}

impl PhoneNumber {
    /// Reported in validation errors; the number ends up in the `to` list.
    pub const FIELD: &'static str = "to";

    /// Normalize `input` for the recipient list.
    ///
    /// National input such as `0170 1234567` needs `default_region`
    /// (for example `Some(country::Id::DE)`).
    pub fn parse(
        default_region: Option<country::Id>,
        input: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let input = input.into();
        let raw = input.trim().to_owned();
        if raw.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        let parsed = phonenumber::parse(default_region, &raw)
            .map_err(|_| ValidationError::InvalidPhoneNumber { input: raw.clone() })?;

        let e164 = phonenumber::format(&parsed)
            .mode(phonenumber::Mode::E164)
            .to_string();

        Ok(Self { raw, e164, parsed })
    }

    /// What the caller typed, trimmed.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The form written to the `to` field.
    pub fn e164(&self) -> &str {
        &self.e164
    }

    pub fn parsed(&self) -> &phonenumber::PhoneNumber {
        &self.parsed
    }
}

impl PartialEq for PhoneNumber {
    fn eq(&self, other: &Self) -> bool {
        self.e164 == other.e164
    }
}

impl Eq for PhoneNumber {}

impl std::hash::Hash for PhoneNumber {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.e164.hash(state);
    }
}

impl std::cmp::PartialOrd for PhoneNumber {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl std::cmp::Ord for PhoneNumber {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.e164.cmp(&other.e164)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
/// Delivery route requested from the gateway (`type`).
pub enum MessageType {
    #[default]
    Direct,
    Economy,
}

impl MessageType {
    /// Form field name used by the gateway (`type`).
    pub const FIELD: &'static str = "type";

    /// Wire value for this route.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::Economy => "economy",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_newtypes_trim_or_validate() {
        let user = Username::new(" user ").unwrap();
        assert_eq!(user.as_str(), "user");
        assert!(Username::new("  ").is_err());

        let password = Password::new(" secret ").unwrap();
        assert_eq!(password.as_str(), " secret ");
        assert!(Password::new("").is_err());

        let id = MessageId::new(" 4711 ").unwrap();
        assert_eq!(id.as_str(), "4711");
        assert!(MessageId::new("  ").is_err());
    }

    #[test]
    fn password_debug_is_redacted() {
        let password = Password::new("hunter2").unwrap();
        assert_eq!(format!("{password:?}"), "Password(***)");
    }

    #[test]
    fn sender_id_enforces_carrier_length_rules() {
        assert_eq!(SenderId::new(" Shop ").unwrap().as_str(), "Shop");
        assert!(SenderId::new("ElevenChars").is_ok());
        assert_eq!(
            SenderId::new("TwelveChars!"),
            Err(ValidationError::SenderTooLong {
                max: SenderId::MAX_ALPHANUMERIC,
                actual: 12
            })
        );
        assert!(SenderId::new("0049170123456789").is_ok());
        assert_eq!(
            SenderId::new("00491701234567890"),
            Err(ValidationError::SenderTooLong {
                max: SenderId::MAX_NUMERIC,
                actual: 17
            })
        );
        assert!(SenderId::new(" ").is_err());
    }

    #[test]
    fn raw_phone_number_trims_and_exposes_raw() {
        let raw = RawPhoneNumber::new(" +491701234567 ").unwrap();
        assert_eq!(raw.raw(), "+491701234567");
        assert!(RawPhoneNumber::new("").is_err());
    }

    #[test]
    fn phone_number_parsing_and_equality_use_e164() {
        let p1 = PhoneNumber::parse(None, "+491701234567").unwrap();
        let p2 = PhoneNumber::parse(None, "+49 170 1234567").unwrap();
        assert_eq!(p1, p2);
        assert_eq!(p1.e164(), "+491701234567");
        assert_eq!(p2.raw(), "+49 170 1234567");

        let raw: RawPhoneNumber = p2.into();
        assert_eq!(raw.raw(), "+491701234567");
        assert!(PhoneNumber::parse(None, "not-a-number").is_err());
    }

    #[test]
    fn message_type_wire_values() {
        assert_eq!(MessageType::default(), MessageType::Direct);
        assert_eq!(MessageType::Direct.as_str(), "direct");
        assert_eq!(MessageType::Economy.as_str(), "economy");
    }
}
