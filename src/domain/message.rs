use serde::Serialize;

use crate::domain::validation::ValidationError;
use crate::domain::value::{RawPhoneNumber, SenderId};

/// Delimiter between recipients in the `to` field.
pub const RECIPIENT_DELIMITER: &str = ",";

/// Delimiter between body segments in the composed text.
pub const SEGMENT_DELIMITER: &str = "\n";

/// Form field name used by the gateway for the message body (`text`).
pub const TEXT_FIELD: &str = "text";

#[derive(Debug, Clone, PartialEq, Eq)]
/// A message to be handed to a driver.
///
/// Recipients may be added after construction; the non-empty invariants are
/// checked when the message is composed, before any network call.
pub struct OutgoingMessage {
    recipients: Vec<RawPhoneNumber>,
    sender: Option<SenderId>,
    segments: Vec<String>,
}

impl OutgoingMessage {
    /// Start a message with a single body segment and no recipients.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            recipients: Vec::new(),
            sender: None,
            segments: vec![text.into()],
        }
    }

    /// Append a recipient. Order is preserved and duplicates are kept.
    pub fn to(mut self, recipient: RawPhoneNumber) -> Self {
        self.recipients.push(recipient);
        self
    }

    /// Set the sender id presented to recipients.
    pub fn from(mut self, sender: SenderId) -> Self {
        self.sender = Some(sender);
        self
    }

    /// Append another body segment.
    pub fn line(mut self, text: impl Into<String>) -> Self {
        self.segments.push(text.into());
        self
    }

    pub fn recipients(&self) -> &[RawPhoneNumber] {
        &self.recipients
    }

    pub fn sender(&self) -> Option<&SenderId> {
        self.sender.as_ref()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Compose the body text from the segments.
    ///
    /// Pure and deterministic: the same message always composes to the same text.
    pub fn compose_body(&self) -> Result<String, ValidationError> {
        let body = self.segments.join(SEGMENT_DELIMITER);
        if body.trim().is_empty() {
            return Err(ValidationError::Empty { field: TEXT_FIELD });
        }
        Ok(body)
    }

    /// Compose the wire-ready recipient list, body and sender.
    pub fn compose(&self) -> Result<ComposedMessage, ValidationError> {
        let to = addresses_to_wire_format(&self.recipients)?;
        let text = self.compose_body()?;
        Ok(ComposedMessage {
            to,
            text,
            from: self.sender.clone(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Output of [`OutgoingMessage::compose`].
pub struct ComposedMessage {
    pub to: String,
    pub text: String,
    pub from: Option<SenderId>,
}

/// Join recipients with `,`, keeping order and duplicates.
pub fn addresses_to_wire_format(recipients: &[RawPhoneNumber]) -> Result<String, ValidationError> {
    if recipients.is_empty() {
        return Err(ValidationError::Empty {
            field: RawPhoneNumber::FIELD,
        });
    }
    Ok(recipients
        .iter()
        .map(RawPhoneNumber::raw)
        .collect::<Vec<_>>()
        .join(RECIPIENT_DELIMITER))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// A message received from a carrier.
///
/// Built only by driver parsing routines. Missing carrier fields are empty
/// strings, never absent. Field text is kept exactly as sent, whitespace included.
pub struct IncomingMessage {
    id: String,
    from: String,
    to: String,
    message: String,
    raw: String,
}

impl IncomingMessage {
    pub(crate) fn new(
        id: String,
        from: String,
        to: String,
        message: String,
        raw: String,
    ) -> Self {
        Self {
            id,
            from,
            to,
            message,
            raw,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn from(&self) -> &str {
        &self.from
    }

    pub fn to(&self) -> &str {
        &self.to
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The carrier record this message was parsed from, untouched.
    pub fn raw(&self) -> &str {
        &self.raw
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Options for [`crate::Driver::list_messages`].
pub struct ListOptions {
    /// Extra query parameters forwarded verbatim to the carrier.
    pub params: Vec<(String, String)>,
}

impl ListOptions {
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn phone(raw: &str) -> RawPhoneNumber {
        RawPhoneNumber::new(raw).unwrap()
    }

    #[test]
    fn wire_format_keeps_order_and_duplicates() {
        let a = phone("+491701111111");
        let b = phone("+491702222222");
        let wire = addresses_to_wire_format(&[a.clone(), a, b]).unwrap();
        assert_eq!(wire, "+491701111111,+491701111111,+491702222222");
    }

    #[test]
    fn wire_format_rejects_empty_recipients() {
        assert_eq!(
            addresses_to_wire_format(&[]),
            Err(ValidationError::Empty { field: "to" })
        );
    }

    #[test]
    fn compose_body_is_deterministic_and_joins_segments() {
        let msg = OutgoingMessage::new("Your code:")
            .line("123456")
            .to(phone("+491701111111"));
        let first = msg.compose_body().unwrap();
        let second = msg.compose_body().unwrap();
        assert_eq!(first, "Your code:\n123456");
        assert_eq!(first, second);
    }

    #[test]
    fn compose_body_rejects_blank_text() {
        let msg = OutgoingMessage::new("  ").line("").to(phone("+491701111111"));
        assert_eq!(
            msg.compose_body(),
            Err(ValidationError::Empty { field: TEXT_FIELD })
        );
    }

    #[test]
    fn compose_checks_recipients_before_body() {
        let msg = OutgoingMessage::new("");
        assert_eq!(
            msg.compose(),
            Err(ValidationError::Empty { field: "to" })
        );
    }

    #[test]
    fn compose_carries_sender() {
        let msg = OutgoingMessage::new("hello")
            .to(phone("+491701111111"))
            .from(SenderId::new("Shop").unwrap());
        let composed = msg.compose().unwrap();
        assert_eq!(composed.to, "+491701111111");
        assert_eq!(composed.text, "hello");
        assert_eq!(composed.from.as_ref().map(SenderId::as_str), Some("Shop"));
    }

    #[test]
    fn incoming_message_serializes_all_fields() {
        let msg = IncomingMessage::new(
            "1".to_owned(),
            "+491701111111".to_owned(),
            "+4930123".to_owned(),
            " hi ".to_owned(),
            "<Text id=\"1\"/>".to_owned(),
        );
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["id"], "1");
        assert_eq!(json["from"], "+491701111111");
        assert_eq!(json["to"], "+4930123");
        assert_eq!(json["message"], " hi ");
        assert_eq!(json["raw"], "<Text id=\"1\"/>");
    }

    #[test]
    fn list_options_collect_params_in_order() {
        let options = ListOptions::default().param("a", "1").param("b", "2");
        assert_eq!(
            options.params,
            vec![
                ("a".to_owned(), "1".to_owned()),
                ("b".to_owned(), "2".to_owned())
            ]
        );
    }
}
