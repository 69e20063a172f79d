//! Domain layer: strong types with validation and invariants (no I/O).

mod message;
mod taxonomy;
mod validation;
mod value;

pub use message::{
    ComposedMessage, IncomingMessage, ListOptions, OutgoingMessage, RECIPIENT_DELIMITER,
    SEGMENT_DELIMITER, TEXT_FIELD, addresses_to_wire_format,
};
pub use taxonomy::{CodeEntry, ErrorKind, NormalizedError, StatusTable};
pub use validation::ValidationError;
pub use value::{
    MessageId, MessageType, Password, PhoneNumber, RawPhoneNumber, SenderId, Username,
};
