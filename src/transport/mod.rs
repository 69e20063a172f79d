//! Transport layer: carrier wire-format details (serialization/deserialization).

mod sms77;
mod sms77_codes;

pub use sms77::{TEXTS_PATH, decode_texts_xml, encode_send_form, is_status_code};
pub use sms77_codes::STATUS_TABLE as SMS77_STATUS_TABLE;
