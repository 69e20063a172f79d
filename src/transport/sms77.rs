use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::domain::{
    ComposedMessage, IncomingMessage, MessageType, RawPhoneNumber, SenderId, TEXT_FIELD,
};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid XML response: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("response is not an XML document: {snippet:?}")]
    NotXml { snippet: String },

    #[error("XML response ended inside an element")]
    Truncated,

    #[error("CDATA section is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

const TEXT_TAG: &[u8] = b"Text";
const ID_ATTR: &[u8] = b"id";

/// One `<Text>` element being read, with the path of open child elements.
#[derive(Debug)]
struct TextRecord {
    start: usize,
    id: String,
    from: String,
    to: String,
    message: String,
    path: Vec<Vec<u8>>,
}

impl TextRecord {
    fn open(start: usize, element: &BytesStart<'_>) -> Result<Self, TransportError> {
        let mut id = String::new();
        for attr in element.attributes() {
            let attr = attr.map_err(quick_xml::Error::from)?;
            if attr.key.local_name().as_ref() == ID_ATTR {
                id = attr.unescape_value()?.into_owned();
            }
        }
        Ok(Self {
            start,
            id,
            from: String::new(),
            to: String::new(),
            message: String::new(),
            path: Vec::new(),
        })
    }

    fn field_mut(&mut self) -> Option<&mut String> {
        let path: Vec<&[u8]> = self.path.iter().map(Vec::as_slice).collect();
        match path.as_slice() {
            [b"FromNumber"] => Some(&mut self.from),
            [b"ToNumber"] => Some(&mut self.to),
            [b"TextRecord", b"Message"] => Some(&mut self.message),
            _ => None,
        }
    }

    fn finish(self, source: &str, end: usize) -> IncomingMessage {
        let raw = source.get(self.start..end).unwrap_or_default().to_owned();
        IncomingMessage::new(self.id, self.from, self.to, self.message, raw)
    }
}

/// Path of the inbox listing, relative to the gateway base URL.
pub const TEXTS_PATH: &str = "text";

const DEBUG_FIELD: &str = "debug";
const SNIPPET_LEN: usize = 64;

pub fn encode_send_form(
    message: &ComposedMessage,
    message_type: MessageType,
    debug: bool,
) -> Vec<(String, String)> {
    let mut params = vec![
        (RawPhoneNumber::FIELD.to_owned(), message.to.clone()),
        (
            MessageType::FIELD.to_owned(),
            message_type.as_str().to_owned(),
        ),
        (TEXT_FIELD.to_owned(), message.text.clone()),
        (DEBUG_FIELD.to_owned(), u8::from(debug).to_string()),
    ];
    if let Some(from) = message.from.as_ref() {
        params.push((SenderId::FIELD.to_owned(), from.as_str().to_owned()));
    }
    params
}

/// Whether a reply body is a bare numeric status instead of a document.
pub fn is_status_code(body: &str) -> bool {
    let trimmed = body.trim();
    !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit())
}

/// Decode a `<Texts>` document into messages, keeping the carrier's order.
///
/// Only `<Text>` children of the root are records; other siblings are skipped.
/// Field text is taken verbatim and each record keeps its element source as `raw`.
pub fn decode_texts_xml(xml: &str) -> Result<Vec<IncomingMessage>, TransportError> {
    let trimmed = xml.trim();
    if !trimmed.starts_with('<') {
        return Err(TransportError::NotXml {
            snippet: trimmed.chars().take(SNIPPET_LEN).collect(),
        });
    }

    let mut reader = Reader::from_str(trimmed);
    reader.config_mut().trim_text(false);

    let mut messages = Vec::new();
    let mut current: Option<TextRecord> = None;
    let mut depth = 0usize;

    loop {
        let start = reader.buffer_position() as usize;
        match reader.read_event()? {
            Event::Start(element) => {
                if let Some(record) = current.as_mut() {
                    record.path.push(element.local_name().as_ref().to_vec());
                } else if depth == 1 && element.local_name().as_ref() == TEXT_TAG {
                    current = Some(TextRecord::open(start, &element)?);
                }
                depth += 1;
            }
            Event::Empty(element) => {
                if current.is_none() && depth == 1 && element.local_name().as_ref() == TEXT_TAG {
                    let record = TextRecord::open(start, &element)?;
                    messages.push(record.finish(trimmed, reader.buffer_position() as usize));
                }
            }
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                if let Some(mut record) = current.take() {
                    if record.path.pop().is_some() {
                        current = Some(record);
                    } else {
                        messages.push(record.finish(trimmed, reader.buffer_position() as usize));
                    }
                }
            }
            Event::Text(text) => {
                if let Some(field) = current.as_mut().and_then(TextRecord::field_mut) {
                    field.push_str(&text.unescape()?);
                }
            }
            Event::CData(data) => {
                if let Some(field) = current.as_mut().and_then(TextRecord::field_mut) {
                    field.push_str(std::str::from_utf8(&data.into_inner())?);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if depth != 0 || current.is_some() {
        return Err(TransportError::Truncated);
    }
    Ok(messages)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn composed(from: Option<&str>) -> ComposedMessage {
        ComposedMessage {
            to: "+491701111111,+491702222222".to_owned(),
            text: "hello".to_owned(),
            from: from.map(|f| SenderId::new(f).unwrap()),
        }
    }

    fn text_record(id: &str, from: &str, to: &str, message: &str) -> String {
        format!(
            "<Text id=\"{id}\"><FromNumber>{from}</FromNumber><ToNumber>{to}</ToNumber>\
             <TextRecord><Message>{message}</Message></TextRecord></Text>"
        )
    }

    #[test]
    fn encode_send_form_params() {
        let params = encode_send_form(&composed(None), MessageType::Direct, false);
        assert_eq!(
            params,
            vec![
                ("to".to_owned(), "+491701111111,+491702222222".to_owned()),
                ("type".to_owned(), "direct".to_owned()),
                ("text".to_owned(), "hello".to_owned()),
                ("debug".to_owned(), "0".to_owned()),
            ]
        );
    }

    #[test]
    fn encode_send_form_appends_sender_and_debug_flag() {
        let params = encode_send_form(&composed(Some("Shop")), MessageType::Economy, true);
        assert_eq!(params[1], ("type".to_owned(), "economy".to_owned()));
        assert_eq!(params[3], ("debug".to_owned(), "1".to_owned()));
        assert_eq!(params[4], ("from".to_owned(), "Shop".to_owned()));
    }

    #[test]
    fn decode_texts_keeps_order_and_fields() {
        let xml = format!(
            "<?xml version=\"1.0\"?>\n<Texts>\n{}\n{}\n{}\n</Texts>",
            text_record("3", "+491703333333", "+4930123", "third"),
            text_record("1", "+491701111111", "+4930123", "first"),
            text_record("2", "+491702222222", "+4930123", "second"),
        );

        let messages = decode_texts_xml(&xml).unwrap();
        let ids: Vec<&str> = messages.iter().map(IncomingMessage::id).collect();
        assert_eq!(ids, vec!["3", "1", "2"]);

        let first = &messages[1];
        assert_eq!(first.from(), "+491701111111");
        assert_eq!(first.to(), "+4930123");
        assert_eq!(first.message(), "first");
        assert_eq!(
            first.raw(),
            text_record("1", "+491701111111", "+4930123", "first")
        );
    }

    #[test]
    fn decode_texts_raw_keeps_unmodelled_attributes_and_children() {
        let record = "<Text id=\"9\" status=\"new\"><FromNumber>+491701111111</FromNumber>\
                      <ToNumber>+4930123</ToNumber><Received>2024-01-01</Received>\
                      <TextRecord><Message>hi</Message></TextRecord></Text>";
        let xml = format!("<Texts>\n  {record}\n</Texts>");

        let messages = decode_texts_xml(&xml).unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].id(), "9");
        assert_eq!(messages[0].message(), "hi");
        assert_eq!(messages[0].raw(), record);
        assert!(messages[0].raw().contains("status=\"new\""));
        assert!(messages[0].raw().contains("<Received>2024-01-01</Received>"));
    }

    #[test]
    fn decode_texts_preserves_surrounding_whitespace() {
        let xml = format!(
            "<Texts>{}</Texts>",
            text_record("4", " +491701111111 ", "\t+4930123 ", "  hi  ")
        );
        let messages = decode_texts_xml(&xml).unwrap();
        assert_eq!(messages[0].from(), " +491701111111 ");
        assert_eq!(messages[0].to(), "\t+4930123 ");
        assert_eq!(messages[0].message(), "  hi  ");
    }

    #[test]
    fn decode_texts_skips_interleaved_siblings() {
        let xml = "<Texts><Text id=\"1\"/><Count>2</Count><Text id=\"2\"/></Texts>";
        let messages = decode_texts_xml(xml).unwrap();
        let ids: Vec<&str> = messages.iter().map(IncomingMessage::id).collect();
        assert_eq!(ids, vec!["1", "2"]);
        assert_eq!(messages[0].raw(), "<Text id=\"1\"/>");
        assert_eq!(messages[1].from(), "");
    }

    #[test]
    fn decode_texts_ignores_nested_text_elements() {
        let xml = "<Texts><Meta><Text id=\"x\"/></Meta>\
                   <Text id=\"1\"><TextRecord><Message><![CDATA[a < b]]></Message></TextRecord></Text></Texts>";
        let messages = decode_texts_xml(xml).unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].id(), "1");
        assert_eq!(messages[0].message(), "a < b");
    }

    #[test]
    fn decode_texts_defaults_missing_fields_to_empty() {
        let xml = "<Texts><Text><FromNumber>+491701111111</FromNumber></Text></Texts>";
        let messages = decode_texts_xml(xml).unwrap();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].id(), "");
        assert_eq!(messages[0].from(), "+491701111111");
        assert_eq!(messages[0].to(), "");
        assert_eq!(messages[0].message(), "");
    }

    #[test]
    fn decode_texts_unescapes_entities() {
        let xml = format!(
            "<Texts>{}</Texts>",
            text_record("7", "a", "b", "fish &amp; chips")
        );
        let messages = decode_texts_xml(&xml).unwrap();
        assert_eq!(messages[0].message(), "fish & chips");
    }

    #[test]
    fn decode_empty_inbox() {
        assert!(decode_texts_xml("<Texts></Texts>").unwrap().is_empty());
    }

    #[test]
    fn decode_rejects_non_xml_and_malformed_documents() {
        assert!(matches!(
            decode_texts_xml("hello"),
            Err(TransportError::NotXml { .. })
        ));
        assert!(matches!(
            decode_texts_xml("<Texts><Text id=\"1\">"),
            Err(TransportError::Truncated)
        ));
        assert!(matches!(
            decode_texts_xml("<Texts><Text></Message></Texts>"),
            Err(TransportError::Xml(_))
        ));
    }

    #[test]
    fn status_code_detection() {
        assert!(is_status_code("900"));
        assert!(is_status_code(" 11\n"));
        assert!(!is_status_code(""));
        assert!(!is_status_code("<Texts/>"));
        assert!(!is_status_code("9a"));
    }
}
