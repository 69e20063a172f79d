use crate::domain::{CodeEntry, ErrorKind, StatusTable};

/// Reply body meaning "accepted" for `send`.
pub const SUCCESS: &str = "100";

const ENTRIES: &[CodeEntry] = &[
    CodeEntry::new(SUCCESS, ErrorKind::Success, "SMS accepted for delivery"),
    CodeEntry::new(
        "101",
        ErrorKind::PartialDeliveryFailure,
        "sending to at least one recipient failed",
    ),
    CodeEntry::new(
        "201",
        ErrorKind::InvalidSender,
        "sender invalid; at most 11 alphanumeric or 16 numeric characters are allowed",
    ),
    CodeEntry::new("202", ErrorKind::InvalidRecipient, "recipient number invalid"),
    CodeEntry::new(
        "300",
        ErrorKind::AuthenticationFailed,
        "user name and password must be provided",
    ),
    CodeEntry::new("301", ErrorKind::MissingParameter, "parameter `to` not set"),
    CodeEntry::new("304", ErrorKind::MissingParameter, "parameter `type` not set"),
    CodeEntry::new("305", ErrorKind::MissingParameter, "parameter `text` not set"),
    CodeEntry::new(
        "306",
        ErrorKind::InvalidSender,
        "sender number invalid; must be a valid mobile number in the form 0049...",
    ),
    CodeEntry::new("307", ErrorKind::MissingParameter, "parameter `url` not set"),
    CodeEntry::new(
        "400",
        ErrorKind::MissingParameter,
        "parameter `type` has an unsupported value",
    ),
    CodeEntry::new("401", ErrorKind::PayloadTooLarge, "parameter `text` is too long"),
    CodeEntry::new(
        "402",
        ErrorKind::RateLimited,
        "reload lock: this SMS was already sent within the last 90 seconds",
    ),
    CodeEntry::new("500", ErrorKind::InsufficientBalance, "insufficient credit"),
    CodeEntry::new("600", ErrorKind::CarrierUnavailable, "carrier delivery failed"),
    CodeEntry::new(
        "700",
        ErrorKind::CarrierUnavailable,
        "unspecified error on the gateway side",
    ),
    CodeEntry::new("801", ErrorKind::MissingParameter, "logo file not specified"),
    CodeEntry::new("802", ErrorKind::MissingParameter, "logo file does not exist"),
    CodeEntry::new("803", ErrorKind::MissingParameter, "ringtone not specified"),
    CodeEntry::new(
        "900",
        ErrorKind::AuthenticationFailed,
        "user name/password combination incorrect",
    ),
    CodeEntry::new(
        "902",
        ErrorKind::ServerMisconfiguration,
        "HTTP API disabled for this account",
    ),
    CodeEntry::new("903", ErrorKind::ServerMisconfiguration, "server IP is not allowed"),
    CodeEntry::new(
        "11",
        ErrorKind::CarrierUnavailable,
        "SMS carrier temporarily unavailable",
    ),
];

/// Status table for the sms77 HTTP gateway.
pub static STATUS_TABLE: StatusTable = StatusTable::new("sms77", SUCCESS, ENTRIES);

#[cfg(test)]
mod tests {
    use super::*;

    const DOCUMENTED: &[&str] = &[
        "101", "201", "202", "300", "301", "304", "305", "306", "307", "400", "401", "402",
        "500", "600", "700", "801", "802", "803", "900", "902", "903", "11",
    ];

    #[test]
    fn every_documented_failure_code_has_a_kind_and_detail() {
        for code in DOCUMENTED {
            let err = STATUS_TABLE.normalize(code);
            assert_ne!(err.kind, ErrorKind::UnknownCarrierError, "code {code}");
            assert_ne!(err.kind, ErrorKind::Success, "code {code}");
            assert!(!err.detail.is_empty(), "code {code}");
            assert_eq!(err.carrier_code, *code);
        }
    }

    #[test]
    fn table_documents_exactly_the_known_codes() {
        let mut table: Vec<&str> = STATUS_TABLE
            .documented_codes()
            .filter(|code| *code != SUCCESS)
            .collect();
        let mut documented = DOCUMENTED.to_vec();
        table.sort_unstable();
        documented.sort_unstable();
        assert_eq!(table, documented);
    }

    #[test]
    fn representative_mappings() {
        assert_eq!(
            STATUS_TABLE.normalize("900").kind,
            ErrorKind::AuthenticationFailed
        );
        assert_eq!(STATUS_TABLE.normalize("402").kind, ErrorKind::RateLimited);
        assert_eq!(
            STATUS_TABLE.normalize("101").kind,
            ErrorKind::PartialDeliveryFailure
        );
        assert_eq!(
            STATUS_TABLE.normalize("903").kind,
            ErrorKind::ServerMisconfiguration
        );
        assert_eq!(
            STATUS_TABLE.normalize("11").kind,
            ErrorKind::CarrierUnavailable
        );
    }

    #[test]
    fn undocumented_codes_are_preserved() {
        for code in ["999", "12", "abc", "<html>"] {
            let err = STATUS_TABLE.normalize(code);
            assert_eq!(err.kind, ErrorKind::UnknownCarrierError);
            assert_eq!(err.carrier_code, code);
        }
    }

    #[test]
    fn only_the_sentinel_is_success() {
        assert!(STATUS_TABLE.classify("100").is_ok());
        assert!(STATUS_TABLE.classify("100\n").is_ok());
        assert!(STATUS_TABLE.classify("1000").is_err());
        assert!(STATUS_TABLE.classify("").is_err());
    }
}
