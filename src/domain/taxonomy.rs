//! Carrier-independent failure kinds and per-carrier status tables.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// Normalized meaning of a carrier status.
pub enum ErrorKind {
    Success,
    AuthenticationFailed,
    InvalidRecipient,
    InvalidSender,
    MissingParameter,
    PayloadTooLarge,
    RateLimited,
    InsufficientBalance,
    PartialDeliveryFailure,
    CarrierUnavailable,
    ServerMisconfiguration,
    UnknownCarrierError,
}

impl ErrorKind {
    /// Whether waiting and trying again may succeed.
    ///
    /// Retrying a send is still a new message to the carrier.
    pub fn is_retryable(self) -> bool {
        matches!(self, Self::RateLimited | Self::CarrierUnavailable)
    }

    /// Whether credentials were missing or rejected.
    pub fn is_auth_error(self) -> bool {
        matches!(self, Self::AuthenticationFailed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::AuthenticationFailed => "authentication failed",
            Self::InvalidRecipient => "invalid recipient",
            Self::InvalidSender => "invalid sender",
            Self::MissingParameter => "missing parameter",
            Self::PayloadTooLarge => "payload too large",
            Self::RateLimited => "rate limited",
            Self::InsufficientBalance => "insufficient balance",
            Self::PartialDeliveryFailure => "partial delivery failure",
            Self::CarrierUnavailable => "carrier unavailable",
            Self::ServerMisconfiguration => "server misconfiguration",
            Self::UnknownCarrierError => "unknown carrier error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{kind} (carrier code {carrier_code:?}): {detail}")]
/// A carrier status translated into an [`ErrorKind`].
///
/// `carrier_code` is the status exactly as the carrier sent it (trimmed).
pub struct NormalizedError {
    pub kind: ErrorKind,
    pub carrier_code: String,
    pub detail: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// One documented carrier status.
pub struct CodeEntry {
    pub code: &'static str,
    pub kind: ErrorKind,
    pub detail: &'static str,
}

impl CodeEntry {
    pub const fn new(code: &'static str, kind: ErrorKind, detail: &'static str) -> Self {
        Self { code, kind, detail }
    }
}

#[derive(Debug, Clone, Copy)]
/// Static mapping from one carrier's status codes to [`ErrorKind`].
///
/// Lookups are total: any code outside the table resolves to
/// [`ErrorKind::UnknownCarrierError`] with the code preserved.
pub struct StatusTable {
    carrier: &'static str,
    success: &'static str,
    entries: &'static [CodeEntry],
}

impl StatusTable {
    pub const fn new(
        carrier: &'static str,
        success: &'static str,
        entries: &'static [CodeEntry],
    ) -> Self {
        Self {
            carrier,
            success,
            entries,
        }
    }

    pub fn carrier(&self) -> &'static str {
        self.carrier
    }

    /// The single value meaning "accepted".
    pub fn success_sentinel(&self) -> &'static str {
        self.success
    }

    /// Whether `body` is exactly the success sentinel (surrounding whitespace ignored).
    pub fn is_success(&self, body: &str) -> bool {
        body.trim() == self.success
    }

    pub fn lookup(&self, code: &str) -> Option<&'static CodeEntry> {
        let code = code.trim();
        self.entries.iter().find(|entry| entry.code == code)
    }

    /// Translate a carrier code, falling back to [`ErrorKind::UnknownCarrierError`].
    pub fn normalize(&self, code: &str) -> NormalizedError {
        let code = code.trim();
        match self.lookup(code) {
            Some(entry) => NormalizedError {
                kind: entry.kind,
                carrier_code: code.to_owned(),
                detail: entry.detail.to_owned(),
            },
            None => {
                tracing::warn!(
                    carrier = self.carrier,
                    code,
                    "carrier returned an undocumented status"
                );
                NormalizedError {
                    kind: ErrorKind::UnknownCarrierError,
                    carrier_code: code.to_owned(),
                    detail: format!("{} returned an unrecognized status", self.carrier),
                }
            }
        }
    }

    /// `Ok(())` for the success sentinel, otherwise the normalized failure.
    pub fn classify(&self, body: &str) -> Result<(), NormalizedError> {
        if self.is_success(body) {
            return Ok(());
        }
        Err(self.normalize(body))
    }

    /// Every code the table documents, in table order.
    pub fn documented_codes(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.code)
    }
}
