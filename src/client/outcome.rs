//! Terminal result of one resolution and the relay-response rules that produce it.

use crate::base::neterror::NetError;
use http::StatusCode;

/// Result of resolving one domain through the relay.
#[derive(Debug, Clone)]
pub enum ResolutionOutcome {
    /// The relay answered successfully with no addresses.
    NxDomain,
    /// IPv4 literals in the order the relay returned them.
    Resolved(Vec<String>),
    /// Transport, status or body failure. Treat the domain as unknown.
    Error(NetError),
}

impl ResolutionOutcome {
    /// Addresses for `Resolved`, empty otherwise.
    pub fn addresses(&self) -> &[String] {
        match self {
            ResolutionOutcome::Resolved(addrs) => addrs,
            _ => &[],
        }
    }

    pub fn is_nxdomain(&self) -> bool {
        matches!(self, ResolutionOutcome::NxDomain)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, ResolutionOutcome::Error(_))
    }

    /// The failure cause for `Error`.
    pub fn error(&self) -> Option<&NetError> {
        match self {
            ResolutionOutcome::Error(e) => Some(e),
            _ => None,
        }
    }
}

impl From<NetError> for ResolutionOutcome {
    fn from(e: NetError) -> Self {
        ResolutionOutcome::Error(e)
    }
}

fn is_address_list_byte(b: u8) -> bool {
    b.is_ascii_digit() || matches!(b, b'.' | b',' | b'\r' | b'\n')
}

/// Interpret a relay response.
///
/// - non-200 → `Error(UnexpectedStatus)`
/// - 200 with a body that is empty after trimming → `NxDomain`
/// - 200 with a body of digits, dots and separators → `Resolved`, split on
///   line breaks or commas, empty segments dropped, order kept
/// - anything else → `Error(InvalidResponse)`
pub fn interpret_response(status: StatusCode, body: &[u8]) -> ResolutionOutcome {
    if status != StatusCode::OK {
        return ResolutionOutcome::Error(NetError::UnexpectedStatus(status.as_u16()));
    }

    let Ok(text) = std::str::from_utf8(body) else {
        return ResolutionOutcome::Error(NetError::InvalidResponse);
    };
    let text = text.trim();

    if !text.bytes().all(is_address_list_byte) {
        return ResolutionOutcome::Error(NetError::InvalidResponse);
    }

    let addrs: Vec<String> = text
        .split([',', '\n'])
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    if addrs.is_empty() {
        ResolutionOutcome::NxDomain
    } else {
        ResolutionOutcome::Resolved(addrs)
    }
}
