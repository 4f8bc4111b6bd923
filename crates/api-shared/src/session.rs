//! Session extraction for REST handlers.
//!
//! Real authentication (OTP verification, tokens) is out of scope; the
//! acting role and identity arrive as plain request headers and are turned
//! into the explicit [`Session`] value every store call takes. Absent or
//! unparseable headers fall back to a worker session, which matches the
//! single-worker deployment the seeded registry models.

use axum::http::HeaderMap;
use sakhi_store::Session;
use sakhi_types::{Phone, Role};

/// Header carrying the acting role (`asha` or `beneficiary`).
pub const SESSION_ROLE_HEADER: &str = "x-session-role";
/// Header carrying the beneficiary's 10-digit phone number.
pub const SESSION_PHONE_HEADER: &str = "x-session-phone";
/// Header carrying the display name shown on greeting surfaces.
pub const SESSION_NAME_HEADER: &str = "x-session-name";

const DEFAULT_WORKER_NAME: &str = "ASHA Worker";

/// Build the acting session from request headers.
///
/// A `beneficiary` role without a valid phone header cannot be scoped to
/// any records and is therefore treated as an anonymous beneficiary with
/// no visible records (a phone of `None` never matches a mother record).
pub fn session_from_headers(headers: &HeaderMap) -> Session {
    let header_str = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
    };

    let role = header_str(SESSION_ROLE_HEADER)
        .and_then(|value| value.parse::<Role>().ok())
        .unwrap_or(Role::Asha);

    match role {
        Role::Asha => Session::asha(
            header_str(SESSION_NAME_HEADER).unwrap_or(DEFAULT_WORKER_NAME),
        ),
        Role::Beneficiary => {
            let phone = header_str(SESSION_PHONE_HEADER).and_then(|value| Phone::new(value).ok());
            let display_name = header_str(SESSION_NAME_HEADER)
                .unwrap_or("Beneficiary")
                .to_string();
            Session {
                role: Role::Beneficiary,
                phone,
                display_name,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn missing_headers_default_to_worker_session() {
        let session = session_from_headers(&HeaderMap::new());
        assert_eq!(session.role, Role::Asha);
        assert_eq!(session.display_name, "ASHA Worker");
        assert!(session.phone.is_none());
    }

    #[test]
    fn beneficiary_headers_scope_the_session() {
        let mut headers = HeaderMap::new();
        headers.insert(SESSION_ROLE_HEADER, HeaderValue::from_static("beneficiary"));
        headers.insert(SESSION_PHONE_HEADER, HeaderValue::from_static("9876543210"));
        headers.insert(SESSION_NAME_HEADER, HeaderValue::from_static("Priya"));

        let session = session_from_headers(&headers);
        assert_eq!(session.role, Role::Beneficiary);
        assert_eq!(session.phone.as_ref().map(|p| p.as_str()), Some("9876543210"));
        assert_eq!(session.display_name, "Priya");
    }

    #[test]
    fn invalid_phone_leaves_beneficiary_unscoped() {
        let mut headers = HeaderMap::new();
        headers.insert(SESSION_ROLE_HEADER, HeaderValue::from_static("beneficiary"));
        headers.insert(SESSION_PHONE_HEADER, HeaderValue::from_static("not-a-phone"));

        let session = session_from_headers(&headers);
        assert_eq!(session.role, Role::Beneficiary);
        assert!(session.phone.is_none());
    }

    #[test]
    fn unknown_role_falls_back_to_worker() {
        let mut headers = HeaderMap::new();
        headers.insert(SESSION_ROLE_HEADER, HeaderValue::from_static("admin"));
        let session = session_from_headers(&headers);
        assert_eq!(session.role, Role::Asha);
    }
}
