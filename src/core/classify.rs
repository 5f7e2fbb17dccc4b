use crate::modules::recon::Exists;

// Body phrases that mark a 200 response as a soft 404.
const NOT_FOUND_PHRASES: [&str; 5] = [
    "not found",
    "page not found",
    "user not found",
    "doesn't exist",
    "404",
];

// Breach-API responses are interpreted by the email investigator and
// never pass through here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointKind {
    ProfilePage,
    MessagingLink,
}

/// Map an HTTP status and lowercased body snippet to an existence verdict.
/// Pure, no I/O. `status == None` means the transport failed; the caller
/// attaches the error text as the note.
pub fn classify(
    status: Option<u16>,
    body_lowercased: &str,
    kind: EndpointKind,
) -> (Exists, Option<String>) {
    let Some(status) = status else {
        return (Exists::Unknown, None);
    };

    match kind {
        EndpointKind::ProfilePage => match status {
            200 => {
                if NOT_FOUND_PHRASES.iter().any(|p| body_lowercased.contains(p)) {
                    (Exists::No, None)
                } else {
                    (Exists::Yes, None)
                }
            }
            301 | 302 => (Exists::Yes, None),
            404 => (Exists::No, None),
            429 => (Exists::Unknown, Some("Rate limited (429)".to_string())),
            other => (Exists::Unknown, Some(format!("HTTP {other}"))),
        },
        EndpointKind::MessagingLink => match status {
            200 => (
                Exists::Unknown,
                Some(
                    "Page reachable — manual verification required (cannot assert existence)"
                        .to_string(),
                ),
            ),
            404 => (Exists::No, None),
            301 | 302 => (
                Exists::Unknown,
                Some("Redirected — manual verification recommended".to_string()),
            ),
            other => (Exists::Unknown, Some(format!("HTTP {other}"))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_soft_404_body() {
        let (exists, _) = classify(Some(200), "sorry, user not found", EndpointKind::ProfilePage);
        assert_eq!(exists, Exists::No);
    }

    #[test]
    fn profile_plain_200() {
        let (exists, note) = classify(Some(200), "<html>profile</html>", EndpointKind::ProfilePage);
        assert_eq!(exists, Exists::Yes);
        assert!(note.is_none());
    }

    #[test]
    fn profile_redirect_counts_as_hit() {
        assert_eq!(classify(Some(301), "", EndpointKind::ProfilePage).0, Exists::Yes);
        assert_eq!(classify(Some(302), "", EndpointKind::ProfilePage).0, Exists::Yes);
    }

    #[test]
    fn profile_404() {
        let (exists, note) = classify(Some(404), "", EndpointKind::ProfilePage);
        assert_eq!(exists, Exists::No);
        assert!(note.is_none());
    }

    #[test]
    fn profile_rate_limited() {
        let (exists, note) = classify(Some(429), "", EndpointKind::ProfilePage);
        assert_eq!(exists, Exists::Unknown);
        assert_eq!(note.as_deref(), Some("Rate limited (429)"));
    }

    #[test]
    fn profile_other_status_carries_note() {
        let (exists, note) = classify(Some(503), "", EndpointKind::ProfilePage);
        assert_eq!(exists, Exists::Unknown);
        assert_eq!(note.as_deref(), Some("HTTP 503"));
    }

    #[test]
    fn no_status_is_unknown() {
        let (exists, note) = classify(None, "", EndpointKind::ProfilePage);
        assert_eq!(exists, Exists::Unknown);
        assert!(note.is_none());
    }

    #[test]
    fn messaging_200_needs_manual_check() {
        let (exists, note) = classify(Some(200), "chat page", EndpointKind::MessagingLink);
        assert_eq!(exists, Exists::Unknown);
        assert!(note.unwrap().contains("manual verification"));
    }

    #[test]
    fn messaging_404() {
        assert_eq!(classify(Some(404), "", EndpointKind::MessagingLink).0, Exists::No);
    }

    #[test]
    fn messaging_redirect_is_inconclusive() {
        let (exists, note) = classify(Some(302), "", EndpointKind::MessagingLink);
        assert_eq!(exists, Exists::Unknown);
        assert!(note.unwrap().contains("manual verification"));
    }
}
