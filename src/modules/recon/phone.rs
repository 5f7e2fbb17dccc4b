use crate::{
    config::ProbeTarget,
    core::{
        classify::{classify, EndpointKind},
        engine::{run_all, Engine},
    },
    modules::recon::{now_ts, Exists, PhoneReport, ProbeOutcome},
};

// The messaging catalog is small and slow; it runs at a fraction of the
// platform worker count.
const MIN_MESSAGING_WORKERS: usize = 3;

/// Strip everything but digits and `+` from a phone number.
pub fn sanitize_phone(phone: &str) -> String {
    phone
        .trim()
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect()
}

/// Check a phone number against the messaging-app catalog. Templates with
/// a non-HTTP scheme are never probed.
pub async fn check_phone(engine: &Engine, catalog: &[ProbeTarget], phone: &str) -> PhoneReport {
    let phone = phone.trim().to_string();
    let cleaned = sanitize_phone(&phone);
    // some templates expect international form without the plus
    let payload = cleaned.trim_start_matches('+');
    let enc_cleaned = urlencoding::encode(&cleaned).into_owned();
    let enc_payload = urlencoding::encode(payload).into_owned();

    let targets: Vec<ProbeTarget> = catalog
        .iter()
        .map(|t| ProbeTarget {
            name: t.name.clone(),
            url_template: t
                .url_template
                .replace("{phone}", &enc_cleaned)
                .replace("{phone_or_username}", &enc_payload),
        })
        .collect();

    let workers = (engine.workers() / 3).max(MIN_MESSAGING_WORKERS);
    let probe_engine = engine.clone();
    let checked = run_all(targets, workers, move |target| {
        let engine = probe_engine.clone();
        async move { Ok(probe_messaging(&engine, target).await) }
    })
    .await;

    PhoneReport {
        phone,
        cleaned,
        checked,
        timestamp: now_ts(),
    }
}

async fn probe_messaging(engine: &Engine, target: ProbeTarget) -> ProbeOutcome {
    let url = target.url_template;

    // viber:// and friends cannot be checked automatically
    if !url.starts_with("http") {
        let mut outcome = ProbeOutcome::unknown("Non-HTTP scheme or manual check required");
        outcome.url = Some(url);
        engine.governor().pace().await;
        return outcome;
    }

    let outcome = match engine.probe_get(&url).await {
        Ok(raw) => {
            let (exists, note) = classify(Some(raw.status), &raw.body, EndpointKind::MessagingLink);
            tracing::debug!(app = %target.name, %url, status = raw.status, ?exists, "phone probe");
            ProbeOutcome {
                url: Some(url),
                http_status: Some(raw.status),
                exists,
                note,
            }
        }
        Err(err) => {
            tracing::debug!(app = %target.name, %url, %err, "phone probe failed");
            ProbeOutcome {
                url: Some(url),
                http_status: None,
                exists: Exists::Unknown,
                note: Some(format!("error: {err}")),
            }
        }
    };
    engine.governor().pace().await;
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_keeps_digits_and_plus() {
        assert_eq!(sanitize_phone("+1 (555) 123-4567"), "+15551234567");
    }

    #[test]
    fn sanitize_empty() {
        assert_eq!(sanitize_phone(""), "");
    }

    #[test]
    fn sanitize_strips_letters() {
        assert_eq!(sanitize_phone("call +44 20x 7946 abc 0958!"), "+442079460958");
    }
}
