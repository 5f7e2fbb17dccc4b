use serde::Deserialize;

use crate::{
    core::{engine::Engine, error::OspreyError},
    modules::recon::{now_ts, BreachRecord, EmailReport},
};

const HIBP_ENDPOINT: &str = "https://haveibeenpwned.com/api/v3/breachedaccount";

#[derive(Debug, Deserialize)]
struct HibpBreach {
    #[serde(rename = "Name")]
    name: Option<String>,
    #[serde(rename = "BreachDate")]
    breach_date: Option<String>,
}

/// Query HaveIBeenPwned for breaches involving `email`. Without an API key
/// this performs no network call and returns guidance instead.
pub async fn check_email_breaches(
    engine: &Engine,
    email: &str,
    api_key: Option<&str>,
) -> EmailReport {
    let mut report = EmailReport {
        email: email.to_string(),
        breaches: Vec::new(),
        errors: Vec::new(),
        note: None,
        timestamp: now_ts(),
    };

    let trimmed = email.trim();
    if trimmed.is_empty() || !trimmed.contains('@') {
        report.errors.push("Invalid email address format".to_string());
        return report;
    }

    let Some(api_key) = api_key else {
        report
            .errors
            .push("No HIBP API key provided. To check breaches, pass --hibp-key <KEY>.".to_string());
        report.note = Some(
            "If you have a HaveIBeenPwned API key, rerun with --hibp-key. Without an API key \
             this tool cannot perform automated breach checks."
                .to_string(),
        );
        return report;
    };

    let url = format!("{HIBP_ENDPOINT}/{}", urlencoding::encode(trimmed));
    match query_hibp(engine, &url, api_key).await {
        Ok(resp) => match resp.status().as_u16() {
            200 => match resp.json::<Vec<HibpBreach>>().await {
                Ok(data) => {
                    report.breaches = data
                        .into_iter()
                        .map(|b| BreachRecord {
                            name: b.name,
                            date: b.breach_date,
                        })
                        .collect();
                }
                Err(err) => report.errors.push(format!("error: {err}")),
            },
            404 => {
                report.note =
                    Some("No breaches found for this email according to HIBP".to_string());
            }
            401 => {
                report
                    .errors
                    .push("Unauthorized (invalid HIBP API key)".to_string());
            }
            other => report.errors.push(format!("HIBP returned HTTP {other}")),
        },
        Err(err) => report.errors.push(format!("error: {err}")),
    }

    report
}

async fn query_hibp(
    engine: &Engine,
    url: &str,
    api_key: &str,
) -> Result<reqwest::Response, OspreyError> {
    let client = engine.transient_client()?;
    Ok(client
        .get(url)
        .header("hibp-api-key", api_key)
        .header("Accept", "application/json")
        .query(&[("truncateResponse", "false")])
        .send()
        .await?)
}
