use crate::{
    config::ProbeTarget,
    core::{
        classify::{classify, EndpointKind},
        engine::{run_all, Engine},
    },
    modules::recon::{now_ts, Exists, ProbeOutcome, UsernameReport},
};

/// Check a username across every platform in the catalog.
pub async fn check_username(
    engine: &Engine,
    catalog: &[ProbeTarget],
    username: &str,
) -> UsernameReport {
    let username = username.trim().to_string();
    let encoded = urlencoding::encode(&username).into_owned();

    let targets: Vec<ProbeTarget> = catalog
        .iter()
        .map(|t| ProbeTarget {
            name: t.name.clone(),
            url_template: t.url_template.replace("{username}", &encoded),
        })
        .collect();

    let probe_engine = engine.clone();
    let checked = run_all(targets, engine.workers(), move |target| {
        let engine = probe_engine.clone();
        async move { Ok(probe_profile(&engine, target).await) }
    })
    .await;

    UsernameReport {
        username,
        checked,
        timestamp: now_ts(),
    }
}

async fn probe_profile(engine: &Engine, target: ProbeTarget) -> ProbeOutcome {
    let url = target.url_template;
    let outcome = match engine.probe(&url).await {
        Ok(raw) => {
            let (exists, note) = classify(Some(raw.status), &raw.body, EndpointKind::ProfilePage);
            tracing::debug!(
                platform = %target.name,
                %url,
                status = raw.status,
                ?exists,
                "username probe"
            );
            ProbeOutcome {
                url: Some(url),
                http_status: Some(raw.status),
                exists,
                note,
            }
        }
        Err(err) => {
            tracing::debug!(platform = %target.name, %url, %err, "username probe failed");
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
