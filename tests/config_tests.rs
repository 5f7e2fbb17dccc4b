use std::{fs, path::Path};

use osprey::config::{load_config, load_proxies};

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("osprey-{}-{name}", std::process::id()))
}

#[test]
fn defaults_without_path() {
    let cfg = load_config(None).unwrap();
    assert_eq!(cfg.platforms.len(), 24);
    assert_eq!(cfg.messaging.len(), 4);
    assert!(cfg
        .platforms
        .iter()
        .all(|p| p.url_template.contains("{username}")));
}

#[test]
fn defaults_when_file_missing() {
    let cfg = load_config(Some(Path::new("/tmp/does-not-exist.toml"))).unwrap();
    assert_eq!(cfg.platforms.len(), 24);
    assert!(cfg.user_agent.contains("OSINTTool"));
}

#[test]
fn catalog_override_from_toml() {
    let path = temp_path("catalog.toml");
    fs::write(
        &path,
        r#"
user_agent = "probe-test/1.0"

[[platforms]]
name = "example"
url_template = "https://example.com/{username}"
"#,
    )
    .unwrap();

    let cfg = load_config(Some(&path)).unwrap();
    assert_eq!(cfg.platforms.len(), 1);
    assert_eq!(cfg.platforms[0].name, "example");
    assert_eq!(cfg.user_agent, "probe-test/1.0");
    // messaging falls back to the built-in catalog
    assert_eq!(cfg.messaging.len(), 4);

    let _ = fs::remove_file(&path);
}

#[test]
fn duplicate_catalog_names_rejected() {
    let path = temp_path("dupes.toml");
    fs::write(
        &path,
        r#"
[[platforms]]
name = "example"
url_template = "https://example.com/{username}"

[[platforms]]
name = "example"
url_template = "https://example.org/{username}"
"#,
    )
    .unwrap();

    let err = load_config(Some(&path)).unwrap_err();
    assert!(err.to_string().contains("duplicate"));

    let _ = fs::remove_file(&path);
}

#[test]
fn proxy_file_skips_blank_lines() {
    let path = temp_path("proxies.txt");
    fs::write(&path, "one:8080\n\n  \nhttp://two:3128\n").unwrap();

    let proxies = load_proxies(&path);
    assert_eq!(proxies, ["one:8080", "http://two:3128"]);

    let _ = fs::remove_file(&path);
}

#[test]
fn missing_proxy_file_is_nonfatal() {
    let proxies = load_proxies(Path::new("/tmp/osprey-no-such-proxies.txt"));
    assert!(proxies.is_empty());
}
