use country_names::{export, fetch::build_client, ExportConfig, ExportError, Stage};
use std::{fs, net::SocketAddr, path::Path};
use tempfile::tempdir;
use warp::{http::StatusCode, Filter};

/// Serve `body` with `status` on an ephemeral localhost port for every request.
fn serve(status: StatusCode, body: &'static str) -> SocketAddr {
    let route = warp::any().map(move || warp::reply::with_status(body, status));
    let (addr, server) = warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);
    addr
}

fn config_for(addr: SocketAddr, output: &Path) -> ExportConfig {
    ExportConfig {
        url: format!("http://{}/v3.1/all?fields=name", addr),
        output: output.to_path_buf(),
        ..ExportConfig::default()
    }
}

async fn run(config: &ExportConfig) -> Result<Vec<String>, ExportError> {
    let client = build_client(config)?;
    export(&client, config).await
}

const SAMPLE: &str = r#"[
    {"name":{"common":"France","official":"French Republic","nativeName":{"fra":{"official":"République française","common":"France"}}}},
    {"name":{"common":"Chad","official":"Republic of Chad"}},
    {"name":{"common":"Chad","official":"Republic of Chad"}},
    {"name":{"common":"Åland Islands","official":"Åland Islands"}}
]"#;

#[tokio::test]
async fn test_writes_sorted_names() {
    let addr = serve(StatusCode::OK, SAMPLE);
    let tmp = tempdir().unwrap();
    let output = tmp.path().join("countries.json");
    let config = config_for(addr, &output);

    let names = run(&config).await.unwrap();

    assert_eq!(names, vec!["Chad", "Chad", "France", "Åland Islands"]);
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "[\n  \"Chad\",\n  \"Chad\",\n  \"France\",\n  \"\\u00c5land Islands\"\n]"
    );
}

#[tokio::test]
async fn test_utf8_output() {
    let addr = serve(StatusCode::OK, SAMPLE);
    let tmp = tempdir().unwrap();
    let output = tmp.path().join("countries.json");
    let config = ExportConfig {
        escape_non_ascii: false,
        ..config_for(addr, &output)
    };

    run(&config).await.unwrap();

    let written: Vec<String> = serde_json::from_slice(&fs::read(&output).unwrap()).unwrap();
    assert_eq!(written.last().map(String::as_str), Some("Åland Islands"));
    assert!(fs::read_to_string(&output).unwrap().contains("Åland Islands"));
}

#[tokio::test]
async fn test_empty_upstream_writes_empty_array() {
    let addr = serve(StatusCode::OK, "[]");
    let tmp = tempdir().unwrap();
    let output = tmp.path().join("countries.json");

    let names = run(&config_for(addr, &output)).await.unwrap();

    assert!(names.is_empty());
    assert_eq!(fs::read_to_string(&output).unwrap(), "[]");
}

#[tokio::test]
async fn test_rerun_is_byte_identical() {
    let addr = serve(StatusCode::OK, SAMPLE);
    let tmp = tempdir().unwrap();
    let output = tmp.path().join("countries.json");
    let config = config_for(addr, &output);

    run(&config).await.unwrap();
    let first = fs::read(&output).unwrap();
    run(&config).await.unwrap();
    let second = fs::read(&output).unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_server_error_leaves_file_untouched() {
    let addr = serve(StatusCode::INTERNAL_SERVER_ERROR, "oops");
    let tmp = tempdir().unwrap();
    let output = tmp.path().join("countries.json");
    fs::write(&output, "[\n  \"Previous\"\n]").unwrap();

    let err = run(&config_for(addr, &output)).await.unwrap_err();

    assert_eq!(err.stage(), Stage::Fetch);
    match err {
        ExportError::Status { status, .. } => assert_eq!(status.as_u16(), 500),
        other => panic!("expected status error, got {:?}", other),
    }
    assert_eq!(fs::read_to_string(&output).unwrap(), "[\n  \"Previous\"\n]");
}

#[tokio::test]
async fn test_server_error_writes_nothing() {
    let addr = serve(StatusCode::INTERNAL_SERVER_ERROR, "oops");
    let tmp = tempdir().unwrap();
    let output = tmp.path().join("countries.json");

    assert!(run(&config_for(addr, &output)).await.is_err());
    assert!(!output.exists());
}

#[tokio::test]
async fn test_missing_common_fails_without_writing() {
    let addr = serve(
        StatusCode::OK,
        r#"[{"name":{"common":"Chad"}},{"name":{}}]"#,
    );
    let tmp = tempdir().unwrap();
    let output = tmp.path().join("countries.json");

    let err = run(&config_for(addr, &output)).await.unwrap_err();

    assert_eq!(err.stage(), Stage::Parse);
    assert!(err.to_string().starts_with("parse:"));
    assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn test_unreachable_host_is_fetch_error() {
    // bind then drop to get a port with nothing listening
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let tmp = tempdir().unwrap();
    let output = tmp.path().join("countries.json");
    let config = ExportConfig {
        url: format!("http://127.0.0.1:{}/v3.1/all?fields=name", port),
        output: output.clone(),
        ..ExportConfig::default()
    };

    let err = run(&config).await.unwrap_err();

    assert!(matches!(err, ExportError::Network { .. }));
    assert_eq!(err.stage(), Stage::Fetch);
    assert!(!output.exists());
}

#[tokio::test]
async fn test_missing_output_dir_is_write_error() {
    let addr = serve(StatusCode::OK, SAMPLE);
    let tmp = tempdir().unwrap();
    let output = tmp.path().join("json").join("countries.json");

    let err = run(&config_for(addr, &output)).await.unwrap_err();

    assert_eq!(err.stage(), Stage::Write);
    assert!(!tmp.path().join("json").exists());
}
