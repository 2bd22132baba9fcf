use command::dispatch::Bot;
use config::secrets::{FileSecretProvider, SecretProvider};
use config::settings::Settings;
use hyper::StatusCode;
use mockito::Matcher;
use proxy::gateway::GatewayClient;
use proxy::utils::{METRICS_PATH, SYSTEM_PATH};
use std::sync::Arc;
use tempdir::TempDir;

const FUNCTIONS: &str = r#"[
  {"name":"alexellis-figlet","image":"alexellis/figlet:0.1","invocationCount":42,"replicas":1,
   "labels":{"com.openfaas.cloud.git-owner":"alexellis","faas_function":"alexellis-figlet"},
   "annotations":{"com.openfaas.cloud.git-repo-url":"https://github.com/alexellis/figlet"}},
  {"name":"system-github-event","image":"functions/github-event:0.7","invocationCount":1001,"replicas":1,
   "labels":{"faas_function":"system-github-event"},"annotations":null},
  {"name":"rgee0-kubecon","image":"rgee0/kubecon:0.2","invocationCount":7,"replicas":1,
   "labels":{"com.openfaas.cloud.git-owner":"rgee0"},"annotations":{}}
]"#;

fn bot(secrets_dir: &TempDir) -> Bot {
    bot_for(secrets_dir, mockito::server_url())
}

fn bot_for(secrets_dir: &TempDir, gateway_host: String) -> Bot {
    std::fs::write(secrets_dir.path().join("token"), "slack-token\n").unwrap();
    std::fs::write(secrets_dir.path().join("basic-auth-password"), "secret").unwrap();

    let settings = Settings {
        gateway_host,
        secret_dirs: vec![secrets_dir.path().to_path_buf()],
        ..Default::default()
    };
    let secrets: Arc<dyn SecretProvider> =
        Arc::new(FileSecretProvider::new(settings.secret_dirs.clone()));
    let gateway = GatewayClient::new(&settings, secrets.clone()).unwrap();
    Bot::new(secrets, Arc::new(gateway), settings.outbound_timeout)
}

#[tokio::test]
async fn test_functions_through_gateway() {
    let _mok = mockito::mock("GET", SYSTEM_PATH)
        .match_header("authorization", "Basic YWRtaW46c2VjcmV0")
        .with_status(200)
        .with_body(FUNCTIONS)
        .create();

    let dir = TempDir::new("ofc-bot-e2e").unwrap();
    let reply = bot(&dir)
        .handle(b"token=slack-token&command=%2Ffunctions&text=alexellis")
        .await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.text(), "Functions for (alexellis):\n- alexellis-figlet\n");

    let reply = bot(&dir)
        .handle(b"token=slack-token&command=%2Ffunctions")
        .await;
    assert_eq!(
        reply.text(),
        "Functions:\n- alexellis-figlet\n- rgee0-kubecon\n"
    );
}

#[tokio::test]
async fn test_metrics_through_gateway() {
    let mok = mockito::mock("GET", METRICS_PATH)
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("function".into(), "rgee0-kubecon".into()),
            Matcher::UrlEncoded("metrics_window".into(), "24".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"success":7,"failure":0}"#)
        .expect(1)
        .create();

    let dir = TempDir::new("ofc-bot-e2e").unwrap();
    let reply = bot(&dir)
        .handle(b"token=slack-token&command=%2Fmetrics&text=rgee0-kubecon")
        .await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.text(), r#"{"success":7,"failure":0}"#);
    mok.assert();
}

#[tokio::test]
async fn test_invalid_token_never_reaches_gateway() {
    // served from its own base path so no other test's request can hit this mock
    let mok = mockito::mock("GET", format!("/rejected{}", SYSTEM_PATH).as_str())
        .with_status(200)
        .with_body(FUNCTIONS)
        .expect(0)
        .create();

    let dir = TempDir::new("ofc-bot-e2e").unwrap();
    let gateway_host = format!("{}/rejected", mockito::server_url());
    let reply = bot_for(&dir, gateway_host)
        .handle(b"token=wrong&command=%2Fusers")
        .await;

    assert_eq!(reply.status, StatusCode::UNAUTHORIZED);
    assert_eq!(reply.text(), "Token: wrong, invalid");
    mok.assert();
}
