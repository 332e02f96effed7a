use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use kube_connect::cluster::config::{load_external_config, ClusterConnectionConfig, TlsClientConfig};
use kube_connect::env::MapEnv;
use kube_connect::errors::{AppError, CredentialField};
use kube_connect::kube::client::create_external_client;

// Nothing listens on port 1, so connection attempts fail fast.
const UNREACHABLE: &str = "https://127.0.0.1:1";

fn cluster(host: &str, tls: TlsClientConfig) -> ClusterConnectionConfig {
    ClusterConnectionConfig {
        name: "default".to_string(),
        host: host.to_string(),
        tls,
    }
}

fn self_signed() -> TlsClientConfig {
    let key_pair = rcgen::KeyPair::generate().unwrap();
    let params = rcgen::CertificateParams::new(vec!["localhost".to_string()]).unwrap();
    let cert = params.self_signed(&key_pair).unwrap();

    TlsClientConfig {
        insecure: false,
        cert_data: STANDARD.encode(cert.pem()),
        key_data: STANDARD.encode(key_pair.serialize_pem()),
        ca_data: STANDARD.encode(cert.pem()),
    }
}

#[tokio::test]
async fn empty_key_fails_before_any_network_call() {
    let env = MapEnv::new()
        .with("K8S_HOST", "https://10.0.0.5:6443")
        .with(
            "K8S_CONFIG",
            r#"{"tlsClientConfig":{"insecure":false,"certData":"Zm9v","keyData":"","caData":"YmF6"}}"#,
        );
    let cfg = load_external_config(&env).unwrap();

    let err = create_external_client(&cfg).await.err().unwrap();
    match err {
        AppError::MissingCredential { cluster, field } => {
            assert_eq!(cluster, "default");
            assert_eq!(field, CredentialField::PrivateKey);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn bad_base64_is_reported_per_field() {
    let tls = TlsClientConfig {
        cert_data: "not base64!".to_string(),
        ..self_signed()
    };

    let err = create_external_client(&cluster(UNREACHABLE, tls)).await.err().unwrap();
    assert!(
        matches!(
            err,
            AppError::CredentialDecode {
                field: CredentialField::Certificate,
                ..
            }
        ),
        "{err:?}"
    );
}

#[tokio::test]
async fn material_that_is_not_pem_fails_construction() {
    let tls = TlsClientConfig {
        insecure: true,
        cert_data: "Zm9v".to_string(),
        key_data: "YmFy".to_string(),
        ca_data: "YmF6".to_string(),
    };

    let err = create_external_client(&cluster(UNREACHABLE, tls)).await.err().unwrap();
    assert!(
        matches!(&err, AppError::ClientConstruction { cluster, .. } if cluster == "default"),
        "{err:?}"
    );
}

#[tokio::test]
async fn unreachable_host_fails_after_construction() {
    let err = create_external_client(&cluster(UNREACHABLE, self_signed()))
        .await
        .err()
        .unwrap();

    assert!(
        matches!(&err, AppError::Connection { cluster, .. } if cluster == "default"),
        "{err:?}"
    );
    assert!(err.to_string().contains("failed to connect to kubernetes cluster default"));
}
