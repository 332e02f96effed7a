use assert_cmd::prelude::*;
use std::process::Command;

fn bin() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("kube-connect"));
    cmd.env("RUST_LOG", "off")
        .env_remove("K8S_HOST")
        .env_remove("K8S_CONFIG")
        .env_remove("KUBERNETES_SERVICE_HOST")
        .env_remove("KUBERNETES_SERVICE_PORT");
    cmd
}

fn stderr_of(cmd: &mut Command) -> String {
    let assert = cmd.assert().failure();
    String::from_utf8_lossy(&assert.get_output().stderr).to_string()
}

#[test]
fn help_runs() {
    bin().arg("--help").assert().success();
}

#[test]
fn external_without_config_names_the_variable() {
    let stderr = stderr_of(bin().args(["--mode", "external"]));
    assert!(stderr.contains("K8S_CONFIG"), "stderr was: {stderr}");
}

#[test]
fn external_without_host_names_the_variable() {
    let stderr = stderr_of(
        bin()
            .env("K8S_CONFIG", r#"{"tlsClientConfig":{}}"#)
            .args(["--mode", "external"]),
    );
    assert!(stderr.contains("K8S_HOST"), "stderr was: {stderr}");
}

#[test]
fn external_with_empty_key_names_the_field() {
    let stderr = stderr_of(
        bin()
            .env("K8S_HOST", "https://10.0.0.5:6443")
            .env(
                "K8S_CONFIG",
                r#"{"tlsClientConfig":{"insecure":true,"certData":"Zm9v","keyData":"","caData":"YmF6"}}"#,
            )
            .args(["--mode", "external"]),
    );
    assert!(stderr.contains("keyData"), "stderr was: {stderr}");
    assert!(stderr.contains("cluster default"), "stderr was: {stderr}");
}

#[test]
fn in_cluster_outside_a_pod_fails() {
    let mount = tempfile::tempdir().unwrap();
    let stderr = stderr_of(bin().args([
        "--mode",
        "in-cluster",
        "--service-account-dir",
        mount.path().to_str().unwrap(),
    ]));
    assert!(
        stderr.contains("failed to load in-cluster config"),
        "stderr was: {stderr}"
    );
}

#[test]
fn blank_namespace_is_rejected() {
    let stderr = stderr_of(bin().args(["-n", "", "--mode", "external"]));
    assert!(stderr.contains("namespace"), "stderr was: {stderr}");
}
