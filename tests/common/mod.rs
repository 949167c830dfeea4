use std::io::Write;
use std::sync::Arc;
use flyq_endpoint::{Component, TlsParameters};
use tempfile::NamedTempFile;

pub fn tls(protocol: &str) -> Arc<TlsParameters> {
    Arc::new(TlsParameters {
        protocol: protocol.to_string(),
        ..TlsParameters::default()
    })
}

pub fn component_with_brokers(brokers: &str) -> Component {
    let mut component = Component::default();
    component.set_brokers(brokers);
    component
}

pub fn settings_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("flyq_settings_")
        .suffix(".toml")
        .tempfile()
        .expect("failed to create temp file");
    file.write_all(contents.as_bytes())
        .expect("failed to write settings");
    file
}
