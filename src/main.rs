use anyhow::{Context, Result};
use clap::Parser;
use flyq_endpoint::{install_global_tls, ComponentSettings, ProcessGlobalTls, WorkerPoolHandle};
use serde_json::json;
use tracing::info;

use crate::params::Params;

mod params;

#[tokio::main]
async fn main() -> Result<()> {
    let params = Params::parse();

    tracing_subscriber::fmt()
        .with_max_level(if params.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_target(false)
        .with_thread_ids(true)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let mut settings = ComponentSettings::load_or_default(params.config.as_ref())?;
    if params.use_global_ssl {
        settings.use_global_ssl_context_parameters = true;
    }
    if let Some(tls) = settings.global_tls.clone() {
        install_global_tls(tls);
    }

    let mut component = settings
        .build_component(ProcessGlobalTls)
        .context("building component from settings")?;
    if let Some(pool) = WorkerPoolHandle::current() {
        component.set_worker_pool(pool);
    }
    info!("FlyQ endpoint component ready: {:?}", component);

    let endpoint = component
        .resolve_endpoint(&params.uri)
        .with_context(|| format!("resolving {}", params.uri))?;

    let cfg = endpoint.configuration();
    let summary = json!({
        "uri": endpoint.uri(),
        "topic": endpoint.topic(),
        "brokers": cfg.broker_list(),
        "clientId": cfg.client_id,
        "groupId": cfg.group_id,
        "securityProtocol": cfg.security_protocol.to_string(),
        "autoOffsetReset": cfg.auto_offset_reset.to_string(),
        "consumersCount": cfg.consumers_count,
        "requestTimeoutMs": cfg.request_timeout.as_millis() as u64,
        "tls": cfg.tls_parameters.as_deref(),
        "workerPool": endpoint.worker_pool().is_some(),
        "synchronous": endpoint.is_synchronous(),
        "bridgeEndpoint": endpoint.is_bridge_endpoint(),
        "additionalProperties": cfg.additional_properties,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
