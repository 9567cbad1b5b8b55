//! Command handlers.

use std::path::Path;

use anyhow::{Context, bail};
use serde_json::{Value, json};
use tracing::info;

use ripapi_config::{Config, ConfigValidator};
use ripapi_core::{Kernel, ModuleStatus};
use ripapi_protocols::api::{ApiProtocol, ApiRequest, ApiResponse, AuthConfig, ProtocolKind};
use ripapi_protocols::auth::AuthProvider;
use ripapi_protocols::module::Module;

/// Arguments of the `send` command.
pub(crate) struct SendArgs {
    pub protocol: String,
    pub url: String,
    pub method: Option<String>,
    pub headers: Vec<String>,
    pub body: Option<String>,
    pub bearer: Option<String>,
}

pub(crate) fn modules(kernel: &Kernel, as_json: bool) -> anyhow::Result<()> {
    let auth = kernel.auth_registry().list();
    let protocols = kernel.protocol_registry().list();
    let active = kernel.auth_registry().active_id();

    if as_json {
        let out = json!({
            "auth_providers": auth,
            "protocols": protocols,
            "active_auth": active,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{:<10} {:<14} {:<30} {:<8} STATUS", "KIND", "ID", "NAME", "VERSION");
    print_rows("auth", &auth, active.as_deref());
    print_rows("protocol", &protocols, None);
    Ok(())
}

fn print_rows(kind: &str, rows: &[ModuleStatus], active: Option<&str>) {
    for row in rows {
        let status = match (row.enabled, active == Some(row.id.as_str())) {
            (true, true) => "enabled (active)",
            (true, false) => "enabled",
            (false, _) => "disabled",
        };
        println!(
            "{:<10} {:<14} {:<30} {:<8} {}",
            kind, row.id, row.name, row.version, status
        );
    }
}

pub(crate) async fn send(kernel: &Kernel, args: SendArgs) -> anyhow::Result<ApiResponse> {
    let request = build_request(args)?;
    let protocol = kernel
        .protocol_registry()
        .get_by_type(request.protocol)
        .with_context(|| format!("No {} protocol registered", request.protocol))?;
    if !kernel.protocol_registry().is_enabled(protocol.id()) {
        bail!(
            "Protocol module \"{}\" is not enabled (add it to modules.enabled)",
            protocol.id()
        );
    }

    let validation = protocol.validate(&request).await;
    if !validation.valid {
        for error in &validation.errors {
            eprintln!("  {}: {}", error.field, error.message);
        }
        bail!("Request validation failed");
    }

    info!("Sending {} request to {}", request.protocol, request.url);
    let response = protocol.execute(&request).await;
    println!("{}", serde_json::to_string_pretty(&response)?);

    if response.is_network_error() {
        bail!("Request failed: {}", response.body["error"]);
    }
    Ok(response)
}

pub(crate) fn build_request(args: SendArgs) -> anyhow::Result<ApiRequest> {
    let kind: ProtocolKind = args.protocol.parse().map_err(anyhow::Error::msg)?;
    let mut request = ApiRequest::new("cli", kind, args.url);
    request.method = args.method;

    for raw in &args.headers {
        let (name, value) = parse_header(raw)?;
        request.headers.insert(name, value);
    }
    request.body = args.body.map(|b| parse_body(&b));
    if let Some(token) = args.bearer {
        request.auth = Some(AuthConfig::bearer(token));
    }
    Ok(request)
}

pub(crate) fn parse_header(raw: &str) -> anyhow::Result<(String, String)> {
    match raw.split_once(':') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.trim().to_string()))
        }
        _ => bail!("Invalid header \"{}\", expected `Name: value`", raw),
    }
}

/// JSON when it parses, the raw string otherwise.
pub(crate) fn parse_body(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

pub(crate) async fn login(kernel: &Kernel, username: String, password: String) -> anyhow::Result<()> {
    let provider = kernel
        .auth_registry()
        .get_active()
        .context("No active auth provider (set modules.active_auth)")?;

    let result = provider
        .authenticate(&json!({ "username": username, "password": password }))
        .await?;
    println!("{}", serde_json::to_string_pretty(&result)?);

    if !result.success {
        bail!(
            "Login failed: {}",
            result.error.as_deref().unwrap_or("unknown error")
        );
    }
    Ok(())
}

pub(crate) fn check_config(path: &Path, config: &Config) -> anyhow::Result<()> {
    println!("Config: {}", path.display());
    let result = ConfigValidator::validate(config);

    for warning in &result.warnings {
        println!("  warning: {}: {}", warning.path, warning.message);
    }
    for error in &result.errors {
        println!("  error: {}: {}", error.path, error.message);
    }

    if !result.is_valid() {
        bail!("{} configuration error(s)", result.errors.len());
    }
    println!("Configuration is valid");
    Ok(())
}

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;
