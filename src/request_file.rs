//! Request documents: `RequestOptions` as JSON with `{NAME}` placeholders.

use std::{collections::BTreeMap, path::Path};

use anyhow::{Context, Result};
use tokio::fs;
use tracing::debug;

use crate::{
    config::EnvironmentContext,
    env::{expand_in_place, EnvMap},
    options::{KeyValue, RequestOptions},
};

pub async fn load_request_file(
    path: &Path,
    environment: &EnvironmentContext,
) -> Result<RequestOptions> {
    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("reading request file {}", path.display()))?;

    parse_request(&raw, environment)
        .with_context(|| format!("loading request file {}", path.display()))
}

/// Deserialises, adds configured default headers, then expands placeholders.
pub fn parse_request(contents: &str, environment: &EnvironmentContext) -> Result<RequestOptions> {
    let mut options: RequestOptions =
        serde_json::from_str(contents).context("parsing request JSON")?;
    apply_default_headers(&mut options, &environment.default_headers);
    expand_options(&mut options, &environment.env)?;
    debug!(method = %options.method_label(), url = %options.url, "parsed request");
    Ok(options)
}

/// Appends each default header whose name the request does not already use.
/// A disabled header still counts as used.
pub fn apply_default_headers(options: &mut RequestOptions, defaults: &BTreeMap<String, String>) {
    for (key, value) in defaults {
        let present = options
            .headers
            .iter()
            .any(|header| header.key.eq_ignore_ascii_case(key));
        if !present {
            options.headers.push(KeyValue::new(key.clone(), value.clone()));
        }
    }
}

pub fn expand_options(options: &mut RequestOptions, env: &EnvMap) -> Result<()> {
    let expand = |name: &str, value: &mut String| -> Result<()> {
        expand_in_place(value, env).with_context(|| format!("expanding {name}"))
    };

    expand("url", &mut options.url)?;
    expand("customMethod", &mut options.custom_method)?;
    expand("userAgent", &mut options.user_agent)?;
    expand("referer", &mut options.referer)?;
    for header in &mut options.headers {
        expand("header name", &mut header.key)?;
        expand("header value", &mut header.value)?;
    }

    let body = &mut options.body;
    expand("body.raw", &mut body.raw)?;
    expand("body.binaryPath", &mut body.binary_path)?;
    for field in &mut body.form_data {
        expand("form field name", &mut field.key)?;
        expand("form field value", &mut field.value)?;
        expand("form field path", &mut field.file_path)?;
    }
    for field in &mut body.url_encoded {
        expand("url-encoded name", &mut field.key)?;
        expand("url-encoded value", &mut field.value)?;
    }

    let auth = &mut options.auth;
    expand("auth.username", &mut auth.username)?;
    expand("auth.password", &mut auth.password)?;
    expand("auth.bearerToken", &mut auth.bearer_token)?;
    expand("auth.sigv4Region", &mut auth.sigv4_region)?;
    expand("auth.sigv4Service", &mut auth.sigv4_service)?;

    let tls = &mut options.tls;
    expand("tls.certPath", &mut tls.cert_path)?;
    expand("tls.keyPath", &mut tls.key_path)?;
    expand("tls.keyPassword", &mut tls.key_password)?;
    expand("tls.caCertPath", &mut tls.ca_cert_path)?;

    let proxy = &mut options.proxy;
    expand("proxy.host", &mut proxy.host)?;
    expand("proxy.port", &mut proxy.port)?;
    expand("proxy.username", &mut proxy.username)?;
    expand("proxy.password", &mut proxy.password)?;
    expand("proxy.noProxy", &mut proxy.no_proxy)?;

    for cookie in &mut options.cookies.entries {
        expand("cookie value", &mut cookie.value)?;
    }
    expand("cookies.file", &mut options.cookies.file)?;
    expand("cookies.jar", &mut options.cookies.jar)?;

    for entry in &mut options.dns.resolve {
        expand("dns.resolve", &mut entry.value)?;
    }

    Ok(())
}
