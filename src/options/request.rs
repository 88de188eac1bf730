use serde::{Deserialize, Serialize};

use super::{
    builder::RequestOptionsBuilder,
    entries::{Cookie, FormField, KeyValue},
    kinds::{AuthKind, BodyKind, HttpMethod, HttpVersion, ProxyKind, RawContentType, TlsVersion},
};

/// Everything needed to compile one curl invocation.
///
/// The value is cloned before generation, so edits made while a request is
/// in flight never reach the running command.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RequestOptions {
    pub url: String,
    pub method: HttpMethod,
    /// Overrides `method` when non-empty.
    pub custom_method: String,
    pub http_version: HttpVersion,
    pub headers: Vec<KeyValue>,
    pub user_agent: String,
    pub referer: String,
    pub body: BodyOptions,
    pub auth: AuthOptions,
    pub tls: TlsOptions,
    pub proxy: ProxyOptions,
    pub cookies: CookieOptions,
    pub connection: ConnectionOptions,
    pub redirects: RedirectOptions,
    pub output: OutputOptions,
    pub dns: DnsOptions,
    pub network: NetworkOptions,
    pub misc: MiscOptions,
}

impl RequestOptions {
    pub fn builder() -> RequestOptionsBuilder {
        RequestOptionsBuilder::default()
    }

    /// Returns an updated copy, leaving `self` untouched.
    pub fn with(&self, update: impl FnOnce(&mut RequestOptions)) -> RequestOptions {
        let mut next = self.clone();
        update(&mut next);
        next
    }

    /// True when an enabled header already sets `Content-Type`.
    pub fn has_content_type_header(&self) -> bool {
        self.headers
            .iter()
            .any(|header| header.enabled && header.key.eq_ignore_ascii_case("content-type"))
    }

    /// Method label shown to users: the custom verb when set.
    pub fn method_label(&self) -> String {
        if self.custom_method.is_empty() {
            self.method.to_string()
        } else {
            self.custom_method.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BodyOptions {
    pub kind: BodyKind,
    pub raw: String,
    pub raw_type: RawContentType,
    pub form_data: Vec<FormField>,
    pub url_encoded: Vec<KeyValue>,
    pub binary_path: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AuthOptions {
    pub kind: AuthKind,
    pub username: String,
    pub password: String,
    pub bearer_token: String,
    pub sigv4_provider: String,
    pub sigv4_region: String,
    pub sigv4_service: String,
}

impl Default for AuthOptions {
    fn default() -> Self {
        Self {
            kind: AuthKind::None,
            username: String::new(),
            password: String::new(),
            bearer_token: String::new(),
            sigv4_provider: "aws:amz".to_string(),
            sigv4_region: String::new(),
            sigv4_service: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TlsOptions {
    pub insecure: bool,
    pub version: TlsVersion,
    pub cert_path: String,
    pub cert_type: String,
    pub key_path: String,
    pub key_type: String,
    pub key_password: String,
    pub ca_cert_path: String,
    pub ca_path: String,
    pub crl_file: String,
    pub pinned_public_key: String,
    pub allow_beast: bool,
    pub no_revoke: bool,
}

impl Default for TlsOptions {
    fn default() -> Self {
        Self {
            insecure: false,
            version: TlsVersion::Auto,
            cert_path: String::new(),
            cert_type: "PEM".to_string(),
            key_path: String::new(),
            key_type: "PEM".to_string(),
            key_password: String::new(),
            ca_cert_path: String::new(),
            ca_path: String::new(),
            crl_file: String::new(),
            pinned_public_key: String::new(),
            allow_beast: false,
            no_revoke: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProxyOptions {
    pub enabled: bool,
    pub kind: ProxyKind,
    pub host: String,
    pub port: String,
    pub username: String,
    pub password: String,
    pub tunnel: bool,
    /// Comma separated hosts passed to `--noproxy`, honoured even when
    /// proxying is off.
    pub no_proxy: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CookieOptions {
    pub entries: Vec<Cookie>,
    pub file: String,
    pub jar: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConnectionOptions {
    pub connect_timeout: String,
    pub max_time: String,
    pub limit_rate: String,
    pub speed_limit: String,
    pub speed_time: String,
    pub retry: String,
    pub retry_delay: String,
    pub retry_max_time: String,
    pub retry_all_errors: bool,
    pub compressed: bool,
    pub tcp_nodelay: bool,
    pub tcp_fastopen: bool,
    pub no_keepalive: bool,
    pub keepalive_time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RedirectOptions {
    pub follow: bool,
    pub max_redirects: String,
    /// Keep POST on 301/302/303.
    pub post_on_redirect: bool,
    pub auto_referer: bool,
}

impl Default for RedirectOptions {
    fn default() -> Self {
        Self {
            follow: true,
            max_redirects: String::new(),
            post_on_redirect: false,
            auto_referer: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OutputOptions {
    pub verbose: bool,
    pub silent: bool,
    pub show_error: bool,
    pub include_headers: bool,
    pub head_only: bool,
    pub output_file: String,
    pub dump_header: String,
    pub write_out: String,
    pub trace: String,
    pub trace_ascii: String,
    pub trace_time: bool,
    pub progress_bar: bool,
    pub fail_on_error: bool,
    pub fail_early: bool,
    pub raw: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DnsOptions {
    pub servers: String,
    pub interface: String,
    pub ipv4_addr: String,
    pub ipv6_addr: String,
    pub resolve: Vec<KeyValue>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NetworkOptions {
    pub interface: String,
    pub local_port: String,
    pub ipv4_only: bool,
    pub ipv6_only: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MiscOptions {
    pub range: String,
    pub continue_at: String,
    pub create_dirs: bool,
    pub crlf: bool,
    pub path_as_is: bool,
    pub no_buffer: bool,
    pub no_session_id: bool,
    pub remote_time: bool,
    pub parallel: bool,
    pub parallel_max: String,
}
