use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::OptionsError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Head,
    Options,
    Trace,
    Connect,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 9] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Delete,
        HttpMethod::Patch,
        HttpMethod::Head,
        HttpMethod::Options,
        HttpMethod::Trace,
        HttpMethod::Connect,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Trace => "TRACE",
            HttpMethod::Connect => "CONNECT",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        HttpMethod::ALL
            .into_iter()
            .find(|method| method.as_str() == upper)
            .ok_or_else(|| OptionsError::UnknownMethod(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HttpVersion {
    #[default]
    #[serde(rename = "auto")]
    Auto,
    #[serde(rename = "1.0")]
    Http1_0,
    #[serde(rename = "1.1")]
    Http1_1,
    #[serde(rename = "2")]
    Http2,
    #[serde(rename = "3")]
    Http3,
}

impl HttpVersion {
    pub fn curl_flag(self) -> Option<&'static str> {
        match self {
            HttpVersion::Auto => None,
            HttpVersion::Http1_0 => Some("--http1.0"),
            HttpVersion::Http1_1 => Some("--http1.1"),
            HttpVersion::Http2 => Some("--http2"),
            HttpVersion::Http3 => Some("--http3"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthKind {
    #[default]
    None,
    Basic,
    Bearer,
    Digest,
    Ntlm,
    Negotiate,
    #[serde(rename = "sigv4")]
    SigV4,
}

impl AuthKind {
    /// Flag that selects the scheme in curl. Bearer travels as a header instead.
    pub fn curl_flag(self) -> Option<&'static str> {
        match self {
            AuthKind::None | AuthKind::Bearer => None,
            AuthKind::Basic => Some("--basic"),
            AuthKind::Digest => Some("--digest"),
            AuthKind::Ntlm => Some("--ntlm"),
            AuthKind::Negotiate => Some("--negotiate"),
            AuthKind::SigV4 => Some("--aws-sigv4"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BodyKind {
    #[default]
    None,
    Raw,
    FormData,
    UrlEncoded,
    Binary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RawContentType {
    Text,
    #[default]
    Json,
    Xml,
    Html,
    Javascript,
}

impl RawContentType {
    pub fn mime(self) -> &'static str {
        match self {
            RawContentType::Text => "text/plain",
            RawContentType::Json => "application/json",
            RawContentType::Xml => "application/xml",
            RawContentType::Html => "text/html",
            RawContentType::Javascript => "application/javascript",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TlsVersion {
    #[default]
    Auto,
    #[serde(rename = "tlsv1")]
    Tls1_0,
    #[serde(rename = "tlsv1.1")]
    Tls1_1,
    #[serde(rename = "tlsv1.2")]
    Tls1_2,
    #[serde(rename = "tlsv1.3")]
    Tls1_3,
    #[serde(rename = "sslv3")]
    Ssl3,
}

impl TlsVersion {
    pub fn curl_flag(self) -> Option<&'static str> {
        match self {
            TlsVersion::Auto => None,
            TlsVersion::Tls1_0 => Some("--tlsv1"),
            TlsVersion::Tls1_1 => Some("--tlsv1.1"),
            TlsVersion::Tls1_2 => Some("--tlsv1.2"),
            TlsVersion::Tls1_3 => Some("--tlsv1.3"),
            TlsVersion::Ssl3 => Some("--sslv3"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProxyKind {
    #[default]
    Http,
    Https,
    Socks4,
    Socks4a,
    Socks5,
    Socks5Hostname,
}

impl ProxyKind {
    pub fn curl_flag(self) -> &'static str {
        match self {
            ProxyKind::Http | ProxyKind::Https => "-x",
            ProxyKind::Socks4 => "--socks4",
            ProxyKind::Socks4a => "--socks4a",
            ProxyKind::Socks5 => "--socks5",
            ProxyKind::Socks5Hostname => "--socks5-hostname",
        }
    }
}
