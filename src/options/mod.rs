mod builder;
mod entries;
mod kinds;
mod request;

use thiserror::Error;

pub use builder::RequestOptionsBuilder;
pub use entries::{Cookie, FormField, KeyValue};
pub use kinds::{AuthKind, BodyKind, HttpMethod, HttpVersion, ProxyKind, RawContentType, TlsVersion};
pub use request::{
    AuthOptions, BodyOptions, ConnectionOptions, CookieOptions, DnsOptions, MiscOptions,
    NetworkOptions, OutputOptions, ProxyOptions, RedirectOptions, RequestOptions, TlsOptions,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionsError {
    #[error("unknown HTTP method: {0}")]
    UnknownMethod(String),
}
