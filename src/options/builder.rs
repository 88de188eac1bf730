use super::{
    entries::{Cookie, FormField, KeyValue},
    kinds::{AuthKind, BodyKind, HttpMethod, HttpVersion, ProxyKind, RawContentType},
    request::RequestOptions,
};

/// Step-by-step construction of a [`RequestOptions`] value.
///
/// Only the common settings have dedicated setters; anything else goes
/// through [`RequestOptionsBuilder::configure`].
#[derive(Debug, Clone, Default)]
pub struct RequestOptionsBuilder {
    options: RequestOptions,
}

impl RequestOptionsBuilder {
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.options.url = url.into();
        self
    }

    pub fn method(mut self, method: HttpMethod) -> Self {
        self.options.method = method;
        self
    }

    pub fn custom_method(mut self, verb: impl Into<String>) -> Self {
        self.options.custom_method = verb.into();
        self
    }

    pub fn http_version(mut self, version: HttpVersion) -> Self {
        self.options.http_version = version;
        self
    }

    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.headers.push(KeyValue::new(key, value));
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.options.user_agent = agent.into();
        self
    }

    pub fn raw_body(mut self, content_type: RawContentType, text: impl Into<String>) -> Self {
        self.options.body.kind = BodyKind::Raw;
        self.options.body.raw_type = content_type;
        self.options.body.raw = text.into();
        self
    }

    pub fn form_field(mut self, field: FormField) -> Self {
        self.options.body.kind = BodyKind::FormData;
        self.options.body.form_data.push(field);
        self
    }

    pub fn url_encoded(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.body.kind = BodyKind::UrlEncoded;
        self.options.body.url_encoded.push(KeyValue::new(key, value));
        self
    }

    pub fn binary_body(mut self, path: impl Into<String>) -> Self {
        self.options.body.kind = BodyKind::Binary;
        self.options.body.binary_path = path.into();
        self
    }

    pub fn basic_auth(self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials(AuthKind::Basic, username, password)
    }

    pub fn credentials(
        mut self,
        kind: AuthKind,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.options.auth.kind = kind;
        self.options.auth.username = username.into();
        self.options.auth.password = password.into();
        self
    }

    pub fn bearer(mut self, token: impl Into<String>) -> Self {
        self.options.auth.kind = AuthKind::Bearer;
        self.options.auth.bearer_token = token.into();
        self
    }

    pub fn proxy(mut self, kind: ProxyKind, host: impl Into<String>, port: impl Into<String>) -> Self {
        self.options.proxy.enabled = true;
        self.options.proxy.kind = kind;
        self.options.proxy.host = host.into();
        self.options.proxy.port = port.into();
        self
    }

    pub fn cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.cookies.entries.push(Cookie::new(name, value));
        self
    }

    pub fn follow_redirects(mut self, follow: bool) -> Self {
        self.options.redirects.follow = follow;
        self
    }

    pub fn include_headers(mut self, include: bool) -> Self {
        self.options.output.include_headers = include;
        self
    }

    pub fn resolve(mut self, host: impl Into<String>, mapping: impl Into<String>) -> Self {
        self.options.dns.resolve.push(KeyValue::new(host, mapping));
        self
    }

    pub fn configure(mut self, update: impl FnOnce(&mut RequestOptions)) -> Self {
        update(&mut self.options);
        self
    }

    pub fn build(self) -> RequestOptions {
        self.options
    }
}
