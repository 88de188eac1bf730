//! Compiles [`RequestOptions`] into a curl command line.
//!
//! Generation is pure: the same options always produce the same string, and
//! the URL is always the final token.

mod args;
mod auth;
mod body;
mod connection;
mod cookies;
mod network;
mod output;
mod proxy;
mod request_line;
mod tls;

use crate::{options::RequestOptions, shell::escape};

use args::Args;

pub const DEFAULT_BINARY: &str = "curl";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandGenerator {
    binary: String,
}

impl Default for CommandGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_BINARY)
    }
}

impl CommandGenerator {
    pub fn new(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Arguments after the binary name, already shell-escaped.
    pub fn args(&self, options: &RequestOptions) -> Vec<String> {
        let mut args = Args::default();
        request_line::push(&mut args, options);
        body::push(&mut args, options);
        auth::push(&mut args, &options.auth);
        tls::push(&mut args, &options.tls);
        proxy::push(&mut args, &options.proxy);
        cookies::push(&mut args, &options.cookies);
        connection::push(&mut args, &options.connection);
        connection::push_redirects(&mut args, &options.redirects);
        output::push(&mut args, &options.output);
        network::push_dns(&mut args, &options.dns);
        network::push_interface(&mut args, &options.network);
        network::push_misc(&mut args, &options.misc);
        if !options.url.is_empty() {
            args.push_escaped(&options.url);
        }
        args.into_tokens()
    }

    pub fn command(&self, options: &RequestOptions) -> String {
        let mut tokens = vec![escape(&self.binary).into_owned()];
        tokens.extend(self.args(options));
        tokens.join(" ")
    }
}

/// Renders `options` with the stock `curl` binary.
pub fn generate_command(options: &RequestOptions) -> String {
    CommandGenerator::default().command(options)
}
