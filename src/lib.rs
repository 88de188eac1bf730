pub mod command;
pub mod diff;
pub mod env;
pub mod options;
pub mod response;
pub mod shell;

#[cfg(feature = "cli")]
pub mod config;
#[cfg(feature = "cli")]
pub mod executor;
#[cfg(feature = "cli")]
pub mod history;
#[cfg(feature = "cli")]
pub mod printer;
#[cfg(feature = "cli")]
pub mod request_file;
#[cfg(feature = "cli")]
pub mod session;
