#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;

use std::io::{self, BufRead};

use clap::Parser;
use eyre::{Context, Result, bail};

use crate::config::{self, Configuration, load_configuration, lookup_config_path};
use crate::router::Route;

pub const PASSWORD_ENV: &str = "FNCHAT_PASSWORD";

#[derive(Debug, Parser)]
#[command(
    version,
    about,
    long_about = r#"A terminal client for the fnchatbot chat backend

Default configuration file location looks up in the following order:
    * $XDG_CONFIG_HOME/fnchat/config.toml
    * $HOME/.config/fnchat/config.toml
    * $HOME/.fnchat.toml
"#,
    disable_version_flag = true
)]
pub struct Command {
    /// Configuration file path
    #[arg(short, long, value_name = "PATH")]
    config: Option<String>,

    /// Show the version
    #[arg(short, long)]
    version: bool,

    /// Open this conversation instead of starting a new one
    #[arg(long, value_name = "ID")]
    conversation: Option<String>,

    /// Log in as this user before starting. The password is read from
    /// FNCHAT_PASSWORD or the first line of stdin
    #[arg(long, value_name = "NAME")]
    username: Option<String>,

    /// Initial route, e.g. /settings or /chat/<id>
    #[arg(long, value_name = "PATH", default_value = "/")]
    route: String,
}

impl Command {
    pub fn new() -> Command {
        Self::parse()
    }

    pub fn get_config(&self) -> Result<Configuration> {
        let config_path = self
            .config
            .clone()
            .unwrap_or_else(|| lookup_config_path().unwrap_or_default());

        if config_path.is_empty() {
            // No config path is specified just use the default config
            return Ok(Configuration::default());
        }
        load_configuration(config_path.as_str()).wrap_err("loading configuration")
    }

    pub fn version(&self) -> bool {
        self.version
    }

    pub fn print_version(&self) {
        println!("{}", config::version())
    }

    /// `--conversation` wins over `--route`.
    pub fn initial_route(&self) -> Result<Route> {
        if let Some(id) = self.conversation.as_deref() {
            if id.is_empty() || id.contains('/') {
                bail!("invalid conversation id: {}", id);
            }
            return Ok(Route::Chat(id.to_string()));
        }
        self.route.parse().wrap_err("parsing --route")
    }

    /// Username and password for a non-interactive login, if requested.
    pub fn credentials(&self) -> Result<Option<(String, String)>> {
        let Some(username) = self.username.clone() else {
            return Ok(None);
        };

        let password = match std::env::var(PASSWORD_ENV) {
            Ok(password) => password,
            Err(_) => {
                let mut line = String::new();
                io::stdin()
                    .lock()
                    .read_line(&mut line)
                    .wrap_err("reading password from stdin")?;
                line.trim_end_matches(['\r', '\n']).to_string()
            }
        };
        Ok(Some((username, password)))
    }
}
