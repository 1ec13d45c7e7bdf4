use std::io;

use eyre::{Context, Result};
use fnchat::app::{App, AppContext};
use fnchat::cli::Command;
use fnchat::config::{Configuration, init_logger, verbose};

#[tokio::main]
async fn main() -> Result<()> {
    let cmd = Command::new();
    if cmd.version() {
        cmd.print_version();
        return Ok(());
    }

    std::panic::set_hook(Box::new(|panic_info| {
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));

    let config = cmd.get_config()?;
    init_logger(&config.log)?;
    Configuration::init(config.clone())?;
    verbose!("[+] Logger initialized");

    let route = cmd.initial_route()?;
    let credentials = cmd.credentials()?;

    verbose!("[+] Initializing context...");
    let mut ctx = AppContext::init(&config)
        .await
        .wrap_err("initializing context")?;
    verbose!("[+] Context initialized");

    if let Some((username, password)) = credentials {
        verbose!("[+] Logging in as {}...", username);
        ctx.login(&username, &password)
            .await
            .wrap_err("logging in")?;
    }

    let mut app = App::new(ctx, io::stdout());
    let input = tokio::io::BufReader::new(tokio::io::stdin());
    if let Err(err) = app.run(route, input).await {
        eprintln!("Error: {:#}", err);
    }

    Ok(())
}
