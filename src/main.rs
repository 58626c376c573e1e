use anyhow::Result;
use clap::Parser;
use std::io;
use vows::cli::{connect, run_command, Cli};
use vows::ui::install_panic_hook;
use vows::{util, App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let paths = util::init_data_dir(cli.data_dir.clone());

    // Initialize logging to file (~/.vows/logs/vows.log)
    let log_file = paths.open_log()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .init();

    let mut config = Config::load();
    if let Some(url) = cli.api_url {
        config = config.with_api_base_url(url);
    }

    let (api, wall) = connect(&config)?;

    match cli.command {
        Some(command) => run_command(command, &config, api, wall, &mut io::stdout()).await,
        None => {
            install_panic_hook();
            let mut app = App::new(config, api, wall);
            app.run().await
        }
    }
}
