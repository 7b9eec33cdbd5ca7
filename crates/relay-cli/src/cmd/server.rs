use clap::Args;
use relay_core::config::Config;
use std::path::PathBuf;

#[derive(Args, Default)]
pub struct ServerArgs {
    /// Port number for the server
    #[arg(long)]
    pub port: Option<u16>,

    /// Directory holding the browser UI
    #[arg(long, env = "RELAY_STATIC_DIR")]
    pub static_dir: Option<PathBuf>,

    /// Open the UI in a browser once listening
    #[arg(long)]
    pub open: bool,
}

pub fn run(config: Config, args: ServerArgs) -> anyhow::Result<()> {
    let config = config
        .with_port(args.port)
        .with_static_dir(args.static_dir);

    tracing::info!(
        data_file = %config.data_file.display(),
        static_dir = %config.static_dir.display(),
        "starting server"
    );

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(relay_server::serve(config, args.open))
}
