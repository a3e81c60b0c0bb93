use std::net::TcpListener;

use env_logger::Env;
use scout::{configuration::get_configuration, startup::run_analyze};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let configuration = get_configuration().expect("Failed to read configuration.");
    let address = format!(
        "{}:{}",
        configuration.application.host, configuration.application.analyze_port
    );
    let listener = TcpListener::bind(address)?;

    run_analyze(listener, configuration)?.await
}
