use clap::Parser;

#[tokio::main]
async fn main() {
    let cli = hostswitch::cli::Cli::parse();
    if let Err(e) = hostswitch::cmd::dispatch(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
