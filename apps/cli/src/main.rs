use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    wholesale_cli::run().await
}
