#[tokio::main]
async fn main() -> anyhow::Result<()> {
    gamedevs::cli::run().await
}
