#[tokio::main]
async fn main() -> std::io::Result<()> {
    boat_racing::run_with_config().await
}
