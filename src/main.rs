#[tokio::main]
async fn main() -> std::io::Result<()> {
    prompt_gateway::run_with_config().await
}
