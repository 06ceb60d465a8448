// Shared bootstrap for integration tests: a real gateway on an ephemeral port.
use prompt_gateway::GatewayConfig;
use std::net::IpAddr;

// Config pointing the gateway at a mock upstream.
pub fn config_for(upstream_base_url: &str, api_key: Option<&str>) -> GatewayConfig {
    GatewayConfig {
        host: IpAddr::from([127, 0, 0, 1]),
        port: 0,
        api_key: api_key.map(str::to_string),
        model: "gpt-4o-mini".to_string(),
        openai_base_url: upstream_base_url.to_string(),
    }
}

// Spawn the gateway on the current runtime and return its base URL.
pub async fn spawn_gateway(config: GatewayConfig) -> String {
    // Bind to an ephemeral port to avoid collisions with local services.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral test port");
    let addr = listener.local_addr().expect("get local addr");

    tokio::spawn(async move {
        prompt_gateway::run(listener, config)
            .await
            .expect("server failed");
    });

    format!("http://{addr}")
}
