use log::info;

use lighter_gateway::server::{start_server, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env의 RUST_LOG도 반영되도록 로거보다 먼저 로드
    let dotenv_result = dotenv::dotenv();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match dotenv_result {
        Ok(path) => info!(".env 로드 완료: {}", path.display()),
        Err(e) => info!(".env 파일 없음 (또는 로드 실패): {}", e),
    }

    let config = ServerConfig::from_env();
    start_server(config).await
}
