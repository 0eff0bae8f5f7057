//! Shared utilities for integration tests.

use std::net::SocketAddr;
use tempfile::TempDir;
use tokio::net::TcpListener;
use wiki_server::config::WikiConfig;
use wiki_server::http::HttpServer;
use wiki_server::lifecycle::Shutdown;

/// A running wiki bound to an ephemeral port, storing pages in a temp dir.
pub struct TestWiki {
    pub addr: SocketAddr,
    pub data_dir: TempDir,
    pub shutdown: Shutdown,
}

impl TestWiki {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestWiki {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start a wiki with built-in templates.
pub async fn start_wiki() -> TestWiki {
    start_wiki_with(|_| {}).await
}

/// Start a wiki after letting the caller adjust the configuration.
pub async fn start_wiki_with<F>(customize: F) -> TestWiki
where
    F: FnOnce(&mut WikiConfig),
{
    let data_dir = tempfile::tempdir().unwrap();
    let mut config = WikiConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.storage.data_dir = data_dir.path().to_path_buf();
    customize(&mut config);

    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(config).unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestWiki {
        addr,
        data_dir,
        shutdown,
    }
}

/// A client that reports redirects instead of following them.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}
