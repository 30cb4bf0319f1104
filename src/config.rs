use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// ログフィルタの既定値（`RUST_LOG`未設定時）
pub const DEFAULT_LOG_FILTER: &str = "library_catalog=debug,tower_http=debug";

/// サーバー設定
///
/// 環境変数から読み込む：
/// - `HOST`: 待ち受けアドレス（既定 `0.0.0.0`）
/// - `PORT`: 待ち受けポート（既定 `3000`）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: IpAddr,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 3000,
        }
    }
}

impl ServerConfig {
    /// 環境変数から設定を読み込む
    ///
    /// 解釈できない値は警告を出して既定値を使う。
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let host = match lookup("HOST") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "invalid HOST, using default");
                defaults.host
            }),
            None => defaults.host,
        };

        let port = match lookup("PORT") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "invalid PORT, using default");
                defaults.port
            }),
            None => defaults.port,
        };

        Self { host, port }
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
