use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub draw: DrawConfig,
    #[serde(default)]
    pub cors: CorsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrawConfig {
    /// 提交后延迟返回结果的时长（毫秒），供前端播放滚动名单
    #[serde(default = "default_reveal_delay_ms")]
    pub reveal_delay_ms: u64,
    /// 设置后使用固定种子的随机源
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

fn default_reveal_delay_ms() -> u64 {
    1600
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CorsConfig {
    /// 允许的来源；为空表示不限
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl Default for DrawConfig {
    fn default() -> Self {
        Self {
            reveal_delay_ms: default_reveal_delay_ms(),
            rng_seed: None,
        }
    }
}

impl Config {
    pub fn from_toml() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        // 尝试读取配置文件，如果不存在则完全依赖环境变量
        let mut config: Config = match std::fs::read_to_string(&config_path) {
            Ok(config_str) => Self::parse(&config_str)?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("Config file {config_path} not found, using environment and defaults");
                Config {
                    server: ServerConfig {
                        host: "0.0.0.0".to_string(),
                        port: 8080,
                    },
                    draw: DrawConfig::default(),
                    cors: CorsConfig::default(),
                }
            }
            Err(e) => {
                return Err(format!("无法读取配置文件 {config_path}: {e}").into());
            }
        };

        config.apply_env_overrides();
        Ok(config)
    }

    pub fn parse(config_str: &str) -> Result<Self, Box<dyn std::error::Error>> {
        toml::from_str(config_str).map_err(|e| format!("解析配置文件失败: {e}").into())
    }

    /// 环境变量覆盖（即便文件存在时也覆盖）
    fn apply_env_overrides(&mut self) {
        if let Ok(v) = env::var("SERVER_HOST") {
            self.server.host = v;
        }
        if let Ok(v) = env::var("SERVER_PORT")
            && let Ok(p) = v.parse()
        {
            self.server.port = p;
        }
        if let Ok(v) = env::var("DRAW_REVEAL_DELAY_MS")
            && let Ok(ms) = v.parse()
        {
            self.draw.reveal_delay_ms = ms;
        }
        if let Ok(v) = env::var("DRAW_RNG_SEED")
            && let Ok(seed) = v.parse()
        {
            self.draw.rng_seed = Some(seed);
        }
        if let Ok(v) = env::var("CORS_ALLOWED_ORIGINS") {
            self.cors.allowed_origins = v
                .split(',')
                .map(str::trim)
                .filter(|o| !o.is_empty())
                .map(str::to_string)
                .collect();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let config = Config::parse(
            r#"
            [server]
            host = "127.0.0.1"
            port = 9000

            [draw]
            reveal_delay_ms = 0
            rng_seed = 42

            [cors]
            allowed_origins = ["http://localhost:5173"]
            "#,
        )
        .unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.draw.reveal_delay_ms, 0);
        assert_eq!(config.draw.rng_seed, Some(42));
        assert_eq!(config.cors.allowed_origins, vec!["http://localhost:5173"]);
    }

    #[test]
    fn test_parse_defaults_draw_section() {
        let config = Config::parse(
            r#"
            [server]
            host = "0.0.0.0"
            port = 8080
            "#,
        )
        .unwrap();
        assert_eq!(config.draw.reveal_delay_ms, 1600);
        assert_eq!(config.draw.rng_seed, None);
        assert!(config.cors.allowed_origins.is_empty());
    }

    #[test]
    fn test_parse_rejects_invalid_toml() {
        assert!(Config::parse("[server").is_err());
    }
}
