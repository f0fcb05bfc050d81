use actix_cors::Cors;

use crate::config::CorsConfig;

/// 前端页面跨域访问；未配置来源时允许任意来源
pub fn create_cors(config: &CorsConfig) -> Cors {
    let cors = if config.allowed_origins.is_empty() {
        Cors::default().allowed_origin_fn(|_, _req_head| true)
    } else {
        config
            .allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
    };

    cors.allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allow_any_header()
        .max_age(3600)
}
