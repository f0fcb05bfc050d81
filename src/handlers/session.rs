use crate::models::*;
use crate::services::DrawService;
use actix_web::{HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    get,
    path = "/session",
    tag = "session",
    responses(
        (status = 200, description = "获取会话状态成功", body = SessionStatusResponse)
    )
)]
/// 会话状态: 中奖人数、剩余份数、当前奖项、是否可抽奖
pub async fn get_status(service: web::Data<DrawService>) -> Result<HttpResponse> {
    let data = service.status().await;
    Ok(HttpResponse::Ok().json(ApiResponse::success(data)))
}

#[utoipa::path(
    get,
    path = "/session/history",
    tag = "session",
    params(
        ("page" = Option<u32>, Query, description = "页码 (默认1)"),
        ("per_page" = Option<u32>, Query, description = "每页数量 (默认20)")
    ),
    responses(
        (status = 200, description = "获取抽奖记录成功")
    )
)]
/// 分页获取抽奖记录（倒序）
pub async fn get_history(
    service: web::Data<DrawService>,
    query: web::Query<HistoryQuery>,
) -> Result<HttpResponse> {
    let data = service.history(query.into_inner()).await;
    Ok(HttpResponse::Ok().json(ApiResponse::success(data)))
}

#[utoipa::path(
    post,
    path = "/session/reset",
    tag = "session",
    responses(
        (status = 200, description = "已重设抽奖记录与中奖状态", body = SessionStatusResponse),
        (status = 409, description = "抽奖进行中")
    )
)]
/// 清空中奖者与抽奖记录，全部奖项恢复名额（保留名单与当前选择）
pub async fn reset(service: web::Data<DrawService>) -> Result<HttpResponse> {
    match service.reset().await {
        Ok(data) => Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(
            data,
            "Draw records and winners have been reset".to_string(),
        ))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn session_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/session")
            .route("", web::get().to(get_status))
            .route("/history", web::get().to(get_history))
            .route("/reset", web::post().to(reset)),
    );
}
