use crate::models::*;
use crate::services::DrawService;
use actix_web::{HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    post,
    path = "/roster/participants",
    tag = "roster",
    request_body = LoadParticipantsRequest,
    responses(
        (status = 200, description = "导入参与者名单成功", body = LoadParticipantsResponse),
        (status = 400, description = "名单中没有有效的参与者"),
        (status = 409, description = "抽奖进行中")
    )
)]
/// 导入参与者名单，整体替换并重置抽奖结果与奖项选择
pub async fn load_participants(
    service: web::Data<DrawService>,
    request: web::Json<LoadParticipantsRequest>,
) -> Result<HttpResponse> {
    match service.load_participants(request.into_inner()).await {
        Ok(data) => {
            let message = format!("Loaded {} participants", data.count);
            Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(data, message)))
        }
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/roster/prizes",
    tag = "roster",
    request_body = LoadPrizesRequest,
    responses(
        (status = 200, description = "导入奖项成功", body = LoadPrizesResponse),
        (status = 400, description = "没有有效的奖项"),
        (status = 409, description = "抽奖进行中")
    )
)]
/// 导入奖项设定，整体替换并重置抽奖结果与奖项选择
pub async fn load_prizes(
    service: web::Data<DrawService>,
    request: web::Json<LoadPrizesRequest>,
) -> Result<HttpResponse> {
    match service.load_prizes(request.into_inner()).await {
        Ok(data) => {
            let message = format!(
                "Loaded {} prizes, {} slots in total",
                data.count, data.total_quantity
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(data, message)))
        }
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/roster/tags",
    tag = "roster",
    responses(
        (status = 200, description = "获取标签列表成功", body = TagListResponse)
    )
)]
/// 标签字典（筛选项）与名单中出现的标签
pub async fn get_tags(service: web::Data<DrawService>) -> Result<HttpResponse> {
    let data = service.list_tags().await;
    Ok(HttpResponse::Ok().json(ApiResponse::success(data)))
}

/// 路由配置
pub fn roster_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/roster")
            .route("/participants", web::post().to(load_participants))
            .route("/prizes", web::post().to(load_prizes))
            .route("/tags", web::get().to(get_tags)),
    );
}
