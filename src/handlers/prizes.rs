use crate::models::*;
use crate::services::DrawService;
use actix_web::{HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    get,
    path = "/prizes",
    tag = "prizes",
    responses(
        (status = 200, description = "获取奖项列表成功", body = PrizeListResponse)
    )
)]
/// 奖项列表: 剩余 / 总数、限定标签、状态，以及全部奖项的合计
pub async fn get_prizes(service: web::Data<DrawService>) -> Result<HttpResponse> {
    let data = service.list_prizes().await;
    Ok(HttpResponse::Ok().json(ApiResponse::success(data)))
}

#[utoipa::path(
    post,
    path = "/prizes/select",
    tag = "prizes",
    request_body = SelectPrizeRequest,
    responses(
        (status = 200, description = "选择奖项成功", body = PrizeResponse),
        (status = 404, description = "奖项不存在"),
        (status = 409, description = "奖项已抽完")
    )
)]
pub async fn select_prize(
    service: web::Data<DrawService>,
    request: web::Json<SelectPrizeRequest>,
) -> Result<HttpResponse> {
    match service.select_prize(request.into_inner()).await {
        Ok(data) => Ok(HttpResponse::Ok().json(ApiResponse::success(data))),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn prizes_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/prizes")
            .route("", web::get().to(get_prizes))
            .route("/select", web::post().to(select_prize)),
    );
}
