use crate::models::*;
use crate::services::DrawService;
use actix_web::{HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    get,
    path = "/draw/eligible",
    tag = "draw",
    params(
        ("tags" = Option<String>, Query, description = "额外筛选标签，逗号分隔")
    ),
    responses(
        (status = 200, description = "获取候选名单成功", body = EligiblePoolResponse),
        (status = 400, description = "尚未选择奖项")
    )
)]
/// 所选奖项的候选名单，供前端播放滚动名单
pub async fn get_eligible(
    service: web::Data<DrawService>,
    query: web::Query<EligibleQuery>,
) -> Result<HttpResponse> {
    match service.eligible_pool(query.into_inner()).await {
        Ok(data) => Ok(HttpResponse::Ok().json(ApiResponse::success(data))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/draw",
    tag = "draw",
    request_body = DrawRequest,
    responses(
        (status = 200, description = "抽奖成功", body = DrawResponse),
        (status = 400, description = "尚未选择奖项"),
        (status = 409, description = "奖项已抽完或抽奖进行中"),
        (status = 422, description = "没有符合条件的参与者，或批次抽奖人数不足"),
        (status = 500, description = "内部一致性错误，会话已暂停"),
        (status = 503, description = "会话已暂停，需要重置")
    )
)]
/// 对所选奖项抽奖:
/// 1. 合并奖项标签与额外筛选标签
/// 2. 过滤已中奖者与不符合标签者
/// 3. 单抽一名，或批次抽完全部剩余名额
/// 4. 原子提交并返回得奖者
pub async fn draw(
    service: web::Data<DrawService>,
    request: web::Json<DrawRequest>,
) -> Result<HttpResponse> {
    match service.draw(request.into_inner()).await {
        Ok(data) => {
            let names: Vec<&str> = data.winners.iter().map(|w| w.name.as_str()).collect();
            let message = format!("{} won {}", names.join(", "), data.prize.name);
            Ok(HttpResponse::Ok().json(ApiResponse::success_with_message(data, message)))
        }
        Err(e) => Ok(e.error_response()),
    }
}

pub fn draw_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/draw")
            .route("", web::post().to(draw))
            .route("/eligible", web::get().to(get_eligible)),
    );
}
