use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::marks::requests::{CreateMarkRequest, MarkListParams, UpdateMarkRequest};
use crate::services::MarkService;
use crate::utils::SafeIDI64;

// 懒加载的全局 MARK_SERVICE 实例
static MARK_SERVICE: Lazy<MarkService> = Lazy::new(MarkService::new_lazy);

pub async fn list_marks(
    req: HttpRequest,
    query: web::Query<MarkListParams>,
) -> ActixResult<HttpResponse> {
    MARK_SERVICE.list_marks(&req, query.into_inner()).await
}

pub async fn create_mark(
    req: HttpRequest,
    mark_data: web::Json<CreateMarkRequest>,
) -> ActixResult<HttpResponse> {
    MARK_SERVICE.create_mark(&req, mark_data.into_inner()).await
}

pub async fn get_mark(req: HttpRequest, mark_id: SafeIDI64) -> ActixResult<HttpResponse> {
    MARK_SERVICE.get_mark(&req, mark_id.0).await
}

pub async fn update_mark(
    req: HttpRequest,
    mark_id: SafeIDI64,
    update_data: web::Json<UpdateMarkRequest>,
) -> ActixResult<HttpResponse> {
    MARK_SERVICE
        .update_mark(&req, mark_id.0, update_data.into_inner())
        .await
}

pub async fn delete_mark(req: HttpRequest, mark_id: SafeIDI64) -> ActixResult<HttpResponse> {
    MARK_SERVICE.delete_mark(&req, mark_id.0).await
}

// 配置路由
pub fn configure_marks_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/marks")
            .service(
                web::resource("")
                    .route(web::get().to(list_marks))
                    .route(web::post().to(create_mark)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_mark))
                    .route(web::put().to(update_mark))
                    .route(web::delete().to(delete_mark)),
            ),
    );
}
