use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequirePermission as Allow};
use crate::models::library::requests::{
    CheckoutRequest, CreateLibraryItemRequest, LibraryItemListParams, LoanListParams,
    UpdateLibraryItemRequest,
};
use crate::rbac::perm;
use crate::services::LibraryService;
use crate::utils::SafeIDI64;

static LIBRARY_SERVICE: Lazy<LibraryService> = Lazy::new(LibraryService::new_lazy);

pub async fn list_items(
    req: HttpRequest,
    query: web::Query<LibraryItemListParams>,
) -> ActixResult<HttpResponse> {
    LIBRARY_SERVICE.list_items(query.into_inner(), &req).await
}

pub async fn get_item(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    LIBRARY_SERVICE.get_item(id.0, &req).await
}

pub async fn create_item(
    req: HttpRequest,
    data: web::Json<CreateLibraryItemRequest>,
) -> ActixResult<HttpResponse> {
    LIBRARY_SERVICE.create_item(data.into_inner(), &req).await
}

pub async fn update_item(
    req: HttpRequest,
    id: SafeIDI64,
    data: web::Json<UpdateLibraryItemRequest>,
) -> ActixResult<HttpResponse> {
    LIBRARY_SERVICE
        .update_item(id.0, data.into_inner(), &req)
        .await
}

pub async fn delete_item(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    LIBRARY_SERVICE.delete_item(id.0, &req).await
}

pub async fn checkout(
    req: HttpRequest,
    data: web::Json<CheckoutRequest>,
) -> ActixResult<HttpResponse> {
    LIBRARY_SERVICE.checkout(data.into_inner(), &req).await
}

pub async fn return_loan(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    LIBRARY_SERVICE.return_loan(id.0, &req).await
}

pub async fn list_loans(
    req: HttpRequest,
    query: web::Query<LoanListParams>,
) -> ActixResult<HttpResponse> {
    LIBRARY_SERVICE.list_loans(query.into_inner(), &req).await
}

pub async fn get_loan(req: HttpRequest, id: SafeIDI64) -> ActixResult<HttpResponse> {
    LIBRARY_SERVICE.get_loan(id.0, &req).await
}

pub fn configure_library_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/library")
            .wrap(middlewares::RequireJWT)
            .wrap(middlewares::RateLimit::api())
            .service(
                web::resource("/items")
                    .route(web::get().to(list_items).wrap(Allow::new(perm::LIBRARY_ITEMS_READ)))
                    .route(
                        web::post()
                            .to(create_item)
                            .wrap(Allow::new(perm::LIBRARY_ITEMS_WRITE)),
                    ),
            )
            .service(
                web::resource("/items/{id}")
                    .route(web::get().to(get_item).wrap(Allow::new(perm::LIBRARY_ITEMS_READ)))
                    .route(
                        web::put()
                            .to(update_item)
                            .wrap(Allow::new(perm::LIBRARY_ITEMS_WRITE)),
                    )
                    .route(
                        web::delete()
                            .to(delete_item)
                            .wrap(Allow::new(perm::LIBRARY_ITEMS_DELETE)),
                    ),
            )
            .service(
                web::resource("/loans")
                    .route(web::get().to(list_loans).wrap(Allow::new(perm::LOANS_READ)))
                    .route(web::post().to(checkout).wrap(Allow::new(perm::LOANS_WRITE))),
            )
            .route(
                "/loans/{id}",
                web::get().to(get_loan).wrap(Allow::new(perm::LOANS_READ)),
            )
            .route(
                "/loans/{id}/return",
                web::post().to(return_loan).wrap(Allow::new(perm::LOANS_WRITE)),
            ),
    );
}
