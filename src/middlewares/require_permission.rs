/*!
 * 权限校验中间件
 *
 * 必须在 RequireJWT 之后执行。角色直接持有权限或其 `_own` 形式时放行，
 * 具体资源的归属判定留给服务层完成。
 *
 * ```rust,ignore
 * web::resource("")
 *     .route(web::post().to(create_course).wrap(RequirePermission::new(perm::COURSES_WRITE)))
 * ```
 */

use actix_service::{Service, Transform};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{ServiceRequest, ServiceResponse},
    http::StatusCode,
};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use std::rc::Rc;
use tracing::info;

use crate::models::users::entities::User;
use crate::rbac::{self, Actor};

use super::create_error_response;

#[derive(Clone)]
pub struct RequirePermission {
    permissions: Rc<Vec<&'static str>>,
}

impl RequirePermission {
    pub fn new(permission: &'static str) -> Self {
        Self {
            permissions: Rc::new(vec![permission]),
        }
    }

    /// 任一权限满足即可
    pub fn any(permissions: &[&'static str]) -> Self {
        Self {
            permissions: Rc::new(permissions.to_vec()),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequirePermission
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RequirePermissionMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequirePermissionMiddleware {
            service: Rc::new(service),
            permissions: self.permissions.clone(),
        }))
    }
}

pub struct RequirePermissionMiddleware<S> {
    service: Rc<S>,
    permissions: Rc<Vec<&'static str>>,
}

impl<S, B> Service<ServiceRequest> for RequirePermissionMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        ctx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let srv = self.service.clone();
        let permissions = self.permissions.clone();

        Box::pin(async move {
            let actor = req.extensions().get::<User>().map(Actor::from);

            let Some(actor) = actor else {
                return Ok(req.into_response(
                    create_error_response(StatusCode::UNAUTHORIZED, "Authentication required")
                        .map_into_right_body(),
                ));
            };

            if permissions
                .iter()
                .any(|permission| rbac::may_attempt(Some(&actor), permission))
            {
                let res = srv.call(req).await?.map_into_left_body();
                return Ok(res);
            }

            info!(
                "Access denied to {} for user {} (role: {:?}, required: {:?})",
                req.path(),
                actor.id,
                actor.role,
                permissions
            );
            Ok(req.into_response(
                create_error_response(StatusCode::FORBIDDEN, "Insufficient permissions")
                    .map_into_right_body(),
            ))
        })
    }
}
