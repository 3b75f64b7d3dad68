//! Bearer-token middleware.
//!
//! Compares the `Authorization: Bearer <token>` header against the
//! configured secret. A missing or malformed header is 401; a wrong
//! token is 403. Requests never reach a handler unauthenticated.

use std::rc::Rc;

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header,
    Error, ResponseError,
};
use futures::future::{ok, LocalBoxFuture, Ready};

use crate::errors::ApiError;

pub struct BearerAuth {
    token: Rc<String>,
}

impl BearerAuth {
    pub fn new(token: String) -> Self {
        Self { token: Rc::new(token) }
    }
}

impl<S, B> Transform<S, ServiceRequest> for BearerAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = BearerAuthService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(BearerAuthService {
            service: Rc::new(service),
            token: Rc::clone(&self.token),
        })
    }
}

pub struct BearerAuthService<S> {
    service: Rc<S>,
    token: Rc<String>,
}

enum Gate {
    Missing,
    Wrong,
    Accepted,
}

impl<S, B> Service<ServiceRequest> for BearerAuthService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let expected = Rc::clone(&self.token);

        let gate = {
            let supplied = req
                .headers()
                .get(header::AUTHORIZATION)
                .and_then(|h| h.to_str().ok())
                .and_then(|h| h.strip_prefix("Bearer "));
            match supplied {
                None => Gate::Missing,
                Some(token) if token == expected.as_str() => Gate::Accepted,
                Some(_) => Gate::Wrong,
            }
        };

        Box::pin(async move {
            match gate {
                Gate::Missing => {
                    let resp = ApiError::Unauthorized.error_response().map_into_right_body();
                    Ok(req.into_response(resp))
                }
                Gate::Wrong => {
                    let resp = ApiError::Forbidden.error_response().map_into_right_body();
                    Ok(req.into_response(resp))
                }
                Gate::Accepted => service
                    .call(req)
                    .await
                    .map(ServiceResponse::map_into_left_body),
            }
        })
    }
}
