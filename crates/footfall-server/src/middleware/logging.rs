//! Request/response logging middleware.

use std::rc::Rc;
use std::time::Instant;

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error,
};
use futures::future::{ok, LocalBoxFuture, Ready};
use tracing::{info, warn};

pub struct RequestLog;

impl<S, B> Transform<S, ServiceRequest> for RequestLog
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = RequestLogService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(RequestLogService {
            service: Rc::new(service),
        })
    }
}

pub struct RequestLogService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequestLogService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let method = req.method().to_string();
        let path = req.path().to_string();
        let start = Instant::now();

        Box::pin(async move {
            let result = service.call(req).await;
            let duration_ms = start.elapsed().as_millis() as u64;

            match &result {
                Ok(res) => {
                    let status = res.status().as_u16();
                    if status >= 400 {
                        warn!(%method, %path, status, duration_ms, "Request completed with error");
                    } else {
                        info!(%method, %path, status, duration_ms, "Request completed");
                    }
                }
                Err(e) => {
                    warn!(%method, %path, error = %e, duration_ms, "Request failed");
                }
            }

            result
        })
    }
}
