use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};
use futures_util::future::{ok, LocalBoxFuture, Ready};
use std::rc::Rc;
use std::time::Instant;

/// Logs every request that ends in a server error, including failures raised by
/// inner services before a response exists.
pub struct ErrorLogging;

impl<S, B> Transform<S, ServiceRequest> for ErrorLogging
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = ErrorLoggingService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(ErrorLoggingService {
            service: Rc::new(service),
        })
    }
}

pub struct ErrorLoggingService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for ErrorLoggingService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let method = req.method().to_string();
        let path = req.path().to_string();
        let started = Instant::now();

        Box::pin(async move {
            match service.call(req).await {
                Ok(res) => {
                    let status = res.status();
                    if status.is_server_error() {
                        let cause = res
                            .response()
                            .error()
                            .map(|e| e.to_string())
                            .unwrap_or_default();
                        tracing::error!(
                            %method,
                            %path,
                            status = status.as_u16(),
                            elapsed_ms = started.elapsed().as_millis() as u64,
                            cause = %cause,
                            "Request failed"
                        );
                    }
                    Ok(res)
                }
                Err(e) => {
                    tracing::error!(
                        %method,
                        %path,
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        error = %e,
                        "Request failed"
                    );
                    Err(e)
                }
            }
        })
    }
}
