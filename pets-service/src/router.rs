//! Route table for the pets API
//!
//! | Method | Path        | Pipeline   |
//! |--------|-------------|------------|
//! | POST   | /pets       | create     |
//! | PUT    | /pets       | update     |
//! | GET    | /pets       | search     |
//! | GET    | /pets/{id}  | get by id  |
//! | DELETE | /pets/{id}  | delete     |

use std::sync::Arc;

use axum::extract::Request;
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use futures::future::{BoxFuture, FutureExt};

use crate::pets::{Endpoint, Endpoints, Service};
use crate::web::{Decoder, Encoder, Handler, PetDecoders, PetEncoders};

/// Builds the pets routes on top of `service`.
pub fn pets_router(service: Arc<Service>) -> Router {
    let endpoints = Endpoints::new(service);
    let decoders = PetDecoders::new();
    let encoders = PetEncoders::new();

    let create = Handler::new()
        .with_decoder(decoders.create)
        .with_endpoint(endpoints.create)
        .with_encoder(encoders.create);

    let update = Handler::new()
        .with_decoder(decoders.update)
        .with_endpoint(endpoints.update)
        .with_encoder(encoders.update);

    let search = Handler::new()
        .with_decoder(decoders.search)
        .with_endpoint(endpoints.search)
        .with_encoder(encoders.search);

    let get_by_id = Handler::new()
        .with_decoder(decoders.get_by_id)
        .with_endpoint(endpoints.get_with_id)
        .with_encoder(encoders.get_by_id);

    let delete = Handler::new()
        .with_decoder(decoders.delete)
        .with_endpoint(endpoints.delete)
        .with_encoder(encoders.delete);

    Router::new()
        .route(
            "/pets",
            post(pipeline(create))
                .put(pipeline(update))
                .get(pipeline(search)),
        )
        .route(
            "/pets/{id}",
            get(pipeline(get_by_id)).delete(pipeline(delete)),
        )
}

/// Turns a complete [`Handler`] into an axum handler function.
fn pipeline<D, E, C>(
    handler: Handler<D, E, C>,
) -> impl Fn(Request) -> BoxFuture<'static, Response> + Clone + Send + Sync + 'static
where
    D: Decoder + 'static,
    E: Endpoint<Request = D::Request> + 'static,
    C: Encoder<Result = E::Response> + 'static,
{
    let handler = Arc::new(handler);
    move |request: Request| {
        let handler = Arc::clone(&handler);
        async move { handler.serve(request).await }.boxed()
    }
}
