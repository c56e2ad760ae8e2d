pub mod handlers;
pub mod service;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::body::MessageBody;
use actix_web::dev::ServiceFactory;
use actix_web::dev::ServiceRequest;
use actix_web::dev::ServiceResponse;
use actix_web::error::InternalError;
use actix_web::middleware;
use actix_web::web;
use actix_web::App;
use actix_web::HttpResponse;

use common::context::effectfull_context::ServiceState;

pub use crate::handlers::letter::*;

pub fn create_app(
    state: Arc<ServiceState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Response = ServiceResponse<impl MessageBody>,
        Config = (),
        InitError = (),
        Error = actix_web::Error,
    >,
> {
    let cors = Cors::permissive();
    // Malformed bodies answer 422 with an issue list, not actix's 400.
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        let issues = serde_json::json!([{
            "code": "invalid_body",
            "message": err.to_string(),
        }]);
        InternalError::from_response(err, HttpResponse::UnprocessableEntity().json(issues)).into()
    });
    let app = App::new()
        .wrap(cors)
        .wrap(middleware::Logger::default())
        .app_data(web::Data::new(state))
        .app_data(json_config)
        .service(get_letters)
        .service(post_letter)
        .service(get_letter)
        .service(patch_letter)
        .service(delete_letter);
    app
}
