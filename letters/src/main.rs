use std::env;
use std::sync::Arc;

use actix_web::HttpServer;
use common::{
    context::effectfull_context::ServiceState, entities::letter::Letter,
    repository::mongo_repository::MongoRepository,
};
use letters::create_app;
use mongodb::bson::oid::ObjectId;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let mongo_uri = env::var("MONGOURI").unwrap();

    let letters: MongoRepository<Letter<ObjectId>> =
        MongoRepository::new(&mongo_uri, "letters", "letters").await;

    let mut state = ServiceState::new();
    state.insert::<Letter<ObjectId>>(Arc::new(letters));
    let state = Arc::new(state);

    HttpServer::new(move || create_app(state.clone()))
        .bind(("0.0.0.0", 3002))?
        .run()
        .await
}
