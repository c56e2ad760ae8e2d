use actix_web::{
    delete, get, patch, post,
    web::{self, Json},
    HttpResponse,
};

use common::{
    context::GeneralContext,
    entities::letter::{CreatedLetter, Letter, LetterOverview},
    error::{self, AddCode},
};

use mongodb::bson::oid::ObjectId;

use crate::service::letter::{CreateLetter, LetterChange, LetterService};

fn parse_id(id: &str) -> error::Result<ObjectId> {
    id.parse()
        .map_err(|_| anyhow::anyhow!("Malformed letter id: {}", id).code(422))
}

#[get("/api/letters")]
pub async fn get_letters(context: GeneralContext) -> error::Result<Json<Vec<LetterOverview>>> {
    Ok(Json(LetterService::new(context).my_letters().await?))
}

#[post("/api/letters")]
pub async fn post_letter(
    context: GeneralContext,
    Json(data): web::Json<CreateLetter>,
) -> error::Result<Json<CreatedLetter>> {
    Ok(Json(LetterService::new(context).create(data).await?))
}

#[get("/api/letters/{id}")]
pub async fn get_letter(
    context: GeneralContext,
    id: web::Path<String>,
) -> error::Result<Json<Letter<String>>> {
    Ok(Json(LetterService::new(context).find(parse_id(&id)?).await?))
}

#[patch("/api/letters/{id}")]
pub async fn patch_letter(
    context: GeneralContext,
    id: web::Path<String>,
    Json(data): web::Json<LetterChange>,
) -> error::Result<HttpResponse> {
    LetterService::new(context)
        .change(parse_id(&id)?, data)
        .await?;
    Ok(HttpResponse::Ok().finish())
}

#[delete("/api/letters/{id}")]
pub async fn delete_letter(
    context: GeneralContext,
    id: web::Path<String>,
) -> error::Result<HttpResponse> {
    LetterService::new(context).delete(parse_id(&id)?).await?;
    Ok(HttpResponse::NoContent().finish())
}
