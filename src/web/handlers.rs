use actix_web::{web, HttpResponse, Responder};
use log::{debug, info};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::store;
use crate::web::models::{BookingResponse, ChatReply, ModelsCount, Query, SearchResponse};
use crate::AppState;

const EMPTY_MESSAGE_REPLY: &str = "Please type a message.";

const STAYFINDER_PROMPT: &str = "You are a helpful AI assistant for the StayFinder app. \
    Your first job is to help users with booking, listings, FAQs, and travel advice. \
    If the user asks something unrelated, still respond politely like a general assistant.";

const GENERAL_PROMPT: &str = "You are a helpful AI assistant. \
    Your main job is to help with the StayFinder app (bookings, listings, FAQs, support). \
    But if the user asks something unrelated, you should still answer politely like a general assistant.";

pub async fn home() -> impl Responder {
    HttpResponse::Ok().json(json!({ "msg": "Welcome to StayFinder API" }))
}

pub async fn search(data: web::Data<AppState>, query: web::Json<Query>) -> impl Responder {
    let results = store::search(&data.listings, &query.filter());
    let reply = store::search_summary(results.len(), query.city.as_deref());

    info!("Search {:?} matched {} listings", query.filter(), results.len());

    HttpResponse::Ok().json(SearchResponse { results, reply })
}

pub async fn book(
    data: web::Data<AppState>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    let fields = match payload.into_inner() {
        Value::Object(fields) => fields,
        other => {
            return Err(ApiError::BadRequest(format!(
                "booking must be a JSON object, got {}",
                other
            )))
        }
    };

    let booking = data.bookings.create(fields)?;
    info!("Stored booking {} ({} total)", booking["id"], data.bookings.len()?);

    Ok(HttpResponse::Ok().json(BookingResponse {
        msg: "Booking successful!".to_string(),
        booking,
    }))
}

// Structured chat: the message rides along with the search fields
pub async fn chat(
    data: web::Data<AppState>,
    query: web::Json<Query>,
) -> Result<HttpResponse, ApiError> {
    let message = query.message.as_deref().unwrap_or_default();
    reply_to(&data, STAYFINDER_PROMPT, message).await
}

// Raw chat: {"message": ...} with no schema
pub async fn assistant(
    data: web::Data<AppState>,
    body: web::Json<Value>,
) -> Result<HttpResponse, ApiError> {
    let message = body
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or_default();
    reply_to(&data, GENERAL_PROMPT, message).await
}

async fn reply_to(
    data: &AppState,
    system_prompt: &str,
    message: &str,
) -> Result<HttpResponse, ApiError> {
    if message.is_empty() {
        return Ok(HttpResponse::Ok().json(ChatReply {
            reply: EMPTY_MESSAGE_REPLY.to_string(),
        }));
    }

    debug!("Chat message: {}", message);

    let reply = data
        .llm
        .complete(system_prompt, message)
        .await
        .map_err(ApiError::Provider)?;

    Ok(HttpResponse::Ok().json(ChatReply { reply }))
}

pub async fn models_count(data: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let models_count = data.llm.count_models().await.map_err(ApiError::Provider)?;
    Ok(HttpResponse::Ok().json(ModelsCount { models_count }))
}
