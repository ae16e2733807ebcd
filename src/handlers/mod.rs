pub mod document_handler;
pub mod quiz_handler;

use actix_web::{get, web, HttpResponse};

pub use document_handler::{clear_documents, upload_document};
pub use quiz_handler::{
    create_quiz, current_question, next_question, previous_question, submit_answer,
};

#[get("/health")]
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health_check)
        .service(upload_document)
        .service(clear_documents)
        .service(create_quiz)
        .service(current_question)
        .service(next_question)
        .service(previous_question)
        .service(submit_answer);
}
