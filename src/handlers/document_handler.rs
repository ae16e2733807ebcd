use actix_web::{delete, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    errors::AppError,
    services::document_processor::UploadedFile,
};

#[post("/api/documents/{filename}")]
async fn upload_document(
    state: web::Data<AppState>,
    filename: web::Path<String>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let upload = UploadedFile::new(filename.into_inner(), body.to_vec());

    // File IO runs on the blocking pool, outside the write lock.
    let loader = state.documents.read().await.loader();
    let loaded = web::block(move || loader.load(vec![upload])).await??;

    let summary = state.documents.write().await.record(loaded);
    Ok(HttpResponse::Ok().json(summary))
}

#[delete("/api/documents")]
async fn clear_documents(state: web::Data<AppState>) -> HttpResponse {
    state.documents.write().await.clear();
    HttpResponse::NoContent().finish()
}
