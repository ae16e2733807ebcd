use actix_web::{get, post, web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    models::{
        domain::ChoiceKey,
        dto::{
            request::{GenerateQuizRequest, SubmitAnswerRequest},
            response::QuizCreatedResponse,
        },
    },
    services::quiz_session::Direction,
};

#[post("/api/quiz")]
async fn create_quiz(
    state: web::Data<AppState>,
    request: web::Json<GenerateQuizRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let documents = state.documents.read().await.pages().to_vec();
    let built = state
        .quiz_builder
        .build_quiz(&documents, &request.topic, request.num_questions)
        .await?;

    let response = QuizCreatedResponse {
        topic: built.session.bank().topic().to_string(),
        question_count: built.session.len(),
        chunk_count: built.chunk_count,
        current: built.session.current_question(),
    };
    *state.session.write().await = Some(built.session);

    Ok(HttpResponse::Created().json(response))
}

#[get("/api/quiz/current")]
async fn current_question(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let session = state.session.read().await;
    let session = session.as_ref().ok_or(AppError::NoActiveSession)?;
    Ok(HttpResponse::Ok().json(session.current_question()))
}

async fn navigate(state: &AppState, direction: Direction) -> Result<HttpResponse, AppError> {
    let mut session = state.session.write().await;
    let session = session.as_mut().ok_or(AppError::NoActiveSession)?;
    session.advance(direction);
    Ok(HttpResponse::Ok().json(session.current_question()))
}

#[post("/api/quiz/next")]
async fn next_question(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    navigate(&state, Direction::Next).await
}

#[post("/api/quiz/previous")]
async fn previous_question(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    navigate(&state, Direction::Previous).await
}

#[post("/api/quiz/answer")]
async fn submit_answer(
    state: web::Data<AppState>,
    request: web::Json<SubmitAnswerRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;
    let key: ChoiceKey = request.key.parse()?;

    let mut session = state.session.write().await;
    let session = session.as_mut().ok_or(AppError::NoActiveSession)?;
    Ok(HttpResponse::Ok().json(session.submit_answer(key)))
}
