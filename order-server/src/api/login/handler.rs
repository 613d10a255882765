//! Login API Handlers

use axum::{Json, extract::State};
use http::HeaderMap;
use shared::models::{
    ConsumeCodeRequest, ConsumeCodeResponse, CreateCodeRequest, CreateCodeResponse,
    SessionResponse,
};

use super::cookies::{
    ACCESS_COOKIE, REFRESH_COOKIE, read_token, refresh_headers, sign_in_headers,
    sign_out_headers,
};
use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// POST /api/v1/login/signinup/code - 发送验证码
pub async fn create_code(
    State(state): State<ServerState>,
    Json(payload): Json<CreateCodeRequest>,
) -> AppResult<Json<CreateCodeResponse>> {
    tracing::info!("POST signinup/code");
    let phone = payload.phone_number.trim();
    if phone.is_empty() {
        return Err(AppError::invalid_request("phoneNumber is required"));
    }
    let response = state.auth_service().create_code(phone).await?;
    Ok(Json(response))
}

/// POST /api/v1/login/signinup/code/consume - 校验验证码
pub async fn consume_code(
    State(state): State<ServerState>,
    Json(payload): Json<ConsumeCodeRequest>,
) -> AppResult<(HeaderMap, Json<ConsumeCodeResponse>)> {
    tracing::info!("POST signinup/code/consume");
    let outcome = state.auth_service().consume_code(&payload).await?;
    let headers = match &outcome.tokens {
        Some(tokens) => sign_in_headers(tokens)?,
        None => HeaderMap::new(),
    };
    Ok((headers, Json(outcome.response)))
}

/// POST /api/v1/login/session/refresh - 刷新会话
pub async fn refresh_session(
    State(state): State<ServerState>,
    headers: HeaderMap,
) -> AppResult<(HeaderMap, Json<SessionResponse>)> {
    tracing::info!("POST session/refresh");
    let refresh_token = read_token(&headers, REFRESH_COOKIE);
    match state.auth_service().refresh(refresh_token.as_deref()).await? {
        Some(tokens) => Ok((
            refresh_headers(&tokens)?,
            Json(SessionResponse::Ok { session: None }),
        )),
        None => Ok((HeaderMap::new(), Json(SessionResponse::Unauthorised))),
    }
}

/// POST /api/v1/login/signout - 退出登录
pub async fn sign_out(
    State(state): State<ServerState>,
    headers: HeaderMap,
) -> AppResult<(HeaderMap, Json<SessionResponse>)> {
    tracing::info!("POST signout");
    let access_token = read_token(&headers, ACCESS_COOKIE);
    state.auth_service().sign_out(access_token.as_deref()).await?;
    Ok((sign_out_headers()?, Json(SessionResponse::Ok { session: None })))
}

/// GET /api/v1/login/session/verify - 校验会话
pub async fn verify_session(
    State(state): State<ServerState>,
    headers: HeaderMap,
) -> AppResult<Json<SessionResponse>> {
    tracing::info!("GET session/verify");
    let access_token = read_token(&headers, ACCESS_COOKIE);
    let response = state.auth_service().verify(access_token.as_deref()).await?;
    Ok(Json(response))
}
