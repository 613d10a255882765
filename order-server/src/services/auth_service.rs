//! Auth Service - 模拟无密码登录 (短信验证码)
//!
//! 仅用于本地开发：token 是 `access_{sessionId}` / `refresh_{sessionId}`，
//! front token 只是 base64 编码的 JSON，没有签名，不能作为安全凭证。
//!
//! # 流程
//!
//! 1. `create_code` - 生成 6 位验证码，按手机号覆盖旧验证码
//! 2. `consume_code` - 校验验证码，成功后删除验证码并创建会话
//! 3. `refresh` / `sign_out` / `verify` - 通过 token 中的 sessionId 查找会话
//!
//! 输错 [`MAX_CODE_INPUT_ATTEMPTS`] 次后验证码作废，需要重新获取。

use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde_json::json;
use shared::models::{
    AuthCode, AuthUser, ConsumeCodeRequest, ConsumeCodeResponse, CreateCodeResponse,
    MAX_CODE_INPUT_ATTEMPTS, Session, SessionInfo, SessionResponse,
};
use shared::util::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::db::repository::AuthRepository;
use crate::utils::AppResult;

const ACCESS_PREFIX: &str = "access_";
const REFRESH_PREFIX: &str = "refresh_";

/// Access token lifetime (1h)
pub const ACCESS_TOKEN_TTL_MS: i64 = 3_600_000;

/// Tokens handed to the client after sign-in or refresh
#[derive(Debug, Clone, PartialEq)]
pub struct SessionTokens {
    pub access_token: String,
    pub refresh_token: String,
    pub front_token: String,
}

impl SessionTokens {
    fn issue(session: &Session, now: i64) -> Self {
        Self {
            access_token: format!("{}{}", ACCESS_PREFIX, session.session_id),
            refresh_token: format!("{}{}", REFRESH_PREFIX, session.session_id),
            front_token: front_token(&session.user_id, now + ACCESS_TOKEN_TTL_MS),
        }
    }
}

/// Result of a code consumption: response body plus tokens on success
#[derive(Debug, Clone)]
pub struct ConsumeOutcome {
    pub response: ConsumeCodeResponse,
    pub tokens: Option<SessionTokens>,
}

impl ConsumeOutcome {
    fn rejected(response: ConsumeCodeResponse) -> Self {
        Self {
            response,
            tokens: None,
        }
    }
}

#[derive(Clone)]
pub struct AuthService {
    repo: AuthRepository,
}

impl AuthService {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            repo: AuthRepository::new(db),
        }
    }

    /// Issue a one-time code for a phone number
    pub async fn create_code(&self, phone_number: &str) -> AppResult<CreateCodeResponse> {
        let code = generate_code();
        let device_id = uuid::Uuid::new_v4().to_string();
        let pre_auth_session_id = uuid::Uuid::new_v4().to_string();

        self.repo
            .upsert_code(AuthCode {
                id: phone_number.to_string(),
                phone_number: phone_number.to_string(),
                code: code.clone(),
                pre_auth_session_id: pre_auth_session_id.clone(),
                failed_attempts: 0,
                created_at: now_millis(),
            })
            .await?;
        // 开发环境没有短信通道，验证码直接打到日志
        tracing::info!(phone = %phone_number, code = %code, "Verification code issued");

        Ok(CreateCodeResponse::Ok {
            device_id,
            pre_auth_session_id,
            flow_type: "USER_INPUT_CODE".to_string(),
        })
    }

    /// Check a code and open a session
    pub async fn consume_code(&self, request: &ConsumeCodeRequest) -> AppResult<ConsumeOutcome> {
        let Some(stored) = self
            .repo
            .find_code_by_session(&request.pre_auth_session_id)
            .await?
        else {
            return Ok(ConsumeOutcome::rejected(ConsumeCodeResponse::RestartFlowError));
        };

        let input = request
            .user_input_code
            .as_deref()
            .or(request.link_code.as_deref())
            .unwrap_or_default();

        if input != stored.code {
            let Some(attempts) = self.repo.record_failed_attempt(&stored.id).await? else {
                // 验证码在比对期间被领取或锁定
                return Ok(ConsumeOutcome::rejected(ConsumeCodeResponse::RestartFlowError));
            };
            if attempts >= MAX_CODE_INPUT_ATTEMPTS {
                self.repo.delete_code(&stored.id).await?;
                tracing::warn!(phone = %stored.phone_number, attempts, "Verification code locked");
                return Ok(ConsumeOutcome::rejected(ConsumeCodeResponse::RestartFlowError));
            }
            tracing::info!(phone = %stored.phone_number, attempts, "Incorrect verification code");
            return Ok(ConsumeOutcome::rejected(
                ConsumeCodeResponse::IncorrectUserInputCodeError {
                    failed_code_input_attempt_count: attempts,
                    maximum_code_input_attempts: MAX_CODE_INPUT_ATTEMPTS,
                },
            ));
        }

        // 先删验证码：并发的第二次提交拿不到记录
        if !self.repo.delete_code(&stored.id).await? {
            return Ok(ConsumeOutcome::rejected(ConsumeCodeResponse::RestartFlowError));
        }

        let now = now_millis();
        let session_id = uuid::Uuid::new_v4().to_string();
        let session = self
            .repo
            .create_session(Session {
                id: session_id.clone(),
                session_id,
                user_id: uuid::Uuid::new_v4().to_string(),
                phone_number: stored.phone_number.clone(),
                created_at: now,
            })
            .await?;
        tracing::info!(user_id = %session.user_id, "Session created");

        let tokens = SessionTokens::issue(&session, now);
        Ok(ConsumeOutcome {
            response: ConsumeCodeResponse::Ok {
                created_new_user: true,
                user: AuthUser {
                    id: session.user_id.clone(),
                    phone_number: session.phone_number.clone(),
                    time_joined: now,
                },
                session: session_info(&session),
            },
            tokens: Some(tokens),
        })
    }

    /// Reissue tokens for a refresh token, `None` when the session is gone
    pub async fn refresh(&self, refresh_token: Option<&str>) -> AppResult<Option<SessionTokens>> {
        let Some(session) = self.session_for(refresh_token, REFRESH_PREFIX).await? else {
            return Ok(None);
        };
        Ok(Some(SessionTokens::issue(&session, now_millis())))
    }

    /// Destroy the session behind an access token
    pub async fn sign_out(&self, access_token: Option<&str>) -> AppResult<()> {
        if let Some(session_id) = access_token.and_then(|t| session_id_from(t, ACCESS_PREFIX)) {
            self.repo.delete_session(session_id).await?;
            tracing::info!(session_id = %session_id, "Session destroyed");
        }
        Ok(())
    }

    pub async fn verify(&self, access_token: Option<&str>) -> AppResult<SessionResponse> {
        let response = match self.session_for(access_token, ACCESS_PREFIX).await? {
            Some(session) => SessionResponse::Ok {
                session: Some(session_info(&session)),
            },
            None => SessionResponse::Unauthorised,
        };
        Ok(response)
    }

    async fn session_for(&self, token: Option<&str>, prefix: &str) -> AppResult<Option<Session>> {
        let Some(session_id) = token.and_then(|t| session_id_from(t, prefix)) else {
            return Ok(None);
        };
        Ok(self.repo.find_session(session_id).await?)
    }
}

fn session_info(session: &Session) -> SessionInfo {
    SessionInfo {
        handle: session.session_id.clone(),
        user_id: session.user_id.clone(),
        user_data_in_jwt: json!({}),
    }
}

fn generate_code() -> String {
    use rand::Rng;
    let code: u32 = rand::thread_rng().gen_range(100_000..1_000_000);
    code.to_string()
}

fn session_id_from<'a>(token: &'a str, prefix: &str) -> Option<&'a str> {
    token.strip_prefix(prefix).filter(|id| !id.is_empty())
}

/// Base64 JSON `{uid, ate, up}` read by the client SDK
pub fn front_token(user_id: &str, expires_at: i64) -> String {
    let payload = json!({ "uid": user_id, "ate": expires_at, "up": {} });
    STANDARD.encode(payload.to_string())
}
