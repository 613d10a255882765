//! Auth Code / Session Repository (mock passwordless login)

use super::{BaseRepository, RepoResult, retry_on_conflict};
use shared::models::{AuthCode, Session};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const CODES: &str = "auth_codes";
const SESSIONS: &str = "sessions";

#[derive(Clone)]
pub struct AuthRepository {
    base: BaseRepository,
}

impl AuthRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Store a code keyed by phone number, replacing any previous one
    pub async fn upsert_code(&self, code: AuthCode) -> RepoResult<()> {
        self.base
            .db()
            .query("UPSERT type::thing('auth_codes', $id) CONTENT $data RETURN NONE")
            .bind(("id", code.id.clone()))
            .bind(("data", code))
            .await?
            .check()?;
        Ok(())
    }

    pub async fn find_code_by_session(
        &self,
        pre_auth_session_id: &str,
    ) -> RepoResult<Option<AuthCode>> {
        let codes: Vec<AuthCode> = self
            .base
            .db()
            .query("SELECT * OMIT id FROM auth_codes WHERE preAuthSessionId = $sid LIMIT 1")
            .bind(("sid", pre_auth_session_id.to_string()))
            .await?
            .take(0)?;
        Ok(codes.into_iter().next())
    }

    /// Increment the failed attempt counter, returning the new count
    ///
    /// 验证码已被删除 (并发领取或锁定) 时返回 `None`。
    pub async fn record_failed_attempt(&self, code_id: &str) -> RepoResult<Option<u32>> {
        retry_on_conflict(move || async move {
            let counts: Vec<u32> = self
                .base
                .db()
                .query(
                    "UPDATE type::thing('auth_codes', $id) \
                     SET failedAttempts = (failedAttempts ?? 0) + 1 RETURN VALUE failedAttempts",
                )
                .bind(("id", code_id.to_string()))
                .await?
                .take(0)?;
            Ok(counts.into_iter().next())
        })
        .await
    }

    pub async fn delete_code(&self, code_id: &str) -> RepoResult<bool> {
        self.base.delete_by_key(CODES, code_id).await
    }

    pub async fn create_session(&self, session: Session) -> RepoResult<Session> {
        self.base.insert(SESSIONS, &session.id, &session).await?;
        Ok(session)
    }

    pub async fn find_session(&self, session_id: &str) -> RepoResult<Option<Session>> {
        self.base.find_by_key(SESSIONS, session_id).await
    }

    pub async fn delete_session(&self, session_id: &str) -> RepoResult<bool> {
        self.base.delete_by_key(SESSIONS, session_id).await
    }
}
