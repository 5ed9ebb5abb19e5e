// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use erp_auth_web3::*;
use internal_error::{InternalError, ResultIntoInternal};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use time_source::SystemTimeSource;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

const ERP_JWT_ALGORITHM: Algorithm = Algorithm::HS384;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Serialize, Deserialize)]
struct SessionTokenClaims {
    iss: String,
    sub: String,
    iat: i64,
    exp: i64,
    jti: String,
    sid: SessionId,
    wallet_address: String,
    chain_id: u64,
    token_use: TokenUse,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Issues HS384 JWT pairs. Session records kept in [`SessionRepository`]
/// serve as the revocation list, tokens of one session share the `sid` claim.
pub struct SessionIssuerImpl {
    session_repo: Arc<dyn SessionRepository>,
    wallet_repo: Arc<dyn WalletRepository>,
    time_source: Arc<dyn SystemTimeSource>,
    config: Arc<JwtSessionConfig>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

#[dill::component(pub)]
#[dill::interface(dyn SessionIssuer)]
impl SessionIssuerImpl {
    pub fn new(
        session_repo: Arc<dyn SessionRepository>,
        wallet_repo: Arc<dyn WalletRepository>,
        time_source: Arc<dyn SystemTimeSource>,
        config: Arc<JwtSessionConfig>,
    ) -> Self {
        let secret = config.jwt_secret.as_bytes();

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            session_repo,
            wallet_repo,
            time_source,
            config,
        }
    }

    fn make_token(
        &self,
        record: &SessionRecord,
        token_use: TokenUse,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Result<String, InternalError> {
        let claims = SessionTokenClaims {
            iss: self.config.issuer.clone(),
            sub: record.subject.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            jti: uuid::Uuid::new_v4().to_string(),
            sid: record.id,
            wallet_address: record.wallet.address.to_string(),
            chain_id: record.wallet.chain_id.as_u64(),
            token_use,
        };

        encode(&Header::new(ERP_JWT_ALGORITHM), &claims, &self.encoding_key).int_err()
    }

    fn make_session(
        &self,
        record: &SessionRecord,
        now: DateTime<Utc>,
    ) -> Result<Session, InternalError> {
        let access_token_expires_at = (now + self.config.access_token_ttl).min(record.expires_at);
        let refresh_token_expires_at = record.expires_at;

        Ok(Session {
            session_id: record.id,
            subject: record.subject.clone(),
            wallet: record.wallet,
            issued_at: now,
            access_token: self.make_token(
                record,
                TokenUse::Access,
                now,
                access_token_expires_at,
            )?,
            access_token_expires_at,
            refresh_token: self.make_token(
                record,
                TokenUse::Refresh,
                now,
                refresh_token_expires_at,
            )?,
            refresh_token_expires_at,
        })
    }

    /// Returns the owner of the stored wallet record if it is still verified
    /// and owned by the identity of the given snapshot
    async fn verified_owner(&self, wallet: &Wallet) -> Result<IdentityId, IssueSessionError> {
        let not_verified = || IssueSessionError::WalletNotVerified {
            wallet: wallet.key(),
        };

        let stored = match self.wallet_repo.get_wallet(&wallet.key()).await {
            Ok(stored) => stored,
            Err(GetWalletError::NotFound(_)) => return Err(not_verified()),
            Err(GetWalletError::Internal(e)) => return Err(e.into()),
        };

        match (&stored.owner_identity, stored.verified) {
            (Some(owner), true) if wallet.is_owned_by(owner) => Ok(owner.clone()),
            _ => Err(not_verified()),
        }
    }

    /// Checks signature, issuer, token use, expiry and revocation. Expiry is
    /// evaluated against the injected clock rather than the wall clock.
    async fn validate_token(
        &self,
        token: &str,
        expected_use: TokenUse,
    ) -> Result<(SessionTokenClaims, SessionRecord), SessionTokenError> {
        let mut validation = Validation::new(ERP_JWT_ALGORITHM);
        validation.set_issuer(&[self.config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        validation.validate_exp = false;

        let claims = decode::<SessionTokenClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| SessionTokenError::Invalid(Box::new(e)))?
            .claims;

        if claims.token_use != expected_use {
            return Err(SessionTokenError::Invalid(
                format!("Expected {expected_use} token, got {}", claims.token_use).into(),
            ));
        }

        let now = self.time_source.now();
        if claims.exp <= now.timestamp() {
            return Err(SessionTokenError::Expired);
        }

        let record = match self.session_repo.get_session(&claims.sid).await {
            Ok(record) => record,
            // Only expired sessions are ever evicted, so a missing record
            // means the token must not be honored anymore
            Err(GetSessionError::NotFound { .. }) => return Err(SessionTokenError::Revoked),
            Err(GetSessionError::Internal(e)) => return Err(e.into()),
        };

        if record.is_revoked() {
            return Err(SessionTokenError::Revoked);
        }
        if record.is_expired(now) {
            return Err(SessionTokenError::Expired);
        }

        Ok((claims, record))
    }
}

#[async_trait::async_trait]
impl SessionIssuer for SessionIssuerImpl {
    #[tracing::instrument(level = "info", skip_all, fields(wallet = %wallet.key()))]
    async fn issue_session(&self, wallet: &Wallet) -> Result<Session, IssueSessionError> {
        let subject = self.verified_owner(wallet).await?;

        let now = self.time_source.now();

        let record = SessionRecord {
            id: SessionId::new_random(),
            subject,
            wallet: wallet.key(),
            issued_at: now,
            expires_at: now + self.config.refresh_token_ttl,
            revoked_at: None,
        };

        self.session_repo.save_session(&record).await.int_err()?;

        // An unlink clears the owner before revoking sessions, so a session
        // saved after that revocation is caught here
        if let Err(e) = self.verified_owner(wallet).await {
            self.session_repo
                .revoke_session(&record.id, self.time_source.now())
                .await
                .int_err()?;
            return Err(e);
        }

        tracing::info!(session_id = %record.id, "Session issued");

        Ok(self.make_session(&record, now)?)
    }

    #[tracing::instrument(level = "debug", skip_all)]
    async fn refresh(&self, refresh_token: &str) -> Result<Session, SessionTokenError> {
        let (_, record) = self.validate_token(refresh_token, TokenUse::Refresh).await?;

        tracing::debug!(session_id = %record.id, "Session refreshed");

        Ok(self.make_session(&record, self.time_source.now())?)
    }

    #[tracing::instrument(level = "debug", skip_all)]
    async fn authenticate(&self, access_token: &str) -> Result<SessionClaims, SessionTokenError> {
        let (claims, record) = self.validate_token(access_token, TokenUse::Access).await?;

        let to_datetime = |ts: i64| {
            DateTime::from_timestamp(ts, 0).ok_or_else(|| {
                SessionTokenError::Invalid(format!("Timestamp out of range: {ts}").into())
            })
        };

        Ok(SessionClaims {
            session_id: record.id,
            subject: record.subject,
            wallet: record.wallet,
            issued_at: to_datetime(claims.iat)?,
            expires_at: to_datetime(claims.exp)?,
        })
    }

    #[tracing::instrument(level = "info", skip_all, fields(%session_id))]
    async fn revoke_session(&self, session_id: &SessionId) -> Result<(), InternalError> {
        match self
            .session_repo
            .revoke_session(session_id, self.time_source.now())
            .await
        {
            Ok(()) | Err(RevokeSessionError::NotFound { .. }) => Ok(()),
            Err(RevokeSessionError::Internal(e)) => Err(e),
        }
    }

    #[tracing::instrument(level = "info", skip_all, fields(%wallet))]
    async fn revoke_wallet_sessions(&self, wallet: &WalletKey) -> Result<usize, InternalError> {
        self.session_repo
            .revoke_wallet_sessions(wallet, self.time_source.now())
            .await
    }

    #[tracing::instrument(level = "debug", skip_all)]
    async fn cleanup_expired_sessions(&self) -> Result<usize, InternalError> {
        let removed = self
            .session_repo
            .cleanup_expired_sessions(self.time_source.now())
            .await?;

        tracing::debug!(removed, "Expired sessions evicted");

        Ok(removed)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
