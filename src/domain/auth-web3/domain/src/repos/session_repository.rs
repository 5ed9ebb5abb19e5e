// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{DateTime, Utc};
use internal_error::InternalError;
use thiserror::Error;

use crate::{SessionId, SessionRecord, WalletKey};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
pub trait SessionRepository: Send + Sync {
    async fn save_session(&self, session: &SessionRecord) -> Result<(), SaveSessionError>;

    async fn get_session(&self, session_id: &SessionId) -> Result<SessionRecord, GetSessionError>;

    /// Idempotent: the first revocation time is kept
    async fn revoke_session(
        &self,
        session_id: &SessionId,
        revoked_at: DateTime<Utc>,
    ) -> Result<(), RevokeSessionError>;

    /// Returns the number of sessions that were active before the call
    async fn revoke_wallet_sessions(
        &self,
        wallet: &WalletKey,
        revoked_at: DateTime<Utc>,
    ) -> Result<usize, InternalError>;

    /// Drops sessions whose refresh window has closed, revoked or not
    async fn cleanup_expired_sessions(&self, now: DateTime<Utc>) -> Result<usize, InternalError>;
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum SaveSessionError {
    #[error("Session already exists: {session_id}")]
    Duplicate { session_id: SessionId },

    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl PartialEq for SaveSessionError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Duplicate { session_id: a }, Self::Duplicate { session_id: b }) => a == b,
            (Self::Internal(a), Self::Internal(b)) => a.reason().eq(&b.reason()),
            (_, _) => false,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum GetSessionError {
    #[error("Session not found: {session_id}")]
    NotFound { session_id: SessionId },

    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl PartialEq for GetSessionError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::NotFound { session_id: a }, Self::NotFound { session_id: b }) => a == b,
            (Self::Internal(a), Self::Internal(b)) => a.reason().eq(&b.reason()),
            (_, _) => false,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug)]
pub enum RevokeSessionError {
    #[error("Session not found: {session_id}")]
    NotFound { session_id: SessionId },

    #[error(transparent)]
    Internal(#[from] InternalError),
}

impl PartialEq for RevokeSessionError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::NotFound { session_id: a }, Self::NotFound { session_id: b }) => a == b,
            (Self::Internal(a), Self::Internal(b)) => a.reason().eq(&b.reason()),
            (_, _) => false,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
