// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use erp_auth_web3::*;
use internal_error::InternalError;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub struct InMemorySessionRepository {
    sessions: DashMap<SessionId, SessionRecord>,
}

#[dill::component(pub)]
#[dill::interface(dyn SessionRepository)]
#[dill::scope(dill::Singleton)]
impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[async_trait::async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn save_session(&self, session: &SessionRecord) -> Result<(), SaveSessionError> {
        match self.sessions.entry(session.id) {
            Entry::Occupied(_) => Err(SaveSessionError::Duplicate {
                session_id: session.id,
            }),
            Entry::Vacant(entry) => {
                entry.insert(session.clone());
                Ok(())
            }
        }
    }

    async fn get_session(&self, session_id: &SessionId) -> Result<SessionRecord, GetSessionError> {
        self.sessions
            .get(session_id)
            .map(|entry| entry.value().clone())
            .ok_or(GetSessionError::NotFound {
                session_id: *session_id,
            })
    }

    async fn revoke_session(
        &self,
        session_id: &SessionId,
        revoked_at: DateTime<Utc>,
    ) -> Result<(), RevokeSessionError> {
        let Some(mut session) = self.sessions.get_mut(session_id) else {
            return Err(RevokeSessionError::NotFound {
                session_id: *session_id,
            });
        };

        session.revoked_at.get_or_insert(revoked_at);

        Ok(())
    }

    async fn revoke_wallet_sessions(
        &self,
        wallet: &WalletKey,
        revoked_at: DateTime<Utc>,
    ) -> Result<usize, InternalError> {
        let mut revoked = 0;

        for mut session in self.sessions.iter_mut() {
            if session.wallet == *wallet && session.revoked_at.is_none() {
                session.revoked_at = Some(revoked_at);
                revoked += 1;
            }
        }

        Ok(revoked)
    }

    async fn cleanup_expired_sessions(&self, now: DateTime<Utc>) -> Result<usize, InternalError> {
        let mut removed = 0;

        self.sessions.retain(|_, session| {
            let keep = !session.is_expired(now);
            if !keep {
                removed += 1;
            }
            keep
        });

        Ok(removed)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
