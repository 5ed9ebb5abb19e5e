// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, SubsecRound, Utc};
use tokio::sync::watch;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Abstracts the system time source
#[async_trait::async_trait]
pub trait SystemTimeSource: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    async fn sleep(&self, duration: Duration);
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[dill::component(pub)]
#[dill::interface(dyn SystemTimeSource)]
#[dill::scope(dill::Singleton)]
pub struct SystemTimeSourceDefault;

#[async_trait::async_trait]
impl SystemTimeSource for SystemTimeSourceDefault {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    async fn sleep(&self, duration: Duration) {
        // Negative durations are treated as "do not wait"
        let std_duration = duration.to_std().unwrap_or_default();

        tokio::time::sleep(std_duration).await;
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Manually driven clock for tests.
///
/// Time only moves when [`FakeSystemTimeSource::set`] or
/// [`FakeSystemTimeSource::advance`] is called. Sleepers are woken up as soon
/// as the fake time reaches their deadline.
#[derive(Debug, Clone)]
pub struct FakeSystemTimeSource {
    state: Arc<Mutex<DateTime<Utc>>>,
    ticks_tx: Arc<watch::Sender<DateTime<Utc>>>,
}

impl FakeSystemTimeSource {
    pub fn new() -> Self {
        // Sub-second precision is dropped so that round-trips through JWT
        // claims (whole seconds) compare equal
        Self::new_set(Utc::now().trunc_subsecs(0))
    }

    pub fn new_set(t: DateTime<Utc>) -> Self {
        let (ticks_tx, _) = watch::channel(t);

        Self {
            state: Arc::new(Mutex::new(t)),
            ticks_tx: Arc::new(ticks_tx),
        }
    }

    pub fn set(&self, t: DateTime<Utc>) {
        {
            let mut state = self.state.lock().unwrap();

            assert!(
                *state <= t,
                "The previous time [{}] is more than new time [{t}]",
                *state
            );

            *state = t;
        }

        self.ticks_tx.send_replace(t);
    }

    pub fn advance(&self, time_quantum: Duration) {
        let new_t = *self.state.lock().unwrap() + time_quantum;

        self.set(new_t);
    }
}

#[async_trait::async_trait]
impl SystemTimeSource for FakeSystemTimeSource {
    fn now(&self) -> DateTime<Utc> {
        *self.state.lock().unwrap()
    }

    async fn sleep(&self, duration: Duration) {
        let wake_up_time = self.now() + duration;

        let mut ticks_rx = self.ticks_tx.subscribe();

        // The sender lives as long as `self`, so `changed()` cannot fail here
        while *ticks_rx.borrow_and_update() < wake_up_time {
            if ticks_rx.changed().await.is_err() {
                return;
            }
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
