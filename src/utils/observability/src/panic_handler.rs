// Copyright ERP Web3 contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::backtrace::Backtrace;
use std::panic;
use std::sync::Arc;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Routes panics into the tracing pipeline, so they end up in structured logs
/// together with a backtrace and the panic location.
///
/// When `propagate` is set the previously installed hook still runs first.
pub fn set_hook_trace_panics(propagate: bool) {
    let prev_hook = propagate.then(|| Arc::new(panic::take_hook()));

    panic::set_hook(Box::new(move |info| {
        if let Some(prev_hook) = &prev_hook {
            prev_hook(info);
        }

        let payload = info.payload();
        let error_msg = payload
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
            .unwrap_or("Unknown panic payload");

        let location = info
            .location()
            .map(ToString::to_string)
            .unwrap_or_default();

        let thread = std::thread::current();

        tracing::error!(
            error_msg,
            panic_location = %location,
            thread = thread.name().unwrap_or("<unnamed>"),
            error_backtrace = %Backtrace::force_capture(),
            "Unhandled panic caught"
        );
    }));
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
