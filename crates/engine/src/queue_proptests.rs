// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the gastown authors

//! Property test for the capacity ceiling: across any mix of already-bound
//! issues and queued arrivals, one dispatch cycle never plans more
//! dispatches than the remaining capacity, the batch size, or the number of
//! ready issues allow.

use super::*;
use gastown_adapters::FakeSessionAdapter;
use gastown_core::test_support::ready_task;
use gastown_core::{FakeClock, SessionId};
use gastown_store::MemoryStore;
use proptest::prelude::*;

fn queued_issue(id: &str, rig: &str) -> gastown_core::Issue {
    let mut issue = ready_task(id);
    for l in gastown_core::label::queue_labels(&RigName::new(rig), None) {
        issue.labels.insert(l);
    }
    issue
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn dispatch_cycle_never_exceeds_remaining_capacity(
        max_concurrent in 0usize..8,
        already_bound in 0usize..8,
        queued_count in 0usize..12,
        batch_size in 1usize..12,
    ) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let store = MemoryStore::new("hq");
            let sessions = FakeSessionAdapter::new();
            let clock = FakeClock::new();

            for i in 0..already_bound {
                store.seed(ready_task(&format!("bound-{i}")).bound_to(SessionId::new()));
            }
            for i in 0..queued_count {
                store.seed(queued_issue(&format!("queued-{i}"), "web"));
            }

            let config = EngineConfig { max_concurrent, batch_size, spawn_delay_ms: 0 };
            let mut runtime = QueueRuntimeState::default();

            let report = run_dispatch_cycle(&store, &sessions, &clock, &config, &mut runtime, false)
                .await
                .expect("dispatch cycle must not error on well-formed input");

            let capacity = max_concurrent.saturating_sub(already_bound);
            prop_assert!(report.dispatched.len() <= capacity);
            prop_assert!(report.dispatched.len() <= batch_size);
            prop_assert!(report.dispatched.len() <= queued_count);
        });
    }
}
