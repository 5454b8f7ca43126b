//! Request issuing and response application

use std::time::Instant;

use cooler_core::prelude::*;

use crate::message::Payload;
use crate::resource::{Applied, ResourceKind};
use crate::state::AppState;

use super::{UpdateAction, UpdateResult};

/// Issue a request for `kind` and return the action that performs it
pub(crate) fn issue(state: &mut AppState, kind: ResourceKind) -> UpdateAction {
    let seq = state.begin(kind);
    UpdateAction::Fetch {
        resource: kind,
        seq,
    }
}

pub fn handle_refetch(state: &mut AppState, kind: ResourceKind) -> UpdateResult {
    UpdateResult::action(issue(state, kind))
}

/// Manual retry: stat and log again
pub fn handle_retry(state: &mut AppState) -> UpdateResult {
    info!("Retry requested");
    let stat = issue(state, ResourceKind::Stat);
    let log = issue(state, ResourceKind::Log);
    UpdateResult::actions(vec![stat, log])
}

pub fn handle_fetched(
    state: &mut AppState,
    kind: ResourceKind,
    seq: u64,
    result: std::result::Result<Payload, String>,
) -> UpdateResult {
    let applied = match kind {
        ResourceKind::Stat => {
            let outcome = unpack(kind, result, |p| match p {
                Payload::Stat(stat) => Some(*stat),
                _ => None,
            });
            let applied = state.stat.apply(seq, outcome);
            if applied == Applied::Updated {
                state.animations.retarget(state.stat.data(), Instant::now());
            }
            applied
        }
        ResourceKind::Log => {
            let outcome = unpack(kind, result, |p| match p {
                Payload::Log(log) => Some(log),
                _ => None,
            });
            state.log.apply(seq, outcome)
        }
        ResourceKind::SysInfo => {
            let outcome = unpack(kind, result, |p| match p {
                Payload::SysInfo(info) => Some(info),
                _ => None,
            });
            state.sysinfo.apply(seq, outcome)
        }
        ResourceKind::ActuatorSysInfo => {
            let outcome = unpack(kind, result, |p| match p {
                Payload::SysInfo(info) => Some(info),
                _ => None,
            });
            state.actuator_sysinfo.apply(seq, outcome)
        }
        ResourceKind::ValveStatus => {
            let outcome = unpack(kind, result, |p| match p {
                Payload::ValveStatus(valve) => Some(valve),
                _ => None,
            });
            let applied = state.valve.apply(seq, outcome);
            if applied == Applied::Updated {
                state.cooling.apply_valve(*state.valve.data());
            }
            applied
        }
        ResourceKind::Flow => {
            let outcome = unpack(kind, result, |p| match p {
                Payload::Flow(flow) => Some(flow),
                _ => None,
            });
            let applied = state.flow.apply(seq, outcome);
            if applied == Applied::Updated {
                state.cooling.apply_flow(state.flow.data().flow);
            }
            applied
        }
    };

    if applied == Applied::Failed {
        debug!("{} fetch #{} failed: {:?}", kind, seq, state.error_of(kind));
    }
    UpdateResult::none()
}

fn unpack<T>(
    kind: ResourceKind,
    result: std::result::Result<Payload, String>,
    extract: impl FnOnce(Payload) -> Option<T>,
) -> std::result::Result<T, String> {
    let payload = result?;
    extract(payload).ok_or_else(|| {
        warn!("Mismatched payload delivered for {}", kind);
        format!("Unexpected {kind} payload")
    })
}
