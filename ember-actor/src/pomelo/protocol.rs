/*
 * Copyright (c) 2024. Govcraft
 *
 * Licensed under either of
 *   * Apache License, Version 2.0 (the "License");
 *     you may not use this file except in compliance with the License.
 *     You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0
 *   * MIT license: http://opensource.org/licenses/MIT
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the applicable License for the specific language governing permissions and
 * limitations under that License.
 */

use std::fmt::Debug;

use ember_core::{EmberMessage, Serializer};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::pomelo::{PomeloBroadcastPush, PomeloKick, PomeloPush, PomeloResponse, Session};
use crate::traits::ActorFacade;

/// Agent handler receiving [`PomeloResponse`].
pub const RESPONSE_FUNC_NAME: &str = "response";
/// Agent handler receiving [`PomeloPush`].
pub const PUSH_FUNC_NAME: &str = "push";
/// Agent handler receiving [`PomeloKick`].
pub const KICK_FUNC_NAME: &str = "kick";
/// Agent handler receiving [`PomeloBroadcastPush`].
pub const BROADCAST_FUNC_NAME: &str = "broadcast";

fn send<F, M>(actor: &F, op: &'static str, agent_path: &str, func_name: &str, message: M) -> bool
where
    F: ActorFacade,
    M: EmberMessage + Serialize,
{
    match actor.call(agent_path, func_name, message) {
        Ok(()) => true,
        Err(e) => {
            warn!(op, agent_path, error = %e, "Call to agent failed");
            false
        }
    }
}

/// Answers request `mid` of session `sid` with `value`.
pub fn response<F, V>(actor: &F, agent_path: &str, sid: &str, mid: u32, value: &V)
where
    F: ActorFacade,
    V: Serialize + Debug + ?Sized,
{
    let data = match actor.serializer().marshal(value) {
        Ok(data) => data,
        Err(e) => {
            warn!(op = "Response", ?value, error = %e, "Marshal error");
            return;
        }
    };
    let rsp = PomeloResponse {
        sid: sid.to_string(),
        mid,
        data: data.into(),
        code: 0,
    };
    if send(actor, "Response", agent_path, RESPONSE_FUNC_NAME, rsp) {
        debug!(agent_path, sid, mid, ?value, "[Response]");
    }
}

/// Answers request `mid` of session `sid` with a bare status code.
pub fn response_code<F>(actor: &F, agent_path: &str, sid: &str, mid: u32, status_code: i32)
where
    F: ActorFacade,
{
    let rsp = PomeloResponse {
        sid: sid.to_string(),
        mid,
        code: status_code,
        ..PomeloResponse::default()
    };
    if send(actor, "ResponseCode", agent_path, RESPONSE_FUNC_NAME, rsp) {
        debug!(agent_path, sid, mid, status_code, "[ResponseCode]");
    }
}

/// Pushes `value` to `route` on the client of session `sid`.
pub fn push<F, V>(actor: &F, agent_path: &str, sid: &str, uid: i64, route: &str, value: &V)
where
    F: ActorFacade,
    V: Serialize + Debug + ?Sized,
{
    if route.is_empty() {
        warn!(op = "Push", agent_path, sid, "Route value error");
        return;
    }
    let data = match actor.serializer().marshal(value) {
        Ok(data) => data,
        Err(e) => {
            warn!(op = "Push", route, ?value, error = %e, "Marshal error");
            return;
        }
    };
    let rsp = PomeloPush {
        sid: sid.to_string(),
        route: route.to_string(),
        data: data.into(),
    };
    if send(actor, "Push", agent_path, PUSH_FUNC_NAME, rsp) {
        debug!(agent_path, sid, uid, route, ?value, "[Push]");
    }
}

/// Tells the agent to drop session `sid`, optionally closing its connection.
pub fn kick<F, V>(actor: &F, agent_path: &str, sid: &str, uid: i64, reason: &V, close: bool)
where
    F: ActorFacade,
    V: Serialize + Debug + ?Sized,
{
    let data = match actor.serializer().marshal(reason) {
        Ok(data) => data,
        Err(e) => {
            warn!(op = "Kick", ?reason, error = %e, "Marshal error");
            return;
        }
    };
    let rsp = PomeloKick {
        sid: sid.to_string(),
        reason: data.into(),
        close,
    };
    if send(actor, "Kick", agent_path, KICK_FUNC_NAME, rsp) {
        info!(agent_path, sid, uid, ?reason, close, "[Kick]");
    }
}

/// Pushes `value` to `route` for the listed users of an agent, or for all of them.
pub fn broadcast<F, V>(
    actor: &F,
    agent_path: &str,
    uid_list: &[i64],
    all_uid: bool,
    route: &str,
    value: &V,
) where
    F: ActorFacade,
    V: Serialize + Debug + ?Sized,
{
    if !all_uid && uid_list.is_empty() {
        warn!(op = "Broadcast", agent_path, "Uid list value error");
        return;
    }
    if route.is_empty() {
        warn!(op = "Broadcast", agent_path, "Route value error");
        return;
    }
    let data = match actor.serializer().marshal(value) {
        Ok(data) => data,
        Err(e) => {
            warn!(op = "Broadcast", route, ?value, error = %e, "Marshal error");
            return;
        }
    };
    let rsp = PomeloBroadcastPush {
        uid_list: uid_list.to_vec(),
        all_uid,
        route: route.to_string(),
        data: data.into(),
    };
    if send(actor, "Broadcast", agent_path, BROADCAST_FUNC_NAME, rsp) {
        debug!(agent_path, ?uid_list, all_uid, route, ?value, "[Broadcast]");
    }
}

/// Session-aware protocol operations for anything that can `call`.
///
/// Implemented for every [`ActorFacade`], so handlers can answer with
/// `actor.response(&session, &reply)`.
pub trait PomeloActor: ActorFacade + Sized {
    /// See [`response`].
    fn response<V: Serialize + Debug + ?Sized>(&self, session: &Session, value: &V) {
        response(self, &session.agent_path, &session.sid, session.mid, value);
    }

    /// See [`response_code`].
    fn response_code(&self, session: &Session, status_code: i32) {
        response_code(self, &session.agent_path, &session.sid, session.mid, status_code);
    }

    /// See [`push`].
    fn push<V: Serialize + Debug + ?Sized>(&self, session: &Session, route: &str, value: &V) {
        push(self, &session.agent_path, &session.sid, session.uid, route, value);
    }

    /// See [`kick`].
    fn kick<V: Serialize + Debug + ?Sized>(&self, session: &Session, reason: &V, close: bool) {
        kick(self, &session.agent_path, &session.sid, session.uid, reason, close);
    }

    /// See [`broadcast`].
    fn broadcast<V: Serialize + Debug + ?Sized>(
        &self,
        agent_path: &str,
        uid_list: &[i64],
        all_uid: bool,
        route: &str,
        value: &V,
    ) {
        broadcast(self, agent_path, uid_list, all_uid, route, value);
    }
}

impl<T: ActorFacade> PomeloActor for T {}
