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
#![allow(dead_code, unused_doc_comments)]

use std::collections::HashMap;
use std::time::Duration;

use ember_actor::pomelo::{
    self, PomeloBroadcastPush, PomeloKick, PomeloPush, PomeloResponse, BROADCAST_FUNC_NAME,
    KICK_FUNC_NAME, PUSH_FUNC_NAME, RESPONSE_FUNC_NAME,
};
use ember_actor::prelude::*;
use ember_test::prelude::*;
use parking_lot::Mutex;
use tokio::sync::mpsc;
use tracing::Level;

use crate::setup::actors::{Agent, Room};
use crate::setup::messages::{Login, LoginReply};
use crate::setup::{capture_events, initialize_tracing, launch_node, messages_at};

mod setup;

/// Records every call instead of routing it.
#[derive(Debug, Default)]
struct RecordingFacade {
    codec: Codec,
    calls: Mutex<Vec<(String, String, Box<dyn EmberMessage>)>>,
}

impl RecordingFacade {
    fn calls(&self) -> Vec<(String, String, Box<dyn EmberMessage>)> {
        self.calls.lock().clone()
    }

    fn only_call<M: Clone + 'static>(&self) -> (String, String, M) {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected exactly one call, got {calls:?}");
        let (target, func_name, message) = calls.into_iter().next().expect("one call");
        let message = (*message)
            .as_any()
            .downcast_ref::<M>()
            .cloned()
            .expect("protocol message type");
        (target, func_name, message)
    }
}

impl ActorFacade for RecordingFacade {
    type Codec = Codec;

    fn serializer(&self) -> &Self::Codec {
        &self.codec
    }

    fn self_path(&self) -> Option<&ActorPath> {
        None
    }

    fn call<M>(&self, target_path: &str, func_name: &str, message: M) -> Result<(), CallError>
    where
        M: EmberMessage + serde::Serialize,
    {
        self.calls.lock().push((
            target_path.to_string(),
            func_name.to_string(),
            Box::new(message) as Box<dyn EmberMessage>,
        ));
        Ok(())
    }
}

/// Serializing a map with non-string keys to JSON always fails.
fn unserializable() -> HashMap<(i32, i32), i32> {
    HashMap::from([((1, 2), 3)])
}

fn session() -> Session {
    Session::new("gate-1.agent".to_string(), "s-1".to_string(), 1001, 7)
}

#[test]
fn response_carries_serialized_value() {
    let facade = RecordingFacade::default();
    facade.response(&session(), &LoginReply { welcome: "hi".to_string() });

    let (target, func_name, rsp) = facade.only_call::<PomeloResponse>();
    assert_eq!(target, "gate-1.agent");
    assert_eq!(func_name, RESPONSE_FUNC_NAME);
    assert_eq!(rsp.sid, "s-1");
    assert_eq!(rsp.mid, 7);
    assert_eq!(rsp.code, 0);
    assert_eq!(&rsp.data[..], br#"{"welcome":"hi"}"#);
}

#[test]
fn response_that_fails_to_serialize_is_not_sent() {
    let facade = RecordingFacade::default();
    let ((), events) = capture_events(|| facade.response(&session(), &unserializable()));
    assert!(facade.calls().is_empty());
    assert_eq!(messages_at(&events, Level::WARN), vec!["Marshal error"]);
    assert!(messages_at(&events, Level::DEBUG).is_empty());
}

#[test]
fn response_code_has_no_body() {
    let facade = RecordingFacade::default();
    facade.response_code(&session(), 404);

    let (_, func_name, rsp) = facade.only_call::<PomeloResponse>();
    assert_eq!(func_name, RESPONSE_FUNC_NAME);
    assert_eq!(rsp.code, 404);
    assert_eq!(rsp.mid, 7);
    assert!(rsp.data.is_empty());
}

#[test]
fn push_requires_a_route() {
    let facade = RecordingFacade::default();
    facade.push(&session(), "", &1u32);
    facade.push(&session(), "onChat", &unserializable());
    assert!(facade.calls().is_empty());

    facade.push(&session(), "onChat", &"hello");
    let (_, func_name, push) = facade.only_call::<PomeloPush>();
    assert_eq!(func_name, PUSH_FUNC_NAME);
    assert_eq!(push.route, "onChat");
    assert_eq!(push.sid, "s-1");
    assert_eq!(&push.data[..], br#""hello""#);
}

#[test]
fn kick_carries_reason_and_close_flag() {
    let facade = RecordingFacade::default();
    facade.kick(&session(), &unserializable(), true);
    assert!(facade.calls().is_empty());

    facade.kick(&session(), "duplicate login", true);
    let (_, func_name, kick) = facade.only_call::<PomeloKick>();
    assert_eq!(func_name, KICK_FUNC_NAME);
    assert!(kick.close);
    assert_eq!(&kick.reason[..], br#""duplicate login""#);
}

#[test]
fn broadcast_needs_users_and_a_route() {
    let facade = RecordingFacade::default();
    let ((), events) = capture_events(|| {
        facade.broadcast("gate-1.agent", &[], false, "onNotice", &"maintenance")
    });
    assert_eq!(messages_at(&events, Level::WARN), vec!["Uid list value error"]);

    let ((), events) = capture_events(|| {
        facade.broadcast("gate-1.agent", &[1, 2], false, "", &"maintenance");
        facade.broadcast("gate-1.agent", &[1, 2], false, "onNotice", &unserializable());
    });
    assert_eq!(
        messages_at(&events, Level::WARN),
        vec!["Route value error", "Marshal error"]
    );
    assert!(facade.calls().is_empty());

    // `all_uid` stands in for an empty list.
    facade.broadcast("gate-1.agent", &[], true, "onNotice", &"maintenance");
    let (target, func_name, push) = facade.only_call::<PomeloBroadcastPush>();
    assert_eq!(target, "gate-1.agent");
    assert_eq!(func_name, BROADCAST_FUNC_NAME);
    assert!(push.all_uid);
    assert!(push.uid_list.is_empty());
    assert_eq!(push.route, "onNotice");
}

#[test]
fn free_functions_match_the_session_methods() {
    let facade = RecordingFacade::default();
    pomelo::broadcast(&facade, "gate-1.agent", &[5, 6], false, "onNotice", &1u8);
    let (_, _, push) = facade.only_call::<PomeloBroadcastPush>();
    assert_eq!(push.uid_list, vec![5, 6]);
    assert!(!push.all_uid);
}

/// A room answers a login through the protocol layer; the agent receives the response
/// envelope in its `response` handler.
#[ember_test]
async fn test_room_responds_to_agent() -> anyhow::Result<()> {
    initialize_tracing();
    let runtime = launch_node("gate-1");
    let (tx, mut rx) = mpsc::unbounded_channel();

    let mut agent = runtime.new_actor::<Agent>("agent")?;
    agent.register::<PomeloResponse>(RESPONSE_FUNC_NAME, move |actor, ctx| {
        actor.model.responses.push(ctx.message().clone());
        let _ = tx.send(ctx.message().clone());
        Reply::ready()
    });
    let agent = agent.start().await?;

    let mut room = runtime.new_actor::<Room>("room")?;
    room.register::<Login>("room.Room.OnLogin", |actor, ctx| {
        let login = ctx.message();
        actor.model.online.push(login.session.uid);
        actor.response(
            &login.session,
            &LoginReply {
                welcome: format!("welcome {}", login.session.uid),
            },
        );
        Reply::ready()
    });
    let room = room.start().await?;

    runtime.call(
        "gate-1.room",
        "OnLogin",
        Login {
            session: session(),
            token: "t".to_string(),
        },
    )?;

    let rsp = tokio::time::timeout(Duration::from_secs(1), rx.recv())
        .await?
        .expect("agent forwards the response");
    assert_eq!(rsp.sid, "s-1");
    assert_eq!(rsp.mid, 7);
    let reply: LoginReply = runtime.codec().unmarshal(&rsp.data)?;
    assert_eq!(reply.welcome, "welcome 1001");

    room.stop().await?;
    agent.stop().await?;
    Ok(())
}
