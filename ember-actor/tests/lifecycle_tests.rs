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

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use ember_actor::prelude::*;
use ember_test::prelude::*;
use tokio::sync::mpsc;

use crate::setup::actors::Counter;
use crate::setup::messages::{Stop, Tick};
use crate::setup::{initialize_tracing, launch_node};

mod setup;

/// `after_start` runs before the first message and `after_stop` once the actor left the
/// directory.
#[ember_test]
async fn test_lifecycle_hooks_run() -> anyhow::Result<()> {
    initialize_tracing();
    let runtime = launch_node("game-1");
    let (tx, mut rx) = mpsc::unbounded_channel();
    let start_tx = tx.clone();

    let mut actor = runtime.new_actor::<Counter>("hooks")?;
    actor
        .after_start(move |actor| {
            let _ = start_tx.send(format!("started {}", actor.path()));
            Reply::ready()
        })
        .after_stop(move |actor| {
            let still_listed = actor.runtime().find(&actor.path().to_string()).is_some();
            let _ = tx.send(format!("stopped listed={still_listed}"));
            Reply::ready()
        });
    let handle = actor.start().await?;
    assert_eq!(runtime.actor_count(), 1);
    assert!(handle.is_alive());

    handle.stop().await?;
    assert!(!handle.is_alive());
    assert_eq!(runtime.actor_count(), 0);

    assert_eq!(rx.recv().await.as_deref(), Some("started game-1.hooks"));
    assert_eq!(rx.recv().await.as_deref(), Some("stopped listed=false"));
    Ok(())
}

#[ember_test]
async fn test_actor_names_are_validated() -> anyhow::Result<()> {
    initialize_tracing();
    let runtime = launch_node("game-1");
    assert_eq!(
        runtime.new_actor::<Counter>("").unwrap_err(),
        RuntimeError::InvalidName(String::new())
    );
    assert_eq!(
        runtime.new_actor::<Counter>("room.1").unwrap_err(),
        RuntimeError::InvalidName("room.1".to_string())
    );
    Ok(())
}

/// Only one actor per path can be running.
#[ember_test]
async fn test_duplicate_actor_is_rejected() -> anyhow::Result<()> {
    initialize_tracing();
    let runtime = launch_node("game-1");
    let first = runtime.new_actor::<Counter>("room")?;
    let second = runtime.new_actor::<Counter>("room")?;

    let handle = first.start().await?;
    assert_eq!(
        second.start().await.unwrap_err(),
        RuntimeError::DuplicateActor("game-1.room".to_string())
    );
    assert!(matches!(
        runtime.new_actor::<Counter>("room"),
        Err(RuntimeError::DuplicateActor(_))
    ));

    handle.stop().await?;
    // The name is free again once the first actor is gone.
    let again = runtime.new_actor::<Counter>("room")?.start().await?;
    again.stop().await?;
    Ok(())
}

/// Draining handles everything already queued; stopping discards it.
#[ember_test]
async fn test_drain_runs_pending_but_stop_discards() -> anyhow::Result<()> {
    initialize_tracing();
    let runtime = launch_node("game-1");

    for (name, drain) in [("drained", true), ("stopped", false)] {
        let handled = Arc::new(AtomicUsize::new(0));
        let mut actor = runtime.new_actor::<Counter>(name)?;
        {
            let handled = handled.clone();
            actor.register::<Tick>("Slow", move |_actor, _ctx| {
                let handled = handled.clone();
                Reply::pending(async move {
                    tokio::time::sleep(Duration::from_millis(20)).await;
                    handled.fetch_add(1, Ordering::SeqCst);
                })
            });
        }
        let handle = actor.start().await?;
        for i in 0..10 {
            assert!(handle.send("Slow", Tick(i)));
        }

        if drain {
            handle.drain_and_stop().await?;
            assert_eq!(handled.load(Ordering::SeqCst), 10);
        } else {
            handle.stop().await?;
            assert!(handled.load(Ordering::SeqCst) < 10);
        }
        assert_eq!(handle.pending(), 0);
        assert!(!handle.send("Slow", Tick(99)), "mailbox is shut down");
    }
    Ok(())
}

/// A handler can close its own mailbox; the actor finishes what is queued and exits.
#[ember_test]
async fn test_actor_can_close_its_own_mailbox() -> anyhow::Result<()> {
    initialize_tracing();
    let runtime = launch_node("game-1");
    let (tx, mut rx) = mpsc::unbounded_channel();

    let mut actor = runtime.new_actor::<Counter>("quitter")?;
    actor
        .register::<Tick>("Record", |actor, ctx| {
            actor.model.seen.push(ctx.message().0);
            // Keeps the actor busy while the test queues the rest.
            Reply::pending(tokio::time::sleep(Duration::from_millis(50)))
        })
        .register::<Stop>("Stop", |actor, _ctx| {
            actor.close_mailbox();
            Reply::ready()
        })
        .after_stop(move |actor| {
            let _ = tx.send(actor.model.seen.clone());
            Reply::ready()
        });
    let handle = actor.start().await?;

    handle.send("Record", Tick(1));
    handle.send("Stop", Stop);
    handle.send("Record", Tick(2));

    let seen = tokio::time::timeout(Duration::from_secs(1), rx.recv()).await?;
    assert_eq!(seen, Some(vec![1, 2]));
    Ok(())
}

#[ember_test]
async fn test_shutdown_all_stops_every_actor() -> anyhow::Result<()> {
    initialize_tracing();
    let runtime = launch_node("game-1");
    let mut handles = Vec::new();
    for i in 0..5 {
        let actor = runtime.new_actor::<Counter>(&format!("room{i}"))?;
        handles.push(actor.start().await?);
    }
    assert_eq!(runtime.actor_count(), 5);

    runtime.shutdown_all().await?;
    assert_eq!(runtime.actor_count(), 0);
    assert!(handles.iter().all(|handle| !handle.is_alive()));
    Ok(())
}

#[ember_test]
async fn test_child_actor_paths() -> anyhow::Result<()> {
    initialize_tracing();
    let runtime = launch_node("game-1");
    let parent = runtime.new_actor::<Counter>("room")?.start().await?;

    let child = runtime
        .new_child_actor::<Counter>(parent.path(), "table3")?
        .start()
        .await?;
    assert_eq!(child.path().to_string(), "game-1.room.table3");
    assert_eq!(child.name(), "table3");
    assert_eq!(child.path().parent(), *parent.path());
    assert!(runtime.find("game-1.room.table3").is_some());

    // Grandchildren are not addressable.
    assert!(runtime
        .new_child_actor::<Counter>(child.path(), "seat")
        .is_err());

    runtime.shutdown_all().await?;
    Ok(())
}

/// A node id that cannot head an actor path falls back to the default, so local calls
/// still resolve.
#[ember_test]
async fn test_unusable_node_id_falls_back_to_default() -> anyhow::Result<()> {
    initialize_tracing();
    let default_node = EmberConfig::default().defaults.node_id;

    for bad in ["game.1", ""] {
        let runtime = launch_node(bad);
        assert_eq!(runtime.node_id(), default_node);
        assert_eq!(runtime.config().defaults.node_id, default_node);

        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut actor = runtime.new_actor::<Counter>("room")?;
        actor.register::<Tick>("Ping", move |_actor, ctx| {
            let _ = tx.send(ctx.message().0);
            Reply::ready()
        });
        let handle = actor.start().await?;
        let path = format!("{default_node}.room");
        assert_eq!(handle.path().to_string(), path);

        runtime.call(&path, "Ping", Tick(7))?;
        let got = tokio::time::timeout(Duration::from_secs(1), rx.recv()).await?;
        assert_eq!(got, Some(7));
        handle.stop().await?;
    }
    Ok(())
}

/// Handler names are listed normalized; empty and duplicate registrations are skipped.
#[ember_test]
async fn test_handler_names_lists_registrations() -> anyhow::Result<()> {
    initialize_tracing();
    let runtime = launch_node("game-1");
    let mut actor = runtime.new_actor::<Counter>("room")?;
    assert!(actor.handler_names().is_empty());

    actor
        .register::<Tick>("pkg.Counter.Record", |_actor, _ctx| Reply::ready())
        .register::<Tick>("Record", |_actor, _ctx| Reply::ready())
        .register::<Stop>("", |_actor, _ctx| Reply::ready())
        .register::<Stop>("Stop", |_actor, _ctx| Reply::ready());

    let mut names = actor.handler_names();
    names.sort();
    assert_eq!(names, vec!["Record".to_string(), "Stop".to_string()]);
    Ok(())
}
