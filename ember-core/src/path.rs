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

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PathError;

/// Separator between the segments of an [`ActorPath`].
pub const PATH_SEPARATOR: char = '.';

/// Address of an actor: `node.actor` or `node.actor.child`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActorPath {
    node_id: String,
    actor_id: String,
    child_id: Option<String>,
}

impl ActorPath {
    /// Builds a top-level actor path. Segments are taken as given.
    pub fn new(node_id: impl Into<String>, actor_id: impl Into<String>) -> Self {
        ActorPath {
            node_id: node_id.into(),
            actor_id: actor_id.into(),
            child_id: None,
        }
    }

    /// Builds the path of a child actor.
    pub fn with_child(
        node_id: impl Into<String>,
        actor_id: impl Into<String>,
        child_id: impl Into<String>,
    ) -> Self {
        ActorPath {
            node_id: node_id.into(),
            actor_id: actor_id.into(),
            child_id: Some(child_id.into()),
        }
    }

    /// Parses `node.actor` or `node.actor.child`.
    pub fn parse(path: &str) -> Result<Self, PathError> {
        if path.is_empty() {
            return Err(PathError::Empty);
        }
        let segments: Vec<&str> = path.split(PATH_SEPARATOR).collect();
        if segments.iter().any(|segment| segment.is_empty()) {
            return Err(PathError::EmptySegment(path.to_string()));
        }
        match segments.as_slice() {
            [node_id, actor_id] => Ok(ActorPath::new(*node_id, *actor_id)),
            [node_id, actor_id, child_id] => {
                Ok(ActorPath::with_child(*node_id, *actor_id, *child_id))
            }
            [_] => Err(PathError::EmptySegment(path.to_string())),
            _ => Err(PathError::TooManySegments(path.to_string())),
        }
    }

    /// The node hosting the actor.
    pub fn node_id(&self) -> &str {
        &self.node_id
    }

    /// The top-level actor id.
    pub fn actor_id(&self) -> &str {
        &self.actor_id
    }

    /// The child id, for child actors.
    pub fn child_id(&self) -> Option<&str> {
        self.child_id.as_deref()
    }

    /// Returns `true` if the path addresses a child actor.
    pub fn is_child(&self) -> bool {
        self.child_id.is_some()
    }

    /// Returns `true` if the actor lives on `node_id`.
    pub fn is_local_to(&self, node_id: &str) -> bool {
        self.node_id == node_id
    }

    /// The path of the top-level actor owning this one (itself, if not a child).
    pub fn parent(&self) -> ActorPath {
        ActorPath::new(self.node_id.clone(), self.actor_id.clone())
    }
}

impl fmt::Display for ActorPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{PATH_SEPARATOR}{}", self.node_id, self.actor_id)?;
        if let Some(child_id) = &self.child_id {
            write!(f, "{PATH_SEPARATOR}{child_id}")?;
        }
        Ok(())
    }
}

impl FromStr for ActorPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActorPath::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_top_level_and_child_paths() {
        let path = ActorPath::parse("game-1.room").unwrap();
        assert_eq!(path.node_id(), "game-1");
        assert_eq!(path.actor_id(), "room");
        assert!(!path.is_child());
        assert_eq!(path.to_string(), "game-1.room");

        let child = ActorPath::parse("game-1.room.42").unwrap();
        assert_eq!(child.child_id(), Some("42"));
        assert_eq!(child.parent(), path);
        assert!(child.is_local_to("game-1"));
        assert!(!child.is_local_to("gate-1"));
    }

    #[test]
    fn rejects_malformed_paths() {
        assert_eq!(ActorPath::parse(""), Err(PathError::Empty));
        assert!(matches!(ActorPath::parse("node"), Err(PathError::EmptySegment(_))));
        assert!(matches!(ActorPath::parse("node..x"), Err(PathError::EmptySegment(_))));
        assert!(matches!(ActorPath::parse("a.b.c.d"), Err(PathError::TooManySegments(_))));
    }
}
