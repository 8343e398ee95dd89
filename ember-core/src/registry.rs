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

use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::{error, trace};

use crate::error::RegistrationError;

/// Strips any `pkg.Type.` qualification, keeping the final dot-separated segment.
///
/// `"pkg.Actor.OnLogin"` and `"OnLogin"` both normalize to `"OnLogin"`.
pub fn normalize_func_name(func_name: &str) -> &str {
    match func_name.rfind('.') {
        Some(index) => &func_name[index + 1..],
        None => func_name,
    }
}

/// A registered handler together with the argument type it was registered for.
pub struct HandlerDescriptor<H: ?Sized> {
    name: String,
    arg_type_name: &'static str,
    arg_type_id: TypeId,
    handler: Arc<H>,
}

impl<H: ?Sized> Clone for HandlerDescriptor<H> {
    fn clone(&self) -> Self {
        HandlerDescriptor {
            name: self.name.clone(),
            arg_type_name: self.arg_type_name,
            arg_type_id: self.arg_type_id,
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<H: ?Sized> fmt::Debug for HandlerDescriptor<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerDescriptor")
            .field("name", &self.name)
            .field("arg_type", &self.arg_type_name)
            .finish()
    }
}

impl<H: ?Sized> HandlerDescriptor<H> {
    /// The normalized name the handler is registered under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Type name of the single argument the handler expects.
    pub fn arg_type_name(&self) -> &'static str {
        self.arg_type_name
    }

    /// `TypeId` of the single argument the handler expects.
    pub fn arg_type_id(&self) -> TypeId {
        self.arg_type_id
    }

    /// Returns `true` if the handler takes an argument of type `A`.
    pub fn accepts<A: 'static>(&self) -> bool {
        self.arg_type_id == TypeId::of::<A>()
    }

    /// The call adapter.
    pub fn handler(&self) -> &Arc<H> {
        &self.handler
    }
}

/// Name-keyed table of handlers, filled once while an actor is being built.
///
/// Registration is write-once per name: the first registration wins and later ones are
/// logged and rejected. There is no unregistration, only [`clear`](Self::clear) at
/// teardown. The registry is not synchronized; it is built before the actor is
/// scheduled and read only by the actor's own run-loop afterwards.
pub struct HandlerRegistry<H: ?Sized> {
    handlers: HashMap<String, HandlerDescriptor<H>>,
}

impl<H: ?Sized> Default for HandlerRegistry<H> {
    fn default() -> Self {
        HandlerRegistry {
            handlers: HashMap::new(),
        }
    }
}

impl<H: ?Sized> fmt::Debug for HandlerRegistry<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.handlers.keys()).finish()
    }
}

impl<H: ?Sized> HandlerRegistry<H> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` under the normalized `func_name`, recording `A` as its
    /// argument type.
    ///
    /// Empty and duplicate names are logged at error level and leave the registry
    /// untouched. The error is returned for callers that want to inspect it; it is
    /// never meant to be fatal.
    pub fn register<A: 'static>(
        &mut self,
        func_name: &str,
        handler: Arc<H>,
    ) -> Result<(), RegistrationError> {
        let name = normalize_func_name(func_name);
        if name.is_empty() {
            error!(func_name, "Func name is empty.");
            return Err(RegistrationError::EmptyName);
        }
        if self.handlers.contains_key(name) {
            error!(func_name = name, "Func name already exists.");
            return Err(RegistrationError::Duplicate(name.to_string()));
        }
        let arg_type_name = std::any::type_name::<A>();
        trace!(func_name = name, arg_type = arg_type_name, "Registering handler");
        self.handlers.insert(
            name.to_string(),
            HandlerDescriptor {
                name: name.to_string(),
                arg_type_name,
                arg_type_id: TypeId::of::<A>(),
                handler,
            },
        );
        Ok(())
    }

    /// Exact match on an already normalized name. No prefix or fallback matching.
    pub fn lookup(&self, func_name: &str) -> Option<&HandlerDescriptor<H>> {
        self.handlers.get(func_name)
    }

    /// Returns `true` if a handler is registered under `func_name`.
    pub fn contains(&self, func_name: &str) -> bool {
        self.handlers.contains_key(func_name)
    }

    /// Registered names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    /// Number of registered handlers.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Returns `true` if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Drops every registration. Only used at teardown.
    pub fn clear(&mut self) {
        self.handlers.clear();
    }
}
