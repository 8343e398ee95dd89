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

use std::any::Any;
use std::fmt::Debug;

use dyn_clone::DynClone;

/// A marker trait for values that can travel through a mailbox without being serialized.
///
/// A blanket implementation covers every `Clone + Debug + Send + Sync + 'static` type,
/// so message structs only need the usual derives (see `#[ember_message]`).
///
/// Note that `Box<dyn EmberMessage>` itself satisfies the blanket bounds. Call these
/// methods on the dereferenced trait object, not on the box.
pub trait EmberMessage: DynClone + Any + Send + Sync + Debug {
    /// Returns the message as [`Any`] for downcasting by reference.
    fn as_any(&self) -> &dyn Any;

    /// Converts the boxed message into a boxed [`Any`] for downcasting by value.
    fn into_any(self: Box<Self>) -> Box<dyn Any + Send>;

    /// The concrete type name of the message.
    fn type_name(&self) -> &'static str;
}

dyn_clone::clone_trait_object!(EmberMessage);

impl<T> EmberMessage for T
where
    T: Any + Send + Sync + Debug + DynClone + 'static,
{
    #[inline]
    fn as_any(&self) -> &dyn Any {
        self
    }

    #[inline]
    fn into_any(self: Box<Self>) -> Box<dyn Any + Send> {
        self
    }

    #[inline]
    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}
