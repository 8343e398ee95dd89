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

#![forbid(unsafe_code)]

//! Ember Macro Library
//!
//! Attribute macros for message and actor state types.
//!
//! ```ignore
//! #[ember_message]
//! pub struct Login {
//!     pub uid: i64,
//! }
//!
//! #[ember_actor]
//! pub struct Room {
//!     players: Vec<i64>,
//! }
//! ```

use proc_macro::TokenStream;

use quote::quote;
use syn::{parse_macro_input, DeriveInput};

fn has_derive(input: &DeriveInput, trait_name: &str) -> bool {
    input.attrs.iter().any(|attr| {
        if attr.path().is_ident("derive") {
            let mut found = false;
            let _ = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident(trait_name) {
                    found = true;
                }
                Ok(())
            });
            found
        } else {
            false
        }
    })
}

fn has_flag(attr: &TokenStream, flag: &str) -> bool {
    attr.to_string().split(',').any(|part| part.trim() == flag)
}

/// Derives what a type needs to be carried in an Ember envelope.
///
/// Expands to `#[derive(Clone, Debug, Serialize, Deserialize)]` (skipping any already
/// present) and a compile-time check that the type is `Send + Sync + 'static`.
/// Serde is referenced through `ember_actor`, so user crates need no direct `serde`
/// dependency. Pass `no_serde` when the serde impls are written by hand.
#[proc_macro_attribute]
pub fn ember_message(attr: TokenStream, item: TokenStream) -> TokenStream {
    let no_serde = has_flag(&attr, "no_serde");
    let input = parse_macro_input!(item as DeriveInput);

    let name = &input.ident;
    let generics = &input.generics;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let mut traits = Vec::new();
    if !has_derive(&input, "Clone") {
        traits.push(quote!(Clone));
    }
    if !has_derive(&input, "Debug") {
        traits.push(quote!(Debug));
    }
    let mut serde_crate = quote!();
    if !no_serde && !has_derive(&input, "Serialize") && !has_derive(&input, "Deserialize") {
        traits.push(quote!(::ember_actor::__private::serde::Serialize));
        traits.push(quote!(::ember_actor::__private::serde::Deserialize));
        serde_crate = quote!(#[serde(crate = "::ember_actor::__private::serde")]);
    }
    let derives = if traits.is_empty() {
        quote!()
    } else {
        quote!(#[derive(#(#traits),*)])
    };

    let assert_ident = quote::format_ident!("_AssertEmberMessage_{}", name);

    let expanded = quote! {
        #derives
        #serde_crate
        #input

        #[doc(hidden)]
        #[allow(dead_code, non_camel_case_types, non_snake_case, clippy::needless_lifetimes)]
        const _: () = {
            fn #assert_ident #impl_generics () #where_clause {
                fn assert_bounds<T: Send + Sync + 'static>() {}
                assert_bounds::<#name #ty_generics>();
            }
        };
    };

    TokenStream::from(expanded)
}

/// Derives what an actor state type needs: `Default` and `Debug`.
///
/// Pass `no_default` to implement `Default` by hand.
#[proc_macro_attribute]
pub fn ember_actor(attr: TokenStream, item: TokenStream) -> TokenStream {
    let no_default = has_flag(&attr, "no_default");
    let input = parse_macro_input!(item as DeriveInput);

    let name = &input.ident;
    let generics = &input.generics;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let mut traits = Vec::new();
    if !no_default && !has_derive(&input, "Default") {
        traits.push(quote!(Default));
    }
    if !has_derive(&input, "Debug") {
        traits.push(quote!(Debug));
    }
    let derives = if traits.is_empty() {
        quote!()
    } else {
        quote!(#[derive(#(#traits),*)])
    };

    let assert_ident = quote::format_ident!("_AssertEmberActor_{}", name);

    let expanded = quote! {
        #derives
        #input

        #[doc(hidden)]
        #[allow(dead_code, non_camel_case_types, non_snake_case, clippy::needless_lifetimes)]
        const _: () = {
            fn #assert_ident #impl_generics () #where_clause {
                fn assert_bounds<T: Send + 'static>() {}
                assert_bounds::<#name #ty_generics>();
            }
        };
    };

    TokenStream::from(expanded)
}
