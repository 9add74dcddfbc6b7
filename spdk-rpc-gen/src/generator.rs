//! Struct generator
//!
//! Turns an [`RpcCallCollection`] into Rust source: one parameter struct and
//! one `RpcMethod` impl per method, in schema order.
//!
//! # Generation Flow
//!
//! 1. **Read**: load and check the schema ([`generate`])
//! 2. **Normalize**: map schema type tokens to Rust types on a copy
//! 3. **Quote**: build a token stream per method, validating every identifier
//!    and type as it goes
//! 4. **Validate**: parse the whole output with `syn::parse2`
//! 5. **Format**: print with `prettyplease` behind a fixed header
//!
//! Nothing is returned unless every step succeeds.
//!
//! # Output Example
//!
//! For `bdev_get_bdevs` with optional `name` and `timeout`:
//!
//! ```ignore
//! /// Get information about block devices
//! #[derive(Debug, Clone, Default, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
//! #[allow(non_snake_case)]
//! pub struct BdevGetBdevs {
//!     /// Block device name
//!     #[serde(rename = "name", skip_serializing_if = "::std::option::Option::is_none")]
//!     pub Name: ::std::option::Option<::std::string::String>,
//!     #[serde(rename = "timeout", skip_serializing_if = "::std::option::Option::is_none")]
//!     pub Timeout: ::std::option::Option<i64>,
//! }
//!
//! impl ::spdk_rpc_core::RpcMethod for BdevGetBdevs {
//!     const METHOD: &'static str = "bdev_get_bdevs";
//!     fn to_params(&self) -> /* ... */ { /* inserts "name" and "timeout" when set */ }
//! }
//! ```

use crate::error::{Result, SchemaError};
use crate::schema::{Parameter, RpcCall, RpcCallCollection};
use proc_macro2::TokenStream;
use quote::quote;
use spdk_rpc_core::naming::{round_trips, to_title_style};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use syn::{Ident, Type};

/// First line of every generated file
pub const HEADER: &str = "// Code generated by spdk-rpc-gen. DO NOT EDIT.";

/// Prelude types a schema type token may name unqualified
const RESERVED_STRUCT_NAMES: &[&str] = &["Box", "Option", "Result", "String", "Vec"];

/// Read the schema at `path` and render it
#[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn generate(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| SchemaError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    let collection = RpcCallCollection::from_slice(&bytes)?;
    render(&collection)
}

/// Render a schema document held in memory
pub fn generate_from_str(text: &str) -> Result<String> {
    let collection = RpcCallCollection::from_json(text)?;
    render(&collection)
}

/// Render a parsed collection
pub fn render(collection: &RpcCallCollection) -> Result<String> {
    let normalized = collection.normalized();

    let mut struct_names = BTreeSet::new();
    let mut items = Vec::with_capacity(normalized.calls.len());
    for call in &normalized.calls {
        let struct_name = to_title_style(&call.name);
        if RESERVED_STRUCT_NAMES.contains(&struct_name.as_str()) {
            return Err(SchemaError::RenderFailure(format!(
                "method `{}` maps to struct `{}`, which would shadow the prelude type",
                call.name, struct_name
            )));
        }
        if !struct_names.insert(struct_name.clone()) {
            return Err(SchemaError::RenderFailure(format!(
                "method `{}` maps to struct `{}`, which is already generated",
                call.name, struct_name
            )));
        }
        if !round_trips(&call.name) {
            tracing::warn!(
                method = %call.name,
                struct_name = %struct_name,
                "Method name does not survive the title style round trip; keeping the schema name"
            );
        }
        items.push(render_call(call, &struct_name)?);
    }

    let tokens = quote! { #(#items)* };
    let file = syn::parse2::<syn::File>(tokens)
        .map_err(|e| SchemaError::RenderFailure(format!("generated code does not parse: {}", e)))?;

    tracing::debug!(methods = normalized.calls.len(), "Rendered parameter structs");
    Ok(format!("{}\n\n{}", HEADER, prettyplease::unparse(&file)))
}

fn render_call(call: &RpcCall, struct_name: &str) -> Result<TokenStream> {
    let ident = parse_ident(struct_name, &call.name)?;
    let method = &call.name;

    let struct_docs = if call.description.trim().is_empty() {
        doc_attrs(&format!("Parameters of the `{}` method", call.name))
    } else {
        doc_attrs(&call.description)
    };

    let mut field_names = BTreeSet::new();
    let mut fields = Vec::with_capacity(call.parameters.len());
    let mut inserts = Vec::with_capacity(call.parameters.len());
    for parameter in &call.parameters {
        let field_name = to_title_style(&parameter.name);
        if !field_names.insert(field_name.clone()) {
            return Err(SchemaError::RenderFailure(format!(
                "parameter `{}` of `{}` maps to field `{}`, which is already generated",
                parameter.name, call.name, field_name
            )));
        }
        let field = parse_ident(&field_name, &parameter.name)?;
        let ty = parse_type(parameter, &call.name)?;
        fields.push(render_field(parameter, &field, &ty));
        inserts.push(render_insert(parameter, &field));
    }

    // An empty map needs no `mut`
    let to_params_body = if inserts.is_empty() {
        quote! { ::std::result::Result::Ok(::spdk_rpc_core::Params::new()) }
    } else {
        quote! {
            let mut params = ::spdk_rpc_core::Params::new();
            #(#inserts)*
            ::std::result::Result::Ok(params)
        }
    };

    Ok(quote! {
        #(#struct_docs)*
        #[derive(Debug, Clone, Default, PartialEq, ::serde::Serialize, ::serde::Deserialize)]
        #[allow(non_snake_case)]
        pub struct #ident {
            #(#fields)*
        }

        impl ::spdk_rpc_core::RpcMethod for #ident {
            const METHOD: &'static str = #method;

            fn to_params(&self) -> ::std::result::Result<::spdk_rpc_core::Params, ::spdk_rpc_core::BuildError> {
                #to_params_body
            }
        }
    })
}

fn render_field(parameter: &Parameter, field: &Ident, ty: &Type) -> TokenStream {
    let docs = doc_attrs(&parameter.description);
    let key = &parameter.name;
    if parameter.required {
        quote! {
            #(#docs)*
            #[serde(rename = #key)]
            pub #field: #ty,
        }
    } else {
        quote! {
            #(#docs)*
            #[serde(rename = #key, skip_serializing_if = "::std::option::Option::is_none")]
            pub #field: ::std::option::Option<#ty>,
        }
    }
}

fn render_insert(parameter: &Parameter, field: &Ident) -> TokenStream {
    let key = &parameter.name;
    if parameter.required {
        quote! {
            params.insert(#key.to_string(), ::spdk_rpc_core::param_value(#key, &self.#field)?);
        }
    } else {
        quote! {
            if let ::std::option::Option::Some(value) = &self.#field {
                params.insert(#key.to_string(), ::spdk_rpc_core::param_value(#key, value)?);
            }
        }
    }
}

/// One `#[doc]` attribute per line of `text`
fn doc_attrs(text: &str) -> Vec<TokenStream> {
    text.lines()
        .map(|line| {
            let line = format!(" {}", line.trim_end());
            quote! { #[doc = #line] }
        })
        .collect()
}

fn parse_ident(name: &str, source: &str) -> Result<Ident> {
    syn::parse_str::<Ident>(name).map_err(|e| {
        SchemaError::RenderFailure(format!("`{}` (from `{}`) is not a valid identifier: {}", name, source, e))
    })
}

fn parse_type(parameter: &Parameter, method: &str) -> Result<Type> {
    syn::parse_str::<Type>(&parameter.type_name).map_err(|e| {
        SchemaError::RenderFailure(format!(
            "type `{}` of parameter `{}` in `{}` is not a Rust type: {}",
            parameter.type_name, parameter.name, method, e
        ))
    })
}
