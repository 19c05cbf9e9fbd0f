mod model;
mod route;

use proc_macro::TokenStream;

/// Generates an OpenAPI documentation function for the route, named after the
/// original function with the suffix `_docs`. The first rustdoc line becomes
/// the operation summary, the remaining lines its description.
#[proc_macro_attribute]
pub fn route(args: TokenStream, input: TokenStream) -> TokenStream {
	route::from_input(args, input)
}

/// Generates `CreateXInput` and `UpdateXInput` structs for the model.
///
/// Fields marked `#[serde(skip_deserializing)]` or `#[serde(skip)]` are
/// server-assigned and excluded. All other fields carry over with their
/// attributes; `Update` fields are additionally wrapped in [`Option`].
/// A `Vec<String>` field marked `#[model(csv)]` is submitted as a single
/// comma-separated string, the way the profile and posting forms send it.
#[proc_macro_attribute]
pub fn model(_args: TokenStream, input: TokenStream) -> TokenStream {
	model::from_input(input)
}
