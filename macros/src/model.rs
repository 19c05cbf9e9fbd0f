use darling::{ast, FromDeriveInput, FromField};
use proc_macro2::TokenTree;
use quote::{format_ident, quote, ToTokens};
use syn::Meta;

#[derive(Debug, FromDeriveInput)]
#[darling(supports(struct_named), forward_attrs)]
struct ModelReceiver {
	ident: syn::Ident,

	generics: syn::Generics,

	data: ast::Data<(), ModelField>,

	attrs: Vec<syn::Attribute>,
}

#[derive(Debug, FromField)]
#[darling(attributes(model), forward_attrs)]
struct ModelField {
	ident: Option<syn::Ident>,

	ty: syn::Type,
	vis: syn::Visibility,

	attrs: Vec<syn::Attribute>,

	/// Stored as `Vec<String>`, submitted as comma-separated text.
	#[darling(default)]
	csv: bool,
}

impl ModelField {
	/// Server-assigned fields never appear in client inputs.
	fn is_server_assigned(&self) -> bool {
		self.attrs.iter().any(|attr| {
			let Meta::List(ref list) = attr.meta else {
				return false;
			};

			if !list.path.is_ident("serde") {
				return false;
			}

			list.tokens.to_token_stream().into_iter().any(|token| {
				matches!(
					token,
					TokenTree::Ident(ref ident) if ident == "skip_deserializing" || ident == "skip"
				)
			})
		})
	}

	fn input_ty(&self) -> proc_macro2::TokenStream {
		if self.csv {
			quote!(String)
		} else {
			let ty = &self.ty;
			quote!(#ty)
		}
	}
}

pub fn from_input(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
	let input = syn::parse_macro_input!(input as syn::DeriveInput);
	let receiver = match ModelReceiver::from_derive_input(&input) {
		Ok(receiver) => receiver,
		Err(e) => return e.write_errors().into(),
	};

	// The original struct is re-emitted without the `#[model(..)]` field
	// attributes, which only exist for this macro.
	let mut model = input.clone();
	if let syn::Data::Struct(ref mut data) = model.data {
		for field in data.fields.iter_mut() {
			field.attrs.retain(|attr| !attr.path().is_ident("model"));
		}
	}

	let ident = &receiver.ident;
	let vis = &input.vis;
	let generics = &receiver.generics;
	let create_ident = format_ident!("Create{}Input", ident);
	let update_ident = format_ident!("Update{}Input", ident);

	let attrs = &receiver.attrs;

	let fields = receiver.data.take_struct().expect("expected a struct");
	let fields = fields
		.iter()
		.filter(|field| !field.is_server_assigned())
		.filter_map(|field| {
			let ident = field.ident.as_ref()?;

			Some((field, ident))
		})
		.collect::<Vec<_>>();

	let create_fields = fields.iter().map(|(field, ident)| {
		let attrs = field
			.attrs
			.iter()
			.filter(|attr| !attr.path().is_ident("model"));
		let vis = &field.vis;
		let ty = field.input_ty();

		quote! {
			#(#attrs)*
			#vis #ident: #ty,
		}
	});

	let update_fields = fields.iter().map(|(field, ident)| {
		let attrs = field
			.attrs
			.iter()
			.filter(|attr| !attr.path().is_ident("model"));
		let vis = &field.vis;
		let ty = field.input_ty();

		quote! {
			#(#attrs)*
			#vis #ident: Option<#ty>,
		}
	});

	quote! {
		#model

		#(#attrs)*
		#vis struct #create_ident #generics {
			#(
				#create_fields
			)*
		}

		#(#attrs)*
		#vis struct #update_ident #generics {
			#(
				#update_fields
			)*
		}
	}
	.into()
}
