use proc_macro::TokenStream;
use proc_macro2::{Ident, Span, TokenStream as TokenStream2};
use proc_macro_crate::{FoundCrate, crate_name};
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Fields, parse_macro_input};

/// Derives `calmform::form::FormModel` for a struct with named fields.
///
/// Every field type must convert into `FieldValue`. A `<Model>Fields`
/// accessor type is generated alongside, with one method per field
/// returning that field's `FieldName`.
#[proc_macro_derive(FormModel)]
pub fn derive_form_model(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    if !input.generics.params.is_empty() {
        return syn::Error::new_spanned(
            input.ident,
            "FormModel derive currently supports only non-generic structs",
        )
        .to_compile_error()
        .into();
    }

    let model_ident = input.ident;
    let fields_struct_ident = format_ident!("{model_ident}Fields");

    let named_fields = match input.data {
        Data::Struct(data) => match data.fields {
            Fields::Named(fields) => fields.named,
            _ => {
                return syn::Error::new_spanned(
                    &model_ident,
                    "FormModel derive requires a struct with named fields",
                )
                .to_compile_error()
                .into();
            }
        },
        _ => {
            return syn::Error::new_spanned(
                &model_ident,
                "FormModel derive is only supported on structs",
            )
            .to_compile_error()
            .into();
        }
    };

    let calmform = calmform_path();
    let mut names = Vec::new();
    let mut inserts = Vec::new();
    let mut fields_methods = Vec::new();

    for field in named_fields {
        let Some(field_ident) = field.ident else {
            continue;
        };
        let field_name = field_ident.to_string();

        names.push(quote! {
            #calmform::form::FieldName::from_static(#field_name)
        });
        inserts.push(quote! {
            values.insert(
                #calmform::form::FieldName::from_static(#field_name),
                #calmform::form::FieldValue::from(self.#field_ident),
            );
        });
        fields_methods.push(quote! {
            pub const fn #field_ident(&self) -> #calmform::form::FieldName {
                #calmform::form::FieldName::from_static(#field_name)
            }
        });
    }

    quote! {
        #[derive(Clone, Copy, Debug, Default)]
        pub struct #fields_struct_ident;

        impl #fields_struct_ident {
            #(#fields_methods)*
        }

        impl #model_ident {
            pub const fn fields() -> #fields_struct_ident {
                #fields_struct_ident
            }
        }

        impl #calmform::form::FormModel for #model_ident {
            fn field_names() -> ::std::vec::Vec<#calmform::form::FieldName> {
                ::std::vec![#(#names),*]
            }

            fn into_values(self) -> #calmform::form::FormValues {
                let mut values = #calmform::form::FormValues::new();
                #(#inserts)*
                values
            }
        }
    }
    .into()
}

fn calmform_path() -> TokenStream2 {
    match crate_name("calmform") {
        Ok(FoundCrate::Name(name)) => {
            let ident = Ident::new(&name, Span::call_site());
            quote!(::#ident)
        }
        Ok(FoundCrate::Itself) => quote!(crate),
        Err(_) => quote!(::calmform),
    }
}
