//! Code generation for `#[derive(Record)]`.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{spanned::Spanned, Data, DeriveInput, Error, Fields, Ident, Result};

use super::attrs::{infer_kind, parse_record_attrs, unwrap_option, FieldKind};

pub fn record_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new(
                    input.span(),
                    "Record can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                input.span(),
                "Record can only be derived for structs",
            ))
        }
    };

    let mut value_arms: Vec<TokenStream> = Vec::new();
    let mut name_arms: Vec<TokenStream> = Vec::new();
    let mut constants: Vec<TokenStream> = Vec::new();

    for field in fields.iter() {
        let ident = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;

        let attr = parse_record_attrs(&field.attrs)?;
        if attr.skip {
            continue;
        }

        let (optional, inner_ty) = unwrap_option(&field.ty);
        let kind = match attr.kind.or_else(|| infer_kind(inner_ty)) {
            Some(kind) => kind,
            None => continue,
        };

        let query_name = attr.rename.unwrap_or_else(|| ident.to_string());
        let const_name: Ident =
            syn::parse_str(&to_screaming_snake_case(&query_name)).map_err(|_| {
                Error::new(
                    field.span(),
                    format!(
                        "record field name '{}' must start with a letter or '_' and contain only letters, digits, '_' or '-'",
                        query_name
                    ),
                )
            })?;

        constants.push(quote! {
            /// Field name for use with `sift` operators.
            pub const #const_name: &'static str = #query_name;
        });

        let value = if optional {
            let present = value_expr(kind, quote!(__sift_value), quote!(*__sift_value));
            quote! {
                match &self.#ident {
                    ::core::option::Option::Some(__sift_value) => #present,
                    ::core::option::Option::None => ::sift::Value::None,
                }
            }
        } else {
            value_expr(kind, quote!(&self.#ident), quote!(self.#ident))
        };

        value_arms.push(quote! { #query_name => #value, });
        name_arms.push(quote! { #query_name => true, });
    }

    Ok(quote! {
        impl #impl_generics #struct_name #ty_generics #where_clause {
            #(#constants)*
        }

        impl #impl_generics ::sift::Record for #struct_name #ty_generics #where_clause {
            fn field(&self, name: &str) -> ::sift::Value<'_> {
                match name {
                    #(#value_arms)*
                    _ => ::sift::Value::None,
                }
            }

            fn has_field(&self, name: &str) -> bool {
                match name {
                    #(#name_arms)*
                    _ => false,
                }
            }
        }
    })
}

/// Builds the `Value` for one field, given the field as a reference and
/// as a copied value.
fn value_expr(kind: FieldKind, by_ref: TokenStream, by_value: TokenStream) -> TokenStream {
    match kind {
        FieldKind::String => quote! { ::sift::Value::String(#by_ref) },
        FieldKind::Number => {
            quote! { ::sift::Value::Number(::sift::Number::from(#by_value)) }
        }
        FieldKind::Bool => quote! { ::sift::Value::Bool(#by_value) },
        FieldKind::Timestamp => quote! {
            ::sift::Value::Timestamp(::sift::AsTimestamp::as_timestamp(#by_ref))
        },
        FieldKind::Enum => quote! {
            ::sift::Value::Enum(::sift::AsDiscriminant::discriminant(#by_ref))
        },
    }
}

/// Convert a string to SCREAMING_SNAKE_CASE.
fn to_screaming_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev_was_lower = false;

    for c in s.chars() {
        if c.is_uppercase() {
            if prev_was_lower {
                result.push('_');
            }
            result.push(c);
            prev_was_lower = false;
        } else if c == '_' || c == '-' {
            result.push('_');
            prev_was_lower = false;
        } else {
            result.push(c.to_ascii_uppercase());
            prev_was_lower = true;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screaming_snake_case() {
        assert_eq!(to_screaming_snake_case("age"), "AGE");
        assert_eq!(to_screaming_snake_case("dept_id"), "DEPT_ID");
        assert_eq!(to_screaming_snake_case("deptId"), "DEPT_ID");
        assert_eq!(to_screaming_snake_case("hire-date"), "HIRE_DATE");
    }

    #[test]
    fn rejects_enums_and_tuple_structs() {
        let tuple: DeriveInput = syn::parse_quote! { struct Pair(u32, u32); };
        let err = record_derive_impl(tuple).unwrap_err();
        assert!(err.to_string().contains("named fields"));

        let enumeration: DeriveInput = syn::parse_quote! { enum Level { Junior } };
        assert!(record_derive_impl(enumeration).is_err());
    }

    #[test]
    fn generates_arms_for_exposed_fields_only() {
        let input: DeriveInput = syn::parse_quote! {
            struct Employee {
                name: String,
                #[record(rename = "dept")]
                dept_id: u32,
                manager: Option<String>,
                #[record(skip)]
                age: u8,
                tags: Vec<String>,
            }
        };

        let code = record_derive_impl(input).unwrap().to_string();

        assert!(code.contains("NAME"));
        assert!(code.contains("DEPT"));
        assert!(code.contains("MANAGER"));
        assert!(!code.contains("\"age\""));
        assert!(!code.contains("\"tags\""));
        assert!(!code.contains("\"dept_id\""));
    }

    #[test]
    fn rename_must_yield_an_identifier() {
        for bad in ["dept.id", "2nd", "", "dept id"] {
            let input: DeriveInput = syn::parse_quote! {
                struct Employee {
                    #[record(rename = #bad)]
                    dept_id: u32,
                }
            };
            let err = record_derive_impl(input).unwrap_err();
            assert!(err.to_string().contains("must start with a letter"), "{bad}");
        }

        let input: DeriveInput = syn::parse_quote! {
            struct Employee {
                #[record(rename = "hire-date")]
                hired: i64,
            }
        };
        let code = record_derive_impl(input).unwrap().to_string();
        assert!(code.contains("HIRE_DATE"));
    }

    #[test]
    fn unknown_kind_is_an_error() {
        let input: DeriveInput = syn::parse_quote! {
            struct Bad {
                #[record(Money)]
                price: u64,
            }
        };
        assert!(record_derive_impl(input).is_err());
    }
}
