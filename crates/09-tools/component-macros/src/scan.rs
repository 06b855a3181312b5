//! 扫描配置宏实现

use crate::utils::expect_lit_str;
use proc_macro::TokenStream;
use quote::quote;
use syn::{parse::Parse, parse::ParseStream, parse_macro_input, DeriveInput, LitStr, Meta, Result};

/// 扫描配置参数
#[derive(Clone)]
pub struct ScanArgs {
    /// 点分形式的基础命名空间
    pub base_package: LitStr,
}

impl Parse for ScanArgs {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        let base_package = if input.peek(LitStr) {
            input.parse()?
        } else {
            match input.parse::<Meta>()? {
                Meta::NameValue(nv) if nv.path.is_ident("base_package") => {
                    expect_lit_str(&nv.value, "base_package")?
                }
                other => {
                    return Err(syn::Error::new_spanned(
                        other,
                        "需要基础命名空间，例如 #[component_scan(\"app.service\")]",
                    ))
                }
            }
        };

        if !input.is_empty() {
            return Err(input.error("component_scan 只接受一个参数"));
        }
        if base_package.value().trim().is_empty() {
            return Err(syn::Error::new(base_package.span(), "基础命名空间不能为空"));
        }
        Ok(Self { base_package })
    }
}

/// 实现 #[component_scan] 宏
pub fn component_scan_impl(args: TokenStream, input: TokenStream) -> TokenStream {
    let scan_args = match syn::parse::<ScanArgs>(args) {
        Ok(args) => args,
        Err(e) => return e.to_compile_error().into(),
    };
    let input = parse_macro_input!(input as DeriveInput);
    expand(&scan_args, &input).into()
}

fn expand(args: &ScanArgs, input: &DeriveInput) -> proc_macro2::TokenStream {
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let base_package = &args.base_package;

    quote! {
        #input

        impl #impl_generics ::infrastructure_common::ComponentScan for #name #ty_generics #where_clause {
            fn base_package() -> &'static str {
                #base_package
            }
        }
    }
}
