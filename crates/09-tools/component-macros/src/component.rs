//! 组件注册宏实现

use crate::utils::{expect_lit_str, registration_fn_name, take_injection_points, to_snake_case};
use proc_macro::TokenStream;
use quote::quote;
use syn::{
    parse::Parse, parse::ParseStream, parse_macro_input, Ident, ItemStruct, LitStr, Meta, Path,
    Result, Token,
};

/// 组件配置参数
#[derive(Clone, Default)]
pub struct ComponentArgs {
    /// 组件名称，缺省时使用 snake_case 的类型名
    pub name: Option<String>,
    /// 作用域声明文本，原样交给扫描器校验
    pub scope: Option<String>,
    /// 是否实现名称感知能力
    pub name_aware: bool,
    /// 是否实现初始化回调能力
    pub post_construct: bool,
    /// 是否同时是后置处理器
    pub post_processor: bool,
    /// 没有零参数构造函数
    pub no_default: bool,
    /// 自定义零参数构造函数
    pub constructor: Option<Path>,
}

impl Parse for ComponentArgs {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        let mut args = Self::default();

        if input.peek(LitStr) {
            let name: LitStr = input.parse()?;
            args.name = Some(name.value());
            if input.is_empty() {
                return Ok(args);
            }
            input.parse::<Token![,]>()?;
        }

        while !input.is_empty() {
            let meta: Meta = input.parse()?;
            match &meta {
                Meta::Path(path) if path.is_ident("name_aware") => args.name_aware = true,
                Meta::Path(path) if path.is_ident("post_construct") => args.post_construct = true,
                Meta::Path(path) if path.is_ident("post_processor") => args.post_processor = true,
                Meta::Path(path) if path.is_ident("no_default") => args.no_default = true,
                Meta::NameValue(nv) if nv.path.is_ident("name") => {
                    args.name = Some(expect_lit_str(&nv.value, "name")?.value());
                }
                Meta::NameValue(nv) if nv.path.is_ident("scope") => {
                    args.scope = Some(expect_lit_str(&nv.value, "scope")?.value());
                }
                Meta::NameValue(nv) if nv.path.is_ident("constructor") => {
                    args.constructor = Some(expect_lit_str(&nv.value, "constructor")?.parse()?);
                }
                other => {
                    return Err(syn::Error::new_spanned(other, "未知的 component 参数"));
                }
            }

            if input.is_empty() {
                break;
            }
            input.parse::<Token![,]>()?;
        }

        args.validate()?;
        Ok(args)
    }
}

impl ComponentArgs {
    fn validate(&self) -> Result<()> {
        let span = proc_macro2::Span::call_site();
        if self.no_default && self.constructor.is_some() {
            return Err(syn::Error::new(span, "no_default 与 constructor 不能同时使用"));
        }
        if self.post_processor && (self.no_default || self.constructor.is_some()) {
            return Err(syn::Error::new(
                span,
                "post_processor 组件需要通过 Default 构造",
            ));
        }
        Ok(())
    }
}

/// 实现 #[component] 宏
pub fn component_impl(args: TokenStream, input: TokenStream) -> TokenStream {
    let component_args = if args.is_empty() {
        ComponentArgs::default()
    } else {
        match syn::parse::<ComponentArgs>(args) {
            Ok(args) => args,
            Err(e) => return e.to_compile_error().into(),
        }
    };

    let input_struct = parse_macro_input!(input as ItemStruct);
    match expand(component_args, input_struct) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

fn expand(args: ComponentArgs, mut input_struct: ItemStruct) -> Result<proc_macro2::TokenStream> {
    if !input_struct.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input_struct.generics,
            "#[component] 不支持泛型类型",
        ));
    }

    let injection_points = take_injection_points(&mut input_struct)?;
    let struct_name = &input_struct.ident;
    let component_name = args
        .name
        .clone()
        .unwrap_or_else(|| to_snake_case(&struct_name.to_string()));

    let bean_impl = generate_bean_impl(&args, struct_name, &injection_points);
    let component_impl = generate_component_impl(&args, struct_name, &component_name);
    let registration_code = generate_registration_code(struct_name);

    Ok(quote! {
        #input_struct

        #bean_impl

        #component_impl

        #registration_code
    })
}

fn generate_bean_impl(
    args: &ComponentArgs,
    struct_name: &Ident,
    injection_points: &[Ident],
) -> proc_macro2::TokenStream {
    let injection = if injection_points.is_empty() {
        quote! {}
    } else {
        let names: Vec<String> = injection_points.iter().map(Ident::to_string).collect();
        quote! {
            fn injection_points(&self) -> &'static [&'static str] {
                &[#(#names),*]
            }

            fn inject(
                &mut self,
                field: &str,
                dependency: ::infrastructure_common::BeanRef,
            ) -> ::infrastructure_common::ContainerResult<()> {
                match field {
                    #(#names => ::infrastructure_common::InjectionSlot::assign(
                        &mut self.#injection_points,
                        field,
                        dependency,
                    ),)*
                    _ => Err(::infrastructure_common::ContainerError::unknown_injection_point(
                        stringify!(#struct_name),
                        field,
                    )),
                }
            }
        }
    };

    let name_aware = args.name_aware.then(|| {
        quote! {
            fn as_name_aware(&mut self) -> Option<&mut dyn ::infrastructure_common::NameAware> {
                Some(self)
            }
        }
    });

    let post_construct = args.post_construct.then(|| {
        quote! {
            fn as_post_constructible(
                &mut self,
            ) -> Option<&mut dyn ::infrastructure_common::PostConstructible> {
                Some(self)
            }
        }
    });

    quote! {
        impl ::infrastructure_common::Bean for #struct_name {
            #injection
            #name_aware
            #post_construct
        }
    }
}

fn generate_component_impl(
    args: &ComponentArgs,
    struct_name: &Ident,
    component_name: &str,
) -> proc_macro2::TokenStream {
    let scope = match &args.scope {
        Some(scope) => quote! { Some(#scope) },
        None => quote! { None },
    };

    let base_type = if args.no_default {
        quote! { ::infrastructure_common::ComponentType::without_constructor::<#struct_name>() }
    } else if let Some(constructor) = &args.constructor {
        quote! {
            ::infrastructure_common::ComponentType::with_constructor::<#struct_name>(|| {
                #constructor()
                    .map(|bean| {
                        ::std::boxed::Box::new(bean) as ::std::boxed::Box<dyn ::infrastructure_common::Bean>
                    })
                    .map_err(::std::convert::Into::into)
            })
        }
    } else {
        quote! { ::infrastructure_common::ComponentType::of::<#struct_name>() }
    };

    let component_type = if args.post_processor {
        quote! { #base_type.with_post_processor::<#struct_name>() }
    } else {
        base_type
    };

    quote! {
        impl ::infrastructure_common::Component for #struct_name {
            const NAME: &'static str = #component_name;
            const SCOPE: Option<&'static str> = #scope;

            fn component_type() -> ::infrastructure_common::ComponentType {
                #component_type
            }
        }
    }
}

/// 生成组件自动登记代码
fn generate_registration_code(struct_name: &Ident) -> proc_macro2::TokenStream {
    let registration_fn_name = registration_fn_name("lorn_register_unit", struct_name);

    quote! {
        // 使用 ctor 在程序加载时把组件登记为编译单元
        #[::ctor::ctor]
        fn #registration_fn_name() {
            ::infrastructure_common::submit_unit(::infrastructure_common::UnitHandle::from_module_path(
                module_path!(),
                stringify!(#struct_name),
                <#struct_name as ::infrastructure_common::Component>::component_type(),
                Some(<#struct_name as ::infrastructure_common::Component>::declaration()),
            ));
        }
    }
}
