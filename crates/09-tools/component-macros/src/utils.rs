//! 宏工具函数

use proc_macro2::Span;
use syn::{Attribute, Expr, Fields, Ident, ItemStruct, Lit, LitStr, Result, Type};

/// 注入点属性名
pub const AUTOWIRED: &str = "autowired";

/// 将类型名转换为 snake_case，例如 `UserService` -> `user_service`
pub fn to_snake_case(name: &str) -> String {
    let mut snake = String::with_capacity(name.len() + 4);
    let mut previous_lower = false;
    for ch in name.chars() {
        if ch.is_uppercase() {
            if previous_lower {
                snake.push('_');
            }
            snake.extend(ch.to_lowercase());
            previous_lower = false;
        } else {
            snake.push(ch);
            previous_lower = ch.is_lowercase() || ch.is_ascii_digit();
        }
    }
    snake
}

/// 取出字符串字面量表达式的值
pub fn expect_lit_str(expr: &Expr, what: &str) -> Result<LitStr> {
    match expr {
        Expr::Lit(expr_lit) => match &expr_lit.lit {
            Lit::Str(lit_str) => Ok(lit_str.clone()),
            other => Err(syn::Error::new_spanned(
                other,
                format!("{} 必须是字符串字面量", what),
            )),
        },
        other => Err(syn::Error::new_spanned(
            other,
            format!("{} 必须是字符串字面量", what),
        )),
    }
}

/// 检查类型是否为 Option<T>
pub fn is_option_type(ty: &Type) -> bool {
    match ty {
        Type::Path(type_path) => type_path
            .path
            .segments
            .last()
            .map(|segment| segment.ident == "Option")
            .unwrap_or(false),
        _ => false,
    }
}

fn is_autowired(attr: &Attribute) -> bool {
    attr.path().is_ident(AUTOWIRED)
}

/// 移除字段上的 `#[autowired]` 属性，返回注入点字段名
///
/// 注入点字段必须是具名字段，类型必须是 `Option<..>`
pub fn take_injection_points(item: &mut ItemStruct) -> Result<Vec<Ident>> {
    let mut points = Vec::new();
    match &mut item.fields {
        Fields::Named(fields) => {
            for field in fields.named.iter_mut() {
                let before = field.attrs.len();
                field.attrs.retain(|attr| !is_autowired(attr));
                if field.attrs.len() == before {
                    continue;
                }
                if !is_option_type(&field.ty) {
                    return Err(syn::Error::new_spanned(
                        &field.ty,
                        "#[autowired] 字段的类型必须是 Option<Autowired<T>> 或 Option<BeanRef>",
                    ));
                }
                if let Some(ident) = &field.ident {
                    points.push(ident.clone());
                }
            }
        }
        Fields::Unnamed(fields) => {
            if let Some(field) = fields
                .unnamed
                .iter()
                .find(|field| field.attrs.iter().any(is_autowired))
            {
                return Err(syn::Error::new_spanned(
                    field,
                    "#[autowired] 只能用于具名字段",
                ));
            }
        }
        Fields::Unit => {}
    }
    Ok(points)
}

/// 生成登记函数名
pub fn registration_fn_name(prefix: &str, struct_name: &Ident) -> Ident {
    Ident::new(
        &format!("__{}_{}", prefix, to_snake_case(&struct_name.to_string())),
        Span::call_site(),
    )
}
