//! 实体注册宏实现

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::{
    parse::Parse, parse::ParseStream, parse_macro_input, punctuated::Punctuated, Expr, Fields,
    Ident, ItemStruct, Lit, Meta, Result, Token,
};

/// 实体宏参数
#[derive(Debug, Clone, Default)]
pub struct EntityArgs {
    /// 目标表名
    pub table: Option<String>,
    /// 自定义类名
    pub name: Option<String>,
}

impl Parse for EntityArgs {
    fn parse(input: ParseStream<'_>) -> Result<Self> {
        let mut args = EntityArgs::default();

        let parsed = Punctuated::<Meta, Token![,]>::parse_terminated(input)?;

        for meta in parsed {
            if let Meta::NameValue(nv) = meta {
                if nv.path.is_ident("table") {
                    if let Expr::Lit(expr_lit) = nv.value {
                        if let Lit::Str(lit_str) = expr_lit.lit {
                            args.table = Some(lit_str.value());
                        }
                    }
                } else if nv.path.is_ident("name") {
                    if let Expr::Lit(expr_lit) = nv.value {
                        if let Lit::Str(lit_str) = expr_lit.lit {
                            args.name = Some(lit_str.value());
                        }
                    }
                }
            }
        }

        Ok(args)
    }
}

/// 单个字段的列映射参数
#[derive(Debug, Clone, Default)]
struct ColumnArgs {
    /// 目标列名
    column: Option<String>,
    /// 字段类型标识
    column_type: Option<String>,
    /// 是否为标识字段
    id: bool,
}

/// 从字段属性中解析 `#[column(...)]` 参数
fn parse_column_args(field: &syn::Field) -> Result<ColumnArgs> {
    let mut args = ColumnArgs::default();

    for attr in &field.attrs {
        if !attr.path().is_ident("column") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                let value = meta.value()?;
                let lit: Lit = value.parse()?;
                if let Lit::Str(lit_str) = lit {
                    args.column = Some(lit_str.value());
                }
            } else if meta.path.is_ident("column_type") {
                let value = meta.value()?;
                let lit: Lit = value.parse()?;
                if let Lit::Str(lit_str) = lit {
                    args.column_type = Some(lit_str.value());
                }
            } else if meta.path.is_ident("id") {
                args.id = true;
            }
            Ok(())
        })?;
    }

    Ok(args)
}

/// 实现 `#[entity]` 宏
pub fn entity_impl(args: TokenStream, input: TokenStream) -> TokenStream {
    let entity_args = if args.is_empty() {
        EntityArgs::default()
    } else {
        match syn::parse::<EntityArgs>(args) {
            Ok(args) => args,
            Err(e) => return e.to_compile_error().into(),
        }
    };

    let input_struct = parse_macro_input!(input as ItemStruct);

    let fields = match &input_struct.fields {
        Fields::Named(named) => &named.named,
        _ => {
            return syn::Error::new_spanned(
                &input_struct.ident,
                "#[entity] 只支持具名字段的结构体",
            )
            .to_compile_error()
            .into();
        }
    };

    // 收集字段映射并移除 #[column] 属性
    let mut field_mappings = Vec::new();
    let mut cleaned_struct = input_struct.clone();

    for field in fields {
        let column_args = match parse_column_args(field) {
            Ok(args) => args,
            Err(e) => return e.to_compile_error().into(),
        };
        let field_name = field
            .ident
            .as_ref()
            .map(|ident| ident.to_string())
            .unwrap_or_default();

        let mut mapping = quote! {
            persistence_common::FieldMapping::new(#field_name)
        };
        if let Some(column) = column_args.column {
            mapping = quote! { #mapping.with_column(#column) };
        }
        if let Some(column_type) = column_args.column_type {
            mapping = quote! { #mapping.with_type(#column_type) };
        }
        if column_args.id {
            mapping = quote! { #mapping.with_id(true) };
        }
        field_mappings.push(mapping);
    }

    if let Fields::Named(named) = &mut cleaned_struct.fields {
        for field in named.named.iter_mut() {
            field.attrs.retain(|attr| !attr.path().is_ident("column"));
        }
    }

    let struct_name = &input_struct.ident;

    let class_name_expr = match &entity_args.name {
        Some(custom_name) => quote! { #custom_name },
        None => quote! { concat!(module_path!(), "::", stringify!(#struct_name)) },
    };

    let table_call = match &entity_args.table {
        Some(table) => quote! { .with_table(#table) },
        None => quote! {},
    };

    // 生成 Entity trait 实现
    let entity_impl = quote! {
        impl persistence_common::Entity for #struct_name {
            fn class_name() -> &'static str {
                #class_name_expr
            }

            fn mapping() -> persistence_common::ClassMetadata {
                persistence_common::ClassMetadata::new(
                    <Self as persistence_common::Entity>::class_name(),
                )
                #table_call
                #( .with_field(#field_mappings) )*
            }
        }
    };

    // 生成启动时自动注册代码
    let registration_fn_name = Ident::new(
        &format!(
            "__register_entity_{}",
            struct_name.to_string().to_lowercase()
        ),
        Span::call_site(),
    );

    let registration_code = quote! {
        #[ctor::ctor]
        fn #registration_fn_name() {
            persistence_common::registry::register_entity(
                persistence_common::EntityDescriptor::new(
                    <#struct_name as persistence_common::Entity>::class_name(),
                    <#struct_name as persistence_common::Entity>::mapping,
                ),
            );
        }
    };

    let expanded = quote! {
        #cleaned_struct

        #entity_impl

        #registration_code
    };

    TokenStream::from(expanded)
}
