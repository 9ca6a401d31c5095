use proc_macro::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{DeriveInput, LitStr, Result as SynResult, parse_macro_input};

/// #[derive(Event)] 宏实现
/// - 读取类型上的 `#[event(name = "...")]`（最多一个 name）
/// - 生成 `impl ::event_dispatcher::Event`，`NAME` 为指定事件名或类型名
pub(crate) fn expand(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    if let syn::Data::Union(u) = &input.data {
        return syn::Error::new(u.union_token.span(), "#[derive(Event)] does not support unions")
            .to_compile_error()
            .into();
    }

    let name = match parse_event_name(&input.attrs) {
        Ok(Some(lit)) => lit,
        Ok(None) => LitStr::new(&input.ident.to_string(), input.ident.span()),
        Err(err) => return err.to_compile_error().into(),
    };

    if name.value().is_empty() {
        return syn::Error::new(name.span(), "event name must not be empty")
            .to_compile_error()
            .into();
    }

    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let out = quote! {
        impl #impl_generics ::event_dispatcher::Event for #ident #ty_generics #where_clause {
            const NAME: &'static str = #name;
        }
    };

    TokenStream::from(out)
}

// 在所有 #[event(...)] 属性中查找 name = "..."
fn parse_event_name(attrs: &[syn::Attribute]) -> SynResult<Option<LitStr>> {
    let mut name: Option<LitStr> = None;

    for attr in attrs.iter().filter(|a| a.path().is_ident("event")) {
        attr.parse_nested_meta(|meta| {
            if !meta.path.is_ident("name") {
                return Err(meta.error("unknown key; expected 'name'"));
            }
            if name.is_some() {
                return Err(meta.error("duplicate key 'name' in attribute"));
            }
            let lit: LitStr = meta.value()?.parse().map_err(|err| {
                syn::Error::new(err.span(), "expected string literal for 'name'")
            })?;
            name = Some(lit);
            Ok(())
        })?;
    }

    Ok(name)
}
