use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields};

/// 为无字段枚举自动实现 ConfigEnum 与 ParseValue trait
///
/// 变体名按大小写不敏感匹配，数值形式只接受已定义的判别值。
/// 枚举需要同时 derive `Clone` 和 `Copy`。
///
/// # 示例
/// ```ignore
/// use metricx::ConfigEnum;
///
/// #[derive(Debug, Clone, Copy, PartialEq, ConfigEnum)]
/// enum Mode {
///     Fast = 0,
///     Slow = 1,
/// }
/// ```
#[proc_macro_derive(ConfigEnum)]
pub fn config_enum_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => TokenStream::from(tokens),
        Err(e) => TokenStream::from(e.to_compile_error()),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let enum_name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "ConfigEnum 不支持泛型枚举",
        ));
    }

    let data = match &input.data {
        Data::Enum(data) => data,
        _ => {
            return Err(syn::Error::new_spanned(
                enum_name,
                "ConfigEnum 只能用于枚举类型",
            ))
        }
    };

    let mut entries = Vec::with_capacity(data.variants.len());
    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(syn::Error::new_spanned(
                variant,
                "ConfigEnum 的变体不能携带字段",
            ));
        }
        let ident = &variant.ident;
        let name = ident.to_string();
        entries.push(quote! { (#name, #enum_name::#ident) });
    }

    Ok(quote! {
        impl ::metricx::cfg::ConfigEnum for #enum_name {
            fn variants() -> &'static [(&'static str, Self)] {
                const VARIANTS: &[(&str, #enum_name)] = &[#(#entries),*];
                VARIANTS
            }

            fn discriminant(self) -> i64 {
                self as i64
            }
        }

        impl ::metricx::cfg::ParseValue for #enum_name {
            fn parse_value(s: &str) -> ::std::result::Result<Self, ::metricx::cfg::ConversionError> {
                <Self as ::metricx::cfg::ConfigEnum>::parse_name(s).ok_or_else(|| {
                    ::metricx::cfg::ConversionError::invalid::<Self>(s, "not a defined variant")
                })
            }
        }
    })
}
