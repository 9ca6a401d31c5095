use proc_macro::TokenStream;

mod event;

/// 为结构体/枚举实现 `::event_dispatcher::Event`
///
/// 支持参数：
/// - `#[event(name = "user.created")]` 指定事件名；缺省时使用类型名
///
/// ```ignore
/// #[derive(Event)]
/// #[event(name = "user.created")]
/// struct UserCreated { user_id: u64 }
/// ```
#[proc_macro_derive(Event, attributes(event))]
pub fn derive_event(input: TokenStream) -> TokenStream {
    event::expand(input)
}
