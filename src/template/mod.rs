//! Message templating - `${NAME}` token resolution

pub mod interceptor;
pub mod resolver;
pub mod tokens;

pub use interceptor::{
    DefaultInterceptor, Interception, InterceptorChain, TokenInterceptor, TruncatingInterceptor,
    Verdict,
};
pub use resolver::{placeholder, TokenResolver};
pub use tokens::{read_token_file, FileRef, TokenMap, TokenValue, FILE_SCHEME};
