//! HipChat Notify - Concourse CI resource posting templated build notifications to HipChat

pub mod cli;
pub mod config;
pub mod context;
pub mod message;
pub mod notification;
pub mod report;
pub mod template;

pub use config::{NotifyParams, OutRequest, SourceConfig};
pub use context::BuildContext;
pub use message::{Composition, MessageBody, MessageComposer, MessageType, SegmentConfig};
pub use notification::{HipChatClient, HipChatConfig, HipChatMessage};
pub use report::{Reporter, TracingReporter};
pub use template::{InterceptorChain, TokenInterceptor, TokenMap, TokenResolver, TokenValue};
