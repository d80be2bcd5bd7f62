//! Opinionated message composition
//!
//! # Usage
//! ```ignore
//! use hipchat_notify::message::{MessageComposer, Composition, SegmentConfig};
//! use hipchat_notify::report::TracingReporter;
//! use hipchat_notify::template::TokenMap;
//!
//! let composer = MessageComposer::new(&TracingReporter);
//! let mut tokens = TokenMap::new();
//! if let Composition::Composed(composed) =
//!     composer.compose(Some("failed"), None, &SegmentConfig::default(), &mut tokens, None)
//! {
//!     println!("{}", composed.message);
//! }
//! ```

pub mod body;
pub mod composer;
pub mod segment;
pub mod status;

pub use body::MessageBody;
pub use composer::{
    ComposedMessage, Composition, MessageComposer, DEFAULT_FROM, GIT_TOKENS, UNKNOWN_GIT_VALUE,
};
pub use segment::{SegmentConfig, SegmentSetting};
pub use status::{MessageType, StatusDefaults, UnknownMessageType};
