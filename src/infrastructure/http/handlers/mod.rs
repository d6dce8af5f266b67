//! HTTP Handlers

mod deployment;
mod device;
mod download;
mod frequency;
mod ping;
mod report;
mod spectrum;
mod status;
mod threat;
mod websocket;

pub use deployment::*;
pub use device::*;
pub use download::*;
pub use frequency::*;
pub use ping::*;
pub use report::*;
pub use spectrum::*;
pub use status::*;
pub use threat::*;
pub use websocket::*;
