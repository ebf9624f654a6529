mod client;
mod resources;

pub use client::{bearer, UpstreamClient, UpstreamError, UpstreamReply};
pub use resources::{ADMINISTRATORS, PROJECTS, SUBMISSIONS};
