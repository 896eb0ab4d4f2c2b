#![forbid(unsafe_code)]

pub mod media;
pub mod session;
