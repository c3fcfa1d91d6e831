// HTTP response building module entry

pub mod response;

// Re-export public builders
pub use response::*;
