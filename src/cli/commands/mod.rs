pub mod check;
mod context;
pub mod get;
pub mod init;

pub use context::StoreContext;
