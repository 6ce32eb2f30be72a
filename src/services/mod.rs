//! Business logic over [`LinkRepository`](crate::storage::LinkRepository)

mod code_allocator;
mod link_service;
mod redirect;
mod sweeper;

pub use code_allocator::{CodeAllocator, CodeGenerator};
pub use link_service::LinkService;
pub use redirect::RedirectService;
pub use sweeper::ExpirySweeper;
