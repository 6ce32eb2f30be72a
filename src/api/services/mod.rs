pub mod index;
pub mod redirect;
pub mod shorten;
pub mod stats;

pub use index::index_routes;
pub use redirect::{RedirectHandler, redirect_routes};
pub use shorten::{ShortenRateLimit, ShortenService, shorten_routes};
pub use stats::{StatsService, stats_routes};
