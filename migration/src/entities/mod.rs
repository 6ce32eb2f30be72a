pub mod short_url;

pub use short_url::Entity as ShortUrlEntity;
