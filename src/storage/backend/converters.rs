use crate::storage::{NewShortUrl, ShortUrlRecord};
use migration::entities::short_url;

pub fn model_to_record(model: short_url::Model) -> ShortUrlRecord {
    ShortUrlRecord {
        id: model.id,
        original_url: model.original_url,
        short_code: model.short_code,
        created_at: model.created_at,
        expires_at: model.expires_at,
        visit_count: model.visit_count.max(0) as u64,
    }
}

/// Build the insert model; `id` is left to the database
pub fn new_link_to_active_model(link: &NewShortUrl) -> short_url::ActiveModel {
    use sea_orm::ActiveValue::*;

    short_url::ActiveModel {
        id: NotSet,
        original_url: Set(link.original_url.clone()),
        short_code: Set(link.short_code.clone()),
        created_at: Set(link.created_at),
        expires_at: Set(link.expires_at),
        visit_count: Set(0),
    }
}
