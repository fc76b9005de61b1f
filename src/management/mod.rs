mod images;
mod universe;

pub use images::IMAGES_WEB_PREFIX;
pub use images::ImageCache;
pub use images::sanitize_artist_name;
pub use universe::build_universe;
pub use universe::sort_by_scrobbles;
