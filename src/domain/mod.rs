mod duration;
mod playlist_id;
mod video_id;

pub use duration::TrackDuration;
pub use playlist_id::PlaylistId;
pub use video_id::VideoId;
pub(crate) use video_id::WATCH_URL_BASE;
