pub mod app;
pub mod pacer;

pub use app::App;
pub use pacer::FramePacer;
