/// Server services
pub mod restream;

pub use restream::RestreamService;
