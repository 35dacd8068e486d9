pub mod dates;
mod exif_writer;
mod list;
mod photo;
mod thumbnail;
mod viewport;

pub use dates::{DateCandidates, DateChoice, DATE_FORMAT};
pub use exif_writer::write_exif_date;
pub use list::{is_photo_file, PhotoList, PhotoRecord, SaveReport, DROPPED_DIR, ORIGINAL_DIR};
pub use photo::Photo;
pub use thumbnail::load_thumbnail;
pub use viewport::{FrameChange, Scroll, Viewport, INIT_FRAME_SIZE, MAX_FRAME_SIZE, MIN_FRAME_SIZE};
