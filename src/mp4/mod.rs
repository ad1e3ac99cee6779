pub mod r#box;
pub use r#box::{box_body, boxes, find_box, parse_box_header, write_box_header, BoxHeader, BoxIter};
pub mod moov;
pub use moov::{scan_mp4_window, walk_moov, MoovSummary};
pub mod mvhd;
pub use mvhd::{parse_mvhd, MovieHeader};
pub mod tkhd;
pub use tkhd::parse_tkhd_dimensions;
