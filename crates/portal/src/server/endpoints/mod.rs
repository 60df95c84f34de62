pub mod course_label;
pub mod status;
