pub mod books;
pub mod debug;
pub mod jobs;

pub mod utils;
