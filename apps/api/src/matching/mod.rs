pub mod handlers;
pub mod pipeline;
pub mod scorer;
pub mod segmenter;
pub mod summarize;
pub mod taxonomy;
