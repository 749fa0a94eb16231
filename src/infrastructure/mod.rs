pub mod audio;
pub mod llm;
pub mod media;
pub mod observability;
