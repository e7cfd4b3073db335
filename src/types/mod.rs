pub mod ids;
pub mod media;
pub mod project;
pub mod sequence;
pub mod settings;
pub mod track;
pub mod track_collection;
