pub mod cluster;
pub mod drive;
pub mod erasure_set;
pub mod topology;
