//! Write pipelines wrapping the persistence processors

mod soft_delete;

pub use soft_delete::SoftDeleteProcessor;
