pub mod fields;
pub mod project;
pub mod raw;
pub mod record;
