pub mod validation;

pub use validation::{validate_new_post, validate_position, validate_post_update};
