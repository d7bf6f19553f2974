pub mod logging;

pub use logging::{mask_secret, truncate_text};
