pub mod date;
pub mod id_number;

pub use date::{parse_date_token, within_plausible_range};
pub use id_number::{classify_id, IdPattern};
