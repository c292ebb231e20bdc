mod pain_record;
mod practice_record;
mod user;

pub use pain_record::*;
pub use practice_record::*;
pub use user::*;
