pub mod attachments;
pub mod error;
pub mod fields;
pub mod parser;
pub mod pipeline;

pub use error::QuoteError;
pub use fields::QuoteSubmission;
pub use parser::{FormData, UploadedFile};
