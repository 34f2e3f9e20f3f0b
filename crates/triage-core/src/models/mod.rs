pub mod batch_context;
pub mod batch_result;
pub mod category;
pub mod classification_result;
pub mod priority;

pub use batch_context::BatchContext;
pub use batch_result::BatchResult;
pub use category::Category;
pub use classification_result::ClassificationResult;
pub use priority::Priority;
