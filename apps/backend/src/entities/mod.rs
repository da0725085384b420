pub mod feedbacks;

pub use feedbacks::Entity as Feedbacks;
pub use feedbacks::Model as FeedbackRow;
