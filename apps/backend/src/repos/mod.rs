pub mod feedbacks;
