pub mod acknowledgement;
pub mod document;
pub mod listings;
pub mod requests;
