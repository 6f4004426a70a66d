pub mod calls;
pub mod carriers;
pub mod loads;
