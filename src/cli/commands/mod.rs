pub mod doctor;
pub mod plan;
pub mod run;
