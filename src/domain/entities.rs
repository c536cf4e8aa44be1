pub mod contact;
pub mod project;
pub mod project_skill;
pub mod skill;
pub mod token;
