pub mod analytics;
pub mod blade;
pub mod maintenance;
pub mod shared;
pub mod site;
pub mod turbine;
