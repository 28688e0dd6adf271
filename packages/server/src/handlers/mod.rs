pub mod blade;
pub mod dashboard;
pub mod maintenance;
pub mod site;
pub mod technician;
pub mod turbine;
