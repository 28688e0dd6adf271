pub mod blade;
pub mod maintenance;
pub mod site;
pub mod turbine;
