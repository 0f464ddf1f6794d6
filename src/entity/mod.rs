pub mod assigned_measures;
pub mod data;
pub mod measures;
pub mod organizations;
pub mod persons;
pub mod stations;
