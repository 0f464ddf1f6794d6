mod handlers;
mod types;

pub use handlers::{
    create_assigned_measure, delete_assigned_measure, delete_assignments, get_assignment_data,
    latest_readings, list_assigned_measures,
};
pub use types::{
    parse_compact_timestamp, AssignedMeasureResponse, DataPointResponse, LatestReading,
    NewAssignedMeasure,
};

pub use handlers::{
    __path_create_assigned_measure, __path_delete_assigned_measure, __path_get_assignment_data,
    __path_latest_readings, __path_list_assigned_measures,
};
