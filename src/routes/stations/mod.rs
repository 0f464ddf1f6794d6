mod handlers;
mod types;

pub use handlers::{
    create_station, delete_station, get_station, list_station_assignments, list_stations,
    update_station,
};
pub use types::{NewStation, StationResponse, StationUpdate};

// Re-export utoipa path structs for OpenAPI documentation
pub use handlers::{
    __path_create_station, __path_delete_station, __path_get_station,
    __path_list_station_assignments, __path_list_stations, __path_update_station,
};
