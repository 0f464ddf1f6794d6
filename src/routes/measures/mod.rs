mod handlers;
mod types;

pub use handlers::{
    create_measure, delete_measure, get_measure, list_measure_assignments, list_measures,
    update_measure,
};
pub use types::{MeasureResponse, MeasureUpdate, NewMeasure};

pub use handlers::{
    __path_create_measure, __path_delete_measure, __path_get_measure,
    __path_list_measure_assignments, __path_list_measures, __path_update_measure,
};
