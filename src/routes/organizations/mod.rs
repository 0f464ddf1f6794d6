mod handlers;
mod types;

pub use handlers::{create_organization, list_organization_people, list_organizations};
pub use types::{NewOrganization, OrganizationResponse};

// Re-export utoipa path structs for OpenAPI documentation
pub use handlers::{
    __path_create_organization, __path_list_organization_people, __path_list_organizations,
};
