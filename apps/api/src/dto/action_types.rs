mod conversions;
mod types;

pub use types::{
    ActionTypeSummaryResponse, ApplyFieldChangeRequest, FieldDefinitionResponse,
    FieldValueResponse, RenderFormRequest, RenderedFieldResponse, ValidateConfigRequest,
    ValidationResponse,
};
