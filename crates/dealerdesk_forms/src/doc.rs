#![allow(dead_code)]
use utoipa::OpenApi;

use crate::logic::{
    CustomerSubmissionRequest, ErrorResponse, SubmissionResponse, VehicleSubmissionRequest,
};
use dealerdesk_db::FormType;

/// Record a new vehicle listing or an inventory edit.
#[utoipa::path(
    post,
    path = "/forms/vehicle", // Path relative to /api
    request_body(content = VehicleSubmissionRequest, example = json!({
        "submissionType": "VEHICLE_LISTING",
        "payload": {
            "make": "Porsche",
            "model": "911 Carrera",
            "contactEmail": "sales@prestigemotors.com",
            "features": ["Sport Chrono Package"],
            "dealershipId": "dealer-1"
        }
    })),
    responses(
        (status = 201, description = "Submission stored", body = SubmissionResponse),
        (status = 400, description = "Missing or empty required field", body = ErrorResponse),
        (status = 500, description = "Submission could not be stored", body = ErrorResponse)
    ),
    tag = "Forms"
)]
fn doc_submit_vehicle_handler() {}

/// Record a new customer.
#[utoipa::path(
    post,
    path = "/forms/customer", // Path relative to /api
    request_body(content = CustomerSubmissionRequest, example = json!({
        "payload": {
            "name": "Ada Okafor",
            "company": "Okafor Logistics",
            "email": "ada@okafor.example",
            "phone": "(555) 010-2020",
            "location": "Austin, TX",
            "type": "Business",
            "status": "Lead"
        }
    })),
    responses(
        (status = 201, description = "Submission stored", body = SubmissionResponse),
        (status = 400, description = "Missing or empty required field", body = ErrorResponse),
        (status = 500, description = "Submission could not be stored", body = ErrorResponse)
    ),
    tag = "Forms"
)]
fn doc_submit_customer_handler() {}

/// OpenAPI documentation for the form submission API
#[derive(OpenApi)]
#[openapi(
    paths(doc_submit_vehicle_handler, doc_submit_customer_handler),
    components(schemas(
        VehicleSubmissionRequest,
        CustomerSubmissionRequest,
        SubmissionResponse,
        ErrorResponse,
        FormType
    )),
    tags(
        (name = "Forms", description = "Audit trail of vehicle and customer form submissions")
    )
)]
pub struct FormsApiDoc;
