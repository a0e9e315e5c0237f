use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{StudentService, check_student_fields};
use crate::models::{ApiResponse, students::requests::CreateStudentRequest};
use crate::services::write_error_response;

pub async fn create_student(
    service: &StudentService,
    request: &HttpRequest,
    student_data: CreateStudentRequest,
) -> ActixResult<HttpResponse> {
    if let Err(resp) = check_student_fields(
        Some(student_data.roll_no.as_str()),
        Some(student_data.first_name.as_str()),
        Some(student_data.last_name.as_str()),
        Some(student_data.email.as_str()),
    ) {
        return Ok(resp);
    }

    let storage = service.get_storage(request);

    match storage.create_student(student_data).await {
        Ok(student) => {
            info!("Student {} ({}) created", student.roll_no, student.full_name());
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(student, "Student created successfully")))
        }
        Err(e) => {
            error!("Failed to create student: {}", e);
            Ok(write_error_response("create student", &e))
        }
    }
}
