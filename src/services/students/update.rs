use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{StudentService, check_student_fields};
use crate::models::{
    ApiResponse, ErrorCode, ErrorResponse, students::requests::UpdateStudentRequest,
};
use crate::services::write_error_response;

pub async fn update_student(
    service: &StudentService,
    request: &HttpRequest,
    student_id: i64,
    update_data: UpdateStudentRequest,
) -> ActixResult<HttpResponse> {
    if let Err(resp) = check_student_fields(
        update_data.roll_no.as_deref(),
        update_data.first_name.as_deref(),
        update_data.last_name.as_deref(),
        update_data.email.as_deref(),
    ) {
        return Ok(resp);
    }

    let storage = service.get_storage(request);

    match storage.update_student(student_id, update_data).await {
        Ok(Some(student)) => {
            info!("Student {} updated", student.id);
            Ok(HttpResponse::Ok()
                .json(ApiResponse::success(student, "Student updated successfully")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ErrorResponse::new(
            ErrorCode::NotFound,
            "Student not found",
        ))),
        Err(e) => Ok(write_error_response("update student", &e)),
    }
}
