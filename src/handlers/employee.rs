use actix_web::{web, HttpResponse};
use chrono::Utc;
use log::{error, info, warn};
use serde::Serialize;
use serde_json::Value;

use crate::db::employee_store::{EmployeeStore, StoreError};
use crate::errors::AppError;
use crate::models::employee::{EmployeeInput, NewEmployee};

const NOT_FOUND: &str = "Employee not found";

#[derive(Serialize)]
struct DataResponse<'a, T: Serialize> {
    message: &'a str,
    data: T,
}

/// Maps a store failure to a response, `context` naming the operation.
fn map_store_error(err: StoreError, context: &str) -> AppError {
    match err {
        StoreError::NotFound(id) => {
            info!("Employee {} not found", id);
            AppError::NotFound(NOT_FOUND.to_string())
        }
        StoreError::DuplicateKey(id) => {
            warn!("Rejected duplicate employee id {}", id);
            AppError::Conflict(
                context.to_string(),
                format!("Employee with id {} already exists", id),
            )
        }
        StoreError::Unexpected(detail) => {
            error!("{}: {}", context, detail);
            AppError::DatabaseError(context.to_string(), detail)
        }
    }
}

fn map_json_error(
    err: actix_web::error::JsonPayloadError,
    _req: &actix_web::HttpRequest,
) -> actix_web::Error {
    AppError::BadRequest(err.to_string()).into()
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/employee")
            .app_data(web::JsonConfig::default().error_handler(map_json_error))
            .route("/create-employee", web::post().to(create_employee))
            .route("/get-employees", web::get().to(get_employees))
            .route("/get-employee/{employee_id}", web::get().to(get_employee))
            .route("/delete-employee/{employee_id}", web::delete().to(delete_employee)),
    );
}

pub async fn create_employee(
    store: web::Data<dyn EmployeeStore>,
    payload: web::Json<Value>,
) -> Result<HttpResponse, AppError> {
    let input = EmployeeInput::from_json(payload.into_inner()).map_err(AppError::Validation)?;
    let new_employee = NewEmployee::parse(&input, Utc::now()).map_err(AppError::Validation)?;

    let employee = store
        .create(new_employee)
        .await
        .map_err(|err| map_store_error(err, "Error creating employee"))?;

    info!("Created employee {}", employee.employee_id);
    Ok(HttpResponse::Created().json(DataResponse {
        message: "Employee created successfully",
        data: employee,
    }))
}

pub async fn get_employees(
    store: web::Data<dyn EmployeeStore>,
) -> Result<HttpResponse, AppError> {
    let employees = store
        .list_all()
        .await
        .map_err(|err| map_store_error(err, "Error fetching employees"))?;

    Ok(HttpResponse::Ok().json(DataResponse {
        message: "Employees fetched successfully",
        data: employees,
    }))
}

pub async fn get_employee(
    store: web::Data<dyn EmployeeStore>,
    employee_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let employee = store
        .get_by_id(&employee_id)
        .await
        .map_err(|err| map_store_error(err, "Error fetching employee"))?;

    Ok(HttpResponse::Ok().json(DataResponse {
        message: "Employee fetched successfully",
        data: employee,
    }))
}

pub async fn delete_employee(
    store: web::Data<dyn EmployeeStore>,
    employee_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let employee = store
        .delete_by_id(&employee_id)
        .await
        .map_err(|err| map_store_error(err, "Error deleting employee"))?;

    info!("Deleted employee {}", employee.employee_id);
    Ok(HttpResponse::Ok().json(DataResponse {
        message: "Employee deleted successfully",
        data: employee,
    }))
}
