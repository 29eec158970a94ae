use async_trait::async_trait;
use sqlx::PgPool;
use std::fmt;

use crate::models::employee::{Employee, NewEmployee};

#[derive(Debug, PartialEq)]
pub enum StoreError {
    DuplicateKey(String),
    NotFound(String),
    Unexpected(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::DuplicateKey(id) => write!(f, "Employee with id {} already exists", id),
            StoreError::NotFound(id) => write!(f, "No employee with id {}", id),
            StoreError::Unexpected(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Unexpected(err.to_string())
    }
}

/// Persistence for employee records.
///
/// Each call is a single statement against the backing table; nothing is
/// shared between calls. Uniqueness of `employee_id` is enforced by the
/// store itself, so concurrent creates of the same id yield one success.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    async fn create(&self, employee: NewEmployee) -> Result<Employee, StoreError>;

    /// All employees, oldest `created_at` first, ties by `employee_id`.
    async fn list_all(&self) -> Result<Vec<Employee>, StoreError>;

    async fn get_by_id(&self, employee_id: &str) -> Result<Employee, StoreError>;

    /// Removes the employee and returns the row as it was.
    async fn delete_by_id(&self, employee_id: &str) -> Result<Employee, StoreError>;
}

pub struct PgEmployeeStore {
    pool: PgPool,
}

impl PgEmployeeStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmployeeStore for PgEmployeeStore {
    async fn create(&self, employee: NewEmployee) -> Result<Employee, StoreError> {
        sqlx::query_as::<_, Employee>(
            r#"
            INSERT INTO employees
                (employee_id, name, email, phone, department, date_of_joining, role)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&employee.employee_id)
        .bind(&employee.name)
        .bind(&employee.email)
        .bind(&employee.phone)
        .bind(&employee.department)
        .bind(employee.date_of_joining)
        .bind(&employee.role)
        .fetch_one(&self.pool)
        .await
        .map_err(|err| match err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                StoreError::DuplicateKey(employee.employee_id.clone())
            }
            other => other.into(),
        })
    }

    async fn list_all(&self) -> Result<Vec<Employee>, StoreError> {
        let employees = sqlx::query_as::<_, Employee>(
            "SELECT * FROM employees ORDER BY created_at ASC, employee_id ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(employees)
    }

    async fn get_by_id(&self, employee_id: &str) -> Result<Employee, StoreError> {
        sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE employee_id = $1")
            .bind(employee_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound(employee_id.to_string()))
    }

    async fn delete_by_id(&self, employee_id: &str) -> Result<Employee, StoreError> {
        sqlx::query_as::<_, Employee>("DELETE FROM employees WHERE employee_id = $1 RETURNING *")
            .bind(employee_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound(employee_id.to_string()))
    }
}
