use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Mutex;

use super::employee_store::{EmployeeStore, StoreError};
use crate::models::employee::{Employee, NewEmployee};

/// Map-backed store with the same uniqueness and ordering contract as the
/// Postgres table.
#[derive(Default)]
pub struct InMemoryEmployeeStore {
    rows: Mutex<HashMap<String, Employee>>,
}

impl InMemoryEmployeeStore {
    fn rows(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, Employee>>, StoreError> {
        self.rows
            .lock()
            .map_err(|_| StoreError::Unexpected("employee table lock poisoned".to_string()))
    }
}

#[async_trait]
impl EmployeeStore for InMemoryEmployeeStore {
    async fn create(&self, employee: NewEmployee) -> Result<Employee, StoreError> {
        let mut rows = self.rows()?;
        if rows.contains_key(&employee.employee_id) {
            return Err(StoreError::DuplicateKey(employee.employee_id));
        }
        let stored = Employee {
            employee_id: employee.employee_id,
            name: employee.name,
            email: employee.email,
            phone: employee.phone,
            department: employee.department,
            date_of_joining: employee.date_of_joining,
            role: employee.role,
            created_at: Utc::now(),
        };
        rows.insert(stored.employee_id.clone(), stored.clone());
        Ok(stored)
    }

    async fn list_all(&self) -> Result<Vec<Employee>, StoreError> {
        let mut employees: Vec<Employee> = self.rows()?.values().cloned().collect();
        employees.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.employee_id.cmp(&b.employee_id))
        });
        Ok(employees)
    }

    async fn get_by_id(&self, employee_id: &str) -> Result<Employee, StoreError> {
        self.rows()?
            .get(employee_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(employee_id.to_string()))
    }

    async fn delete_by_id(&self, employee_id: &str) -> Result<Employee, StoreError> {
        self.rows()?
            .remove(employee_id)
            .ok_or_else(|| StoreError::NotFound(employee_id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::sync::Arc;

    fn new_employee(id: &str) -> NewEmployee {
        NewEmployee {
            employee_id: id.to_string(),
            name: "Alice".to_string(),
            email: "a@x.com".to_string(),
            phone: "9876543210".to_string(),
            department: "Engineering".to_string(),
            date_of_joining: Utc.with_ymd_and_hms(2022, 1, 10, 0, 0, 0).unwrap(),
            role: "Dev".to_string(),
        }
    }

    #[tokio::test]
    async fn create_then_get_round_trips() {
        let store = InMemoryEmployeeStore::default();
        let created = store.create(new_employee("22CS001")).await.unwrap();
        let fetched = store.get_by_id("22CS001").await.unwrap();
        assert_eq!(created, fetched);
        assert_eq!(fetched.name, "Alice");
    }

    #[tokio::test]
    async fn duplicate_create_is_rejected() {
        let store = InMemoryEmployeeStore::default();
        store.create(new_employee("22CS001")).await.unwrap();
        let mut again = new_employee("22CS001");
        again.name = "Mallory".to_string();
        assert_eq!(
            store.create(again).await.unwrap_err(),
            StoreError::DuplicateKey("22CS001".to_string())
        );
        assert_eq!(store.get_by_id("22CS001").await.unwrap().name, "Alice");
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let store = InMemoryEmployeeStore::default();
        store.create(new_employee("22CS001")).await.unwrap();
        let deleted = store.delete_by_id("22CS001").await.unwrap();
        assert_eq!(deleted.employee_id, "22CS001");
        assert!(matches!(
            store.get_by_id("22CS001").await,
            Err(StoreError::NotFound(_))
        ));
        assert!(matches!(
            store.delete_by_id("22CS001").await,
            Err(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn list_counts_creates_minus_deletes() {
        let store = InMemoryEmployeeStore::default();
        let ids = ["22CS001", "22CS002", "22HR003", "23MK0004", "24TR00005"];
        for id in ids {
            store.create(new_employee(id)).await.unwrap();
        }
        store.delete_by_id("22CS002").await.unwrap();
        store.delete_by_id("24TR00005").await.unwrap();

        let listed: Vec<String> = store
            .list_all()
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.employee_id)
            .collect();
        assert_eq!(listed.len(), ids.len() - 2);
        assert!(!listed.contains(&"22CS002".to_string()));
    }

    #[tokio::test]
    async fn concurrent_creates_of_one_id_yield_one_success() {
        let store = Arc::new(InMemoryEmployeeStore::default());
        let attempts: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.create(new_employee("22CS001")).await })
            })
            .collect();

        let mut successes = 0;
        let mut duplicates = 0;
        for attempt in attempts {
            match attempt.await.unwrap() {
                Ok(_) => successes += 1,
                Err(StoreError::DuplicateKey(_)) => duplicates += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }
        assert_eq!((successes, duplicates), (1, 7));
    }
}
