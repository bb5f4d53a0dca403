//! In-memory shop data: customers, bills, tailors, jobs and settings.
//!
//! Everything lives for the process lifetime only. Each collection sits behind
//! its own `RwLock`; no lock is held across an `.await`. Operations that hold
//! more than one lock take them in field order: customers, bills, tailors,
//! jobs.

use chrono::Utc;
use shared_types::{
    AppError, Bill, BillQuery, BillStatus, BusinessSettings, CreateBillRequest, CreateJobRequest,
    Customer, CustomerInput, DashboardStats, Job, JobQuery, JobStatus, Tailor, TailorInput,
    TailorStatus, UpiSettings,
};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

/// First bill number handed out.
pub const FIRST_BILL_NUMBER: u32 = 1001;

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}

/// Trim optional text, treating blank as absent.
fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Debug)]
pub struct ShopStore {
    customers: RwLock<HashMap<Uuid, Customer>>,
    bills: RwLock<Vec<Bill>>,
    tailors: RwLock<HashMap<Uuid, Tailor>>,
    jobs: RwLock<Vec<Job>>,
    business: RwLock<BusinessSettings>,
    upi: RwLock<UpiSettings>,
}

impl Default for ShopStore {
    fn default() -> Self {
        Self {
            customers: RwLock::new(HashMap::new()),
            bills: RwLock::new(Vec::new()),
            tailors: RwLock::new(HashMap::new()),
            jobs: RwLock::new(Vec::new()),
            business: RwLock::new(BusinessSettings::default()),
            upi: RwLock::new(UpiSettings::default()),
        }
    }
}

impl ShopStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Customers ──────────────────────────────────────────

    /// Newest first. `search` matches name or phone, case-insensitively.
    pub fn list_customers(&self, search: Option<&str>) -> Vec<Customer> {
        let query = search.map(str::trim).filter(|q| !q.is_empty());
        let mut customers: Vec<Customer> = read(&self.customers)
            .values()
            .filter(|c| query.map_or(true, |q| c.matches(q)))
            .cloned()
            .collect();
        customers.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        customers
    }

    pub fn get_customer(&self, id: Uuid) -> Result<Customer, AppError> {
        read(&self.customers)
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Customer {id} not found")))
    }

    pub fn create_customer(&self, input: CustomerInput) -> Result<Customer, AppError> {
        let phone = input.phone.trim().to_string();
        let mut customers = write(&self.customers);
        if customers.values().any(|c| c.phone == phone) {
            return Err(AppError::conflict("A customer with this phone number already exists"));
        }
        let customer = Customer {
            id: Uuid::new_v4(),
            name: input.name.trim().to_string(),
            phone,
            email: clean(input.email),
            address: clean(input.address),
            notes: clean(input.notes),
            created_at: Utc::now(),
        };
        customers.insert(customer.id, customer.clone());
        Ok(customer)
    }

    pub fn update_customer(&self, id: Uuid, input: CustomerInput) -> Result<Customer, AppError> {
        let phone = input.phone.trim().to_string();
        let mut customers = write(&self.customers);
        if customers.values().any(|c| c.id != id && c.phone == phone) {
            return Err(AppError::conflict("A customer with this phone number already exists"));
        }
        let customer = customers
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Customer {id} not found")))?;
        customer.name = input.name.trim().to_string();
        customer.phone = phone;
        customer.email = clean(input.email);
        customer.address = clean(input.address);
        customer.notes = clean(input.notes);
        Ok(customer.clone())
    }

    /// Bills keep the customer's name after the customer is gone.
    pub fn delete_customer(&self, id: Uuid) -> Result<(), AppError> {
        write(&self.customers)
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::not_found(format!("Customer {id} not found")))
    }

    // ── Bills ──────────────────────────────────────────────

    /// Newest first, filtered by status and customer when given.
    pub fn list_bills(&self, query: &BillQuery) -> Vec<Bill> {
        let mut bills: Vec<Bill> = read(&self.bills)
            .iter()
            .filter(|b| query.status.map_or(true, |s| b.status == s))
            .filter(|b| query.customer_id.map_or(true, |id| b.customer_id == id))
            .cloned()
            .collect();
        bills.sort_by(|a, b| b.bill_number.cmp(&a.bill_number));
        bills
    }

    pub fn get_bill(&self, id: Uuid) -> Result<Bill, AppError> {
        read(&self.bills)
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Bill {id} not found")))
    }

    /// Amounts are stored as submitted. Only their sign is checked.
    pub fn create_bill(&self, req: CreateBillRequest) -> Result<Bill, AppError> {
        let customer = self.get_customer(req.customer_id)?;

        let amounts = [
            ("subtotal", req.subtotal),
            ("discount", req.discount),
            ("total", req.total),
            ("advance", req.advance),
            ("balance", req.balance),
        ];
        if let Some((field, _)) = amounts.iter().find(|(_, v)| !v.is_finite() || *v < 0.0) {
            return Err(AppError::invalid_field(field, "Amount must be zero or more"));
        }
        if req.items.iter().any(|item| item.quantity == 0) {
            return Err(AppError::invalid_field("items", "Quantity must be at least 1"));
        }

        let mut bills = write(&self.bills);
        let bill_number = bills
            .iter()
            .map(|b| b.bill_number + 1)
            .max()
            .unwrap_or(FIRST_BILL_NUMBER);
        let bill = Bill {
            id: Uuid::new_v4(),
            bill_number,
            customer_id: customer.id,
            customer_name: customer.name,
            items: req.items,
            subtotal: req.subtotal,
            discount: req.discount,
            total: req.total,
            advance: req.advance,
            balance: req.balance,
            due_date: clean(req.due_date),
            special_instructions: clean(req.special_instructions),
            status: req.status.unwrap_or_default(),
            created_at: Utc::now(),
        };
        bills.push(bill.clone());
        Ok(bill)
    }

    /// Delivered and cancelled bills are closed and keep their status.
    pub fn update_bill_status(&self, id: Uuid, status: BillStatus) -> Result<Bill, AppError> {
        let mut bills = write(&self.bills);
        let bill = bills
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| AppError::not_found(format!("Bill {id} not found")))?;
        if bill.status != status
            && matches!(bill.status, BillStatus::Delivered | BillStatus::Cancelled)
        {
            return Err(AppError::conflict(format!(
                "Bill #{} is already {}",
                bill.bill_number,
                bill.status.label().to_lowercase()
            )));
        }
        bill.status = status;
        Ok(bill.clone())
    }

    // ── Tailors ────────────────────────────────────────────

    /// Sorted by name.
    pub fn list_tailors(&self) -> Vec<Tailor> {
        let mut tailors: Vec<Tailor> = read(&self.tailors).values().cloned().collect();
        tailors.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
        tailors
    }

    pub fn get_tailor(&self, id: Uuid) -> Result<Tailor, AppError> {
        read(&self.tailors)
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::not_found(format!("Tailor {id} not found")))
    }

    /// The tailor record linked to a sign-in account.
    pub fn tailor_for_username(&self, username: &str) -> Option<Tailor> {
        read(&self.tailors)
            .values()
            .find(|t| t.username.as_deref() == Some(username))
            .cloned()
    }

    pub fn create_tailor(&self, input: TailorInput) -> Result<Tailor, AppError> {
        let username = clean(input.username);
        let mut tailors = write(&self.tailors);
        if let Some(name) = &username {
            if tailors.values().any(|t| t.username.as_ref() == Some(name)) {
                return Err(AppError::conflict(format!(
                    "Account {name} is already linked to a tailor"
                )));
            }
        }
        let tailor = Tailor {
            id: Uuid::new_v4(),
            name: input.name.trim().to_string(),
            phone: input.phone.trim().to_string(),
            email: clean(input.email),
            specialization: clean(input.specialization),
            experience: clean(input.experience),
            username,
            status: input.status.unwrap_or_default(),
            created_at: Utc::now(),
        };
        tailors.insert(tailor.id, tailor.clone());
        Ok(tailor)
    }

    pub fn update_tailor(&self, id: Uuid, input: TailorInput) -> Result<Tailor, AppError> {
        let username = clean(input.username);
        let mut tailors = write(&self.tailors);
        if let Some(name) = &username {
            if tailors
                .values()
                .any(|t| t.id != id && t.username.as_ref() == Some(name))
            {
                return Err(AppError::conflict(format!(
                    "Account {name} is already linked to a tailor"
                )));
            }
        }
        let tailor = tailors
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Tailor {id} not found")))?;
        tailor.name = input.name.trim().to_string();
        tailor.phone = input.phone.trim().to_string();
        tailor.email = clean(input.email);
        tailor.specialization = clean(input.specialization);
        tailor.experience = clean(input.experience);
        tailor.username = username;
        if let Some(status) = input.status {
            tailor.status = status;
        }
        Ok(tailor.clone())
    }

    pub fn set_tailor_status(&self, id: Uuid, status: TailorStatus) -> Result<Tailor, AppError> {
        let mut tailors = write(&self.tailors);
        let tailor = tailors
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Tailor {id} not found")))?;
        tailor.status = status;
        Ok(tailor.clone())
    }

    /// A tailor with unfinished jobs cannot be removed. The roster stays
    /// locked until the removal so no job can be assigned in between.
    pub fn delete_tailor(&self, id: Uuid) -> Result<(), AppError> {
        let mut tailors = write(&self.tailors);
        if !tailors.contains_key(&id) {
            return Err(AppError::not_found(format!("Tailor {id} not found")));
        }
        let open_jobs = read(&self.jobs)
            .iter()
            .filter(|j| j.tailor_id == id && j.status != JobStatus::Completed)
            .count();
        if open_jobs > 0 {
            return Err(AppError::conflict(format!(
                "Tailor still has {open_jobs} unfinished job(s)"
            )));
        }
        tailors.remove(&id);
        Ok(())
    }

    // ── Jobs ───────────────────────────────────────────────

    /// Newest first. `scope` limits the result to one tailor's jobs and
    /// overrides any `tailor_id` in the query.
    pub fn list_jobs(&self, query: &JobQuery, scope: Option<Uuid>) -> Vec<Job> {
        let tailor_id = scope.or(query.tailor_id);
        let mut jobs: Vec<Job> = read(&self.jobs)
            .iter()
            .filter(|j| tailor_id.map_or(true, |id| j.tailor_id == id))
            .filter(|j| query.status.map_or(true, |s| j.status == s))
            .cloned()
            .collect();
        jobs.sort_by(|a, b| b.assigned_at.cmp(&a.assigned_at));
        jobs
    }

    pub fn create_job(&self, req: CreateJobRequest) -> Result<Job, AppError> {
        let bill = self.get_bill(req.bill_id)?;
        let tailors = read(&self.tailors);
        let tailor = tailors
            .get(&req.tailor_id)
            .ok_or_else(|| AppError::not_found(format!("Tailor {} not found", req.tailor_id)))?;
        if tailor.status != TailorStatus::Active {
            return Err(AppError::invalid_field(
                "tailor_id",
                format!("{} is inactive", tailor.name),
            ));
        }
        let job = Job {
            id: Uuid::new_v4(),
            bill_id: bill.id,
            tailor_id: tailor.id,
            tailor_name: tailor.name.clone(),
            customer_name: bill.customer_name,
            instructions: clean(req.instructions).or(bill.special_instructions),
            priority: req.priority,
            due_date: clean(req.due_date).or(bill.due_date),
            status: JobStatus::Pending,
            assigned_at: Utc::now(),
        };
        write(&self.jobs).push(job.clone());
        drop(tailors);
        Ok(job)
    }

    /// Jobs only move one step forward. With `scope`, the job must belong to
    /// that tailor.
    pub fn update_job_status(
        &self,
        id: Uuid,
        status: JobStatus,
        scope: Option<Uuid>,
    ) -> Result<Job, AppError> {
        let mut jobs = write(&self.jobs);
        let job = jobs
            .iter_mut()
            .find(|j| j.id == id)
            .ok_or_else(|| AppError::not_found(format!("Job {id} not found")))?;
        if scope.is_some_and(|tailor_id| tailor_id != job.tailor_id) {
            return Err(AppError::forbidden("This job is assigned to another tailor"));
        }
        if job.status.next() != Some(status) {
            return Err(AppError::invalid_field(
                "status",
                format!(
                    "A {} job cannot move to {}",
                    job.status.label().to_lowercase(),
                    status.label().to_lowercase()
                ),
            ));
        }
        job.status = status;
        Ok(job.clone())
    }

    // ── Dashboard & settings ───────────────────────────────

    pub fn dashboard_stats(&self) -> DashboardStats {
        let today = Utc::now().date_naive();
        let total_customers = read(&self.customers).len();
        let bills = read(&self.bills);
        let total_tailors = read(&self.tailors).len();
        let jobs = read(&self.jobs);
        DashboardStats {
            total_customers,
            total_bills: bills.len(),
            total_tailors,
            total_jobs: jobs.len(),
            pending_jobs: jobs
                .iter()
                .filter(|j| j.status == JobStatus::Pending)
                .count(),
            today_bills: bills
                .iter()
                .filter(|b| b.created_at.date_naive() == today)
                .count(),
            total_revenue: bills
                .iter()
                .filter(|b| b.status != BillStatus::Cancelled)
                .map(|b| b.total)
                .sum(),
        }
    }

    pub fn business_settings(&self) -> BusinessSettings {
        read(&self.business).clone()
    }

    pub fn set_business_settings(&self, settings: BusinessSettings) -> BusinessSettings {
        *write(&self.business) = settings.clone();
        settings
    }

    pub fn upi_settings(&self) -> UpiSettings {
        read(&self.upi).clone()
    }

    pub fn set_upi_settings(&self, settings: UpiSettings) -> UpiSettings {
        *write(&self.upi) = settings.clone();
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shared_types::{AppErrorKind, BillItem};

    fn customer_input(name: &str, phone: &str) -> CustomerInput {
        CustomerInput {
            name: name.to_string(),
            phone: phone.to_string(),
            ..Default::default()
        }
    }

    fn tailor_input(name: &str, username: Option<&str>) -> TailorInput {
        TailorInput {
            name: name.to_string(),
            phone: "9876500000".to_string(),
            username: username.map(str::to_string),
            ..Default::default()
        }
    }

    fn bill_request(customer_id: Uuid, total: f64) -> CreateBillRequest {
        CreateBillRequest {
            customer_id,
            items: vec![BillItem {
                kind: "shirt".to_string(),
                description: "Formal shirt".to_string(),
                quantity: 1,
                price: total,
                measurements: HashMap::new(),
            }],
            subtotal: total,
            discount: 0.0,
            total,
            advance: 0.0,
            balance: total,
            due_date: None,
            special_instructions: Some("  Extra button  ".to_string()),
            status: None,
        }
    }

    #[test]
    fn customer_search_matches_name_or_phone() {
        let store = ShopStore::new();
        store.create_customer(customer_input("Ravi Kumar", "9000011111")).unwrap();
        store.create_customer(customer_input("Anita Shah", "9000022222")).unwrap();

        let by_name: Vec<_> = store
            .list_customers(Some("ravi"))
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(by_name, vec!["Ravi Kumar".to_string()]);
        assert_eq!(store.list_customers(Some("22222")).len(), 1);
        assert_eq!(store.list_customers(Some("   ")).len(), 2);
        assert_eq!(store.list_customers(None).len(), 2);
    }

    #[test]
    fn duplicate_phone_is_a_conflict() {
        let store = ShopStore::new();
        store.create_customer(customer_input("A", "9000011111")).unwrap();
        let err = store.create_customer(customer_input("B", " 9000011111 ")).unwrap_err();
        assert_eq!(err.kind, AppErrorKind::Conflict);
    }

    #[test]
    fn bills_are_numbered_and_keep_amounts() {
        let store = ShopStore::new();
        let customer = store.create_customer(customer_input("Ravi", "9000011111")).unwrap();
        let first = store.create_bill(bill_request(customer.id, 850.0)).unwrap();
        let second = store.create_bill(bill_request(customer.id, 1200.0)).unwrap();

        assert_eq!(first.bill_number, FIRST_BILL_NUMBER);
        assert_eq!(second.bill_number, FIRST_BILL_NUMBER + 1);
        assert_eq!(first.total, 850.0);
        assert_eq!(first.customer_name, "Ravi");
        assert_eq!(first.status, BillStatus::Pending);
        assert_eq!(first.special_instructions.as_deref(), Some("Extra button"));
    }

    #[test]
    fn bill_for_missing_customer_is_not_found() {
        let store = ShopStore::new();
        let err = store.create_bill(bill_request(Uuid::new_v4(), 100.0)).unwrap_err();
        assert_eq!(err.kind, AppErrorKind::NotFound);
    }

    #[test]
    fn negative_amount_is_rejected() {
        let store = ShopStore::new();
        let customer = store.create_customer(customer_input("Ravi", "9000011111")).unwrap();
        let mut req = bill_request(customer.id, 100.0);
        req.discount = -5.0;
        let err = store.create_bill(req).unwrap_err();
        assert_eq!(err.kind, AppErrorKind::ValidationError);
        assert!(err.field_errors.contains_key("discount"));
    }

    #[test]
    fn bill_filters_and_closed_status() {
        let store = ShopStore::new();
        let ravi = store.create_customer(customer_input("Ravi", "9000011111")).unwrap();
        let anita = store.create_customer(customer_input("Anita", "9000022222")).unwrap();
        let bill = store.create_bill(bill_request(ravi.id, 100.0)).unwrap();
        store.create_bill(bill_request(anita.id, 200.0)).unwrap();

        store.update_bill_status(bill.id, BillStatus::Delivered).unwrap();
        let delivered = store.list_bills(&BillQuery {
            status: Some(BillStatus::Delivered),
            customer_id: None,
        });
        assert_eq!(delivered.len(), 1);
        assert_eq!(
            store
                .list_bills(&BillQuery {
                    status: None,
                    customer_id: Some(anita.id),
                })
                .len(),
            1
        );

        let err = store
            .update_bill_status(bill.id, BillStatus::InProgress)
            .unwrap_err();
        assert_eq!(err.kind, AppErrorKind::Conflict);
    }

    #[test]
    fn jobs_are_scoped_to_their_tailor() {
        let store = ShopStore::new();
        let customer = store.create_customer(customer_input("Ravi", "9000011111")).unwrap();
        let bill = store.create_bill(bill_request(customer.id, 500.0)).unwrap();
        let mine = store.create_tailor(tailor_input("Suresh", Some("tailor"))).unwrap();
        let other = store.create_tailor(tailor_input("Mahesh", None)).unwrap();

        let job = store
            .create_job(CreateJobRequest {
                bill_id: bill.id,
                tailor_id: mine.id,
                instructions: None,
                priority: Default::default(),
                due_date: None,
            })
            .unwrap();
        store
            .create_job(CreateJobRequest {
                bill_id: bill.id,
                tailor_id: other.id,
                instructions: None,
                priority: Default::default(),
                due_date: None,
            })
            .unwrap();

        assert_eq!(job.instructions.as_deref(), Some("Extra button"));
        assert_eq!(store.list_jobs(&JobQuery::default(), None).len(), 2);
        let scoped = store.list_jobs(
            &JobQuery {
                status: None,
                tailor_id: Some(other.id),
            },
            Some(mine.id),
        );
        assert_eq!(scoped.len(), 1);
        assert_eq!(scoped[0].tailor_id, mine.id);

        let err = store
            .update_job_status(job.id, JobStatus::InProgress, Some(other.id))
            .unwrap_err();
        assert_eq!(err.kind, AppErrorKind::Forbidden);
    }

    #[test]
    fn job_status_only_moves_forward_one_step() {
        let store = ShopStore::new();
        let customer = store.create_customer(customer_input("Ravi", "9000011111")).unwrap();
        let bill = store.create_bill(bill_request(customer.id, 500.0)).unwrap();
        let tailor = store.create_tailor(tailor_input("Suresh", Some("tailor"))).unwrap();
        let job = store
            .create_job(CreateJobRequest {
                bill_id: bill.id,
                tailor_id: tailor.id,
                instructions: None,
                priority: Default::default(),
                due_date: None,
            })
            .unwrap();

        assert!(store
            .update_job_status(job.id, JobStatus::Completed, None)
            .is_err());
        store
            .update_job_status(job.id, JobStatus::InProgress, Some(tailor.id))
            .unwrap();
        let done = store
            .update_job_status(job.id, JobStatus::Completed, Some(tailor.id))
            .unwrap();
        assert_eq!(done.status, JobStatus::Completed);
        assert!(store
            .update_job_status(job.id, JobStatus::Completed, None)
            .is_err());
    }

    #[test]
    fn inactive_tailor_gets_no_jobs_and_busy_tailor_stays() {
        let store = ShopStore::new();
        let customer = store.create_customer(customer_input("Ravi", "9000011111")).unwrap();
        let bill = store.create_bill(bill_request(customer.id, 500.0)).unwrap();
        let tailor = store.create_tailor(tailor_input("Suresh", None)).unwrap();
        store
            .create_job(CreateJobRequest {
                bill_id: bill.id,
                tailor_id: tailor.id,
                instructions: None,
                priority: Default::default(),
                due_date: None,
            })
            .unwrap();

        assert_eq!(
            store.delete_tailor(tailor.id).unwrap_err().kind,
            AppErrorKind::Conflict
        );

        store
            .set_tailor_status(tailor.id, TailorStatus::Inactive)
            .unwrap();
        let err = store
            .create_job(CreateJobRequest {
                bill_id: bill.id,
                tailor_id: tailor.id,
                instructions: None,
                priority: Default::default(),
                due_date: None,
            })
            .unwrap_err();
        assert_eq!(err.kind, AppErrorKind::ValidationError);
    }

    #[test]
    fn linked_account_is_unique() {
        let store = ShopStore::new();
        store.create_tailor(tailor_input("Suresh", Some("tailor"))).unwrap();
        let err = store
            .create_tailor(tailor_input("Mahesh", Some("tailor")))
            .unwrap_err();
        assert_eq!(err.kind, AppErrorKind::Conflict);
        assert_eq!(
            store.tailor_for_username("tailor").map(|t| t.name),
            Some("Suresh".to_string())
        );
    }

    #[test]
    fn stats_count_and_exclude_cancelled_revenue() {
        let store = ShopStore::new();
        let customer = store.create_customer(customer_input("Ravi", "9000011111")).unwrap();
        store.create_bill(bill_request(customer.id, 500.0)).unwrap();
        let cancelled = store.create_bill(bill_request(customer.id, 300.0)).unwrap();
        store
            .update_bill_status(cancelled.id, BillStatus::Cancelled)
            .unwrap();

        let stats = store.dashboard_stats();
        assert_eq!(stats.total_customers, 1);
        assert_eq!(stats.total_bills, 2);
        assert_eq!(stats.today_bills, 2);
        assert_eq!(stats.total_revenue, 500.0);
        assert_eq!(stats.pending_jobs, 0);
    }

    #[test]
    fn settings_start_from_shop_defaults() {
        let store = ShopStore::new();
        assert_eq!(store.business_settings().business_name, "STAR TAILORS");
        assert_eq!(store.upi_settings().upi_id, "startailors@upi");

        store.set_upi_settings(UpiSettings {
            upi_id: "shop@okbank".to_string(),
            business_name: "STAR TAILORS".to_string(),
        });
        assert_eq!(store.upi_settings().upi_id, "shop@okbank");
    }

    #[test]
    fn concurrent_assign_and_delete_never_orphan_a_job() {
        let store = ShopStore::new();
        let customer = store.create_customer(customer_input("Ravi", "9000011111")).unwrap();
        let bill = store.create_bill(bill_request(customer.id, 500.0)).unwrap();

        for _ in 0..200 {
            let tailor = store.create_tailor(tailor_input("Suresh", None)).unwrap();
            std::thread::scope(|s| {
                s.spawn(|| {
                    let _ = store.create_job(CreateJobRequest {
                        bill_id: bill.id,
                        tailor_id: tailor.id,
                        instructions: None,
                        priority: Default::default(),
                        due_date: None,
                    });
                });
                s.spawn(|| {
                    let _ = store.delete_tailor(tailor.id);
                });
            });
        }

        let roster: Vec<Uuid> = store.list_tailors().into_iter().map(|t| t.id).collect();
        for job in store.list_jobs(&JobQuery::default(), None) {
            assert!(roster.contains(&job.tailor_id), "job {} lost its tailor", job.id);
        }
        assert_eq!(store.dashboard_stats().total_tailors, roster.len());
    }

    #[test]
    fn deleting_unknown_tailor_is_not_found() {
        let store = ShopStore::new();
        assert_eq!(
            store.delete_tailor(Uuid::new_v4()).unwrap_err().kind,
            AppErrorKind::NotFound
        );
    }
}
