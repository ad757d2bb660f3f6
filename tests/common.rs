//! Common test fixtures for the integration suites.
//!
//! Provides two field-protected models with different declaration styles,
//! plus a simple principal backed by a fixed permission set.

use std::collections::HashSet;

use serde::Serialize;

use fieldgate::once_cell::sync::Lazy;
use fieldgate::{
    FieldCheck, FieldProtected, FieldRules, InstancePermissions, ModelRegistry, PermissionTarget,
    Principal,
};

/// Principal with a fixed permission set. Superusers hold everything.
#[derive(Debug, Clone)]
pub struct TestUser {
    pub username: String,
    perms: HashSet<String>,
    superuser: bool,
}

impl TestUser {
    pub fn new(username: &str) -> Self {
        Self {
            username: username.to_string(),
            perms: HashSet::new(),
            superuser: false,
        }
    }

    pub fn superuser(username: &str) -> Self {
        Self {
            username: username.to_string(),
            perms: HashSet::new(),
            superuser: true,
        }
    }

    pub fn with_perm(mut self, perm: &str) -> Self {
        self.perms.insert(perm.to_string());
        self
    }
}

impl Principal for TestUser {
    fn has_perm(&self, perm: &str) -> bool {
        self.superuser || self.perms.contains(perm)
    }
}

/// Payroll record exercising every declaration style: an ordered check list
/// on `salary`, a guard hook on `ssn`, a registered codename for `email`,
/// and nothing at all on `name`. The `active` flag serializes but is not a
/// declared field.
#[derive(Debug, Clone, Serialize)]
pub struct Employee {
    pub name: String,
    pub email: String,
    pub salary: u32,
    pub ssn: String,
    pub active: bool,
}

static EMPLOYEE_RULES: Lazy<FieldRules<Employee>> = Lazy::new(|| {
    FieldRules::new("employee")
        .with_fields(["name", "email", "salary", "ssn"])
        .with_permission("can_change_employee_email", "Can change employee email")
        .with_checks(
            "salary",
            [
                // Salaries on inactive records are frozen outright; active
                // records fall through to the label.
                FieldCheck::predicate(|emp: &Employee, _user, _field| {
                    if emp.active {
                        None
                    } else {
                        Some(false)
                    }
                }),
                FieldCheck::label("payroll.adjust_salary"),
            ],
        )
        .with_guard("ssn", |emp: &Employee, user, _field| {
            // Nothing on file yet means the guard has no opinion.
            if emp.ssn.is_empty() {
                None
            } else {
                Some(user.has_perm("records.change_ssn"))
            }
        })
});

impl InstancePermissions for Employee {
    fn has_perm(&self, user: &dyn Principal, perm: &str) -> bool {
        if !self.active && !user.has_perm("records.manage_archived") {
            return false;
        }
        user.has_perm(perm)
    }
}

impl FieldProtected for Employee {
    fn field_rules() -> &'static FieldRules<Self> {
        &EMPLOYEE_RULES
    }
}

pub fn sample_employee() -> Employee {
    Employee {
        name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        salary: 90_000,
        ssn: "078-05-1120".to_string(),
        active: true,
    }
}

pub fn archived_employee() -> Employee {
    Employee {
        active: false,
        ..sample_employee()
    }
}

pub fn new_hire() -> Employee {
    Employee {
        name: "Grace Hopper".to_string(),
        email: "grace@example.com".to_string(),
        salary: 85_000,
        ssn: String::new(),
        active: true,
    }
}

/// Document protected purely by registered static permissions; the default
/// instance-level hook applies.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    pub title: String,
    pub body: String,
    pub author: String,
}

static DOCUMENT_RULES: Lazy<FieldRules<Document>> = Lazy::new(|| {
    FieldRules::new("document")
        .with_fields(["title", "body", "author"])
        .with_permission("can_change_document_title", "Can change document title")
        .with_permission("can_change_document_author", "Can change document author")
});

impl InstancePermissions for Document {}

impl FieldProtected for Document {
    fn field_rules() -> &'static FieldRules<Self> {
        &DOCUMENT_RULES
    }
}

pub fn sample_document() -> Document {
    Document {
        title: "Notes on the Analytical Engine".to_string(),
        body: "Sketch of the engine.".to_string(),
        author: "ada".to_string(),
    }
}

/// Target without an instance-level hook; the backend treats such objects
/// as unrestricted.
pub struct PlainRecord;

impl PermissionTarget for PlainRecord {
    fn model_name(&self) -> &str {
        "plain_record"
    }
}

/// Registry preloaded with both fixture models.
pub fn registry_with_models() -> ModelRegistry {
    let registry = ModelRegistry::new();
    registry
        .register_rules(Employee::field_rules())
        .expect("employee registration");
    registry
        .register_rules(Document::field_rules())
        .expect("document registration");
    registry
}

/// Route `RUST_LOG` output through the test harness.
pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
